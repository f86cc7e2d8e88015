//! The turn state machine: applying one action for the current player.
//!
//! Each call applies exactly one action and then advances the turn
//! pointer. Calls are atomic: every fallible check runs before the
//! first mutation, so a rejected action leaves the state untouched.
//! Win detection is the caller's follow-up (`check_winner`); the
//! machine itself only moves cards and chips.

use crate::board::Chip;
use crate::core::{CardId, GameRng, PlayerId};
use crate::deck;
use crate::error::GameError;

use super::state::{GameState, GameStatus, TurnAction, TurnHistoryEntry};
use super::validation::{validate_placement, PlacementKind};

/// One requested turn. Pass carries no target by construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnRequest {
    /// Play a card from the hand onto a cell.
    Place {
        kind: PlacementKind,
        card_id: CardId,
        cell_number: u8,
    },
    /// Skip placement; draw if below the hand cap.
    Pass,
    /// A pass issued by the host because the actor's timer expired.
    /// Counts toward automatic forfeiture.
    TimeoutPass,
}

impl TurnRequest {
    /// The action recorded in the turn history.
    #[must_use]
    pub fn action(&self) -> TurnAction {
        match self {
            TurnRequest::Place { kind, .. } => kind.action(),
            TurnRequest::Pass | TurnRequest::TimeoutPass => TurnAction::Pass,
        }
    }
}

/// What a successful turn did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnOutcome {
    /// The history record for this turn (already appended to the
    /// state's local log).
    pub entry: TurnHistoryEntry,
    /// Whether a replacement card was actually drawn.
    pub drew_card: bool,
    /// The actor's timeout streak after this turn. The timer policy
    /// forfeits at three.
    pub consecutive_timeouts: u32,
}

impl GameState {
    /// Apply one action for `player_id` and advance the turn.
    ///
    /// Fails with `NotYourTurn` for anyone but the current player, and
    /// with a structured reason for unknown cards or illegal
    /// placements. On failure nothing is mutated.
    pub fn apply_turn(
        &mut self,
        player_id: &PlayerId,
        request: &TurnRequest,
        rng: &mut GameRng,
        now_ms: u64,
    ) -> Result<TurnOutcome, GameError> {
        if self.status != GameStatus::Playing {
            return Err(GameError::GameNotInProgress);
        }
        if !self.is_player_turn(player_id) {
            return Err(GameError::NotYourTurn);
        }

        let actor = self.current_player_index;
        let mut drew_card = false;
        let (card_value, cell_number) = match request {
            TurnRequest::Place {
                kind,
                card_id,
                cell_number,
            } => {
                let hand = &self.players[actor].hand;
                let card_pos = hand
                    .iter()
                    .position(|c| &c.id == card_id)
                    .ok_or(GameError::CardNotInHand)?;

                validate_placement(
                    &self.board,
                    &hand[card_pos],
                    *cell_number,
                    *kind,
                    &self.settings,
                )?;

                // All checks passed; mutate.
                let chip = Chip {
                    player_id: self.players[actor].id.clone(),
                    color: self.players[actor].color,
                };
                self.board.place_chip(*cell_number, chip)?;

                let card = self.players[actor].hand.remove(card_pos);
                let value = card.value;
                self.discard_pile.push(card);

                let should_draw = match kind {
                    PlacementKind::Natural => true,
                    PlacementKind::Higher => self.settings.draw_on_higher,
                };
                if should_draw {
                    drew_card = self.draw_for(actor, rng);
                }

                (Some(value), Some(*cell_number))
            }
            TurnRequest::Pass | TurnRequest::TimeoutPass => {
                drew_card = self.draw_for(actor, rng);
                (None, None)
            }
        };

        let player = &mut self.players[actor];
        if matches!(request, TurnRequest::TimeoutPass) {
            player.consecutive_timeouts += 1;
        } else {
            player.consecutive_timeouts = 0;
        }
        let consecutive_timeouts = player.consecutive_timeouts;

        let entry = TurnHistoryEntry {
            player_id: player.id.clone(),
            player_name: player.name.clone(),
            player_color: player.color,
            action: request.action(),
            card_value,
            cell_number,
            timestamp: now_ms,
        };
        self.turn_history.push(entry.clone());

        self.advance_turn();

        Ok(TurnOutcome {
            entry,
            drew_card,
            consecutive_timeouts,
        })
    }

    /// Draw a replacement for the seated player, respecting the hand
    /// cap and the deck/discard exhaustion rules. Returns whether a
    /// card was drawn.
    fn draw_for(&mut self, player_index: usize, rng: &mut GameRng) -> bool {
        if self.players[player_index].hand.len() >= self.settings.hand_size {
            return false;
        }
        match deck::draw(&mut self.deck, &mut self.discard_pile, rng) {
            Some(card) => {
                self.players[player_index].hand.push(card);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameSettings, PlayerId};
    use crate::deck::Card;
    use crate::error::PlacementError;

    fn new_game(settings: GameSettings) -> (GameState, GameRng) {
        let mut rng = GameRng::new(42);
        let seeds = crate::game::state::tests::seeds(2);
        let state = GameState::new("R", seeds, settings, &mut rng, 0);
        (state, rng)
    }

    /// Swap a known card into the current player's hand so placement
    /// targets are predictable. The replaced card is dropped, not
    /// discarded, so the card set stays the same size.
    fn plant_card(state: &mut GameState, value: u16) -> CardId {
        let id = CardId::new(format!("planted-{value}"));
        let card = Card {
            value,
            id: id.clone(),
        };
        let actor = state.current_player_index;
        state.players[actor].hand[0] = card;
        id
    }

    #[test]
    fn test_natural_places_discards_and_draws() {
        let (mut state, mut rng) = new_game(GameSettings::default());
        let card_id = plant_card(&mut state, 12);
        let total = state.settings.total_cards();
        let deck_before = state.deck.len();

        let outcome = state
            .apply_turn(
                &PlayerId::from("p0"),
                &TurnRequest::Place {
                    kind: PlacementKind::Natural,
                    card_id,
                    cell_number: 12,
                },
                &mut rng,
                1_000,
            )
            .unwrap();

        assert!(outcome.drew_card);
        assert!(state.board.is_occupied(12));
        assert_eq!(state.players[0].hand.len(), 5);
        assert_eq!(state.deck.len(), deck_before - 1);
        assert_eq!(state.card_count(), total);
        assert_eq!(state.current_player_index, 1);

        let entry = &outcome.entry;
        assert_eq!(entry.action, TurnAction::Natural);
        assert_eq!(entry.card_value, Some(12));
        assert_eq!(entry.cell_number, Some(12));
    }

    #[test]
    fn test_higher_draws_only_when_configured() {
        for (draw_on_higher, expect_draw) in [(false, false), (true, true)] {
            let mut settings = GameSettings::default();
            settings.draw_on_higher = draw_on_higher;
            let (mut state, mut rng) = new_game(settings);
            let card_id = plant_card(&mut state, 12);

            let outcome = state
                .apply_turn(
                    &PlayerId::from("p0"),
                    &TurnRequest::Place {
                        kind: PlacementKind::Higher,
                        card_id,
                        cell_number: 40,
                    },
                    &mut rng,
                    0,
                )
                .unwrap();

            assert_eq!(outcome.drew_card, expect_draw);
            let expected_hand = if expect_draw { 5 } else { 4 };
            assert_eq!(state.players[0].hand.len(), expected_hand);
        }
    }

    #[test]
    fn test_pass_refills_below_cap() {
        let (mut state, mut rng) = new_game(GameSettings::default());
        state.players[0].hand.truncate(3);

        let outcome = state
            .apply_turn(&PlayerId::from("p0"), &TurnRequest::Pass, &mut rng, 0)
            .unwrap();

        assert!(outcome.drew_card);
        assert_eq!(state.players[0].hand.len(), 4);
        assert_eq!(outcome.entry.action, TurnAction::Pass);
        assert_eq!(outcome.entry.card_value, None);
    }

    #[test]
    fn test_pass_at_cap_draws_nothing() {
        let (mut state, mut rng) = new_game(GameSettings::default());

        let outcome = state
            .apply_turn(&PlayerId::from("p0"), &TurnRequest::Pass, &mut rng, 0)
            .unwrap();

        assert!(!outcome.drew_card);
        assert_eq!(state.players[0].hand.len(), 5);
    }

    #[test]
    fn test_not_your_turn_mutates_nothing() {
        let (mut state, mut rng) = new_game(GameSettings::default());
        let before = state.clone();

        let err = state
            .apply_turn(&PlayerId::from("p1"), &TurnRequest::Pass, &mut rng, 0)
            .unwrap_err();

        assert_eq!(err, GameError::NotYourTurn);
        assert_eq!(state, before);
    }

    #[test]
    fn test_unknown_card_mutates_nothing() {
        let (mut state, mut rng) = new_game(GameSettings::default());
        let before = state.clone();

        let err = state
            .apply_turn(
                &PlayerId::from("p0"),
                &TurnRequest::Place {
                    kind: PlacementKind::Natural,
                    card_id: CardId::new("nope"),
                    cell_number: 12,
                },
                &mut rng,
                0,
            )
            .unwrap_err();

        assert_eq!(err, GameError::CardNotInHand);
        assert_eq!(state, before);
    }

    #[test]
    fn test_illegal_placement_mutates_nothing() {
        let (mut state, mut rng) = new_game(GameSettings::default());
        let card_id = plant_card(&mut state, 12);
        let before = state.clone();

        let err = state
            .apply_turn(
                &PlayerId::from("p0"),
                &TurnRequest::Place {
                    kind: PlacementKind::Higher,
                    card_id,
                    cell_number: 11,
                },
                &mut rng,
                0,
            )
            .unwrap_err();

        assert_eq!(
            err,
            GameError::InvalidPlacement(PlacementError::HigherNotGreater)
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_timeout_pass_tracks_streak_and_action_resets_it() {
        let (mut state, mut rng) = new_game(GameSettings::default());

        let o1 = state
            .apply_turn(&PlayerId::from("p0"), &TurnRequest::TimeoutPass, &mut rng, 0)
            .unwrap();
        assert_eq!(o1.consecutive_timeouts, 1);

        state
            .apply_turn(&PlayerId::from("p1"), &TurnRequest::Pass, &mut rng, 0)
            .unwrap();

        let o2 = state
            .apply_turn(&PlayerId::from("p0"), &TurnRequest::TimeoutPass, &mut rng, 0)
            .unwrap();
        assert_eq!(o2.consecutive_timeouts, 2);

        state
            .apply_turn(&PlayerId::from("p1"), &TurnRequest::Pass, &mut rng, 0)
            .unwrap();

        // A deliberate pass clears the streak.
        let o3 = state
            .apply_turn(&PlayerId::from("p0"), &TurnRequest::Pass, &mut rng, 0)
            .unwrap();
        assert_eq!(o3.consecutive_timeouts, 0);
        assert_eq!(state.players[0].consecutive_timeouts, 0);
    }

    #[test]
    fn test_turn_rejected_when_not_playing() {
        let (mut state, mut rng) = new_game(GameSettings::default());
        state.status = GameStatus::Finished;

        let err = state
            .apply_turn(&PlayerId::from("p0"), &TurnRequest::Pass, &mut rng, 0)
            .unwrap_err();
        assert_eq!(err, GameError::GameNotInProgress);
    }

    #[test]
    fn test_history_appends_one_entry_per_turn() {
        let (mut state, mut rng) = new_game(GameSettings::default());

        state
            .apply_turn(&PlayerId::from("p0"), &TurnRequest::Pass, &mut rng, 10)
            .unwrap();
        state
            .apply_turn(&PlayerId::from("p1"), &TurnRequest::Pass, &mut rng, 20)
            .unwrap();

        assert_eq!(state.turn_history.len(), 2);
        assert_eq!(state.turn_history[0].timestamp, 10);
        assert_eq!(state.turn_history[1].player_id, PlayerId::from("p1"));
    }
}
