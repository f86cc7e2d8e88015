//! Aggregate game state and the turn pointer.
//!
//! `GameState` is what one client reconstructs from the shared store
//! (public zone plus its own private hand, or all hands when acting),
//! and what the turn machine mutates. Serde names mirror the stored
//! document; the turn history is serialized only when present because
//! the store keeps it in its own append-only log.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::core::{ChipColor, GameRng, GameSettings, PlayerId};
use crate::deck::{self, Card};

use super::player::{Player, PlayerSeed};
use super::teams::team_turn_order;

/// Lifecycle of one room. `Finished` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Waiting,
    Playing,
    Finished,
}

/// The three things a player can do on their turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnAction {
    Natural,
    Higher,
    Pass,
}

/// Immutable record of one completed turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnHistoryEntry {
    pub player_id: PlayerId,
    pub player_name: String,
    pub player_color: ChipColor,
    pub action: TurnAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_value: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell_number: Option<u8>,
    /// Milliseconds since the Unix epoch, supplied by the caller.
    pub timestamp: u64,
}

/// Full state of one game in progress (or finished).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub room_id: String,
    pub status: GameStatus,
    pub settings: GameSettings,
    pub board: Board,
    pub players: Vec<Player>,
    pub current_player_index: usize,
    pub deck: Vec<Card>,
    #[serde(default)]
    pub discard_pile: Vec<Card>,
    pub winner: Option<PlayerId>,
    pub created_at: u64,
    /// Bumped on every public-zone write; stale snapshots are discarded.
    #[serde(default)]
    pub version: u64,
    /// Explicit turn permutation, present only in team mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turn_order: Option<Vec<usize>>,
    /// Local copy of the append-only log; the store keeps the original.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub turn_history: Vec<TurnHistoryEntry>,
}

impl GameState {
    /// Start a new game: generate the board, build and shuffle the
    /// deck, deal hands round-robin, and compute the team turn order
    /// when teams are enabled. The first seed takes the first turn.
    #[must_use]
    pub fn new(
        room_id: impl Into<String>,
        seeds: Vec<PlayerSeed>,
        settings: GameSettings,
        rng: &mut GameRng,
        now_ms: u64,
    ) -> Self {
        let board = Board::generate(settings.board_pattern);

        let mut deck = deck::generate_deck(&settings);
        rng.shuffle(&mut deck);
        let mut hands = deck::deal(&mut deck, seeds.len(), settings.hand_size);

        let players: Vec<Player> = seeds
            .into_iter()
            .zip(hands.drain(..))
            .map(|(seed, hand)| seed.into_player(hand))
            .collect();

        let turn_order = settings.teams_enabled.then(|| team_turn_order(&players));

        Self {
            room_id: room_id.into(),
            status: GameStatus::Playing,
            settings,
            board,
            players,
            current_player_index: 0,
            deck,
            discard_pile: Vec::new(),
            winner: None,
            created_at: now_ms,
            version: 0,
            turn_order,
            turn_history: Vec::new(),
        }
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> &Player {
        &self.players[self.current_player_index]
    }

    /// Find a player by id.
    #[must_use]
    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == id)
    }

    #[must_use]
    pub fn player_mut(&mut self, id: &PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| &p.id == id)
    }

    /// Whether it is this player's turn.
    #[must_use]
    pub fn is_player_turn(&self, id: &PlayerId) -> bool {
        &self.current_player().id == id
    }

    /// Players still in the turn rotation.
    #[must_use]
    pub fn active_player_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_active()).count()
    }

    pub fn active_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.is_active())
    }

    /// Advance the turn pointer to the next non-forfeited player.
    ///
    /// Walks `turn_order` when present (team mode), player indices
    /// modulo the player count otherwise. With one or zero active
    /// players left there is nobody to advance to; the pointer stays
    /// put and the caller is expected to end the game.
    pub fn advance_turn(&mut self) {
        if self.active_player_count() <= 1 {
            return;
        }

        match &self.turn_order {
            Some(order) => {
                let pos = order
                    .iter()
                    .position(|&i| i == self.current_player_index)
                    .unwrap_or(0);
                for step in 1..=order.len() {
                    let idx = order[(pos + step) % order.len()];
                    if self.players[idx].is_active() {
                        self.current_player_index = idx;
                        return;
                    }
                }
            }
            None => {
                let count = self.players.len();
                for step in 1..=count {
                    let idx = (self.current_player_index + step) % count;
                    if self.players[idx].is_active() {
                        self.current_player_index = idx;
                        return;
                    }
                }
            }
        }
    }

    /// Total cards across deck, discard, hands, and chips on the board.
    ///
    /// Constant for the lifetime of a game (a placed chip consumes the
    /// card into the discard pile, so chips are not counted twice;
    /// this counts card objects, which equal `settings.total_cards()`).
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.deck.len()
            + self.discard_pile.len()
            + self.players.iter().map(|p| p.hand.len()).sum::<usize>()
    }
}
