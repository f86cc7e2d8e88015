//! Forfeiture and the endgame it can trigger.
//!
//! A player may concede at any time while the game is in progress, and
//! the timer policy concedes on their behalf after repeated timeouts.
//! Forfeited players keep their chips on the board but are skipped by
//! the turn pointer and can never win.

use crate::core::PlayerId;
use crate::error::GameError;

use super::state::{GameState, GameStatus};

/// What a forfeit call did to the game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ForfeitOutcome {
    /// The player was already forfeited; nothing changed.
    pub already_forfeited: bool,
    /// The forfeit ended the game.
    pub game_over: bool,
    /// Winner by default, when the game ended with one side standing.
    pub winner: Option<PlayerId>,
}

impl GameState {
    /// Mark `player_id` as forfeited and resolve the consequences.
    ///
    /// Idempotent for an already-forfeited player. If the forfeiter
    /// held the turn, the pointer advances past them. When at most one
    /// side remains active the game finishes: the last active player
    /// wins, or in team mode the first active member of the last
    /// remaining team stands in as the recorded winner. A game where
    /// every player forfeits finishes with no winner.
    pub fn forfeit(&mut self, player_id: &PlayerId) -> Result<ForfeitOutcome, GameError> {
        if self.status != GameStatus::Playing {
            return Err(GameError::GameNotInProgress);
        }
        if self.players.len() < 2 {
            return Err(GameError::NoOtherPlayers);
        }
        let index = self
            .players
            .iter()
            .position(|p| &p.id == player_id)
            .ok_or(GameError::PlayerNotInRoom)?;

        if self.players[index].forfeited {
            return Ok(ForfeitOutcome {
                already_forfeited: true,
                game_over: false,
                winner: None,
            });
        }

        let held_turn = self.current_player_index == index;
        self.players[index].forfeited = true;

        if let Some(winner) = self.last_side_standing() {
            self.status = GameStatus::Finished;
            self.winner = winner.clone();
            return Ok(ForfeitOutcome {
                already_forfeited: false,
                game_over: true,
                winner,
            });
        }

        if held_turn {
            // advance_turn starts from the current index, which is now
            // forfeited, so it lands on the next active player.
            self.advance_turn();
        }

        Ok(ForfeitOutcome {
            already_forfeited: false,
            game_over: false,
            winner: None,
        })
    }

    /// `Some(winner)` when at most one side is still active.
    ///
    /// Free-for-all: a side is a player. Team mode: a side is a team,
    /// and the representative winner is the first active member in
    /// seating order. `Some(None)` means everyone forfeited.
    fn last_side_standing(&self) -> Option<Option<PlayerId>> {
        let active: Vec<_> = self.active_players().collect();
        if active.is_empty() {
            return Some(None);
        }

        if self.settings.teams_enabled {
            let first_team = active[0].team_index.unwrap_or(0);
            if active
                .iter()
                .all(|p| p.team_index.unwrap_or(0) == first_team)
            {
                return Some(Some(active[0].id.clone()));
            }
            return None;
        }

        if active.len() == 1 {
            return Some(Some(active[0].id.clone()));
        }
        None
    }
}
