//! Host-side bot driving.
//!
//! Exactly one client per room, the host's, advances bot turns;
//! everyone else just watches the store. The driver re-checks the
//! store before every move so a host that reconnects mid-chain picks
//! up where the state actually is, and an in-flight flag stops a
//! re-entrant call from double-moving a bot.

use crate::core::{GameRng, PlayerId};
use crate::error::GameError;
use crate::game::{GameStatus, TurnRequest};
use crate::store::DocumentStore;

use super::actions::{execute_player_turn, load_full_game};
use crate::bot::choose_bot_move;

/// Drives bot turns for rooms this client hosts. Holds a forked RNG
/// stream so bot tie-breaks don't perturb any other randomness.
pub struct HostDriver {
    rng: GameRng,
    in_flight: bool,
}

impl HostDriver {
    #[must_use]
    pub fn new(rng: GameRng) -> Self {
        Self {
            rng,
            in_flight: false,
        }
    }

    /// Play every bot whose turn it is, in order, until a human holds
    /// the turn or the game ends. Returns the number of bot turns
    /// played.
    ///
    /// No-op unless `host_id` is the seated host. Safe to call on
    /// every state change; a concurrent call returns immediately.
    pub fn drive_bot_turns(
        &mut self,
        store: &dyn DocumentStore,
        code: &str,
        host_id: &PlayerId,
        now_ms: u64,
    ) -> Result<usize, GameError> {
        if self.in_flight {
            return Ok(0);
        }
        self.in_flight = true;
        let result = self.drive_inner(store, code, host_id, now_ms);
        self.in_flight = false;
        result
    }

    fn drive_inner(
        &mut self,
        store: &dyn DocumentStore,
        code: &str,
        host_id: &PlayerId,
        now_ms: u64,
    ) -> Result<usize, GameError> {
        let mut played = 0;
        loop {
            let game = load_full_game(store, code)?;
            if game.status != GameStatus::Playing {
                return Ok(played);
            }
            if !game.player(host_id).is_some_and(|p| p.is_host) {
                return Ok(played);
            }
            let current = game.current_player();
            if !current.is_bot || current.forfeited {
                return Ok(played);
            }

            let bot_id = current.id.clone();
            let request = if current.hand.is_empty() {
                TurnRequest::Pass
            } else {
                choose_bot_move(
                    &current.hand,
                    &game.board,
                    &game.settings,
                    current.color,
                    &mut self.rng,
                )
            };

            tracing::debug!(room = %code, bot = %bot_id, "driving bot turn");
            let report = execute_player_turn(store, code, &bot_id, &request, &mut self.rng, now_ms)?;
            played += 1;
            if report.game_over {
                return Ok(played);
            }
        }
    }
}
