//! Turn timing and the AFK forfeit policy.
//!
//! `TurnTimer` is a pure countdown the UI ticks once a second; the
//! host's client is the only one that acts on expiry. Ticks past zero
//! report `Expired` exactly once, and the in-flight guard in the
//! enforcement path keeps a slow store write from double-passing.

use crate::core::{GameRng, PlayerId};
use crate::error::GameError;
use crate::game::{GameState, GameStatus, TurnRequest};
use crate::store::DocumentStore;

use super::actions::{execute_player_turn, forfeit_player};

/// Seconds each player has per turn.
pub const TURN_DURATION_SECS: u32 = 30;

/// Remaining-seconds marks that warn the acting player.
pub const WARNING_THRESHOLDS: [u32; 3] = [15, 10, 5];

/// Consecutive timeouts before a player is forfeited automatically.
pub const AFK_FORFEIT_THRESHOLD: u32 = 3;

/// What one tick of the countdown means for the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerTick {
    /// Seconds remaining, no action needed.
    Running(u32),
    /// Seconds remaining hit a warning mark; beep if this client is
    /// the acting player.
    Warning(u32),
    /// The countdown hit zero on this tick. Reported once per turn.
    Expired,
    /// Zero was already reported; enforcement is someone else's
    /// problem now.
    Idle,
}

/// Per-turn countdown state. Reset whenever the turn pointer moves.
#[derive(Clone, Debug)]
pub struct TurnTimer {
    turn_of: usize,
    seconds_remaining: u32,
    expired_reported: bool,
}

impl TurnTimer {
    /// Fresh countdown for the turn held by player index `turn_of`.
    #[must_use]
    pub fn new(turn_of: usize) -> Self {
        Self {
            turn_of,
            seconds_remaining: TURN_DURATION_SECS,
            expired_reported: false,
        }
    }

    #[must_use]
    pub fn seconds_remaining(&self) -> u32 {
        self.seconds_remaining
    }

    /// Restart iff the turn pointer moved since this timer was built.
    pub fn observe_turn(&mut self, current_player_index: usize) {
        if self.turn_of != current_player_index {
            *self = Self::new(current_player_index);
        }
    }

    /// The timer runs only for a live human turn. Bots move on their
    /// own cadence and forfeited players are skipped entirely.
    #[must_use]
    pub fn should_run(state: &GameState) -> bool {
        if state.status != GameStatus::Playing {
            return false;
        }
        let current = state.current_player();
        !current.is_bot && !current.forfeited
    }

    /// Advance one second.
    pub fn tick(&mut self) -> TimerTick {
        if self.seconds_remaining == 0 {
            return TimerTick::Idle;
        }
        self.seconds_remaining -= 1;
        if self.seconds_remaining == 0 {
            if self.expired_reported {
                return TimerTick::Idle;
            }
            self.expired_reported = true;
            return TimerTick::Expired;
        }
        if WARNING_THRESHOLDS.contains(&self.seconds_remaining) {
            return TimerTick::Warning(self.seconds_remaining);
        }
        TimerTick::Running(self.seconds_remaining)
    }
}

/// Host-side expiry enforcement: pass on the actor's behalf, and
/// forfeit them once the timeout streak reaches the threshold.
///
/// Returns the id of a player forfeited by the policy, if any.
pub fn enforce_timeout(
    store: &dyn DocumentStore,
    code: &str,
    actor: &PlayerId,
    rng: &mut GameRng,
    now_ms: u64,
) -> Result<Option<PlayerId>, GameError> {
    let report = execute_player_turn(store, code, actor, &TurnRequest::TimeoutPass, rng, now_ms)?;
    tracing::debug!(
        room = %code,
        player = %actor,
        streak = report.outcome.consecutive_timeouts,
        "timeout pass issued"
    );

    if report.outcome.consecutive_timeouts >= AFK_FORFEIT_THRESHOLD {
        tracing::info!(room = %code, player = %actor, "auto-forfeit after repeated timeouts");
        forfeit_player(store, code, actor)?;
        return Ok(Some(actor.clone()));
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_hits_warnings_and_expires_once() {
        let mut timer = TurnTimer::new(0);
        let mut warnings = Vec::new();
        let mut expirations = 0;

        for _ in 0..40 {
            match timer.tick() {
                TimerTick::Warning(s) => warnings.push(s),
                TimerTick::Expired => expirations += 1,
                TimerTick::Running(_) | TimerTick::Idle => {}
            }
        }

        assert_eq!(warnings, vec![15, 10, 5]);
        assert_eq!(expirations, 1);
        assert_eq!(timer.seconds_remaining(), 0);
    }

    #[test]
    fn test_observe_turn_resets_on_change_only() {
        let mut timer = TurnTimer::new(0);
        timer.tick();
        timer.tick();

        timer.observe_turn(0);
        assert_eq!(timer.seconds_remaining(), TURN_DURATION_SECS - 2);

        timer.observe_turn(1);
        assert_eq!(timer.seconds_remaining(), TURN_DURATION_SECS);
    }

    #[test]
    fn test_timer_skips_bots_and_forfeited() {
        use crate::core::{GameRng, GameSettings};
        let mut rng = GameRng::new(3);
        let mut state = GameState::new(
            "R",
            crate::game::state::tests::seeds(2),
            GameSettings::default(),
            &mut rng,
            0,
        );
        assert!(TurnTimer::should_run(&state));

        state.players[0].is_bot = true;
        assert!(!TurnTimer::should_run(&state));

        state.players[0].is_bot = false;
        state.status = GameStatus::Finished;
        assert!(!TurnTimer::should_run(&state));
    }
}
