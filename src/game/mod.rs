//! The rules engine proper: players, game state, move validation, the
//! turn state machine, team turn order, and forfeiture.
//!
//! `GameState` is the single authority the other components compose
//! through. Every mutating operation is atomic per call: it either
//! succeeds completely or leaves the state untouched.

pub mod forfeit;
pub mod player;
pub mod state;
pub mod teams;
pub mod turn;
pub mod validation;

pub use forfeit::ForfeitOutcome;
pub use player::{Player, PlayerSeed};
pub use state::{GameState, GameStatus, TurnAction, TurnHistoryEntry};
pub use teams::team_turn_order;
pub use turn::{TurnOutcome, TurnRequest};
pub use validation::{has_valid_moves, valid_placements, validate_placement, PlacementKind, Placements};
