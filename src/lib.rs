//! # quinta-engine
//!
//! Engine for Quinta, a turn-based placement game: 2-6 players take
//! turns playing numbered cards onto a 10×10 numbered board, racing to
//! line up five chips of one color.
//!
//! ## Design Principles
//!
//! 1. **Pure rules core**: board, deck, validation, turn machine, and
//!    win detection are deterministic functions of state plus a seeded
//!    RNG. No clocks, no I/O.
//!
//! 2. **Store at the seam**: multiplayer goes through the
//!    `DocumentStore` trait. The sync layer does read-mutate-write
//!    cycles against it; tests run the whole flow on `MemoryStore`.
//!
//! 3. **Explicit identity and time**: every operation takes the acting
//!    player and the current time as arguments. Nothing reads ambient
//!    state, so any sequence of events replays exactly.
//!
//! ## Modules
//!
//! - `core`: ids, deterministic RNG, settings
//! - `board`: board layouts (spiral, snake, normal) and win detection
//! - `deck`: card generation, dealing, drawing, discard recycling
//! - `game`: players, game state, validation, turn machine, forfeits
//! - `bot`: heuristic move selection for bot players
//! - `lobby`: pre-game seating, colors, teams, admission gate
//! - `store`: the shared document store abstraction and memory backend
//! - `sync`: store-backed room operations and host-side policies
//! - `error`: structured error types

pub mod board;
pub mod bot;
pub mod core;
pub mod deck;
pub mod error;
pub mod game;
pub mod lobby;
pub mod store;
pub mod sync;

// Re-export commonly used types
pub use crate::core::{
    BoardPattern, CardId, ChipColor, GameRng, GameSettings, PlayerId, AVAILABLE_COLORS,
};

pub use crate::board::{check_winner, Board, BoardCell, Chip, Win, BOARD_SIZE};

pub use crate::deck::Card;

pub use crate::game::{
    GameState, GameStatus, PlacementKind, Placements, TurnAction, TurnHistoryEntry, TurnOutcome,
    TurnRequest,
};

pub use crate::lobby::{LobbyPlayer, LobbyState};

pub use crate::store::{DocumentStore, MemoryStore, RoomDocument};

pub use crate::error::{GameError, LobbyBlocker, PlacementError, StoreError};
