//! Core types: identifiers, deterministic RNG, and game settings.
//!
//! Everything here is shared by the board, deck, turn machine, and the
//! store-facing shell. Identity is always an explicit value threaded
//! through entry points; nothing in this crate reads ambient state.

pub mod ids;
pub mod rng;
pub mod settings;

pub use ids::{CardId, PlayerId};
pub use rng::GameRng;
pub use settings::{BoardPattern, ChipColor, GameSettings, AVAILABLE_COLORS};
