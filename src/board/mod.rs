//! The 10×10 numbered board: layout generation and win detection.

pub mod topology;
pub mod win;

pub use topology::{Board, BoardCell, Chip, Position, BOARD_SIZE, CELL_COUNT};
pub use win::{check_winner, LineDirection, Win, WinningLine};
