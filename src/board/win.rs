//! Win detection: scanning for a completed single-color run.
//!
//! The scan order is fixed and load-bearing: all horizontal windows
//! (row-major), then vertical (column-major), then ↘ diagonals, then ↙
//! diagonals. The first fully-populated window whose chips all share one
//! *color* wins, attributed to the player who owns the first cell in the
//! window. Comparing colors rather than player ids is what lets
//! teammates complete a line together. If several lines complete on the
//! same move, only the first in scan order is reported; changing this
//! would change observable game outcomes.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::topology::{Board, BoardCell, BOARD_SIZE};
use crate::core::PlayerId;

type Window<'a> = SmallVec<[&'a BoardCell; 8]>;

/// Orientation of a winning line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineDirection {
    Horizontal,
    Vertical,
    Diagonal,
}

/// The completed run, as cell numbers in window order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinningLine {
    /// Cell numbers in window order. Inline up to 8, covering every
    /// configurable `win_length`.
    pub cells: SmallVec<[u8; 8]>,
    pub direction: LineDirection,
}

/// A detected win.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Win {
    pub winner: PlayerId,
    pub line: WinningLine,
}

/// Scan the board for a `win_length` run of one color.
///
/// Returns `None` if no complete single-color run exists.
#[must_use]
pub fn check_winner(board: &Board, win_length: usize) -> Option<Win> {
    if win_length == 0 || win_length > BOARD_SIZE {
        return None;
    }
    let last_start = BOARD_SIZE - win_length;

    // Horizontal, row-major.
    for row in 0..BOARD_SIZE {
        for col in 0..=last_start {
            let window: Window<'_> =
                (0..win_length).map(|i| board.cell_at(row, col + i)).collect();
            if let Some(win) = check_window(&window, LineDirection::Horizontal) {
                return Some(win);
            }
        }
    }

    // Vertical, column-major.
    for col in 0..BOARD_SIZE {
        for row in 0..=last_start {
            let window: Window<'_> =
                (0..win_length).map(|i| board.cell_at(row + i, col)).collect();
            if let Some(win) = check_window(&window, LineDirection::Vertical) {
                return Some(win);
            }
        }
    }

    // Diagonal, top-left → bottom-right.
    for row in 0..=last_start {
        for col in 0..=last_start {
            let window: Window<'_> = (0..win_length)
                .map(|i| board.cell_at(row + i, col + i))
                .collect();
            if let Some(win) = check_window(&window, LineDirection::Diagonal) {
                return Some(win);
            }
        }
    }

    // Diagonal, top-right → bottom-left.
    for row in 0..=last_start {
        for col in (win_length - 1)..BOARD_SIZE {
            let window: Window<'_> = (0..win_length)
                .map(|i| board.cell_at(row + i, col - i))
                .collect();
            if let Some(win) = check_window(&window, LineDirection::Diagonal) {
                return Some(win);
            }
        }
    }

    None
}

/// A window wins when every cell holds a chip and all chips share one
/// color. The winner is the owner of the window's first cell.
fn check_window(cells: &[&BoardCell], direction: LineDirection) -> Option<Win> {
    let first = cells.first()?.chip.as_ref()?;

    for cell in cells {
        let chip = cell.chip.as_ref()?;
        if chip.color != first.color {
            return None;
        }
    }

    Some(Win {
        winner: first.player_id.clone(),
        line: WinningLine {
            cells: cells.iter().map(|c| c.number).collect(),
            direction,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::topology::Chip;
    use crate::core::{BoardPattern, ChipColor};

    fn place(board: &mut Board, row: usize, col: usize, player: &str, color: ChipColor) {
        let number = board.cell_at(row, col).number;
        board
            .place_chip(
                number,
                Chip {
                    player_id: PlayerId::from(player),
                    color,
                },
            )
            .unwrap();
    }

    #[test]
    fn test_empty_board_has_no_winner() {
        let board = Board::generate(BoardPattern::Normal);
        assert!(check_winner(&board, 5).is_none());
    }

    #[test]
    fn test_horizontal_win() {
        let mut board = Board::generate(BoardPattern::Normal);
        for col in 2..7 {
            place(&mut board, 3, col, "p1", ChipColor::Coral);
        }

        let win = check_winner(&board, 5).unwrap();
        assert_eq!(win.winner, PlayerId::from("p1"));
        assert_eq!(win.line.direction, LineDirection::Horizontal);
        assert_eq!(win.line.cells[..], [32, 33, 34, 35, 36]);
    }

    #[test]
    fn test_four_in_a_row_is_not_five() {
        let mut board = Board::generate(BoardPattern::Normal);
        for col in 0..4 {
            place(&mut board, 0, col, "p1", ChipColor::Coral);
        }
        assert!(check_winner(&board, 5).is_none());
        assert!(check_winner(&board, 4).is_some());
    }

    #[test]
    fn test_mixed_colors_do_not_win() {
        let mut board = Board::generate(BoardPattern::Normal);
        for col in 0..4 {
            place(&mut board, 0, col, "p1", ChipColor::Coral);
        }
        place(&mut board, 0, 4, "p2", ChipColor::Mint);

        assert!(check_winner(&board, 5).is_none());
    }

    #[test]
    fn test_vertical_and_diagonal_wins() {
        let mut board = Board::generate(BoardPattern::Normal);
        for row in 1..6 {
            place(&mut board, row, 7, "p1", ChipColor::Sky);
        }
        let win = check_winner(&board, 5).unwrap();
        assert_eq!(win.line.direction, LineDirection::Vertical);

        let mut board = Board::generate(BoardPattern::Normal);
        for i in 0..5 {
            place(&mut board, 2 + i, 2 + i, "p2", ChipColor::Peach);
        }
        let win = check_winner(&board, 5).unwrap();
        assert_eq!(win.line.direction, LineDirection::Diagonal);

        // Anti-diagonal.
        let mut board = Board::generate(BoardPattern::Normal);
        for i in 0..5 {
            place(&mut board, i, 8 - i, "p3", ChipColor::Yellow);
        }
        let win = check_winner(&board, 5).unwrap();
        assert_eq!(win.line.direction, LineDirection::Diagonal);
        assert_eq!(win.winner, PlayerId::from("p3"));
    }

    #[test]
    fn test_scan_order_prefers_horizontal() {
        // Both a horizontal and a vertical run complete; the fixed scan
        // order must report the horizontal one.
        let mut board = Board::generate(BoardPattern::Normal);
        for col in 0..5 {
            place(&mut board, 8, col, "p1", ChipColor::Coral);
        }
        for row in 0..5 {
            place(&mut board, row, 9, "p1", ChipColor::Coral);
        }

        let win = check_winner(&board, 5).unwrap();
        assert_eq!(win.line.direction, LineDirection::Horizontal);
        assert_eq!(win.line.cells[0], 80);
    }

    #[test]
    fn test_team_win_across_player_ids() {
        // Teammates share a color; interleaved chips still complete the
        // run, attributed to whoever owns the first cell.
        let mut board = Board::generate(BoardPattern::Normal);
        for (i, player) in ["a", "b", "a", "b", "a"].iter().enumerate() {
            place(&mut board, 5, 1 + i, player, ChipColor::Lavender);
        }

        let win = check_winner(&board, 5).unwrap();
        assert_eq!(win.winner, PlayerId::from("a"));
    }

    #[test]
    fn test_win_scan_uses_positions_not_numbers() {
        // On a spiral board, adjacent cells have non-consecutive numbers;
        // the scan is positional, so a row run still wins.
        let mut board = Board::generate(BoardPattern::Spiral);
        for col in 0..5 {
            place(&mut board, 4, col, "p1", ChipColor::Mint);
        }

        let win = check_winner(&board, 5).unwrap();
        assert_eq!(win.line.cells[..], [68, 39, 18, 5, 0]);
    }
}
