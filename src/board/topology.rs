//! Board topology: the fixed mapping of cell numbers 0–99 to grid
//! coordinates.
//!
//! Three layout patterns exist, chosen once at game creation. All are
//! pure functions of the pattern, with no randomness or external
//! state, so every client regenerates an identical board from the
//! settings.
//!
//! The spiral layout places 0 at (4,4) and winds clockwise: 1 steps
//! right, 2 steps down, then the walk turns left, up, right, ... with
//! run lengths 1, 1, 2, 2, 3, 3, and so on. Generated output:
//!
//! ```text
//! 72 73 74 75 76 77 78 79 80 81
//! 71 42 43 44 45 46 47 48 49 82
//! 70 41 20 21 22 23 24 25 50 83
//! 69 40 19  6  7  8  9 26 51 84
//! 68 39 18  5  0  1 10 27 52 85
//! 67 38 17  4  3  2 11 28 53 86
//! 66 37 16 15 14 13 12 29 54 87
//! 65 36 35 34 33 32 31 30 55 88
//! 64 63 62 61 60 59 58 57 56 89
//! 99 98 97 96 95 94 93 92 91 90
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{BoardPattern, ChipColor, PlayerId};

/// Board edge length. The ruleset only supports 10×10.
pub const BOARD_SIZE: usize = 10;

/// Total cells on the board.
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// Grid coordinates of a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

/// A permanent colored marker placed when a card is played.
///
/// Chips are never removed (no capture). `owner` is the individual
/// player who placed it; `color` is what win detection compares, which
/// is how teammates sharing a color complete each other's lines.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chip {
    pub player_id: PlayerId,
    pub color: ChipColor,
}

/// One board cell: a number, its fixed position, and an optional chip.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardCell {
    /// Cell number, unique per cell, 0..=99.
    pub number: u8,
    pub position: Position,
    pub chip: Option<Chip>,
}

/// The 10×10 board plus a number→position inverse index.
///
/// The index is built once at creation and rebuilt on deserialization;
/// it never appears in the stored document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Vec<BoardCell>>", into = "Vec<Vec<BoardCell>>")]
pub struct Board {
    rows: Vec<Vec<BoardCell>>,
    index: FxHashMap<u8, Position>,
}

impl Board {
    /// Generate a board under the given layout pattern.
    #[must_use]
    pub fn generate(pattern: BoardPattern) -> Self {
        let numbers = match pattern {
            BoardPattern::Spiral => spiral_numbers(),
            BoardPattern::Snake => snake_numbers(),
            BoardPattern::Normal => normal_numbers(),
        };

        let rows = numbers
            .into_iter()
            .enumerate()
            .map(|(row, row_numbers)| {
                row_numbers
                    .into_iter()
                    .enumerate()
                    .map(|(col, number)| BoardCell {
                        number,
                        position: Position { row, col },
                        chip: None,
                    })
                    .collect()
            })
            .collect();

        Self::from_rows(rows)
    }

    fn from_rows(rows: Vec<Vec<BoardCell>>) -> Self {
        let mut index = FxHashMap::default();
        for row in &rows {
            for cell in row {
                index.insert(cell.number, cell.position);
            }
        }
        Self { rows, index }
    }

    /// Look up a cell by its number.
    #[must_use]
    pub fn cell(&self, number: u8) -> Option<&BoardCell> {
        let pos = self.index.get(&number)?;
        Some(&self.rows[pos.row][pos.col])
    }

    /// Position of a cell number, via the inverse index.
    #[must_use]
    pub fn position_of(&self, number: u8) -> Option<Position> {
        self.index.get(&number).copied()
    }

    /// Cell at grid coordinates. Panics if out of bounds.
    #[must_use]
    pub fn cell_at(&self, row: usize, col: usize) -> &BoardCell {
        &self.rows[row][col]
    }

    /// Whether the numbered cell holds a chip.
    #[must_use]
    pub fn is_occupied(&self, number: u8) -> bool {
        self.cell(number).is_some_and(|c| c.chip.is_some())
    }

    /// Place a chip on the numbered cell, replacing any existing chip.
    ///
    /// Occupancy rules are the validator's job; this only rejects a
    /// number that doesn't exist on the board.
    pub fn place_chip(&mut self, number: u8, chip: Chip) -> Result<(), crate::error::PlacementError> {
        let pos = self
            .index
            .get(&number)
            .copied()
            .ok_or(crate::error::PlacementError::CellMissing)?;
        self.rows[pos.row][pos.col].chip = Some(chip);
        Ok(())
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[BoardCell]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Total chips currently on the board.
    #[must_use]
    pub fn chip_count(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|c| c.chip.is_some())
            .count()
    }
}

impl From<Vec<Vec<BoardCell>>> for Board {
    fn from(rows: Vec<Vec<BoardCell>>) -> Self {
        Self::from_rows(rows)
    }
}

impl From<Board> for Vec<Vec<BoardCell>> {
    fn from(board: Board) -> Self {
        board.rows
    }
}

/// Spiral numbering: 0 at (4,4), clockwise, step counts 1,1,2,2,3,3,…
/// (the step count grows after every second direction change).
fn spiral_numbers() -> Vec<Vec<u8>> {
    let mut grid = vec![vec![0u8; BOARD_SIZE]; BOARD_SIZE];

    let mut row = 4i32;
    let mut col = 4i32;
    grid[row as usize][col as usize] = 0;

    // Right, down, left, up.
    const DIRECTIONS: [(i32, i32); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

    let mut dir = 0;
    let mut steps_in_direction = 1;
    let mut steps_taken = 0;
    let mut direction_changes = 0;

    for num in 1..CELL_COUNT as u8 {
        let (dr, dc) = DIRECTIONS[dir];
        row += dr;
        col += dc;
        grid[row as usize][col as usize] = num;

        steps_taken += 1;
        if steps_taken == steps_in_direction {
            steps_taken = 0;
            dir = (dir + 1) % 4;
            direction_changes += 1;
            if direction_changes % 2 == 0 {
                steps_in_direction += 1;
            }
        }
    }

    grid
}

/// Snake numbering: row-major with every odd row reversed.
fn snake_numbers() -> Vec<Vec<u8>> {
    (0..BOARD_SIZE)
        .map(|row| {
            (0..BOARD_SIZE)
                .map(|col| {
                    let c = if row % 2 == 0 { col } else { BOARD_SIZE - 1 - col };
                    (row * BOARD_SIZE + c) as u8
                })
                .collect()
        })
        .collect()
}

/// Strict row-major numbering.
fn normal_numbers() -> Vec<Vec<u8>> {
    (0..BOARD_SIZE)
        .map(|row| {
            (0..BOARD_SIZE)
                .map(|col| (row * BOARD_SIZE + col) as u8)
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_bijection(board: &Board) {
        let mut seen = [false; CELL_COUNT];
        for row in board.rows() {
            for cell in row {
                let n = cell.number as usize;
                assert!(!seen[n], "number {n} appears twice");
                seen[n] = true;

                // Inverse index agrees with the grid.
                assert_eq!(board.position_of(cell.number), Some(cell.position));
                assert_eq!(board.cell(cell.number).unwrap().position, cell.position);
            }
        }
        assert!(seen.iter().all(|&s| s), "every number 0..=99 present");
    }

    #[test]
    fn test_bijection_all_patterns() {
        for pattern in [BoardPattern::Spiral, BoardPattern::Snake, BoardPattern::Normal] {
            assert_bijection(&Board::generate(pattern));
        }
    }

    #[test]
    fn test_spiral_known_cells() {
        let board = Board::generate(BoardPattern::Spiral);

        // Landmarks from the documented layout: the inner ring first,
        // then the corners the outward walk reaches last.
        assert_eq!(board.cell_at(4, 4).number, 0);
        assert_eq!(board.cell_at(4, 5).number, 1);
        assert_eq!(board.cell_at(5, 5).number, 2);
        assert_eq!(board.cell_at(0, 0).number, 72);
        assert_eq!(board.cell_at(0, 9).number, 81);
        assert_eq!(board.cell_at(9, 0).number, 99);
        assert_eq!(board.cell_at(9, 9).number, 90);
    }

    #[test]
    fn test_snake_alternates_rows() {
        let board = Board::generate(BoardPattern::Snake);

        assert_eq!(board.cell_at(0, 0).number, 0);
        assert_eq!(board.cell_at(0, 9).number, 9);
        // Odd rows run right→left.
        assert_eq!(board.cell_at(1, 0).number, 19);
        assert_eq!(board.cell_at(1, 9).number, 10);
        assert_eq!(board.cell_at(9, 0).number, 99);
    }

    #[test]
    fn test_normal_row_major() {
        let board = Board::generate(BoardPattern::Normal);

        assert_eq!(board.cell_at(0, 0).number, 0);
        assert_eq!(board.cell_at(1, 2).number, 12);
        assert_eq!(board.cell_at(9, 9).number, 99);
    }

    #[test]
    fn test_place_chip() {
        let mut board = Board::generate(BoardPattern::Normal);
        let chip = Chip {
            player_id: PlayerId::from("p1"),
            color: ChipColor::Coral,
        };

        assert!(!board.is_occupied(12));
        board.place_chip(12, chip.clone()).unwrap();
        assert!(board.is_occupied(12));
        assert_eq!(board.cell(12).unwrap().chip.as_ref(), Some(&chip));
        assert_eq!(board.chip_count(), 1);

        // 100 is not on the board.
        assert!(board.place_chip(100, chip).is_err());
    }

    #[test]
    fn test_serde_round_trip_rebuilds_index() {
        let mut board = Board::generate(BoardPattern::Spiral);
        board
            .place_chip(
                42,
                Chip {
                    player_id: PlayerId::from("p1"),
                    color: ChipColor::Mint,
                },
            )
            .unwrap();

        let json = serde_json::to_string(&board).unwrap();
        let back: Board = serde_json::from_str(&json).unwrap();

        assert_eq!(back, board);
        assert!(back.is_occupied(42));
        assert_eq!(back.position_of(0), Some(Position { row: 4, col: 4 }));
    }
}
