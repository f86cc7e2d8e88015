//! Move validation: pure queries over board occupancy and settings.
//!
//! `Pass` never reaches these functions: it has no target, and the
//! typed `TurnRequest` makes a pass-with-target unrepresentable.

use crate::board::Board;
use crate::core::GameSettings;
use crate::deck::Card;
use crate::error::PlacementError;

use super::state::TurnAction;

/// The two actions that place a chip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlacementKind {
    /// Target must equal the card value; always replenishes the hand.
    Natural,
    /// Target must exceed the card value; replenishes only if configured.
    Higher,
}

impl PlacementKind {
    #[must_use]
    pub fn action(self) -> TurnAction {
        match self {
            PlacementKind::Natural => TurnAction::Natural,
            PlacementKind::Higher => TurnAction::Higher,
        }
    }
}

/// Candidate target cells for one card, split by action.
///
/// The two sets are disjoint: naturals are cells equal to the card
/// value, highers are cells strictly greater. Drives both UI
/// affordances and the bot's search space.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Placements {
    pub natural: Vec<u8>,
    pub higher: Vec<u8>,
}

impl Placements {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.natural.is_empty() && self.higher.is_empty()
    }
}

/// Check one (card, target, kind) triple against the board.
pub fn validate_placement(
    board: &Board,
    card: &Card,
    target: u8,
    kind: PlacementKind,
    settings: &GameSettings,
) -> Result<(), PlacementError> {
    let cell = board.cell(target).ok_or(PlacementError::CellMissing)?;

    if cell.chip.is_some() && !settings.allow_chip_override {
        return Err(PlacementError::CellOccupied);
    }

    match kind {
        PlacementKind::Natural if u16::from(target) != card.value => {
            Err(PlacementError::NaturalMismatch)
        }
        PlacementKind::Higher if u16::from(target) <= card.value => {
            Err(PlacementError::HigherNotGreater)
        }
        _ => Ok(()),
    }
}

/// All legal targets for a card, filtered by the occupancy rule.
#[must_use]
pub fn valid_placements(board: &Board, card: &Card, settings: &GameSettings) -> Placements {
    let mut placements = Placements::default();

    for row in board.rows() {
        for cell in row {
            if cell.chip.is_some() && !settings.allow_chip_override {
                continue;
            }
            let number = u16::from(cell.number);
            if number == card.value {
                placements.natural.push(cell.number);
            } else if number > card.value {
                placements.higher.push(cell.number);
            }
        }
    }

    placements.natural.sort_unstable();
    placements.higher.sort_unstable();
    placements
}

/// True iff any card in the hand has at least one candidate target.
///
/// An empty hand yields false. Pass is always separately available as
/// an action and is not part of this check.
#[must_use]
pub fn has_valid_moves(board: &Board, hand: &[Card], settings: &GameSettings) -> bool {
    hand.iter()
        .any(|card| !valid_placements(board, card, settings).is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Chip;
    use crate::core::{BoardPattern, CardId, ChipColor, PlayerId};

    fn card(value: u16) -> Card {
        Card {
            value,
            id: CardId::for_card(value, 0),
        }
    }

    fn occupy(board: &mut Board, number: u8) {
        board
            .place_chip(
                number,
                Chip {
                    player_id: PlayerId::from("x"),
                    color: ChipColor::Yellow,
                },
            )
            .unwrap();
    }

    #[test]
    fn test_natural_requires_exact_match() {
        let board = Board::generate(BoardPattern::Normal);
        let settings = GameSettings::default();

        assert!(validate_placement(&board, &card(12), 12, PlacementKind::Natural, &settings).is_ok());
        assert_eq!(
            validate_placement(&board, &card(12), 13, PlacementKind::Natural, &settings),
            Err(PlacementError::NaturalMismatch)
        );
    }

    #[test]
    fn test_higher_requires_strictly_greater() {
        let board = Board::generate(BoardPattern::Normal);
        let settings = GameSettings::default();

        assert!(validate_placement(&board, &card(12), 13, PlacementKind::Higher, &settings).is_ok());
        assert_eq!(
            validate_placement(&board, &card(12), 12, PlacementKind::Higher, &settings),
            Err(PlacementError::HigherNotGreater)
        );
        assert_eq!(
            validate_placement(&board, &card(12), 5, PlacementKind::Higher, &settings),
            Err(PlacementError::HigherNotGreater)
        );
    }

    #[test]
    fn test_missing_cell() {
        let board = Board::generate(BoardPattern::Normal);
        let settings = GameSettings::default();

        assert_eq!(
            validate_placement(&board, &card(12), 150, PlacementKind::Higher, &settings),
            Err(PlacementError::CellMissing)
        );
    }

    #[test]
    fn test_occupied_cell_respects_override_setting() {
        let mut board = Board::generate(BoardPattern::Normal);
        occupy(&mut board, 12);
        let mut settings = GameSettings::default();

        assert_eq!(
            validate_placement(&board, &card(12), 12, PlacementKind::Natural, &settings),
            Err(PlacementError::CellOccupied)
        );

        settings.allow_chip_override = true;
        assert!(validate_placement(&board, &card(12), 12, PlacementKind::Natural, &settings).is_ok());
    }

    #[test]
    fn test_valid_placements_are_disjoint_and_filtered() {
        let mut board = Board::generate(BoardPattern::Normal);
        occupy(&mut board, 97);
        occupy(&mut board, 95);
        let settings = GameSettings::default();

        let p = valid_placements(&board, &card(95), &settings);

        // 95 itself is occupied: no natural candidate.
        assert!(p.natural.is_empty());
        // 96..=99 minus the occupied 97.
        assert_eq!(p.higher, vec![96, 98, 99]);
    }

    #[test]
    fn test_has_valid_moves() {
        let board = Board::generate(BoardPattern::Normal);
        let settings = GameSettings::default();

        assert!(!has_valid_moves(&board, &[], &settings));
        assert!(has_valid_moves(&board, &[card(50)], &settings));

        // A 99 on an empty board still has its natural cell.
        assert!(has_valid_moves(&board, &[card(99)], &settings));

        // Card values past the board only play as higher; value 199 has
        // no target at all.
        assert!(!has_valid_moves(&board, &[card(199)], &settings));
    }
}
