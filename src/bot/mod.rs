//! Heuristic bot policy.
//!
//! ## Scoring
//!
//! Every candidate placement is scored by the lines of `win_length`
//! cells that pass through it. A window scores for exactly one side:
//! friendly chips build toward a win (one-short windows dominate at
//! 10000), a single enemy color is a threat to block (one-short at
//! 5000), a fully empty window is worth a point of potential, and a
//! window holding two enemy colors or both sides is dead and scores
//! nothing. Naturals get a flat bonus because they always draw a
//! replacement. Ties at the top score break uniformly at random so
//! repeated games do not play out identically.
//!
//! The policy only proposes moves; the host applies them through the
//! same turn machine as human players, so a bot can never make an
//! illegal move.

use crate::board::{Board, BOARD_SIZE};
use crate::core::{ChipColor, GameRng, GameSettings, PlayerId};
use crate::deck::Card;
use crate::game::{valid_placements, PlacementKind, TurnRequest};

/// Display names cycled through as bots join a lobby.
pub const BOT_NAMES: [&str; 6] = [
    "Botsworth",
    "Chippy",
    "Quinta-Bot",
    "AutoPlay",
    "Robo",
    "Circuit",
];

/// Bonus for natural placements, which always replenish the hand.
const NATURAL_DRAW_BONUS: i64 = 50;

/// Mint a fresh bot id, unique per lobby with overwhelming probability.
#[must_use]
pub fn generate_bot_id(rng: &mut GameRng) -> PlayerId {
    let suffix: u64 = rng.gen_u64();
    PlayerId::new(format!("bot-{suffix:016x}"))
}

/// Pick the best move for a bot holding `hand`, or `Pass` when no
/// placement is legal.
#[must_use]
pub fn choose_bot_move(
    hand: &[Card],
    board: &Board,
    settings: &GameSettings,
    bot_color: ChipColor,
    rng: &mut GameRng,
) -> TurnRequest {
    let mut scored: Vec<(TurnRequest, i64)> = Vec::new();

    for card in hand {
        let placements = valid_placements(board, card, settings);

        for (kind, targets) in [
            (PlacementKind::Natural, &placements.natural),
            (PlacementKind::Higher, &placements.higher),
        ] {
            for &target in targets {
                let Some(pos) = board.position_of(target) else {
                    continue;
                };
                let mut score =
                    score_position(board, pos.row, pos.col, bot_color, settings.win_length);
                if kind == PlacementKind::Natural {
                    score += NATURAL_DRAW_BONUS;
                }
                scored.push((
                    TurnRequest::Place {
                        kind,
                        card_id: card.id.clone(),
                        cell_number: target,
                    },
                    score,
                ));
            }
        }
    }

    let Some(&(_, top_score)) = scored.iter().max_by_key(|(_, score)| *score) else {
        return TurnRequest::Pass;
    };
    let top: Vec<TurnRequest> = scored
        .into_iter()
        .filter(|(_, score)| *score == top_score)
        .map(|(request, _)| request)
        .collect();

    match rng.choose(&top) {
        Some(pick) => pick.clone(),
        None => TurnRequest::Pass,
    }
}

/// Sum window scores over every `win_length` line through (row, col).
fn score_position(
    board: &Board,
    row: usize,
    col: usize,
    bot_color: ChipColor,
    win_length: usize,
) -> i64 {
    const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

    let mut score = 0;
    for (dr, dc) in DIRECTIONS {
        for offset in 0..win_length as isize {
            let start_row = row as isize - offset * dr;
            let start_col = col as isize - offset * dc;
            score += score_window(board, start_row, start_col, dr, dc, bot_color, win_length);
        }
    }
    score
}

/// Score one window, or 0 when it leaves the board or is dead.
fn score_window(
    board: &Board,
    start_row: isize,
    start_col: isize,
    dr: isize,
    dc: isize,
    bot_color: ChipColor,
    win_length: usize,
) -> i64 {
    let size = BOARD_SIZE as isize;
    let mut friendly = 0_i64;
    let mut enemy = 0_i64;
    let mut enemy_color: Option<ChipColor> = None;

    for i in 0..win_length as isize {
        let r = start_row + i * dr;
        let c = start_col + i * dc;
        if r < 0 || r >= size || c < 0 || c >= size {
            return 0;
        }

        match &board.cell_at(r as usize, c as usize).chip {
            None => {}
            Some(chip) if chip.color == bot_color => friendly += 1,
            Some(chip) => match enemy_color {
                None => {
                    enemy_color = Some(chip.color);
                    enemy += 1;
                }
                Some(color) if color == chip.color => enemy += 1,
                // Two enemy colors can never both complete this line.
                Some(_) => return 0,
            },
        }
    }

    // Contested windows are dead for both sides.
    if friendly > 0 && enemy > 0 {
        return 0;
    }

    let one_short = win_length as i64 - 1;
    let two_short = win_length as i64 - 2;
    if friendly > 0 {
        match friendly {
            n if n == one_short => 10_000,
            n if n == two_short => 100,
            n => n * 3,
        }
    } else if enemy > 0 {
        match enemy {
            n if n == one_short => 5_000,
            n if n == two_short => 50,
            n => n * 2,
        }
    } else {
        1
    }
}
