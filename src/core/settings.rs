//! Game settings, chip colors, and board layout patterns.
//!
//! Settings are chosen in the lobby and frozen for the lifetime of one
//! game instance. Serde names follow the stored-document shape
//! (camelCase keys, lowercase pattern/color strings).

use serde::{Deserialize, Serialize};

/// The six chip colors players (or teams) can claim.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChipColor {
    Coral,
    Mint,
    Sky,
    Peach,
    Lavender,
    Yellow,
}

/// All colors, in pick order. Bots take the first free one.
pub const AVAILABLE_COLORS: [ChipColor; 6] = [
    ChipColor::Coral,
    ChipColor::Mint,
    ChipColor::Sky,
    ChipColor::Peach,
    ChipColor::Lavender,
    ChipColor::Yellow,
];

/// How cell numbers are laid out on the 10×10 grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoardPattern {
    /// 0 at the center, spiraling clockwise outward.
    #[default]
    Spiral,
    /// Row-major with alternating row direction (boustrophedon).
    Snake,
    /// Strict row-major, left→right, top→bottom.
    Normal,
}

/// Fixed per-game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSettings {
    /// Can a chip be placed on an occupied cell?
    pub allow_chip_override: bool,
    /// Distinct card values: 100 or 200.
    pub deck_size: u16,
    /// Copies of each value: 1–3.
    pub cards_per_number: u8,
    /// Cards held per player: 3–7.
    pub hand_size: usize,
    /// Run length needed to win: 4–6.
    pub win_length: usize,
    /// Draw a replacement card after a Higher play?
    pub draw_on_higher: bool,
    /// Room capacity: 2–6.
    pub max_players: usize,
    pub board_pattern: BoardPattern,
    pub teams_enabled: bool,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            allow_chip_override: false,
            deck_size: 100,
            cards_per_number: 1,
            hand_size: 5,
            win_length: 5,
            draw_on_higher: false,
            max_players: 6,
            board_pattern: BoardPattern::Spiral,
            teams_enabled: false,
        }
    }
}

impl GameSettings {
    /// Total cards in one closed card set.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.deck_size as usize * self.cards_per_number as usize
    }
}
