//! Players as they appear inside a running game.
//!
//! Everything on `Player` is public knowledge except `hand`: the sync
//! shell strips hands before any public-zone write and stores them under
//! per-player private paths. `hand` defaults to empty on deserialization
//! so a public snapshot reconstructs cleanly.

use serde::{Deserialize, Serialize};

use crate::core::{ChipColor, PlayerId};
use crate::deck::Card;

/// A seated player (human or bot).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub color: ChipColor,
    /// Private. Empty in every public-zone document.
    #[serde(default)]
    pub hand: Vec<Card>,
    pub is_host: bool,
    #[serde(default)]
    pub is_bot: bool,
    /// Set only in team mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_index: Option<usize>,
    /// Removed from the turn rotation; chips and history remain.
    #[serde(default)]
    pub forfeited: bool,
    /// Timer expiries since this player's last deliberate action.
    #[serde(default)]
    pub consecutive_timeouts: u32,
}

impl Player {
    /// Still in the turn rotation.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.forfeited
    }

    /// Copy with the hand removed, for public-zone writes.
    #[must_use]
    pub fn without_hand(&self) -> Self {
        Self {
            hand: Vec::new(),
            ..self.clone()
        }
    }
}

/// What the lobby knows about a player at game start, before dealing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerSeed {
    pub id: PlayerId,
    pub name: String,
    pub color: ChipColor,
    pub is_host: bool,
    pub is_bot: bool,
    pub team_index: Option<usize>,
}

impl PlayerSeed {
    /// Seat the player with a dealt hand.
    #[must_use]
    pub fn into_player(self, hand: Vec<Card>) -> Player {
        Player {
            id: self.id,
            name: self.name,
            color: self.color,
            hand,
            is_host: self.is_host,
            is_bot: self.is_bot,
            team_index: self.team_index,
            forfeited: false,
            consecutive_timeouts: 0,
        }
    }
}
