//! Opaque identifiers for players and cards.
//!
//! Both are newtypes over strings because they cross process boundaries:
//! a player id is minted by a client and persisted in the shared store,
//! and a card id must stay stable through serialization round-trips.
//! Serde treats them as transparent strings so stored documents keep the
//! plain `"card-12-0"` / `"p-..."` shape.

use serde::{Deserialize, Serialize};

/// Unique identifier for a player (human or bot).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Unique identifier for one physical card.
///
/// Card values repeat (`cards_per_number` copies of each value), so the
/// id is what distinguishes two copies of the same number.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub String);

impl CardId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Deterministic id for the `copy`-th card of `value` in one deck.
    #[must_use]
    pub fn for_card(value: u16, copy: u8) -> Self {
        Self(format!("card-{value}-{copy}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id_format() {
        assert_eq!(CardId::for_card(12, 0).as_str(), "card-12-0");
        assert_eq!(CardId::for_card(99, 2).as_str(), "card-99-2");
    }

    #[test]
    fn test_player_id_transparent_serde() {
        let id = PlayerId::new("p-abc123");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"p-abc123\"");

        let back: PlayerId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
