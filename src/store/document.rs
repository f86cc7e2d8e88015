//! The stored room document and its lifecycle tag.
//!
//! A room holds either a lobby or a game, distinguished by the
//! `status` field. Parsing branches on the tag before deserializing,
//! so a lobby document can never be half-read as a game (or vice
//! versa) by a client that raced a transition.

use serde_json::Value;

use crate::error::StoreError;
use crate::game::GameState;
use crate::lobby::LobbyState;

/// A parsed room document.
#[derive(Clone, Debug, PartialEq)]
pub enum RoomDocument {
    /// `status == "waiting"`.
    Lobby(LobbyState),
    /// `status == "playing"` or `"finished"`. Hands are empty: the
    /// public zone never contains them.
    Game(Box<GameState>),
}

impl RoomDocument {
    /// Parse a raw room value from the store.
    ///
    /// Strips the private and append-only subtrees first; they live
    /// under the room path but are not part of the public state.
    pub fn from_value(mut value: Value) -> Result<Self, StoreError> {
        let obj = value
            .as_object_mut()
            .ok_or_else(|| StoreError::new("room document is not an object"))?;
        obj.remove("privateHands");
        obj.remove("turnHistory");
        obj.remove("presence");

        let status = obj
            .get("status")
            .and_then(Value::as_str)
            .ok_or_else(|| StoreError::new("room document has no status tag"))?;

        match status {
            "waiting" => {
                let lobby: LobbyState = serde_json::from_value(value)
                    .map_err(|e| StoreError::new(format!("malformed lobby document: {e}")))?;
                Ok(RoomDocument::Lobby(lobby))
            }
            "playing" | "finished" => {
                let game: GameState = serde_json::from_value(value)
                    .map_err(|e| StoreError::new(format!("malformed game document: {e}")))?;
                Ok(RoomDocument::Game(Box::new(game)))
            }
            other => Err(StoreError::new(format!("unknown room status: {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameRng, GameSettings, PlayerId};

    #[test]
    fn test_parses_lobby_by_status_tag() {
        let lobby = LobbyState::new("AB12CD", PlayerId::new("h"), "Host", GameSettings::default(), 0);
        let value = serde_json::to_value(&lobby).unwrap();

        match RoomDocument::from_value(value).unwrap() {
            RoomDocument::Lobby(parsed) => assert_eq!(parsed, lobby),
            doc => panic!("expected lobby, got {doc:?}"),
        }
    }

    #[test]
    fn test_parses_game_and_ignores_private_subtrees() {
        let mut rng = GameRng::new(1);
        let mut game = crate::game::GameState::new(
            "AB12CD",
            crate::game::state::tests::seeds(2),
            GameSettings::default(),
            &mut rng,
            0,
        );
        for p in &mut game.players {
            p.hand.clear();
        }

        let mut value = serde_json::to_value(&game).unwrap();
        value["privateHands"] = serde_json::json!({"p0": {"hand": []}});
        value["turnHistory"] = serde_json::json!({"t0": {"bogus": true}});

        match RoomDocument::from_value(value).unwrap() {
            RoomDocument::Game(parsed) => assert_eq!(*parsed, game),
            doc => panic!("expected game, got {doc:?}"),
        }
    }

    #[test]
    fn test_rejects_untagged_document() {
        let err = RoomDocument::from_value(serde_json::json!({"roomId": "X"})).unwrap_err();
        assert!(err.0.contains("status"));
    }
}
