//! Player liveness tracking.
//!
//! Each client writes its own record under `presence/{player}` with a
//! heartbeat and registers a disconnect write that flips it offline if
//! the connection drops. A record counts as online only while the
//! heartbeat is recent, so a client that died without disconnecting
//! cleanly still ages out.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::PlayerId;
use crate::error::{GameError, StoreError};
use crate::store::{paths, DocumentStore};

/// How stale a heartbeat may be before the player counts as offline.
pub const ONLINE_WINDOW_MS: u64 = 60_000;

/// One player's liveness record, as stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresenceRecord {
    pub online: bool,
    pub last_seen: u64,
}

fn record_value(online: bool, now_ms: u64) -> Result<Value, StoreError> {
    serde_json::to_value(PresenceRecord {
        online,
        last_seen: now_ms,
    })
    .map_err(|e| StoreError::new(format!("serialize failed: {e}")))
}

/// Mark the player online and arm the offline write for a dropped
/// connection. Call once when entering a room.
pub fn init_presence(
    store: &dyn DocumentStore,
    code: &str,
    player_id: &PlayerId,
    now_ms: u64,
) -> Result<(), GameError> {
    let path = paths::presence(code, player_id);
    store.set(&path, record_value(true, now_ms)?)?;
    store.on_disconnect_set(&path, record_value(false, now_ms)?)?;
    Ok(())
}

/// Refresh the heartbeat. Clients call this every 30 seconds.
pub fn heartbeat(
    store: &dyn DocumentStore,
    code: &str,
    player_id: &PlayerId,
    now_ms: u64,
) -> Result<(), GameError> {
    store.set(&paths::presence(code, player_id), record_value(true, now_ms)?)?;
    Ok(())
}

/// Mark the player offline deliberately (leaving the room).
pub fn go_offline(
    store: &dyn DocumentStore,
    code: &str,
    player_id: &PlayerId,
    now_ms: u64,
) -> Result<(), GameError> {
    store.set(&paths::presence(code, player_id), record_value(false, now_ms)?)?;
    Ok(())
}

/// Online means marked online AND heard from within the window.
#[must_use]
pub fn is_online(record: Option<&PresenceRecord>, now_ms: u64) -> bool {
    match record {
        Some(r) => r.online && now_ms.saturating_sub(r.last_seen) < ONLINE_WINDOW_MS,
        None => false,
    }
}

/// Read one player's record.
pub fn read_presence(
    store: &dyn DocumentStore,
    code: &str,
    player_id: &PlayerId,
) -> Result<Option<PresenceRecord>, GameError> {
    match store.get(&paths::presence(code, player_id))? {
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(|e| StoreError::new(format!("malformed presence record: {e}")).into()),
        None => Ok(None),
    }
}

/// Which of the given players are offline right now.
pub fn offline_players(
    store: &dyn DocumentStore,
    code: &str,
    player_ids: &[PlayerId],
    now_ms: u64,
) -> Result<Vec<PlayerId>, GameError> {
    let mut offline = Vec::new();
    for id in player_ids {
        let record = read_presence(store, code, id)?;
        if !is_online(record.as_ref(), now_ms) {
            offline.push(id.clone());
        }
    }
    Ok(offline)
}
