//! The shared document store the clients synchronize through.
//!
//! ## Model
//!
//! The store is a JSON tree addressed by slash-separated paths, with
//! last-write-wins writes, child-merging updates, append-only pushes,
//! and value subscriptions. `DocumentStore` is the seam: game logic
//! talks to the trait, tests run against [`MemoryStore`], and a real
//! deployment plugs in a networked backend with the same contract.
//!
//! Two zones matter for fairness: everything under a room is public
//! except `privateHands/{player}/hand`, which only its owner (and the
//! acting host) reads. The sync layer never writes a hand into the
//! public zone.

mod document;
mod memory;
pub mod paths;

pub use document::RoomDocument;
pub use memory::MemoryStore;

use serde_json::Value;

use crate::error::StoreError;

/// Callback invoked with the current value at a subscribed path, or
/// `None` when the path was removed.
pub type SubscriberFn = Box<dyn Fn(Option<Value>) + Send + Sync>;

/// Handle for cancelling a subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Abstract realtime document store.
///
/// Paths are slash-separated (`rooms/AB12CD/players`). Writes notify
/// every subscriber whose path contains or is contained by the written
/// path, always with the latest value; intermediate states may be
/// skipped under load.
pub trait DocumentStore: Send + Sync {
    /// Read the value at a path, `None` if absent.
    fn get(&self, path: &str) -> Result<Option<Value>, StoreError>;

    /// Replace the value at a path, creating parents as needed.
    fn set(&self, path: &str, value: Value) -> Result<(), StoreError>;

    /// Merge children into the value at a path. Keys may themselves be
    /// slash-separated relative paths, applied atomically.
    fn update(
        &self,
        path: &str,
        changes: serde_json::Map<String, Value>,
    ) -> Result<(), StoreError>;

    /// Append to an ordered collection at a path. Generated keys sort
    /// in insertion order; returns the new key.
    fn append(&self, path: &str, value: Value) -> Result<String, StoreError>;

    /// Delete the value at a path. Deleting an absent path is a no-op.
    fn remove(&self, path: &str) -> Result<(), StoreError>;

    /// Observe the value at a path. The callback fires immediately with
    /// the current value and again after every overlapping write.
    fn subscribe(&self, path: &str, callback: SubscriberFn) -> SubscriptionId;

    /// Stop observing.
    fn unsubscribe(&self, id: SubscriptionId);

    /// Register a write the store performs on the caller's behalf if
    /// the connection drops. Used for presence.
    fn on_disconnect_set(&self, path: &str, value: Value) -> Result<(), StoreError>;
}
