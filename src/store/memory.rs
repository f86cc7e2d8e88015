//! In-process store backend.
//!
//! A single JSON tree behind a mutex, with the same path, update,
//! append, and subscription semantics a networked backend provides.
//! This is what the test suite (and a local hot-seat game) runs on.

use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::error::StoreError;

use super::{DocumentStore, SubscriberFn, SubscriptionId};

struct Subscriber {
    id: u64,
    path: String,
    callback: Arc<SubscriberFn>,
}

struct PendingDisconnect {
    path: String,
    value: Value,
}

#[derive(Default)]
struct Inner {
    root: Value,
    subscribers: Vec<Subscriber>,
    disconnect_writes: Vec<PendingDisconnect>,
    next_subscriber_id: u64,
    append_counter: u64,
}

/// Shared in-memory document tree. Cloning shares the tree, so several
/// simulated clients can point at the same store.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the registered disconnect writes, as the backend would when
    /// a client's connection drops.
    pub fn simulate_disconnect(&self) -> Result<(), StoreError> {
        let pending: Vec<PendingDisconnect> = {
            let mut inner = self.lock()?;
            std::mem::take(&mut inner.disconnect_writes)
        };
        for write in pending {
            self.set(&write.path, write.value)?;
        }
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Inner>, StoreError> {
        self.inner
            .lock()
            .map_err(|_| StoreError::new("store mutex poisoned"))
    }

    /// Collect the deliveries a write triggers. Called under the lock;
    /// the callbacks themselves run after the guard is dropped, so a
    /// subscriber may read from or write back into the store.
    fn deliveries(inner: &Inner, written_path: &str) -> Vec<(Arc<SubscriberFn>, Option<Value>)> {
        inner
            .subscribers
            .iter()
            .filter(|sub| paths_overlap(&sub.path, written_path))
            // Always deliver the latest value, never a stale one.
            .map(|sub| {
                (
                    Arc::clone(&sub.callback),
                    read_path(&inner.root, &sub.path).cloned(),
                )
            })
            .collect()
    }

    fn notify(inner: std::sync::MutexGuard<'_, Inner>, written_path: &str) {
        let pending = Self::deliveries(&inner, written_path);
        drop(inner);
        for (callback, value) in pending {
            (*callback)(value);
        }
    }
}

/// A write at one path is visible to a subscriber at the other when
/// either is an ancestor of (or equal to) the other.
fn paths_overlap(a: &str, b: &str) -> bool {
    let a: Vec<&str> = a.split('/').collect();
    let b: Vec<&str> = b.split('/').collect();
    let shared = a.len().min(b.len());
    a[..shared] == b[..shared]
}

fn read_path<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = root;
    for segment in path.split('/') {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Walk to the parent of the final segment, creating objects along the
/// way, and return (parent object, final key).
fn parent_object_mut<'a>(
    root: &'a mut Value,
    path: &str,
) -> Result<(&'a mut serde_json::Map<String, Value>, String), StoreError> {
    let segments: Vec<&str> = path.split('/').collect();
    let (last, ancestors) = segments
        .split_last()
        .ok_or_else(|| StoreError::new("empty path"))?;

    let mut current = root;
    for segment in ancestors {
        if !current.is_object() {
            *current = Value::Object(serde_json::Map::new());
        }
        current = current
            .as_object_mut()
            .ok_or_else(|| StoreError::new("path traverses a non-object"))?
            .entry((*segment).to_string())
            .or_insert_with(|| Value::Object(serde_json::Map::new()));
    }
    if !current.is_object() {
        *current = Value::Object(serde_json::Map::new());
    }
    match current.as_object_mut() {
        Some(obj) => Ok((obj, (*last).to_string())),
        None => Err(StoreError::new("path traverses a non-object")),
    }
}

impl DocumentStore for MemoryStore {
    fn get(&self, path: &str) -> Result<Option<Value>, StoreError> {
        let inner = self.lock()?;
        Ok(read_path(&inner.root, path).cloned())
    }

    fn set(&self, path: &str, value: Value) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        let (parent, key) = parent_object_mut(&mut inner.root, path)?;
        parent.insert(key, value);
        Self::notify(inner, path);
        Ok(())
    }

    fn update(
        &self,
        path: &str,
        changes: serde_json::Map<String, Value>,
    ) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        for (relative, value) in changes {
            let full = format!("{path}/{relative}");
            let (parent, key) = parent_object_mut(&mut inner.root, &full)?;
            parent.insert(key, value);
        }
        Self::notify(inner, path);
        Ok(())
    }

    fn append(&self, path: &str, value: Value) -> Result<String, StoreError> {
        let mut inner = self.lock()?;
        inner.append_counter += 1;
        // Zero-padded so lexicographic key order is insertion order.
        let key = format!("k{:016}", inner.append_counter);
        let full = format!("{path}/{key}");
        let (parent, final_key) = parent_object_mut(&mut inner.root, &full)?;
        parent.insert(final_key, value);
        Self::notify(inner, path);
        Ok(key)
    }

    fn remove(&self, path: &str) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        let segments: Vec<&str> = path.split('/').collect();
        if let Some((last, ancestors)) = segments.split_last() {
            let mut current = Some(&mut inner.root);
            for segment in ancestors {
                current = current
                    .and_then(|v| v.as_object_mut())
                    .and_then(|o| o.get_mut(*segment));
            }
            if let Some(obj) = current.and_then(|v| v.as_object_mut()) {
                obj.remove(*last);
            }
        }
        Self::notify(inner, path);
        Ok(())
    }

    fn subscribe(&self, path: &str, callback: SubscriberFn) -> SubscriptionId {
        let callback = Arc::new(callback);
        let (id, current) = {
            let mut inner = match self.lock() {
                Ok(inner) => inner,
                Err(_) => return SubscriptionId(0),
            };
            inner.next_subscriber_id += 1;
            let id = inner.next_subscriber_id;
            let current = read_path(&inner.root, path).cloned();
            inner.subscribers.push(Subscriber {
                id,
                path: path.to_string(),
                callback: Arc::clone(&callback),
            });
            (id, current)
        };

        // Initial delivery with the current value, outside the lock.
        (*callback)(current);
        SubscriptionId(id)
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        if let Ok(mut inner) = self.lock() {
            inner.subscribers.retain(|s| s.id != id.0);
        }
    }

    fn on_disconnect_set(&self, path: &str, value: Value) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        inner.disconnect_writes.push(PendingDisconnect {
            path: path.to_string(),
            value,
        });
        Ok(())
    }
}
