//! In-memory toggle mirror.
//!
//! Each `ToggleClient` owns exactly one mirror; two clients in the same
//! process never share state. All mutator paths (optimistic local writes,
//! subscription updates, lazy populate on miss) serialize through a single
//! mutex, which is deliberate: correctness first, and toggle-read rates are
//! nowhere near contention territory.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::debug;

use crate::traits::{EventHandler, HandlerError};
use crate::types::ToggleEvent;

/// Instance-owned `key → enabled` map.
#[derive(Debug, Default)]
pub struct ToggleMirror {
    entries: Mutex<HashMap<String, bool>>,
}

impl ToggleMirror {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a key. `None` means the mirror has never seen it.
    pub fn get(&self, key: &str) -> Option<bool> {
        self.entries.lock().expect("mirror lock poisoned").get(key).copied()
    }

    /// Record a key's enabled state.
    pub fn set(&self, key: &str, enabled: bool) {
        self.entries
            .lock()
            .expect("mirror lock poisoned")
            .insert(key.to_string(), enabled);
    }

    /// Drop a key entirely.
    pub fn remove(&self, key: &str) {
        self.entries.lock().expect("mirror lock poisoned").remove(key);
    }

    /// Number of mirrored keys.
    pub fn len(&self) -> usize {
        self.entries.lock().expect("mirror lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Event handler that keeps a mirror fresh for a fixed key set.
///
/// Installed by `ToggleClient::subscribe`. Events for keys outside the set
/// are ignored; for matching events the mirror value follows the event name
/// (ENABLED → true, everything else → false).
pub struct MirrorUpdater {
    mirror: Arc<ToggleMirror>,
    keys: HashSet<String>,
}

impl MirrorUpdater {
    pub fn new(mirror: Arc<ToggleMirror>, keys: impl IntoIterator<Item = String>) -> Self {
        Self {
            mirror,
            keys: keys.into_iter().collect(),
        }
    }
}

#[async_trait]
impl EventHandler for MirrorUpdater {
    async fn handle(&self, event: ToggleEvent) -> Result<(), HandlerError> {
        let key = event.toggle.key.as_str();
        if self.keys.contains(key) {
            let enabled = event.name.enables();
            debug!(key = %key, event = ?event.name, enabled, "mirror updated from event");
            self.mirror.set(key, enabled);
        }
        Ok(())
    }
}
