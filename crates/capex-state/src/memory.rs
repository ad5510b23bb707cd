use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use tracing::debug;

use crate::error::{StateError, StateResult};
use crate::scan::{collect_range, RangeScan, SnapshotCursor};
use crate::traits::WorldState;

/// In-memory, `BTreeMap`-based world state.
///
/// Intended for tests and embedding. Keys iterate in lexicographic order.
/// Range scans copy the matching entries when opened, so writes made while a
/// scan is open are not visible to it.
pub struct InMemoryWorldState {
    entries: RwLock<BTreeMap<String, Vec<u8>>>,
    open_cursors: AtomicUsize,
}

impl InMemoryWorldState {
    /// Create a new empty world state.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(BTreeMap::new()),
            open_cursors: AtomicUsize::new(0),
        }
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.entries.read().map(|m| m.len()).unwrap_or(0)
    }

    /// Returns `true` if no key holds a value.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every entry.
    pub fn clear(&self) -> StateResult<()> {
        self.entries
            .write()
            .map_err(|_| StateError::LockPoisoned)?
            .clear();
        Ok(())
    }

    /// All stored keys in iteration order.
    pub fn keys(&self) -> StateResult<Vec<String>> {
        let map = self.entries.read().map_err(|_| StateError::LockPoisoned)?;
        Ok(map.keys().cloned().collect())
    }

    /// Number of range-scan cursors opened and not yet released.
    pub fn open_cursors(&self) -> usize {
        self.open_cursors.load(Ordering::SeqCst)
    }
}

impl Default for InMemoryWorldState {
    fn default() -> Self {
        Self::new()
    }
}

impl WorldState for InMemoryWorldState {
    fn get_state(&self, key: &str) -> StateResult<Option<Vec<u8>>> {
        let map = self.entries.read().map_err(|_| StateError::LockPoisoned)?;
        Ok(map.get(key).cloned())
    }

    fn put_state(&self, key: &str, value: &[u8]) -> StateResult<()> {
        if key.is_empty() {
            return Err(StateError::EmptyKey);
        }
        let mut map = self.entries.write().map_err(|_| StateError::LockPoisoned)?;
        map.insert(key.to_string(), value.to_vec());
        debug!(key, bytes = value.len(), "put state");
        Ok(())
    }

    fn get_state_by_range(&self, start_key: &str, end_key: &str) -> StateResult<RangeScan<'_>> {
        let map = self.entries.read().map_err(|_| StateError::LockPoisoned)?;
        let entries = collect_range(&map, start_key, end_key);
        debug!(start_key, end_key, matched = entries.len(), "opened range scan");
        Ok(RangeScan::new(Box::new(SnapshotCursor::new(
            entries,
            Some(&self.open_cursors),
        ))))
    }
}

impl std::fmt::Debug for InMemoryWorldState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryWorldState")
            .field("key_count", &self.len())
            .field("open_cursors", &self.open_cursors())
            .finish()
    }
}
