use serde::{Deserialize, Serialize};

use crate::error::StateResult;
use crate::scan::RangeScan;

/// A single entry yielded by a range scan.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValue {
    pub key: String,
    pub value: Vec<u8>,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Backend cursor behind a [`RangeScan`].
///
/// Cursors are single-pass. `close` releases whatever the backend holds for
/// the scan and must tolerate being called once after the cursor is drained.
pub trait StateCursor: Send {
    /// Advance the cursor. Returns `Ok(None)` once the range is exhausted.
    fn next_entry(&mut self) -> StateResult<Option<KeyValue>>;

    /// Release the cursor.
    fn close(&mut self) -> StateResult<()>;
}

/// Ordered key-value world state.
///
/// All implementations must satisfy these invariants:
/// - `put_state` is last-write-wins; there is no existence check.
/// - `get_state` distinguishes "absent" (`Ok(None)`) from a failed read.
/// - Range scans are half-open `[start, end)`. An empty `start_key` scans from
///   the first key and an empty `end_key` scans through the last key.
/// - The store never interprets values.
pub trait WorldState: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// Returns `Ok(None)` if the key has never been written.
    fn get_state(&self, key: &str) -> StateResult<Option<Vec<u8>>>;

    /// Write `value` under `key`, overwriting any previous value.
    fn put_state(&self, key: &str, value: &[u8]) -> StateResult<()>;

    /// Open a scan over `[start_key, end_key)`.
    ///
    /// The returned [`RangeScan`] owns the backend cursor and closes it when
    /// dropped.
    fn get_state_by_range(&self, start_key: &str, end_key: &str) -> StateResult<RangeScan<'_>>;

    /// Check whether a key holds a value.
    fn contains(&self, key: &str) -> StateResult<bool> {
        Ok(self.get_state(key)?.is_some())
    }
}
