//! Range-scan iteration with guaranteed cursor release.

use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::warn;

use crate::error::{StateError, StateResult};
use crate::traits::{KeyValue, StateCursor};

/// A lazy, single-pass scan over a key range.
///
/// The scan owns its backend cursor. The cursor is closed exactly once: by
/// [`RangeScan::close`], or when the scan is dropped on any other exit path.
/// After the cursor reports an error the scan yields no further items.
pub struct RangeScan<'a> {
    cursor: Box<dyn StateCursor + 'a>,
    closed: bool,
    failed: bool,
}

impl<'a> RangeScan<'a> {
    /// Wrap a freshly opened backend cursor.
    pub fn new(cursor: Box<dyn StateCursor + 'a>) -> Self {
        Self {
            cursor,
            closed: false,
            failed: false,
        }
    }

    /// Close the cursor and report any error from the backend.
    pub fn close(mut self) -> StateResult<()> {
        self.close_cursor()
    }

    fn close_cursor(&mut self) -> StateResult<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.cursor.close()
    }
}

impl Iterator for RangeScan<'_> {
    type Item = StateResult<KeyValue>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.closed || self.failed {
            return None;
        }
        match self.cursor.next_entry() {
            Ok(Some(entry)) => Some(Ok(entry)),
            Ok(None) => None,
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

impl Drop for RangeScan<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.close_cursor() {
            warn!(error = %e, "failed to close range scan cursor");
        }
    }
}

impl std::fmt::Debug for RangeScan<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RangeScan")
            .field("closed", &self.closed)
            .field("failed", &self.failed)
            .finish()
    }
}

/// Cursor over entries copied out of the store when the scan was opened.
///
/// When given a counter it increments it on creation and decrements it on
/// close, so the owning store can report how many cursors are still open.
pub struct SnapshotCursor<'a> {
    entries: std::vec::IntoIter<KeyValue>,
    open_cursors: Option<&'a AtomicUsize>,
    closed: bool,
}

impl<'a> SnapshotCursor<'a> {
    /// Cursor over `entries`, registered with `open_cursors` if given.
    pub fn new(entries: Vec<KeyValue>, open_cursors: Option<&'a AtomicUsize>) -> Self {
        if let Some(counter) = open_cursors {
            counter.fetch_add(1, Ordering::SeqCst);
        }
        Self {
            entries: entries.into_iter(),
            open_cursors,
            closed: false,
        }
    }
}

impl StateCursor for SnapshotCursor<'_> {
    fn next_entry(&mut self) -> StateResult<Option<KeyValue>> {
        if self.closed {
            return Err(StateError::CursorClosed);
        }
        Ok(self.entries.next())
    }

    fn close(&mut self) -> StateResult<()> {
        if !self.closed {
            self.closed = true;
            if let Some(counter) = self.open_cursors {
                counter.fetch_sub(1, Ordering::SeqCst);
            }
        }
        Ok(())
    }
}

/// Copy the entries of `map` that fall in `[start_key, end_key)`.
///
/// Empty bounds are unbounded. An inverted range yields nothing.
pub fn collect_range(
    map: &BTreeMap<String, Vec<u8>>,
    start_key: &str,
    end_key: &str,
) -> Vec<KeyValue> {
    if !start_key.is_empty() && !end_key.is_empty() && start_key >= end_key {
        return Vec::new();
    }
    let lower = if start_key.is_empty() {
        Bound::Unbounded
    } else {
        Bound::Included(start_key)
    };
    let upper = if end_key.is_empty() {
        Bound::Unbounded
    } else {
        Bound::Excluded(end_key)
    };
    map.range::<str, _>((lower, upper))
        .map(|(k, v)| KeyValue::new(k.clone(), v.clone()))
        .collect()
}
