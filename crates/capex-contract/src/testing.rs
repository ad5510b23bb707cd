//! Failure-injecting world state for contract tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use capex_state::{
    InMemoryWorldState, KeyValue, RangeScan, SnapshotCursor, StateCursor, StateError, StateResult,
    WorldState,
};

/// Wraps an [`InMemoryWorldState`] and fails selected operations.
#[derive(Default)]
pub struct FaultyWorldState {
    pub inner: InMemoryWorldState,
    /// Number of puts that succeed before every later put fails.
    pub puts_before_failure: Option<usize>,
    pub fail_gets: AtomicBool,
    pub fail_scan_open: bool,
    /// Number of entries a scan yields before the cursor errors.
    pub scan_entries_before_failure: Option<usize>,
    puts: AtomicUsize,
    open_cursors: AtomicUsize,
}

impl FaultyWorldState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_cursors(&self) -> usize {
        self.open_cursors.load(Ordering::SeqCst)
    }
}

impl WorldState for FaultyWorldState {
    fn get_state(&self, key: &str) -> StateResult<Option<Vec<u8>>> {
        if self.fail_gets.load(Ordering::SeqCst) {
            return Err(StateError::Backend("get failed".into()));
        }
        self.inner.get_state(key)
    }

    fn put_state(&self, key: &str, value: &[u8]) -> StateResult<()> {
        let done = self.puts.fetch_add(1, Ordering::SeqCst);
        if matches!(self.puts_before_failure, Some(limit) if done >= limit) {
            return Err(StateError::Backend("put failed".into()));
        }
        self.inner.put_state(key, value)
    }

    fn get_state_by_range(&self, start_key: &str, end_key: &str) -> StateResult<RangeScan<'_>> {
        if self.fail_scan_open {
            return Err(StateError::Backend("scan refused".into()));
        }
        let entries = self
            .inner
            .get_state_by_range(start_key, end_key)?
            .collect::<StateResult<Vec<_>>>()?;
        Ok(RangeScan::new(Box::new(FaultyCursor {
            inner: SnapshotCursor::new(entries, Some(&self.open_cursors)),
            fail_after: self.scan_entries_before_failure,
            yielded: 0,
        })))
    }
}

struct FaultyCursor<'a> {
    inner: SnapshotCursor<'a>,
    fail_after: Option<usize>,
    yielded: usize,
}

impl StateCursor for FaultyCursor<'_> {
    fn next_entry(&mut self) -> StateResult<Option<KeyValue>> {
        if matches!(self.fail_after, Some(limit) if self.yielded >= limit) {
            return Err(StateError::Backend("scan interrupted".into()));
        }
        self.yielded += 1;
        self.inner.next_entry()
    }

    fn close(&mut self) -> StateResult<()> {
        self.inner.close()
    }
}
