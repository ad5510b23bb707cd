//! Ordered key-value world state for the capex chaincode.
//!
//! The world state is the current key-value snapshot of ledger data. In
//! production it is owned by the ledger peer; this crate defines the seam the
//! contract talks to and ships local backends for tests and development.
//!
//! # Storage Backends
//!
//! All backends implement the [`WorldState`] trait:
//!
//! - [`InMemoryWorldState`] -- `BTreeMap`-based store for tests and embedding
//! - [`FileWorldState`] -- JSON snapshot file for a local development host
//!
//! # Range Scans
//!
//! [`WorldState::get_state_by_range`] returns a [`RangeScan`], a single-pass
//! iterator that owns the backend cursor. The cursor is closed when the scan
//! is dropped, whichever way the caller leaves its loop.

pub mod error;
pub mod file;
pub mod memory;
pub mod scan;
pub mod traits;

pub use error::{StateError, StateResult};
pub use file::FileWorldState;
pub use memory::InMemoryWorldState;
pub use scan::{RangeScan, SnapshotCursor};
pub use traits::{KeyValue, StateCursor, WorldState};
