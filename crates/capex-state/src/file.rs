//! File-backed world state.
//!
//! The whole state is held in memory and mirrored to a single JSON file:
//!
//! ```text
//! { "entries": { "<key>": "<hex-encoded value>", ... } }
//! ```
//!
//! Each put rewrites the file through a temporary file in the same directory
//! that is then renamed over the original, so a crash leaves either the old or
//! the new snapshot on disk.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{StateError, StateResult};
use crate::scan::{collect_range, RangeScan, SnapshotCursor};
use crate::traits::WorldState;

/// On-disk layout of the state file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StateFile {
    entries: BTreeMap<String, String>,
}

/// World state persisted to a JSON snapshot file.
pub struct FileWorldState {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl FileWorldState {
    /// Open the state file at `path`. A missing file is an empty state.
    pub fn open(path: impl AsRef<Path>) -> StateResult<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            load(&path)?
        } else {
            BTreeMap::new()
        };
        debug!(path = %path.display(), keys = entries.len(), "opened file world state");
        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.entries.read().map(|m| m.len()).unwrap_or(0)
    }

    /// Returns `true` if no key holds a value.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn persist(&self, map: &BTreeMap<String, Vec<u8>>) -> StateResult<()> {
        let file = StateFile {
            entries: map
                .iter()
                .map(|(k, v)| (k.clone(), hex::encode(v)))
                .collect(),
        };
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut tmp, &file)
            .map_err(|e| StateError::Serialization(e.to_string()))?;
        tmp.write_all(b"\n")?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| StateError::Io(e.error))?;
        Ok(())
    }
}

fn load(path: &Path) -> StateResult<BTreeMap<String, Vec<u8>>> {
    let raw = fs::read_to_string(path)?;
    let file: StateFile = serde_json::from_str(&raw).map_err(|e| StateError::Corrupt {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    file.entries
        .into_iter()
        .map(|(key, value)| {
            let bytes = hex::decode(&value).map_err(|e| StateError::Corrupt {
                path: path.to_path_buf(),
                reason: format!("value for {key}: {e}"),
            })?;
            Ok((key, bytes))
        })
        .collect()
}

impl WorldState for FileWorldState {
    fn get_state(&self, key: &str) -> StateResult<Option<Vec<u8>>> {
        let map = self.entries.read().map_err(|_| StateError::LockPoisoned)?;
        Ok(map.get(key).cloned())
    }

    fn put_state(&self, key: &str, value: &[u8]) -> StateResult<()> {
        if key.is_empty() {
            return Err(StateError::EmptyKey);
        }
        let mut map = self.entries.write().map_err(|_| StateError::LockPoisoned)?;
        let previous = map.insert(key.to_string(), value.to_vec());
        if let Err(e) = self.persist(&map) {
            // Keep memory in step with what is on disk.
            match previous {
                Some(old) => map.insert(key.to_string(), old),
                None => map.remove(key),
            };
            return Err(e);
        }
        debug!(key, bytes = value.len(), "put state");
        Ok(())
    }

    fn get_state_by_range(&self, start_key: &str, end_key: &str) -> StateResult<RangeScan<'_>> {
        let map = self.entries.read().map_err(|_| StateError::LockPoisoned)?;
        let entries = collect_range(&map, start_key, end_key);
        Ok(RangeScan::new(Box::new(SnapshotCursor::new(entries, None))))
    }
}

impl std::fmt::Debug for FileWorldState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWorldState")
            .field("path", &self.path)
            .field("key_count", &self.len())
            .finish()
    }
}
