//! Snapshot index: the last recorded path → hash mapping.
//!
//! A snapshot is the baseline status compares against. It never changes in
//! place; committing produces a new one that replaces it wholesale.

use std::collections::BTreeMap;

use memvcs_types::{ContentHash, Result, VfsError};
use serde::{Deserialize, Serialize};

use crate::store::ContentStore;
use crate::vfs::normalize;

/// Committed path → content hash mapping.
///
/// Serializes as a JSON object of path to hex hash, so a host can
/// checkpoint it alongside the store's objects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, ContentHash>",
    into = "BTreeMap<String, ContentHash>"
)]
pub struct SnapshotIndex {
    entries: BTreeMap<String, ContentHash>,
}

impl SnapshotIndex {
    /// An empty snapshot (nothing committed yet).
    pub fn new() -> Self {
        Self::default()
    }

    /// Committed hash for `path`, or `None` if it was never committed.
    pub fn lookup(&self, path: &str) -> Option<ContentHash> {
        self.entries.get(&normalize(path)).copied()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(&normalize(path))
    }

    /// Every committed path, in order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ContentHash)> {
        self.entries.iter().map(|(p, h)| (p.as_str(), h))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check that `store` holds every object this snapshot references.
    ///
    /// Reports the first offending path in path order.
    pub fn verify(&self, store: &dyn ContentStore) -> Result<()> {
        match self.iter().find(|(_, hash)| !store.contains(hash)) {
            Some((path, hash)) => {
                tracing::warn!(path = %path, hash = %hash.short(), "snapshot references missing object");
                Err(VfsError::corrupt(path, *hash))
            }
            None => Ok(()),
        }
    }
}

impl From<BTreeMap<String, ContentHash>> for SnapshotIndex {
    fn from(entries: BTreeMap<String, ContentHash>) -> Self {
        entries.into_iter().collect()
    }
}

impl From<SnapshotIndex> for BTreeMap<String, ContentHash> {
    fn from(snapshot: SnapshotIndex) -> Self {
        snapshot.entries
    }
}

impl FromIterator<(String, ContentHash)> for SnapshotIndex {
    fn from_iter<I: IntoIterator<Item = (String, ContentHash)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(path, hash)| (normalize(&path), hash))
                .collect(),
        }
    }
}
