//! The working tree.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use memvcs_types::{ContentHash, Result, VfsError};

use super::path::normalize;
use crate::snapshot::SnapshotIndex;
use crate::store::ContentStore;

/// A path's current material state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkingEntry {
    /// Removed. Kept so a removed committed path reads as deleted.
    Absent,
    /// Uncommitted live content.
    Bytes(Vec<u8>),
    /// Unchanged since the last snapshot.
    Committed(ContentHash),
}

impl WorkingEntry {
    pub fn is_present(&self) -> bool {
        !matches!(self, Self::Absent)
    }
}

/// In-memory working tree backed by a content store.
///
/// Mutation takes `&mut self`: one owner writes, any number of shared
/// borrows read. The store is shared and may outlive the tree.
///
/// Invariant: every `Committed` hash is present in `store`.
pub struct Vfs {
    store: Arc<dyn ContentStore>,
    entries: BTreeMap<String, WorkingEntry>,
}

impl fmt::Debug for Vfs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vfs")
            .field("entries", &self.entries.len())
            .finish()
    }
}

impl Vfs {
    /// Create an empty tree over `store`.
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self {
            store,
            entries: BTreeMap::new(),
        }
    }

    /// Load a tree whose every entry is `Committed` to the snapshot's hash.
    ///
    /// Fails with `CorruptState` if the store is missing any referenced
    /// object, so a restored tree always satisfies the store invariant.
    pub fn from_snapshot(store: Arc<dyn ContentStore>, snapshot: &SnapshotIndex) -> Result<Self> {
        snapshot.verify(store.as_ref())?;
        let entries = snapshot
            .iter()
            .map(|(path, hash)| (path.to_string(), WorkingEntry::Committed(*hash)))
            .collect();
        tracing::debug!(paths = snapshot.len(), "loaded vfs from snapshot");
        Ok(Self { store, entries })
    }

    pub fn store(&self) -> &Arc<dyn ContentStore> {
        &self.store
    }

    /// True iff the path has an entry other than `Absent`.
    pub fn exists(&self, path: &str) -> bool {
        self.entries
            .get(&normalize(path))
            .is_some_and(WorkingEntry::is_present)
    }

    /// Read the entire contents of a file.
    pub fn read(&self, path: &str) -> Result<Vec<u8>> {
        let key = normalize(path);
        tracing::trace!(path = %key, "read");
        match self.entries.get(&key) {
            Some(WorkingEntry::Bytes(data)) => Ok(data.clone()),
            Some(WorkingEntry::Committed(hash)) => self.resolve(&key, hash).map(|data| data.to_vec()),
            Some(WorkingEntry::Absent) | None => Err(VfsError::not_found(key)),
        }
    }

    /// Read a file and decode it as UTF-8.
    ///
    /// Decoding happens on every call; the bytes stay the only copy.
    pub fn read_to_string(&self, path: &str) -> Result<String> {
        let data = self.read(path)?;
        String::from_utf8(data).map_err(|e| VfsError::InvalidEncoding {
            path: normalize(path),
            source: e.utf8_error(),
        })
    }

    /// Write data to a file, replacing whatever state it had.
    pub fn write(&mut self, path: &str, data: &[u8]) {
        let key = normalize(path);
        tracing::debug!(path = %key, len = data.len(), "write");
        self.entries.insert(key, WorkingEntry::Bytes(data.to_vec()));
    }

    /// Mark a file removed. Removing a missing or removed path is a no-op.
    pub fn remove(&mut self, path: &str) {
        let key = normalize(path);
        tracing::debug!(path = %key, "remove");
        self.entries.insert(key, WorkingEntry::Absent);
    }

    /// Move a file, replacing anything at `to`.
    ///
    /// The source becomes `Absent`, so a committed source reads as deleted
    /// and the destination as untracked or modified. Renaming a path onto
    /// itself is a no-op.
    pub fn rename(&mut self, from: &str, to: &str) -> Result<()> {
        let from_key = normalize(from);
        let to_key = normalize(to);
        let entry = match self.entries.get(&from_key) {
            Some(entry) if entry.is_present() => entry.clone(),
            _ => return Err(VfsError::not_found(from_key)),
        };
        if from_key == to_key {
            return Ok(());
        }
        tracing::debug!(from = %from_key, to = %to_key, "rename");
        self.entries.insert(from_key, WorkingEntry::Absent);
        self.entries.insert(to_key, entry);
        Ok(())
    }

    /// Raw entry for a path, including `Absent` markers.
    pub fn entry(&self, path: &str) -> Option<&WorkingEntry> {
        self.entries.get(&normalize(path))
    }

    /// All entries in path order, including `Absent` markers.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &WorkingEntry)> {
        self.entries.iter().map(|(p, e)| (p.as_str(), e))
    }

    /// Paths that currently exist, in order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries()
            .filter(|(_, e)| e.is_present())
            .map(|(p, _)| p)
    }

    /// Number of paths that currently exist.
    pub fn len(&self) -> usize {
        self.paths().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Record the working tree as a new snapshot.
    ///
    /// Live bytes move into the store and their entries become
    /// `Committed`; `Absent` markers are dropped since the new snapshot no
    /// longer has those paths.
    ///
    /// A committed entry whose object is missing fails with `CorruptState`
    /// before anything is changed.
    pub fn commit(&mut self) -> Result<SnapshotIndex> {
        for (path, entry) in &self.entries {
            if let WorkingEntry::Committed(hash) = entry
                && !self.store.contains(hash)
            {
                tracing::warn!(path = %path, hash = %hash.short(), "committed entry missing from store");
                return Err(VfsError::corrupt(path.clone(), *hash));
            }
        }

        let mut snapshot = BTreeMap::new();
        let mut stored = 0usize;
        for (path, entry) in self.entries.iter_mut() {
            let hash = match entry {
                WorkingEntry::Absent => continue,
                WorkingEntry::Bytes(data) => {
                    stored += 1;
                    self.store.put(data)
                }
                WorkingEntry::Committed(hash) => *hash,
            };
            *entry = WorkingEntry::Committed(hash);
            snapshot.insert(path.clone(), hash);
        }
        self.entries.retain(|_, e| e.is_present());
        tracing::debug!(paths = snapshot.len(), stored, "committed working tree");
        Ok(SnapshotIndex::from(snapshot))
    }

    fn resolve(&self, path: &str, hash: &ContentHash) -> Result<Arc<[u8]>> {
        self.store.get(hash).map_err(|_| {
            tracing::warn!(path = %path, hash = %hash.short(), "committed entry missing from store");
            VfsError::corrupt(path, *hash)
        })
    }
}
