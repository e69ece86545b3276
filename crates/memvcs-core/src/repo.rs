//! Repository: one working tree, its store, and the current snapshot.
//!
//! This is what a host embeds. It owns the pieces the status engine needs
//! and exposes the host-facing operations in one place:
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                 Repository                   │
//! │  ┌────────────┐  ┌────────────┐  ┌────────┐  │
//! │  │    Vfs     │  │ HEAD       │  │ Store  │  │
//! │  │ (working)  │  │ (snapshot) │  │ (Arc)  │  │
//! │  └────────────┘  └────────────┘  └────────┘  │
//! └──────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use memvcs_types::{Result, StatusReport, VfsError};

use crate::snapshot::SnapshotIndex;
use crate::status::{StatusOptions, status_with};
use crate::store::{ContentStore, MemoryStore};
use crate::vfs::{Vfs, normalize};

/// A working tree paired with the snapshot it is compared against.
#[derive(Debug)]
pub struct Repository {
    vfs: Vfs,
    head: SnapshotIndex,
    options: StatusOptions,
}

impl Default for Repository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository {
    /// Empty repository over a fresh in-memory store.
    pub fn new() -> Self {
        Self::with_store(MemoryStore::shared())
    }

    /// Empty repository (nothing committed) over an existing store.
    pub fn with_store(store: Arc<dyn ContentStore>) -> Self {
        Self {
            vfs: Vfs::new(store),
            head: SnapshotIndex::new(),
            options: StatusOptions::default(),
        }
    }

    /// Restore a repository whose working tree matches `head`.
    ///
    /// Fails with `CorruptState` if `store` is missing any object `head`
    /// references.
    pub fn open(store: Arc<dyn ContentStore>, head: SnapshotIndex) -> Result<Self> {
        let vfs = Vfs::from_snapshot(store, &head)?;
        Ok(Self {
            vfs,
            head,
            options: StatusOptions::default(),
        })
    }

    /// Set the options `status()` uses.
    pub fn with_status_options(mut self, options: StatusOptions) -> Self {
        self.options = options;
        self
    }

    pub fn exists(&self, path: &str) -> bool {
        self.vfs.exists(path)
    }

    pub fn read(&self, path: &str) -> Result<Vec<u8>> {
        self.vfs.read(path)
    }

    pub fn read_to_string(&self, path: &str) -> Result<String> {
        self.vfs.read_to_string(path)
    }

    pub fn write(&mut self, path: &str, data: &[u8]) {
        self.vfs.write(path, data);
    }

    pub fn remove(&mut self, path: &str) {
        self.vfs.remove(path);
    }

    pub fn rename(&mut self, from: &str, to: &str) -> Result<()> {
        self.vfs.rename(from, to)
    }

    /// Content of `path` as of HEAD, ignoring working changes.
    ///
    /// `NotFound` if HEAD has no such path; `CorruptState` if HEAD names an
    /// object the store no longer holds.
    pub fn read_head(&self, path: &str) -> Result<Vec<u8>> {
        let key = normalize(path);
        let hash = self
            .head
            .lookup(&key)
            .ok_or_else(|| VfsError::not_found(key.as_str()))?;
        let data = self
            .store()
            .get(&hash)
            .map_err(|_| VfsError::corrupt(key, hash))?;
        Ok(data.to_vec())
    }

    /// Status of the working tree against HEAD.
    pub fn status(&self) -> Result<StatusReport> {
        status_with(&self.vfs, &self.head, self.options)
    }

    pub fn status_with(&self, options: StatusOptions) -> Result<StatusReport> {
        status_with(&self.vfs, &self.head, options)
    }

    /// Record the working tree as the new HEAD and return it.
    ///
    /// The previous snapshot is replaced wholesale. Afterwards status is
    /// clean until the next write or remove.
    pub fn commit(&mut self) -> Result<&SnapshotIndex> {
        self.head = self.vfs.commit()?;
        tracing::info!(paths = self.head.len(), "new head");
        Ok(&self.head)
    }

    pub fn head(&self) -> &SnapshotIndex {
        &self.head
    }

    pub fn vfs(&self) -> &Vfs {
        &self.vfs
    }

    pub fn store(&self) -> &Arc<dyn ContentStore> {
        self.vfs.store()
    }
}
