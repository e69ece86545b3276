//! memvcs-core: a virtual filesystem backing a version-control status engine.
//!
//! This crate provides:
//!
//! - **Store**: content-addressed object storage keyed by SHA-256
//! - **VFS**: a flat, in-memory working tree over the store
//! - **Snapshot**: the committed path → hash baseline
//! - **Status**: classification of every path against the snapshot
//! - **Repository**: the host-facing façade tying them together
//!
//! Nothing here touches the OS filesystem, so the crate runs unchanged in
//! sandboxed and embedded hosts.

pub mod repo;
pub mod snapshot;
pub mod status;
pub mod store;
pub mod vfs;

pub use memvcs_types::{
    Classification, ContentHash, ErrorKind, Result, StatusEntry, StatusReport, StatusSummary,
    VfsError,
};
pub use repo::Repository;
pub use snapshot::SnapshotIndex;
pub use status::{StatusOptions, status, status_with};
pub use store::{ContentStore, MemoryStore, hash_bytes};
pub use vfs::{Vfs, WorkingEntry};
