//! Virtual Filesystem (VFS) for memvcs.
//!
//! A flat map from normalized path strings to working entries. There are
//! no directory entries: `docs/a.md` is a single key, and its "parent"
//! does not exist as anything the VFS can answer questions about.
//!
//! # Entry states
//!
//! ```text
//! Absent               removed; only meaningful if the snapshot has the path
//! Bytes(payload)       live content written since the last commit
//! Committed(hash)      unchanged since the last commit; bytes live in the store
//! ```
//!
//! Reads resolve `Committed` entries lazily through the content store.

mod path;
mod tree;

pub use path::normalize;
pub use tree::{Vfs, WorkingEntry};
