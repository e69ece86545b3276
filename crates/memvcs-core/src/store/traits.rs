//! Core store trait.

use std::fmt;
use std::sync::Arc;

use memvcs_types::{ContentHash, Result};

/// Abstract content-addressed store.
///
/// Implementations must be safe for concurrent readers and concurrent
/// inserts: inserting the same bytes from two callers is a no-op for the
/// second one, whichever order they land in.
pub trait ContentStore: Send + Sync + fmt::Debug {
    /// Store a payload and return its hash.
    ///
    /// Already-present content is not copied again; the existing hash is
    /// returned.
    fn put(&self, data: &[u8]) -> ContentHash;

    /// Fetch a payload.
    ///
    /// Returns `VfsError::ObjectNotFound` if the hash is unknown.
    fn get(&self, hash: &ContentHash) -> Result<Arc<[u8]>>;

    fn contains(&self, hash: &ContentHash) -> bool;

    /// Number of distinct objects.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All stored hashes, in ascending order.
    fn hashes(&self) -> Vec<ContentHash>;
}
