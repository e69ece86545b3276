//! In-memory content store.
//!
//! Used by default and in tests. All objects are lost when dropped.

use std::collections::BTreeMap;
use std::sync::Arc;

use memvcs_types::{ContentHash, Result, VfsError};
use parking_lot::RwLock;

use super::hash::hash_bytes;
use super::traits::ContentStore;

/// In-memory content store.
///
/// Thread-safe via an internal `RwLock`. Payloads are handed out as
/// `Arc<[u8]>`, so reads never copy under the lock.
#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: RwLock<BTreeMap<ContentHash, Arc<[u8]>>>,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new empty store already wrapped for sharing.
    pub fn shared() -> Arc<dyn ContentStore> {
        Arc::new(Self::new())
    }
}

impl ContentStore for MemoryStore {
    fn put(&self, data: &[u8]) -> ContentHash {
        let hash = hash_bytes(data);

        // Fast path: most puts during a commit are for content we already have.
        if self.objects.read().contains_key(&hash) {
            tracing::trace!(hash = %hash.short(), "object already stored");
            return hash;
        }

        let mut objects = self.objects.write();
        objects.entry(hash).or_insert_with(|| {
            tracing::debug!(hash = %hash.short(), len = data.len(), "stored object");
            Arc::from(data)
        });
        hash
    }

    fn get(&self, hash: &ContentHash) -> Result<Arc<[u8]>> {
        self.objects
            .read()
            .get(hash)
            .cloned()
            .ok_or(VfsError::ObjectNotFound { hash: *hash })
    }

    fn contains(&self, hash: &ContentHash) -> bool {
        self.objects.read().contains_key(hash)
    }

    fn len(&self) -> usize {
        self.objects.read().len()
    }

    fn hashes(&self) -> Vec<ContentHash> {
        self.objects.read().keys().copied().collect()
    }
}
