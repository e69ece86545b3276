//! Content hashing.

use digest::Digest;
use memvcs_types::ContentHash;
use sha2::Sha256;

/// Hash a payload without storing it.
///
/// The status engine uses this to compare live bytes against a snapshot;
/// stores use it to key inserts. Both must agree, so there is exactly one
/// hash function.
pub fn hash_bytes(data: &[u8]) -> ContentHash {
    let digest = Sha256::digest(data);
    tracing::trace!(len = data.len(), "hashed payload");
    ContentHash::from_bytes(digest.into())
}
