//! Content-addressed object storage.
//!
//! Every stored file version lives here, keyed by the SHA-256 of its bytes:
//!
//! - **ContentStore**: the backend trait (`put` / `get` / `contains`)
//! - **MemoryStore**: in-process implementation, the default backend
//!
//! Objects are immutable once inserted and insertion is idempotent, so the
//! same store can be shared (`Arc<dyn ContentStore>`) by any number of
//! virtual filesystems.

mod hash;
mod memory;
mod traits;

pub use hash::hash_bytes;
pub use memory::MemoryStore;
pub use traits::ContentStore;
