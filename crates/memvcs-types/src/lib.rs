//! memvcs-types: pure data types shared by the memvcs crates.
//!
//! - **ContentHash**: the 32-byte identity of a stored payload
//! - **Classification / StatusEntry / StatusReport**: status engine output
//! - **VfsError**: every error the core can return
//!
//! Nothing in here touches storage or hashing; the core crate owns both.

mod error;
mod hash;
mod status;

pub use error::{ErrorKind, Result, VfsError};
pub use hash::{ContentHash, ParseHashError, HASH_LEN};
pub use status::{Classification, StatusEntry, StatusReport, StatusSummary};
