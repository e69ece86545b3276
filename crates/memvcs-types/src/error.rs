//! Error type for VFS and status operations.

use thiserror::Error;

use crate::hash::ContentHash;

/// Result alias used throughout memvcs.
pub type Result<T> = std::result::Result<T, VfsError>;

/// Coarse error category.
///
/// `NotFound` and `InvalidEncoding` are ordinary caller-facing outcomes.
/// `CorruptState` means a committed entry points at content the store
/// doesn't have; nothing built on that state can be trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    InvalidEncoding,
    CorruptState,
}

#[derive(Debug, Error)]
pub enum VfsError {
    /// Path is absent or was never written.
    #[error("not found: {path}")]
    NotFound { path: String },

    /// Hash is unknown to the content store.
    #[error("object not found: {hash}")]
    ObjectNotFound { hash: ContentHash },

    #[error("invalid UTF-8 in {path}: {source}")]
    InvalidEncoding {
        path: String,
        #[source]
        source: std::str::Utf8Error,
    },

    #[error("corrupt state: {path} references missing object {hash}")]
    CorruptState { path: String, hash: ContentHash },
}

impl VfsError {
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    pub fn corrupt(path: impl Into<String>, hash: ContentHash) -> Self {
        Self::CorruptState {
            path: path.into(),
            hash,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } | Self::ObjectNotFound { .. } => ErrorKind::NotFound,
            Self::InvalidEncoding { .. } => ErrorKind::InvalidEncoding,
            Self::CorruptState { .. } => ErrorKind::CorruptState,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}
