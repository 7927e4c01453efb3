// SPDX-License-Identifier: MPL-2.0
//! Binary object storage port.
//!
//! Uploads return a publicly dereferenceable url. Callers treat it as an opaque
//! string and feed it straight into the media model.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("object name rejected: {0}")]
    InvalidName(String),

    #[error("empty upload")]
    Empty,
}

impl StorageError {
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            StorageError::Unavailable(_) => "error-storage-unavailable",
            StorageError::InvalidName(_) => "error-storage-invalid-name",
            StorageError::Empty => "error-storage-empty",
        }
    }
}

pub trait ObjectStorage: Send + Sync {
    /// Stores `bytes` under `name` and returns the public url.
    ///
    /// # Errors
    ///
    /// - [`StorageError::Empty`] for zero-length uploads
    /// - [`StorageError::InvalidName`] when `name` is not a plain file name
    /// - [`StorageError::Unavailable`] when the backend cannot be written
    fn upload(&self, bytes: &[u8], name: &str, content_type: &str)
        -> Result<String, StorageError>;
}
