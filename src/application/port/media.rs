// SPDX-License-Identifier: MPL-2.0
//! Image byte source port.
//!
//! Lazy images and crop sessions fetch encoded bytes through [`ImageSource`];
//! decoding happens in [`crate::media::decode`].

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("media not found: {0}")]
    NotFound(String),

    #[error("unsupported media reference: {0}")]
    Unsupported(String),

    #[error("media unreachable: {0}")]
    Unreachable(String),
}

impl FetchError {
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            FetchError::NotFound(_) => "error-media-not-found",
            FetchError::Unsupported(_) => "error-media-unsupported",
            FetchError::Unreachable(_) => "error-media-unreachable",
        }
    }
}

/// Resolves an opaque media url to encoded bytes.
pub trait ImageSource: Send + Sync {
    /// # Errors
    ///
    /// Returns a [`FetchError`] if the url cannot be resolved or read.
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}
