// SPDX-License-Identifier: MPL-2.0
//! Crate-level error type.
//!
//! Port-specific errors (storage, catalog, auth, crop) live next to their
//! ports and convert into [`Error`] so callers can use `?` across layers.
//! Every variant maps to an i18n key so the UI can surface it as a toast.

use crate::application::port::analytics::AnalyticsError;
use crate::application::port::auth::AuthError;
use crate::application::port::catalog::CatalogError;
use crate::application::port::invitation::InvitationError;
use crate::application::port::media::FetchError;
use crate::application::port::storage::StorageError;
use crate::media::crop_raster::CropError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("I/O Error: {0}")]
    Io(String),

    #[error("Config Error: {0}")]
    Config(String),

    #[error("Image Error: {0}")]
    Image(String),

    #[error("Storage Error: {0}")]
    Storage(#[from] StorageError),

    #[error("Catalog Error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Crop Error: {0}")]
    Crop(#[from] CropError),

    #[error("Auth Error: {0}")]
    Auth(#[from] AuthError),

    #[error("Invitation Error: {0}")]
    Invitation(#[from] InvitationError),

    #[error("Analytics Error: {0}")]
    Analytics(#[from] AnalyticsError),
}

impl Error {
    /// Returns the i18n message key used when this error reaches the user.
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            Error::Io(_) => "error-io",
            Error::Config(_) => "notification-config-load-error",
            Error::Image(_) => "error-image-decode",
            Error::Storage(err) => err.i18n_key(),
            Error::Catalog(err) => err.i18n_key(),
            Error::Crop(err) => err.i18n_key(),
            Error::Auth(err) => err.i18n_key(),
            Error::Invitation(err) => err.i18n_key(),
            Error::Analytics(err) => err.i18n_key(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<FetchError> for Error {
    fn from(err: FetchError) -> Self {
        Error::Image(err.to_string())
    }
}

impl From<image_rs::ImageError> for Error {
    fn from(err: image_rs::ImageError) -> Self {
        Error::Image(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn config_error_formats_properly() {
        let err = Error::Config("bad field".into());
        assert_eq!(format!("{}", err), "Config Error: bad field");
    }

    #[test]
    fn port_errors_keep_their_i18n_key() {
        let err: Error = CropError::SourceNotLoaded.into();
        assert_eq!(err.i18n_key(), CropError::SourceNotLoaded.i18n_key());

        let err: Error = StorageError::Unavailable("offline".into()).into();
        assert_eq!(err.i18n_key(), "error-storage-unavailable");
    }

    #[test]
    fn toml_errors_map_to_config() {
        let parse = toml::from_str::<toml::Table>("not = valid = toml").unwrap_err();
        let err: Error = parse.into();
        assert!(matches!(err, Error::Config(_)));
    }
}
