// SPDX-License-Identifier: MPL-2.0
//! Resolves media urls to encoded bytes.
//!
//! Supported references:
//! - `builtin:placeholder`: a generated neutral image
//! - `file://` urls and plain filesystem paths
//! - `http://` / `https://` urls (blocking client, call off the UI thread)

use crate::application::port::media::{FetchError, ImageSource};
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::Duration;

/// Scheme of built-in images.
pub const PLACEHOLDER_SCHEME: &str = "builtin:";

const PLACEHOLDER_NAME: &str = "placeholder";
const PLACEHOLDER_SIZE: (u32, u32) = (300, 400);
const PLACEHOLDER_COLOR: [u8; 4] = [0xE7, 0xE1, 0xDA, 0xFF];
const HTTP_TIMEOUT: Duration = Duration::from_secs(20);
const MAX_REDIRECTS: usize = 10;

#[derive(Debug, Default)]
pub struct UrlImageSource {
    client: OnceLock<Result<reqwest::blocking::Client, String>>,
}

impl UrlImageSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn client(&self) -> Result<&reqwest::blocking::Client, FetchError> {
        self.client
            .get_or_init(|| {
                reqwest::blocking::Client::builder()
                    .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
                    .user_agent(concat!("BoutiqueShowcase/", env!("CARGO_PKG_VERSION")))
                    .timeout(HTTP_TIMEOUT)
                    .build()
                    .map_err(|e| e.to_string())
            })
            .as_ref()
            .map_err(|msg| FetchError::Unreachable(msg.clone()))
    }

    fn fetch_http(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self
            .client()?
            .get(url)
            .send()
            .map_err(|e| FetchError::Unreachable(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(url.to_string()));
        }
        if !status.is_success() {
            return Err(FetchError::Unreachable(format!("HTTP status: {status}")));
        }
        response
            .bytes()
            .map(|bytes| bytes.to_vec())
            .map_err(|e| FetchError::Unreachable(e.to_string()))
    }
}

/// Filesystem path referenced by a `file://` url or a plain path.
#[must_use]
pub fn local_path(url: &str) -> Option<PathBuf> {
    if let Some(rest) = url.strip_prefix("file://") {
        // `file:///C:/x` on Windows
        let rest = if cfg!(windows) {
            rest.trim_start_matches('/')
        } else {
            rest
        };
        return Some(PathBuf::from(rest));
    }
    if url.contains("://") || url.starts_with(PLACEHOLDER_SCHEME) {
        return None;
    }
    Some(PathBuf::from(url))
}

/// PNG bytes of the built-in placeholder.
pub fn placeholder_png() -> Result<Vec<u8>, FetchError> {
    static PNG: OnceLock<Result<Vec<u8>, String>> = OnceLock::new();
    PNG.get_or_init(|| {
        let (width, height) = PLACEHOLDER_SIZE;
        let image = image_rs::RgbaImage::from_pixel(width, height, image_rs::Rgba(PLACEHOLDER_COLOR));
        let mut bytes = Cursor::new(Vec::new());
        image
            .write_to(&mut bytes, image_rs::ImageFormat::Png)
            .map(|()| bytes.into_inner())
            .map_err(|e| e.to_string())
    })
    .clone()
    .map_err(FetchError::Unsupported)
}

impl ImageSource for UrlImageSource {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let url = url.trim();
        if let Some(name) = url.strip_prefix(PLACEHOLDER_SCHEME) {
            return if name == PLACEHOLDER_NAME {
                placeholder_png()
            } else {
                Err(FetchError::NotFound(url.to_string()))
            };
        }
        if url.starts_with("http://") || url.starts_with("https://") {
            return self.fetch_http(url);
        }
        let path = local_path(url).ok_or_else(|| FetchError::Unsupported(url.to_string()))?;
        std::fs::read(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => FetchError::NotFound(url.to_string()),
            _ => FetchError::Unreachable(e.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn placeholder_is_a_png() {
        let bytes = UrlImageSource::new()
            .fetch("builtin:placeholder")
            .expect("placeholder");
        assert_eq!(&bytes[1..4], b"PNG");
    }

    #[test]
    fn unknown_builtin_is_not_found() {
        assert!(matches!(
            UrlImageSource::new().fetch("builtin:nope"),
            Err(FetchError::NotFound(_))
        ));
    }

    #[test]
    fn reads_file_urls_and_plain_paths() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("a.bin");
        std::fs::write(&path, [1, 2, 3]).expect("write");

        let source = UrlImageSource::new();
        assert_eq!(source.fetch(&path.to_string_lossy()).expect("plain"), vec![1, 2, 3]);
        let url = crate::infrastructure::storage::file_url(&path);
        assert_eq!(source.fetch(&url).expect("file url"), vec![1, 2, 3]);
    }

    #[test]
    fn missing_file_is_not_found() {
        assert!(matches!(
            UrlImageSource::new().fetch("/definitely/not/here.jpg"),
            Err(FetchError::NotFound(_))
        ));
    }

    #[test]
    fn unknown_scheme_is_unsupported() {
        assert!(matches!(
            UrlImageSource::new().fetch("ftp://host/a.jpg"),
            Err(FetchError::Unsupported(_))
        ));
    }
}
