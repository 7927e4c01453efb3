// SPDX-License-Identifier: MPL-2.0
//! Upload naming and content type detection.

use crate::domain::media::MediaKind;
use std::path::Path;

const RANDOM_SUFFIX_LEN: usize = 10;

/// A file picked by the operator, ready to hand to object storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingUpload {
    pub object_name: String,
    pub content_type: &'static str,
    pub kind: MediaKind,
    pub bytes: Vec<u8>,
}

impl PendingUpload {
    /// Prepares `bytes` read from `path` for upload.
    #[must_use]
    pub fn new(path: &Path, bytes: Vec<u8>, now_millis: i64) -> Self {
        let content_type = content_type_for(path);
        Self {
            object_name: unique_object_name(path, now_millis),
            content_type,
            kind: MediaKind::from_mime(content_type),
            bytes,
        }
    }
}

/// Builds `<millis>-<random>.<ext>`.
#[must_use]
pub fn unique_object_name(path: &Path, now_millis: i64) -> String {
    let mut random = uuid::Uuid::new_v4().simple().to_string();
    random.truncate(RANDOM_SUFFIX_LEN);
    format!("{now_millis}-{random}.{}", extension_of(path))
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map_or_else(|| "bin".to_string(), str::to_ascii_lowercase)
}

/// MIME type guessed from the file extension.
#[must_use]
pub fn content_type_for(path: &Path) -> &'static str {
    match extension_of(path).as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "mp4" | "m4v" => "video/mp4",
        "webm" => "video/webm",
        "mov" => "video/quicktime",
        "mkv" => "video/x-matroska",
        "avi" => "video/x-msvideo",
        _ => "application/octet-stream",
    }
}

/// File extensions offered by the media picker.
pub const PICKER_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "webp", "bmp", "mp4", "m4v", "webm", "mov", "mkv", "avi",
];
