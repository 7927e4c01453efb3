// SPDX-License-Identifier: MPL-2.0
//! Media bucket on the local filesystem.

use crate::application::port::storage::{ObjectStorage, StorageError};
use std::fs;
use std::path::{Path, PathBuf};

/// Writes uploads into a bucket directory and returns `file://` urls.
#[derive(Debug, Clone)]
pub struct FsObjectStorage {
    root: PathBuf,
}

impl FsObjectStorage {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
        && !name.chars().any(char::is_control)
}

/// `file://` url for an absolute path.
#[must_use]
pub fn file_url(path: &Path) -> String {
    let display = path.to_string_lossy().replace('\\', "/");
    if display.starts_with('/') {
        format!("file://{display}")
    } else {
        format!("file:///{display}")
    }
}

impl ObjectStorage for FsObjectStorage {
    fn upload(
        &self,
        bytes: &[u8],
        name: &str,
        content_type: &str,
    ) -> Result<String, StorageError> {
        if bytes.is_empty() {
            return Err(StorageError::Empty);
        }
        if !is_plain_file_name(name) {
            return Err(StorageError::InvalidName(name.to_string()));
        }

        fs::create_dir_all(&self.root).map_err(|e| StorageError::Unavailable(e.to_string()))?;
        let target = self.root.join(name);
        fs::write(&target, bytes).map_err(|e| StorageError::Unavailable(e.to_string()))?;

        let absolute = target.canonicalize().unwrap_or(target);
        log::info!(
            "stored {name} ({content_type}, {} bytes) in {}",
            bytes.len(),
            self.root.display()
        );
        Ok(file_url(&absolute))
    }
}
