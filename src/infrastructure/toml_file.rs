// SPDX-License-Identifier: MPL-2.0
//! TOML documents on disk shared by the file-backed stores.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;

#[derive(Debug)]
pub(super) enum DocumentError {
    Io(String),
    Parse(String),
}

/// Reads `path`, returning the default document when it does not exist yet.
pub(super) fn read<T>(path: &Path) -> Result<T, DocumentError>
where
    T: DeserializeOwned + Default,
{
    if !path.exists() {
        return Ok(T::default());
    }
    let content = fs::read_to_string(path).map_err(|e| DocumentError::Io(e.to_string()))?;
    toml::from_str(&content).map_err(|e| DocumentError::Parse(e.to_string()))
}

/// Writes `document` next to `path` and renames it into place.
pub(super) fn write<T: Serialize>(path: &Path, document: &T) -> Result<(), DocumentError> {
    let content =
        toml::to_string_pretty(document).map_err(|e| DocumentError::Parse(e.to_string()))?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| DocumentError::Io(e.to_string()))?;
    }
    let tmp = path.with_extension("toml.tmp");
    fs::write(&tmp, content).map_err(|e| DocumentError::Io(e.to_string()))?;
    fs::rename(&tmp, path).map_err(|e| DocumentError::Io(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::tempdir;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Doc {
        #[serde(default)]
        values: Vec<u32>,
    }

    #[test]
    fn missing_file_reads_as_default() {
        let dir = tempdir().expect("temp dir");
        let doc: Doc = read(&dir.path().join("absent.toml")).expect("default");
        assert_eq!(doc, Doc::default());
    }

    #[test]
    fn write_then_read() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("doc.toml");
        write(&path, &Doc { values: vec![1, 2] }).expect("write");
        let doc: Doc = read(&path).expect("read");
        assert_eq!(doc.values, vec![1, 2]);
        assert!(!path.with_extension("toml.tmp").exists());
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("doc.toml");
        fs::write(&path, "values = [").expect("write");
        assert!(matches!(read::<Doc>(&path), Err(DocumentError::Parse(_))));
    }
}
