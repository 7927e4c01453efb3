// SPDX-License-Identifier: MPL-2.0
//! Catalog stored in a TOML document.

use super::toml_file::{self, DocumentError};
use crate::application::port::catalog::{CatalogError, CatalogStore};
use crate::domain::catalog::{sort_newest_first, Collection, CollectionStatus, ValidDraft};
use crate::domain::ids::CollectionId;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

pub const CATALOG_FILE: &str = "catalog.toml";

#[derive(Debug, Default, Serialize, Deserialize)]
struct CatalogDocument {
    #[serde(default, rename = "collection")]
    collections: Vec<Collection>,
}

impl From<DocumentError> for CatalogError {
    fn from(err: DocumentError) -> Self {
        match err {
            DocumentError::Io(msg) => CatalogError::Unavailable(msg),
            DocumentError::Parse(msg) => CatalogError::Corrupted(msg),
        }
    }
}

/// File-backed [`CatalogStore`].
#[derive(Debug)]
pub struct TomlCatalogStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl TomlCatalogStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Store at `<data_dir>/catalog.toml`.
    #[must_use]
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(CATALOG_FILE))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        // The guarded data is `()`, so a poisoned lock carries no broken state.
        self.lock
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn modify<F>(&self, id: CollectionId, f: F) -> Result<Collection, CatalogError>
    where
        F: FnOnce(&mut Collection),
    {
        let _guard = self.guard();
        let mut document: CatalogDocument = toml_file::read(&self.path)?;
        let collection = document
            .collections
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(CatalogError::NotFound(id))?;
        f(collection);
        let updated = collection.clone();
        toml_file::write(&self.path, &document)?;
        Ok(updated)
    }
}

impl CatalogStore for TomlCatalogStore {
    fn list(&self) -> Result<Vec<Collection>, CatalogError> {
        let _guard = self.guard();
        let mut document: CatalogDocument = toml_file::read(&self.path)?;
        sort_newest_first(&mut document.collections);
        Ok(document.collections)
    }

    fn create(&self, draft: ValidDraft) -> Result<Collection, CatalogError> {
        let _guard = self.guard();
        let mut document: CatalogDocument = toml_file::read(&self.path)?;
        let collection = Collection::from_draft(draft, Utc::now());
        document.collections.push(collection.clone());
        toml_file::write(&self.path, &document)?;
        log::info!("created collection {} ({})", collection.id, collection.name);
        Ok(collection)
    }

    fn update(&self, id: CollectionId, draft: ValidDraft) -> Result<Collection, CatalogError> {
        let updated = self.modify(id, |collection| collection.apply(draft))?;
        log::info!("updated collection {id}");
        Ok(updated)
    }

    fn delete(&self, id: CollectionId) -> Result<(), CatalogError> {
        let _guard = self.guard();
        let mut document: CatalogDocument = toml_file::read(&self.path)?;
        let before = document.collections.len();
        document.collections.retain(|c| c.id != id);
        if document.collections.len() == before {
            return Err(CatalogError::NotFound(id));
        }
        toml_file::write(&self.path, &document)?;
        log::info!("deleted collection {id}");
        Ok(())
    }

    fn set_status(
        &self,
        id: CollectionId,
        status: CollectionStatus,
    ) -> Result<Collection, CatalogError> {
        let updated = self.modify(id, |collection| collection.status = status)?;
        log::info!("collection {id} is now {status:?}");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::CollectionDraft;
    use tempfile::tempdir;

    fn draft(name: &str) -> ValidDraft {
        CollectionDraft {
            name: name.into(),
            price: 1200,
            description: "Silk".into(),
            images: vec!["file:///a.jpg".into()],
            ..CollectionDraft::default()
        }
        .validate()
        .expect("valid draft")
    }

    #[test]
    fn empty_store_lists_nothing() {
        let dir = tempdir().expect("temp dir");
        let store = TomlCatalogStore::in_dir(dir.path());
        assert!(store.list().expect("list").is_empty());
    }

    #[test]
    fn status_is_persisted_as_kebab_case() {
        let dir = tempdir().expect("temp dir");
        let store = TomlCatalogStore::in_dir(dir.path());
        let created = store.create(draft("A")).expect("create");
        store
            .set_status(created.id, CollectionStatus::SoldOut)
            .expect("set status");

        let raw = std::fs::read_to_string(store.path()).expect("read");
        assert!(raw.contains("status = \"sold-out\""));
    }

    #[test]
    fn unknown_ids_are_not_found() {
        let dir = tempdir().expect("temp dir");
        let store = TomlCatalogStore::in_dir(dir.path());
        let id = CollectionId::new();
        assert_eq!(store.delete(id), Err(CatalogError::NotFound(id)));
        assert_eq!(
            store.set_status(id, CollectionStatus::SoldOut),
            Err(CatalogError::NotFound(id))
        );
    }

    #[test]
    fn corrupted_file_is_reported() {
        let dir = tempdir().expect("temp dir");
        let store = TomlCatalogStore::in_dir(dir.path());
        std::fs::write(store.path(), "[[collection]]\nname = 1").expect("write");
        assert!(matches!(store.list(), Err(CatalogError::Corrupted(_))));
    }
}
