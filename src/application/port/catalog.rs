// SPDX-License-Identifier: MPL-2.0
//! Catalog persistence port.

use crate::domain::catalog::{Collection, CollectionStatus, ValidDraft};
use crate::domain::ids::CollectionId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("collection {0} not found")]
    NotFound(CollectionId),

    #[error("catalog unavailable: {0}")]
    Unavailable(String),

    #[error("catalog data is corrupted: {0}")]
    Corrupted(String),
}

impl CatalogError {
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            CatalogError::NotFound(_) => "error-catalog-not-found",
            CatalogError::Unavailable(_) => "error-catalog-unavailable",
            CatalogError::Corrupted(_) => "error-catalog-corrupted",
        }
    }
}

/// Stores collections.
///
/// Implementations persist status as `"available"` / `"sold-out"` and return
/// listings ordered newest first.
pub trait CatalogStore: Send + Sync {
    /// Lists all collections, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Unavailable`] if the backing store cannot be read.
    fn list(&self) -> Result<Vec<Collection>, CatalogError>;

    /// Creates a collection and returns it with its assigned identity.
    fn create(&self, draft: ValidDraft) -> Result<Collection, CatalogError>;

    /// Replaces the editable fields of an existing collection.
    fn update(&self, id: CollectionId, draft: ValidDraft) -> Result<Collection, CatalogError>;

    fn delete(&self, id: CollectionId) -> Result<(), CatalogError>;

    fn set_status(
        &self,
        id: CollectionId,
        status: CollectionStatus,
    ) -> Result<Collection, CatalogError>;
}
