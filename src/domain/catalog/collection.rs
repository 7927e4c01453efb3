// SPDX-License-Identifier: MPL-2.0
//! Catalog collections.

use crate::domain::ids::CollectionId;
use crate::domain::media::MediaSequence;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum images attached to one collection.
pub const MAX_IMAGES: usize = 5;

/// Availability of a collection. Persisted as `"available"` / `"sold-out"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CollectionStatus {
    #[default]
    Available,
    SoldOut,
}

impl CollectionStatus {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            CollectionStatus::Available => CollectionStatus::SoldOut,
            CollectionStatus::SoldOut => CollectionStatus::Available,
        }
    }

    #[must_use]
    pub fn is_sold_out(self) -> bool {
        matches!(self, CollectionStatus::SoldOut)
    }

    #[must_use]
    pub fn i18n_key(self) -> &'static str {
        match self {
            CollectionStatus::Available => "status-available",
            CollectionStatus::SoldOut => "status-sold-out",
        }
    }
}

/// Catalog category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Bridal,
    Festive,
    #[serde(rename = "Party Wear")]
    PartyWear,
    Designer,
    Traditional,
    Contemporary,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Bridal,
        Category::Festive,
        Category::PartyWear,
        Category::Designer,
        Category::Traditional,
        Category::Contemporary,
    ];

    #[must_use]
    pub fn i18n_key(self) -> &'static str {
        match self {
            Category::Bridal => "category-bridal",
            Category::Festive => "category-festive",
            Category::PartyWear => "category-party-wear",
            Category::Designer => "category-designer",
            Category::Traditional => "category-traditional",
            Category::Contemporary => "category-contemporary",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Bridal => "Bridal",
            Category::Festive => "Festive",
            Category::PartyWear => "Party Wear",
            Category::Designer => "Designer",
            Category::Traditional => "Traditional",
            Category::Contemporary => "Contemporary",
        };
        f.write_str(label)
    }
}

/// A sellable catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub id: CollectionId,
    pub name: String,
    /// Price in whole rupees.
    pub price: u64,
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub videos: Vec<String>,
    #[serde(default)]
    pub status: CollectionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    pub created_at: DateTime<Utc>,
}

impl Collection {
    /// Creates a collection from a validated draft.
    #[must_use]
    pub fn from_draft(draft: ValidDraft, created_at: DateTime<Utc>) -> Self {
        let ValidDraft(draft) = draft;
        Self {
            id: CollectionId::new(),
            name: draft.name.trim().to_string(),
            price: draft.price,
            description: draft.description.trim().to_string(),
            images: draft.images,
            videos: draft.videos,
            status: draft.status,
            category: draft.category,
            created_at,
        }
    }

    /// Overwrites the editable fields, keeping identity and creation time.
    pub fn apply(&mut self, draft: ValidDraft) {
        let ValidDraft(draft) = draft;
        self.name = draft.name.trim().to_string();
        self.price = draft.price;
        self.description = draft.description.trim().to_string();
        self.images = draft.images;
        self.videos = draft.videos;
        self.status = draft.status;
        self.category = draft.category;
    }

    /// Media as the storefront carousel shows it.
    #[must_use]
    pub fn media_sequence(&self) -> MediaSequence {
        MediaSequence::build(&self.images, &self.videos)
    }

    /// Draft pre-filled for editing.
    #[must_use]
    pub fn to_draft(&self) -> CollectionDraft {
        CollectionDraft {
            name: self.name.clone(),
            price: self.price,
            description: self.description.clone(),
            images: self.images.clone(),
            videos: self.videos.clone(),
            status: self.status,
            category: self.category,
        }
    }
}

/// Unvalidated collection fields coming from the editor form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionDraft {
    pub name: String,
    pub price: u64,
    pub description: String,
    pub images: Vec<String>,
    pub videos: Vec<String>,
    pub status: CollectionStatus,
    pub category: Option<Category>,
}

/// A draft that passed [`CollectionDraft::validate`].
#[derive(Debug, Clone, PartialEq)]
pub struct ValidDraft(CollectionDraft);

impl ValidDraft {
    #[must_use]
    pub fn draft(&self) -> &CollectionDraft {
        &self.0
    }
}

/// Reasons a draft cannot be saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftError {
    MissingName,
    MissingDescription,
    InvalidPrice,
    NoImages,
    TooManyImages,
}

impl DraftError {
    #[must_use]
    pub fn i18n_key(self) -> &'static str {
        match self {
            DraftError::MissingName => "validation-name-required",
            DraftError::MissingDescription => "validation-description-required",
            DraftError::InvalidPrice => "validation-price-invalid",
            DraftError::NoImages => "validation-image-required",
            DraftError::TooManyImages => "validation-too-many-images",
        }
    }
}

impl CollectionDraft {
    /// Checks required fields; blank media references are dropped first.
    pub fn validate(mut self) -> Result<ValidDraft, DraftError> {
        self.images.retain(|url| !url.trim().is_empty());
        self.videos.retain(|url| !url.trim().is_empty());

        if self.name.trim().is_empty() {
            return Err(DraftError::MissingName);
        }
        if self.description.trim().is_empty() {
            return Err(DraftError::MissingDescription);
        }
        if self.price == 0 {
            return Err(DraftError::InvalidPrice);
        }
        if self.images.is_empty() {
            return Err(DraftError::NoImages);
        }
        if self.images.len() > MAX_IMAGES {
            return Err(DraftError::TooManyImages);
        }
        Ok(ValidDraft(self))
    }
}

/// Dashboard counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CatalogStats {
    pub total: usize,
    pub available: usize,
    pub sold_out: usize,
}

impl CatalogStats {
    #[must_use]
    pub fn of(collections: &[Collection]) -> Self {
        let sold_out = collections
            .iter()
            .filter(|c| c.status.is_sold_out())
            .count();
        Self {
            total: collections.len(),
            available: collections.len() - sold_out,
            sold_out,
        }
    }
}

/// Sorts newest first.
pub fn sort_newest_first(collections: &mut [Collection]) {
    collections.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
