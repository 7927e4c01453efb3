// SPDX-License-Identifier: MPL-2.0
//! Catalog domain: collections, admin invitations and the admin context.

pub mod admin;
pub mod collection;
pub mod invitation;

pub use admin::{AdminContext, Role};
pub use collection::{
    sort_newest_first, CatalogStats, Category, Collection, CollectionDraft, CollectionStatus,
    DraftError, ValidDraft, MAX_IMAGES,
};
pub use invitation::{normalize_code, Invitation, InvitationStatus, RedeemError};
