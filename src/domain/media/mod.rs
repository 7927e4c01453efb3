// SPDX-License-Identifier: MPL-2.0
//! Media domain types.
//!
//! This module contains core media types that are independent of any
//! presentation or infrastructure concerns.

pub mod reorderable;
pub mod types;

pub use reorderable::{MediaEntry, ReorderableMediaList};
pub use types::{MediaItem, MediaKind, MediaSequence, RawImage};
