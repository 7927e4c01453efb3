// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core business logic without presentation or I/O dependencies.
//!
//! This module contains pure domain types, value objects, and business rules.
//! Beyond `std` it only relies on `serde` for persistence shapes, `uuid` for
//! identities and `chrono` for timestamps.
//!
//! # Modules
//!
//! - [`analytics`]: Storefront visits and weekly [`VisitStats`](analytics::VisitStats)
//! - [`catalog`]: Collections, invitations and the admin context
//! - [`editing`]: Crop values ([`CropScale`](editing::CropScale),
//!   [`RotationDegrees`](editing::RotationDegrees), [`CropTransform`](editing::CropTransform))
//! - [`ids`]: Identity newtypes
//! - [`media`]: Media references ([`MediaItem`](media::MediaItem),
//!   [`MediaSequence`](media::MediaSequence), [`RawImage`](media::RawImage))
//! - [`video`]: Playback events ([`PlaybackEvent`](video::PlaybackEvent))

pub mod analytics;
pub mod catalog;
pub mod editing;
pub mod ids;
pub mod media;
pub mod video;
