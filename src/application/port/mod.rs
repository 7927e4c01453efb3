// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! This module defines abstract interfaces that infrastructure adapters implement.
//! These traits use only domain types, ensuring the application layer remains
//! independent of concrete implementations.
//!
//! # Available Ports
//!
//! - [`analytics`]: Storefront visit log and weekly stats
//! - [`auth`]: Admin identity resolution and invitation signup
//! - [`catalog`]: Collection persistence
//! - [`invitation`]: Invitation persistence
//! - [`launcher`]: Opening external links (messaging deep links)
//! - [`media`]: Fetching image bytes by url
//! - [`storage`]: Binary object upload returning a public url
//! - [`video`]: Video playback sessions and their events
//!
//! # Design Notes
//!
//! - All traits use domain types only (no Iced handles)
//! - Traits are `Send + Sync` so adapters can be shared through `Arc`
//! - Methods return `Result` with port error types
//! - No `async fn` - callers wrap calls in Iced's `Task::perform`

pub mod analytics;
pub mod auth;
pub mod catalog;
pub mod invitation;
pub mod launcher;
pub mod media;
pub mod storage;
pub mod video;

pub use analytics::{AnalyticsError, VisitTracker};
pub use auth::{AuthError, AuthProvider};
pub use catalog::{CatalogError, CatalogStore};
pub use invitation::{InvitationError, InvitationStore};
pub use launcher::{LaunchError, LinkLauncher};
pub use media::{FetchError, ImageSource};
pub use storage::{ObjectStorage, StorageError};
pub use video::{EventSink, PlaybackSession, SurfaceEvent, VideoSurface};
