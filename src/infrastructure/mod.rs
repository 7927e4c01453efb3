// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! This module contains concrete implementations of the port traits defined in
//! `application::port`. They wrap the local filesystem and the desktop
//! environment.
//!
//! # Available Adapters
//!
//! - [`catalog`]: Collections in `catalog.toml` (implements [`CatalogStore`])
//! - [`invitations`]: Invitations in `invitations.toml` (implements [`InvitationStore`])
//! - [`visits`]: Visit log in `visits.toml` (implements [`VisitTracker`])
//! - [`auth`]: Admin accounts in `admins.toml` (implements [`AuthProvider`])
//! - [`storage`]: Media bucket directory (implements [`ObjectStorage`])
//! - [`media_source`]: `file://`, plain paths, http(s) and the built-in placeholder
//!   (implements [`ImageSource`])
//! - [`video`]: FFmpeg playback sessions (implements [`VideoSurface`])
//! - [`launcher`]: Desktop url opener (implements [`LinkLauncher`])
//!
//! # Design Notes
//!
//! - File stores serialize access through a `Mutex` and replace files atomically
//! - Adapters log at `info` for persisted changes, `warn` for recoverable failures
//!
//! [`CatalogStore`]: crate::application::port::CatalogStore
//! [`InvitationStore`]: crate::application::port::InvitationStore
//! [`VisitTracker`]: crate::application::port::VisitTracker
//! [`AuthProvider`]: crate::application::port::AuthProvider
//! [`ObjectStorage`]: crate::application::port::ObjectStorage
//! [`ImageSource`]: crate::application::port::ImageSource
//! [`VideoSurface`]: crate::application::port::VideoSurface
//! [`LinkLauncher`]: crate::application::port::LinkLauncher

pub mod auth;
pub mod catalog;
pub mod invitations;
pub mod launcher;
pub mod media_source;
pub mod storage;
pub mod video;
pub mod visits;

mod toml_file;

// Re-export main types for convenience
pub use auth::LocalAuth;
pub use catalog::TomlCatalogStore;
pub use invitations::TomlInvitationStore;
pub use launcher::SystemLauncher;
pub use media_source::{UrlImageSource, PLACEHOLDER_SCHEME};
pub use storage::FsObjectStorage;
pub use video::FfmpegVideoSurface;
pub use visits::TomlVisitLog;
