// SPDX-License-Identifier: MPL-2.0
//! Port adapters shared with background tasks.
//!
//! Ports are synchronous; [`blocking`] runs a call on tokio's blocking pool
//! so the UI thread never waits on disk or network.

use super::paths;
use crate::application::port::{
    AuthProvider, CatalogStore, ImageSource, InvitationStore, LinkLauncher, ObjectStorage,
    VideoSurface, VisitTracker,
};
use crate::error::{Error, Result};
use crate::infrastructure::{
    FfmpegVideoSurface, FsObjectStorage, LocalAuth, SystemLauncher, TomlCatalogStore,
    TomlInvitationStore, TomlVisitLog, UrlImageSource,
};
use std::path::Path;
use std::sync::Arc;

#[derive(Clone)]
pub struct Services {
    pub catalog: Arc<dyn CatalogStore>,
    pub invitations: Arc<dyn InvitationStore>,
    pub auth: Arc<dyn AuthProvider>,
    pub storage: Arc<dyn ObjectStorage>,
    pub images: Arc<dyn ImageSource>,
    pub video: Arc<dyn VideoSurface>,
    pub launcher: Arc<dyn LinkLauncher>,
    pub visits: Arc<dyn VisitTracker>,
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Services").finish_non_exhaustive()
    }
}

impl Services {
    /// Filesystem-backed adapters rooted at `data_dir`.
    #[must_use]
    pub fn local(data_dir: &Path) -> Self {
        Self {
            catalog: Arc::new(TomlCatalogStore::in_dir(data_dir)),
            invitations: Arc::new(TomlInvitationStore::in_dir(data_dir)),
            auth: Arc::new(LocalAuth::in_dir(data_dir)),
            storage: Arc::new(FsObjectStorage::new(paths::media_bucket_dir(data_dir))),
            images: Arc::new(UrlImageSource::new()),
            video: Arc::new(FfmpegVideoSurface::new()),
            launcher: Arc::new(SystemLauncher),
            visits: Arc::new(TomlVisitLog::in_dir(data_dir)),
        }
    }
}

/// Runs `f` on the blocking pool.
pub async fn blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| Error::Io(e.to_string()))?
}
