// SPDX-License-Identifier: MPL-2.0
//! External link launcher port.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to open {url}: {reason}")]
pub struct LaunchError {
    pub url: String,
    pub reason: String,
}

/// Hands a url to the desktop (browser, messaging app, media player).
pub trait LinkLauncher: Send + Sync {
    /// # Errors
    ///
    /// Returns a [`LaunchError`] if no handler could be started.
    fn open(&self, url: &str) -> Result<(), LaunchError>;
}
