// SPDX-License-Identifier: MPL-2.0
//! Opens urls with the desktop's default handler.

use crate::application::port::launcher::{LaunchError, LinkLauncher};

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLauncher;

impl LinkLauncher for SystemLauncher {
    fn open(&self, url: &str) -> Result<(), LaunchError> {
        if url.trim().is_empty() {
            return Err(LaunchError {
                url: url.to_string(),
                reason: "empty url".to_string(),
            });
        }
        // `open::that` waits for the launcher process, so no child is left behind.
        match open::that(url) {
            Ok(()) => {
                log::debug!("opened {url}");
                Ok(())
            }
            Err(err) => {
                log::warn!("failed to open {url}: {err}");
                Err(LaunchError {
                    url: url.to_string(),
                    reason: err.to_string(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_url_is_refused_without_spawning() {
        let err = SystemLauncher.open("  ").expect_err("blank url");
        assert_eq!(err.reason, "empty url");
    }
}
