// SPDX-License-Identifier: MPL-2.0
//! Playback events reported by a video surface.
//!
//! A carousel keeps its own `is_playing` flag for the visible item. The
//! surface reports what actually happened so that flag can be corrected when
//! playback ends, fails, or is paused by something other than the carousel.

/// Why a surface could not play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackFailure {
    /// No decoder is available for this reference.
    Unsupported,
    /// The reference could not be opened.
    Unreachable(String),
}

impl PlaybackFailure {
    /// Returns the i18n message key for this failure.
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            PlaybackFailure::Unsupported => "notification-video-unsupported",
            PlaybackFailure::Unreachable(_) => "notification-video-unreachable",
        }
    }
}

/// Observed playback transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackEvent {
    Started,
    Paused,
    Ended,
    Errored(PlaybackFailure),
}

impl PlaybackEvent {
    /// Whether the surface is playing after this event.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        matches!(self, PlaybackEvent::Started)
    }
}
