// SPDX-License-Identifier: MPL-2.0
//! Video playback port.
//!
//! A [`VideoSurface`] opens one [`PlaybackSession`] per video. Sessions are
//! driven by commands and report back through the [`EventSink`] given at open
//! time: decoded frames and every playback transition, including the ones the
//! caller did not ask for (end of stream, decode failure).
//!
//! # Design Notes
//!
//! - Sessions are **stateful** and owned by a single caller
//! - Commands never block; decoding runs on its own thread
//! - Dropping a session stops it

use crate::domain::video::{PlaybackEvent, PlaybackFailure, VideoFrame};
use std::sync::Arc;

/// What a session reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    Frame(VideoFrame),
    Playback(PlaybackEvent),
}

/// Receives the events of one session, from the decoding thread.
pub type EventSink = Arc<dyn Fn(SurfaceEvent) + Send + Sync>;

/// A single open video.
pub trait PlaybackSession: Send {
    /// Starts or resumes playback. A session that reached the end restarts
    /// from the beginning.
    fn play(&mut self);

    fn pause(&mut self);

    fn set_muted(&mut self, muted: bool);

    /// Releases the decoder. Later commands are ignored.
    fn stop(&mut self);
}

pub trait VideoSurface: Send + Sync {
    /// Opens `url` paused.
    ///
    /// # Errors
    ///
    /// Returns a [`PlaybackFailure`] when the reference cannot be played at
    /// all. Failures found while decoding arrive through `sink` instead.
    fn open(
        &self,
        url: &str,
        muted: bool,
        sink: EventSink,
    ) -> Result<Box<dyn PlaybackSession>, PlaybackFailure>;
}
