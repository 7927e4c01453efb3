// SPDX-License-Identifier: MPL-2.0
//! In-process video playback backed by FFmpeg.
//!
//! Local files are checked before a decoder is spawned so a missing file fails
//! the `play` that asked for it. Remote urls are handed to FFmpeg as is.

use crate::application::port::video::{EventSink, PlaybackSession, VideoSurface};
use crate::domain::video::PlaybackFailure;
use crate::infrastructure::media_source::{local_path, PLACEHOLDER_SCHEME};
use crate::video_player::DecoderHandle;

#[derive(Debug, Default, Clone, Copy)]
pub struct FfmpegVideoSurface;

impl FfmpegVideoSurface {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// What FFmpeg should open for `url`.
fn decoder_input(url: &str) -> Result<String, PlaybackFailure> {
    let url = url.trim();
    if url.is_empty() || url.starts_with(PLACEHOLDER_SCHEME) {
        return Err(PlaybackFailure::Unsupported);
    }
    if url.starts_with("http://") || url.starts_with("https://") {
        return Ok(url.to_string());
    }
    let path = local_path(url).ok_or(PlaybackFailure::Unsupported)?;
    if !path.is_file() {
        return Err(PlaybackFailure::Unreachable(format!(
            "{} not found",
            path.display()
        )));
    }
    Ok(path.to_string_lossy().into_owned())
}

impl VideoSurface for FfmpegVideoSurface {
    fn open(
        &self,
        url: &str,
        muted: bool,
        sink: EventSink,
    ) -> Result<Box<dyn PlaybackSession>, PlaybackFailure> {
        let input = decoder_input(url)?;
        log::debug!("opening video {input} (muted: {muted})");
        Ok(Box::new(DecoderHandle::spawn(input, muted, sink)))
    }
}
