// SPDX-License-Identifier: MPL-2.0
//! In-process video playback for carousel items.
//!
//! - [`decoder`]: one FFmpeg decoding thread per playback session
//! - [`audio_output`]: cpal device fed by the decoding thread
//! - [`worker`]: keeps at most one session per carousel and applies commands in order
//! - [`subscription`]: runs the worker inside an Iced subscription

pub mod audio_output;
pub mod decoder;
pub mod subscription;
pub mod worker;

pub use decoder::DecoderHandle;
pub use subscription::{video_worker, VideoCommandSender, WorkerMessage};
pub use worker::{VideoWorker, WorkerOutput};

use crate::error::{Error, Result};
use std::sync::{Mutex, Once};

static FFMPEG_INIT: Once = Once::new();
static FFMPEG_INIT_ERROR: Mutex<Option<String>> = Mutex::new(None);

/// Initializes FFmpeg once per process.
///
/// # Errors
///
/// Returns [`Error::Io`] if FFmpeg failed to initialize, on this call or an
/// earlier one.
pub fn init_ffmpeg() -> Result<()> {
    FFMPEG_INIT.call_once(|| {
        if let Err(e) = ffmpeg_next::init() {
            if let Ok(mut slot) = FFMPEG_INIT_ERROR.lock() {
                *slot = Some(format!("FFmpeg initialization failed: {e}"));
            }
            return;
        }

        // SAFETY: av_log_set_level is thread-safe and only affects logging
        unsafe {
            ffmpeg_next::ffi::av_log_set_level(ffmpeg_next::ffi::AV_LOG_ERROR);
        }
    });

    match FFMPEG_INIT_ERROR.lock() {
        Ok(slot) => slot.clone().map_or(Ok(()), |msg| Err(Error::Io(msg))),
        Err(_) => Ok(()),
    }
}
