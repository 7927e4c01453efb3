// SPDX-License-Identifier: MPL-2.0
//! Audio output using cpal.
//!
//! The output lives on the decoding thread that feeds it. Samples are queued
//! in a bounded buffer drained by the device callback; pause and mute only
//! switch the callback to silence.

use crate::error::{Error, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Seconds of audio the buffer holds before new samples are dropped.
const BUFFER_SECONDS: usize = 1;

/// Flags shared with the device callback.
#[derive(Debug, Default)]
struct SharedState {
    muted: AtomicBool,
    paused: AtomicBool,
}

type SampleBuffer = Arc<Mutex<VecDeque<f32>>>;

pub struct AudioOutput {
    shared: Arc<SharedState>,
    buffer: SampleBuffer,
    capacity: usize,
    sample_rate: u32,
    channels: u16,
    _stream: cpal::Stream,
}

impl std::fmt::Debug for AudioOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioOutput")
            .field("sample_rate", &self.sample_rate)
            .field("channels", &self.channels)
            .field("shared", &self.shared)
            .finish_non_exhaustive()
    }
}

impl AudioOutput {
    /// Opens the default output device, paused.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] when no device is available or the stream cannot
    /// be started.
    pub fn new(muted: bool) -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| Error::Io("No audio output device found".to_string()))?;
        let supported_config = device
            .default_output_config()
            .map_err(|e| Error::Io(format!("Failed to get audio config: {e}")))?;

        let sample_rate = supported_config.sample_rate();
        let channels = supported_config.channels();
        let capacity = sample_rate as usize * channels as usize * BUFFER_SECONDS;

        let shared = Arc::new(SharedState::default());
        shared.muted.store(muted, Ordering::Relaxed);
        shared.paused.store(true, Ordering::Relaxed);
        let buffer: SampleBuffer = Arc::new(Mutex::new(VecDeque::with_capacity(capacity)));

        let config: cpal::StreamConfig = supported_config.config();
        let stream = match supported_config.sample_format() {
            cpal::SampleFormat::F32 => {
                build_stream::<f32>(&device, &config, Arc::clone(&buffer), Arc::clone(&shared))?
            }
            cpal::SampleFormat::I16 => {
                build_stream::<i16>(&device, &config, Arc::clone(&buffer), Arc::clone(&shared))?
            }
            cpal::SampleFormat::U16 => {
                build_stream::<u16>(&device, &config, Arc::clone(&buffer), Arc::clone(&shared))?
            }
            _ => return Err(Error::Io("Unsupported audio sample format".to_string())),
        };
        stream
            .play()
            .map_err(|e| Error::Io(format!("Failed to start audio stream: {e}")))?;

        Ok(Self {
            shared,
            buffer,
            capacity,
            sample_rate,
            channels,
            _stream: stream,
        })
    }

    #[must_use]
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    #[must_use]
    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Queues interleaved samples; whatever does not fit is dropped.
    pub fn push(&self, samples: &[f32]) {
        if let Ok(mut buffer) = self.buffer.lock() {
            let room = self.capacity.saturating_sub(buffer.len());
            buffer.extend(samples.iter().take(room));
        }
    }

    pub fn pause(&self) {
        self.shared.paused.store(true, Ordering::Relaxed);
    }

    pub fn resume(&self) {
        self.shared.paused.store(false, Ordering::Relaxed);
    }

    /// Drops queued samples, e.g. before restarting from the beginning.
    pub fn clear(&self) {
        if let Ok(mut buffer) = self.buffer.lock() {
            buffer.clear();
        }
    }

    pub fn set_muted(&self, muted: bool) {
        self.shared.muted.store(muted, Ordering::Relaxed);
    }
}

fn build_stream<T: cpal::SizedSample + cpal::FromSample<f32>>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    buffer: SampleBuffer,
    shared: Arc<SharedState>,
) -> Result<cpal::Stream> {
    device
        .build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                let silence = T::from_sample(0.0f32);
                if shared.paused.load(Ordering::Relaxed) {
                    data.fill(silence);
                    return;
                }
                let Ok(mut queued) = buffer.lock() else {
                    data.fill(silence);
                    return;
                };
                // Muted playback still consumes samples to stay in step with video.
                let muted = shared.muted.load(Ordering::Relaxed);
                for sample in data.iter_mut() {
                    *sample = match queued.pop_front() {
                        Some(value) if !muted => T::from_sample(value.clamp(-1.0, 0.999_999_9)),
                        _ => silence,
                    };
                }
            },
            |err| log::warn!("audio output error: {err}"),
            None,
        )
        .map_err(|e| Error::Io(format!("Failed to build audio stream: {e}")))
}
