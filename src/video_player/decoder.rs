// SPDX-License-Identifier: MPL-2.0
//! FFmpeg decoding thread behind a [`PlaybackSession`].
//!
//! The thread demuxes the input, converts video frames to RGBA at their
//! presentation time and feeds the audio track to the output device. It starts
//! paused; `Play` after the end of the stream restarts from the beginning.

use super::audio_output::AudioOutput;
use crate::application::port::video::{EventSink, PlaybackSession, SurfaceEvent};
use crate::domain::video::{PlaybackEvent, PlaybackFailure, VideoFrame};
use ffmpeg_next::format::Pixel;
use ffmpeg_next::media::Type;
use ffmpeg_next::software::scaling::{Context as ScalingContext, Flags};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Sleep between command checks while paused.
const IDLE_POLL: Duration = Duration::from_millis(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoderCommand {
    Play,
    Pause,
    SetMuted(bool),
    Stop,
}

/// Handle to a decoding thread. Dropping it stops the thread.
#[derive(Debug)]
pub struct DecoderHandle {
    command_tx: mpsc::UnboundedSender<DecoderCommand>,
}

impl DecoderHandle {
    /// Spawns the decoding thread for `input`, a filesystem path or a url
    /// FFmpeg can open.
    #[must_use]
    pub fn spawn(input: String, muted: bool, sink: EventSink) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        tokio::task::spawn_blocking(move || {
            if let Err(failure) = run(&input, muted, command_rx, &sink) {
                log::warn!("video decoder for {input} stopped: {failure:?}");
                sink(SurfaceEvent::Playback(PlaybackEvent::Errored(failure)));
            }
        });
        Self { command_tx }
    }

    fn send(&self, command: DecoderCommand) {
        // A closed channel means the thread already exited.
        let _ = self.command_tx.send(command);
    }
}

impl PlaybackSession for DecoderHandle {
    fn play(&mut self) {
        self.send(DecoderCommand::Play);
    }

    fn pause(&mut self) {
        self.send(DecoderCommand::Pause);
    }

    fn set_muted(&mut self, muted: bool) {
        self.send(DecoderCommand::SetMuted(muted));
    }

    fn stop(&mut self) {
        self.send(DecoderCommand::Stop);
    }
}

impl Drop for DecoderHandle {
    fn drop(&mut self) {
        self.send(DecoderCommand::Stop);
    }
}

/// Decoder for the optional audio track.
struct AudioTrack {
    index: usize,
    decoder: ffmpeg_next::decoder::Audio,
    resampler: ffmpeg_next::software::resampling::Context,
    output: AudioOutput,
}

impl AudioTrack {
    fn open(ictx: &ffmpeg_next::format::context::Input, muted: bool) -> Option<Self> {
        let stream = ictx.streams().best(Type::Audio)?;
        let index = stream.index();
        let decoder = ffmpeg_next::codec::context::Context::from_parameters(stream.parameters())
            .and_then(|context| context.decoder().audio());
        let decoder = match decoder {
            Ok(decoder) => decoder,
            Err(e) => {
                log::debug!("audio track skipped: {e}");
                return None;
            }
        };
        let output = match AudioOutput::new(muted) {
            Ok(output) => output,
            Err(e) => {
                log::warn!("playing without sound: {e}");
                return None;
            }
        };
        let layout = match output.channels() {
            1 => ffmpeg_next::ChannelLayout::MONO,
            _ => ffmpeg_next::ChannelLayout::STEREO,
        };
        let resampler = ffmpeg_next::software::resampling::Context::get(
            decoder.format(),
            decoder.channel_layout(),
            decoder.rate(),
            ffmpeg_next::format::Sample::F32(ffmpeg_next::format::sample::Type::Packed),
            layout,
            output.sample_rate(),
        );
        match resampler {
            Ok(resampler) => Some(Self {
                index,
                decoder,
                resampler,
                output,
            }),
            Err(e) => {
                log::warn!("playing without sound, resampler failed: {e}");
                None
            }
        }
    }

    fn decode(&mut self, packet: &ffmpeg_next::Packet) {
        if self.decoder.send_packet(packet).is_err() {
            return;
        }
        let channels = if self.output.channels() == 1 { 1 } else { 2 };
        let mut decoded = ffmpeg_next::frame::Audio::empty();
        while self.decoder.receive_frame(&mut decoded).is_ok() {
            let mut resampled = ffmpeg_next::frame::Audio::empty();
            if self.resampler.run(&decoded, &mut resampled).is_ok() {
                self.output.push(&extract_samples(&resampled, channels));
            }
        }
    }
}

/// Presentation clock anchored at the first frame after (re)starting.
#[derive(Debug, Clone, Copy)]
struct Clock {
    started: Instant,
    first_pts: f64,
}

impl Clock {
    fn due(self, pts: f64) -> Duration {
        let target = Duration::from_secs_f64((pts - self.first_pts).max(0.0));
        target.saturating_sub(self.started.elapsed())
    }
}

fn run(
    input: &str,
    muted: bool,
    mut command_rx: mpsc::UnboundedReceiver<DecoderCommand>,
    sink: &EventSink,
) -> Result<(), PlaybackFailure> {
    super::init_ffmpeg().map_err(|e| PlaybackFailure::Unreachable(e.to_string()))?;

    let mut ictx = ffmpeg_next::format::input(&input)
        .map_err(|e| PlaybackFailure::Unreachable(e.to_string()))?;

    let (video_index, time_base, parameters) = {
        let stream = ictx
            .streams()
            .best(Type::Video)
            .ok_or(PlaybackFailure::Unsupported)?;
        let time_base = stream.time_base();
        let seconds = if time_base.denominator() == 0 {
            0.0
        } else {
            f64::from(time_base.numerator()) / f64::from(time_base.denominator())
        };
        (stream.index(), seconds, stream.parameters())
    };
    let mut video = ffmpeg_next::codec::context::Context::from_parameters(parameters)
        .and_then(|context| context.decoder().video())
        .map_err(|_| PlaybackFailure::Unsupported)?;
    let (width, height) = (video.width(), video.height());
    let mut scaler = ScalingContext::get(
        video.format(),
        width,
        height,
        Pixel::RGBA,
        width,
        height,
        Flags::BILINEAR,
    )
    .map_err(|_| PlaybackFailure::Unsupported)?;

    let mut audio = AudioTrack::open(&ictx, muted);

    let mut playing = false;
    let mut ended = false;
    let mut clock: Option<Clock> = None;

    loop {
        loop {
            match command_rx.try_recv() {
                Ok(DecoderCommand::Play) => {
                    if ended {
                        ictx.seek(0, ..0)
                            .map_err(|e| PlaybackFailure::Unreachable(e.to_string()))?;
                        video.flush();
                        if let Some(track) = audio.as_mut() {
                            track.decoder.flush();
                            track.output.clear();
                        }
                        ended = false;
                    }
                    playing = true;
                    clock = None;
                    if let Some(track) = audio.as_ref() {
                        track.output.resume();
                    }
                    sink(SurfaceEvent::Playback(PlaybackEvent::Started));
                }
                Ok(DecoderCommand::Pause) => {
                    playing = false;
                    clock = None;
                    if let Some(track) = audio.as_ref() {
                        track.output.pause();
                    }
                    sink(SurfaceEvent::Playback(PlaybackEvent::Paused));
                }
                Ok(DecoderCommand::SetMuted(muted)) => {
                    if let Some(track) = audio.as_ref() {
                        track.output.set_muted(muted);
                    }
                }
                Ok(DecoderCommand::Stop) | Err(mpsc::error::TryRecvError::Disconnected) => {
                    return Ok(());
                }
                Err(mpsc::error::TryRecvError::Empty) => break,
            }
        }

        if !playing {
            std::thread::sleep(IDLE_POLL);
            continue;
        }

        let mut decoded = ffmpeg_next::frame::Video::empty();
        let mut got_frame = false;
        for (stream, packet) in ictx.packets() {
            let index = stream.index();
            if let Some(track) = audio.as_mut().filter(|track| track.index == index) {
                track.decode(&packet);
                continue;
            }
            if index != video_index || video.send_packet(&packet).is_err() {
                continue;
            }
            if video.receive_frame(&mut decoded).is_ok() {
                got_frame = true;
                break;
            }
        }

        if !got_frame {
            playing = false;
            ended = true;
            if let Some(track) = audio.as_ref() {
                track.output.pause();
            }
            sink(SurfaceEvent::Playback(PlaybackEvent::Ended));
            continue;
        }

        let mut rgba = ffmpeg_next::frame::Video::empty();
        if let Err(e) = scaler.run(&decoded, &mut rgba) {
            log::debug!("dropping video frame: {e}");
            continue;
        }

        #[allow(clippy::cast_precision_loss)]
        let pts = decoded.pts().unwrap_or(0) as f64 * time_base;
        let anchor = *clock.get_or_insert(Clock {
            started: Instant::now(),
            first_pts: pts,
        });
        let wait = anchor.due(pts);
        if !wait.is_zero() {
            std::thread::sleep(wait);
        }

        if let Some(frame) = VideoFrame::new(rgba.width(), rgba.height(), extract_rgba_data(&rgba))
        {
            sink(SurfaceEvent::Frame(frame));
        }
    }
}

/// Copies the RGBA plane row by row, dropping the stride padding.
fn extract_rgba_data(frame: &ffmpeg_next::frame::Video) -> Vec<u8> {
    let width = frame.width() as usize;
    let height = frame.height() as usize;
    let data = frame.data(0);
    let stride = frame.stride(0);

    let mut rgba_bytes = Vec::with_capacity(width * height * 4);
    for y in 0..height {
        let row_start = y * stride;
        let row_end = row_start + width * 4;
        if let Some(row) = data.get(row_start..row_end) {
            rgba_bytes.extend_from_slice(row);
        }
    }
    rgba_bytes
}

/// Reads interleaved f32 samples from a packed resampled frame.
fn extract_samples(frame: &ffmpeg_next::frame::Audio, channels: usize) -> Vec<f32> {
    let data = frame.data(0);
    let sample_count = frame.samples() * channels;
    data.chunks_exact(4)
        .take(sample_count)
        .map(|bytes| f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn clock_waits_for_later_frames() {
        let clock = Clock {
            started: Instant::now(),
            first_pts: 1.0,
        };
        assert!(clock.due(3.0) > Duration::from_secs(1));
        assert_eq!(clock.due(0.5), Duration::ZERO);
    }

    #[tokio::test]
    async fn missing_file_reports_unreachable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.mp4");
        let events = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&events);
        let sink: EventSink = Arc::new(move |event| recorded.lock().unwrap().push(event));

        let mut handle = DecoderHandle::spawn(path.to_string_lossy().into_owned(), true, sink);
        handle.play();

        for _ in 0..200 {
            if !events.lock().unwrap().is_empty() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        let events = events.lock().unwrap();
        assert!(matches!(
            events.first(),
            Some(SurfaceEvent::Playback(PlaybackEvent::Errored(
                PlaybackFailure::Unreachable(_)
            )))
        ));
    }
}
