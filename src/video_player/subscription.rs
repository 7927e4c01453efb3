// SPDX-License-Identifier: MPL-2.0
//! Iced subscription running the [`VideoWorker`].
//!
//! The UI sends `(carousel, command)` pairs through a single unbounded
//! channel, so commands reach the worker in the order they were issued.
//! Frames travel through a small bounded queue and are dropped when the UI
//! falls behind; playback events are never dropped.

use super::worker::{SessionToken, VideoWorker, WorkerOutput};
use crate::application::port::video::{EventSink, SurfaceEvent, VideoSurface};
use crate::domain::video::{PlaybackEvent, VideoFrame};
use crate::ui::carousel::VideoCommand;
use iced::futures::SinkExt;
use iced::stream;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Decoded frames waiting for the UI.
const FRAME_QUEUE: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct VideoWorkerId;

/// Handle for sending commands to the worker from the UI.
#[derive(Debug, Clone)]
pub struct VideoCommandSender<K> {
    tx: mpsc::UnboundedSender<(K, VideoCommand)>,
}

impl<K> VideoCommandSender<K> {
    /// Queues a command.
    ///
    /// # Errors
    ///
    /// Fails when the worker is no longer running.
    pub fn send(&self, key: K, command: VideoCommand) -> Result<(), String> {
        self.tx
            .send((key, command))
            .map_err(|_| "Video worker not running".to_string())
    }
}

#[derive(Debug, Clone)]
pub enum WorkerMessage<K> {
    /// The worker is up; commands go through this sender.
    Ready(VideoCommandSender<K>),
    Output(WorkerOutput<K>),
}

/// Runs the video worker for the lifetime of the application.
pub fn video_worker<K>(surface: Arc<dyn VideoSurface>) -> iced::Subscription<WorkerMessage<K>>
where
    K: Clone + Eq + Hash + Debug + Send + 'static,
{
    iced::Subscription::run_with_id(
        VideoWorkerId,
        stream::channel(100, move |mut output| async move {
            let (command_tx, mut command_rx) = mpsc::unbounded_channel::<(K, VideoCommand)>();
            let (frame_tx, mut frame_rx) = mpsc::channel::<(SessionToken, VideoFrame)>(FRAME_QUEUE);
            let (event_tx, mut event_rx) = mpsc::unbounded_channel::<(SessionToken, PlaybackEvent)>();

            let _ = output
                .send(WorkerMessage::Ready(VideoCommandSender { tx: command_tx }))
                .await;

            let mut worker = VideoWorker::new(surface);
            loop {
                let routed = tokio::select! {
                    command = command_rx.recv() => {
                        let Some((key, command)) = command else {
                            worker.stop_all();
                            return;
                        };
                        worker.apply(key, command, |token| {
                            session_sink(token, frame_tx.clone(), event_tx.clone())
                        })
                    }
                    Some((token, event)) = event_rx.recv() => {
                        worker.route(token, SurfaceEvent::Playback(event))
                    }
                    Some((token, frame)) = frame_rx.recv() => {
                        worker.route(token, SurfaceEvent::Frame(frame))
                    }
                };
                if let Some(routed) = routed {
                    let _ = output.send(WorkerMessage::Output(routed)).await;
                }
            }
        }),
    )
}

fn session_sink(
    token: SessionToken,
    frame_tx: mpsc::Sender<(SessionToken, VideoFrame)>,
    event_tx: mpsc::UnboundedSender<(SessionToken, PlaybackEvent)>,
) -> EventSink {
    Arc::new(move |event| match event {
        SurfaceEvent::Frame(frame) => {
            // A full queue drops the frame; the next one replaces it anyway.
            let _ = frame_tx.try_send((token, frame));
        }
        SurfaceEvent::Playback(event) => {
            let _ = event_tx.send((token, event));
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sink_keeps_playback_events_when_frames_overflow() {
        let (frame_tx, mut frame_rx) = mpsc::channel(FRAME_QUEUE);
        let (event_tx, mut event_rx) = mpsc::unbounded_channel();
        let sink = session_sink(9, frame_tx, event_tx);

        let frame = VideoFrame::new(1, 1, vec![0; 4]).unwrap();
        for _ in 0..FRAME_QUEUE + 3 {
            sink(SurfaceEvent::Frame(frame.clone()));
        }
        sink(SurfaceEvent::Playback(PlaybackEvent::Ended));

        let mut frames = 0;
        while frame_rx.try_recv().is_ok() {
            frames += 1;
        }
        assert_eq!(frames, FRAME_QUEUE);
        assert_eq!(event_rx.recv().await, Some((9, PlaybackEvent::Ended)));
    }

    #[test]
    fn sender_reports_a_stopped_worker() {
        let (tx, rx) = mpsc::unbounded_channel::<(u8, VideoCommand)>();
        drop(rx);
        let sender = VideoCommandSender { tx };
        assert!(sender
            .send(1, VideoCommand::Stop { url: "v".into() })
            .is_err());
    }
}
