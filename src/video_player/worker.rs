// SPDX-License-Identifier: MPL-2.0
//! Applies carousel video commands in order.
//!
//! The worker owns every open [`PlaybackSession`] and keeps at most one per
//! carousel. Each session gets a token; events carrying a token that is no
//! longer active come from a stopped session and are dropped.

use crate::application::port::video::{EventSink, PlaybackSession, SurfaceEvent, VideoSurface};
use crate::domain::video::{PlaybackEvent, VideoFrame};
use crate::ui::carousel::VideoCommand;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

/// Identifies the session that produced an event.
pub type SessionToken = u64;

/// What the worker reports back to the carousel keyed `key`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerOutput<K> {
    Playback {
        key: K,
        index: usize,
        event: PlaybackEvent,
    },
    Frame {
        key: K,
        index: usize,
        frame: VideoFrame,
    },
}

struct Active {
    token: SessionToken,
    index: usize,
    url: String,
    session: Box<dyn PlaybackSession>,
}

pub struct VideoWorker<K> {
    surface: Arc<dyn VideoSurface>,
    active: HashMap<K, Active>,
    next_token: SessionToken,
}

impl<K> std::fmt::Debug for VideoWorker<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoWorker")
            .field("active", &self.active.len())
            .field("next_token", &self.next_token)
            .finish_non_exhaustive()
    }
}

impl<K: Clone + Eq + Hash> VideoWorker<K> {
    #[must_use]
    pub fn new(surface: Arc<dyn VideoSurface>) -> Self {
        Self {
            surface,
            active: HashMap::new(),
            next_token: 0,
        }
    }

    /// Number of open sessions.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Applies one command. `sink_for` builds the event sink of a newly
    /// opened session from its token.
    ///
    /// Returns an output when the command fails right away.
    pub fn apply(
        &mut self,
        key: K,
        command: VideoCommand,
        sink_for: impl FnOnce(SessionToken) -> EventSink,
    ) -> Option<WorkerOutput<K>> {
        match command {
            VideoCommand::Play { index, url, muted } => {
                if let Some(active) = self.active.get_mut(&key).filter(|a| a.url == url) {
                    active.index = index;
                    active.session.set_muted(muted);
                    active.session.play();
                    return None;
                }
                self.stop(&key);

                let token = self.next_token;
                self.next_token += 1;
                match self.surface.open(&url, muted, sink_for(token)) {
                    Ok(mut session) => {
                        session.play();
                        self.active.insert(
                            key,
                            Active {
                                token,
                                index,
                                url,
                                session,
                            },
                        );
                        None
                    }
                    Err(failure) => {
                        log::warn!("cannot play {url}: {failure:?}");
                        Some(WorkerOutput::Playback {
                            key,
                            index,
                            event: PlaybackEvent::Errored(failure),
                        })
                    }
                }
            }
            VideoCommand::Pause { url, .. } => {
                if let Some(active) = self.matching(&key, &url) {
                    active.session.pause();
                }
                None
            }
            VideoCommand::SetMuted { url, muted } => {
                if let Some(active) = self.matching(&key, &url) {
                    active.session.set_muted(muted);
                }
                None
            }
            VideoCommand::Stop { url } => {
                if self.matching(&key, &url).is_some() {
                    self.stop(&key);
                }
                None
            }
        }
    }

    /// Maps a session event to its carousel, or drops it when the session is
    /// no longer active.
    pub fn route(&mut self, token: SessionToken, event: SurfaceEvent) -> Option<WorkerOutput<K>> {
        let (key, active) = self.active.iter().find(|(_, a)| a.token == token)?;
        let key = key.clone();
        let index = active.index;
        match event {
            SurfaceEvent::Frame(frame) => Some(WorkerOutput::Frame { key, index, frame }),
            SurfaceEvent::Playback(event) => {
                if matches!(event, PlaybackEvent::Errored(_)) {
                    // A failed decoder is reopened by the next play.
                    self.active.remove(&key);
                }
                Some(WorkerOutput::Playback { key, index, event })
            }
        }
    }

    /// Stops every session.
    pub fn stop_all(&mut self) {
        for (_, mut active) in self.active.drain() {
            active.session.stop();
        }
    }

    fn matching(&mut self, key: &K, url: &str) -> Option<&mut Active> {
        self.active.get_mut(key).filter(|a| a.url == url)
    }

    fn stop(&mut self, key: &K) {
        if let Some(mut active) = self.active.remove(key) {
            log::debug!("stopping video {}", active.url);
            active.session.stop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::video::PlaybackFailure;
    use std::sync::Mutex;

    type Log = Arc<Mutex<Vec<String>>>;

    struct RecordingSession {
        url: String,
        log: Log,
    }

    impl RecordingSession {
        fn record(&self, what: &str) {
            self.log.lock().unwrap().push(format!("{what} {}", self.url));
        }
    }

    impl PlaybackSession for RecordingSession {
        fn play(&mut self) {
            self.record("play");
        }
        fn pause(&mut self) {
            self.record("pause");
        }
        fn set_muted(&mut self, muted: bool) {
            self.record(if muted { "mute" } else { "unmute" });
        }
        fn stop(&mut self) {
            self.record("stop");
        }
    }

    #[derive(Default)]
    struct RecordingSurface {
        log: Log,
    }

    impl VideoSurface for RecordingSurface {
        fn open(
            &self,
            url: &str,
            _muted: bool,
            _sink: EventSink,
        ) -> Result<Box<dyn PlaybackSession>, PlaybackFailure> {
            if url.starts_with("builtin:") {
                return Err(PlaybackFailure::Unsupported);
            }
            self.log.lock().unwrap().push(format!("open {url}"));
            Ok(Box::new(RecordingSession {
                url: url.to_string(),
                log: Arc::clone(&self.log),
            }))
        }
    }

    fn worker() -> (VideoWorker<u32>, Log) {
        let surface = RecordingSurface::default();
        let log = Arc::clone(&surface.log);
        (VideoWorker::new(Arc::new(surface)), log)
    }

    fn sink(_: SessionToken) -> EventSink {
        Arc::new(|_| {})
    }

    fn play(index: usize, url: &str) -> VideoCommand {
        VideoCommand::Play {
            index,
            url: url.into(),
            muted: true,
        }
    }

    #[test]
    fn commands_apply_in_order_with_one_session_per_carousel() {
        let (mut worker, log) = worker();
        worker.apply(1, play(0, "v1"), sink);
        worker.apply(
            1,
            VideoCommand::Pause {
                index: 0,
                url: "v1".into(),
            },
            sink,
        );
        worker.apply(1, play(0, "v1"), sink);
        worker.apply(1, VideoCommand::Stop { url: "v1".into() }, sink);
        worker.apply(1, play(1, "v2"), sink);

        assert_eq!(worker.active_count(), 1);
        assert_eq!(
            *log.lock().unwrap(),
            vec![
                "open v1", "play v1", "pause v1", "mute v1", "play v1", "stop v1", "open v2",
                "play v2"
            ]
        );
    }

    #[test]
    fn playing_another_url_stops_the_previous_one_first() {
        let (mut worker, log) = worker();
        worker.apply(1, play(0, "v1"), sink);
        worker.apply(1, play(2, "v2"), sink);

        let log = log.lock().unwrap();
        let stop = log.iter().position(|l| l == "stop v1").unwrap();
        let open = log.iter().position(|l| l == "open v2").unwrap();
        assert!(stop < open);
        assert_eq!(worker.active_count(), 1);
    }

    #[test]
    fn carousels_keep_separate_sessions() {
        let (mut worker, _) = worker();
        worker.apply(1, play(0, "v1"), sink);
        worker.apply(2, play(0, "v1"), sink);
        assert_eq!(worker.active_count(), 2);

        worker.stop_all();
        assert_eq!(worker.active_count(), 0);
    }

    #[test]
    fn stop_for_another_url_is_ignored() {
        let (mut worker, log) = worker();
        worker.apply(1, play(0, "v1"), sink);
        worker.apply(1, VideoCommand::Stop { url: "v0".into() }, sink);
        assert_eq!(worker.active_count(), 1);
        assert!(!log.lock().unwrap().iter().any(|l| l.starts_with("stop")));
    }

    #[test]
    fn events_from_stopped_sessions_are_dropped() {
        let (mut worker, _) = worker();
        let mut tokens = Vec::new();
        worker.apply(7, play(0, "v1"), |t| {
            tokens.push(t);
            sink(t)
        });
        worker.apply(7, play(1, "v2"), |t| {
            tokens.push(t);
            sink(t)
        });

        let stale = worker.route(tokens[0], SurfaceEvent::Playback(PlaybackEvent::Ended));
        assert_eq!(stale, None);

        let current = worker.route(tokens[1], SurfaceEvent::Playback(PlaybackEvent::Started));
        assert_eq!(
            current,
            Some(WorkerOutput::Playback {
                key: 7,
                index: 1,
                event: PlaybackEvent::Started
            })
        );
    }

    #[test]
    fn open_failure_is_reported_without_a_session() {
        let (mut worker, _) = worker();
        let output = worker.apply(3, play(4, "builtin:placeholder"), sink);
        assert_eq!(
            output,
            Some(WorkerOutput::Playback {
                key: 3,
                index: 4,
                event: PlaybackEvent::Errored(PlaybackFailure::Unsupported)
            })
        );
        assert_eq!(worker.active_count(), 0);
    }

    #[test]
    fn decode_error_releases_the_session() {
        let (mut worker, _) = worker();
        let mut token = 0;
        worker.apply(1, play(0, "v1"), |t| {
            token = t;
            sink(t)
        });
        let failure = PlaybackEvent::Errored(PlaybackFailure::Unreachable("eof".into()));
        assert!(worker
            .route(token, SurfaceEvent::Playback(failure))
            .is_some());
        assert_eq!(worker.active_count(), 0);
    }
}
