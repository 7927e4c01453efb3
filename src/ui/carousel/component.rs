// SPDX-License-Identifier: MPL-2.0
//! Carousel component: navigation, gestures, slide animation, the playback
//! flags and latest frame of the visible video and one lazy image per image
//! item.

use super::animation::{visible_slices, SlideAnimation};
use super::state::{CarouselState, Transition};
use super::swipe::{Swipe, SwipeTracker};
use crate::domain::media::{MediaItem, MediaSequence};
use crate::domain::video::{PlaybackEvent, PlaybackFailure, VideoFrame};
use crate::ui::lazy_image::{self, LazyImage, LoadMode};
use iced::widget::image;
use iced::Point;
use std::time::{Duration, Instant};

/// Gesture and animation settings shared by every carousel on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselSettings {
    pub swipe_threshold: f32,
    pub slide_duration: Duration,
    pub fade_duration: Duration,
}

impl CarouselSettings {
    #[must_use]
    pub fn from_config(config: &crate::app::config::StorefrontConfig) -> Self {
        Self {
            swipe_threshold: config.swipe_threshold_px(),
            slide_duration: config.slide_duration(),
            fade_duration: config.fade_duration(),
        }
    }
}

impl Default for CarouselSettings {
    fn default() -> Self {
        Self::from_config(&crate::app::config::StorefrontConfig::default())
    }
}

/// Instruction for the video surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoCommand {
    Stop { url: String },
    Play { index: usize, url: String, muted: bool },
    Pause { index: usize, url: String },
    SetMuted { url: String, muted: bool },
}

#[derive(Debug, Clone)]
pub enum Message {
    Next,
    Previous,
    GoTo(usize),
    PointerMoved(Point),
    PointerPressed,
    PointerReleased,
    PointerLeft,
    TogglePlayPause,
    ToggleMute,
    /// Surface report about the item at `index`.
    Playback { index: usize, event: PlaybackEvent },
    /// Decoded frame of the video at `index`.
    Frame { index: usize, frame: VideoFrame },
    Image { index: usize, message: lazy_image::Message },
    Tick(Instant),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Commands run in order: the outgoing video is stopped first.
    Video(Vec<VideoCommand>),
    Image { index: usize, effect: lazy_image::Effect },
    PlaybackFailed(PlaybackFailure),
}

#[derive(Debug, Clone)]
pub struct Carousel {
    sequence: MediaSequence,
    state: CarouselState,
    swipe: SwipeTracker,
    animation: SlideAnimation,
    images: Vec<Option<LazyImage>>,
    /// Latest frame of the current video.
    frame: Option<(usize, image::Handle)>,
}

impl Carousel {
    /// Builds a carousel over `sequence`. The first image loads eagerly, the
    /// others wait until they scroll into view.
    #[must_use]
    pub fn new(sequence: MediaSequence, placeholder: &str, settings: CarouselSettings) -> Self {
        let images = sequence
            .iter()
            .enumerate()
            .map(|(index, item)| {
                (!item.is_video()).then(|| {
                    let mode = if index == 0 {
                        LoadMode::Eager
                    } else {
                        LoadMode::Deferred
                    };
                    LazyImage::new(item.url(), placeholder, mode)
                        .with_fade(settings.fade_duration)
                })
            })
            .collect();

        Self {
            state: CarouselState::new(sequence.len()),
            swipe: SwipeTracker::new(settings.swipe_threshold),
            animation: SlideAnimation::new(settings.slide_duration),
            sequence,
            images,
            frame: None,
        }
    }

    /// Shows `index` right away, without sliding. Used when a carousel opens
    /// on the item another one was showing.
    pub fn jump_to(&mut self, index: usize) {
        if self.state.go_to(index).is_some() {
            self.animation.snap_to(index);
            self.frame = None;
        }
    }

    /// Initial image effects (eager fetches and observer registrations).
    pub fn start(&mut self) -> Vec<(usize, lazy_image::Effect)> {
        self.images
            .iter_mut()
            .enumerate()
            .filter_map(|(index, image)| image.as_mut().map(|image| (index, image.start())))
            .collect()
    }

    #[must_use]
    pub fn sequence(&self) -> &MediaSequence {
        &self.sequence
    }

    #[must_use]
    pub fn state(&self) -> &CarouselState {
        &self.state
    }

    #[must_use]
    pub fn current_item(&self) -> Option<&MediaItem> {
        self.state.current_index().and_then(|i| self.sequence.get(i))
    }

    #[must_use]
    pub fn image(&self, index: usize) -> Option<&LazyImage> {
        self.images.get(index).and_then(Option::as_ref)
    }

    /// Latest decoded frame of the video at `index`.
    #[must_use]
    pub fn frame(&self, index: usize) -> Option<&image::Handle> {
        self.frame
            .as_ref()
            .filter(|(frame_index, _)| *frame_index == index)
            .map(|(_, handle)| handle)
    }

    #[must_use]
    pub fn strip_position(&self, now: Instant) -> f32 {
        self.animation.position(now)
    }

    /// Indices of the items currently in the strip window.
    #[must_use]
    pub fn visible_indices(&self, now: Instant) -> Vec<usize> {
        visible_slices(self.strip_position(now), self.sequence.len())
            .into_iter()
            .map(|slice| slice.index)
            .collect()
    }

    /// Whether a tick is needed to keep sliding or fading.
    #[must_use]
    pub fn is_animating(&self, now: Instant) -> bool {
        self.animation.is_animating()
            || self
                .images
                .iter()
                .flatten()
                .any(|image| image.is_fading(now))
    }

    /// Commands that release this carousel's video, e.g. before it is
    /// dropped or hidden. A paused video still holds a decoder and is stopped
    /// too.
    pub fn shutdown(&mut self) -> Vec<VideoCommand> {
        let commands: Vec<VideoCommand> = self
            .current_item()
            .filter(|item| item.is_video())
            .map(|item| VideoCommand::Stop {
                url: item.url().to_string(),
            })
            .into_iter()
            .collect();
        self.state.stop_playback();
        self.frame = None;
        commands
    }

    pub fn handle(&mut self, message: Message, now: Instant) -> Effect {
        match message {
            Message::Next => {
                let transition = self.state.next();
                self.after_transition(transition, now)
            }
            Message::Previous => {
                let transition = self.state.previous();
                self.after_transition(transition, now)
            }
            Message::GoTo(index) => {
                let transition = self.state.go_to(index);
                self.after_transition(transition, now)
            }
            Message::PointerMoved(position) => {
                self.swipe.pointer_moved(position.x);
                Effect::None
            }
            Message::PointerPressed => {
                self.swipe.press();
                Effect::None
            }
            Message::PointerReleased => {
                let transition = match self.swipe.release(self.sequence.len()) {
                    Some(Swipe::Next) => self.state.next(),
                    Some(Swipe::Previous) => self.state.previous(),
                    None => None,
                };
                self.after_transition(transition, now)
            }
            Message::PointerLeft => {
                self.swipe.cancel();
                Effect::None
            }
            Message::TogglePlayPause => self.toggle_play_pause(),
            Message::ToggleMute => {
                self.state.toggle_mute();
                match self.current_item() {
                    Some(item) if item.is_video() => Effect::Video(vec![VideoCommand::SetMuted {
                        url: item.url().to_string(),
                        muted: self.state.is_muted(),
                    }]),
                    _ => Effect::None,
                }
            }
            Message::Playback { index, event } => {
                if !self.state.observe(index, &event) {
                    log::debug!("ignoring stale playback event for item {index}");
                    return Effect::None;
                }
                match event {
                    PlaybackEvent::Errored(failure) => {
                        self.frame = None;
                        Effect::PlaybackFailed(failure)
                    }
                    _ => Effect::None,
                }
            }
            Message::Frame { index, frame } => {
                let current_video = self.state.current_index() == Some(index)
                    && self.current_item().is_some_and(MediaItem::is_video);
                if current_video {
                    let (width, height) = (frame.width(), frame.height());
                    self.frame = Some((
                        index,
                        image::Handle::from_rgba(width, height, frame.into_rgba()),
                    ));
                }
                Effect::None
            }
            Message::Image { index, message } => {
                match self.images.get_mut(index).and_then(Option::as_mut) {
                    Some(image) => Effect::Image {
                        index,
                        effect: image.update(message, now),
                    },
                    None => Effect::None,
                }
            }
            Message::Tick(now) => {
                self.animation.tick(now);
                Effect::None
            }
        }
    }

    fn after_transition(&mut self, transition: Option<Transition>, now: Instant) -> Effect {
        let Some(Transition { from, to }) = transition else {
            return Effect::None;
        };
        log::debug!("carousel moved {from} -> {to}");
        self.animation.slide_to(to, now);
        self.frame = None;

        match self.sequence.get(from) {
            Some(outgoing) if outgoing.is_video() => Effect::Video(vec![VideoCommand::Stop {
                url: outgoing.url().to_string(),
            }]),
            _ => Effect::None,
        }
    }

    fn toggle_play_pause(&mut self) -> Effect {
        let Some(index) = self.state.current_index() else {
            return Effect::None;
        };
        let Some(item) = self.sequence.get(index) else {
            return Effect::None;
        };
        if !self.state.toggle_play_pause(item.is_video()) {
            return Effect::None;
        }
        let url = item.url().to_string();
        let command = if self.state.is_playing() {
            VideoCommand::Play {
                index,
                url,
                muted: self.state.is_muted(),
            }
        } else {
            VideoCommand::Pause { index, url }
        };
        Effect::Video(vec![command])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn carousel(images: &[&str], videos: &[&str]) -> Carousel {
        Carousel::new(
            MediaSequence::build(images, videos),
            "builtin:placeholder",
            CarouselSettings::default(),
        )
    }

    #[test]
    fn mixed_media_scenario() {
        let now = Instant::now();
        let mut c = carousel(&["img1", "img2"], &["video1"]);
        assert_eq!(c.state().current_index(), Some(0));
        assert!(c.state().is_muted());
        assert!(!c.state().is_playing());

        assert_eq!(c.handle(Message::Next, now), Effect::None);
        assert_eq!(c.handle(Message::Next, now), Effect::None);
        assert_eq!(c.current_item().map(MediaItem::url), Some("video1"));

        let effect = c.handle(Message::TogglePlayPause, now);
        assert_eq!(
            effect,
            Effect::Video(vec![VideoCommand::Play {
                index: 2,
                url: "video1".into(),
                muted: true,
            }])
        );
        assert!(c.state().is_playing());

        let effect = c.handle(Message::Next, now);
        assert_eq!(
            effect,
            Effect::Video(vec![VideoCommand::Stop {
                url: "video1".into()
            }])
        );
        assert_eq!(c.state().current_index(), Some(0));
        assert!(!c.state().is_playing());
        assert!(c.state().is_muted());
    }

    #[test]
    fn empty_sequence_scenario() {
        let now = Instant::now();
        let mut c = carousel(&["", "  "], &[]);
        assert_eq!(c.state().current_index(), None);
        assert!(!c.state().has_navigation());
        assert_eq!(c.handle(Message::Next, now), Effect::None);
        assert_eq!(c.handle(Message::TogglePlayPause, now), Effect::None);
        assert!(c.start().is_empty());
    }

    #[test]
    fn toggle_on_image_does_nothing() {
        let mut c = carousel(&["a"], &[]);
        assert_eq!(c.handle(Message::TogglePlayPause, Instant::now()), Effect::None);
        assert!(!c.state().is_playing());
    }

    #[test]
    fn swipe_left_navigates_forward() {
        let now = Instant::now();
        let mut c = carousel(&["a", "b"], &[]);
        c.handle(Message::PointerMoved(Point::new(200.0, 10.0)), now);
        c.handle(Message::PointerPressed, now);
        c.handle(Message::PointerMoved(Point::new(120.0, 12.0)), now);
        c.handle(Message::PointerReleased, now);
        assert_eq!(c.state().current_index(), Some(1));
        assert!(c.is_animating(now));
    }

    #[test]
    fn stale_playback_event_is_ignored() {
        let now = Instant::now();
        let mut c = carousel(&["a"], &["v"]);
        c.handle(Message::GoTo(1), now);
        c.handle(Message::TogglePlayPause, now);
        assert_eq!(
            c.handle(
                Message::Playback {
                    index: 0,
                    event: PlaybackEvent::Ended
                },
                now
            ),
            Effect::None
        );
        assert!(c.state().is_playing());

        let effect = c.handle(
            Message::Playback {
                index: 1,
                event: PlaybackEvent::Errored(PlaybackFailure::Unsupported),
            },
            now,
        );
        assert_eq!(effect, Effect::PlaybackFailed(PlaybackFailure::Unsupported));
        assert!(!c.state().is_playing());
    }

    #[test]
    fn first_image_is_eager_rest_deferred() {
        let mut c = carousel(&["a", "b"], &["v"]);
        let effects = c.start();
        assert_eq!(
            effects,
            vec![
                (0, lazy_image::Effect::Fetch("a".into())),
                (1, lazy_image::Effect::Observe),
            ]
        );
        assert!(c.image(2).is_none());
    }

    #[test]
    fn mute_toggle_on_video_forwards_to_surface() {
        let now = Instant::now();
        let mut c = carousel(&[], &["v"]);
        assert_eq!(
            c.handle(Message::ToggleMute, now),
            Effect::Video(vec![VideoCommand::SetMuted {
                url: "v".into(),
                muted: false,
            }])
        );
    }

    #[test]
    fn shutdown_stops_current_video_even_when_paused() {
        let now = Instant::now();
        let mut c = carousel(&["a"], &["v"]);
        assert!(c.shutdown().is_empty());
        c.handle(Message::GoTo(1), now);
        c.handle(Message::TogglePlayPause, now);
        c.handle(Message::TogglePlayPause, now);
        assert!(!c.state().is_playing());
        assert_eq!(c.shutdown(), vec![VideoCommand::Stop { url: "v".into() }]);

        c.handle(Message::TogglePlayPause, now);
        assert!(c.state().is_playing());
        c.shutdown();
        assert!(!c.state().is_playing());
    }

    #[test]
    fn frames_show_only_for_the_current_video() {
        let now = Instant::now();
        let mut c = carousel(&["a"], &["v"]);
        let frame = VideoFrame::new(2, 1, vec![255; 8]).unwrap();

        c.handle(
            Message::Frame {
                index: 1,
                frame: frame.clone(),
            },
            now,
        );
        assert!(c.frame(1).is_none());

        c.handle(Message::GoTo(1), now);
        c.handle(Message::Frame { index: 1, frame }, now);
        assert!(c.frame(1).is_some());

        c.handle(Message::Next, now);
        assert!(c.frame(1).is_none());
    }

    #[test]
    fn jump_to_snaps_without_sliding() {
        let now = Instant::now();
        let mut c = carousel(&["a", "b", "c"], &[]);
        c.jump_to(2);
        assert_eq!(c.state().current_index(), Some(2));
        assert!(!c.is_animating(now));
        assert!((c.strip_position(now) - 2.0).abs() < f32::EPSILON);
    }
}
