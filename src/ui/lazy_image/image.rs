// SPDX-License-Identifier: MPL-2.0
//! Deferred image with placeholder fallback.
//!
//! ```text
//! Pending ──fetch ok──▶ Loaded (fades in, terminal)
//!    │
//!    └──fetch failed──▶ Errored (placeholder shown, terminal)
//! ```
//!
//! Fetching is done by the caller: the state only says when to fetch and
//! what to do with the result.

use crate::media::ImageData;
use crate::ui::design_tokens::palette;
use iced::widget::{container, image, Image};
use iced::{ContentFit, Element, Length, Theme};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadMode {
    /// Wait until enough of the element is visible.
    #[default]
    Deferred,
    /// Fetch as soon as the image is created.
    Eager,
}

#[derive(Debug, Clone)]
enum Phase {
    Pending { requested: bool },
    Loaded { image: ImageData, since: Instant },
    Errored { placeholder: Option<ImageData> },
}

#[derive(Debug, Clone)]
pub enum Message {
    /// The observer saw the element.
    Visible,
    Fetched(ImageData),
    Failed(String),
    PlaceholderFetched(ImageData),
    PlaceholderFailed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Register with the visibility observer.
    Observe,
    Fetch(String),
    /// The source failed. Raised once per image; the caller reports it and
    /// fetches the placeholder.
    Failed {
        source: String,
        placeholder: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct LazyImage {
    source: String,
    placeholder: String,
    mode: LoadMode,
    fade: Duration,
    phase: Phase,
}

impl LazyImage {
    #[must_use]
    pub fn new(source: impl Into<String>, placeholder: impl Into<String>, mode: LoadMode) -> Self {
        Self {
            source: source.into(),
            placeholder: placeholder.into(),
            mode,
            fade: Duration::from_millis(crate::app::config::DEFAULT_FADE_DURATION_MS),
            phase: Phase::Pending { requested: false },
        }
    }

    #[must_use]
    pub fn with_fade(mut self, fade: Duration) -> Self {
        self.fade = fade;
        self
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn mode(&self) -> LoadMode {
        self.mode
    }

    /// First effect after creation: fetch right away or wait to be seen.
    pub fn start(&mut self) -> Effect {
        match self.mode {
            LoadMode::Eager => self.request(),
            LoadMode::Deferred => Effect::Observe,
        }
    }

    fn request(&mut self) -> Effect {
        match &mut self.phase {
            Phase::Pending { requested } if !*requested => {
                *requested = true;
                Effect::Fetch(self.source.clone())
            }
            _ => Effect::None,
        }
    }

    pub fn update(&mut self, message: Message, now: Instant) -> Effect {
        match message {
            Message::Visible => self.request(),
            Message::Fetched(image) => {
                if matches!(self.phase, Phase::Pending { .. }) {
                    self.phase = Phase::Loaded { image, since: now };
                }
                Effect::None
            }
            Message::Failed(reason) => {
                if !matches!(self.phase, Phase::Pending { .. }) {
                    return Effect::None;
                }
                self.phase = Phase::Errored { placeholder: None };
                Effect::Failed {
                    source: self.source.clone(),
                    placeholder: self.placeholder.clone(),
                    reason,
                }
            }
            Message::PlaceholderFetched(image) => {
                if let Phase::Errored { placeholder } = &mut self.phase {
                    *placeholder = Some(image);
                }
                Effect::None
            }
            Message::PlaceholderFailed => Effect::None,
        }
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self.phase, Phase::Pending { .. })
    }

    #[must_use]
    pub fn is_requested(&self) -> bool {
        matches!(self.phase, Phase::Pending { requested: true })
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        matches!(self.phase, Phase::Loaded { .. })
    }

    #[must_use]
    pub fn is_errored(&self) -> bool {
        matches!(self.phase, Phase::Errored { .. })
    }

    /// Decoded pixels of whatever is shown (source or placeholder).
    #[must_use]
    pub fn shown(&self) -> Option<&ImageData> {
        match &self.phase {
            Phase::Loaded { image, .. } => Some(image),
            Phase::Errored { placeholder } => placeholder.as_ref(),
            Phase::Pending { .. } => None,
        }
    }

    /// Opacity of the loaded image, rising linearly from 0 to 1.
    #[must_use]
    pub fn opacity(&self, now: Instant) -> f32 {
        match &self.phase {
            Phase::Loaded { since, .. } => {
                if self.fade.is_zero() {
                    return 1.0;
                }
                let elapsed = now.saturating_duration_since(*since).as_secs_f32();
                (elapsed / self.fade.as_secs_f32()).clamp(0.0, 1.0)
            }
            Phase::Errored { .. } => 1.0,
            Phase::Pending { .. } => 0.0,
        }
    }

    #[must_use]
    pub fn is_fading(&self, now: Instant) -> bool {
        self.is_loaded() && self.opacity(now) < 1.0
    }

    pub fn view<'a, M: 'a>(&'a self, width: Length, height: Length, now: Instant) -> Element<'a, M> {
        let content: Element<'a, M> = match self.shown() {
            Some(data) => Image::<image::Handle>::new(data.handle.clone())
                .width(Length::Fill)
                .height(Length::Fill)
                .content_fit(ContentFit::Cover)
                .opacity(self.opacity(now))
                .into(),
            None => container(iced::widget::text(""))
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
        };

        container(content)
            .width(width)
            .height(height)
            .clip(true)
            .style(|_theme: &Theme| container::Style {
                background: Some(iced::Background::Color(palette::GRAY_100)),
                ..Default::default()
            })
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::media::RawImage;

    fn data() -> ImageData {
        ImageData::from_raw(RawImage::solid(2, 2, [9, 9, 9, 255]).expect("valid"))
    }

    #[test]
    fn deferred_waits_for_visibility() {
        let mut image = LazyImage::new("a.jpg", "ph", LoadMode::Deferred);
        assert_eq!(image.start(), Effect::Observe);
        assert!(!image.is_requested());

        let now = Instant::now();
        assert_eq!(image.update(Message::Visible, now), Effect::Fetch("a.jpg".into()));
        assert_eq!(image.update(Message::Visible, now), Effect::None);
    }

    #[test]
    fn eager_fetches_immediately() {
        let mut image = LazyImage::new("a.jpg", "ph", LoadMode::Eager);
        assert_eq!(image.start(), Effect::Fetch("a.jpg".into()));
        assert!(image.is_requested());
    }

    #[test]
    fn loaded_fades_in_and_is_terminal() {
        let t0 = Instant::now();
        let mut image =
            LazyImage::new("a.jpg", "ph", LoadMode::Eager).with_fade(Duration::from_millis(300));
        image.start();
        image.update(Message::Fetched(data()), t0);
        assert_eq!(image.opacity(t0), 0.0);
        assert!((image.opacity(t0 + Duration::from_millis(150)) - 0.5).abs() < 0.01);
        assert_eq!(image.opacity(t0 + Duration::from_millis(300)), 1.0);
        assert!(image.is_fading(t0));

        assert_eq!(image.update(Message::Failed("late".into()), t0), Effect::None);
        assert!(image.is_loaded());
    }

    #[test]
    fn failure_is_reported_exactly_once() {
        let now = Instant::now();
        let mut image = LazyImage::new("bad.jpg", "ph.png", LoadMode::Eager);
        image.start();
        let first = image.update(Message::Failed("404".into()), now);
        assert_eq!(
            first,
            Effect::Failed {
                source: "bad.jpg".into(),
                placeholder: "ph.png".into(),
                reason: "404".into(),
            }
        );
        assert_eq!(image.update(Message::Failed("again".into()), now), Effect::None);
        assert!(image.is_errored());
    }

    #[test]
    fn failing_placeholder_triggers_nothing() {
        let now = Instant::now();
        let mut image = LazyImage::new("bad.jpg", "ph.png", LoadMode::Eager);
        image.start();
        image.update(Message::Failed("404".into()), now);
        assert_eq!(image.update(Message::PlaceholderFailed, now), Effect::None);
        assert!(image.is_errored());
        assert!(image.shown().is_none());
        assert_eq!(image.update(Message::Visible, now), Effect::None);
    }

    #[test]
    fn placeholder_is_shown_after_error() {
        let now = Instant::now();
        let mut image = LazyImage::new("bad.jpg", "ph.png", LoadMode::Eager);
        image.start();
        image.update(Message::Failed("404".into()), now);
        image.update(Message::PlaceholderFetched(data()), now);
        assert!(image.shown().is_some());
        assert!(!image.is_loaded());
        assert_eq!(image.opacity(now), 1.0);
    }
}
