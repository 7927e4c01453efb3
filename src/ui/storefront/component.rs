// SPDX-License-Identifier: MPL-2.0
//! Storefront state: one card per collection, each with its own carousel,
//! the detail view of one collection and the visibility observer shared by
//! all deferred carousel images.

use super::layout::{GridLayout, ScrollViewport};
use crate::application::inquiry::InquiryTemplate;
use crate::domain::catalog::Collection;
use crate::domain::ids::CollectionId;
use crate::domain::video::PlaybackFailure;
use crate::ui::carousel::{self, Carousel, CarouselSettings, VideoCommand};
use crate::ui::lazy_image::{self, Registration, VisibilityObserver};
use iced::Size;
use std::collections::HashMap;
use std::time::Instant;

/// A carousel on the storefront: the one on a card or the one in the detail
/// view of the same collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CarouselId {
    Card(CollectionId),
    Detail(CollectionId),
}

impl CarouselId {
    #[must_use]
    pub fn collection(self) -> CollectionId {
        match self {
            Self::Card(id) | Self::Detail(id) => id,
        }
    }
}

/// A carousel image across the whole storefront.
pub type ImageKey = (CarouselId, usize);

#[derive(Debug, Clone)]
pub struct Card {
    collection: Collection,
    carousel: Carousel,
    inquiry_link: Option<String>,
}

impl Card {
    #[must_use]
    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    #[must_use]
    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    #[must_use]
    pub fn inquiry_link(&self) -> Option<&str> {
        self.inquiry_link.as_deref()
    }
}

/// Large view of one collection, opened from its card.
#[derive(Debug, Clone)]
pub struct Detail {
    id: CollectionId,
    carousel: Carousel,
}

impl Detail {
    #[must_use]
    pub fn id(&self) -> CollectionId {
        self.id
    }

    #[must_use]
    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    Carousel {
        id: CarouselId,
        message: carousel::Message,
    },
    Inquire(CollectionId),
    OpenDetail(CollectionId),
    CloseDetail,
    Scrolled(ScrollViewport),
    WindowResized(Size),
    Tick(Instant),
}

/// Work for the host.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Video {
        id: CarouselId,
        commands: Vec<VideoCommand>,
    },
    FetchImage {
        key: ImageKey,
        url: String,
    },
    /// Raised once per failing image; the host fetches the placeholder.
    ImageFailed {
        key: ImageKey,
        placeholder: String,
        reason: String,
    },
    PlaybackFailed(PlaybackFailure),
    OpenLink(String),
    DetailOpened(CollectionId),
}

#[derive(Debug, Clone)]
pub struct Storefront {
    cards: Vec<Card>,
    detail: Option<Detail>,
    settings: CarouselSettings,
    placeholder: String,
    observer: VisibilityObserver<ImageKey>,
    registrations: HashMap<CarouselId, Vec<Registration>>,
    viewport: ScrollViewport,
    failed_images: usize,
}

impl Storefront {
    #[must_use]
    pub fn new(settings: CarouselSettings, placeholder: impl Into<String>, threshold: f32) -> Self {
        Self {
            cards: Vec::new(),
            detail: None,
            settings,
            placeholder: placeholder.into(),
            observer: VisibilityObserver::new(threshold),
            registrations: HashMap::new(),
            viewport: ScrollViewport::default(),
            failed_images: 0,
        }
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[must_use]
    pub fn card(&self, id: CollectionId) -> Option<&Card> {
        self.cards.iter().find(|card| card.collection.id == id)
    }

    /// The open detail view and the card it belongs to.
    #[must_use]
    pub fn detail(&self) -> Option<(&Detail, &Card)> {
        let detail = self.detail.as_ref()?;
        Some((detail, self.card(detail.id)?))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn failed_images(&self) -> usize {
        self.failed_images
    }

    #[must_use]
    pub fn pending_observations(&self) -> usize {
        self.observer.len()
    }

    #[must_use]
    pub fn viewport(&self) -> ScrollViewport {
        self.viewport
    }

    #[must_use]
    pub fn is_animating(&self, now: Instant) -> bool {
        self.cards.iter().any(|card| card.carousel.is_animating(now))
            || self
                .detail
                .as_ref()
                .is_some_and(|detail| detail.carousel.is_animating(now))
    }

    /// Replaces the catalog shown. Videos of the old cards are stopped.
    pub fn set_collections(
        &mut self,
        collections: Vec<Collection>,
        inquiry: &InquiryTemplate<'_>,
        now: Instant,
    ) -> Vec<Event> {
        let mut events = self.shutdown();
        self.detail = None;
        for registration in std::mem::take(&mut self.registrations)
            .into_values()
            .flatten()
        {
            self.observer.unregister(registration);
        }

        self.cards = collections
            .into_iter()
            .map(|collection| Card {
                carousel: Carousel::new(
                    collection.media_sequence(),
                    &self.placeholder,
                    self.settings,
                ),
                inquiry_link: inquiry.link_for(&collection),
                collection,
            })
            .collect();

        let mut started = Vec::new();
        for card in &mut self.cards {
            let id = CarouselId::Card(card.collection.id);
            for (index, effect) in card.carousel.start() {
                started.push(((id, index), effect));
            }
        }
        for (key, effect) in started {
            self.route_image_effect(key, effect, &mut events);
        }
        events.extend(self.check_visibility(now));
        events
    }

    pub fn update(&mut self, message: Message, now: Instant) -> Vec<Event> {
        match message {
            Message::Carousel { id, message } => {
                let Some(carousel) = self.carousel_mut(id) else {
                    return Vec::new();
                };
                let effect = carousel.handle(message, now);
                let mut events = Vec::new();
                match effect {
                    carousel::Effect::None => {}
                    carousel::Effect::Video(commands) => {
                        events.push(Event::Video { id, commands });
                    }
                    carousel::Effect::Image { index, effect } => {
                        self.route_image_effect((id, index), effect, &mut events);
                    }
                    carousel::Effect::PlaybackFailed(failure) => {
                        events.push(Event::PlaybackFailed(failure));
                    }
                }
                events.extend(self.check_visibility(now));
                events
            }
            Message::Inquire(id) => self
                .card(id)
                .and_then(|card| card.inquiry_link.clone())
                .map(Event::OpenLink)
                .into_iter()
                .collect(),
            Message::OpenDetail(id) => self.open_detail(id, now),
            Message::CloseDetail => self.close_detail(),
            Message::Scrolled(viewport) => {
                self.viewport = viewport;
                self.check_visibility(now)
            }
            Message::WindowResized(size) => {
                self.viewport = ScrollViewport::in_window(size, self.viewport.top);
                self.check_visibility(now)
            }
            Message::Tick(now) => {
                for card in &mut self.cards {
                    card.carousel.handle(carousel::Message::Tick(now), now);
                }
                if let Some(detail) = self.detail.as_mut() {
                    detail.carousel.handle(carousel::Message::Tick(now), now);
                }
                self.check_visibility(now)
            }
        }
    }

    /// Delivers a fetch result to the carousel image behind `key`.
    pub fn deliver_image(
        &mut self,
        key: ImageKey,
        message: lazy_image::Message,
        now: Instant,
    ) -> Vec<Event> {
        let (id, index) = key;
        self.update(
            Message::Carousel {
                id,
                message: carousel::Message::Image { index, message },
            },
            now,
        )
    }

    /// Commands that silence every carousel, e.g. when leaving the storefront.
    pub fn shutdown(&mut self) -> Vec<Event> {
        let detail = self.detail.as_mut().map(|detail| {
            (CarouselId::Detail(detail.id), detail.carousel.shutdown())
        });
        self.cards
            .iter_mut()
            .map(|card| {
                (
                    CarouselId::Card(card.collection.id),
                    card.carousel.shutdown(),
                )
            })
            .chain(detail)
            .filter(|(_, commands)| !commands.is_empty())
            .map(|(id, commands)| Event::Video { id, commands })
            .collect()
    }

    fn carousel_mut(&mut self, id: CarouselId) -> Option<&mut Carousel> {
        match id {
            CarouselId::Card(collection) => self
                .cards
                .iter_mut()
                .find(|card| card.collection.id == collection)
                .map(|card| &mut card.carousel),
            CarouselId::Detail(collection) => self
                .detail
                .as_mut()
                .filter(|detail| detail.id == collection)
                .map(|detail| &mut detail.carousel),
        }
    }

    /// Opens the detail view on the item the card shows. The card's video is
    /// stopped; only one carousel of a collection plays at a time.
    fn open_detail(&mut self, id: CollectionId, now: Instant) -> Vec<Event> {
        if self.detail.as_ref().is_some_and(|detail| detail.id == id) {
            return Vec::new();
        }
        let mut events = self.close_detail();
        let Some(card) = self.cards.iter_mut().find(|card| card.collection.id == id) else {
            return events;
        };

        let commands = card.carousel.shutdown();
        if !commands.is_empty() {
            events.push(Event::Video {
                id: CarouselId::Card(id),
                commands,
            });
        }

        let mut carousel = Carousel::new(
            card.collection.media_sequence(),
            &self.placeholder,
            self.settings,
        );
        let started = carousel.start();
        if let Some(index) = card.carousel.state().current_index() {
            carousel.jump_to(index);
        }
        self.detail = Some(Detail { id, carousel });

        for (index, effect) in started {
            self.route_image_effect((CarouselId::Detail(id), index), effect, &mut events);
        }
        events.push(Event::DetailOpened(id));
        events.extend(self.check_visibility(now));
        events
    }

    fn close_detail(&mut self) -> Vec<Event> {
        let Some(mut detail) = self.detail.take() else {
            return Vec::new();
        };
        let id = CarouselId::Detail(detail.id);
        for registration in self.registrations.remove(&id).unwrap_or_default() {
            self.observer.unregister(registration);
        }
        let commands = detail.carousel.shutdown();
        if commands.is_empty() {
            Vec::new()
        } else {
            vec![Event::Video { id, commands }]
        }
    }

    fn route_image_effect(&mut self, key: ImageKey, effect: lazy_image::Effect, events: &mut Vec<Event>) {
        match effect {
            lazy_image::Effect::None => {}
            lazy_image::Effect::Observe => {
                let registration = self.observer.register(key);
                self.registrations.entry(key.0).or_default().push(registration);
            }
            lazy_image::Effect::Fetch(url) => events.push(Event::FetchImage { key, url }),
            lazy_image::Effect::Failed {
                source,
                placeholder,
                reason,
            } => {
                self.failed_images += 1;
                log::warn!("image {source} failed to load ({reason}), showing placeholder");
                events.push(Event::ImageFailed {
                    key,
                    placeholder,
                    reason,
                });
            }
        }
    }

    /// Reports the visible ratio of every carousel image in the strip window
    /// and arms the ones that crossed the threshold. The detail view covers
    /// the grid and is always fully visible.
    fn check_visibility(&mut self, now: Instant) -> Vec<Event> {
        if self.observer.is_empty() {
            return Vec::new();
        }
        let layout = GridLayout::for_width(self.viewport.width);
        let mut reports = Vec::new();
        for (position, card) in self.cards.iter().enumerate() {
            let ratio = layout.media_visibility(position, &self.viewport);
            if ratio <= 0.0 {
                continue;
            }
            let id = CarouselId::Card(card.collection.id);
            reports.extend(
                shown_indices(&card.carousel, now)
                    .into_iter()
                    .map(|index| ((id, index), ratio)),
            );
        }
        if let Some(detail) = &self.detail {
            let id = CarouselId::Detail(detail.id);
            reports.extend(
                shown_indices(&detail.carousel, now)
                    .into_iter()
                    .map(|index| ((id, index), 1.0)),
            );
        }

        let fired = self.observer.report_all(reports);
        let mut events = Vec::new();
        for key in fired {
            let (id, index) = key;
            let Some(carousel) = self.carousel_mut(id) else {
                continue;
            };
            let effect = carousel.handle(
                carousel::Message::Image {
                    index,
                    message: lazy_image::Message::Visible,
                },
                now,
            );
            if let carousel::Effect::Image { effect, .. } = effect {
                self.route_image_effect(key, effect, &mut events);
            }
        }
        events
    }
}

/// Items in the strip window plus the current one.
fn shown_indices(carousel: &Carousel, now: Instant) -> Vec<usize> {
    let mut indices = carousel.visible_indices(now);
    if let Some(current) = carousel.state().current_index() {
        if !indices.contains(&current) {
            indices.push(current);
        }
    }
    indices
}
