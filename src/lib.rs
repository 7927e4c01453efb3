// SPDX-License-Identifier: MPL-2.0
//! `boutique_showcase` is a clothing boutique storefront with a catalog admin,
//! built with the Iced GUI framework.
//!
//! Shoppers browse collections in a grid of cards, each with a swipeable
//! media carousel that plays product videos and lazily loads photos.
//! Administrators maintain the catalog: they upload media, reorder it by drag
//! and drop, crop photos to a fixed aspect ratio and invite other admins.
//!
//! # Layers
//!
//! - [`domain`]: catalog, media references and invitation rules
//! - [`application`]: ports and use cases
//! - [`infrastructure`]: file-backed adapters for the ports
//! - [`media`]: decoding, caching and crop rasterization
//! - [`ui`]: Iced components
//! - [`video_player`]: FFmpeg decoding and audio output for carousel videos
//! - [`app`]: the application shell wiring it all together

pub mod app;
pub mod application;
pub mod domain;
pub mod error;
pub mod i18n;
pub mod infrastructure;
pub mod media;
pub mod ui;
pub mod video_player;
