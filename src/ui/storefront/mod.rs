// SPDX-License-Identifier: MPL-2.0
//! Public storefront: a grid of collection cards and the detail view of one
//! collection.
//!
//! - [`component`] - cards, detail view, carousel routing, visibility-driven loading
//! - [`layout`] - fixed card geometry, window chrome and scroll visibility
//! - [`view`] - grid, card, detail and empty state rendering

pub mod component;
pub mod layout;
pub mod view;

pub use component::{Card, CarouselId, Detail, Event, ImageKey, Message, Storefront};
pub use layout::{GridLayout, ScrollViewport};
pub use view::ViewContext;
