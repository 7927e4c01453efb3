// SPDX-License-Identifier: MPL-2.0
//! User interface components and state management.
//!
//! Components follow the Elm-style "state down, messages up" pattern: each
//! owns its state, handles its own `Message` and reports side effects to the
//! host as an `Event` or `Effect`.
//!
//! # Screens
//!
//! - [`storefront`] - Public grid of collection cards
//! - [`admin`] - Dashboard, collection form, invitations and signup
//!
//! # Components
//!
//! - [`carousel`] - Sliding media carousel with swipe and video control
//! - [`lazy_image`] - Visibility-driven image loading with placeholder fallback
//! - [`media_editor`] - Drag-to-reorder media tiles
//! - [`cropper`] - Interactive crop dialog
//! - [`notifications`] - Toast notification system for user feedback
//!
//! # Shared Infrastructure
//!
//! - [`styles`] - Centralized styling (buttons, containers)
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)
//! - [`theming`] - Light/Dark/System theme mode management

pub mod admin;
pub mod carousel;
pub mod cropper;
pub mod design_tokens;
pub mod lazy_image;
pub mod media_editor;
pub mod notifications;
pub mod storefront;
pub mod styles;
pub mod theming;
