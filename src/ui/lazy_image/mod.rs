// SPDX-License-Identifier: MPL-2.0
//! Lazily fetched images.
//!
//! - [`image`] - `LazyImage` state machine and view
//! - [`observer`] - visibility registry that arms deferred images

pub mod image;
pub mod observer;

pub use image::{Effect, LazyImage, LoadMode, Message};
pub use observer::{visible_ratio, Registration, VisibilityObserver};
