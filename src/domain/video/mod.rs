// SPDX-License-Identifier: MPL-2.0
//! Video playback domain types.
//!
//! This module contains video-related value objects and enums that are
//! independent of any presentation or infrastructure concerns.

pub mod frame;
pub mod playback;

pub use frame::VideoFrame;
pub use playback::{PlaybackEvent, PlaybackFailure};
