// SPDX-License-Identifier: MPL-2.0
//! Media carousel shown on every storefront card.
//!
//! ```text
//! component.rs (orchestrator)
//!     ├── state      - cyclic index, is_playing / is_muted
//!     ├── swipe      - horizontal gesture classification
//!     ├── animation  - eased strip position
//!     └── view       - strip, arrows, dots, video controls
//! ```

pub mod animation;
pub mod component;
pub mod state;
pub mod swipe;
pub mod view;

pub use component::{Carousel, CarouselSettings, Effect, Message, VideoCommand};
pub use state::{CarouselState, Transition};
pub use swipe::{Swipe, SwipeTracker};
