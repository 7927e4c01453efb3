// SPDX-License-Identifier: MPL-2.0
//! Reorderable media editor hosted by the collection form.
//!
//! Tiles are dragged with the pointer: press on a tile, release over another
//! tile to move it there. Releasing anywhere else cancels the drag.

pub mod component;
pub mod view;

pub use component::{Event, MediaEditor, Message};
pub use view::ViewContext;
