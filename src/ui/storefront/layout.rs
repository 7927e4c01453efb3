// SPDX-License-Identifier: MPL-2.0
//! Grid geometry of the storefront.
//!
//! Cards have a fixed size, so the position of every carousel frame can be
//! computed from the scroll offset without measuring widgets. The page chrome
//! above the grid has fixed heights too, which gives the grid viewport from
//! the window size alone.

use crate::ui::design_tokens::{sizing, spacing};
use crate::ui::lazy_image::visible_ratio;
use iced::Size;

/// Visible part of the scrollable grid, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollViewport {
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for ScrollViewport {
    fn default() -> Self {
        Self {
            top: 0.0,
            width: 1280.0,
            height: 800.0,
        }
    }
}

impl ScrollViewport {
    /// Grid viewport of a window of `window` size, keeping the scroll offset.
    #[must_use]
    pub fn in_window(window: Size, top: f32) -> Self {
        Self {
            top,
            width: (window.width - CHROME_WIDTH).max(0.0),
            height: (window.height - CHROME_HEIGHT).max(0.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub columns: usize,
}

/// Padding around the storefront page.
pub const PAGE_PADDING: f32 = spacing::LG;
/// Spacing between header, subtitle and grid.
pub const PAGE_SPACING: f32 = spacing::MD;
pub const HEADER_HEIGHT: f32 = 44.0;
pub const SUBTITLE_HEIGHT: f32 = 20.0;
/// Vertical space the page takes outside the grid viewport.
pub const CHROME_HEIGHT: f32 =
    2.0 * PAGE_PADDING + HEADER_HEIGHT + SUBTITLE_HEIGHT + 2.0 * PAGE_SPACING;
/// Horizontal space the page takes outside the grid viewport.
pub const CHROME_WIDTH: f32 = 2.0 * PAGE_PADDING;

/// Outer padding of the grid.
pub const GRID_PADDING: f32 = spacing::LG;
/// Gap between cards, both axes.
pub const GRID_GAP: f32 = spacing::LG;
/// Padding inside a card, above the carousel frame.
pub const CARD_PADDING: f32 = spacing::SM;

impl GridLayout {
    /// As many columns as fit in `width`, at least one.
    #[must_use]
    pub fn for_width(width: f32) -> Self {
        let usable = (width - 2.0 * GRID_PADDING + GRID_GAP).max(0.0);
        let columns = (usable / (sizing::CARD_WIDTH + GRID_GAP)).floor() as usize;
        Self {
            columns: columns.max(1),
        }
    }

    #[must_use]
    pub fn row_of(&self, card: usize) -> usize {
        card / self.columns
    }

    /// Top edge of the carousel frame of `card`, relative to the content.
    #[must_use]
    pub fn media_top(&self, card: usize) -> f32 {
        GRID_PADDING
            + self.row_of(card) as f32 * (sizing::CARD_HEIGHT + GRID_GAP)
            + CARD_PADDING
    }

    /// Fraction of the carousel frame of `card` inside `viewport`.
    #[must_use]
    pub fn media_visibility(&self, card: usize, viewport: &ScrollViewport) -> f32 {
        visible_ratio(
            self.media_top(card),
            sizing::CARD_MEDIA_HEIGHT,
            viewport.top,
            viewport.height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_count_follows_width() {
        assert_eq!(GridLayout::for_width(0.0).columns, 1);
        assert_eq!(GridLayout::for_width(300.0).columns, 1);
        let two = 2.0 * GRID_PADDING + 2.0 * sizing::CARD_WIDTH + GRID_GAP;
        assert_eq!(GridLayout::for_width(two).columns, 2);
        assert_eq!(GridLayout::for_width(two - 1.0).columns, 1);
    }

    #[test]
    fn cards_in_first_row_are_visible_at_top() {
        let layout = GridLayout { columns: 3 };
        let viewport = ScrollViewport {
            top: 0.0,
            width: 1000.0,
            height: 600.0,
        };
        assert_eq!(layout.media_visibility(0, &viewport), 1.0);
        assert_eq!(layout.media_visibility(2, &viewport), 1.0);
        assert_eq!(layout.media_visibility(3, &viewport), 0.0);
    }

    #[test]
    fn window_size_gives_grid_viewport() {
        let viewport = ScrollViewport::in_window(Size::new(1920.0, 1080.0), 35.0);
        assert_eq!(
            viewport,
            ScrollViewport {
                top: 35.0,
                width: 1872.0,
                height: 936.0,
            }
        );
        assert_eq!(GridLayout::for_width(viewport.width).columns, 5);

        let tiny = ScrollViewport::in_window(Size::new(10.0, 10.0), 0.0);
        assert_eq!((tiny.width, tiny.height), (0.0, 0.0));
    }

    #[test]
    fn scrolling_reveals_the_next_row() {
        let layout = GridLayout { columns: 1 };
        let viewport = ScrollViewport {
            top: layout.media_top(1) - 100.0,
            width: 400.0,
            height: 300.0,
        };
        let ratio = layout.media_visibility(1, &viewport);
        assert!((ratio - 200.0 / sizing::CARD_MEDIA_HEIGHT).abs() < 1e-4);
        assert_eq!(layout.media_visibility(0, &viewport), 0.0);
    }
}
