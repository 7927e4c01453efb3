// SPDX-License-Identifier: MPL-2.0
//! Design tokens for the storefront and admin screens.
//!
//! - **Palette**: boutique brand colors and semantic colors
//! - **Opacity**: overlay levels
//! - **Spacing**: 8px grid
//! - **Sizing**: cards, carousel, crop viewport, media tiles
//! - **Typography**, **Border**, **Radius**, **Shadow**
//!
//! ```
//! use boutique_showcase::ui::design_tokens::{opacity, palette, spacing};
//! use iced::Color;
//!
//! let scrim = Color { a: opacity::OVERLAY_STRONG, ..palette::BLACK };
//! let padding = spacing::MD;
//! # let _ = (scrim, padding);
//! ```

use iced::Color;

pub mod palette {
    use super::Color;

    pub const BLACK: Color = Color::BLACK;
    pub const WHITE: Color = Color::WHITE;
    pub const GRAY_900: Color = Color::from_rgb(0.12, 0.1, 0.1);
    pub const GRAY_700: Color = Color::from_rgb(0.32, 0.29, 0.28);
    pub const GRAY_400: Color = Color::from_rgb(0.45, 0.42, 0.41);
    pub const GRAY_200: Color = Color::from_rgb(0.78, 0.75, 0.73);
    pub const GRAY_100: Color = Color::from_rgb(0.92, 0.89, 0.86);

    // Brand: deep maroon with a gold accent
    pub const PRIMARY_100: Color = Color::from_rgb(0.98, 0.9, 0.91);
    pub const PRIMARY_300: Color = Color::from_rgb(0.85, 0.5, 0.56);
    pub const PRIMARY_500: Color = Color::from_rgb(0.62, 0.13, 0.24);
    pub const PRIMARY_700: Color = Color::from_rgb(0.45, 0.07, 0.16);
    pub const ACCENT_500: Color = Color::from_rgb(0.83, 0.66, 0.27);

    pub const ERROR_500: Color = Color::from_rgb(0.898, 0.224, 0.208);
    pub const WARNING_500: Color = Color::from_rgb(0.945, 0.651, 0.125);
    pub const SUCCESS_500: Color = Color::from_rgb(0.263, 0.702, 0.404);
    pub const INFO_500: Color = Color::from_rgb(0.392, 0.588, 1.0);
}

pub mod opacity {
    pub const TRANSPARENT: f32 = 0.0;
    pub const OVERLAY_SUBTLE: f32 = 0.2;
    pub const OVERLAY_MEDIUM: f32 = 0.5;
    pub const OVERLAY_STRONG: f32 = 0.7;
    pub const OPAQUE: f32 = 1.0;
    /// Inactive carousel dots and disabled controls.
    pub const MUTED: f32 = 0.45;
}

pub mod spacing {
    pub const XXS: f32 = 4.0;
    pub const XS: f32 = 8.0;
    pub const SM: f32 = 12.0;
    pub const MD: f32 = 16.0;
    pub const LG: f32 = 24.0;
    pub const XL: f32 = 32.0;
    pub const XXL: f32 = 48.0;
}

pub mod sizing {
    pub const ICON_SM: f32 = 16.0;
    pub const ICON_MD: f32 = 24.0;
    pub const ICON_LG: f32 = 32.0;

    pub const BUTTON_HEIGHT: f32 = 36.0;
    pub const INPUT_HEIGHT: f32 = 40.0;
    pub const TOAST_WIDTH: f32 = 320.0;

    /// Storefront card width; the carousel inside uses a 3:4 frame.
    pub const CARD_WIDTH: f32 = 300.0;
    pub const CARD_MEDIA_HEIGHT: f32 = 400.0;
    /// Total card height used for visibility estimates.
    pub const CARD_HEIGHT: f32 = 560.0;

    pub const CAROUSEL_DOT: f32 = 8.0;
    pub const CAROUSEL_DOT_ACTIVE: f32 = 20.0;
    pub const CAROUSEL_ARROW: f32 = 32.0;

    /// Carousel frame of the collection detail view, 3:4 like the cards.
    pub const DETAIL_MEDIA_WIDTH: f32 = 420.0;
    pub const DETAIL_MEDIA_HEIGHT: f32 = 560.0;
    pub const DETAIL_TEXT_WIDTH: f32 = 360.0;

    pub const VISIT_LOG_HEIGHT: f32 = 240.0;

    pub const MEDIA_TILE: f32 = 120.0;
    pub const DIALOG_WIDTH: f32 = 640.0;
    pub const CROP_DIALOG_WIDTH: f32 = 520.0;
}

pub mod typography {
    pub const TITLE_LG: f32 = 30.0;
    pub const TITLE_MD: f32 = 20.0;
    pub const TITLE_SM: f32 = 18.0;
    pub const BODY_LG: f32 = 16.0;
    pub const BODY: f32 = 14.0;
    pub const BODY_SM: f32 = 13.0;
    pub const CAPTION: f32 = 12.0;
}

pub mod border {
    pub const WIDTH_SM: f32 = 1.0;
    pub const WIDTH_MD: f32 = 2.0;
}

pub mod radius {
    pub const NONE: f32 = 0.0;
    pub const SM: f32 = 4.0;
    pub const MD: f32 = 8.0;
    pub const LG: f32 = 12.0;
    pub const FULL: f32 = 9999.0;
}

pub mod shadow {
    use super::palette;
    use iced::{Shadow, Vector};

    pub const NONE: Shadow = Shadow {
        color: palette::BLACK,
        offset: Vector::ZERO,
        blur_radius: 0.0,
    };

    pub const SM: Shadow = Shadow {
        color: palette::BLACK,
        offset: Vector { x: 0.0, y: 2.0 },
        blur_radius: 4.0,
    };

    pub const MD: Shadow = Shadow {
        color: palette::BLACK,
        offset: Vector { x: 0.0, y: 4.0 },
        blur_radius: 8.0,
    };
}

const _: () = {
    assert!(spacing::XS > 0.0);
    assert!(spacing::SM > spacing::XS);
    assert!(spacing::MD > spacing::SM);
    assert!(spacing::LG > spacing::MD);

    assert!(opacity::TRANSPARENT == 0.0);
    assert!(opacity::OPAQUE == 1.0);
    assert!(opacity::MUTED > 0.0 && opacity::MUTED < 1.0);

    assert!(sizing::CARD_HEIGHT > sizing::CARD_MEDIA_HEIGHT);
    assert!(sizing::CAROUSEL_DOT_ACTIVE > sizing::CAROUSEL_DOT);

    assert!(typography::TITLE_LG > typography::TITLE_MD);
    assert!(typography::BODY > typography::CAPTION);
    assert!(border::WIDTH_MD > border::WIDTH_SM);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spacing_scale_is_consistent() {
        assert_eq!(spacing::MD, spacing::XS * 2.0);
        assert_eq!(spacing::LG, spacing::MD * 1.5);
    }

    #[test]
    fn card_media_keeps_three_by_four() {
        assert!((sizing::CARD_WIDTH / sizing::CARD_MEDIA_HEIGHT - 0.75).abs() < f32::EPSILON);
    }
}
