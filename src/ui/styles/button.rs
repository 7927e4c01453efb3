// SPDX-License-Identifier: MPL-2.0
//! Button styles.

use crate::ui::design_tokens::{
    border, opacity,
    palette::{self, BLACK, WHITE},
    radius, shadow,
};
use iced::widget::button;
use iced::{Background, Border, Color, Theme};

fn filled(background: Color, border_color: Color, text_color: Color, lifted: bool) -> button::Style {
    button::Style {
        background: Some(Background::Color(background)),
        text_color,
        border: Border {
            color: border_color,
            width: border::WIDTH_SM,
            radius: radius::SM.into(),
        },
        shadow: if lifted { shadow::MD } else { shadow::SM },
        snap: true,
    }
}

fn disabled_style(theme: &Theme) -> button::Style {
    let background = if matches!(theme, Theme::Light) {
        palette::GRAY_200
    } else {
        palette::GRAY_700
    };
    button::Style {
        background: Some(Background::Color(background)),
        text_color: palette::GRAY_400,
        border: Border {
            color: palette::GRAY_400,
            width: border::WIDTH_SM,
            radius: radius::SM.into(),
        },
        shadow: shadow::NONE,
        snap: true,
    }
}

/// Main action: save, add collection, send inquiry.
pub fn primary(theme: &Theme, status: button::Status) -> button::Style {
    match status {
        button::Status::Active | button::Status::Pressed => {
            filled(palette::PRIMARY_500, palette::PRIMARY_700, WHITE, false)
        }
        button::Status::Hovered => filled(palette::PRIMARY_700, palette::PRIMARY_500, WHITE, true),
        button::Status::Disabled => disabled_style(theme),
    }
}

/// Secondary action: cancel, edit, crop.
pub fn secondary(theme: &Theme, status: button::Status) -> button::Style {
    let (background, text_color) = if matches!(theme, Theme::Light) {
        (palette::GRAY_100, palette::GRAY_900)
    } else {
        (palette::GRAY_700, WHITE)
    };
    match status {
        button::Status::Active | button::Status::Pressed => {
            filled(background, palette::GRAY_400, text_color, false)
        }
        button::Status::Hovered => filled(background, palette::PRIMARY_500, text_color, true),
        button::Status::Disabled => disabled_style(theme),
    }
}

/// Destructive action: delete collection, delete invitation, remove media.
pub fn danger(theme: &Theme, status: button::Status) -> button::Style {
    match status {
        button::Status::Active | button::Status::Pressed => {
            filled(palette::ERROR_500, palette::ERROR_500, WHITE, false)
        }
        button::Status::Hovered => filled(palette::ERROR_500, WHITE, WHITE, true),
        button::Status::Disabled => disabled_style(theme),
    }
}

/// Round translucent button drawn on top of media (arrows, play, mute).
pub fn overlay(_theme: &Theme, status: button::Status) -> button::Style {
    let alpha = match status {
        button::Status::Hovered => opacity::OVERLAY_STRONG,
        button::Status::Pressed => opacity::OPAQUE,
        button::Status::Active => opacity::OVERLAY_MEDIUM,
        button::Status::Disabled => opacity::OVERLAY_SUBTLE,
    };
    button::Style {
        background: Some(Background::Color(Color { a: alpha, ..BLACK })),
        text_color: WHITE,
        border: Border {
            radius: radius::FULL.into(),
            ..Default::default()
        },
        shadow: shadow::SM,
        snap: true,
    }
}

/// Carousel position dot. The active dot is wider and opaque.
pub fn dot(active: bool) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |_theme: &Theme, status: button::Status| {
        let alpha = if active || matches!(status, button::Status::Hovered) {
            opacity::OPAQUE
        } else {
            opacity::MUTED
        };
        button::Style {
            background: Some(Background::Color(Color { a: alpha, ..WHITE })),
            text_color: WHITE,
            border: Border {
                radius: radius::FULL.into(),
                ..Default::default()
            },
            shadow: shadow::NONE,
            snap: true,
        }
    }
}

/// Text-only button used for inline links such as "copy link".
pub fn link(theme: &Theme, status: button::Status) -> button::Style {
    let color = theme.extended_palette().primary.base.color;
    button::Style {
        background: None,
        text_color: match status {
            button::Status::Hovered | button::Status::Pressed => palette::PRIMARY_700,
            button::Status::Disabled => palette::GRAY_400,
            button::Status::Active => color,
        },
        border: Border::default(),
        shadow: shadow::NONE,
        snap: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_uses_brand_color() {
        let style = primary(&Theme::Dark, button::Status::Active);
        assert_eq!(
            style.background,
            Some(Background::Color(palette::PRIMARY_500))
        );
    }

    #[test]
    fn disabled_buttons_drop_shadow() {
        for style in [
            primary(&Theme::Light, button::Status::Disabled),
            danger(&Theme::Light, button::Status::Disabled),
        ] {
            assert_eq!(style.shadow, shadow::NONE);
            assert_eq!(style.text_color, palette::GRAY_400);
        }
    }

    #[test]
    fn overlay_darkens_on_hover() {
        let normal = overlay(&Theme::Dark, button::Status::Active);
        let hover = overlay(&Theme::Dark, button::Status::Hovered);
        assert_ne!(normal.background, hover.background);
    }

    #[test]
    fn inactive_dot_is_muted() {
        let style = dot(false)(&Theme::Light, button::Status::Active);
        assert_eq!(
            style.background,
            Some(Background::Color(Color {
                a: opacity::MUTED,
                ..WHITE
            }))
        );
    }
}
