// SPDX-License-Identifier: MPL-2.0
//! Container styles.

use crate::ui::design_tokens::{border, opacity, palette, radius, shadow};
use iced::widget::container;
use iced::{Background, Border, Color, Theme};

/// Panel surface for the admin forms and dialogs.
///
/// Derived from the theme background so it stays readable in both modes.
pub fn panel(theme: &Theme) -> container::Style {
    let base = theme.extended_palette().background.weak.color;
    container::Style {
        background: Some(Background::Color(base)),
        border: Border {
            radius: radius::LG.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Storefront card and admin list row.
pub fn card(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();
    container::Style {
        background: Some(Background::Color(palette.background.base.color)),
        text_color: Some(palette.background.base.text),
        border: Border {
            color: palette.background.strong.color,
            width: border::WIDTH_SM,
            radius: radius::LG.into(),
        },
        shadow: shadow::SM,
        ..Default::default()
    }
}

/// Media frame behind carousel items and crop previews.
pub fn media_frame(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(palette::GRAY_100)),
        border: Border {
            radius: radius::MD.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Pill-shaped label (status, category, "primary").
pub fn badge(color: Color) -> impl Fn(&Theme) -> container::Style {
    move |_theme: &Theme| container::Style {
        background: Some(Background::Color(color)),
        text_color: Some(palette::WHITE),
        border: Border {
            radius: radius::FULL.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Dimmed backdrop behind modal dialogs.
pub fn scrim(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color {
            a: opacity::OVERLAY_MEDIUM,
            ..palette::BLACK
        })),
        ..Default::default()
    }
}

/// Highlight around a media tile that is the current drop target.
pub fn drop_target(theme: &Theme) -> container::Style {
    container::Style {
        border: Border {
            color: palette::ACCENT_500,
            width: border::WIDTH_MD,
            radius: radius::MD.into(),
        },
        ..card(theme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn badge_uses_given_color() {
        let style = badge(palette::SUCCESS_500)(&Theme::Light);
        assert_eq!(
            style.background,
            Some(Background::Color(palette::SUCCESS_500))
        );
    }

    #[test]
    fn drop_target_keeps_card_background() {
        let theme = Theme::Dark;
        assert_eq!(drop_target(&theme).background, card(&theme).background);
        assert_eq!(drop_target(&theme).border.color, palette::ACCENT_500);
    }
}
