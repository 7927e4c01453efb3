// SPDX-License-Identifier: MPL-2.0
//! Tile grid for the media editor.

use super::component::{MediaEditor, Message};
use crate::domain::media::{MediaEntry, MediaKind};
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, container, mouse_area, stack, text, Column, Row};
use iced::{alignment, Element, Length, Theme};
use std::time::Instant;

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub now: Instant,
}

pub fn view<'a>(editor: &'a MediaEditor, ctx: &ViewContext<'a>) -> Element<'a, Message> {
    if editor.list().is_empty() {
        return container(
            text(ctx.i18n.tr("media-editor-empty"))
                .size(typography::BODY_SM)
                .color(palette::GRAY_400),
        )
        .width(Length::Fill)
        .padding(spacing::MD)
        .align_x(alignment::Horizontal::Center)
        .style(styles::container::media_frame)
        .into();
    }

    let tiles = Row::with_children(
        editor
            .list()
            .iter()
            .enumerate()
            .map(|(position, entry)| tile(editor, position, entry, ctx)),
    )
    .spacing(spacing::SM)
    .wrap();

    let hint = text(ctx.i18n.tr("media-editor-reorder-hint"))
        .size(typography::CAPTION)
        .color(palette::GRAY_400);

    mouse_area(Column::new().spacing(spacing::XS).push(tiles).push(hint))
        .on_release(Message::Released)
        .into()
}

fn tile<'a>(
    editor: &'a MediaEditor,
    position: usize,
    entry: &'a MediaEntry,
    ctx: &ViewContext<'a>,
) -> Element<'a, Message> {
    let size = Length::Fixed(sizing::MEDIA_TILE);
    let id = entry.id;

    let media: Element<'a, Message> = match editor.thumbnail(id) {
        Some(image) => image.view(size, size, ctx.now),
        None => container(
            text(ctx.i18n.tr("carousel-video-label"))
                .size(typography::CAPTION)
                .color(palette::GRAY_200),
        )
        .width(size)
        .height(size)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .style(|_theme: &Theme| container::Style {
            background: Some(iced::Background::Color(palette::GRAY_900)),
            ..Default::default()
        })
        .into(),
    };

    let mut layers = stack![media];
    if position == 0 {
        layers = layers.push(
            container(
                container(text(ctx.i18n.tr("media-editor-primary")).size(typography::CAPTION))
                    .padding([spacing::XXS, spacing::XS])
                    .style(styles::container::badge(palette::PRIMARY_500)),
            )
            .padding(spacing::XXS),
        );
    }

    let frame_style: fn(&Theme) -> container::Style = if editor.drop_target() == Some(id) {
        styles::container::drop_target
    } else {
        styles::container::card
    };
    let frame = container(layers)
        .padding(spacing::XXS)
        .clip(true)
        .style(frame_style);

    let draggable = mouse_area(frame)
        .on_press(Message::TilePressed(id))
        .on_enter(Message::TileEntered(id))
        .on_exit(Message::TileExited(id));

    let mut actions = Row::new().spacing(spacing::XXS);
    if entry.kind == MediaKind::Image {
        actions = actions.push(
            button(text(ctx.i18n.tr("media-editor-crop")).size(typography::CAPTION))
                .padding([spacing::XXS, spacing::XS])
                .style(styles::button::secondary)
                .on_press(Message::Crop(id)),
        );
    }
    actions = actions.push(
        button(text(ctx.i18n.tr("media-editor-remove")).size(typography::CAPTION))
            .padding([spacing::XXS, spacing::XS])
            .style(styles::button::danger)
            .on_press(Message::Remove(id)),
    );

    let dragging = editor.drag_source() == Some(id);
    let caption = text(format!("#{}", position + 1))
        .size(typography::CAPTION)
        .color(if dragging {
            palette::ACCENT_500
        } else {
            palette::GRAY_400
        });

    Column::new()
        .spacing(spacing::XXS)
        .width(Length::Fixed(sizing::MEDIA_TILE + spacing::XS))
        .push(draggable)
        .push(caption)
        .push(actions)
        .into()
}
