// SPDX-License-Identifier: MPL-2.0
//! Carousel rendering.

use super::animation::visible_slices;
use super::component::{Carousel, Message};
use crate::domain::media::MediaItem;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{
    button, container, image, mouse_area, stack, text, Column, Container, Row,
};
use iced::{alignment, Element, Length, Theme};
use std::time::Instant;

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub now: Instant,
    pub width: f32,
    pub height: f32,
}

pub fn view<'a>(carousel: &'a Carousel, ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let state = carousel.state();
    if state.is_empty() {
        return container(
            text(ctx.i18n.tr("carousel-no-media"))
                .size(typography::BODY)
                .color(palette::GRAY_400),
        )
        .width(Length::Fixed(ctx.width))
        .height(Length::Fixed(ctx.height))
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .style(styles::container::media_frame)
        .into();
    }

    let strip = Row::with_children(
        visible_slices(carousel.strip_position(ctx.now), state.len())
            .into_iter()
            .map(|slice| {
                let align = if slice.anchored_right {
                    alignment::Horizontal::Right
                } else {
                    alignment::Horizontal::Left
                };
                Container::new(item_view(carousel, slice.index, ctx))
                    .width(Length::Fixed(ctx.width * slice.fraction))
                    .height(Length::Fixed(ctx.height))
                    .align_x(align)
                    .clip(true)
                    .into()
            }),
    );

    let mut layers = stack![strip]
        .width(Length::Fixed(ctx.width))
        .height(Length::Fixed(ctx.height));

    if carousel.current_item().is_some_and(MediaItem::is_video) {
        layers = layers.push(video_controls(carousel));
    }
    if state.has_navigation() {
        layers = layers.push(navigation_controls(carousel));
    }

    mouse_area(
        container(layers)
            .clip(true)
            .style(styles::container::media_frame),
    )
    .on_move(Message::PointerMoved)
    .on_press(Message::PointerPressed)
    .on_release(Message::PointerReleased)
    .on_exit(Message::PointerLeft)
    .into()
}

fn item_view<'a>(carousel: &'a Carousel, index: usize, ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let width = Length::Fixed(ctx.width);
    let height = Length::Fixed(ctx.height);

    if let Some(lazy) = carousel.image(index) {
        return lazy.view(width, height, ctx.now);
    }

    if let Some(frame) = carousel.frame(index) {
        return container(
            image(frame.clone())
                .width(width)
                .height(height)
                .content_fit(iced::ContentFit::Contain),
        )
        .width(width)
        .height(height)
        .style(|_theme: &Theme| container::Style {
            background: Some(iced::Background::Color(palette::GRAY_900)),
            ..Default::default()
        })
        .into();
    }

    // Video poster
    container(
        text(ctx.i18n.tr("carousel-video-label"))
            .size(typography::CAPTION)
            .color(palette::GRAY_200),
    )
    .width(width)
    .height(height)
    .padding(spacing::SM)
    .align_x(alignment::Horizontal::Center)
    .align_y(alignment::Vertical::Top)
    .style(|_theme: &Theme| container::Style {
        background: Some(iced::Background::Color(palette::GRAY_900)),
        ..Default::default()
    })
    .into()
}

fn round_button<'a>(glyph: &'static str, message: Message, size: f32) -> Element<'a, Message> {
    button(
        container(text(glyph).size(typography::BODY))
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(alignment::Horizontal::Center)
            .align_y(alignment::Vertical::Center),
    )
    .width(Length::Fixed(size))
    .height(Length::Fixed(size))
    .padding(0)
    .on_press(message)
    .style(styles::button::overlay)
    .into()
}

fn video_controls(carousel: &Carousel) -> Element<'_, Message> {
    let state = carousel.state();
    let play_glyph = if state.is_playing() { "❚❚" } else { "▶" };
    let mute_glyph = if state.is_muted() { "🔇" } else { "🔊" };

    let center = container(round_button(
        play_glyph,
        Message::TogglePlayPause,
        sizing::ICON_LG * 1.5,
    ))
    .width(Length::Fill)
    .height(Length::Fill)
    .align_x(alignment::Horizontal::Center)
    .align_y(alignment::Vertical::Center);

    let mute = container(round_button(
        mute_glyph,
        Message::ToggleMute,
        sizing::CAROUSEL_ARROW,
    ))
    .width(Length::Fill)
    .height(Length::Fill)
    .padding(spacing::XS)
    .align_x(alignment::Horizontal::Left)
    .align_y(alignment::Vertical::Bottom);

    stack![center, mute].into()
}

fn navigation_controls(carousel: &Carousel) -> Element<'_, Message> {
    let state = carousel.state();
    let current = state.current_index();

    let arrows = Row::new()
        .push(
            container(round_button("‹", Message::Previous, sizing::CAROUSEL_ARROW))
                .width(Length::Fill)
                .align_x(alignment::Horizontal::Left),
        )
        .push(
            container(round_button("›", Message::Next, sizing::CAROUSEL_ARROW))
                .width(Length::Fill)
                .align_x(alignment::Horizontal::Right),
        )
        .padding(spacing::XS)
        .align_y(alignment::Vertical::Center);

    let dots = Row::with_children((0..state.len()).map(|index| {
        let active = current == Some(index);
        let width = if active {
            sizing::CAROUSEL_DOT_ACTIVE
        } else {
            sizing::CAROUSEL_DOT
        };
        button(text(""))
            .width(Length::Fixed(width))
            .height(Length::Fixed(sizing::CAROUSEL_DOT))
            .padding(0)
            .on_press(Message::GoTo(index))
            .style(styles::button::dot(active))
            .into()
    }))
    .spacing(spacing::XXS);

    Column::new()
        .push(
            container(arrows)
                .width(Length::Fill)
                .height(Length::Fill)
                .align_y(alignment::Vertical::Center),
        )
        .push(
            container(dots)
                .width(Length::Fill)
                .padding(spacing::XS)
                .align_x(alignment::Horizontal::Right),
        )
        .into()
}
