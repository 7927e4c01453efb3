// SPDX-License-Identifier: MPL-2.0
//! Storefront grid and detail rendering.

use super::component::{Card, CarouselId, Detail, Message, Storefront};
use super::layout::{ScrollViewport, CARD_PADDING, GRID_GAP, GRID_PADDING};
use crate::application::inquiry::group_thousands;
use crate::i18n::fluent::I18n;
use crate::ui::carousel;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, container, scrollable, text, Column, Row};
use iced::{alignment, Element, Length};
use std::time::Instant;

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub now: Instant,
    pub currency_symbol: &'a str,
}

pub fn view<'a>(storefront: &'a Storefront, ctx: &ViewContext<'a>) -> Element<'a, Message> {
    if storefront.is_empty() {
        return container(
            Column::new()
                .spacing(spacing::XS)
                .align_x(alignment::Horizontal::Center)
                .push(text(ctx.i18n.tr("storefront-empty-title")).size(typography::TITLE_MD))
                .push(
                    text(ctx.i18n.tr("storefront-empty-body"))
                        .size(typography::BODY)
                        .color(palette::GRAY_400),
                ),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .into();
    }

    let grid = Row::with_children(
        storefront
            .cards()
            .iter()
            .map(|card_state| card(card_state, ctx)),
    )
    .spacing(GRID_GAP)
    .wrap();

    scrollable(container(grid).padding(GRID_PADDING).width(Length::Fill))
        .width(Length::Fill)
        .height(Length::Fill)
        .on_scroll(|viewport| {
            let bounds = viewport.bounds();
            Message::Scrolled(ScrollViewport {
                top: viewport.absolute_offset().y,
                width: bounds.width,
                height: bounds.height,
            })
        })
        .into()
}

fn card<'a>(card: &'a Card, ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let collection = card.collection();
    let id = collection.id;

    let media = carousel::view::view(
        card.carousel(),
        &carousel::view::ViewContext {
            i18n: ctx.i18n,
            now: ctx.now,
            width: sizing::CARD_WIDTH - 2.0 * CARD_PADDING,
            height: sizing::CARD_MEDIA_HEIGHT,
        },
    )
    .map(move |message| Message::Carousel {
        id: CarouselId::Card(id),
        message,
    });

    let heading = Row::new()
        .spacing(spacing::XS)
        .align_y(alignment::Vertical::Center)
        .push(
            text(collection.name.as_str())
                .size(typography::TITLE_SM)
                .width(Length::Fill),
        )
        .push(status_badge(card, ctx));

    let category = collection.category.map_or_else(String::new, |category| {
        ctx.i18n.tr(category.i18n_key())
    });

    let details = Column::new()
        .spacing(spacing::XXS)
        .push(heading)
        .push(
            text(category)
                .size(typography::CAPTION)
                .color(palette::GRAY_400),
        )
        .push(price(card, ctx));

    let actions = Row::new()
        .spacing(spacing::XS)
        .push(inquiry_button(card, ctx))
        .push(
            button(text(ctx.i18n.tr("storefront-details")).size(typography::BODY_SM))
                .padding(spacing::XS)
                .style(styles::button::secondary)
                .on_press(Message::OpenDetail(id)),
        );

    container(
        Column::new()
            .spacing(spacing::SM)
            .push(media)
            .push(details)
            .push(
                container(actions)
                    .height(Length::Fill)
                    .align_y(alignment::Vertical::Bottom),
            ),
    )
    .width(Length::Fixed(sizing::CARD_WIDTH))
    .height(Length::Fixed(sizing::CARD_HEIGHT))
    .padding(CARD_PADDING)
    .style(styles::container::card)
    .into()
}

fn status_badge<'a>(card: &'a Card, ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let status = card.collection().status;
    let color = if status.is_sold_out() {
        palette::ERROR_500
    } else {
        palette::SUCCESS_500
    };
    container(text(ctx.i18n.tr(status.i18n_key())).size(typography::CAPTION))
        .padding([spacing::XXS, spacing::XS])
        .style(styles::container::badge(color))
        .into()
}

fn price<'a>(card: &'a Card, ctx: &ViewContext<'a>) -> Element<'a, Message> {
    text(format!(
        "{}{}",
        ctx.currency_symbol,
        group_thousands(card.collection().price)
    ))
    .size(typography::BODY_LG)
    .color(palette::PRIMARY_500)
    .into()
}

/// Messaging button, or a disabled one for sold-out collections.
fn inquiry_button<'a>(card: &'a Card, ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let key = match card.inquiry_link() {
        Some(_) => "storefront-inquire",
        None => "storefront-unavailable",
    };
    button(
        container(text(ctx.i18n.tr(key)).size(typography::BODY))
            .width(Length::Fill)
            .align_x(alignment::Horizontal::Center),
    )
    .width(Length::Fill)
    .padding(spacing::XS)
    .style(styles::button::primary)
    .on_press_maybe(
        card.inquiry_link()
            .map(|_| Message::Inquire(card.collection().id)),
    )
    .into()
}

/// The detail view of the open collection, drawn over the whole page.
pub fn detail<'a>(storefront: &'a Storefront, ctx: &ViewContext<'a>) -> Option<Element<'a, Message>> {
    let (detail, card) = storefront.detail()?;
    Some(detail_dialog(detail, card, ctx))
}

fn detail_dialog<'a>(detail: &'a Detail, card: &'a Card, ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let collection = card.collection();
    let id = CarouselId::Detail(detail.id());

    let media = carousel::view::view(
        detail.carousel(),
        &carousel::view::ViewContext {
            i18n: ctx.i18n,
            now: ctx.now,
            width: sizing::DETAIL_MEDIA_WIDTH,
            height: sizing::DETAIL_MEDIA_HEIGHT,
        },
    )
    .map(move |message| Message::Carousel { id, message });

    let close = button(text("✕").size(typography::BODY))
        .padding([spacing::XXS, spacing::XS])
        .style(styles::button::link)
        .on_press(Message::CloseDetail);

    let heading = Row::new()
        .spacing(spacing::XS)
        .align_y(alignment::Vertical::Center)
        .push(
            text(collection.name.as_str())
                .size(typography::TITLE_MD)
                .width(Length::Fill),
        )
        .push(close);

    let mut info = Column::new()
        .spacing(spacing::SM)
        .width(Length::Fixed(sizing::DETAIL_TEXT_WIDTH))
        .push(heading)
        .push(status_badge(card, ctx));
    if let Some(category) = collection.category {
        info = info.push(
            text(ctx.i18n.tr(category.i18n_key()))
                .size(typography::CAPTION)
                .color(palette::GRAY_400),
        );
    }
    let info = info
        .push(price(card, ctx))
        .push(
            scrollable(
                text(collection.description.as_str())
                    .size(typography::BODY)
                    .color(palette::GRAY_700),
            )
            .height(Length::Fill),
        )
        .push(inquiry_button(card, ctx));

    let dialog = container(
        Row::new()
            .spacing(spacing::LG)
            .push(media)
            .push(container(info).height(Length::Fixed(sizing::DETAIL_MEDIA_HEIGHT))),
    )
    .padding(spacing::LG)
    .style(styles::container::card);

    container(dialog)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .style(styles::container::scrim)
        .into()
}
