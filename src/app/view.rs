// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! This module handles the `view()` function that renders the current screen
//! based on application state, with the toast overlay stacked on top.

use super::{Message, Screen};
use crate::domain::catalog::AdminContext;
use crate::i18n::fluent::I18n;
use crate::ui::admin::{
    self, collection_form, dashboard, invitations, signup, CollectionForm, Dashboard,
    Invitations, Signup,
};
use crate::ui::design_tokens::{palette, spacing, typography};
use crate::ui::notifications::{self, Toast};
use crate::ui::storefront::{self, layout, Storefront};
use crate::ui::styles;
use chrono::Utc;
use iced::widget::{button, container, stack, text, Column, Row, Space};
use iced::{alignment, Element, Length};
use std::time::Instant;

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub screen: Screen,
    pub admin: Option<&'a AdminContext>,
    pub currency_symbol: &'a str,
    pub storefront: &'a Storefront,
    pub dashboard: &'a Dashboard,
    pub form: Option<&'a CollectionForm>,
    pub invitations: &'a Invitations,
    pub signup: &'a Signup,
    pub notifications: &'a notifications::Manager,
}

/// Renders the current application view based on the active screen.
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let now = Instant::now();
    let current_view: Element<'_, Message> = match ctx.screen {
        Screen::Storefront => view_storefront(&ctx, now),
        Screen::Signup => signup::view(ctx.signup, ctx.i18n).map(Message::Signup),
        screen => match ctx.admin.filter(|admin| admin.is_admin()) {
            Some(admin) => view_admin(&ctx, screen, admin, now),
            None => admin::access_denied(ctx.i18n, Message::Navigate(Screen::Storefront)),
        },
    };

    let toasts = Toast::view_overlay(ctx.notifications, ctx.i18n).map(Message::Notification);

    stack![
        container(current_view)
            .width(Length::Fill)
            .height(Length::Fill),
        toasts
    ]
    .into()
}

fn view_storefront<'a>(ctx: &ViewContext<'a>, now: Instant) -> Element<'a, Message> {
    let admin_target = if ctx.admin.is_some() {
        Screen::Dashboard
    } else {
        Screen::Signup
    };
    let admin_label = if ctx.admin.is_some() {
        "storefront-open-admin"
    } else {
        "storefront-join"
    };

    let header = Row::new()
        .spacing(spacing::XS)
        .height(Length::Fixed(layout::HEADER_HEIGHT))
        .align_y(alignment::Vertical::Center)
        .push(text(ctx.i18n.tr("storefront-title")).size(typography::TITLE_LG))
        .push(Space::new().width(Length::Fill))
        .push(
            button(text(ctx.i18n.tr(admin_label)).size(typography::BODY_SM))
                .padding([spacing::XXS, spacing::SM])
                .style(styles::button::link)
                .on_press(Message::Navigate(admin_target)),
        );

    let subtitle = container(
        text(ctx.i18n.tr("storefront-subtitle"))
            .size(typography::BODY)
            .color(palette::GRAY_400),
    )
    .height(Length::Fixed(layout::SUBTITLE_HEIGHT));

    let storefront_ctx = storefront::ViewContext {
        i18n: ctx.i18n,
        now,
        currency_symbol: ctx.currency_symbol,
    };
    let grid = storefront::view::view(ctx.storefront, &storefront_ctx).map(Message::Storefront);

    let page = Column::new()
        .padding(layout::PAGE_PADDING)
        .spacing(layout::PAGE_SPACING)
        .push(header)
        .push(subtitle)
        .push(grid);

    match storefront::view::detail(ctx.storefront, &storefront_ctx) {
        Some(detail) => stack![page, detail.map(Message::Storefront)].into(),
        None => page.into(),
    }
}

fn view_admin<'a>(
    ctx: &ViewContext<'a>,
    screen: Screen,
    admin: &'a AdminContext,
    now: Instant,
) -> Element<'a, Message> {
    let admin_ctx = admin::ViewContext {
        i18n: ctx.i18n,
        admin,
        currency_symbol: ctx.currency_symbol,
        now,
        clock: Utc::now(),
    };

    let content: Element<'a, Message> = match screen {
        Screen::Dashboard => dashboard::view(ctx.dashboard, &admin_ctx).map(Message::Dashboard),
        Screen::CollectionForm => match ctx.form {
            Some(form) => collection_form::view(form, &admin_ctx).map(Message::Form),
            None => dashboard::view(ctx.dashboard, &admin_ctx).map(Message::Dashboard),
        },
        Screen::Invitations => {
            invitations::view(ctx.invitations, &admin_ctx).map(Message::Invitations)
        }
        Screen::Storefront | Screen::Signup => Space::new().into(),
    };

    container(content)
        .padding(spacing::LG)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
