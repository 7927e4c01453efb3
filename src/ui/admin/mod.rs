// SPDX-License-Identifier: MPL-2.0
//! Admin surface.
//!
//! Every admin screen is built from an explicit [`AdminContext`]; without one
//! the host renders [`access_denied`] instead.
//!
//! - [`dashboard`] - stats, collection list, delete confirmation
//! - [`collection_form`] - add / edit with uploads, reordering and crop
//! - [`invitations`] - issue, copy and revoke admin invitations
//! - [`signup`] - redeem an invitation code

pub mod collection_form;
pub mod dashboard;
pub mod invitations;
pub mod signup;

use crate::domain::catalog::AdminContext;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{palette, spacing, typography};
use crate::ui::styles;
use chrono::{DateTime, Utc};
use iced::widget::{button, container, text, Column};
use iced::{alignment, Element, Length};
use std::time::Instant;

pub use collection_form::CollectionForm;
pub use dashboard::Dashboard;
pub use invitations::Invitations;
pub use signup::Signup;

/// Shared rendering inputs of the admin screens.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub admin: &'a AdminContext,
    pub currency_symbol: &'a str,
    /// Monotonic clock for fades.
    pub now: Instant,
    /// Wall clock for invitation expiry.
    pub clock: DateTime<Utc>,
}

/// Shown when the admin surface is opened without an admin context.
pub fn access_denied<'a, M: Clone + 'a>(i18n: &I18n, back: M) -> Element<'a, M> {
    container(
        Column::new()
            .spacing(spacing::SM)
            .align_x(alignment::Horizontal::Center)
            .push(text(i18n.tr("admin-access-denied-title")).size(typography::TITLE_MD))
            .push(
                text(i18n.tr("admin-access-denied-body"))
                    .size(typography::BODY)
                    .color(palette::GRAY_400),
            )
            .push(
                button(text(i18n.tr("admin-view-storefront")).size(typography::BODY))
                    .padding([spacing::XS, spacing::MD])
                    .style(styles::button::secondary)
                    .on_press(back),
            ),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .align_x(alignment::Horizontal::Center)
    .align_y(alignment::Vertical::Center)
    .into()
}
