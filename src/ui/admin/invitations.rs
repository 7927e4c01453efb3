// SPDX-License-Identifier: MPL-2.0
//! Invitation management screen.

use super::ViewContext;
use crate::domain::catalog::{Invitation, InvitationStatus};
use crate::domain::ids::InvitationId;
use crate::ui::design_tokens::{palette, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, container, scrollable, text, text_input, Column, Row};
use iced::{alignment, Element, Length};

#[derive(Debug, Clone)]
pub enum Message {
    EmailChanged(String),
    Create,
    Delete(InvitationId),
    CopyLink(InvitationId),
    Back,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    None,
    Create { email: Option<String> },
    Delete(InvitationId),
    /// Signup link to put on the clipboard.
    Copy(String),
    Back,
}

#[derive(Debug, Clone)]
pub struct Invitations {
    invitations: Vec<Invitation>,
    email: String,
    creating: bool,
    signup_base_url: String,
}

impl Invitations {
    #[must_use]
    pub fn new(signup_base_url: impl Into<String>) -> Self {
        Self {
            invitations: Vec::new(),
            email: String::new(),
            creating: false,
            signup_base_url: signup_base_url.into(),
        }
    }

    pub fn set_invitations(&mut self, invitations: Vec<Invitation>) {
        self.invitations = invitations;
    }

    #[must_use]
    pub fn invitations(&self) -> &[Invitation] {
        &self.invitations
    }

    #[must_use]
    pub fn is_creating(&self) -> bool {
        self.creating
    }

    /// The store accepted a new invitation.
    pub fn created(&mut self, invitation: Invitation) {
        self.creating = false;
        self.email.clear();
        self.invitations.insert(0, invitation);
    }

    pub fn create_failed(&mut self) {
        self.creating = false;
    }

    pub fn removed(&mut self, id: InvitationId) {
        self.invitations.retain(|i| i.id != id);
    }

    pub fn update(&mut self, message: Message) -> Event {
        match message {
            Message::EmailChanged(email) => {
                self.email = email;
                Event::None
            }
            Message::Create => {
                if self.creating {
                    return Event::None;
                }
                self.creating = true;
                let email = self.email.trim();
                Event::Create {
                    email: (!email.is_empty()).then(|| email.to_string()),
                }
            }
            Message::Delete(id) => Event::Delete(id),
            Message::CopyLink(id) => match self.invitations.iter().find(|i| i.id == id) {
                Some(invitation) => Event::Copy(invitation.signup_link(&self.signup_base_url)),
                None => Event::None,
            },
            Message::Back => Event::Back,
        }
    }
}

pub fn view<'a>(screen: &'a Invitations, ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let header = Row::new()
        .spacing(spacing::XS)
        .align_y(alignment::Vertical::Center)
        .push(
            text(ctx.i18n.tr("invitations-title"))
                .size(typography::TITLE_LG)
                .width(Length::Fill),
        )
        .push(
            button(text(ctx.i18n.tr("invitations-back")).size(typography::BODY))
                .padding([spacing::XS, spacing::MD])
                .style(styles::button::secondary)
                .on_press(Message::Back),
        );

    let create = button(text(ctx.i18n.tr("invitations-create")).size(typography::BODY))
        .padding([spacing::XS, spacing::MD])
        .style(styles::button::primary);
    let create = if screen.creating {
        create
    } else {
        create.on_press(Message::Create)
    };

    let form = container(
        Row::new()
            .spacing(spacing::XS)
            .align_y(alignment::Vertical::Center)
            .push(
                text_input(&ctx.i18n.tr("invitations-email-placeholder"), &screen.email)
                    .on_input(Message::EmailChanged)
                    .on_submit(Message::Create)
                    .padding(spacing::XS)
                    .width(Length::Fill),
            )
            .push(create),
    )
    .padding(spacing::MD)
    .style(styles::container::card);

    let list: Element<'a, Message> = if screen.invitations.is_empty() {
        text(ctx.i18n.tr("invitations-empty"))
            .size(typography::BODY)
            .color(palette::GRAY_400)
            .into()
    } else {
        scrollable(
            Column::with_children(screen.invitations.iter().map(|i| row(i, ctx)))
                .spacing(spacing::XS),
        )
        .height(Length::Fill)
        .into()
    };

    container(
        Column::new()
            .spacing(spacing::LG)
            .push(header)
            .push(form)
            .push(list),
    )
    .padding(spacing::LG)
    .width(Length::Fill)
    .height(Length::Fill)
    .into()
}

fn row<'a>(invitation: &'a Invitation, ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let status = invitation.status(ctx.clock);
    let color = match status {
        InvitationStatus::Active => palette::SUCCESS_500,
        InvitationStatus::Expired => palette::WARNING_500,
        InvitationStatus::Used => palette::GRAY_400,
    };

    let expires = invitation.expires_at.format("%Y-%m-%d").to_string();
    let mut details = Column::new()
        .spacing(spacing::XXS)
        .width(Length::Fill)
        .push(text(invitation.code.as_str()).size(typography::BODY_LG))
        .push(
            text(ctx.i18n.tr_with_args("invitations-expires", &[("date", expires.as_str())]))
                .size(typography::CAPTION)
                .color(palette::GRAY_400),
        );
    if let Some(email) = &invitation.email {
        details = details.push(
            text(ctx.i18n.tr_with_args("invitations-bound-to", &[("email", email.as_str())]))
                .size(typography::CAPTION)
                .color(palette::GRAY_400),
        );
    }
    if let Some(used_by) = &invitation.used_by {
        details = details.push(
            text(ctx.i18n.tr_with_args("invitations-used-by", &[("email", used_by.as_str())]))
                .size(typography::CAPTION)
                .color(palette::GRAY_400),
        );
    }

    let badge = container(text(ctx.i18n.tr(status.i18n_key())).size(typography::CAPTION))
        .padding([spacing::XXS, spacing::XS])
        .style(styles::container::badge(color));

    let copy = button(text(ctx.i18n.tr("invitations-copy-link")).size(typography::BODY_SM))
        .style(styles::button::secondary);
    let copy = if status == InvitationStatus::Active {
        copy.on_press(Message::CopyLink(invitation.id))
    } else {
        copy
    };

    container(
        Row::new()
            .spacing(spacing::MD)
            .align_y(alignment::Vertical::Center)
            .push(details)
            .push(badge)
            .push(copy)
            .push(
                button(text(ctx.i18n.tr("invitations-delete")).size(typography::BODY_SM))
                    .style(styles::button::danger)
                    .on_press(Message::Delete(invitation.id)),
            ),
    )
    .padding(spacing::SM)
    .width(Length::Fill)
    .style(styles::container::card)
    .into()
}
