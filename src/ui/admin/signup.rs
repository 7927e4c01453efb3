// SPDX-License-Identifier: MPL-2.0
//! Invitation signup: redeem a code to become an admin.

use crate::domain::catalog::normalize_code;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, container, text, text_input, Column, Row};
use iced::{alignment, Element, Length};

#[derive(Debug, Clone)]
pub enum Message {
    CodeChanged(String),
    EmailChanged(String),
    Submit,
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    None,
    Redeem { code: String, email: String },
    Cancel,
}

#[derive(Debug, Clone, Default)]
pub struct Signup {
    code: String,
    email: String,
    submitting: bool,
    error: Option<&'static str>,
}

impl Signup {
    /// Form prefilled with the code from a signup link.
    #[must_use]
    pub fn with_code(code: &str) -> Self {
        Self {
            code: normalize_code(code),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Translation key of the last error.
    #[must_use]
    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    pub fn failed(&mut self, key: &'static str) {
        self.submitting = false;
        self.error = Some(key);
    }

    pub fn update(&mut self, message: Message) -> Event {
        match message {
            Message::CodeChanged(code) => {
                self.code = code.to_uppercase();
                Event::None
            }
            Message::EmailChanged(email) => {
                self.email = email;
                Event::None
            }
            Message::Submit => {
                if self.submitting {
                    return Event::None;
                }
                let code = normalize_code(&self.code);
                let email = self.email.trim();
                if code.is_empty() {
                    self.error = Some("signup-code-required");
                    return Event::None;
                }
                if !looks_like_email(email) {
                    self.error = Some("error-auth-invalid-email");
                    return Event::None;
                }
                self.error = None;
                self.submitting = true;
                Event::Redeem {
                    code,
                    email: email.to_string(),
                }
            }
            Message::Cancel => Event::Cancel,
        }
    }
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.contains('@'),
        None => false,
    }
}

pub fn view<'a>(signup: &'a Signup, i18n: &'a I18n) -> Element<'a, Message> {
    let submit = button(text(i18n.tr("signup-submit")).size(typography::BODY))
        .padding([spacing::XS, spacing::MD])
        .style(styles::button::primary);
    let submit = if signup.submitting {
        submit
    } else {
        submit.on_press(Message::Submit)
    };

    let mut form = Column::new()
        .spacing(spacing::SM)
        .push(text(i18n.tr("signup-title")).size(typography::TITLE_MD))
        .push(
            text(i18n.tr("signup-body"))
                .size(typography::BODY_SM)
                .color(palette::GRAY_400),
        )
        .push(
            text_input(&i18n.tr("signup-code-placeholder"), &signup.code)
                .on_input(Message::CodeChanged)
                .padding(spacing::XS),
        )
        .push(
            text_input(&i18n.tr("signup-email-placeholder"), &signup.email)
                .on_input(Message::EmailChanged)
                .on_submit(Message::Submit)
                .padding(spacing::XS),
        );

    if let Some(key) = signup.error {
        form = form.push(
            text(i18n.tr(key))
                .size(typography::BODY_SM)
                .color(palette::ERROR_500),
        );
    }

    form = form.push(
        Row::new()
            .spacing(spacing::XS)
            .push(
                button(text(i18n.tr("admin-cancel")).size(typography::BODY))
                    .padding([spacing::XS, spacing::MD])
                    .style(styles::button::secondary)
                    .on_press(Message::Cancel),
            )
            .push(submit),
    );

    container(
        container(form)
            .width(Length::Fixed(sizing::CROP_DIALOG_WIDTH))
            .padding(spacing::LG)
            .style(styles::container::panel),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .align_x(alignment::Horizontal::Center)
    .align_y(alignment::Vertical::Center)
    .into()
}
