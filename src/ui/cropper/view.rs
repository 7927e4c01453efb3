// SPDX-License-Identifier: MPL-2.0
//! Crop dialog: preview viewport plus zoom, rotation and action rows.

use super::session::{Message, Session};
use crate::domain::editing::newtypes::{rotation_bounds, scale_bounds};
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, container, image, mouse_area, slider, text, Column, Image, Row};
use iced::{alignment, Element, Length};

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
}

pub fn view<'a>(session: &'a Session, ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let title = text(ctx.i18n.tr("cropper-title")).size(typography::TITLE_SM);
    let hint = text(ctx.i18n.tr("cropper-drag-hint"))
        .size(typography::CAPTION)
        .color(palette::GRAY_400);

    let content = Column::new()
        .spacing(spacing::SM)
        .push(title)
        .push(viewport(session, ctx))
        .push(hint)
        .push(zoom_row(session, ctx))
        .push(rotation_row(session, ctx))
        .push(action_row(session, ctx));

    container(content)
        .width(Length::Fixed(sizing::CROP_DIALOG_WIDTH))
        .padding(spacing::MD)
        .style(styles::container::panel)
        .into()
}

fn viewport<'a>(session: &'a Session, ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let (width, height) = session.settings().geometry.viewport_size();
    let (width, height) = (Length::Fixed(width as f32), Length::Fixed(height as f32));

    let inner: Element<'a, Message> = if let Some(preview) = session.preview() {
        Image::<image::Handle>::new(preview.handle.clone())
            .width(width)
            .height(height)
            .into()
    } else {
        let key = if session.load_error().is_some() {
            "cropper-load-failed"
        } else {
            "cropper-loading"
        };
        text(ctx.i18n.tr(key))
            .size(typography::BODY_SM)
            .color(palette::GRAY_400)
            .into()
    };

    let frame = container(inner)
        .width(width)
        .height(height)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .clip(true)
        .style(styles::container::media_frame);

    let centered = container(
        mouse_area(frame)
            .on_move(Message::PointerMoved)
            .on_press(Message::PointerPressed)
            .on_release(Message::PointerReleased)
            .on_exit(Message::PointerLeft),
    )
    .width(Length::Fill)
    .align_x(alignment::Horizontal::Center);

    centered.into()
}

fn step_button<'a>(label: &'static str, message: Message, enabled: bool) -> Element<'a, Message> {
    let btn = button(text(label).size(typography::BODY))
        .padding([spacing::XXS, spacing::XS])
        .style(styles::button::secondary);
    if enabled {
        btn.on_press(message).into()
    } else {
        btn.into()
    }
}

fn zoom_row<'a>(session: &'a Session, ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let scale = session.transform().scale();
    let live = session.is_interactive();

    let control: Element<'a, Message> = if live {
        slider(
            scale_bounds::MIN..=scale_bounds::MAX,
            scale.value(),
            Message::ScaleChanged,
        )
        .step(scale_bounds::STEP)
        .into()
    } else {
        text("").into()
    };

    Row::new()
        .spacing(spacing::XS)
        .align_y(alignment::Vertical::Center)
        .push(
            text(ctx.i18n.tr("cropper-zoom-label"))
                .size(typography::BODY_SM)
                .width(Length::Fixed(sizing::MEDIA_TILE * 0.6)),
        )
        .push(step_button("−", Message::ZoomOut, live && !scale.is_min()))
        .push(container(control).width(Length::Fill))
        .push(step_button("+", Message::ZoomIn, live && !scale.is_max()))
        .push(text(format!("{:.1}×", scale.value())).size(typography::CAPTION))
        .into()
}

fn rotation_row<'a>(session: &'a Session, ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let rotation = session.transform().rotation();
    let live = session.is_interactive();

    let control: Element<'a, Message> = if live {
        slider(
            rotation_bounds::MIN..=rotation_bounds::MAX,
            rotation.value(),
            Message::RotationChanged,
        )
        .step(1.0)
        .into()
    } else {
        text("").into()
    };

    Row::new()
        .spacing(spacing::XS)
        .align_y(alignment::Vertical::Center)
        .push(
            text(ctx.i18n.tr("cropper-rotation-label"))
                .size(typography::BODY_SM)
                .width(Length::Fixed(sizing::MEDIA_TILE * 0.6)),
        )
        .push(step_button("⟲", Message::RotateCounterClockwise, live))
        .push(container(control).width(Length::Fill))
        .push(step_button("⟳", Message::RotateClockwise, live))
        .push(text(format!("{:.0}°", rotation.value())).size(typography::CAPTION))
        .into()
}

fn action_row<'a>(session: &'a Session, ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let live = session.is_interactive();

    let reset = button(text(ctx.i18n.tr("cropper-reset")).size(typography::BODY_SM))
        .padding([spacing::XXS, spacing::SM])
        .style(styles::button::secondary);
    let reset = if live && !session.transform().is_identity() {
        reset.on_press(Message::Reset)
    } else {
        reset
    };

    let cancel = button(text(ctx.i18n.tr("cropper-cancel")).size(typography::BODY_SM))
        .padding([spacing::XXS, spacing::SM])
        .style(styles::button::secondary)
        .on_press(Message::Cancel);

    let apply_label = if session.is_applying() {
        "cropper-applying"
    } else {
        "cropper-apply"
    };
    let apply = button(text(ctx.i18n.tr(apply_label)).size(typography::BODY_SM))
        .padding([spacing::XXS, spacing::SM])
        .style(styles::button::primary);
    let apply = if live { apply.on_press(Message::Apply) } else { apply };

    Row::new()
        .spacing(spacing::XS)
        .push(reset)
        .push(
            container(Row::new().spacing(spacing::XS).push(cancel).push(apply))
                .width(Length::Fill)
                .align_x(alignment::Horizontal::Right),
        )
        .into()
}
