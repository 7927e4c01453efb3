// SPDX-License-Identifier: MPL-2.0
//! Add / edit collection form.
//!
//! Hosts the reorderable media editor and, while an image is being cropped,
//! the crop dialog. Uploads, crop encoding and persistence run in the host;
//! their completions come back as messages.

use super::ViewContext;
use crate::domain::catalog::{
    Category, Collection, CollectionDraft, CollectionStatus, DraftError, ValidDraft, MAX_IMAGES,
};
use crate::domain::ids::{CollectionId, MediaId};
use crate::domain::media::{MediaKind, ReorderableMediaList};
use crate::error::Error;
use crate::media::ImageData;
use crate::ui::cropper::{self, CropJob, CropSettings, SessionId};
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::lazy_image;
use crate::ui::media_editor::{self, MediaEditor};
use crate::ui::styles;
use iced::widget::{button, container, pick_list, scrollable, stack, text, text_input, Column, Row};
use iced::{alignment, Element, Length};
use std::fmt;
use std::time::Instant;

#[derive(Debug, Clone)]
pub enum Message {
    NameChanged(String),
    PriceChanged(String),
    DescriptionChanged(String),
    CategorySelected(CategoryChoice),
    StatusSelected(CollectionStatus),
    AddMedia,
    UploadsStarted(usize),
    Uploaded { kind: MediaKind, url: String },
    UploadFailed,
    Media(media_editor::Message),
    Crop(cropper::Message),
    CropSource {
        session: SessionId,
        result: Result<ImageData, String>,
    },
    /// Url of the uploaded crop, or why encoding or upload failed.
    CropFinished {
        session: SessionId,
        target: MediaId,
        result: Result<String, Error>,
    },
    Save,
    SaveFailed,
    Cancel,
}

#[derive(Debug, Clone)]
pub enum Event {
    None,
    PickFiles,
    Thumbnail {
        id: MediaId,
        effect: lazy_image::Effect,
    },
    LoadCropSource {
        session: SessionId,
        url: String,
    },
    RunCrop(CropJob),
    /// The open crop session accepted its result and closed.
    CropApplied {
        target: MediaId,
        thumbnail: Option<lazy_image::Effect>,
    },
    CropFailed(Error),
    Save {
        id: Option<CollectionId>,
        draft: ValidDraft,
    },
    Invalid(DraftError),
    Close,
}

/// Category entry of the picker, labelled in the current language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryChoice {
    pub category: Category,
    pub label: String,
}

impl fmt::Display for CategoryChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

#[derive(Debug, Clone)]
pub struct CollectionForm {
    editing: Option<CollectionId>,
    name: String,
    price: String,
    description: String,
    category: Option<Category>,
    status: CollectionStatus,
    media: MediaEditor,
    crop: Option<cropper::Session>,
    crop_settings: CropSettings,
    uploads_in_flight: usize,
    saving: bool,
    error: Option<DraftError>,
}

impl CollectionForm {
    /// Empty form, or one prefilled from `existing`.
    #[must_use]
    pub fn new(existing: Option<&Collection>, placeholder: &str, crop_settings: CropSettings) -> Self {
        let draft = existing.map(Collection::to_draft).unwrap_or_default();
        Self {
            editing: existing.map(|c| c.id),
            name: draft.name,
            price: if draft.price == 0 {
                String::new()
            } else {
                draft.price.to_string()
            },
            description: draft.description,
            category: draft.category,
            status: draft.status,
            media: MediaEditor::new(
                ReorderableMediaList::from_parts(&draft.images, &draft.videos),
                placeholder,
            ),
            crop: None,
            crop_settings,
            uploads_in_flight: 0,
            saving: false,
            error: None,
        }
    }

    /// Thumbnail fetches for the media already attached.
    pub fn start(&mut self) -> Vec<Event> {
        self.media
            .start()
            .into_iter()
            .map(|(id, effect)| Event::Thumbnail { id, effect })
            .collect()
    }

    #[must_use]
    pub fn editing(&self) -> Option<CollectionId> {
        self.editing
    }

    #[must_use]
    pub fn media(&self) -> &MediaEditor {
        &self.media
    }

    #[must_use]
    pub fn crop_session(&self) -> Option<&cropper::Session> {
        self.crop.as_ref()
    }

    /// Whether `session` is still the open crop dialog. Results of a closed
    /// session must not be uploaded.
    #[must_use]
    pub fn is_cropping(&self, session: SessionId) -> bool {
        self.crop.as_ref().is_some_and(|crop| crop.id() == session)
    }

    #[must_use]
    pub fn uploads_in_flight(&self) -> usize {
        self.uploads_in_flight
    }

    #[must_use]
    pub fn is_saving(&self) -> bool {
        self.saving
    }

    #[must_use]
    pub fn error(&self) -> Option<DraftError> {
        self.error
    }

    #[must_use]
    pub fn is_fading(&self, now: Instant) -> bool {
        self.media.is_fading(now)
    }

    /// Draft built from the current field values.
    #[must_use]
    pub fn draft(&self) -> CollectionDraft {
        let (images, videos) = self.media.list().split();
        CollectionDraft {
            name: self.name.clone(),
            price: parse_price(&self.price),
            description: self.description.clone(),
            images,
            videos,
            status: self.status,
            category: self.category,
        }
    }

    pub fn update(&mut self, message: Message, now: Instant) -> Event {
        match message {
            Message::NameChanged(name) => {
                self.name = name;
                Event::None
            }
            Message::PriceChanged(price) => {
                if price.chars().all(|c| c.is_ascii_digit()) {
                    self.price = price;
                }
                Event::None
            }
            Message::DescriptionChanged(description) => {
                self.description = description;
                Event::None
            }
            Message::CategorySelected(choice) => {
                self.category = Some(choice.category);
                Event::None
            }
            Message::StatusSelected(status) => {
                self.status = status;
                Event::None
            }
            Message::AddMedia => Event::PickFiles,
            Message::UploadsStarted(count) => {
                self.uploads_in_flight += count;
                Event::None
            }
            Message::Uploaded { kind, url } => {
                self.uploads_in_flight = self.uploads_in_flight.saturating_sub(1);
                match self.media.append(kind, &url) {
                    Some((id, effect)) if effect != lazy_image::Effect::None => {
                        Event::Thumbnail { id, effect }
                    }
                    _ => Event::None,
                }
            }
            Message::UploadFailed => {
                self.uploads_in_flight = self.uploads_in_flight.saturating_sub(1);
                Event::None
            }
            Message::Media(message) => self.handle_media(message, now),
            Message::Crop(message) => self.handle_crop(message),
            Message::CropSource { session, result } => match &mut self.crop {
                Some(crop) if crop.id() == session => {
                    let message = match result {
                        Ok(image) => cropper::Message::SourceLoaded(image),
                        Err(reason) => cropper::Message::SourceFailed(reason),
                    };
                    self.handle_crop(message)
                }
                _ => Event::None,
            },
            Message::CropFinished {
                session,
                target,
                result,
            } => self.finish_crop(session, target, result),
            Message::Save => self.save(),
            Message::SaveFailed => {
                self.saving = false;
                Event::None
            }
            Message::Cancel => Event::Close,
        }
    }

    fn handle_media(&mut self, message: media_editor::Message, now: Instant) -> Event {
        match self.media.update(message, now) {
            media_editor::Event::Thumbnail { id, effect } => Event::Thumbnail { id, effect },
            media_editor::Event::CropRequested { id, url } => {
                let session = cropper::Session::open(id, url.clone(), self.crop_settings);
                let event = Event::LoadCropSource {
                    session: session.id(),
                    url,
                };
                self.crop = Some(session);
                event
            }
            media_editor::Event::Reordered
            | media_editor::Event::Removed(_)
            | media_editor::Event::None => Event::None,
        }
    }

    fn handle_crop(&mut self, message: cropper::Message) -> Event {
        let Some(session) = &mut self.crop else {
            return Event::None;
        };
        match session.update(message) {
            cropper::Event::None => Event::None,
            cropper::Event::Apply(job) => Event::RunCrop(job),
            cropper::Event::Cancelled => {
                self.crop = None;
                Event::None
            }
            cropper::Event::Failed(err) => Event::CropFailed(Error::Crop(err)),
        }
    }

    fn finish_crop(
        &mut self,
        session: SessionId,
        target: MediaId,
        result: Result<String, Error>,
    ) -> Event {
        let Some(crop) = &mut self.crop else {
            log::debug!("crop completion {session:?} arrived after the dialog closed");
            return Event::None;
        };
        let outcome = result.as_ref().map(|_| ());
        if !crop.complete(session, &outcome) {
            return Event::None;
        }
        match result {
            Ok(url) => {
                self.crop = None;
                let thumbnail = self
                    .media
                    .replace_url(target, &url)
                    .filter(|effect| *effect != lazy_image::Effect::None);
                Event::CropApplied { target, thumbnail }
            }
            Err(err) => Event::CropFailed(err),
        }
    }

    fn save(&mut self) -> Event {
        if self.saving || self.uploads_in_flight > 0 {
            return Event::None;
        }
        match self.draft().validate() {
            Ok(draft) => {
                self.error = None;
                self.saving = true;
                Event::Save {
                    id: self.editing,
                    draft,
                }
            }
            Err(err) => {
                self.error = Some(err);
                Event::Invalid(err)
            }
        }
    }
}

fn parse_price(raw: &str) -> u64 {
    raw.trim().parse().unwrap_or(0)
}

pub fn view<'a>(form: &'a CollectionForm, ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let title_key = if form.editing.is_some() {
        "admin-edit-collection"
    } else {
        "admin-add-collection"
    };

    let choices: Vec<CategoryChoice> = Category::ALL
        .iter()
        .map(|category| CategoryChoice {
            category: *category,
            label: ctx.i18n.tr(category.i18n_key()),
        })
        .collect();
    let selected = form
        .category
        .and_then(|category| choices.iter().find(|c| c.category == category).cloned());

    let status_row = Row::new()
        .spacing(spacing::XS)
        .push(status_button(form, ctx, CollectionStatus::Available))
        .push(status_button(form, ctx, CollectionStatus::SoldOut));

    let image_count = form.media.list().image_count();
    let count_label = {
        let count = image_count.to_string();
        let max = MAX_IMAGES.to_string();
        ctx.i18n.tr_with_args(
            "admin-image-count",
            &[("count", count.as_str()), ("max", max.as_str())],
        )
    };
    let mut media_header = Row::new()
        .spacing(spacing::XS)
        .align_y(alignment::Vertical::Center)
        .push(text(ctx.i18n.tr("admin-media-section")).size(typography::BODY_LG))
        .push(
            text(count_label)
                .size(typography::CAPTION)
                .color(palette::GRAY_400)
                .width(Length::Fill),
        );
    if form.uploads_in_flight > 0 {
        let pending = form.uploads_in_flight.to_string();
        media_header = media_header.push(
            text(ctx.i18n.tr_with_args("admin-uploading", &[("count", pending.as_str())]))
                .size(typography::CAPTION)
                .color(palette::INFO_500),
        );
    }
    media_header = media_header.push(
        button(text(ctx.i18n.tr("admin-add-media")).size(typography::BODY_SM))
            .padding([spacing::XXS, spacing::SM])
            .style(styles::button::secondary)
            .on_press(Message::AddMedia),
    );

    let media = media_editor::view::view(
        &form.media,
        &media_editor::ViewContext {
            i18n: ctx.i18n,
            now: ctx.now,
        },
    )
    .map(Message::Media);

    let error: Element<'a, Message> = match form.error {
        Some(err) => text(ctx.i18n.tr(err.i18n_key()))
            .size(typography::BODY_SM)
            .color(palette::ERROR_500)
            .into(),
        None => Column::new().into(),
    };

    let save_key = if form.saving {
        "admin-saving"
    } else {
        "admin-save"
    };
    let save = button(text(ctx.i18n.tr(save_key)).size(typography::BODY))
        .padding([spacing::XS, spacing::MD])
        .style(styles::button::primary);
    let save = if form.saving || form.uploads_in_flight > 0 {
        save
    } else {
        save.on_press(Message::Save)
    };

    let actions = Row::new()
        .spacing(spacing::XS)
        .push(
            container(error)
                .width(Length::Fill)
                .align_y(alignment::Vertical::Center),
        )
        .push(
            button(text(ctx.i18n.tr("admin-cancel")).size(typography::BODY))
                .padding([spacing::XS, spacing::MD])
                .style(styles::button::secondary)
                .on_press(Message::Cancel),
        )
        .push(save);

    let fields = Column::new()
        .spacing(spacing::SM)
        .push(text(ctx.i18n.tr(title_key)).size(typography::TITLE_MD))
        .push(labelled(
            ctx,
            "admin-field-name",
            text_input("", &form.name)
                .on_input(Message::NameChanged)
                .padding(spacing::XS)
                .into(),
        ))
        .push(labelled(
            ctx,
            "admin-field-price",
            text_input("0", &form.price)
                .on_input(Message::PriceChanged)
                .padding(spacing::XS)
                .into(),
        ))
        .push(labelled(
            ctx,
            "admin-field-description",
            text_input("", &form.description)
                .on_input(Message::DescriptionChanged)
                .padding(spacing::XS)
                .into(),
        ))
        .push(labelled(
            ctx,
            "admin-field-category",
            pick_list(choices, selected, Message::CategorySelected)
                .placeholder(ctx.i18n.tr("admin-category-placeholder"))
                .width(Length::Fill)
                .into(),
        ))
        .push(labelled(ctx, "admin-field-status", status_row.into()))
        .push(media_header)
        .push(media)
        .push(actions);

    let panel = container(scrollable(fields).height(Length::Fill))
        .width(Length::Fixed(sizing::DIALOG_WIDTH + sizing::MEDIA_TILE * 2.0))
        .padding(spacing::LG)
        .style(styles::container::panel);

    let page = container(panel)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(spacing::LG)
        .align_x(alignment::Horizontal::Center);

    match &form.crop {
        Some(session) => {
            let dialog = cropper::view::view(session, &cropper::ViewContext { i18n: ctx.i18n })
                .map(Message::Crop);
            stack![
                page,
                container(dialog)
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .align_x(alignment::Horizontal::Center)
                    .align_y(alignment::Vertical::Center)
                    .style(styles::container::scrim),
            ]
            .into()
        }
        None => page.into(),
    }
}

fn labelled<'a>(ctx: &ViewContext<'a>, key: &str, field: Element<'a, Message>) -> Element<'a, Message> {
    Column::new()
        .spacing(spacing::XXS)
        .push(
            text(ctx.i18n.tr(key))
                .size(typography::BODY_SM)
                .color(palette::GRAY_700),
        )
        .push(field)
        .into()
}

fn status_button<'a>(
    form: &CollectionForm,
    ctx: &ViewContext<'a>,
    status: CollectionStatus,
) -> Element<'a, Message> {
    let style = if form.status == status {
        styles::button::primary
    } else {
        styles::button::secondary
    };
    button(text(ctx.i18n.tr(status.i18n_key())).size(typography::BODY_SM))
        .padding([spacing::XXS, spacing::SM])
        .style(style)
        .on_press(Message::StatusSelected(status))
        .into()
}
