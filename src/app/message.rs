// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::domain::analytics::VisitStats;
use crate::domain::catalog::{AdminContext, Collection, Invitation};
use crate::domain::ids::{CollectionId, InvitationId, MediaId};
use crate::domain::media::MediaKind;
use crate::error::Error;
use crate::media::ImageData;
use crate::ui::admin::{collection_form, dashboard, invitations, signup};
use crate::ui::cropper::SessionId;
use crate::ui::notifications;
use crate::ui::storefront::{self, CarouselId, ImageKey};
use crate::video_player::WorkerMessage;
use std::path::PathBuf;
use std::time::Instant;

use super::Screen;

/// Who asked for an image fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageTarget {
    Storefront(ImageKey),
    Thumbnail(MediaId),
    CropSource(SessionId),
}

/// Top-level messages consumed by `App::update`. The variants forward
/// lower-level component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    Storefront(storefront::Message),
    Dashboard(dashboard::Message),
    Form(collection_form::Message),
    Invitations(invitations::Message),
    Signup(signup::Message),
    Notification(notifications::NotificationMessage),
    Navigate(Screen),
    CatalogLoaded(Result<Vec<Collection>, Error>),
    CollectionSaved(Result<Collection, Error>),
    CollectionDeleted {
        id: CollectionId,
        result: Result<(), Error>,
    },
    StatusChanged(Result<Collection, Error>),
    ImageLoaded {
        target: ImageTarget,
        url: String,
        /// The fetch was for the placeholder of a failed image.
        placeholder: bool,
        result: Result<ImageData, Error>,
    },
    /// Readiness, playback events and frames from the video worker.
    Video(WorkerMessage<CarouselId>),
    FilesPicked(Vec<PathBuf>),
    Uploaded(Result<(MediaKind, String), Error>),
    /// The crop was encoded; it is uploaded only if its dialog is still open.
    CropEncoded {
        session: SessionId,
        target: MediaId,
        result: Result<Vec<u8>, Error>,
    },
    CropUploaded {
        session: SessionId,
        target: MediaId,
        result: Result<String, Error>,
    },
    InvitationsLoaded(Result<Vec<Invitation>, Error>),
    InvitationCreated(Result<Invitation, Error>),
    InvitationDeleted {
        id: InvitationId,
        result: Result<(), Error>,
    },
    SignupFinished(Result<AdminContext, Error>),
    LinkOpened(Result<(), Error>),
    VisitRecorded(Result<(), Error>),
    VisitStatsLoaded(Result<VisitStats, Error>),
    /// Periodic tick for animations, fades and toast auto-dismiss.
    Tick(Instant),
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// Optional data directory override (catalog, invitations, media bucket).
    /// Takes precedence over `BOUTIQUE_SHOWCASE_DATA_DIR`.
    pub data_dir: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `BOUTIQUE_SHOWCASE_CONFIG_DIR`.
    pub config_dir: Option<String>,
    /// Account to resolve as the admin context at startup.
    pub admin: Option<String>,
}
