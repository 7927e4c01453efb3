// SPDX-License-Identifier: MPL-2.0
//! Update logic and message handlers for the application.
//!
//! Components report what they need as events; the handlers here turn each
//! event into a [`Task`] that calls a port on the blocking pool and feeds the
//! outcome back as a [`Message`].

use super::services::blocking;
use super::{inquiry_template, App, ImageTarget, Message, Screen, HOME_PATH};
use crate::application::port::ObjectStorage;
use crate::application::signup::redeem_invitation;
use crate::application::upload::{unique_object_name, PendingUpload, PICKER_EXTENSIONS};
use crate::domain::analytics::Visit;
use crate::domain::catalog::Invitation;
use crate::domain::ids::{CollectionId, MediaId};
use crate::domain::media::MediaKind;
use crate::error::{Error, Result};
use crate::media::{self, ImageData};
use crate::ui::admin::{collection_form, dashboard, invitations, signup, CollectionForm, Signup};
use crate::ui::carousel::{self, VideoCommand};
use crate::ui::cropper::{CropJob, CropSettings, SessionId};
use crate::ui::lazy_image;
use crate::ui::media_editor;
use crate::ui::notifications::Notification;
use crate::ui::storefront::{self, CarouselId};
use crate::video_player::{WorkerMessage, WorkerOutput};
use chrono::Utc;
use iced::Task;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// Name template of cropped uploads; only the extension is used.
const CROP_FILE_NAME: &str = "crop.jpg";
const CROP_CONTENT_TYPE: &str = "image/jpeg";

impl App {
    pub(super) fn update(&mut self, message: Message) -> Task<Message> {
        let now = Instant::now();
        match message {
            Message::Storefront(message) => {
                let events = self.storefront.update(message, now);
                self.handle_storefront_events(events)
            }
            Message::Dashboard(message) => {
                if !self.is_admin() {
                    return Task::none();
                }
                let event = self.dashboard.update(message);
                self.handle_dashboard_event(event)
            }
            Message::Form(message) => {
                if !self.is_admin() {
                    return Task::none();
                }
                let Some(form) = self.form.as_mut() else {
                    return Task::none();
                };
                let event = form.update(message, now);
                self.handle_form_event(event)
            }
            Message::Invitations(message) => {
                if !self.is_admin() {
                    return Task::none();
                }
                let event = self.invitations.update(message);
                self.handle_invitations_event(event)
            }
            Message::Signup(message) => {
                let event = self.signup.update(message);
                self.handle_signup_event(event)
            }
            Message::Notification(message) => {
                self.notifications.handle_message(&message);
                Task::none()
            }
            Message::Navigate(screen) => self.navigate(screen),
            Message::CatalogLoaded(result) => match result {
                Ok(collections) => {
                    self.dashboard.set_collections(collections.clone());
                    let template = inquiry_template(&self.config.inquiry);
                    let events = self.storefront.set_collections(collections, &template, now);
                    self.handle_storefront_events(events)
                }
                Err(err) => self.report(&err),
            },
            Message::CollectionSaved(result) => match result {
                Ok(collection) => {
                    self.notifications.push(
                        Notification::success("notification-collection-saved")
                            .with_arg("name", collection.name),
                    );
                    self.form = None;
                    self.navigate(Screen::Dashboard)
                }
                Err(err) => {
                    if let Some(form) = self.form.as_mut() {
                        form.update(collection_form::Message::SaveFailed, now);
                    }
                    self.report(&err)
                }
            },
            Message::CollectionDeleted { id, result } => match result {
                Ok(()) => {
                    log::info!("collection {id} deleted");
                    self.notifications
                        .push(Notification::success("notification-collection-deleted"));
                    self.load_catalog()
                }
                Err(err) => self.report(&err),
            },
            Message::StatusChanged(result) => match result {
                Ok(collection) => {
                    self.notifications.push(
                        Notification::success("notification-status-updated")
                            .with_arg("name", collection.name),
                    );
                    self.load_catalog()
                }
                Err(err) => self.report(&err),
            },
            Message::ImageLoaded {
                target,
                url,
                placeholder,
                result,
            } => {
                if let Ok(image) = &result {
                    self.image_cache.insert(url, image.clone());
                }
                self.deliver_image(target, placeholder, result, now)
            }
            Message::Video(WorkerMessage::Ready(sender)) => {
                log::debug!("video worker ready, {} queued command(s)", self.pending_video.len());
                for (id, command) in self.pending_video.drain(..) {
                    if let Err(err) = sender.send(id, command) {
                        log::warn!("video command for {id:?} dropped: {err}");
                    }
                }
                self.video_commands = Some(sender);
                Task::none()
            }
            Message::Video(WorkerMessage::Output(output)) => {
                let (id, message) = match output {
                    WorkerOutput::Playback { key, index, event } => {
                        (key, carousel::Message::Playback { index, event })
                    }
                    WorkerOutput::Frame { key, index, frame } => {
                        (key, carousel::Message::Frame { index, frame })
                    }
                };
                let events = self
                    .storefront
                    .update(storefront::Message::Carousel { id, message }, now);
                self.handle_storefront_events(events)
            }
            Message::FilesPicked(paths) => self.start_uploads(paths, now),
            Message::Uploaded(result) => {
                let message = match result {
                    Ok((kind, url)) => collection_form::Message::Uploaded { kind, url },
                    Err(err) => {
                        self.notifications.push(
                            Notification::warning("notification-upload-failed")
                                .with_arg("details", err.to_string()),
                        );
                        collection_form::Message::UploadFailed
                    }
                };
                self.forward_to_form(message, now)
            }
            Message::CropEncoded {
                session,
                target,
                result,
            } => {
                let open = self
                    .form
                    .as_ref()
                    .is_some_and(|form| form.is_cropping(session));
                if !open {
                    log::debug!("crop {session:?} closed before upload, discarding");
                    return Task::none();
                }
                match result {
                    Ok(bytes) => self.upload_crop(session, target, bytes),
                    Err(err) => self.forward_to_form(
                        collection_form::Message::CropFinished {
                            session,
                            target,
                            result: Err(err),
                        },
                        now,
                    ),
                }
            }
            Message::CropUploaded {
                session,
                target,
                result,
            } => self.forward_to_form(
                collection_form::Message::CropFinished {
                    session,
                    target,
                    result,
                },
                now,
            ),
            Message::InvitationsLoaded(result) => match result {
                Ok(list) => {
                    self.invitations.set_invitations(list);
                    Task::none()
                }
                Err(err) => self.report(&err),
            },
            Message::InvitationCreated(result) => match result {
                Ok(invitation) => {
                    self.notifications.push(
                        Notification::success("notification-invitation-created")
                            .with_arg("code", invitation.code.clone()),
                    );
                    self.invitations.created(invitation);
                    Task::none()
                }
                Err(err) => {
                    self.invitations.create_failed();
                    self.report(&err)
                }
            },
            Message::InvitationDeleted { id, result } => match result {
                Ok(()) => {
                    self.invitations.removed(id);
                    self.notifications
                        .push(Notification::success("notification-invitation-deleted"));
                    Task::none()
                }
                Err(err) => self.report(&err),
            },
            Message::SignupFinished(result) => match result {
                Ok(context) => {
                    self.notifications.push(
                        Notification::success("notification-signup-complete")
                            .with_arg("email", context.email().to_string()),
                    );
                    self.admin = Some(context);
                    self.signup = Signup::default();
                    self.navigate(Screen::Dashboard)
                }
                Err(err) => {
                    self.signup.failed(err.i18n_key());
                    Task::none()
                }
            },
            Message::LinkOpened(result) => {
                if let Err(err) = result {
                    self.notifications.push(
                        Notification::warning("notification-link-failed")
                            .with_arg("details", err.to_string()),
                    );
                }
                Task::none()
            }
            Message::VisitRecorded(result) => {
                if let Err(err) = result {
                    log::warn!("visit not recorded: {err}");
                }
                Task::none()
            }
            Message::VisitStatsLoaded(result) => {
                let stats = match result {
                    Ok(stats) => Some(stats),
                    Err(err) => {
                        log::warn!("visit stats unavailable: {err}");
                        None
                    }
                };
                self.dashboard.set_visits(stats);
                Task::none()
            }
            Message::Tick(now) => {
                self.notifications.tick();
                if self.screen == Screen::Storefront {
                    let events = self.storefront.update(storefront::Message::Tick(now), now);
                    self.handle_storefront_events(events)
                } else {
                    Task::none()
                }
            }
        }
    }

    /// Switches screen, silencing the storefront when leaving it.
    fn navigate(&mut self, screen: Screen) -> Task<Message> {
        if self.screen == screen {
            return Task::none();
        }
        let mut tasks = Vec::new();
        if self.screen == Screen::Storefront {
            let events = self.storefront.shutdown();
            tasks.push(self.handle_storefront_events(events));
        }
        if self.screen == Screen::CollectionForm {
            self.form = None;
        }
        log::debug!("screen {:?} -> {screen:?}", self.screen);
        self.screen = screen;

        if screen.requires_admin() && !self.is_admin() {
            log::warn!("{screen:?} requested without an admin context");
            return Task::batch(tasks);
        }
        match screen {
            Screen::Storefront => {
                tasks.push(self.load_catalog());
                tasks.push(self.record_visit(HOME_PATH.to_string()));
            }
            Screen::Dashboard => {
                tasks.push(self.load_catalog());
                tasks.push(self.load_visits());
            }
            Screen::Invitations => tasks.push(self.load_invitations()),
            Screen::CollectionForm | Screen::Signup => {}
        }
        Task::batch(tasks)
    }

    fn report(&mut self, err: &Error) -> Task<Message> {
        self.notifications.push(Notification::from_error(err));
        Task::none()
    }

    pub(super) fn load_catalog(&self) -> Task<Message> {
        let catalog = Arc::clone(&self.services.catalog);
        Task::perform(
            blocking(move || Ok(catalog.list()?)),
            Message::CatalogLoaded,
        )
    }

    fn load_visits(&self) -> Task<Message> {
        let visits = Arc::clone(&self.services.visits);
        Task::perform(
            blocking(move || Ok(visits.stats(Utc::now())?)),
            Message::VisitStatsLoaded,
        )
    }

    /// Logs a view of `page_path` for this run's session.
    pub(super) fn record_visit(&self, page_path: String) -> Task<Message> {
        let visits = Arc::clone(&self.services.visits);
        let visit = Visit::new(page_path, self.visit_session.as_str(), user_agent(), Utc::now());
        Task::perform(
            blocking(move || Ok(visits.record(visit)?)),
            Message::VisitRecorded,
        )
    }

    fn load_invitations(&self) -> Task<Message> {
        let store = Arc::clone(&self.services.invitations);
        Task::perform(
            blocking(move || Ok(store.list()?)),
            Message::InvitationsLoaded,
        )
    }

    // =========================================================================
    // Storefront
    // =========================================================================

    fn handle_storefront_events(&mut self, events: Vec<storefront::Event>) -> Task<Message> {
        let tasks: Vec<Task<Message>> = events
            .into_iter()
            .map(|event| self.handle_storefront_event(event))
            .collect();
        Task::batch(tasks)
    }

    fn handle_storefront_event(&mut self, event: storefront::Event) -> Task<Message> {
        match event {
            storefront::Event::Video { id, commands } => {
                self.send_video_commands(id, commands);
                Task::none()
            }
            storefront::Event::FetchImage { key, url } => {
                self.fetch_image(ImageTarget::Storefront(key), url, false)
            }
            storefront::Event::ImageFailed {
                key, placeholder, ..
            } => self.fetch_image(ImageTarget::Storefront(key), placeholder, true),
            storefront::Event::PlaybackFailed(failure) => {
                self.notifications
                    .push(Notification::warning(failure.i18n_key()));
                Task::none()
            }
            storefront::Event::OpenLink(url) => {
                let launcher = Arc::clone(&self.services.launcher);
                Task::perform(
                    blocking(move || {
                        launcher
                            .open(&url)
                            .map_err(|err| Error::Io(err.to_string()))
                    }),
                    Message::LinkOpened,
                )
            }
            storefront::Event::DetailOpened(id) => self.record_visit(collection_path(id)),
        }
    }

    /// Hands commands to the video worker in order, or queues them until it
    /// is ready.
    fn send_video_commands(&mut self, id: CarouselId, commands: Vec<VideoCommand>) {
        match &self.video_commands {
            Some(sender) => {
                for command in commands {
                    if let Err(err) = sender.send(id, command) {
                        log::warn!("video command for {id:?} dropped: {err}");
                    }
                }
            }
            None => self
                .pending_video
                .extend(commands.into_iter().map(|command| (id, command))),
        }
    }

    // =========================================================================
    // Images
    // =========================================================================

    /// Fetches and decodes `url` off the UI thread, or answers from the cache.
    fn fetch_image(&mut self, target: ImageTarget, url: String, placeholder: bool) -> Task<Message> {
        if let Some(image) = self.image_cache.get(&url) {
            return Task::done(Message::ImageLoaded {
                target,
                url,
                placeholder,
                result: Ok(image),
            });
        }
        let images = Arc::clone(&self.services.images);
        let source = url.clone();
        Task::perform(
            blocking(move || {
                let bytes = images.fetch(&source)?;
                Ok(ImageData::from_raw(media::decode(&bytes)?))
            }),
            move |result| Message::ImageLoaded {
                target,
                url,
                placeholder,
                result,
            },
        )
    }

    fn deliver_image(
        &mut self,
        target: ImageTarget,
        placeholder: bool,
        result: Result<ImageData>,
        now: Instant,
    ) -> Task<Message> {
        if let ImageTarget::CropSource(session) = target {
            return self.forward_to_form(
                collection_form::Message::CropSource {
                    session,
                    result: result.map_err(|err| err.to_string()),
                },
                now,
            );
        }

        let message = match (placeholder, result) {
            (false, Ok(image)) => lazy_image::Message::Fetched(image),
            (false, Err(err)) => lazy_image::Message::Failed(err.to_string()),
            (true, Ok(image)) => lazy_image::Message::PlaceholderFetched(image),
            (true, Err(err)) => {
                log::warn!("placeholder image unavailable: {err}");
                lazy_image::Message::PlaceholderFailed
            }
        };

        match target {
            ImageTarget::Storefront(key) => {
                let events = self.storefront.deliver_image(key, message, now);
                self.handle_storefront_events(events)
            }
            ImageTarget::Thumbnail(id) => self.forward_to_form(
                collection_form::Message::Media(media_editor::Message::Thumbnail { id, message }),
                now,
            ),
            ImageTarget::CropSource(_) => Task::none(),
        }
    }

    // =========================================================================
    // Admin
    // =========================================================================

    fn handle_dashboard_event(&mut self, event: dashboard::Event) -> Task<Message> {
        match event {
            dashboard::Event::None => Task::none(),
            dashboard::Event::Reload => Task::batch([self.load_catalog(), self.load_visits()]),
            dashboard::Event::LoadVisits => self.load_visits(),
            dashboard::Event::OpenEditor(existing) => {
                let mut form = CollectionForm::new(
                    existing.as_ref(),
                    &self.config.storefront.placeholder_url(),
                    CropSettings::from_config(&self.config.cropper),
                );
                let events = form.start();
                self.form = Some(form);
                self.screen = Screen::CollectionForm;
                let tasks: Vec<Task<Message>> = events
                    .into_iter()
                    .map(|event| self.handle_form_event(event))
                    .collect();
                Task::batch(tasks)
            }
            dashboard::Event::Delete(id) => {
                let catalog = Arc::clone(&self.services.catalog);
                Task::perform(blocking(move || Ok(catalog.delete(id)?)), move |result| {
                    Message::CollectionDeleted { id, result }
                })
            }
            dashboard::Event::SetStatus { id, status } => {
                let catalog = Arc::clone(&self.services.catalog);
                Task::perform(
                    blocking(move || Ok(catalog.set_status(id, status)?)),
                    Message::StatusChanged,
                )
            }
            dashboard::Event::OpenInvitations => self.navigate(Screen::Invitations),
            dashboard::Event::OpenStorefront => self.navigate(Screen::Storefront),
        }
    }

    fn forward_to_form(&mut self, message: collection_form::Message, now: Instant) -> Task<Message> {
        let Some(form) = self.form.as_mut() else {
            log::debug!("form closed, dropping {message:?}");
            return Task::none();
        };
        let event = form.update(message, now);
        self.handle_form_event(event)
    }

    fn handle_form_event(&mut self, event: collection_form::Event) -> Task<Message> {
        match event {
            collection_form::Event::None => Task::none(),
            collection_form::Event::PickFiles => Task::perform(
                async {
                    rfd::AsyncFileDialog::new()
                        .add_filter("media", PICKER_EXTENSIONS)
                        .pick_files()
                        .await
                        .map(|handles| {
                            handles
                                .iter()
                                .map(|handle| handle.path().to_path_buf())
                                .collect()
                        })
                        .unwrap_or_default()
                },
                Message::FilesPicked,
            ),
            collection_form::Event::Thumbnail { id, effect } => match effect {
                lazy_image::Effect::None | lazy_image::Effect::Observe => Task::none(),
                lazy_image::Effect::Fetch(url) => {
                    self.fetch_image(ImageTarget::Thumbnail(id), url, false)
                }
                lazy_image::Effect::Failed {
                    source,
                    placeholder,
                    reason,
                } => {
                    log::warn!("thumbnail {source} failed to load ({reason})");
                    self.fetch_image(ImageTarget::Thumbnail(id), placeholder, true)
                }
            },
            collection_form::Event::LoadCropSource { session, url } => {
                self.fetch_image(ImageTarget::CropSource(session), url, false)
            }
            collection_form::Event::RunCrop(job) => run_crop(job),
            collection_form::Event::CropApplied { target, thumbnail } => {
                self.notifications
                    .push(Notification::success("notification-crop-applied"));
                match thumbnail {
                    Some(effect) => self.handle_form_event(collection_form::Event::Thumbnail {
                        id: target,
                        effect,
                    }),
                    None => Task::none(),
                }
            }
            collection_form::Event::CropFailed(err) => self.report(&err),
            collection_form::Event::Save { id, draft } => {
                let catalog = Arc::clone(&self.services.catalog);
                Task::perform(
                    blocking(move || {
                        Ok(match id {
                            Some(id) => catalog.update(id, draft)?,
                            None => catalog.create(draft)?,
                        })
                    }),
                    Message::CollectionSaved,
                )
            }
            collection_form::Event::Invalid(err) => {
                self.notifications.push(Notification::warning(err.i18n_key()));
                Task::none()
            }
            collection_form::Event::Close => self.navigate(Screen::Dashboard),
        }
    }

    fn start_uploads(&mut self, paths: Vec<PathBuf>, now: Instant) -> Task<Message> {
        if paths.is_empty() || self.form.is_none() {
            return Task::none();
        }
        log::debug!("uploading {} picked file(s)", paths.len());
        let started = self.forward_to_form(collection_form::Message::UploadsStarted(paths.len()), now);
        let uploads = paths.into_iter().map(|path| {
            let storage = Arc::clone(&self.services.storage);
            Task::perform(upload_file(storage, path), Message::Uploaded)
        });
        Task::batch(std::iter::once(started).chain(uploads))
    }

    /// Stores an encoded crop under a unique name.
    fn upload_crop(&self, session: SessionId, target: MediaId, bytes: Vec<u8>) -> Task<Message> {
        let storage = Arc::clone(&self.services.storage);
        Task::perform(
            blocking(move || {
                let name =
                    unique_object_name(Path::new(CROP_FILE_NAME), Utc::now().timestamp_millis());
                Ok(storage.upload(&bytes, &name, CROP_CONTENT_TYPE)?)
            }),
            move |result| Message::CropUploaded {
                session,
                target,
                result,
            },
        )
    }

    fn handle_invitations_event(&mut self, event: invitations::Event) -> Task<Message> {
        match event {
            invitations::Event::None => Task::none(),
            invitations::Event::Create { email } => {
                let store = Arc::clone(&self.services.invitations);
                let validity_days = self.config.invitations.validity_days();
                Task::perform(
                    blocking(move || {
                        let invitation =
                            Invitation::issue(email.as_deref(), validity_days, Utc::now());
                        Ok(store.create(invitation)?)
                    }),
                    Message::InvitationCreated,
                )
            }
            invitations::Event::Delete(id) => {
                let store = Arc::clone(&self.services.invitations);
                Task::perform(blocking(move || Ok(store.delete(id)?)), move |result| {
                    Message::InvitationDeleted { id, result }
                })
            }
            invitations::Event::Copy(link) => {
                self.notifications
                    .push(Notification::info("notification-link-copied"));
                iced::clipboard::write(link)
            }
            invitations::Event::Back => self.navigate(Screen::Dashboard),
        }
    }

    fn handle_signup_event(&mut self, event: signup::Event) -> Task<Message> {
        match event {
            signup::Event::None => Task::none(),
            signup::Event::Redeem { code, email } => {
                let store = Arc::clone(&self.services.invitations);
                let auth = Arc::clone(&self.services.auth);
                Task::perform(
                    blocking(move || {
                        redeem_invitation(store.as_ref(), auth.as_ref(), &code, &email, Utc::now())
                    }),
                    Message::SignupFinished,
                )
            }
            signup::Event::Cancel => self.navigate(Screen::Storefront),
        }
    }
}

/// Encodes the crop off the UI thread.
fn run_crop(job: CropJob) -> Task<Message> {
    let session = job.session;
    let target = job.target;
    Task::perform(blocking(move || Ok(job.run()?)), move |result| {
        Message::CropEncoded {
            session,
            target,
            result,
        }
    })
}

/// Page path logged when a collection's detail view opens.
fn collection_path(id: CollectionId) -> String {
    format!("/collections/{id}")
}

/// Client description stored with each visit.
fn user_agent() -> String {
    format!(
        "{}/{} ({})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS
    )
}

/// Reads a picked file and stores it under a unique name.
async fn upload_file(
    storage: Arc<dyn ObjectStorage>,
    path: PathBuf,
) -> Result<(MediaKind, String)> {
    let bytes = tokio::fs::read(&path).await?;
    let upload = PendingUpload::new(&path, bytes, Utc::now().timestamp_millis());
    blocking(move || {
        let url = storage.upload(&upload.bytes, &upload.object_name, upload.content_type)?;
        log::info!("uploaded {} as {}", path.display(), upload.object_name);
        Ok((upload.kind, url))
    })
    .await
}
