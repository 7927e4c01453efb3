// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the storefront and the
//! admin screens.
//!
//! The `App` struct wires together the components, localization and the port
//! adapters, and translates component events into side effects: image fetches,
//! video commands, uploads, catalog writes, visit logging and invitation
//! redemption. Every port call runs on the blocking pool through
//! [`services::blocking`]; video commands go to the worker started by
//! [`video_player::video_worker`].

pub mod config;
mod message;
pub mod paths;
mod screen;
pub mod services;
mod subscription;
mod update;
mod view;

pub use message::{Flags, ImageTarget, Message};
pub use screen::Screen;
pub use services::Services;

use crate::application::inquiry::InquiryTemplate;
use crate::domain::catalog::AdminContext;
use crate::error::Error;
use crate::i18n::fluent::I18n;
use crate::infrastructure::LocalAuth;
use crate::media::ImageCache;
use crate::ui::admin::{CollectionForm, Dashboard, Invitations, Signup};
use crate::ui::carousel::CarouselSettings;
use crate::ui::notifications;
use crate::ui::carousel::VideoCommand;
use crate::ui::storefront::{CarouselId, Storefront};
use crate::ui::theming::ThemeMode;
use crate::video_player::{self, VideoCommandSender};
use config::Config;
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Root Iced application state.
pub struct App {
    pub i18n: I18n,
    config: Config,
    screen: Screen,
    theme_mode: ThemeMode,
    services: Services,
    /// Resolved once; admin screens are only built with it.
    admin: Option<AdminContext>,
    storefront: Storefront,
    dashboard: Dashboard,
    form: Option<CollectionForm>,
    invitations: Invitations,
    signup: Signup,
    image_cache: ImageCache,
    notifications: notifications::Manager,
    /// Set once the video worker is running.
    video_commands: Option<VideoCommandSender<CarouselId>>,
    /// Commands issued before the worker was ready, in order.
    pending_video: Vec<(CarouselId, VideoCommand)>,
    /// Groups this run's visits in the visit log.
    visit_session: String,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("screen", &self.screen)
            .field("admin", &self.admin.as_ref().map(AdminContext::email))
            .field("cards", &self.storefront.cards().len())
            .finish()
    }
}

pub const WINDOW_DEFAULT_HEIGHT: u32 = 800;
pub const WINDOW_DEFAULT_WIDTH: u32 = 1280;
pub const MIN_WINDOW_HEIGHT: u32 = 600;
pub const MIN_WINDOW_WIDTH: u32 = 400;

/// Data directory used when no platform directory can be resolved.
const FALLBACK_DATA_DIR: &str = "boutique-data";

/// Page path logged for storefront visits.
const HOME_PATH: &str = "/";

pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced 0.14 requires an `Fn` boot; flags are consumed on the first call.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Loads config, resolves the admin context and starts the catalog load.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (config, config_warning) = config::load();
        let i18n = I18n::new(flags.lang.clone(), &config);
        let mut notifications = notifications::Manager::new();
        if let Some(key) = config_warning {
            notifications.push(notifications::Notification::warning(&key));
        }

        let data_dir = paths::get_app_data_dir().unwrap_or_else(|| {
            log::warn!("no data directory available, using ./{FALLBACK_DATA_DIR}");
            PathBuf::from(FALLBACK_DATA_DIR)
        });
        log::info!("data directory: {}", data_dir.display());
        let services = Services::local(&data_dir);

        let admin = flags
            .admin
            .as_deref()
            .and_then(|email| match resolve_admin(&data_dir, &services, email) {
                Ok(context) => Some(context),
                Err(err) => {
                    notifications.push(notifications::Notification::from_error(&err));
                    None
                }
            });

        let storefront = Storefront::new(
            CarouselSettings::from_config(&config.storefront),
            config.storefront.placeholder_url(),
            config.storefront.lazy_visibility_threshold(),
        );
        let invitations = Invitations::new(config.invitations.signup_base_url());
        let image_cache = ImageCache::new(config.storefront.image_cache_entries());

        let app = App {
            i18n,
            theme_mode: config.general.theme_mode,
            config,
            screen: Screen::Storefront,
            services,
            admin,
            storefront,
            dashboard: Dashboard::default(),
            form: None,
            invitations,
            signup: Signup::default(),
            image_cache,
            notifications,
            video_commands: None,
            pending_video: Vec::new(),
            visit_session: uuid::Uuid::new_v4().to_string(),
        };
        let task = Task::batch([app.load_catalog(), app.record_visit(HOME_PATH.to_string())]);
        (app, task)
    }

    fn title(&self) -> String {
        let app_name = self.i18n.tr("window-title");
        let section = match self.screen {
            Screen::Storefront => return app_name,
            Screen::Dashboard => self.i18n.tr("admin-dashboard-title"),
            Screen::CollectionForm => {
                let key = match self.form.as_ref().and_then(CollectionForm::editing) {
                    Some(_) => "admin-edit-collection",
                    None => "admin-add-collection",
                };
                self.i18n.tr(key)
            }
            Screen::Invitations => self.i18n.tr("invitations-title"),
            Screen::Signup => self.i18n.tr("signup-title"),
        };
        format!("{section} - {app_name}")
    }

    fn theme(&self) -> Theme {
        self.theme_mode.to_iced()
    }

    fn subscription(&self) -> Subscription<Message> {
        let now = std::time::Instant::now();
        let fading = self.form.as_ref().is_some_and(|form| form.is_fading(now));
        Subscription::batch([
            subscription::create_tick_subscription(
                self.screen == Screen::Storefront && self.storefront.is_animating(now),
                fading,
                self.notifications.has_notifications(),
            ),
            subscription::create_window_size_subscription(),
            subscription::create_visits_refresh_subscription(
                self.screen == Screen::Dashboard && self.is_admin(),
            ),
            video_player::video_worker(Arc::clone(&self.services.video)).map(Message::Video),
        ])
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            i18n: &self.i18n,
            screen: self.screen,
            admin: self.admin.as_ref(),
            currency_symbol: self.config.inquiry.currency_symbol(),
            storefront: &self.storefront,
            dashboard: &self.dashboard,
            form: self.form.as_ref(),
            invitations: &self.invitations,
            signup: &self.signup,
            notifications: &self.notifications,
        })
    }

    /// Whether the current admin context may use the admin screens.
    fn is_admin(&self) -> bool {
        self.admin.as_ref().is_some_and(AdminContext::is_admin)
    }
}

fn inquiry_template(config: &config::InquiryConfig) -> InquiryTemplate<'_> {
    InquiryTemplate {
        phone_number: config.phone_number(),
        product_noun: config.product_noun(),
        currency_symbol: config.currency_symbol(),
    }
}

/// Resolves `email`, creating the first admin account on an empty registry.
fn resolve_admin(
    data_dir: &Path,
    services: &Services,
    email: &str,
) -> Result<AdminContext, Error> {
    LocalAuth::in_dir(data_dir).bootstrap(email)?;
    Ok(services.auth.resolve_admin(email)?)
}
