// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.

use super::Message;
use crate::ui::admin::dashboard;
use crate::ui::storefront;
use iced::{event, time, window, Subscription};
use std::time::Duration;

/// Frame interval while something moves on screen.
const ANIMATION_TICK: Duration = Duration::from_millis(16);
/// Interval used only for toast auto-dismiss.
const NOTIFICATION_TICK: Duration = Duration::from_millis(100);
/// How often the dashboard reloads its visit stats.
const VISITS_REFRESH: Duration = Duration::from_secs(30);

/// Creates a periodic tick subscription for carousel slides, image fade-ins
/// and notification auto-dismiss. No tick runs while the UI is idle.
pub fn create_tick_subscription(
    animating: bool,
    fading: bool,
    has_notifications: bool,
) -> Subscription<Message> {
    if animating || fading {
        time::every(ANIMATION_TICK).map(Message::Tick)
    } else if has_notifications {
        time::every(NOTIFICATION_TICK).map(Message::Tick)
    } else {
        Subscription::none()
    }
}

/// Feeds the window size to the storefront so lazy loading sees the real
/// viewport.
pub fn create_window_size_subscription() -> Subscription<Message> {
    event::listen_with(|event, _status, _window_id| match event {
        event::Event::Window(window::Event::Opened { size, .. })
        | event::Event::Window(window::Event::Resized(size)) => Some(Message::Storefront(
            storefront::Message::WindowResized(size),
        )),
        _ => None,
    })
}

/// Periodic visit stats refresh while the dashboard is shown.
pub fn create_visits_refresh_subscription(on_dashboard: bool) -> Subscription<Message> {
    if on_dashboard {
        time::every(VISITS_REFRESH)
            .map(|_| Message::Dashboard(dashboard::Message::RefreshVisits))
    } else {
        Subscription::none()
    }
}
