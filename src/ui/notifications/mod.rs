// SPDX-License-Identifier: MPL-2.0
//! Toast notifications.
//!
//! Save, upload, crop and load outcomes are reported as short-lived toasts
//! instead of dialogs. Success and info toasts disappear after 3 s, warnings
//! after 5 s, errors stay until dismissed. See [`Manager`] for queueing.
//!
//! ```ignore
//! notifications.push(Notification::success("notification-collection-saved")
//!     .with_arg("name", &collection.name));
//! ```

mod manager;
mod notification;
mod toast;

pub use manager::{Manager, Message as NotificationMessage, MAX_VISIBLE};
pub use notification::{Notification, NotificationId, Severity};
pub use toast::Toast;
