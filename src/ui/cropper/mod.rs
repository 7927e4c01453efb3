// SPDX-License-Identifier: MPL-2.0
//! Crop dialog for catalog images.
//!
//! The session owns the transform and preview; the host loads the source,
//! runs [`CropJob::run`] off the UI thread, uploads the result and reports
//! back with [`Session::complete`].

pub mod session;
pub mod view;

pub use session::{CropJob, CropSettings, Event, Message, Session, SessionId};
pub use view::ViewContext;
