// SPDX-License-Identifier: MPL-2.0
//! Storefront visit logging and the weekly summary shown on the dashboard.

pub mod visit;

pub use visit::{browser_family, week_start, Visit, VisitStats, RECENT_VISITS};
