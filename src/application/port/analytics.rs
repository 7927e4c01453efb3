// SPDX-License-Identifier: MPL-2.0
//! Visit tracking port.

use crate::domain::analytics::{Visit, VisitStats};
use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyticsError {
    #[error("visit log unavailable: {0}")]
    Unavailable(String),
}

impl AnalyticsError {
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            AnalyticsError::Unavailable(_) => "error-analytics-unavailable",
        }
    }
}

pub trait VisitTracker: Send + Sync {
    /// Appends one visit to the log.
    fn record(&self, visit: Visit) -> Result<(), AnalyticsError>;

    /// Summarizes the log for the week containing `now`.
    fn stats(&self, now: DateTime<Utc>) -> Result<VisitStats, AnalyticsError>;
}
