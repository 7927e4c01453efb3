// SPDX-License-Identifier: MPL-2.0
//! Visit log stored in a TOML document.

use super::toml_file::{self, DocumentError};
use crate::application::port::analytics::{AnalyticsError, VisitTracker};
use crate::domain::analytics::{Visit, VisitStats};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

pub const VISITS_FILE: &str = "visits.toml";

/// Visits older than this are dropped when a new one is recorded.
const RETENTION_DAYS: i64 = 56;

#[derive(Debug, Default, Serialize, Deserialize)]
struct VisitDocument {
    #[serde(default, rename = "visit")]
    visits: Vec<Visit>,
}

impl From<DocumentError> for AnalyticsError {
    fn from(err: DocumentError) -> Self {
        match err {
            DocumentError::Io(msg) | DocumentError::Parse(msg) => AnalyticsError::Unavailable(msg),
        }
    }
}

/// File-backed [`VisitTracker`].
#[derive(Debug)]
pub struct TomlVisitLog {
    path: PathBuf,
    lock: Mutex<()>,
}

impl TomlVisitLog {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(VISITS_FILE))
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        self.lock
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl VisitTracker for TomlVisitLog {
    fn record(&self, visit: Visit) -> Result<(), AnalyticsError> {
        let _guard = self.guard();
        let mut document: VisitDocument = toml_file::read(&self.path)?;
        let cutoff = visit.visited_at - Duration::days(RETENTION_DAYS);
        document.visits.retain(|v| v.visited_at >= cutoff);
        log::debug!("visit {} ({})", visit.page_path, visit.session_id);
        document.visits.push(visit);
        toml_file::write(&self.path, &document)?;
        Ok(())
    }

    fn stats(&self, now: DateTime<Utc>) -> Result<VisitStats, AnalyticsError> {
        let _guard = self.guard();
        let document: VisitDocument = toml_file::read(&self.path)?;
        Ok(VisitStats::of(&document.visits, now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn recorded_visits_show_up_in_stats() {
        let dir = tempdir().expect("temp dir");
        let log = TomlVisitLog::in_dir(dir.path());
        let now = Utc::now();
        log.record(Visit::new("/", "s1", "ua", now)).expect("record");
        log.record(Visit::new("/collections/a", "s1", "ua", now))
            .expect("record");

        let stats = log.stats(now).expect("stats");
        assert_eq!(stats.weekly_visits, 2);
        assert_eq!(stats.weekly_unique, 1);
        assert_eq!(stats.recent.len(), 2);
    }

    #[test]
    fn old_visits_are_pruned_on_record() {
        let dir = tempdir().expect("temp dir");
        let log = TomlVisitLog::in_dir(dir.path());
        let now = Utc::now();
        log.record(Visit::new("/", "old", "ua", now - Duration::days(RETENTION_DAYS + 1)))
            .expect("record");
        log.record(Visit::new("/", "new", "ua", now)).expect("record");

        let stats = log.stats(now).expect("stats");
        assert_eq!(stats.recent.len(), 1);
        assert_eq!(stats.recent[0].session_id, "new");
    }

    #[test]
    fn missing_file_has_empty_stats() {
        let dir = tempdir().expect("temp dir");
        let log = TomlVisitLog::in_dir(dir.path());
        assert_eq!(log.stats(Utc::now()), Ok(VisitStats::default()));
    }

    #[test]
    fn corrupt_file_is_unavailable() {
        let dir = tempdir().expect("temp dir");
        std::fs::write(dir.path().join(VISITS_FILE), "not = [valid").expect("write");
        let log = TomlVisitLog::in_dir(dir.path());
        assert!(matches!(
            log.stats(Utc::now()),
            Err(AnalyticsError::Unavailable(_))
        ));
    }
}
