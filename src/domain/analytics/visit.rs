// SPDX-License-Identifier: MPL-2.0
//! Visits and their weekly statistics.
//!
//! A week starts on Monday at 00:00 UTC. Unique visitors are counted by
//! session, and a session lasts for one run of the application.

use chrono::{DateTime, Datelike, Duration, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Number of log entries kept in [`VisitStats::recent`].
pub const RECENT_VISITS: usize = 100;

/// One page view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visit {
    pub page_path: String,
    pub session_id: String,
    pub user_agent: String,
    pub visited_at: DateTime<Utc>,
}

impl Visit {
    #[must_use]
    pub fn new(
        page_path: impl Into<String>,
        session_id: impl Into<String>,
        user_agent: impl Into<String>,
        visited_at: DateTime<Utc>,
    ) -> Self {
        Self {
            page_path: page_path.into(),
            session_id: session_id.into(),
            user_agent: user_agent.into(),
            visited_at,
        }
    }

    /// Short browser label for the visit log.
    #[must_use]
    pub fn browser(&self) -> &'static str {
        browser_family(&self.user_agent)
    }
}

/// Monday 00:00 UTC of the week containing `now`.
#[must_use]
pub fn week_start(now: DateTime<Utc>) -> DateTime<Utc> {
    let days_since_monday = i64::from(now.weekday().num_days_from_monday());
    let monday = now.date_naive() - Duration::days(days_since_monday);
    monday.and_time(NaiveTime::MIN).and_utc()
}

/// Maps a user agent string to a coarse browser family.
#[must_use]
pub fn browser_family(user_agent: &str) -> &'static str {
    // Order matters: Edge and Chrome agents also mention Safari.
    if user_agent.contains("Edg") {
        "Edge"
    } else if user_agent.contains("Chrome") {
        "Chrome"
    } else if user_agent.contains("Firefox") {
        "Firefox"
    } else if user_agent.contains("Safari") {
        "Safari"
    } else {
        "Other"
    }
}

/// Dashboard summary of the visit log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitStats {
    /// Visits since the start of the current week.
    pub weekly_visits: usize,
    /// Distinct sessions among this week's visits.
    pub weekly_unique: usize,
    /// Newest first, at most [`RECENT_VISITS`].
    pub recent: Vec<Visit>,
}

impl VisitStats {
    #[must_use]
    pub fn of(visits: &[Visit], now: DateTime<Utc>) -> Self {
        let since = week_start(now);
        let weekly: Vec<&Visit> = visits.iter().filter(|v| v.visited_at >= since).collect();
        let weekly_unique = weekly
            .iter()
            .map(|v| v.session_id.as_str())
            .collect::<HashSet<_>>()
            .len();

        let mut recent = visits.to_vec();
        recent.sort_by(|a, b| b.visited_at.cmp(&a.visited_at));
        recent.truncate(RECENT_VISITS);

        Self {
            weekly_visits: weekly.len(),
            weekly_unique,
            recent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        // October 2026: the 12th and 19th are Mondays.
        Utc.with_ymd_and_hms(2026, 10, day, hour, 0, 0)
            .single()
            .expect("valid date")
    }

    #[test]
    fn week_starts_on_monday_midnight() {
        assert_eq!(week_start(at(17, 15)), at(12, 0));
        assert_eq!(week_start(at(12, 0)), at(12, 0));
        assert_eq!(week_start(at(18, 23)), at(12, 0));
        assert_eq!(week_start(at(19, 1)), at(19, 0));
    }

    #[test]
    fn weekly_counts_ignore_last_week() {
        let visits = vec![
            Visit::new("/", "a", "Firefox", at(11, 23)),
            Visit::new("/", "a", "Firefox", at(12, 9)),
            Visit::new("/collections/x", "a", "Firefox", at(13, 9)),
            Visit::new("/", "b", "Chrome", at(16, 9)),
        ];
        let stats = VisitStats::of(&visits, at(17, 12));
        assert_eq!(stats.weekly_visits, 3);
        assert_eq!(stats.weekly_unique, 2);
        assert_eq!(stats.recent.len(), 4);
        assert_eq!(stats.recent[0].visited_at, at(16, 9));
        assert_eq!(stats.recent[3].visited_at, at(11, 23));
    }

    #[test]
    fn recent_log_is_capped() {
        let visits: Vec<Visit> = (0..150)
            .map(|i| Visit::new("/", "s", "ua", at(13, 0) + Duration::minutes(i)))
            .collect();
        let stats = VisitStats::of(&visits, at(14, 0));
        assert_eq!(stats.recent.len(), RECENT_VISITS);
        assert_eq!(stats.recent[0].visited_at, at(13, 0) + Duration::minutes(149));
    }

    #[test]
    fn empty_log_has_zero_stats() {
        assert_eq!(VisitStats::of(&[], at(14, 0)), VisitStats::default());
    }

    #[test]
    fn browser_family_prefers_specific_engines() {
        let edge = "Mozilla/5.0 AppleWebKit/537.36 Chrome/120.0 Safari/537.36 Edg/120.0";
        assert_eq!(browser_family(edge), "Edge");
        assert_eq!(browser_family("Mozilla/5.0 Chrome/120.0 Safari/537.36"), "Chrome");
        assert_eq!(browser_family("Mozilla/5.0 Gecko/20100101 Firefox/121.0"), "Firefox");
        assert_eq!(browser_family("Mozilla/5.0 Version/17.0 Safari/605.1.15"), "Safari");
        assert_eq!(browser_family("boutique_showcase/0.1 (linux)"), "Other");
    }
}
