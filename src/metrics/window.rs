//! Reporting period windows.

use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};
use std::fmt;

/// Reporting window for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PeriodWindow {
    /// The rolling 30 days ending now.
    #[default]
    Rolling30Days,
    /// The current calendar month (UTC), from the 1st to now.
    CalendarMonth,
}

impl PeriodWindow {
    /// Returns the inclusive `[start, end]` bounds of the current window
    /// (range queries over the store treat both ends as inclusive).
    #[must_use]
    pub fn bounds(&self, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        match self {
            Self::Rolling30Days => (now - Duration::days(30), now),
            Self::CalendarMonth => (month_start(now), now),
        }
    }

    /// Returns the bounds of the immediately preceding window of equal
    /// length, used for trend comparison.
    ///
    /// The previous window ends one nanosecond before the current one
    /// starts, so the two inclusive windows partition cleanly and a
    /// boundary-timestamped entry is counted exactly once.
    #[must_use]
    pub fn previous_bounds(&self, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        let (start, end) = self.bounds(now);
        let length = end - start;
        (start - length, start - Duration::nanoseconds(1))
    }

    /// Parses a window from a CLI flag value.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "30d" | "30days" | "rolling" => Some(Self::Rolling30Days),
            "month" | "mes" => Some(Self::CalendarMonth),
            _ => None,
        }
    }

    /// Returns the window as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Rolling30Days => "30d",
            Self::CalendarMonth => "month",
        }
    }
}

impl fmt::Display for PeriodWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn month_start(now: DateTime<Utc>) -> DateTime<Utc> {
    // Midnight on the 1st always exists, so the Option/LocalResult chain
    // cannot actually miss; fall back to `now` to keep the path total.
    now.date_naive()
        .with_day(1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .and_then(|naive| Utc.from_local_datetime(&naive).single())
        .unwrap_or(now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
            .and_utc()
    }

    #[test]
    fn test_rolling_bounds_span_30_days() {
        let now = at(2025, 6, 15, 12);
        let (start, end) = PeriodWindow::Rolling30Days.bounds(now);
        assert_eq!(end, now);
        assert_eq!(end - start, Duration::days(30));
    }

    #[test]
    fn test_rolling_previous_window_abuts_current() {
        let now = at(2025, 6, 15, 12);
        let (cur_start, _) = PeriodWindow::Rolling30Days.bounds(now);
        let (prev_start, prev_end) = PeriodWindow::Rolling30Days.previous_bounds(now);
        // Abuts but does not overlap: the current start lies strictly after
        // the previous end.
        assert_eq!(cur_start - prev_end, Duration::nanoseconds(1));
        assert_eq!(cur_start - prev_start, Duration::days(30));
    }

    #[test]
    fn test_month_bounds_start_on_the_first() {
        let now = at(2025, 6, 15, 12);
        let (start, end) = PeriodWindow::CalendarMonth.bounds(now);
        assert_eq!(start, at(2025, 6, 1, 0));
        assert_eq!(end, now);
    }

    #[test]
    fn test_month_previous_window_has_equal_length() {
        let now = at(2025, 6, 10, 0);
        let (cur_start, cur_end) = PeriodWindow::CalendarMonth.bounds(now);
        let (prev_start, prev_end) = PeriodWindow::CalendarMonth.previous_bounds(now);
        assert_eq!(cur_start - prev_end, Duration::nanoseconds(1));
        assert_eq!(cur_start - prev_start, cur_end - cur_start);
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(PeriodWindow::parse("30d"), Some(PeriodWindow::Rolling30Days));
        assert_eq!(PeriodWindow::parse("MONTH"), Some(PeriodWindow::CalendarMonth));
        assert_eq!(PeriodWindow::parse("year"), None);
    }
}
