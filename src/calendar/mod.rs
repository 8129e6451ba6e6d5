//! Read-only Google Calendar collaborator.
//!
//! Fetches upcoming events from the primary calendar with a stored access
//! token. Any failure (no token, network, bad response) degrades to an empty
//! event list with a log line; the journal never depends on the calendar.
//! Token acquisition and refresh happen outside this crate.

use crate::storage::AuthRecord;
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use std::time::Duration as StdDuration;

/// Events endpoint for the primary calendar.
const EVENTS_URL: &str = "https://www.googleapis.com/calendar/v3/calendars/primary/events";

/// How far ahead to look.
const LOOKAHEAD_DAYS: i64 = 30;

/// Maximum number of events fetched.
const MAX_RESULTS: u32 = 50;

/// An upcoming calendar event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpcomingEvent {
    /// Event title.
    pub summary: String,
    /// Event start, when the calendar provides one.
    pub start: Option<DateTime<Utc>>,
    /// Whole-day date for all-day events (ISO `YYYY-MM-DD`).
    pub start_date: Option<String>,
}

/// Upcoming-events client.
pub struct CalendarClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl CalendarClient {
    /// Creates a client with default timeouts.
    #[must_use]
    pub fn new() -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(StdDuration::from_secs(15))
            .connect_timeout(StdDuration::from_secs(5))
            .build()
            .unwrap_or_else(|err| {
                tracing::warn!("failed to build calendar HTTP client: {err}");
                reqwest::blocking::Client::new()
            });
        Self {
            client,
            base_url: EVENTS_URL.to_string(),
        }
    }

    /// Overrides the events endpoint.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetches the next 30 days of events, at most 50, ordered by start.
    ///
    /// Infallible by contract: without a usable token or on any request
    /// failure this returns an empty list and logs the reason.
    #[must_use]
    pub fn upcoming_events(&self, auth: &AuthRecord, now: DateTime<Utc>) -> Vec<UpcomingEvent> {
        let Some(token) = auth.access_token.as_ref().filter(|_| auth.authenticated) else {
            tracing::debug!("calendar not connected, skipping event fetch");
            return Vec::new();
        };

        match self.fetch(token, now) {
            Ok(events) => events,
            Err(e) => {
                tracing::warn!("calendar event fetch failed: {e}");
                Vec::new()
            },
        }
    }

    fn fetch(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> std::result::Result<Vec<UpcomingEvent>, String> {
        let time_max = now + Duration::days(LOOKAHEAD_DAYS);

        let response = self
            .client
            .get(&self.base_url)
            .bearer_auth(token)
            .query(&[
                ("timeMin", now.to_rfc3339()),
                ("timeMax", time_max.to_rfc3339()),
                ("showDeleted", "false".to_string()),
                ("singleEvents", "true".to_string()),
                ("maxResults", MAX_RESULTS.to_string()),
                ("orderBy", "startTime".to_string()),
            ])
            .send()
            .map_err(|e| e.to_string())?;

        if !response.status().is_success() {
            return Err(format!("API returned status: {}", response.status()));
        }

        let body: EventsResponse = response.json().map_err(|e| e.to_string())?;

        Ok(body
            .items
            .into_iter()
            .map(|item| UpcomingEvent {
                summary: item.summary.unwrap_or_else(|| "(sin título)".to_string()),
                start: item.start.as_ref().and_then(|s| s.date_time),
                start_date: item.start.and_then(|s| s.date),
            })
            .collect())
    }
}

impl Default for CalendarClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Events list response.
#[derive(Debug, Deserialize)]
struct EventsResponse {
    #[serde(default)]
    items: Vec<EventItem>,
}

/// One event in the response.
#[derive(Debug, Deserialize)]
struct EventItem {
    summary: Option<String>,
    start: Option<EventStart>,
}

/// Event start: timed events carry `dateTime`, all-day events carry `date`.
#[derive(Debug, Deserialize)]
struct EventStart {
    #[serde(rename = "dateTime")]
    date_time: Option<DateTime<Utc>>,
    date: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_authenticated_yields_empty() {
        let client = CalendarClient::new();
        let auth = AuthRecord::default();
        assert!(client.upcoming_events(&auth, Utc::now()).is_empty());
    }

    #[test]
    fn test_token_without_authenticated_flag_yields_empty() {
        let client = CalendarClient::new();
        let auth = AuthRecord {
            authenticated: false,
            access_token: Some("token".to_string()),
        };
        assert!(client.upcoming_events(&auth, Utc::now()).is_empty());
    }

    #[test]
    fn test_unreachable_endpoint_yields_empty() {
        let client = CalendarClient::new().with_base_url("http://127.0.0.1:1/events");
        let auth = AuthRecord {
            authenticated: true,
            access_token: Some("token".to_string()),
        };
        assert!(client.upcoming_events(&auth, Utc::now()).is_empty());
    }

    #[test]
    fn test_events_response_parses_both_start_shapes() {
        let json = r#"{
            "items": [
                {"summary": "Cita médica", "start": {"dateTime": "2025-06-20T09:00:00Z"}},
                {"summary": "Viaje", "start": {"date": "2025-06-25"}},
                {"start": {"date": "2025-06-26"}}
            ]
        }"#;
        let parsed: EventsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.items.len(), 3);
        assert!(parsed.items[0].start.as_ref().unwrap().date_time.is_some());
        assert_eq!(
            parsed.items[1].start.as_ref().unwrap().date.as_deref(),
            Some("2025-06-25")
        );
        assert!(parsed.items[2].summary.is_none());
    }
}
