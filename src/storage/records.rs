//! Auxiliary persisted records: user settings and calendar auth.

use serde::{Deserialize, Serialize};

/// User settings record.
///
/// Unknown persisted fields are ignored and missing fields take their
/// defaults, so older records keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Persist automatically after every capture.
    pub auto_save: bool,
    /// Voice-note capture enabled.
    pub voice_notes: bool,
    /// Daily journaling reminder enabled.
    pub daily_reminder: bool,
    /// Notifications for upcoming calendar events enabled.
    pub event_notifications: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auto_save: true,
            voice_notes: false,
            daily_reminder: false,
            event_notifications: false,
        }
    }
}

/// Calendar auth record: an authenticated flag plus an opaque access token.
///
/// Token acquisition and refresh happen outside this crate; the store only
/// holds the blob.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthRecord {
    /// Whether a calendar account is connected.
    pub authenticated: bool,
    /// Opaque access token for the calendar API.
    pub access_token: Option<String>,
}
