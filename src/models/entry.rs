//! Journal entry types and identifiers.

use super::kinds::{EntryKind, ExposureResult, Priority};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    /// Creates a new entry ID from an existing string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh collision-resistant ID.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for EntryId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for EntryId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A captured journal entry.
///
/// Entries are created exactly once and never mutated; the store only ever
/// appends them or wipes everything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Unique identifier.
    pub id: EntryId,
    /// Capture timestamp (UTC wall clock). Out-of-order timestamps across
    /// the sequence are tolerated.
    pub timestamp: DateTime<Utc>,
    /// The kind-specific payload.
    #[serde(flatten)]
    pub payload: EntryPayload,
}

impl Entry {
    /// Creates a new entry with a fresh id and the current timestamp.
    #[must_use]
    pub fn now(payload: EntryPayload) -> Self {
        Self {
            id: EntryId::generate(),
            timestamp: Utc::now(),
            payload,
        }
    }

    /// Returns the entry kind.
    #[must_use]
    pub const fn kind(&self) -> EntryKind {
        self.payload.kind()
    }
}

/// Kind-specific entry payload, tagged by `kind` in serialized form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntryPayload {
    /// Crisis episode.
    Episode(Episode),
    /// Free-form idea.
    Idea(Idea),
    /// Anticipatory worry.
    Anticipation(Anticipation),
    /// Completed exposure.
    Success(Success),
    /// Voice note metadata.
    VoiceNote(VoiceNote),
}

impl EntryPayload {
    /// Returns the kind discriminator.
    #[must_use]
    pub const fn kind(&self) -> EntryKind {
        match self {
            Self::Episode(_) => EntryKind::Episode,
            Self::Idea(_) => EntryKind::Idea,
            Self::Anticipation(_) => EntryKind::Anticipation,
            Self::Success(_) => EntryKind::Success,
            Self::VoiceNote(_) => EntryKind::VoiceNote,
        }
    }
}

/// A logged panic/anxiety crisis event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    /// Where/when the crisis happened.
    pub situation: String,
    /// Anxiety intensity before restructuring (0–10).
    pub intensity_before: u8,
    /// Trigger tags. A free-text "other" trigger collapses into this list.
    pub triggers: Vec<String>,
    /// Detected cognitive distortion label.
    pub distortion: String,
    /// More realistic alternative thought.
    pub alternative_thought: String,
    /// Anxiety intensity after restructuring (0–10).
    pub intensity_after: u8,
    /// Physical symptom tags.
    pub symptoms: Vec<String>,
    /// Estimated duration in minutes, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
}

/// A free-form idea or belief entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Idea {
    /// Short title.
    pub title: String,
    /// The idea or belief text.
    pub body: String,
    /// Tag list (comma-split, trimmed, empties dropped).
    pub tags: Vec<String>,
    /// Suggested cognitive distortion, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_distortion: Option<String>,
    /// Working priority.
    pub priority: Priority,
}

/// A logged pre-event worry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anticipation {
    /// The feared future event.
    pub future_event: String,
    /// Predicted probability of the symptom before restructuring (0–100).
    pub symptom_probability_before: u8,
    /// Imagined catastrophe severity (0–10).
    pub catastrophe_severity: u8,
    /// Detected cognitive distortion label.
    pub distortion: String,
    /// More realistic alternative thought.
    pub alternative_thought: String,
    /// Predicted probability after restructuring (0–100).
    pub symptom_probability_after: u8,
    /// Outcome record, present only once the event has happened.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<AnticipationOutcome>,
}

impl Anticipation {
    /// Returns true if the anticipated event has a completed outcome.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.outcome.is_some()
    }
}

/// Recorded outcome of an anticipated event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnticipationOutcome {
    /// Whether the feared symptom actually occurred.
    pub symptom_occurred: bool,
    /// Real intensity experienced (0–10).
    pub real_intensity: u8,
    /// Free-form comment about how it went.
    pub comment: String,
}

/// A logged completed exposure exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Success {
    /// The exposure situation that was completed.
    pub situation: String,
    /// Duration in minutes (positive).
    pub duration_minutes: u32,
    /// Coping skill tags used during the exposure.
    pub skills: Vec<String>,
    /// How the exposure went.
    pub result: ExposureResult,
    /// What was learned from the experience.
    pub learning: String,
    /// Confidence level after the exposure (0–10).
    pub confidence_after: u8,
}

/// Metadata for a recorded voice note.
///
/// The duration is derived from the recording size rather than decoded from
/// the audio, so it is approximate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceNote {
    /// Note title.
    pub title: String,
    /// Short description of the recording.
    pub description: String,
    /// Approximate duration in seconds.
    pub approx_duration_secs: u32,
    /// Media type tag (e.g. `audio/wav`).
    pub media_type: String,
}

/// Splits a comma-separated tag string into trimmed, non-empty tags.
#[must_use]
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(ToString::to_string)
        .collect()
}
