//! Entry kind and payload enums.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Journal entry kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// A panic/anxiety crisis event with before/after intensity ratings.
    Episode,
    /// A free-form idea or belief to work on later.
    Idea,
    /// A pre-event worry with predicted probability and optional outcome.
    Anticipation,
    /// A completed exposure exercise with its result and learning.
    Success,
    /// A recorded voice note (metadata only).
    VoiceNote,
}

impl EntryKind {
    /// Returns all entry kinds.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Episode,
            Self::Idea,
            Self::Anticipation,
            Self::Success,
            Self::VoiceNote,
        ]
    }

    /// Returns the kind as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Episode => "episode",
            Self::Idea => "idea",
            Self::Anticipation => "anticipation",
            Self::Success => "success",
            Self::VoiceNote => "voice_note",
        }
    }

    /// Parses a kind from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "episode" => Some(Self::Episode),
            "idea" => Some(Self::Idea),
            "anticipation" => Some(Self::Anticipation),
            "success" => Some(Self::Success),
            "voice_note" | "voice-note" | "voicenote" => Some(Self::VoiceNote),
            _ => None,
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Priority assigned to an idea entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Can wait.
    Low,
    /// Worth working on soon.
    #[default]
    Medium,
    /// Address as soon as possible.
    High,
}

impl Priority {
    /// Returns the priority as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Parses a priority from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" | "baja" => Some(Self::Low),
            "medium" | "media" => Some(Self::Medium),
            "high" | "alta" => Some(Self::High),
            _ => None,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of an exposure exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExposureResult {
    /// Completed without symptoms.
    NoSymptoms,
    /// Symptoms appeared but were managed.
    ManagedAnxiety,
    /// Partially completed.
    Partial,
}

impl ExposureResult {
    /// Returns the result as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NoSymptoms => "no_symptoms",
            Self::ManagedAnxiety => "managed_anxiety",
            Self::Partial => "partial",
        }
    }

    /// Parses an exposure result from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "no_symptoms" | "no-symptoms" | "sin_sintomas" => Some(Self::NoSymptoms),
            "managed_anxiety" | "managed-anxiety" | "ansiedad_manejada" => {
                Some(Self::ManagedAnxiety)
            },
            "partial" | "parcial" => Some(Self::Partial),
            _ => None,
        }
    }
}

impl fmt::Display for ExposureResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_roundtrip() {
        for kind in EntryKind::all() {
            assert_eq!(EntryKind::parse(kind.as_str()), Some(*kind));
        }
    }

    #[test]
    fn test_kind_parse_aliases() {
        assert_eq!(EntryKind::parse("voice-note"), Some(EntryKind::VoiceNote));
        assert_eq!(EntryKind::parse("EPISODE"), Some(EntryKind::Episode));
        assert_eq!(EntryKind::parse("unknown"), None);
    }

    #[test]
    fn test_exposure_result_spanish_aliases() {
        assert_eq!(
            ExposureResult::parse("sin_sintomas"),
            Some(ExposureResult::NoSymptoms)
        );
        assert_eq!(
            ExposureResult::parse("ansiedad_manejada"),
            Some(ExposureResult::ManagedAnxiety)
        );
    }

    #[test]
    fn test_priority_default() {
        assert_eq!(Priority::default(), Priority::Medium);
    }
}
