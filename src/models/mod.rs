//! Data models for anxietyflow.
//!
//! This module contains the typed journal entry union and its supporting
//! enums.

mod entry;
mod kinds;

pub use entry::{
    Anticipation, AnticipationOutcome, Entry, EntryId, EntryPayload, Episode, Idea, Success,
    VoiceNote, split_tags,
};
pub use kinds::{EntryKind, ExposureResult, Priority};
