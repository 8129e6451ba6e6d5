//! Journal capture and dashboard service.
//!
//! Validates raw capture input, turns it into typed payloads and appends via
//! the store. Range checks live here at the service boundary; the store
//! trusts its input and the metrics engine stays defensive regardless.

use crate::metrics::{self, DayClass, MetricsSummary, PeriodWindow, Trend};
use crate::models::{
    split_tags, Anticipation, AnticipationOutcome, Episode, EntryPayload, ExposureResult, Idea,
    Priority, Success, VoiceNote,
};
use crate::storage::{AppendResult, JournalStore};
use crate::{Error, Result};
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};

/// Raw input for logging a crisis episode.
#[derive(Debug, Clone, Default)]
pub struct EpisodeRequest {
    /// Where/when the crisis happened.
    pub situation: String,
    /// Anxiety intensity before restructuring (0–10).
    pub intensity_before: u8,
    /// Selected trigger tags.
    pub triggers: Vec<String>,
    /// Free-text "other" trigger, folded into the trigger list.
    pub other_trigger: Option<String>,
    /// Detected cognitive distortion label.
    pub distortion: String,
    /// More realistic alternative thought.
    pub alternative_thought: String,
    /// Anxiety intensity after restructuring (0–10).
    pub intensity_after: u8,
    /// Physical symptom tags.
    pub symptoms: Vec<String>,
    /// Estimated duration in minutes, when known.
    pub duration_minutes: Option<u32>,
}

/// Raw input for logging an idea.
#[derive(Debug, Clone, Default)]
pub struct IdeaRequest {
    /// Short title.
    pub title: String,
    /// The idea or belief text.
    pub body: String,
    /// Comma-separated tag string.
    pub tags: String,
    /// Suggested cognitive distortion, if any.
    pub suggested_distortion: Option<String>,
    /// Working priority.
    pub priority: Priority,
}

/// Raw input for logging an anticipatory worry.
#[derive(Debug, Clone, Default)]
pub struct AnticipationRequest {
    /// The feared future event.
    pub future_event: String,
    /// Predicted symptom probability before restructuring (0–100).
    pub symptom_probability_before: u8,
    /// Imagined catastrophe severity (0–10).
    pub catastrophe_severity: u8,
    /// Detected cognitive distortion label.
    pub distortion: String,
    /// More realistic alternative thought.
    pub alternative_thought: String,
    /// Predicted symptom probability after restructuring (0–100).
    pub symptom_probability_after: u8,
    /// Outcome, when the event has already happened.
    pub outcome: Option<OutcomeRequest>,
}

/// Raw input for an anticipation outcome.
#[derive(Debug, Clone, Default)]
pub struct OutcomeRequest {
    /// Whether the feared symptom actually occurred.
    pub symptom_occurred: bool,
    /// Real intensity experienced (0–10).
    pub real_intensity: u8,
    /// Free-form comment.
    pub comment: String,
}

/// Raw input for logging a completed exposure.
#[derive(Debug, Clone)]
pub struct SuccessRequest {
    /// The exposure situation that was completed.
    pub situation: String,
    /// Duration in minutes (must be positive).
    pub duration_minutes: u32,
    /// Coping skill tags used.
    pub skills: Vec<String>,
    /// How the exposure went.
    pub result: ExposureResult,
    /// What was learned.
    pub learning: String,
    /// Confidence after the exposure (0–10).
    pub confidence_after: u8,
}

/// Raw input for logging a voice note.
#[derive(Debug, Clone, Default)]
pub struct VoiceNoteRequest {
    /// Note title.
    pub title: String,
    /// Short description of the recording.
    pub description: String,
    /// Recording size in bytes, used to approximate the duration.
    pub recording_bytes: u64,
    /// Media type tag.
    pub media_type: String,
}

/// Assembled dashboard for one reporting window.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    /// The reporting window.
    pub window: PeriodWindow,
    /// Metrics over the current window.
    pub summary: MetricsSummary,
    /// Movement against the immediately preceding window.
    pub trend: Trend,
}

/// One classified day in the calendar month view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySummary {
    /// The day.
    pub date: NaiveDate,
    /// Day classification, when the day has classifiable entries.
    pub class: Option<DayClass>,
    /// Number of entries captured that day.
    pub entry_count: usize,
    /// Total exposure minutes that day.
    pub exposure_minutes: u32,
}

/// Rough voice-note bitrate used to estimate duration from recording size.
const VOICE_NOTE_BYTES_PER_SEC: u64 = 16_000;

/// Capture, dashboard and calendar-view orchestration over the store.
pub struct JournalService {
    store: JournalStore,
}

impl JournalService {
    /// Creates a service over an open store.
    #[must_use]
    pub const fn new(store: JournalStore) -> Self {
        Self { store }
    }

    /// Returns the underlying store.
    #[must_use]
    pub const fn store(&self) -> &JournalStore {
        &self.store
    }

    /// Returns the underlying store mutably.
    pub const fn store_mut(&mut self) -> &mut JournalStore {
        &mut self.store
    }

    /// Logs a crisis episode.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the situation is empty, an intensity is
    /// out of the 0–10 scale or the duration is zero.
    pub fn log_episode(&mut self, request: EpisodeRequest) -> Result<AppendResult> {
        require_text("situation", &request.situation)?;
        check_scale("intensity_before", request.intensity_before, 10)?;
        check_scale("intensity_after", request.intensity_after, 10)?;
        if request.duration_minutes == Some(0) {
            return Err(Error::InvalidInput(
                "duration_minutes must be positive".to_string(),
            ));
        }

        let mut triggers = request.triggers;
        if let Some(other) = request.other_trigger {
            let other = other.trim().to_string();
            if !other.is_empty() {
                triggers.push(other);
            }
        }

        Ok(self.store.append(EntryPayload::Episode(Episode {
            situation: request.situation,
            intensity_before: request.intensity_before,
            triggers,
            distortion: request.distortion,
            alternative_thought: request.alternative_thought,
            intensity_after: request.intensity_after,
            symptoms: request.symptoms,
            duration_minutes: request.duration_minutes,
        })))
    }

    /// Logs an idea.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the title or body is empty.
    pub fn log_idea(&mut self, request: IdeaRequest) -> Result<AppendResult> {
        require_text("title", &request.title)?;
        require_text("body", &request.body)?;

        Ok(self.store.append(EntryPayload::Idea(Idea {
            title: request.title,
            body: request.body,
            tags: split_tags(&request.tags),
            suggested_distortion: request.suggested_distortion,
            priority: request.priority,
        })))
    }

    /// Logs an anticipatory worry.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the event is empty or any rating falls
    /// outside its scale (probabilities 0–100, severities 0–10).
    pub fn log_anticipation(&mut self, request: AnticipationRequest) -> Result<AppendResult> {
        require_text("future_event", &request.future_event)?;
        check_scale(
            "symptom_probability_before",
            request.symptom_probability_before,
            100,
        )?;
        check_scale(
            "symptom_probability_after",
            request.symptom_probability_after,
            100,
        )?;
        check_scale("catastrophe_severity", request.catastrophe_severity, 10)?;

        let outcome = match request.outcome {
            Some(o) => {
                check_scale("real_intensity", o.real_intensity, 10)?;
                Some(AnticipationOutcome {
                    symptom_occurred: o.symptom_occurred,
                    real_intensity: o.real_intensity,
                    comment: o.comment,
                })
            },
            None => None,
        };

        Ok(self
            .store
            .append(EntryPayload::Anticipation(Anticipation {
                future_event: request.future_event,
                symptom_probability_before: request.symptom_probability_before,
                catastrophe_severity: request.catastrophe_severity,
                distortion: request.distortion,
                alternative_thought: request.alternative_thought,
                symptom_probability_after: request.symptom_probability_after,
                outcome,
            })))
    }

    /// Logs a completed exposure.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the situation is empty, the duration is
    /// zero or the confidence is out of the 0–10 scale.
    pub fn log_success(&mut self, request: SuccessRequest) -> Result<AppendResult> {
        require_text("situation", &request.situation)?;
        if request.duration_minutes == 0 {
            return Err(Error::InvalidInput(
                "duration_minutes must be positive".to_string(),
            ));
        }
        check_scale("confidence_after", request.confidence_after, 10)?;

        Ok(self.store.append(EntryPayload::Success(Success {
            situation: request.situation,
            duration_minutes: request.duration_minutes,
            skills: request.skills,
            result: request.result,
            learning: request.learning,
            confidence_after: request.confidence_after,
        })))
    }

    /// Logs a voice note, approximating the duration from the recording size.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the title is empty.
    pub fn log_voice_note(&mut self, request: VoiceNoteRequest) -> Result<AppendResult> {
        require_text("title", &request.title)?;

        #[allow(clippy::cast_possible_truncation)]
        let approx_duration_secs =
            (request.recording_bytes / VOICE_NOTE_BYTES_PER_SEC).min(u64::from(u32::MAX)) as u32;

        Ok(self.store.append(EntryPayload::VoiceNote(VoiceNote {
            title: request.title,
            description: request.description,
            approx_duration_secs,
            media_type: request.media_type,
        })))
    }

    /// Assembles the dashboard for a window ending at `now`.
    #[must_use]
    pub fn dashboard(&self, window: PeriodWindow, now: DateTime<Utc>) -> Dashboard {
        let (start, end) = window.bounds(now);
        let current = self.store.entries_in_range(start, end);
        let summary = metrics::summarize(current.iter().copied());

        let (prev_start, prev_end) = window.previous_bounds(now);
        let previous = self.store.entries_in_range(prev_start, prev_end);

        let trend = Trend::between(
            metrics::resilience_index(current.iter().copied()),
            metrics::resilience_index(previous.iter().copied()),
        );

        Dashboard {
            window,
            summary,
            trend,
        }
    }

    /// Classifies every day of a calendar month for the month view.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an impossible year/month pair.
    pub fn month_view(&self, year: i32, month: u32) -> Result<Vec<DaySummary>> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| Error::InvalidInput(format!("invalid month: {year}-{month:02}")))?;

        let mut days = Vec::new();
        let mut date = first;
        while date.month() == month {
            let start = date.and_hms_opt(0, 0, 0).map(|n| n.and_utc());
            let Some(start) = start else { break };
            let end = start + Duration::days(1) - Duration::nanoseconds(1);

            let entries = self.store.entries_in_range(start, end);
            days.push(DaySummary {
                date,
                class: metrics::classify_day(entries.iter().copied()),
                entry_count: entries.len(),
                exposure_minutes: metrics::exposure_minutes(entries.iter().copied()),
            });

            match date.succ_opt() {
                Some(next) => date = next,
                None => break,
            }
        }

        Ok(days)
    }
}

/// Rejects empty or whitespace-only required text.
fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::InvalidInput(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Rejects a rating outside `0..=max`.
fn check_scale(field: &str, value: u8, max: u8) -> Result<()> {
    if value > max {
        return Err(Error::InvalidInput(format!(
            "{field} must be between 0 and {max}, got {value}"
        )));
    }
    Ok(())
}
