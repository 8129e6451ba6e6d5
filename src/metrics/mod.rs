//! Resilience and metrics engine.
//!
//! Pure functions over a pre-filtered slice of journal entries. The engine
//! performs no I/O and never fails: malformed numeric data (a zero
//! before-intensity, for instance) is neutralized to a zero contribution
//! instead of poisoning an aggregate.
//!
//! The resilience index combines four normalized sub-scores with fixed
//! weights that sum to 1.0. A category with no eligible entries contributes
//! a norm of 0; weights are never renormalized.

mod types;
mod window;

pub use types::{DayClass, MetricsSummary, Trend, TrendDirection};
pub use window::PeriodWindow;

use crate::models::{Anticipation, Entry, EntryPayload, Episode, ExposureResult, Success};

/// Weight of the episode-count sub-score.
pub const WEIGHT_EPISODES: f64 = 0.30;
/// Weight of the intensity-reduction sub-score.
pub const WEIGHT_REDUCTION: f64 = 0.30;
/// Weight of the exposure-count sub-score.
pub const WEIGHT_EXPOSURES: f64 = 0.25;
/// Weight of the refuted-anticipation sub-score.
pub const WEIGHT_ANTICIPATIONS: f64 = 0.15;

/// Episode-count norm: linear decay from 1 at zero episodes to 0 at ten,
/// clamped at zero beyond that (ten or more episodes all score 0).
#[must_use]
pub fn episodes_norm(episode_count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let n = episode_count as f64;
    (1.0 - n / 10.0).max(0.0)
}

/// Exposure-count norm: saturates at five successes.
#[must_use]
pub fn exposures_norm(success_count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let n = success_count as f64;
    (n / 5.0).min(1.0)
}

/// Per-episode intensity reduction as a fraction of the before-intensity,
/// clamped to `[0, 1]`: a worsening episode (after-intensity above the
/// before-intensity) contributes 0 instead of dragging the mean negative.
///
/// A before-intensity of 0 is malformed input; it contributes 0 rather than
/// a division error or NaN.
#[must_use]
pub fn reduction_fraction(episode: &Episode) -> f64 {
    if episode.intensity_before == 0 {
        return 0.0;
    }
    let before = f64::from(episode.intensity_before);
    let after = f64::from(episode.intensity_after);
    let fraction = (before - after) / before;
    if fraction.is_finite() {
        fraction.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Mean reduction fraction over a set of episodes; 0 when empty.
#[must_use]
pub fn reduction_norm(episodes: &[&Episode]) -> f64 {
    if episodes.is_empty() {
        return 0.0;
    }
    let sum: f64 = episodes.iter().map(|e| reduction_fraction(e)).sum();
    #[allow(clippy::cast_precision_loss)]
    let count = episodes.len() as f64;
    sum / count
}

/// Fraction of completed anticipations whose feared symptom did not occur.
///
/// Anticipations without a completed outcome are excluded from both the
/// numerator and the denominator; an empty denominator yields 0.
#[must_use]
pub fn refuted_rate(anticipations: &[&Anticipation]) -> f64 {
    let completed: Vec<_> = anticipations.iter().filter(|a| a.is_completed()).collect();
    if completed.is_empty() {
        return 0.0;
    }
    let refuted = completed
        .iter()
        .filter(|a| a.outcome.as_ref().is_some_and(|o| !o.symptom_occurred))
        .count();
    #[allow(clippy::cast_precision_loss)]
    let rate = refuted as f64 / completed.len() as f64;
    rate
}

/// Computes the raw (unrounded) resilience index over a window of entries.
///
/// Always within `[0, 100]`: every norm lies in `[0, 1]` and the weights sum
/// to 1.0.
#[must_use]
pub fn resilience_index<'a, I>(entries: I) -> f64
where
    I: IntoIterator<Item = &'a Entry>,
{
    let buckets = Buckets::collect(entries);
    buckets.index()
}

/// Computes the full metrics summary over a window of entries.
#[must_use]
pub fn summarize<'a, I>(entries: I) -> MetricsSummary
where
    I: IntoIterator<Item = &'a Entry>,
{
    let buckets = Buckets::collect(entries);

    let episode_count = buckets.episodes.len();
    let exposure_count = buckets.successes.len();

    let avg_intensity = if episode_count == 0 {
        0.0
    } else {
        let sum: f64 = buckets
            .episodes
            .iter()
            .map(|e| f64::from(e.intensity_before))
            .sum();
        #[allow(clippy::cast_precision_loss)]
        let mean = sum / episode_count as f64;
        // One decimal place for display.
        (mean * 10.0).round() / 10.0
    };

    #[allow(clippy::cast_possible_truncation)]
    let avg_reduction = (reduction_norm(&buckets.episodes) * 100.0).round() as i32;

    let success_rate = if exposure_count == 0 {
        0
    } else {
        let no_symptoms = buckets
            .successes
            .iter()
            .filter(|s| s.result == ExposureResult::NoSymptoms)
            .count();
        percentage(no_symptoms, exposure_count)
    };

    let refuted = refuted_rate(&buckets.anticipations);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let refuted_pct = (refuted * 100.0).round() as u32;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let index = buckets.index().round() as u32;

    MetricsSummary {
        resilience_index: index,
        episode_count,
        avg_intensity,
        avg_reduction,
        exposure_count,
        success_rate,
        refuted_rate: refuted_pct,
    }
}

/// Classifies a single day's entries for the calendar view.
///
/// Priority order: any episode marks the day a crisis; otherwise successes
/// mark it a success day (or a managed day when none were symptom-free);
/// otherwise anticipations or ideas mark an idea day. Returns `None` for a
/// day with no classifiable entries.
#[must_use]
pub fn classify_day<'a, I>(entries: I) -> Option<DayClass>
where
    I: IntoIterator<Item = &'a Entry>,
{
    let buckets = Buckets::collect(entries);

    if !buckets.episodes.is_empty() {
        return Some(DayClass::Crisis);
    }
    if !buckets.successes.is_empty() {
        let symptom_free = buckets
            .successes
            .iter()
            .any(|s| s.result == ExposureResult::NoSymptoms);
        return Some(if symptom_free {
            DayClass::Success
        } else {
            DayClass::Managed
        });
    }
    if !buckets.anticipations.is_empty() || buckets.idea_count > 0 {
        return Some(DayClass::Idea);
    }
    None
}

/// Total exposure minutes across a day's success entries (calendar badge).
#[must_use]
pub fn exposure_minutes<'a, I>(entries: I) -> u32
where
    I: IntoIterator<Item = &'a Entry>,
{
    entries
        .into_iter()
        .filter_map(|e| match &e.payload {
            EntryPayload::Success(s) => Some(s.duration_minutes),
            _ => None,
        })
        .sum()
}

/// Rounded percentage of `part` over `whole` (`whole` must be non-zero).
fn percentage(part: usize, whole: usize) -> u32 {
    #[allow(clippy::cast_precision_loss)]
    let ratio = part as f64 / whole as f64;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let pct = (ratio * 100.0).round() as u32;
    pct
}

/// Entries bucketed by the kinds the engine cares about.
struct Buckets<'a> {
    episodes: Vec<&'a Episode>,
    successes: Vec<&'a Success>,
    anticipations: Vec<&'a Anticipation>,
    idea_count: usize,
}

impl<'a> Buckets<'a> {
    fn collect<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a Entry>,
    {
        let mut episodes = Vec::new();
        let mut successes = Vec::new();
        let mut anticipations = Vec::new();
        let mut idea_count = 0;

        for entry in entries {
            match &entry.payload {
                EntryPayload::Episode(e) => episodes.push(e),
                EntryPayload::Success(s) => successes.push(s),
                EntryPayload::Anticipation(a) => anticipations.push(a),
                EntryPayload::Idea(_) => idea_count += 1,
                EntryPayload::VoiceNote(_) => {},
            }
        }

        Self {
            episodes,
            successes,
            anticipations,
            idea_count,
        }
    }

    fn index(&self) -> f64 {
        100.0
            * (WEIGHT_EPISODES * episodes_norm(self.episodes.len())
                + WEIGHT_REDUCTION * reduction_norm(&self.episodes)
                + WEIGHT_EXPOSURES * exposures_norm(self.successes.len())
                + WEIGHT_ANTICIPATIONS * refuted_rate(&self.anticipations))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AnticipationOutcome, EntryPayload, Idea, Priority};
    use test_case::test_case;

    fn episode(before: u8, after: u8) -> Entry {
        Entry::now(EntryPayload::Episode(Episode {
            situation: "test".to_string(),
            intensity_before: before,
            triggers: vec![],
            distortion: String::new(),
            alternative_thought: String::new(),
            intensity_after: after,
            symptoms: vec![],
            duration_minutes: None,
        }))
    }

    fn success(result: ExposureResult, minutes: u32) -> Entry {
        Entry::now(EntryPayload::Success(Success {
            situation: "test".to_string(),
            duration_minutes: minutes,
            skills: vec![],
            result,
            learning: String::new(),
            confidence_after: 5,
        }))
    }

    fn anticipation(outcome: Option<bool>) -> Entry {
        Entry::now(EntryPayload::Anticipation(Anticipation {
            future_event: "test".to_string(),
            symptom_probability_before: 70,
            catastrophe_severity: 5,
            distortion: String::new(),
            alternative_thought: String::new(),
            symptom_probability_after: 30,
            outcome: outcome.map(|occurred| AnticipationOutcome {
                symptom_occurred: occurred,
                real_intensity: 2,
                comment: String::new(),
            }),
        }))
    }

    fn idea() -> Entry {
        Entry::now(EntryPayload::Idea(Idea {
            title: "t".to_string(),
            body: "b".to_string(),
            tags: vec![],
            suggested_distortion: None,
            priority: Priority::Low,
        }))
    }

    #[test_case(0, 1.0; "no episodes scores one")]
    #[test_case(5, 0.5; "halfway")]
    #[test_case(10, 0.0; "ten episodes scores zero")]
    #[test_case(20, 0.0; "clamped at zero beyond ten")]
    fn test_episodes_norm(count: usize, expected: f64) {
        assert!((episodes_norm(count) - expected).abs() < f64::EPSILON);
    }

    #[test_case(0, 0.0; "no successes")]
    #[test_case(5, 1.0; "saturation point")]
    #[test_case(8, 1.0; "saturates past five")]
    fn test_exposures_norm(count: usize, expected: f64) {
        assert!((exposures_norm(count) - expected).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_before_intensity_contributes_zero() {
        let entries = vec![episode(0, 0)];
        let summary = summarize(entries.iter());
        assert_eq!(summary.avg_reduction, 0);
        assert!(summary.resilience_index <= 100);
    }

    #[test]
    fn test_worsening_episode_contributes_zero_reduction() {
        // (1, 10) would be -900% unclamped; it must not push the mean (or
        // the raw index) below zero.
        let entries = vec![episode(1, 10)];
        let summary = summarize(entries.iter());
        assert_eq!(summary.avg_reduction, 0);

        let raw = resilience_index(entries.iter());
        assert!(raw >= 0.0);
        assert!(raw <= 100.0);
    }

    #[test]
    fn test_reduction_scenario_from_three_episodes() {
        // (8,4) -> 50%, (6,6) -> 0%, (5,0) -> 100%; mean 50%.
        let entries = vec![episode(8, 4), episode(6, 6), episode(5, 0)];
        let summary = summarize(entries.iter());
        assert_eq!(summary.avg_reduction, 50);
    }

    #[test]
    fn test_success_rate_scenario() {
        // Five successes, three symptom-free -> 60%.
        let entries = vec![
            success(ExposureResult::NoSymptoms, 5),
            success(ExposureResult::NoSymptoms, 5),
            success(ExposureResult::NoSymptoms, 5),
            success(ExposureResult::ManagedAnxiety, 5),
            success(ExposureResult::Partial, 5),
        ];
        let summary = summarize(entries.iter());
        assert_eq!(summary.success_rate, 60);
    }

    #[test]
    fn test_refuted_rate_excludes_incomplete() {
        // Two completed (one refuted), two incomplete.
        let entries = vec![
            anticipation(Some(false)),
            anticipation(Some(true)),
            anticipation(None),
            anticipation(None),
        ];
        let summary = summarize(entries.iter());
        assert_eq!(summary.refuted_rate, 50);
    }

    #[test]
    fn test_refuted_rate_zero_when_none_completed() {
        let entries = vec![anticipation(None), anticipation(None)];
        let summary = summarize(entries.iter());
        assert_eq!(summary.refuted_rate, 0);
    }

    #[test]
    fn test_index_zero_entries_reflects_empty_window() {
        // Empty window: episodes norm is 1 (no crises), everything else 0.
        // 100 * 0.30 = 30.
        let summary = summarize(std::iter::empty::<&Entry>());
        assert_eq!(summary.resilience_index, 30);
        assert_eq!(summary.episode_count, 0);
        assert!((summary.avg_intensity - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_index_near_maximal_is_97() {
        // A perfect 100 is unattainable: the reduction term needs at least
        // one episode, and any episode costs the episode-count term. The
        // best reachable score keeps a single fully-reduced episode.
        let mut entries: Vec<Entry> = (0..5)
            .map(|_| success(ExposureResult::NoSymptoms, 10))
            .collect();
        entries.push(anticipation(Some(false)));
        entries.push(episode(8, 0)); // reduction fraction 1.0

        // One episode: episodes_norm = 0.9, reduction = 1.0, exposures = 1.0,
        // refuted = 1.0 -> 100*(0.27 + 0.30 + 0.25 + 0.15) = 97.
        let summary = summarize(entries.iter());
        assert_eq!(summary.resilience_index, 97);
    }

    #[test]
    fn test_index_all_norms_zero_is_zero() {
        // Ten no-reduction episodes zero the episode and reduction terms;
        // no successes or completed anticipations zero the rest.
        let entries: Vec<Entry> = (0..10).map(|_| episode(5, 5)).collect();
        let summary = summarize(entries.iter());
        assert_eq!(summary.resilience_index, 0);
    }

    #[test]
    fn test_avg_intensity_one_decimal() {
        let entries = vec![episode(8, 4), episode(7, 3), episode(6, 2)];
        let summary = summarize(entries.iter());
        assert!((summary.avg_intensity - 7.0).abs() < f64::EPSILON);

        let entries = vec![episode(8, 4), episode(7, 3)];
        let summary = summarize(entries.iter());
        assert!((summary.avg_intensity - 7.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_classify_day_priority_order() {
        // Episode wins over everything.
        let entries = vec![episode(5, 2), success(ExposureResult::NoSymptoms, 5)];
        assert_eq!(classify_day(entries.iter()), Some(DayClass::Crisis));

        // Symptom-free success day.
        let entries = vec![success(ExposureResult::NoSymptoms, 5), idea()];
        assert_eq!(classify_day(entries.iter()), Some(DayClass::Success));

        // Managed day: successes but none symptom-free.
        let entries = vec![success(ExposureResult::Partial, 5)];
        assert_eq!(classify_day(entries.iter()), Some(DayClass::Managed));

        // Idea day via anticipation or idea.
        let entries = vec![anticipation(None)];
        assert_eq!(classify_day(entries.iter()), Some(DayClass::Idea));
        let entries = vec![idea()];
        assert_eq!(classify_day(entries.iter()), Some(DayClass::Idea));

        // Voice notes alone classify nothing.
        assert_eq!(classify_day(std::iter::empty::<&Entry>()), None);
    }

    #[test]
    fn test_exposure_minutes_sums_success_durations() {
        let entries = vec![
            success(ExposureResult::NoSymptoms, 10),
            success(ExposureResult::Partial, 15),
            episode(5, 2),
        ];
        assert_eq!(exposure_minutes(entries.iter()), 25);
    }
}
