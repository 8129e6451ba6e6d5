//! Metric output types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Aggregated metrics over one reporting window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    /// Weighted resilience index, rounded, 0 to 100.
    pub resilience_index: u32,
    /// Number of crisis episodes in the window.
    pub episode_count: usize,
    /// Mean before-intensity of episodes, one decimal place.
    pub avg_intensity: f64,
    /// Mean per-episode intensity reduction, rounded percent.
    pub avg_reduction: i32,
    /// Number of completed exposures in the window.
    pub exposure_count: usize,
    /// Percent of exposures completed without symptoms.
    pub success_rate: u32,
    /// Percent of completed anticipations whose feared symptom never came.
    pub refuted_rate: u32,
}

/// Direction of the resilience trend against the previous window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    /// Index improved by more than the noise threshold.
    Positive,
    /// Index dropped by more than the noise threshold.
    Negative,
    /// Within the noise threshold either way.
    Neutral,
}

/// Resilience index movement between the current window and the
/// immediately preceding window of equal length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    /// Direction of movement.
    pub direction: TrendDirection,
    /// Raw index delta (current minus previous).
    pub delta: f64,
}

/// Index changes within this band count as noise, not movement.
const NOISE_THRESHOLD: f64 = 2.0;

impl Trend {
    /// Compares two raw resilience indices.
    #[must_use]
    pub fn between(current: f64, previous: f64) -> Self {
        let delta = current - previous;
        let direction = if delta > NOISE_THRESHOLD {
            TrendDirection::Positive
        } else if delta < -NOISE_THRESHOLD {
            TrendDirection::Negative
        } else {
            TrendDirection::Neutral
        };
        Self { direction, delta }
    }

    /// Human-readable trend label.
    #[must_use]
    pub fn label(&self) -> String {
        match self.direction {
            TrendDirection::Positive => {
                format!("+{:.1} vs periodo anterior", self.delta)
            },
            TrendDirection::Negative => {
                format!("{:.1} vs periodo anterior", self.delta)
            },
            TrendDirection::Neutral => "Sin cambios significativos".to_string(),
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Classification of a calendar day from its entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayClass {
    /// At least one crisis episode.
    Crisis,
    /// At least one symptom-free exposure, no crises.
    Success,
    /// Exposures happened but none symptom-free.
    Managed,
    /// Only ideas or anticipations.
    Idea,
}

impl DayClass {
    /// Returns the class as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Crisis => "crisis",
            Self::Success => "success",
            Self::Managed => "managed",
            Self::Idea => "idea",
        }
    }
}

impl fmt::Display for DayClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trend_positive_above_threshold() {
        let t = Trend::between(64.0, 60.0);
        assert_eq!(t.direction, TrendDirection::Positive);
        assert_eq!(t.label(), "+4.0 vs periodo anterior");
    }

    #[test]
    fn test_trend_negative_below_threshold() {
        let t = Trend::between(55.0, 60.5);
        assert_eq!(t.direction, TrendDirection::Negative);
        assert_eq!(t.label(), "-5.5 vs periodo anterior");
    }

    #[test]
    fn test_trend_small_delta_is_neutral() {
        let t = Trend::between(61.5, 60.0);
        assert_eq!(t.direction, TrendDirection::Neutral);
        assert_eq!(t.label(), "Sin cambios significativos");

        let t = Trend::between(58.5, 60.0);
        assert_eq!(t.direction, TrendDirection::Neutral);
    }

    #[test]
    fn test_trend_exact_threshold_is_neutral() {
        assert_eq!(Trend::between(62.0, 60.0).direction, TrendDirection::Neutral);
        assert_eq!(Trend::between(58.0, 60.0).direction, TrendDirection::Neutral);
    }
}
