use serde::{Deserialize, Serialize};

pub const SCORE_MAX: u8 = 10;

/// The four 0–10 scores derived from a tally. Never stored apart from the
/// counts that produced them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct DerivedMetrics {
    pub rating: u8,
    pub intensity: u8,
    pub decision: u8,
    pub positioning: u8,
}

impl DerivedMetrics {
    /// Mean of the four scores, rounded to one decimal.
    pub fn overall_score(&self) -> f64 {
        let sum = self.rating as f64
            + self.intensity as f64
            + self.decision as f64
            + self.positioning as f64;
        round_one_decimal(sum / 4.0)
    }

    pub fn band(&self) -> PerformanceBand {
        PerformanceBand::from_score(self.overall_score())
    }
}

/// Coarse verdict printed on reports next to the overall score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum PerformanceBand {
    Excellent,
    Good,
    Regular,
    Weak,
}

impl PerformanceBand {
    pub fn from_score(score: f64) -> Self {
        if score >= 8.5 {
            PerformanceBand::Excellent
        } else if score >= 7.0 {
            PerformanceBand::Good
        } else if score >= 5.0 {
            PerformanceBand::Regular
        } else {
            PerformanceBand::Weak
        }
    }
}

pub(crate) fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Round half away from zero, then clamp into `0..=10`.
pub(crate) fn to_score(value: f64) -> u8 {
    if !value.is_finite() {
        return 0;
    }
    value.round().clamp(0.0, SCORE_MAX as f64) as u8
}
