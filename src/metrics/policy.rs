use serde::{Deserialize, Serialize};

use crate::tally::{ActionCategory, ActionCounts};

use super::types::{to_score, DerivedMetrics};

use ActionCategory::*;

pub const GOOD_PASSES: [ActionCategory; 3] = [GoodOffensivePass, KeyPass, LineBreakingPass];
pub const BAD_PASSES: [ActionCategory; 2] = [BadPass, BadDefensivePass];
pub const NEUTRAL_PASSES: [ActionCategory; 1] = [BackPass];
pub const GOOD_DEFENSE: [ActionCategory; 5] =
    [Tackle, Interception, BallRecovery, CounterPress, AerialWon];
pub const BAD_DEFENSE: [ActionCategory; 1] = [AerialLost];

/// Score given to a ratio whose denominator is empty: no data is neutral.
pub const NO_DATA_SCORE: f64 = 5.0;

/// Actions per intensity point.
const ACTIONS_PER_INTENSITY_POINT: f64 = 5.0;

/// Total actions at which the volume-scaled policy stops discounting.
const VOLUME_SATURATION: f64 = 25.0;

/// A weighting that turns a tally into scores. Implementations must be pure:
/// the same counts always produce the same metrics.
pub trait MetricsPolicy {
    fn derive(&self, counts: &ActionCounts) -> DerivedMetrics;
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum MetricsPolicyKind {
    #[default]
    Ratio,
    VolumeScaled,
}

impl MetricsPolicyKind {
    pub fn derive(&self, counts: &ActionCounts) -> DerivedMetrics {
        match self {
            MetricsPolicyKind::Ratio => RatioPolicy.derive(counts),
            MetricsPolicyKind::VolumeScaled => VolumeScaledPolicy.derive(counts),
        }
    }
}

fn intensity(counts: &ActionCounts) -> u8 {
    to_score(counts.total() as f64 / ACTIONS_PER_INTENSITY_POINT)
}

/// `good / (good + bad)` or `None` when both are zero.
fn ratio(good: u32, bad: u32) -> Option<f64> {
    let denominator = good as f64 + bad as f64;
    if denominator > 0.0 {
        Some(good as f64 / denominator)
    } else {
        None
    }
}

/// Primary weighting: pass quality and defensive success as plain ratios.
#[derive(Debug, Clone, Copy, Default)]
pub struct RatioPolicy;

impl MetricsPolicy for RatioPolicy {
    fn derive(&self, counts: &ActionCounts) -> DerivedMetrics {
        let intensity = intensity(counts);

        let good_passes = counts.sum_of(&GOOD_PASSES);
        let other_passes = counts
            .sum_of(&BAD_PASSES)
            .saturating_add(counts.sum_of(&NEUTRAL_PASSES));
        let decision = to_score(
            ratio(good_passes, other_passes)
                .map(|r| r * 10.0)
                .unwrap_or(NO_DATA_SCORE),
        );

        let positioning = to_score(
            ratio(counts.sum_of(&GOOD_DEFENSE), counts.sum_of(&BAD_DEFENSE))
                .map(|r| r * 10.0)
                .unwrap_or(NO_DATA_SCORE),
        );

        let rating =
            to_score((intensity as f64 + decision as f64 + positioning as f64) / 3.0);

        DerivedMetrics {
            rating,
            intensity,
            decision,
            positioning,
        }
    }
}

/// Alternate weighting: positive share of actions, discounted until the
/// session has seen enough volume to trust it.
#[derive(Debug, Clone, Copy, Default)]
pub struct VolumeScaledPolicy;

impl VolumeScaledPolicy {
    const POSITIVE: [ActionCategory; 12] = [
        GoodOffensivePass,
        KeyPass,
        LineBreakingPass,
        Goal,
        Assist,
        ShotOnTarget,
        Cross,
        Tackle,
        Interception,
        BallRecovery,
        CounterPress,
        AerialWon,
    ];
    const NEGATIVE: [ActionCategory; 4] = [BadPass, BadDefensivePass, ShotOffTarget, AerialLost];
}

impl MetricsPolicy for VolumeScaledPolicy {
    fn derive(&self, counts: &ActionCounts) -> DerivedMetrics {
        let volume = (counts.total() as f64 / VOLUME_SATURATION).min(1.0);
        let scaled = |share: Option<f64>| to_score(share.unwrap_or(0.5) * 10.0 * volume);

        let other_passes = counts
            .sum_of(&BAD_PASSES)
            .saturating_add(counts.sum_of(&NEUTRAL_PASSES));

        DerivedMetrics {
            rating: scaled(ratio(
                counts.sum_of(&Self::POSITIVE),
                counts.sum_of(&Self::NEGATIVE),
            )),
            intensity: intensity(counts),
            decision: scaled(ratio(counts.sum_of(&GOOD_PASSES), other_passes)),
            positioning: scaled(ratio(
                counts.sum_of(&GOOD_DEFENSE),
                counts.sum_of(&BAD_DEFENSE),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts_with(entries: &[(ActionCategory, u32)]) -> ActionCounts {
        let mut counts = ActionCounts::new();
        for (category, n) in entries {
            for _ in 0..*n {
                counts.increment(*category);
            }
        }
        counts
    }

    #[test]
    fn ratio_end_to_end_example() {
        let counts = counts_with(&[(GoodOffensivePass, 3), (BadPass, 1), (Goal, 1), (Assist, 1)]);
        // total is 6 here: 3 + 1 + 1 + 1
        let metrics = RatioPolicy.derive(&counts);
        assert_eq!(metrics.intensity, 1);
        assert_eq!(metrics.decision, 8);
        assert_eq!(metrics.positioning, 5);
        assert_eq!(metrics.rating, 5);
    }

    #[test]
    fn empty_denominators_default_to_five() {
        let counts = counts_with(&[(Goal, 2)]);
        let metrics = RatioPolicy.derive(&counts);
        assert_eq!(metrics.decision, 5);
        assert_eq!(metrics.positioning, 5);
    }

    #[test]
    fn back_passes_count_against_decision() {
        let counts = counts_with(&[(KeyPass, 1), (BackPass, 1)]);
        assert_eq!(RatioPolicy.derive(&counts).decision, 5);
    }

    #[test]
    fn intensity_caps_at_ten() {
        let counts = counts_with(&[(Tackle, 200)]);
        let metrics = RatioPolicy.derive(&counts);
        assert_eq!(metrics.intensity, 10);
        assert_eq!(metrics.positioning, 10);
        assert_eq!(metrics.rating, 8);
    }

    #[test]
    fn aerial_losses_lower_positioning() {
        let counts = counts_with(&[(AerialWon, 1), (AerialLost, 3)]);
        assert_eq!(RatioPolicy.derive(&counts).positioning, 3);
    }

    #[test]
    fn policies_are_pure() {
        let counts = counts_with(&[(LineBreakingPass, 4), (BadDefensivePass, 2), (Interception, 3)]);
        assert_eq!(RatioPolicy.derive(&counts), RatioPolicy.derive(&counts));
        assert_eq!(
            VolumeScaledPolicy.derive(&counts),
            VolumeScaledPolicy.derive(&counts)
        );
    }

    #[test]
    fn volume_scaled_discounts_thin_sessions() {
        let thin = counts_with(&[(KeyPass, 2)]);
        let metrics = VolumeScaledPolicy.derive(&thin);
        // volume 2/25 → 10 * 0.08 = 0.8
        assert_eq!(metrics.decision, 1);
        assert_eq!(metrics.rating, 1);
        // empty defensive ratio is 0.5 → 0.4
        assert_eq!(metrics.positioning, 0);

        let saturated = counts_with(&[(KeyPass, 20), (BadPass, 5)]);
        let metrics = VolumeScaledPolicy.derive(&saturated);
        assert_eq!(metrics.decision, 8);
        assert_eq!(metrics.intensity, 5);
    }

    #[test]
    fn kind_dispatches_to_policy() {
        let counts = counts_with(&[(Goal, 1)]);
        assert_eq!(MetricsPolicyKind::Ratio.derive(&counts), RatioPolicy.derive(&counts));
        assert_eq!(
            MetricsPolicyKind::VolumeScaled.derive(&counts),
            VolumeScaledPolicy.derive(&counts)
        );
    }
}
