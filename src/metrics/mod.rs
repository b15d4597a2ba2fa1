mod policy;
mod types;

pub use policy::{
    MetricsPolicy, MetricsPolicyKind, RatioPolicy, VolumeScaledPolicy, BAD_DEFENSE, BAD_PASSES,
    GOOD_DEFENSE, GOOD_PASSES, NEUTRAL_PASSES, NO_DATA_SCORE,
};
pub use types::{DerivedMetrics, PerformanceBand, SCORE_MAX};

pub(crate) use types::round_one_decimal;

use crate::tally::ActionCounts;

/// Derive the four scores with the primary (ratio) weighting.
pub fn derive_metrics(counts: &ActionCounts) -> DerivedMetrics {
    RatioPolicy.derive(counts)
}
