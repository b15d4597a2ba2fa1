use serde::{Deserialize, Serialize};

use crate::metrics::{round_one_decimal, DerivedMetrics};

use super::ReportPayload;

/// Per-metric averages across a subject's reports, one decimal each.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReportAverages {
    pub report_count: usize,
    pub rating: f64,
    pub intensity: f64,
    pub decision: f64,
    pub positioning: f64,
    /// Mean of the four averages; 0 when there are no reports.
    pub overall: f64,
}

impl ReportAverages {
    pub fn from_reports<'a, I>(reports: I) -> Self
    where
        I: IntoIterator<Item = &'a ReportPayload>,
    {
        Self::from_metrics(reports.into_iter().map(|report| &report.metrics))
    }

    pub fn from_metrics<'a, I>(metrics: I) -> Self
    where
        I: IntoIterator<Item = &'a DerivedMetrics>,
    {
        let mut count = 0usize;
        let mut sums = [0f64; 4];
        for m in metrics {
            count += 1;
            sums[0] += m.rating as f64;
            sums[1] += m.intensity as f64;
            sums[2] += m.decision as f64;
            sums[3] += m.positioning as f64;
        }

        if count == 0 {
            return Self::default();
        }

        let avg = |sum: f64| round_one_decimal(sum / count as f64);
        let (rating, intensity, decision, positioning) =
            (avg(sums[0]), avg(sums[1]), avg(sums[2]), avg(sums[3]));

        Self {
            report_count: count,
            rating,
            intensity,
            decision,
            positioning,
            overall: round_one_decimal((rating + intensity + decision + positioning) / 4.0),
        }
    }
}
