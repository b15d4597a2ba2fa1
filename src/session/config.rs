use std::time::Duration;

use crate::{locale::Locale, metrics::MetricsPolicyKind};

const POLL_MS_ENV: &str = "SCOUT_CAPTURE_POLL_MS";
const DEBUG_ENV: &str = "SCOUT_CAPTURE_DEBUG";
const MIN_POLL_MS: u64 = 50;
const MAX_POLL_MS: u64 = 1_000;

/// Tunables for one capture session.
#[derive(Debug, Clone)]
pub struct CaptureConfig {
    /// End-watch poll period
    pub poll_interval: Duration,

    /// Auto-stop fires once position reaches `end - end_tolerance_secs`
    pub end_tolerance_secs: f64,

    /// Proposed clip range is `[t - lead, t + tail]`
    pub clip_lead_secs: f64,
    pub clip_tail_secs: f64,

    pub locale: Locale,
    pub metrics_policy: MetricsPolicyKind,

    /// Log every poller tick at debug level
    pub verbose_watch: bool,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(120),
            end_tolerance_secs: 0.05,
            clip_lead_secs: 5.0,
            clip_tail_secs: 5.0,
            locale: Locale::English,
            metrics_policy: MetricsPolicyKind::Ratio,
            verbose_watch: false,
        }
    }
}

impl CaptureConfig {
    /// Defaults with `SCOUT_CAPTURE_POLL_MS` and `SCOUT_CAPTURE_DEBUG` applied.
    pub fn from_env() -> Self {
        Self::default().with_overrides(
            std::env::var(POLL_MS_ENV).ok().as_deref(),
            std::env::var(DEBUG_ENV).ok().as_deref(),
        )
    }

    fn with_overrides(mut self, poll_ms: Option<&str>, debug: Option<&str>) -> Self {
        if let Some(ms) = poll_ms.and_then(|raw| raw.trim().parse::<u64>().ok()) {
            self.poll_interval = Duration::from_millis(ms.clamp(MIN_POLL_MS, MAX_POLL_MS));
        }

        self.verbose_watch = debug
            .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        self
    }
}
