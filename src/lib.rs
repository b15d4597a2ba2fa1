//! Live scouting capture engine.
//!
//! An analyst watches a match video and records what one athlete does: taps
//! on a fixed set of action categories, short clips around interesting
//! moments, and a finalize step that turns the tally into scores, tags and a
//! summary sentence for a report sink.

pub mod clips;
pub mod db;
pub mod error;
pub mod locale;
pub mod metrics;
pub mod playback;
pub mod report;
pub mod session;
pub mod settings;
pub mod tags;
pub mod tally;
mod utils;

pub use clips::{Clip, ClipMeta, ClipState, Confidence, PendingClip, PollOutcome};
pub use db::{Database, StoredReport};
pub use error::{CaptureError, CaptureResult};
pub use locale::Locale;
pub use metrics::{derive_metrics, DerivedMetrics, MetricsPolicy, MetricsPolicyKind, PerformanceBand};
pub use playback::{PlaybackAdapter, SharedPlayback};
pub use report::{MemorySink, ReportAverages, ReportClip, ReportPayload, ReportSink};
pub use session::{CaptureConfig, CaptureSession, FinalizeRejected, SessionStats, Subject};
pub use settings::{CaptureSettings, SettingsStore};
pub use tags::{generate_summary, generate_tags};
pub use tally::{ActionCategory, ActionCounts, ActionGroup};

/// Initialize logging (reads RUST_LOG env var). Safe to call more than once.
pub fn init_logging() {
    let _ = env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .try_init();
}
