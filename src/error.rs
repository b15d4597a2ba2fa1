//! Capture engine error definitions.
//!
//! Every variant is a precondition failure reported synchronously to the
//! caller. Clamps (decrement below zero, scores outside 0..=10) and
//! missing-data defaults are not errors and never show up here.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CaptureError {
    #[error("no active video: the playback adapter is not ready")]
    NoActiveVideo,

    #[error("no pending clip to confirm")]
    NoPendingClip,

    #[error("clip not found: {0}")]
    ClipNotFound(String),

    #[error("cannot finalize: no actions recorded")]
    ZeroActivity,

    #[error("invalid clip range: {start:.3}~{end:.3} seconds")]
    InvalidClipRange { start: f64, end: f64 },

    #[error("subject id is required")]
    MissingSubject,

    #[error("source locator is required")]
    MissingSource,

    #[error("clip playback needs a running tokio runtime for the end-watch poller")]
    NoRuntime,

    #[error("invalid confidence level: {0}")]
    InvalidConfidence(String),

    #[error("unknown action category: {0}")]
    UnknownCategory(String),
}

pub type CaptureResult<T> = std::result::Result<T, CaptureError>;
