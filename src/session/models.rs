use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CaptureError;

use super::controller::CaptureSession;

/// The athlete being scouted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: String,
    pub name: String,
    pub position: Option<String>,
}

impl Subject {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            position: None,
        }
    }

    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.position = Some(position.into());
        self
    }
}

/// Running figures shown above the capture panel.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionStats {
    pub total_actions: u32,
    pub total_clips: usize,
    pub total_clip_secs: f64,
}

/// A refused finalize. Carries the session back, untouched, so the analyst
/// can keep recording.
pub struct FinalizeRejected {
    pub error: CaptureError,
    pub session: CaptureSession,
}

impl FinalizeRejected {
    pub fn into_session(self) -> CaptureSession {
        self.session
    }
}

impl fmt::Debug for FinalizeRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FinalizeRejected")
            .field("error", &self.error)
            .field("subject", &self.session.subject().id)
            .finish()
    }
}

impl fmt::Display for FinalizeRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "finalize rejected: {}", self.error)
    }
}

impl std::error::Error for FinalizeRejected {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}
