//! Clip-related data models.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CaptureError;

/// Analyst-assigned certainty attached to a clip.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum Confidence {
    #[serde(alias = "baixa")]
    Low,
    #[default]
    #[serde(alias = "média", alias = "media")]
    Medium,
    #[serde(alias = "alta")]
    High,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::Low => "low",
            Confidence::Medium => "medium",
            Confidence::High => "high",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Confidence {
    type Err = CaptureError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "low" | "baixa" => Ok(Confidence::Low),
            "medium" | "média" | "media" => Ok(Confidence::Medium),
            "high" | "alta" => Ok(Confidence::High),
            other => Err(CaptureError::InvalidConfidence(other.to_string())),
        }
    }
}

/// What the confirmation dialog hands back for a pending clip.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipMeta {
    pub label: String,
    pub description: String,
    pub confidence: Confidence,
}

/// Proposed range waiting for the analyst to describe it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PendingClip {
    pub start: f64,
    pub end: f64,
}

/// A confirmed excerpt of the source video. Immutable once confirmed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Clip {
    pub id: String,
    pub start: f64,
    pub end: f64,
    pub created_at: DateTime<Utc>,
    pub label: String,
    pub description: String,
    pub confidence: Confidence,
}

impl Clip {
    pub fn duration_secs(&self) -> f64 {
        (self.end - self.start).max(0.0)
    }
}

/// Playback state of a confirmed clip. A pending range has no id yet and
/// removed clips are simply absent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ClipState {
    Idle,
    Playing,
}

/// `m:ss` rendering used in clip lists.
pub fn format_timestamp(seconds: f64) -> String {
    let whole = if seconds.is_finite() {
        seconds.max(0.0).floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", whole / 60, whole % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_parses_both_vocabularies() {
        assert_eq!("high".parse::<Confidence>(), Ok(Confidence::High));
        assert_eq!("Média".parse::<Confidence>(), Ok(Confidence::Medium));
        assert_eq!("baixa".parse::<Confidence>(), Ok(Confidence::Low));
        assert!(matches!(
            "certain".parse::<Confidence>(),
            Err(CaptureError::InvalidConfidence(_))
        ));
    }

    #[test]
    fn confidence_serde_accepts_legacy_values() {
        let parsed: Confidence = serde_json::from_str("\"alta\"").unwrap();
        assert_eq!(parsed, Confidence::High);
        assert_eq!(serde_json::to_string(&Confidence::Low).unwrap(), "\"low\"");
    }

    #[test]
    fn timestamps_render_minutes_and_seconds() {
        assert_eq!(format_timestamp(0.0), "0:00");
        assert_eq!(format_timestamp(65.9), "1:05");
        assert_eq!(format_timestamp(-3.0), "0:00");
        assert_eq!(format_timestamp(3600.0), "60:00");
    }
}
