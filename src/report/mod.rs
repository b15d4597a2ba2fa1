//! Finalize payload and the sink it is handed to.
//!
//! Persistence, rendering and display belong to the sink. The engine only
//! builds the payload.

mod averages;

pub use averages::ReportAverages;

use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    clips::{Clip, Confidence},
    metrics::DerivedMetrics,
    tally::ActionCounts,
    utils::lock_or_recover,
};

/// Clip as handed to the reporting side: range and analyst notes only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportClip {
    pub start: f64,
    pub end: f64,
    pub label: String,
    pub description: String,
    pub confidence: Confidence,
}

impl From<&Clip> for ReportClip {
    fn from(clip: &Clip) -> Self {
        Self {
            start: clip.start,
            end: clip.end,
            label: clip.label.clone(),
            description: clip.description.clone(),
            confidence: clip.confidence,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportPayload {
    pub subject_id: String,
    pub subject_name: String,
    pub source_locator: String,
    pub title: String,
    pub counts: ActionCounts,
    pub metrics: DerivedMetrics,
    pub tags: Vec<String>,
    pub summary: String,
    pub clips: Vec<ReportClip>,
}

/// Receiver of finalized sessions.
#[async_trait]
pub trait ReportSink: Send + Sync {
    /// Store the payload and return the id the sink assigned to it.
    async fn submit(&self, payload: &ReportPayload) -> Result<String>;
}

/// Keeps submitted payloads in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    reports: Mutex<Vec<(String, ReportPayload)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> Vec<(String, ReportPayload)> {
        lock_or_recover(&self.reports).clone()
    }

    pub fn len(&self) -> usize {
        lock_or_recover(&self.reports).len()
    }

    pub fn is_empty(&self) -> bool {
        lock_or_recover(&self.reports).is_empty()
    }
}

#[async_trait]
impl ReportSink for MemorySink {
    async fn submit(&self, payload: &ReportPayload) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        lock_or_recover(&self.reports).push((id.clone(), payload.clone()));
        Ok(id)
    }
}
