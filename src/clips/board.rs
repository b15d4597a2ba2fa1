use chrono::Utc;
use uuid::Uuid;

use crate::{
    error::{CaptureError, CaptureResult},
    playback::{position_of, PlaybackAdapter},
};

use super::models::{Clip, ClipMeta, PendingClip};

/// The session's clip list plus at most one pending proposal.
///
/// Insertion order is creation order. Overlapping ranges are allowed.
#[derive(Debug, Default)]
pub struct ClipBoard {
    clips: Vec<Clip>,
    pending: Option<PendingClip>,
}

impl ClipBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Propose `[max(0, t - lead), t + tail]` around the live position. A newer
    /// proposal replaces an unconfirmed one.
    pub fn propose(
        &mut self,
        adapter: &dyn PlaybackAdapter,
        lead_secs: f64,
        tail_secs: f64,
    ) -> CaptureResult<PendingClip> {
        if !adapter.is_ready() {
            return Err(CaptureError::NoActiveVideo);
        }

        let position = position_of(adapter).max(0.0);
        let pending = PendingClip {
            start: (position - lead_secs).max(0.0),
            end: position + tail_secs,
        };
        self.pending = Some(pending);
        Ok(pending)
    }

    pub fn pending(&self) -> Option<PendingClip> {
        self.pending
    }

    /// Turn the pending range into a confirmed clip. On error the pending
    /// range is kept so the dialog can be resubmitted.
    pub fn confirm(&mut self, meta: ClipMeta, default_label: &str) -> CaptureResult<Clip> {
        let pending = self.pending.ok_or(CaptureError::NoPendingClip)?;

        let valid = pending.start.is_finite()
            && pending.end.is_finite()
            && pending.start >= 0.0
            && pending.end > pending.start;
        if !valid {
            return Err(CaptureError::InvalidClipRange {
                start: pending.start,
                end: pending.end,
            });
        }

        let label = meta.label.trim();
        let clip = Clip {
            id: Uuid::new_v4().to_string(),
            start: pending.start,
            end: pending.end,
            created_at: Utc::now(),
            label: if label.is_empty() {
                default_label.to_string()
            } else {
                label.to_string()
            },
            description: meta.description.trim().to_string(),
            confidence: meta.confidence,
        };

        self.pending = None;
        self.clips.push(clip.clone());
        Ok(clip)
    }

    /// Drop the pending proposal. Returns whether there was one.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn get(&self, clip_id: &str) -> Option<&Clip> {
        self.clips.iter().find(|clip| clip.id == clip_id)
    }

    pub fn clips(&self) -> &[Clip] {
        &self.clips
    }

    pub fn clips_recent_first(&self) -> impl Iterator<Item = &Clip> {
        self.clips.iter().rev()
    }

    pub fn remove(&mut self, clip_id: &str) -> CaptureResult<Clip> {
        let position = self
            .clips
            .iter()
            .position(|clip| clip.id == clip_id)
            .ok_or_else(|| CaptureError::ClipNotFound(clip_id.to_string()))?;
        Ok(self.clips.remove(position))
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    pub fn total_duration_secs(&self) -> f64 {
        self.clips.iter().map(Clip::duration_secs).sum()
    }
}
