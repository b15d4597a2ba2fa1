use crate::{
    error::{CaptureError, CaptureResult},
    playback::SharedPlayback,
    session::CaptureConfig,
};

use super::{
    board::ClipBoard,
    models::{Clip, ClipMeta, ClipState, PendingClip},
    watch::{ActiveClip, EndWatch, PollOutcome},
};

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::log_info;

/// Creates, confirms, plays and removes the clips of one session.
///
/// State per clip: pending → confirmed → (playing ⇄ idle) → removed.
pub struct ClipManager {
    board: ClipBoard,
    watch: EndWatch,
    adapter: SharedPlayback,
    lead_secs: f64,
    tail_secs: f64,
    default_label: &'static str,
}

impl ClipManager {
    pub fn new(adapter: SharedPlayback, config: &CaptureConfig) -> Self {
        Self {
            board: ClipBoard::new(),
            watch: EndWatch::new(
                adapter.clone(),
                config.poll_interval,
                config.end_tolerance_secs,
                config.verbose_watch,
            ),
            adapter,
            lead_secs: config.clip_lead_secs,
            tail_secs: config.clip_tail_secs,
            default_label: config.locale.default_clip_label(),
        }
    }

    pub fn propose(&mut self) -> CaptureResult<PendingClip> {
        self.board
            .propose(self.adapter.as_ref(), self.lead_secs, self.tail_secs)
    }

    pub fn pending(&self) -> Option<PendingClip> {
        self.board.pending()
    }

    pub fn confirm(&mut self, meta: ClipMeta) -> CaptureResult<Clip> {
        let clip = self.board.confirm(meta, self.default_label)?;
        log_info!(
            "clip {} confirmed ({:.2}s..{:.2}s, {})",
            clip.id,
            clip.start,
            clip.end,
            clip.confidence
        );
        Ok(clip)
    }

    pub fn cancel(&mut self) -> bool {
        self.board.cancel()
    }

    /// Disarm whatever is armed, seek to the clip start, play, and arm
    /// auto-stop at its end.
    pub fn play(&mut self, clip_id: &str) -> CaptureResult<()> {
        if !self.adapter.is_ready() {
            return Err(CaptureError::NoActiveVideo);
        }
        let (start, end) = self
            .board
            .get(clip_id)
            .map(|clip| (clip.start, clip.end))
            .ok_or_else(|| CaptureError::ClipNotFound(clip_id.to_string()))?;
        self.watch.ensure_runtime()?;

        // Nothing may stay armed while the playhead moves: the old clip's end
        // would be compared against the new position.
        self.watch.disarm();
        self.adapter.seek(start.max(0.0));
        self.adapter.play();
        self.watch.arm(clip_id, end)
    }

    /// Delete a clip; if it was the one playing, auto-stop is disarmed.
    pub fn remove(&mut self, clip_id: &str) -> CaptureResult<Clip> {
        let clip = self.board.remove(clip_id)?;
        if self.watch.disarm_if(clip_id) {
            log_info!("removed clip {} while it was playing", clip_id);
        }
        Ok(clip)
    }

    pub fn state(&self, clip_id: &str) -> Option<ClipState> {
        self.board.get(clip_id)?;
        let playing = self
            .watch
            .active()
            .map(|active| active.clip_id == clip_id)
            .unwrap_or(false);
        Some(if playing {
            ClipState::Playing
        } else {
            ClipState::Idle
        })
    }

    pub fn active_clip(&self) -> Option<ActiveClip> {
        self.watch.active()
    }

    /// Run one end-watch step by hand, for hosts that drive their own timer.
    pub fn poll(&self) -> PollOutcome {
        self.watch.poll_once()
    }

    pub fn is_watching(&self) -> bool {
        self.watch.is_running()
    }

    pub fn get(&self, clip_id: &str) -> Option<&Clip> {
        self.board.get(clip_id)
    }

    pub fn clips(&self) -> &[Clip] {
        self.board.clips()
    }

    pub fn clips_recent_first(&self) -> impl Iterator<Item = &Clip> {
        self.board.clips_recent_first()
    }

    pub fn total_duration_secs(&self) -> f64 {
        self.board.total_duration_secs()
    }

    pub fn len(&self) -> usize {
        self.board.len()
    }

    pub fn is_empty(&self) -> bool {
        self.board.is_empty()
    }

    pub fn shutdown(&mut self) {
        self.watch.shutdown();
    }
}
