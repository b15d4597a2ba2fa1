//! Boundary to the host video player.
//!
//! The capture engine only needs position, seek, play/pause and a readiness
//! flag. How the player loads or streams the video is the host's business.

use std::sync::Arc;

/// Host video player. Methods take `&self`: hosts hand out a cloneable handle
/// and keep their own interior state, the same way the end-watch poller and
/// the session share one adapter.
pub trait PlaybackAdapter: Send + Sync {
    /// Current playback position in seconds.
    fn current_position(&self) -> f64;
    fn seek(&self, seconds: f64);
    fn play(&self);
    fn pause(&self);
    /// `false` until a video is loaded and the player signalled readiness.
    fn is_ready(&self) -> bool;
    /// Whether the host is currently playing. Hosts that cannot tell keep the
    /// default, and the end-watch then runs until the clip end.
    fn is_playing(&self) -> bool {
        true
    }
}

pub type SharedPlayback = Arc<dyn PlaybackAdapter>;

/// Position read that tolerates players reporting NaN/inf before metadata loads.
pub(crate) fn position_of(adapter: &dyn PlaybackAdapter) -> f64 {
    let position = adapter.current_position();
    if position.is_finite() {
        position
    } else {
        0.0
    }
}
