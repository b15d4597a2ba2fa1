//! Auto-stop for clip playback.
//!
//! The host player exposes no "range ended" event, so a poller compares the
//! live position with the active clip's `end` and pauses the player once it
//! is within tolerance. At most one clip is armed at a time.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use tokio::{
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;

use crate::{
    error::{CaptureError, CaptureResult},
    playback::{position_of, PlaybackAdapter, SharedPlayback},
    utils::lock_or_recover,
};

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::{log_debug, log_info};

/// The clip currently armed for auto-stop.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveClip {
    pub clip_id: String,
    pub end: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    /// Nothing armed.
    Idle,
    /// Armed clip still playing.
    Watching { position: f64 },
    /// Position reached the end; player paused and marker cleared.
    AutoStopped { clip_id: String },
    /// The host paused before the end; marker cleared, player left alone.
    HostPaused { clip_id: String },
}

/// Consecutive ticks the host must report "not playing" before the armed clip
/// is released. Absorbs the lag between `play()` and the host's state flag.
const IDLE_TICKS_BEFORE_RELEASE: u32 = 3;

#[derive(Debug, Default)]
struct WatchState {
    active: Option<ActiveClip>,
    running: bool,
    idle_ticks: u32,
}

pub struct EndWatch {
    state: Arc<Mutex<WatchState>>,
    adapter: SharedPlayback,
    tolerance_secs: f64,
    poll_interval: Duration,
    verbose: bool,
    handle: Option<JoinHandle<()>>,
    cancel_token: Option<CancellationToken>,
}

impl EndWatch {
    pub fn new(
        adapter: SharedPlayback,
        poll_interval: Duration,
        tolerance_secs: f64,
        verbose: bool,
    ) -> Self {
        Self {
            state: Arc::new(Mutex::new(WatchState::default())),
            adapter,
            tolerance_secs,
            poll_interval,
            verbose,
            handle: None,
            cancel_token: None,
        }
    }

    pub fn active(&self) -> Option<ActiveClip> {
        lock_or_recover(&self.state).active.clone()
    }

    /// Whether the poller task is currently alive.
    pub fn is_running(&self) -> bool {
        lock_or_recover(&self.state).running
    }

    /// Fail early, before touching the player, when no runtime can host the
    /// poller.
    pub fn ensure_runtime(&self) -> CaptureResult<()> {
        tokio::runtime::Handle::try_current()
            .map(|_| ())
            .map_err(|_| CaptureError::NoRuntime)
    }

    /// Arm auto-stop for `clip_id`, replacing whatever was armed before, and
    /// start the poller if it is not already running.
    pub fn arm(&mut self, clip_id: &str, end: f64) -> CaptureResult<()> {
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| CaptureError::NoRuntime)?;

        let needs_spawn = {
            let mut state = lock_or_recover(&self.state);
            if let Some(previous) = state.active.take() {
                log_info!("disarming clip {} in favour of {}", previous.clip_id, clip_id);
            }
            state.active = Some(ActiveClip {
                clip_id: clip_id.to_string(),
                end,
            });
            state.idle_ticks = 0;
            let needs_spawn = !state.running;
            state.running = true;
            needs_spawn
        };

        log_info!("clip {} armed for auto-stop at {:.2}s", clip_id, end);

        if needs_spawn {
            // The previous task, if any, already left its loop.
            self.handle.take();

            let cancel_token = CancellationToken::new();
            let handle = runtime.spawn(watch_loop(
                self.state.clone(),
                self.adapter.clone(),
                self.poll_interval,
                self.tolerance_secs,
                self.verbose,
                cancel_token.clone(),
            ));
            self.handle = Some(handle);
            self.cancel_token = Some(cancel_token);
        }

        Ok(())
    }

    /// Clear the marker whatever it names, returning what was armed. Must run
    /// before the playhead moves to another clip.
    pub fn disarm(&self) -> Option<ActiveClip> {
        let mut state = lock_or_recover(&self.state);
        state.idle_ticks = 0;
        let previous = state.active.take();
        if let Some(previous) = &previous {
            log_info!("clip {} disarmed", previous.clip_id);
        }
        previous
    }

    /// Clear the marker if it names `clip_id`. Returns whether it did.
    pub fn disarm_if(&self, clip_id: &str) -> bool {
        let mut state = lock_or_recover(&self.state);
        let matches = state
            .active
            .as_ref()
            .map(|active| active.clip_id == clip_id)
            .unwrap_or(false);
        if matches {
            state.active = None;
            log_info!("clip {} disarmed", clip_id);
        }
        matches
    }

    /// One end-watch step against the shared adapter.
    pub fn poll_once(&self) -> PollOutcome {
        poll_step(&self.state, self.adapter.as_ref(), self.tolerance_secs)
    }

    /// Cancel the poller and clear the marker. Idempotent.
    pub fn shutdown(&mut self) {
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }

        let mut state = lock_or_recover(&self.state);
        state.active = None;
        state.running = false;
    }
}

impl Drop for EndWatch {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn poll_step(
    state: &Mutex<WatchState>,
    adapter: &dyn PlaybackAdapter,
    tolerance_secs: f64,
) -> PollOutcome {
    let armed = lock_or_recover(state).active.clone();
    let Some(active) = armed else {
        return PollOutcome::Idle;
    };

    let position = position_of(adapter);
    let reached_end = position >= active.end - tolerance_secs;
    let playing = reached_end || adapter.is_playing();

    let mut guard = lock_or_recover(state);
    // The marker may have been cleared or handed to another clip while the
    // adapter was being read.
    match guard.active.as_ref() {
        Some(current) if current.clip_id == active.clip_id => {}
        Some(_) => return PollOutcome::Watching { position },
        None => return PollOutcome::Idle,
    }

    if reached_end {
        guard.active = None;
        guard.idle_ticks = 0;
        adapter.pause();
        return PollOutcome::AutoStopped {
            clip_id: active.clip_id,
        };
    }

    if playing {
        guard.idle_ticks = 0;
        return PollOutcome::Watching { position };
    }

    guard.idle_ticks += 1;
    if guard.idle_ticks >= IDLE_TICKS_BEFORE_RELEASE {
        guard.active = None;
        guard.idle_ticks = 0;
        return PollOutcome::HostPaused {
            clip_id: active.clip_id,
        };
    }
    PollOutcome::Watching { position }
}

async fn watch_loop(
    state: Arc<Mutex<WatchState>>,
    adapter: SharedPlayback,
    poll_interval: Duration,
    tolerance_secs: f64,
    verbose: bool,
    cancel_token: CancellationToken,
) {
    let mut ticker = time::interval(poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match poll_step(&state, adapter.as_ref(), tolerance_secs) {
                    PollOutcome::Watching { position } => {
                        if verbose {
                            log_debug!("end-watch tick at {:.3}s", position);
                        }
                        continue;
                    }
                    PollOutcome::AutoStopped { clip_id } => {
                        log_info!("clip {} reached its end, playback paused", clip_id);
                    }
                    PollOutcome::HostPaused { clip_id } => {
                        log_info!("playback of clip {} paused by the host, releasing", clip_id);
                    }
                    PollOutcome::Idle => {}
                }

                let mut guard = lock_or_recover(&state);
                if guard.active.is_none() {
                    guard.running = false;
                    break;
                }
            }
            _ = cancel_token.cancelled() => {
                log_info!("end-watch poller shutting down");
                break;
            }
        }
    }
}
