use crate::{
    clips::{ActiveClip, Clip, ClipManager, ClipMeta, ClipState, PendingClip, PollOutcome},
    error::{CaptureError, CaptureResult},
    locale::Locale,
    playback::SharedPlayback,
    report::{ReportClip, ReportPayload},
    tags::{generate_summary, generate_tags},
    tally::{ActionCategory, ActionCounts},
};

use super::{
    config::CaptureConfig,
    models::{FinalizeRejected, SessionStats, Subject},
};

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::{log_info, log_warn};

/// One analyst scouting one athlete over one video.
///
/// Owns the tally, the clips and the end-watch poller. Everything is mutated
/// from the caller's task; the poller only touches the active-clip marker and
/// the player. Dropping the session stops the poller.
pub struct CaptureSession {
    subject: Subject,
    source_locator: String,
    config: CaptureConfig,
    counts: ActionCounts,
    clips: ClipManager,
}

impl CaptureSession {
    pub fn start(
        subject: Subject,
        source_locator: impl Into<String>,
        adapter: SharedPlayback,
        config: CaptureConfig,
    ) -> CaptureResult<Self> {
        if subject.id.trim().is_empty() {
            return Err(CaptureError::MissingSubject);
        }
        let source_locator = source_locator.into().trim().to_string();
        if source_locator.is_empty() {
            return Err(CaptureError::MissingSource);
        }

        log_info!(
            "capture session started for subject {} on {}",
            subject.id,
            source_locator
        );

        Ok(Self {
            clips: ClipManager::new(adapter, &config),
            subject,
            source_locator,
            config,
            counts: ActionCounts::new(),
        })
    }

    pub fn subject(&self) -> &Subject {
        &self.subject
    }

    pub fn source_locator(&self) -> &str {
        &self.source_locator
    }

    pub fn locale(&self) -> Locale {
        self.config.locale
    }

    // ---- tally ----

    pub fn increment(&mut self, category: ActionCategory) -> u32 {
        self.counts.increment(category);
        self.counts.get(category)
    }

    pub fn decrement(&mut self, category: ActionCategory) -> u32 {
        self.counts.decrement(category);
        self.counts.get(category)
    }

    pub fn reset_counts(&mut self) {
        self.counts.reset();
    }

    pub fn counts(&self) -> &ActionCounts {
        &self.counts
    }

    // ---- clips ----

    pub fn propose_clip(&mut self) -> CaptureResult<PendingClip> {
        self.clips.propose()
    }

    pub fn pending_clip(&self) -> Option<PendingClip> {
        self.clips.pending()
    }

    pub fn confirm_clip(&mut self, meta: ClipMeta) -> CaptureResult<Clip> {
        self.clips.confirm(meta)
    }

    pub fn cancel_clip(&mut self) -> bool {
        self.clips.cancel()
    }

    pub fn play_clip(&mut self, clip_id: &str) -> CaptureResult<()> {
        self.clips.play(clip_id)
    }

    pub fn remove_clip(&mut self, clip_id: &str) -> CaptureResult<Clip> {
        self.clips.remove(clip_id)
    }

    pub fn clip_state(&self, clip_id: &str) -> Option<ClipState> {
        self.clips.state(clip_id)
    }

    pub fn active_clip(&self) -> Option<ActiveClip> {
        self.clips.active_clip()
    }

    pub fn poll_end_watch(&self) -> PollOutcome {
        self.clips.poll()
    }

    pub fn is_watching(&self) -> bool {
        self.clips.is_watching()
    }

    pub fn clips(&self) -> &[Clip] {
        self.clips.clips()
    }

    /// Display order: newest first.
    pub fn clips_recent_first(&self) -> Vec<&Clip> {
        self.clips.clips_recent_first().collect()
    }

    pub fn stats(&self) -> SessionStats {
        SessionStats {
            total_actions: self.counts.total(),
            total_clips: self.clips.len(),
            total_clip_secs: self.clips.total_duration_secs(),
        }
    }

    // ---- finalize ----

    /// Snapshot the tally, derive metrics, tags and summary once, and package
    /// everything for the report sink. Consumes the session; the poller is
    /// stopped before returning.
    ///
    /// Refused with [`CaptureError::ZeroActivity`] when nothing was recorded,
    /// in which case the session comes back unchanged.
    pub fn finalize(mut self) -> Result<ReportPayload, FinalizeRejected> {
        if self.counts.total() == 0 {
            log_warn!(
                "finalize refused for subject {}: no actions recorded",
                self.subject.id
            );
            return Err(FinalizeRejected {
                error: CaptureError::ZeroActivity,
                session: self,
            });
        }

        self.clips.shutdown();

        let counts = self.counts;
        let locale = self.config.locale;
        let metrics = self.config.metrics_policy.derive(&counts);
        let tags = generate_tags(&counts, locale);
        let summary = generate_summary(&counts, &self.subject.name, locale);

        log_info!(
            "session for subject {} finalized: {} actions, {} clips, rating {}",
            self.subject.id,
            counts.total(),
            self.clips.len(),
            metrics.rating
        );

        Ok(ReportPayload {
            title: report_title(&self.subject, locale),
            subject_id: self.subject.id.clone(),
            subject_name: self.subject.name.clone(),
            source_locator: self.source_locator.clone(),
            counts,
            metrics,
            tags,
            summary,
            clips: self.clips.clips().iter().map(ReportClip::from).collect(),
        })
    }
}

fn report_title(subject: &Subject, locale: Locale) -> String {
    let name = match subject.position.as_deref().map(str::trim) {
        Some(position) if !position.is_empty() => format!("{} ({})", subject.name, position),
        _ => subject.name.clone(),
    };
    match locale {
        Locale::English => format!("Scout report — {name}"),
        Locale::Portuguese => format!("Relatório — Scout {name}"),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc, Mutex,
    };

    use super::*;
    use crate::{clips::Confidence, playback::PlaybackAdapter};

    #[derive(Default)]
    struct FakePlayer {
        position: Mutex<f64>,
        ready: AtomicBool,
        pauses: AtomicUsize,
        plays: AtomicUsize,
    }

    impl FakePlayer {
        fn ready_at(position: f64) -> Arc<Self> {
            let player = Self::default();
            *player.position.lock().unwrap() = position;
            player.ready.store(true, Ordering::SeqCst);
            Arc::new(player)
        }
    }

    impl PlaybackAdapter for FakePlayer {
        fn current_position(&self) -> f64 {
            *self.position.lock().unwrap()
        }
        fn seek(&self, seconds: f64) {
            *self.position.lock().unwrap() = seconds;
        }
        fn play(&self) {
            self.plays.fetch_add(1, Ordering::SeqCst);
        }
        fn pause(&self) {
            self.pauses.fetch_add(1, Ordering::SeqCst);
        }
        fn is_ready(&self) -> bool {
            self.ready.load(Ordering::SeqCst)
        }
    }

    fn session_with(player: &Arc<FakePlayer>) -> CaptureSession {
        CaptureSession::start(
            Subject::new("ath-1", "Joana Lima").with_position("Meia"),
            "https://www.youtube.com/watch?v=abc123",
            player.clone(),
            CaptureConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn start_validates_subject_and_source() {
        let player = FakePlayer::ready_at(0.0);
        let missing_subject = CaptureSession::start(
            Subject::new("  ", "Nobody"),
            "video",
            player.clone(),
            CaptureConfig::default(),
        );
        assert!(matches!(missing_subject, Err(CaptureError::MissingSubject)));

        let missing_source = CaptureSession::start(
            Subject::new("ath-1", "Joana"),
            " ",
            player,
            CaptureConfig::default(),
        );
        assert!(matches!(missing_source, Err(CaptureError::MissingSource)));
    }

    #[test]
    fn tally_pass_through_reports_new_value() {
        let player = FakePlayer::ready_at(0.0);
        let mut session = session_with(&player);
        assert_eq!(session.increment(ActionCategory::Goal), 1);
        assert_eq!(session.decrement(ActionCategory::Goal), 0);
        assert_eq!(session.decrement(ActionCategory::Goal), 0);
        session.increment(ActionCategory::Tackle);
        session.reset_counts();
        assert!(session.counts().is_empty());
    }

    #[test]
    fn zero_activity_finalize_returns_session() {
        let player = FakePlayer::ready_at(30.0);
        let mut session = session_with(&player);
        session.propose_clip().unwrap();
        session.confirm_clip(ClipMeta::default()).unwrap();

        let rejected = session.finalize().unwrap_err();
        assert_eq!(rejected.error, CaptureError::ZeroActivity);

        let mut session = rejected.into_session();
        assert_eq!(session.clips().len(), 1);
        session.increment(ActionCategory::Cross);
        assert!(session.finalize().is_ok());
    }

    #[test]
    fn finalize_packages_everything() {
        let player = FakePlayer::ready_at(42.0);
        let mut session = session_with(&player);
        for _ in 0..3 {
            session.increment(ActionCategory::GoodOffensivePass);
        }
        session.increment(ActionCategory::BadPass);
        session.increment(ActionCategory::Goal);
        session.increment(ActionCategory::Assist);

        session.propose_clip().unwrap();
        session
            .confirm_clip(ClipMeta {
                label: "Goal".into(),
                description: "left foot, far post".into(),
                confidence: Confidence::High,
            })
            .unwrap();

        let stats = session.stats();
        assert_eq!(stats.total_actions, 6);
        assert_eq!(stats.total_clips, 1);
        assert_eq!(stats.total_clip_secs, 10.0);

        let payload = session.finalize().unwrap();
        assert_eq!(payload.subject_id, "ath-1");
        assert_eq!(payload.title, "Scout report — Joana Lima (Meia)");
        assert_eq!(payload.metrics.intensity, 1);
        assert_eq!(payload.metrics.decision, 8);
        assert_eq!(payload.metrics.positioning, 5);
        assert_eq!(payload.metrics.rating, 5);
        assert_eq!(payload.tags, vec!["Passing", "Goal", "Assist"]);
        assert_eq!(
            payload.summary,
            "Joana Lima: 3 positive passes and 1 errors, 1 goal(s), 1 assist(s)."
        );
        assert_eq!(payload.clips.len(), 1);
        assert_eq!(payload.clips[0].start, 37.0);
        assert_eq!(payload.clips[0].end, 47.0);
        assert_eq!(payload.clips[0].confidence, Confidence::High);
    }

    #[test]
    fn clip_creation_needs_ready_video() {
        let player = Arc::new(FakePlayer::default());
        let mut session = session_with(&player);
        assert_eq!(session.propose_clip(), Err(CaptureError::NoActiveVideo));
        assert!(session.pending_clip().is_none());
    }

    #[test]
    fn play_outside_runtime_leaves_player_alone() {
        let player = FakePlayer::ready_at(20.0);
        let mut session = session_with(&player);
        session.propose_clip().unwrap();
        let clip = session.confirm_clip(ClipMeta::default()).unwrap();

        assert_eq!(session.play_clip(&clip.id), Err(CaptureError::NoRuntime));
        assert_eq!(player.plays.load(Ordering::SeqCst), 0);
        assert_eq!(session.clip_state(&clip.id), Some(ClipState::Idle));
    }

    #[tokio::test(start_paused = true)]
    async fn removing_playing_clip_disarms() {
        let player = FakePlayer::ready_at(20.0);
        let mut session = session_with(&player);
        session.propose_clip().unwrap();
        let clip = session.confirm_clip(ClipMeta::default()).unwrap();

        session.play_clip(&clip.id).unwrap();
        assert_eq!(player.current_position(), 15.0);
        assert_eq!(session.clip_state(&clip.id), Some(ClipState::Playing));

        session.remove_clip(&clip.id).unwrap();
        assert!(session.active_clip().is_none());
        assert_eq!(session.clip_state(&clip.id), None);

        *player.position.lock().unwrap() = 60.0;
        assert_eq!(session.poll_end_watch(), PollOutcome::Idle);
        tokio::time::sleep(std::time::Duration::from_millis(400)).await;
        assert_eq!(player.pauses.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn portuguese_locale_uses_legacy_vocabulary() {
        let player = FakePlayer::ready_at(10.0);
        let config = CaptureConfig {
            locale: Locale::Portuguese,
            ..CaptureConfig::default()
        };
        let mut session = CaptureSession::start(
            Subject::new("ath-2", "Bruno"),
            "video-2",
            player,
            config,
        )
        .unwrap();
        session.propose_clip().unwrap();
        let clip = session.confirm_clip(ClipMeta::default()).unwrap();
        assert_eq!(clip.label, "Lance");

        session.increment(ActionCategory::CounterPress);
        let payload = session.finalize().unwrap();
        assert_eq!(payload.title, "Relatório — Scout Bruno");
        assert_eq!(payload.tags, vec!["Pressão"]);
        assert_eq!(
            payload.summary,
            "Scout realizado para Bruno. Poucas ações registradas."
        );
    }
}
