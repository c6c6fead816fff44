//! Session pipeline: the main engine.
//!
//! Each iteration drains buffered audio into one clip, transcribes it,
//! folds the result into the session histories, and lets the cadence
//! controller decide whether to request a suggestion. Capture going
//! inactive finalizes the session with an optional one-time export.
//!
//! `tick` is public and takes `now` explicitly so tests can toggle
//! capture activity and drive one iteration at a time with a chosen
//! clock value.

use crate::audio::frame::AudioClip;
use crate::audio::ingress::CaptureIngress;
use crate::clock::{Clock, SystemClock};
use crate::config::SessionConfig;
use crate::pipeline::batcher::FrameBatcher;
use crate::pipeline::cadence::SuggestionCadence;
use crate::pipeline::duration::DurationTracker;
use crate::pipeline::events::SessionEvent;
use crate::session::export::SessionExport;
use crate::session::state::{shared_session, SharedSession};
use crate::stt::transcriber::Transcriber;
use crate::suggest::suggester::Suggester;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Lifecycle phase of a session pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Initial state; no capture seen yet.
    WaitingForCapture,
    /// Capture present; all stations run each iteration.
    Active,
    /// Capture gone; export (if any) has been offered. Terminal.
    Finalized,
}

/// Streaming transcription-and-suggestion pipeline for one session.
pub struct SessionPipeline<I, T, S> {
    ingress: I,
    transcriber: T,
    suggester: S,
    clock: Box<dyn Clock>,
    state: SharedSession,
    batcher: FrameBatcher,
    cadence: SuggestionCadence,
    events: mpsc::Sender<SessionEvent>,
    phase: SessionPhase,
    export: Option<SessionExport>,
}

impl<I, T, S> SessionPipeline<I, T, S>
where
    I: CaptureIngress + Clone + Send + Sync + 'static,
    T: Transcriber,
    S: Suggester,
{
    /// Creates a pipeline for a fresh session.
    pub fn new(
        ingress: I,
        transcriber: T,
        suggester: S,
        config: &SessionConfig,
        events: mpsc::Sender<SessionEvent>,
    ) -> Self {
        let clock: Box<dyn Clock> = Box::new(SystemClock);
        let started_at = clock.now();
        Self {
            ingress,
            transcriber,
            suggester,
            clock,
            state: shared_session(),
            batcher: FrameBatcher::new(Duration::from_millis(config.frame_batch_timeout_ms)),
            cadence: SuggestionCadence::new(
                Duration::from_secs(config.suggestion_interval_secs),
                started_at,
            ),
            events,
            phase: SessionPhase::WaitingForCapture,
            export: None,
        }
    }

    /// Replaces the clock and restarts the cadence window from its time
    /// (used by tests for deterministic cadence).
    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.cadence = SuggestionCadence::new(self.cadence.interval(), clock.now());
        self.clock = clock;
        self
    }

    /// Shared session state handle.
    pub fn state(&self) -> SharedSession {
        self.state.clone()
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// The export built at finalization, if any.
    pub fn export(&self) -> Option<&SessionExport> {
        self.export.as_ref()
    }

    /// Runs one pipeline iteration at the given instant.
    ///
    /// Checks capture activity, batches audio, transcribes, evaluates the
    /// suggestion cadence, and finalizes when capture is gone. Returns
    /// the phase after the iteration.
    pub async fn tick(&mut self, now: Instant) -> SessionPhase {
        if self.phase == SessionPhase::Finalized {
            return SessionPhase::Finalized;
        }

        if !self.ingress.is_active() {
            self.finalize().await;
            return SessionPhase::Finalized;
        }

        if self.phase == SessionPhase::WaitingForCapture {
            info!("capture session active");
            self.phase = SessionPhase::Active;
            self.emit(SessionEvent::CaptureActive(true)).await;
        }

        // Batch and transcribe before the cadence check: this iteration's
        // text must be folded into the context first.
        let clip = self.batcher.collect(&self.ingress).await;
        if !clip.is_empty() {
            self.transcribe_step(&clip).await;
        }

        if self.cadence.is_due(now) {
            self.suggestion_step(now).await;
        }

        self.phase
    }

    /// Loops until capture ends. Returns the export, if one was offered.
    ///
    /// The duration tracker runs as a sibling task for the whole session
    /// and is aborted once the pipeline finalizes.
    pub async fn run(mut self) -> Option<SessionExport> {
        let tracker = DurationTracker::new(
            self.ingress.clone(),
            self.state.clone(),
            self.events.clone(),
        );
        let tracker_task = tokio::spawn(tracker.run());

        loop {
            let now = self.clock.now();
            if self.tick(now).await == SessionPhase::Finalized {
                break;
            }
        }

        tracker_task.abort();
        self.export.take()
    }

    async fn transcribe_step(&mut self, clip: &AudioClip) {
        match self.transcriber.transcribe(clip).await {
            Ok(text) => {
                let text = text.trim();
                if text.is_empty() {
                    debug!("no speech detected in clip");
                    return;
                }

                let line = self
                    .state
                    .lock()
                    .unwrap_or_else(|e| e.into_inner())
                    .record_transcript(text, chrono::Local::now());
                self.emit(SessionEvent::Transcript(line)).await;
            }
            Err(e) => {
                // Swallowed: no new text this iteration, retried naturally
                // on the next batch.
                warn!(error = %e, "transcription failed");
            }
        }
    }

    async fn suggestion_step(&mut self, now: Instant) {
        let (slice, context_len) = {
            let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
            (
                self.cadence.unconsumed(state.context()).to_string(),
                state.context_len(),
            )
        };

        if slice.is_empty() {
            return;
        }

        match self.suggester.suggest(&slice).await {
            Ok(tip) => {
                self.state
                    .lock()
                    .unwrap_or_else(|e| e.into_inner())
                    .push_tip(tip.clone());
                self.cadence.commit(now, context_len);
                self.emit(SessionEvent::Tip(tip)).await;
            }
            Err(e) => {
                // Cursor and window untouched: the same (growing) slice is
                // retried on the next eligible window.
                warn!(error = %e, "suggestion failed");
            }
        }
    }

    async fn finalize(&mut self) {
        let was_active = self.phase == SessionPhase::Active;
        self.phase = SessionPhase::Finalized;

        if was_active {
            self.emit(SessionEvent::CaptureActive(false)).await;
        }

        let export = {
            let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
            if state.has_history() {
                Some(SessionExport::from_state(&state))
            } else {
                None
            }
        };

        match export {
            Some(export) => {
                info!(
                    transcript_lines = export.transcript.len(),
                    tips = export.ai_tips.len(),
                    "session finalized with export"
                );
                self.export = Some(export.clone());
                self.emit(SessionEvent::Export(export)).await;
            }
            None => {
                info!("session finalized with empty histories, no export");
            }
        }
    }

    async fn emit(&self, event: SessionEvent) {
        if self.events.send(event).await.is_err() {
            debug!("event receiver dropped");
        }
    }
}
