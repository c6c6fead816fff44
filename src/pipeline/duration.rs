//! Session duration tracker.
//!
//! Waits for capture to become active, then publishes the cumulative
//! elapsed seconds once per second. The latest value is written back to
//! the shared session each tick, so a restarted tracker resumes from the
//! persisted offset instead of zero.

use crate::audio::ingress::CaptureIngress;
use crate::defaults;
use crate::pipeline::events::SessionEvent;
use crate::session::state::SharedSession;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::debug;

/// Concurrent loop that tracks elapsed session time.
pub struct DurationTracker<I> {
    ingress: I,
    state: SharedSession,
    events: mpsc::Sender<SessionEvent>,
    poll_interval: Duration,
    tick_interval: Duration,
}

impl<I: CaptureIngress> DurationTracker<I> {
    /// Creates a tracker with default poll and tick intervals.
    pub fn new(ingress: I, state: SharedSession, events: mpsc::Sender<SessionEvent>) -> Self {
        Self {
            ingress,
            state,
            events,
            poll_interval: Duration::from_millis(defaults::CAPTURE_POLL_MS),
            tick_interval: Duration::from_millis(defaults::DURATION_TICK_MS),
        }
    }

    /// Overrides the intervals (used by tests to tighten timing).
    pub fn with_intervals(mut self, poll: Duration, tick: Duration) -> Self {
        self.poll_interval = poll;
        self.tick_interval = tick;
        self
    }

    /// Runs until the event receiver is dropped.
    ///
    /// Blocks cooperatively until capture becomes active, then ticks once
    /// per second. It keeps running even if capture later stops; session
    /// termination is owned by the pipeline loop, which aborts this task.
    pub async fn run(self) {
        while !self.ingress.is_active() {
            tokio::time::sleep(self.poll_interval).await;
        }

        let start = Instant::now();
        let offset = self
            .state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .elapsed_secs();

        loop {
            let elapsed = offset + start.elapsed().as_secs();

            self.state
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .set_elapsed_secs(elapsed);

            if self
                .events
                .send(SessionEvent::Duration(elapsed))
                .await
                .is_err()
            {
                debug!("duration event receiver dropped, stopping tracker");
                return;
            }

            tokio::time::sleep(self.tick_interval).await;
        }
    }
}
