//! Suggestion cadence controller.
//!
//! Time-windowed, at-least-once-per-window batching: the suggestion
//! service is never called more than once per interval, may be called
//! less often when no new context exists, and never re-reads text it has
//! already consumed. Callers pass `now` explicitly so the policy stays
//! pure and deterministic under test.

use std::time::{Duration, Instant};

/// Tracks when the suggestion service was last called and how much of the
/// rolling context it has consumed.
#[derive(Debug, Clone)]
pub struct SuggestionCadence {
    interval: Duration,
    last_call: Instant,
    cursor: usize,
}

impl SuggestionCadence {
    /// Creates a cadence controller. `started_at` is the pipeline start;
    /// the first call becomes eligible one interval later.
    pub fn new(interval: Duration, started_at: Instant) -> Self {
        Self {
            interval,
            last_call: started_at,
            cursor: 0,
        }
    }

    /// How much of the rolling context has been consumed, in bytes.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The configured cadence interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns true once a full interval has passed since the last
    /// successful call (or since start).
    pub fn is_due(&self, now: Instant) -> bool {
        now.duration_since(self.last_call) > self.interval
    }

    /// The unconsumed tail of the rolling context.
    ///
    /// The cursor only ever advances to a previously observed context
    /// length, and the context is append-only, so the cursor always lies
    /// on a valid boundary.
    pub fn unconsumed<'a>(&self, context: &'a str) -> &'a str {
        &context[self.cursor.min(context.len())..]
    }

    /// Records a successful suggestion call: the window restarts at `now`
    /// and everything up to `context_len` counts as consumed.
    ///
    /// Not called on failure, so the same (growing) slice is retried on
    /// the next eligible window.
    pub fn commit(&mut self, now: Instant, context_len: usize) {
        debug_assert!(context_len >= self.cursor);
        self.last_call = now;
        self.cursor = context_len;
    }
}
