//! Shared per-session state.
//!
//! One `SessionState` exists per capture session, shared between the
//! pipeline loop and duration tracker behind a mutex. All histories are
//! append-only; nothing survives the session.

use crate::defaults;
use chrono::{DateTime, Local};
use std::sync::{Arc, Mutex};

/// One transcribed line with its capture timestamp.
#[derive(Debug, Clone)]
pub struct TranscriptEntry {
    /// Moment the audio was transcribed.
    pub timestamp: DateTime<Local>,
    /// Transcribed text, without timestamp decoration.
    pub text: String,
}

impl TranscriptEntry {
    /// Renders the entry as a display line, e.g. `Jun 30 2025, 02:49AM: hello`.
    pub fn line(&self) -> String {
        format!(
            "{}: {}",
            self.timestamp.format(defaults::TRANSCRIPT_TIMESTAMP_FORMAT),
            self.text
        )
    }
}

/// Mutable state slots for one capture session.
#[derive(Debug, Default)]
pub struct SessionState {
    /// Ordered transcript entries, append-only.
    transcript: Vec<TranscriptEntry>,
    /// Ordered tip entries, append-only.
    tips: Vec<String>,
    /// Accumulating raw transcript text used as suggestion input.
    context: String,
    /// Cumulative elapsed seconds of active capture.
    elapsed_secs: u64,
}

impl SessionState {
    /// Creates empty session state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a transcript entry and extends the rolling context in one
    /// step, keeping the two in lockstep.
    ///
    /// Returns the rendered display line for the new entry.
    pub fn record_transcript(&mut self, text: &str, at: DateTime<Local>) -> String {
        let entry = TranscriptEntry {
            timestamp: at,
            text: text.to_string(),
        };
        let line = entry.line();

        self.transcript.push(entry);
        self.context.push_str(text);
        self.context.push_str(defaults::CONTEXT_SEPARATOR);

        line
    }

    /// Appends one tip entry.
    pub fn push_tip(&mut self, tip: String) {
        self.tips.push(tip);
    }

    /// The full rolling context accumulated so far.
    pub fn context(&self) -> &str {
        &self.context
    }

    /// Current rolling context length in bytes.
    pub fn context_len(&self) -> usize {
        self.context.len()
    }

    /// Transcript history in arrival order.
    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    /// Rendered transcript lines in arrival order.
    pub fn transcript_lines(&self) -> Vec<String> {
        self.transcript.iter().map(TranscriptEntry::line).collect()
    }

    /// Tips history in arrival order.
    pub fn tips(&self) -> &[String] {
        &self.tips
    }

    /// Returns true if either history holds at least one entry.
    pub fn has_history(&self) -> bool {
        !self.transcript.is_empty() || !self.tips.is_empty()
    }

    /// Cumulative elapsed capture seconds.
    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    /// Persists the latest elapsed value so a restarted tracker resumes
    /// from it.
    pub fn set_elapsed_secs(&mut self, secs: u64) {
        self.elapsed_secs = secs;
    }
}

/// Session state shared between the pipeline loop and duration tracker.
pub type SharedSession = Arc<Mutex<SessionState>>;

/// Creates a fresh shared session.
pub fn shared_session() -> SharedSession {
    Arc::new(Mutex::new(SessionState::new()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 6, 30, 2, 49, 0).unwrap()
    }

    #[test]
    fn test_new_state_is_empty() {
        let state = SessionState::new();
        assert!(state.transcript().is_empty());
        assert!(state.tips().is_empty());
        assert_eq!(state.context(), "");
        assert_eq!(state.elapsed_secs(), 0);
        assert!(!state.has_history());
    }

    #[test]
    fn test_entry_line_format() {
        let entry = TranscriptEntry {
            timestamp: fixed_time(),
            text: "hello world".to_string(),
        };
        assert_eq!(entry.line(), "Jun 30 2025, 02:49AM: hello world");
    }

    #[test]
    fn test_record_transcript_appends_both_slots() {
        let mut state = SessionState::new();
        let line = state.record_transcript("hello world", fixed_time());

        assert_eq!(line, "Jun 30 2025, 02:49AM: hello world");
        assert_eq!(state.transcript().len(), 1);
        assert_eq!(state.transcript()[0].text, "hello world");
        assert_eq!(state.context(), "hello world\n");
    }

    #[test]
    fn test_context_is_concatenation_of_recorded_texts() {
        let mut state = SessionState::new();
        state.record_transcript("one", fixed_time());
        state.record_transcript("two", fixed_time());
        state.record_transcript("three", fixed_time());

        assert_eq!(state.context(), "one\ntwo\nthree\n");
        assert_eq!(state.transcript().len(), 3);
        assert_eq!(state.context_len(), "one\ntwo\nthree\n".len());
    }

    #[test]
    fn test_transcript_lines_preserve_order() {
        let mut state = SessionState::new();
        state.record_transcript("first", fixed_time());
        state.record_transcript("second", fixed_time());

        let lines = state.transcript_lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("first"));
        assert!(lines[1].ends_with("second"));
    }

    #[test]
    fn test_push_tip() {
        let mut state = SessionState::new();
        state.push_tip("Tip: X".to_string());
        state.push_tip("Alert: Y".to_string());

        assert_eq!(state.tips(), ["Tip: X", "Alert: Y"]);
    }

    #[test]
    fn test_has_history_with_only_tips() {
        let mut state = SessionState::new();
        state.push_tip("Tip: X".to_string());
        assert!(state.has_history());
    }

    #[test]
    fn test_has_history_with_only_transcript() {
        let mut state = SessionState::new();
        state.record_transcript("hello", fixed_time());
        assert!(state.has_history());
    }

    #[test]
    fn test_elapsed_secs_roundtrip() {
        let mut state = SessionState::new();
        state.set_elapsed_secs(42);
        assert_eq!(state.elapsed_secs(), 42);
    }

    #[test]
    fn test_shared_session() {
        let shared = shared_session();
        {
            let mut state = shared.lock().unwrap();
            state.record_transcript("hi", fixed_time());
        }
        assert_eq!(shared.lock().unwrap().transcript().len(), 1);
    }
}
