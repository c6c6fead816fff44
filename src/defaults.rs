//! Default configuration constants for teleprompt.
//!
//! This module provides shared constants used across different configuration
//! types to ensure consistency and eliminate duplication.

/// Default interval between suggestion-service calls, in seconds.
///
/// The cadence controller will never call the suggestion service more than
/// once per interval; 15 seconds gives the agent a steady stream of tips
/// without flooding the sidebar mid-sentence.
pub const SUGGESTION_INTERVAL_SECS: u64 = 15;

/// Default bounded wait for an audio frame batch, in milliseconds.
///
/// If no frame arrives within this window the iteration proceeds with an
/// empty clip. 500ms keeps the pipeline responsive to capture shutdown
/// while avoiding busy-spinning on a quiet microphone.
pub const FRAME_BATCH_TIMEOUT_MS: u64 = 500;

/// Duration tracker publish interval, in milliseconds.
///
/// The elapsed-session counter is recomputed and published once per second.
pub const DURATION_TICK_MS: u64 = 1000;

/// Poll interval while waiting for capture to become active, in milliseconds.
pub const CAPTURE_POLL_MS: u64 = 100;

/// Default audio sample rate in Hz.
///
/// 16kHz is the standard for speech recognition; frames carry their own
/// metadata, this is only the fallback for hosts that do not specify one.
pub const SAMPLE_RATE: u32 = 16000;

/// Default channel count for captured audio.
pub const CHANNELS: u16 = 1;

/// Default Deepgram transcription model.
pub const TRANSCRIPTION_MODEL: &str = "nova-3";

/// Default Deepgram API base URL.
pub const TRANSCRIPTION_BASE_URL: &str = "https://api.deepgram.com";

/// Default suggestion model.
pub const SUGGESTION_MODEL: &str = "gpt-4o";

/// Default OpenAI-compatible API base URL.
pub const SUGGESTION_BASE_URL: &str = "https://api.openai.com";

/// Default sampling temperature for suggestion generation.
pub const SUGGESTION_TEMPERATURE: f32 = 1.0;

/// Request timeout for both network services, in seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Separator appended to the rolling context after each transcribed line.
pub const CONTEXT_SEPARATOR: &str = "\n";

/// Timestamp format for transcript entries, e.g. `Jun 30 2025, 02:49AM`.
pub const TRANSCRIPT_TIMESTAMP_FORMAT: &str = "%b %d %Y, %I:%M%p";

/// Prefix for the end-of-session export file name.
pub const EXPORT_FILE_PREFIX: &str = "teleprompt_log";

/// System prompt for the suggestion service.
///
/// Mirrors the live-call coaching instructions: short, categorized,
/// at most two suggestions per call.
pub const SUGGESTION_SYSTEM_PROMPT: &str = "You are an assistant helping a sales agent in a live call. \
You are to use the context provided below to generate 1 to 2 \
short, helpful suggestions for the sales agent. \
Categorize each suggestion as a \u{1F4A1} Tip, \u{26A0}\u{FE0F} Reminder or \u{2757} Alert.";
