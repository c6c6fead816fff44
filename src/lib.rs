//! teleprompt - Live-call assistant pipeline
//!
//! Streams microphone audio into incremental transcription and periodic
//! AI coaching suggestions, with an end-of-session export. The crate is
//! an embedded pipeline: the host feeds captured audio frames in and
//! renders the session events that come out.

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

pub mod audio;
pub mod clock;
pub mod config;
pub mod defaults;
pub mod error;
pub mod pipeline;
pub mod session;
pub mod stt;
pub mod suggest;

// Core traits (ingress → transcribe → suggest)
pub use audio::ingress::{CaptureHandle, CaptureIngress, ChannelIngress};
pub use stt::transcriber::Transcriber;
pub use suggest::suggester::Suggester;

// Pipeline
pub use pipeline::events::SessionEvent;
pub use pipeline::runner::{SessionPhase, SessionPipeline};

// Session state and export
pub use session::export::SessionExport;
pub use session::state::{SessionState, SharedSession};

// Error handling
pub use error::{Result, TelepromptError};

// Config
pub use config::Config;
