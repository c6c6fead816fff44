//! Per-session state and end-of-session export.

pub mod export;
pub mod state;

pub use export::SessionExport;
pub use state::{shared_session, SessionState, SharedSession, TranscriptEntry};
