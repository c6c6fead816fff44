//! Streaming transcription-and-suggestion pipeline.
//!
//! Two concurrent loops per session:
//!
//! ```text
//! ┌──────────────┐   frames   ┌─────────┐  clip  ┌────────────┐
//! │ Capture      │───────────▶│ Batcher │───────▶│ Transcribe │──┐
//! │ Ingress      │            └─────────┘        └────────────┘  │ text
//! └──────┬───────┘                                               ▼
//!        │ is_active()        ┌──────────────────────────────────────┐
//!        │                    │ SessionState: transcript / context / │
//!        ▼                    │ tips / elapsed                       │
//! ┌──────────────┐            └──────────────────┬───────────────────┘
//! │ Duration     │ 1s ticks                      │ unconsumed tail
//! │ Tracker      │────▶ events                   ▼
//! └──────────────┘            ┌─────────┐ due? ┌─────────┐
//!                             │ Cadence │─────▶│ Suggest │──▶ tips
//!                             └─────────┘      └─────────┘
//! ```

pub mod batcher;
pub mod cadence;
pub mod duration;
pub mod events;
pub mod runner;

pub use batcher::FrameBatcher;
pub use cadence::SuggestionCadence;
pub use duration::DurationTracker;
pub use events::SessionEvent;
pub use runner::{SessionPhase, SessionPipeline};
