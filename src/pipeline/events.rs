//! Events emitted to the host presentation layer.

use crate::session::export::SessionExport;

/// Per-iteration events the pipeline publishes for display.
///
/// The host renders these however it likes; the pipeline never waits on
/// the presentation layer beyond the event channel itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Capture session became active or inactive.
    CaptureActive(bool),
    /// New timestamped transcript line.
    Transcript(String),
    /// New tip entry.
    Tip(String),
    /// Elapsed-duration update in whole seconds.
    Duration(u64),
    /// One-time end-of-session export, offered only when history exists.
    Export(SessionExport),
}
