//! End-of-session export document.
//!
//! When capture ends with non-empty histories, both are bundled into one
//! structured document offered to the host exactly once.

use crate::defaults;
use crate::error::{Result, TelepromptError};
use crate::session::state::SessionState;
use serde::{Deserialize, Serialize};

/// Combined transcript and tips log for one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionExport {
    /// Timestamped transcript lines in arrival order.
    pub transcript: Vec<String>,
    /// Tip entries in arrival order.
    pub ai_tips: Vec<String>,
}

impl SessionExport {
    /// Builds an export from the session's histories, verbatim.
    pub fn from_state(state: &SessionState) -> Self {
        Self {
            transcript: state.transcript_lines(),
            ai_tips: state.tips().to_vec(),
        }
    }

    /// Returns true if both histories are empty.
    pub fn is_empty(&self) -> bool {
        self.transcript.is_empty() && self.ai_tips.is_empty()
    }

    /// Suggested download file name, stamped with the session end time.
    pub fn file_name(ended_at_unix: i64) -> String {
        format!("{}_{}.json", defaults::EXPORT_FILE_PREFIX, ended_at_unix)
    }

    /// Serializes the export as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| TelepromptError::Other(e.to_string()))
    }
}
