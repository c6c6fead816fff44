//! Speech-to-text service interface and backends.

pub mod deepgram;
pub mod transcriber;

pub use deepgram::DeepgramTranscriber;
pub use transcriber::{MockTranscriber, Transcriber};
