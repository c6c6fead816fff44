//! Suggestion service interface and backends.

pub mod openai;
pub mod suggester;

pub use openai::OpenAiSuggester;
pub use suggester::{MockSuggester, Suggester};
