use crate::defaults;
use crate::error::{Result, TelepromptError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub transcription: TranscriptionConfig,
    pub suggestion: SuggestionConfig,
    pub session: SessionConfig,
}

/// Transcription service configuration (Deepgram pre-recorded API)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TranscriptionConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub smart_format: bool,
}

/// Suggestion service configuration (OpenAI-compatible chat endpoint)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SuggestionConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
}

/// Session pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SessionConfig {
    /// Minimum seconds between suggestion-service calls.
    pub suggestion_interval_secs: u64,
    /// Bounded wait for an audio frame batch, in milliseconds.
    pub frame_batch_timeout_ms: u64,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: defaults::TRANSCRIPTION_BASE_URL.to_string(),
            model: defaults::TRANSCRIPTION_MODEL.to_string(),
            smart_format: true,
        }
    }
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: defaults::SUGGESTION_BASE_URL.to_string(),
            model: defaults::SUGGESTION_MODEL.to_string(),
            temperature: defaults::SUGGESTION_TEMPERATURE,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            suggestion_interval_secs: defaults::SUGGESTION_INTERVAL_SECS,
            frame_batch_timeout_ms: defaults::FRAME_BATCH_TIMEOUT_MS,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a file or return defaults if file doesn't exist
    ///
    /// Only returns defaults if the file is missing.
    /// Returns errors for invalid TOML.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        match Self::load(path) {
            Ok(config) => Ok(config),
            Err(e) => {
                if e.downcast_ref::<std::io::Error>()
                    .map(|io_err| io_err.kind() == std::io::ErrorKind::NotFound)
                    .unwrap_or(false)
                {
                    Ok(Self::default())
                } else {
                    Err(e)
                }
            }
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - DEEPGRAM_API_KEY → transcription.api_key
    /// - OPENAI_API_KEY → suggestion.api_key
    /// - TELEPROMPT_TRANSCRIPTION_MODEL → transcription.model
    /// - TELEPROMPT_SUGGESTION_MODEL → suggestion.model
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(key) = std::env::var("DEEPGRAM_API_KEY") {
            if !key.is_empty() {
                self.transcription.api_key = key;
            }
        }

        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            if !key.is_empty() {
                self.suggestion.api_key = key;
            }
        }

        if let Ok(model) = std::env::var("TELEPROMPT_TRANSCRIPTION_MODEL") {
            if !model.is_empty() {
                self.transcription.model = model;
            }
        }

        if let Ok(model) = std::env::var("TELEPROMPT_SUGGESTION_MODEL") {
            if !model.is_empty() {
                self.suggestion.model = model;
            }
        }

        self
    }

    /// Validate configuration values that would break the pipeline
    pub fn validate(&self) -> Result<()> {
        if self.session.suggestion_interval_secs == 0 {
            return Err(TelepromptError::ConfigInvalidValue {
                key: "session.suggestion_interval_secs".to_string(),
                message: "must be positive".to_string(),
            });
        }

        if self.session.frame_batch_timeout_ms == 0 {
            return Err(TelepromptError::ConfigInvalidValue {
                key: "session.frame_batch_timeout_ms".to_string(),
                message: "must be positive".to_string(),
            });
        }

        if !(0.0..=2.0).contains(&self.suggestion.temperature) {
            return Err(TelepromptError::ConfigInvalidValue {
                key: "suggestion.temperature".to_string(),
                message: "must be between 0.0 and 2.0".to_string(),
            });
        }

        Ok(())
    }
}
