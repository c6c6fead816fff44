//! Deepgram pre-recorded transcription client.
//!
//! Each clip is encoded as WAV and submitted to `/v1/listen` in one
//! request. The smart-formatted paragraphs transcript is preferred when
//! present, falling back to the raw alternative transcript.

use crate::audio::frame::AudioClip;
use crate::audio::wav;
use crate::config::TranscriptionConfig;
use crate::error::{Result, TelepromptError};
use crate::stt::transcriber::Transcriber;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct ListenResponse {
    results: ListenResults,
}

#[derive(Debug, Deserialize)]
struct ListenResults {
    channels: Vec<ListenChannel>,
}

#[derive(Debug, Deserialize)]
struct ListenChannel {
    alternatives: Vec<ListenAlternative>,
}

#[derive(Debug, Deserialize)]
struct ListenAlternative {
    #[serde(default)]
    transcript: String,
    #[serde(default)]
    paragraphs: Option<ListenParagraphs>,
}

#[derive(Debug, Deserialize)]
struct ListenParagraphs {
    transcript: String,
}

/// Extracts the best transcript from a listen response.
fn extract_transcript(response: &ListenResponse) -> Option<String> {
    let alternative = response
        .results
        .channels
        .first()?
        .alternatives
        .first()?;

    let text = match &alternative.paragraphs {
        Some(paragraphs) => &paragraphs.transcript,
        None => &alternative.transcript,
    };

    Some(text.trim().to_string())
}

/// Transcriber backed by the Deepgram pre-recorded API.
pub struct DeepgramTranscriber {
    client: Client,
    config: TranscriptionConfig,
}

impl DeepgramTranscriber {
    /// Creates a client from transcription configuration.
    pub fn new(config: TranscriptionConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(crate::defaults::REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self { client, config })
    }

    fn listen_url(&self) -> String {
        format!(
            "{}/v1/listen?model={}&smart_format={}",
            self.config.base_url.trim_end_matches('/'),
            self.config.model,
            self.config.smart_format
        )
    }
}

#[async_trait]
impl Transcriber for DeepgramTranscriber {
    async fn transcribe(&self, clip: &AudioClip) -> Result<String> {
        let wav_bytes = wav::encode_clip(clip)?;

        let response = self
            .client
            .post(self.listen_url())
            .header("Authorization", format!("Token {}", self.config.api_key))
            .header("Content-Type", "audio/wav")
            .body(wav_bytes)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(TelepromptError::Transcription {
                message: format!("server returned {}", response.status()),
            });
        }

        let body: ListenResponse = response.json().await?;

        extract_transcript(&body).ok_or_else(|| TelepromptError::Transcription {
            message: "response contained no transcription channels".to_string(),
        })
    }
}
