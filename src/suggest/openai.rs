//! OpenAI-compatible chat completion suggester.
//!
//! Sends the unconsumed transcript context with a fixed coaching system
//! prompt and returns the model's reply as one tip entry. A horizontal
//! rule separator is appended so consecutive tips read as distinct blocks.

use crate::config::SuggestionConfig;
use crate::defaults;
use crate::error::{Result, TelepromptError};
use crate::suggest::suggester::Suggester;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Separator appended to each tip for display.
const TIP_SEPARATOR: &str = "\n\n---\n";

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: String,
}

/// Suggester backed by an OpenAI-compatible chat completions endpoint.
pub struct OpenAiSuggester {
    client: Client,
    config: SuggestionConfig,
}

impl OpenAiSuggester {
    /// Creates a client from suggestion configuration.
    pub fn new(config: SuggestionConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(defaults::REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self { client, config })
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    fn build_request(&self, context: &str) -> ChatRequest {
        ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: defaults::SUGGESTION_SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: format!("Context: {}", context),
                },
            ],
            temperature: self.config.temperature,
        }
    }
}

#[async_trait]
impl Suggester for OpenAiSuggester {
    async fn suggest(&self, context: &str) -> Result<String> {
        let request = self.build_request(context);

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(TelepromptError::Suggestion {
                message: format!("server returned {}", response.status()),
            });
        }

        let body: ChatResponse = response.json().await?;
        let content = body
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| TelepromptError::Suggestion {
                message: "response contained no choices".to_string(),
            })?;

        Ok(format!("{}{}", content, TIP_SEPARATOR))
    }
}
