//! OpenAI completion backend
//!
//! Speaks either completion-API convention behind one `complete` call and
//! extracts text from both known response shapes.
//! Uses a long-lived reqwest::Client for connection pooling.

use crate::error::{ProviderError, ProviderResult};
use crate::models::Message;
use super::{AdapterConfig, ChatOptions, CompletionBackend};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{error, info};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Call convention, fixed at construction for the adapter's lifetime.
/// `Chat` posts role-tagged messages; `Legacy` posts a flattened prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiFlavor {
    Chat,
    Legacy,
}

impl ApiFlavor {
    pub fn from_env() -> Self {
        match std::env::var("OPENAI_API_STYLE") {
            Ok(style) if style.trim().eq_ignore_ascii_case("legacy") => ApiFlavor::Legacy,
            _ => ApiFlavor::Chat,
        }
    }
}

pub struct OpenAiBackend {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    flavor: ApiFlavor,
}

impl OpenAiBackend {
    pub fn new(config: &AdapterConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(8)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            api_key: config.api_key.clone().unwrap_or_default(),
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            flavor: config.flavor,
        }
    }

    fn endpoint(&self) -> String {
        match self.flavor {
            ApiFlavor::Chat => format!("{}/chat/completions", self.base_url),
            ApiFlavor::Legacy => format!("{}/completions", self.base_url),
        }
    }
}

#[async_trait]
impl CompletionBackend for OpenAiBackend {
    async fn complete(
        &self,
        messages: &[Message],
        options: &ChatOptions,
    ) -> ProviderResult<String> {
        let url = self.endpoint();

        info!(model = %self.model, "Calling OpenAI completion API");

        let request = self.client.post(&url).bearer_auth(&self.api_key);
        let response = match self.flavor {
            ApiFlavor::Chat => {
                let payload = ChatCompletionRequest {
                    model: &self.model,
                    messages,
                    temperature: options.temperature,
                    max_tokens: options.max_tokens,
                };
                request.json(&payload).send().await?
            }
            ApiFlavor::Legacy => {
                let payload = LegacyCompletionRequest {
                    model: &self.model,
                    prompt: flatten_prompt(messages),
                    temperature: options.temperature,
                    max_tokens: options.max_tokens,
                };
                request.json(&payload).send().await?
            }
        };

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!(status = %status, "OpenAI API returned error status");
            return Err(ProviderError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let value: serde_json::Value = serde_json::from_str(&body)?;
        let parsed: CompletionResponse = serde_json::from_value(value).map_err(|e| {
            ProviderError::UnsupportedShape(format!("unrecognized completion payload: {}", e))
        })?;

        extract_completion_text(&parsed)
    }
}

/// Flatten role-tagged messages into a single prompt for the legacy
/// completions endpoint. Order is preserved.
fn flatten_prompt(messages: &[Message]) -> String {
    messages
        .iter()
        .map(|m| m.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct LegacyCompletionRequest<'a> {
    model: &'a str,
    prompt: String,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

/// One completion choice. Modern responses carry `message.content`,
/// legacy responses carry `text`; both are optional so either shape
/// deserializes without raising.
#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<ChoiceMessage>,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

fn extract_completion_text(response: &CompletionResponse) -> ProviderResult<String> {
    let choice = response
        .choices
        .first()
        .ok_or(ProviderError::EmptyCompletion)?;

    if let Some(message) = &choice.message {
        if let Some(content) = &message.content {
            return Ok(content.clone());
        }
    }

    if let Some(text) = &choice.text {
        return Ok(text.clone());
    }

    Err(ProviderError::UnsupportedShape(
        "first choice has neither message.content nor text".to_string(),
    ))
}
