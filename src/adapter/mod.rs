//! Completion adapter
//!
//! Normalizes "send role-tagged messages, get text back" across provider
//! API conventions and substitutes a deterministic mock backend when no
//! credential is configured. The backend is selected once at construction.
//!
//! `chat` never returns an error: provider failures are logged with their
//! structured reason and flattened into renderable text at this boundary.

use crate::error::{ProviderError, ProviderResult};
use crate::models::{Message, Role};
use async_trait::async_trait;
use tracing::{info, warn};

pub mod openai;
pub use openai::{ApiFlavor, OpenAiBackend};

/// Default completion model when OPENAI_MODEL is not set.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

const MOCK_SAMPLE_CHARS: usize = 800;
const MAX_DEBUG_DETAIL_CHARS: usize = 200;

/// Sampling parameters for one completion call.
#[derive(Debug, Clone, Copy)]
pub struct ChatOptions {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for ChatOptions {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 500,
        }
    }
}

/// Immutable adapter configuration, captured once at startup.
#[derive(Debug, Clone)]
pub struct AdapterConfig {
    pub model: String,
    pub api_key: Option<String>,
    pub use_mock: bool,
    pub debug_errors: bool,
    pub base_url: String,
    pub flavor: ApiFlavor,
}

impl AdapterConfig {
    /// Read configuration from the environment. Absence of the credential
    /// forces mock mode regardless of USE_MOCK_LLM.
    pub fn from_env() -> Self {
        let api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());
        let use_mock = env_flag("USE_MOCK_LLM") || api_key.is_none();

        Self {
            model: std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            api_key,
            use_mock,
            debug_errors: env_flag("LLM_DEBUG_ERRORS"),
            base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| openai::DEFAULT_BASE_URL.to_string()),
            flavor: ApiFlavor::from_env(),
        }
    }

    /// Offline configuration for demos and tests.
    pub fn mock() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            use_mock: true,
            debug_errors: false,
            base_url: openai::DEFAULT_BASE_URL.to_string(),
            flavor: ApiFlavor::Chat,
        }
    }
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|value| matches!(value.trim().to_lowercase().as_str(), "1" | "true"))
        .unwrap_or(false)
}

/// Trait for completion backends (provider or mock).
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, messages: &[Message], options: &ChatOptions)
        -> ProviderResult<String>;
}

/// Deterministic offline backend. Side-effect-free, suitable for tests
/// without network access.
pub struct MockBackend;

#[async_trait]
impl CompletionBackend for MockBackend {
    async fn complete(
        &self,
        messages: &[Message],
        _options: &ChatOptions,
    ) -> ProviderResult<String> {
        Ok(build_mock_response(messages))
    }
}

/// Build a compact mock reply from the user/system message content.
pub fn build_mock_response(messages: &[Message]) -> String {
    let joined = messages
        .iter()
        .filter(|m| matches!(m.role, Role::User | Role::System))
        .map(|m| m.content.trim())
        .filter(|content| !content.is_empty())
        .collect::<Vec<_>>()
        .join(" | ");

    let sample: String = joined.chars().take(MOCK_SAMPLE_CHARS).collect();

    format!(
        "[MOCK RESPONSE]\nBased on: {}\n\n(Enable real LLM by setting OPENAI_API_KEY or USE_MOCK_LLM=0)",
        sample
    )
}

/// Caller-facing adapter. Holds the backend chosen at construction for the
/// lifetime of the instance.
pub struct LlmAdapter {
    backend: Box<dyn CompletionBackend>,
    debug_errors: bool,
}

impl LlmAdapter {
    pub fn new(config: AdapterConfig) -> Self {
        let backend: Box<dyn CompletionBackend> = if config.use_mock {
            info!("Mock mode enabled, completion calls will not leave the process");
            Box::new(MockBackend)
        } else {
            info!(model = %config.model, "Using OpenAI completion backend");
            Box::new(OpenAiBackend::new(&config))
        };

        Self {
            backend,
            debug_errors: config.debug_errors,
        }
    }

    /// Send messages to the configured backend and return text. Failures
    /// become a descriptive `"Error calling OpenAI: ..."` string, never an
    /// error value.
    pub async fn chat(&self, messages: &[Message], options: ChatOptions) -> String {
        match self.backend.complete(messages, &options).await {
            Ok(text) => text,
            Err(err) => {
                warn!(kind = err.kind(), error = %err, "Completion provider call failed");
                self.flatten_error(&err)
            }
        }
    }

    fn flatten_error(&self, err: &ProviderError) -> String {
        if self.debug_errors {
            let detail: String = err.to_string().chars().take(MAX_DEBUG_DETAIL_CHARS).collect();
            format!("Error calling OpenAI: {}: {}", err.kind(), detail)
        } else {
            format!("Error calling OpenAI: {}", err.summary())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingBackend;

    #[async_trait]
    impl CompletionBackend for FailingBackend {
        async fn complete(
            &self,
            _messages: &[Message],
            _options: &ChatOptions,
        ) -> ProviderResult<String> {
            Err(ProviderError::Api {
                status: 500,
                body: "internal provider detail".to_string(),
            })
        }
    }

    #[test]
    fn mock_response_is_deterministic() {
        let messages = [Message::user("Open a coffee shop in Berlin")];
        let first = build_mock_response(&messages);
        let second = build_mock_response(&messages);
        assert_eq!(first, second);
    }

    #[test]
    fn mock_response_carries_banner_and_sample() {
        let messages = [
            Message::system("You are a market analysis expert."),
            Message::user("local bakery expansion"),
        ];
        let response = build_mock_response(&messages);
        assert!(response.starts_with("[MOCK RESPONSE]\nBased on: "));
        assert!(response.contains("You are a market analysis expert. | local bakery expansion"));
        assert!(response.contains("OPENAI_API_KEY"));
    }

    #[test]
    fn mock_response_ignores_assistant_and_blank_messages() {
        let messages = [
            Message::assistant("previous answer"),
            Message::user("   "),
            Message::user("actual request"),
        ];
        let response = build_mock_response(&messages);
        assert!(!response.contains("previous answer"));
        assert!(response.contains("Based on: actual request"));
    }

    #[test]
    fn mock_sample_is_truncated_to_800_chars() {
        let long_input = "x".repeat(5000);
        let messages = [Message::user(long_input)];
        let response = build_mock_response(&messages);

        let sample = response
            .trim_start_matches("[MOCK RESPONSE]\nBased on: ")
            .split("\n\n")
            .next()
            .unwrap();
        assert_eq!(sample.chars().count(), 800);
    }

    #[tokio::test]
    async fn chat_flattens_failures_into_text() {
        let adapter = LlmAdapter {
            backend: Box::new(FailingBackend),
            debug_errors: false,
        };
        let response = adapter
            .chat(&[Message::user("hello")], ChatOptions::default())
            .await;
        assert!(response.starts_with("Error calling OpenAI: "));
        assert!(!response.contains("internal provider detail"));
    }

    #[tokio::test]
    async fn debug_flag_includes_bounded_error_detail() {
        let adapter = LlmAdapter {
            backend: Box::new(FailingBackend),
            debug_errors: true,
        };
        let response = adapter
            .chat(&[Message::user("hello")], ChatOptions::default())
            .await;
        assert!(response.starts_with("Error calling OpenAI: ApiError"));
        assert!(response.contains("500"));
        assert!(response.chars().count() < 300);
    }

    #[tokio::test]
    async fn mock_adapter_chat_is_stable_across_calls() {
        let adapter = LlmAdapter::new(AdapterConfig::mock());
        let messages = [Message::user("Test business idea: local bakery expansion")];
        let first = adapter.chat(&messages, ChatOptions::default()).await;
        let second = adapter.chat(&messages, ChatOptions::default()).await;
        assert_eq!(first, second);
        assert!(first.contains("local bakery expansion"));
    }
}
