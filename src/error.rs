//! Error types for the completion adapter
//!
//! Provider failures stay structured inside the adapter for logging and
//! testing; `LlmAdapter::chat` flattens them to text at its own boundary.

use thiserror::Error;

/// Result type alias for provider-facing adapter operations
pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

#[derive(Error, Debug)]
pub enum ProviderError {

    // =============================
    // Completion Call Failures
    // =============================

    #[error("API error (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("Empty completion: provider returned no choices")]
    EmptyCompletion,

    #[error("Unsupported response shape: {0}")]
    UnsupportedShape(String),

    // =============================
    // External Library Conversions
    // =============================

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Malformed response body: {0}")]
    MalformedBody(#[from] serde_json::Error),
}

impl ProviderError {
    /// Short variant tag used when debug error verbosity is enabled.
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::Api { .. } => "ApiError",
            ProviderError::EmptyCompletion => "EmptyCompletion",
            ProviderError::UnsupportedShape(_) => "UnsupportedShape",
            ProviderError::Http(_) => "HttpError",
            ProviderError::MalformedBody(_) => "MalformedBody",
        }
    }

    /// Operator-facing summary with no internal detail. This is what callers
    /// see by default when the failure is flattened into response text.
    pub fn summary(&self) -> &'static str {
        match self {
            ProviderError::Api { .. } => "the provider returned an error status",
            ProviderError::EmptyCompletion => "the provider returned no completion choices",
            ProviderError::UnsupportedShape(_) => {
                "unsupported completion response shape. Set USE_MOCK_LLM=1 to use mock responses"
            }
            ProviderError::Http(_) => "network error while contacting the completion endpoint",
            ProviderError::MalformedBody(_) => "the provider response could not be parsed",
        }
    }
}
