//! Business Consultant Agent Orchestrator
//!
//! A multi-agent consulting service that:
//! - Fans one business request out to three expert personas (market, financial, strategy)
//! - Wraps each request in a per-persona prompt template
//! - Normalizes completion calls across provider API conventions
//! - Falls back to a deterministic mock backend when no credential is configured
//! - Always returns renderable text, never a transport error
//!
//! FLOW:
//! HTTP → ORCHESTRATOR → PERSONA AGENT(S) → COMPLETION ADAPTER → PROVIDER or MOCK

pub mod adapter;
pub mod agent;
pub mod api;
pub mod error;
pub mod models;
pub mod orchestrator;

pub use error::ProviderError;

// Re-export common types
pub use adapter::{AdapterConfig, ChatOptions, LlmAdapter};
pub use models::*;
pub use orchestrator::Orchestrator;
