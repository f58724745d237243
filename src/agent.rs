//! Persona agents
//!
//! One configuration-driven agent type covers all three personas; behavior
//! differs only by the prompt template loaded at construction.

use crate::adapter::{ChatOptions, LlmAdapter};
use crate::models::{Message, Persona};
use std::path::Path;
use std::sync::Arc;
use tracing::warn;

/// Immutable persona configuration: the persona name plus its prompt
/// template with a single `{request}` substitution slot.
#[derive(Debug, Clone)]
pub struct PersonaConfig {
    pub persona: Persona,
    pub template: String,
}

impl PersonaConfig {
    /// Load the persona's template from the prompts directory. A missing or
    /// unreadable file falls back to the built-in template; construction
    /// never fails.
    pub fn load(prompts_dir: &Path, persona: Persona) -> Self {
        let path = prompts_dir.join(persona.template_file());
        let template = match std::fs::read_to_string(&path) {
            Ok(template) => template,
            Err(err) => {
                warn!(
                    persona = %persona,
                    path = %path.display(),
                    error = %err,
                    "Prompt template unavailable, using built-in fallback"
                );
                persona.fallback_template().to_string()
            }
        };

        Self { persona, template }
    }
}

/// Stateless expert agent: formats the request into its template and
/// delegates to the completion adapter.
pub struct PersonaAgent {
    config: PersonaConfig,
    adapter: Arc<LlmAdapter>,
}

impl PersonaAgent {
    pub fn new(config: PersonaConfig, adapter: Arc<LlmAdapter>) -> Self {
        Self { config, adapter }
    }

    pub fn from_prompts_dir(
        prompts_dir: &Path,
        persona: Persona,
        adapter: Arc<LlmAdapter>,
    ) -> Self {
        Self::new(PersonaConfig::load(prompts_dir, persona), adapter)
    }

    pub fn persona(&self) -> Persona {
        self.config.persona
    }

    /// Substitute the request into the template and ask the adapter.
    /// Adapter output passes through unchanged, error banners included.
    pub async fn process_request(&self, request: &str) -> String {
        let prompt = self.config.template.replace("{request}", request);
        let messages = [Message::user(prompt)];
        self.adapter.chat(&messages, ChatOptions::default()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::AdapterConfig;
    use std::path::PathBuf;

    fn mock_adapter() -> Arc<LlmAdapter> {
        Arc::new(LlmAdapter::new(AdapterConfig::mock()))
    }

    #[test]
    fn missing_prompts_dir_falls_back_per_persona() {
        let dir = PathBuf::from("definitely/not/a/prompts/dir");

        let market = PersonaConfig::load(&dir, Persona::Market);
        assert!(market.template.contains("market analysis expert"));

        let financial = PersonaConfig::load(&dir, Persona::Financial);
        assert!(financial.template.contains("financial analysis expert"));

        let strategy = PersonaConfig::load(&dir, Persona::Strategy);
        assert!(strategy.template.contains("business strategy expert"));
    }

    #[tokio::test]
    async fn request_text_is_substituted_into_the_template() {
        let config = PersonaConfig {
            persona: Persona::Market,
            template: "Assess the market for: {request}".to_string(),
        };
        let agent = PersonaAgent::new(config, mock_adapter());

        let response = agent.process_request("a food truck fleet").await;
        assert!(response.contains("Assess the market for: a food truck fleet"));
    }

    #[tokio::test]
    async fn template_without_slot_still_produces_a_response() {
        let config = PersonaConfig {
            persona: Persona::Strategy,
            template: "No slot here".to_string(),
        };
        let agent = PersonaAgent::new(config, mock_adapter());

        let response = agent.process_request("ignored").await;
        assert!(response.starts_with("[MOCK RESPONSE]"));
        assert!(response.contains("No slot here"));
    }
}
