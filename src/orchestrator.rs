//! Orchestrator for the domain-specific persona agents
//!
//! Routes a single-persona request by name and fans a comprehensive
//! consultation out to all three agents, aggregating the results into a
//! fixed three-key structure.

use crate::adapter::LlmAdapter;
use crate::agent::PersonaAgent;
use crate::models::{
    ComprehensiveConsultation, ConsultationResult, Persona, RouteResult, UnknownPersona,
};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

pub struct Orchestrator {
    market: PersonaAgent,
    financial: PersonaAgent,
    strategy: PersonaAgent,
}

impl Orchestrator {
    /// Build the three persona agents, sharing one completion adapter.
    pub fn new(adapter: Arc<LlmAdapter>, prompts_dir: impl AsRef<Path>) -> Self {
        let dir = prompts_dir.as_ref();
        Self {
            market: PersonaAgent::from_prompts_dir(dir, Persona::Market, Arc::clone(&adapter)),
            financial: PersonaAgent::from_prompts_dir(
                dir,
                Persona::Financial,
                Arc::clone(&adapter),
            ),
            strategy: PersonaAgent::from_prompts_dir(dir, Persona::Strategy, adapter),
        }
    }

    fn agent(&self, persona: Persona) -> &PersonaAgent {
        match persona {
            Persona::Market => &self.market,
            Persona::Financial => &self.financial,
            Persona::Strategy => &self.strategy,
        }
    }

    /// Route a request to one agent by name (case-insensitive). Unknown
    /// names produce a structured error payload, never a panic or an Err.
    pub async fn process_request(&self, persona_name: &str, request: &str) -> RouteResult {
        match persona_name.parse::<Persona>() {
            Ok(persona) => {
                info!(persona = %persona, "Routing consultation request");
                let response = self.agent(persona).process_request(request).await;
                RouteResult::Consultation(ConsultationResult {
                    agent: persona,
                    response,
                })
            }
            Err(UnknownPersona(name)) => {
                warn!(requested = %name, "Unknown agent type requested");
                RouteResult::Error {
                    error: format!("Unknown agent type: {}", name),
                }
            }
        }
    }

    /// Run all three agents on the same input and aggregate. The calls are
    /// independent and share no mutable state, so they run concurrently.
    /// Adapter failures arrive as error text in `response`; no key is ever
    /// dropped.
    pub async fn process_comprehensive(&self, request: &str) -> ComprehensiveConsultation {
        info!("Running comprehensive consultation across all personas");

        let (market, financial, strategy) = tokio::join!(
            self.market.process_request(request),
            self.financial.process_request(request),
            self.strategy.process_request(request),
        );

        ComprehensiveConsultation {
            market: ConsultationResult {
                agent: Persona::Market,
                response: market,
            },
            financial: ConsultationResult {
                agent: Persona::Financial,
                response: financial,
            },
            strategy: ConsultationResult {
                agent: Persona::Strategy,
                response: strategy,
            },
        }
    }
}
