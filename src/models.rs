//! Core data models for the consulting service

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

//
// ================= Messages =================
//

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One role-tagged turn of a conversation. Ordered sequences form the
/// conversation sent to the completion provider; in this system the
/// template output is always a single user message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }
}

//
// ================= Personas =================
//

/// The three fixed expert viewpoints the service can answer from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Persona {
    Market,
    Financial,
    Strategy,
}

impl Persona {
    pub const ALL: [Persona; 3] = [Persona::Market, Persona::Financial, Persona::Strategy];

    pub fn as_str(&self) -> &'static str {
        match self {
            Persona::Market => "market",
            Persona::Financial => "financial",
            Persona::Strategy => "strategy",
        }
    }

    /// Prompt template file name under the prompts directory.
    pub fn template_file(&self) -> &'static str {
        match self {
            Persona::Market => "market_analysis_prompt.txt",
            Persona::Financial => "financial_analysis_prompt.txt",
            Persona::Strategy => "strategy_prompt.txt",
        }
    }

    /// Built-in template used when the on-disk prompt is unavailable.
    pub fn fallback_template(&self) -> &'static str {
        match self {
            Persona::Market => {
                "You are a market analysis expert. Analyze the following business request:\n\n{request}"
            }
            Persona::Financial => {
                "You are a financial analysis expert. Analyze the following business request:\n\n{request}"
            }
            Persona::Strategy => {
                "You are a business strategy expert. Analyze the following business request:\n\n{request}"
            }
        }
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Unknown persona marker; `FromStr` never panics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPersona(pub String);

impl FromStr for Persona {
    type Err = UnknownPersona;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "market" => Ok(Persona::Market),
            "financial" => Ok(Persona::Financial),
            "strategy" => Ok(Persona::Strategy),
            other => Err(UnknownPersona(other.to_string())),
        }
    }
}

//
// ================= Consultation Results =================
//

/// Response from a single persona agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsultationResult {
    pub agent: Persona,
    pub response: String,
}

/// Aggregate of all three personas. The three keys are always present;
/// provider failures degrade to error text inside `response`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComprehensiveConsultation {
    pub market: ConsultationResult,
    pub financial: ConsultationResult,
    pub strategy: ConsultationResult,
}

/// Outcome of routing a request by persona name: either a consultation
/// or a structured error naming the unrecognized persona.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RouteResult {
    Consultation(ConsultationResult),
    Error { error: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persona_parse_is_case_insensitive() {
        assert_eq!("MARKET".parse::<Persona>(), Ok(Persona::Market));
        assert_eq!("Financial".parse::<Persona>(), Ok(Persona::Financial));
        assert_eq!(" strategy ".parse::<Persona>(), Ok(Persona::Strategy));
    }

    #[test]
    fn persona_parse_rejects_unknown_names() {
        assert_eq!(
            "legal".parse::<Persona>(),
            Err(UnknownPersona("legal".to_string()))
        );
        assert!("".parse::<Persona>().is_err());
    }

    #[test]
    fn persona_serializes_lowercase() {
        let result = ConsultationResult {
            agent: Persona::Market,
            response: "ok".to_string(),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["agent"], "market");
    }

    #[test]
    fn route_result_error_serializes_as_error_object() {
        let routed = RouteResult::Error {
            error: "Unknown agent type: legal".to_string(),
        };
        let json = serde_json::to_value(&routed).unwrap();
        assert_eq!(json["error"], "Unknown agent type: legal");
        assert!(json.get("agent").is_none());
    }

    #[test]
    fn fallback_templates_carry_the_request_slot() {
        for persona in Persona::ALL {
            assert!(persona.fallback_template().contains("{request}"));
        }
    }
}
