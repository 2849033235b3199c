//! Collaborator contracts consumed by the agent
//!
//! Collaborators are external capabilities behind synchronous traits. Their
//! raw results are opaque JSON - the agent records them verbatim in the
//! history log and only validates the shape it needs, never the semantics.

pub mod clarifier;
pub mod progress;
pub mod review;

pub use clarifier::HeuristicClarifier;
pub use progress::{ProgressAction, ProgressTracker};
pub use review::HeuristicReviewer;

use serde_json::Value;
use sessionstore::{SessionError, SessionResult};

/// Analyzes a raw requirement utterance into a structured direction
pub trait RequirementClarifier {
    /// Produce `{ technical_direction, functional_domains, complexity_estimate,
    /// clarifying_questions }` for a requirement utterance
    fn clarify(&self, utterance: &str) -> SessionResult<Value>;
}

/// Reviews file contents for quality issues
pub trait CodeReviewer {
    /// Produce `{ issues, suggestions }` for the given file contents
    fn review(&self, file_contents: &str) -> SessionResult<Value>;
}

/// Pull a required key out of a collaborator response
fn require<'a>(value: &'a Value, key: &str) -> SessionResult<&'a Value> {
    value.get(key).ok_or_else(|| {
        SessionError::InvalidCollaboratorResponse(format!("missing required key '{}'", key))
    })
}

/// Read a required key as an array of strings, tolerating non-string items
fn require_string_seq(value: &Value, key: &str) -> SessionResult<Vec<String>> {
    let seq = require(value, key)?.as_array().ok_or_else(|| {
        SessionError::InvalidCollaboratorResponse(format!("key '{}' is not a sequence", key))
    })?;
    Ok(seq
        .iter()
        .map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect())
}

/// Shape-validated view of a requirement-analysis response
#[derive(Debug, Clone, PartialEq)]
pub struct RequirementAnalysis {
    pub technical_direction: String,
    pub functional_domains: Vec<String>,
    pub complexity_estimate: String,
    pub clarifying_questions: Vec<String>,
}

impl RequirementAnalysis {
    /// Validate the contract shape; semantic content is not checked
    pub fn from_value(value: &Value) -> SessionResult<Self> {
        Ok(Self {
            technical_direction: require(value, "technical_direction")?
                .as_str()
                .unwrap_or_default()
                .to_string(),
            functional_domains: require_string_seq(value, "functional_domains")?,
            complexity_estimate: require(value, "complexity_estimate")?
                .as_str()
                .unwrap_or_default()
                .to_string(),
            clarifying_questions: require_string_seq(value, "clarifying_questions")?,
        })
    }
}

/// Shape-validated view of a code-review response
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewReport {
    pub issues: Vec<String>,
    pub suggestions: Vec<String>,
}

impl ReviewReport {
    /// Validate the contract shape; issue contents stay opaque
    pub fn from_value(value: &Value) -> SessionResult<Self> {
        Ok(Self {
            issues: require_string_seq(value, "issues")?,
            suggestions: require_string_seq(value, "suggestions")?,
        })
    }
}
