//! Default requirement-clarifier collaborator
//!
//! Keyword heuristics over the raw utterance: spot a technical direction,
//! functional domains, vague wording, and a rough complexity estimate, then
//! derive the clarifying questions worth asking before any code is written.

use serde_json::{Value, json};
use tracing::debug;

use sessionstore::{SessionError, SessionResult};

use super::RequirementClarifier;

/// At most this many clarifying questions per analysis
const MAX_QUESTIONS: usize = 6;

/// Technical directions and the keywords that hint at them
const TECH_KEYWORDS: &[(&str, &[&str])] = &[
    ("web", &["website", "web", "frontend", "backend", "blog"]),
    ("mobile", &["mobile", "phone", "app", "android", "ios"]),
    ("data", &["data", "database", "analysis", "statistics", "report", "csv"]),
    ("ai", &["ai", "machine learning", "deep learning", "model", "llm"]),
    ("api", &["api", "endpoint", "service", "rest", "restful"]),
    ("automation", &["automate", "automatic", "scheduled", "batch", "backup", "script"]),
];

/// Functional domains and their keywords
const DOMAIN_KEYWORDS: &[(&str, &[&str])] = &[
    ("user_management", &["user", "login", "register", "account", "auth"]),
    ("data_processing", &["process", "compute", "algorithm", "transform", "parse"]),
    ("ui_ux", &["interface", "ui", "design", "interactive", "display"]),
    ("integration", &["integrate", "connect", "sync", "webhook", "third-party"]),
    ("automation", &["automatic", "cron", "schedule", "batch", "pipeline"]),
];

/// Vague phrasing that needs pinning down before development starts
const AMBIGUOUS_INDICATORS: &[&str] = &["something like", "similar to", "nice", "fast", "good", "simple", "complex"];

const SIMPLE_INDICATORS: &[&str] = &["simple", "basic", "small", "demo", "minimal"];
const COMPLEX_INDICATORS: &[&str] = &["complex", "advanced", "large", "enterprise", "distributed", "microservice"];

/// Keyword-driven requirement analysis
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicClarifier;

impl HeuristicClarifier {
    fn matched_categories(lowered: &str, table: &[(&str, &[&str])]) -> Vec<String> {
        table
            .iter()
            .filter(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k)))
            .map(|(category, _)| category.to_string())
            .collect()
    }

    fn complexity(lowered: &str) -> &'static str {
        if SIMPLE_INDICATORS.iter().any(|k| lowered.contains(k)) {
            "simple"
        } else if COMPLEX_INDICATORS.iter().any(|k| lowered.contains(k)) {
            "complex"
        } else {
            "medium"
        }
    }

    fn questions(directions: &[String], domains: &[String], ambiguous: &[&str]) -> Vec<String> {
        let mut questions = Vec::new();

        if directions.iter().any(|d| d == "web") {
            questions.push(
                "What kind of web application do you have in mind - static site, server-rendered app, or SPA?"
                    .to_string(),
            );
        }
        if directions.iter().any(|d| d == "mobile") {
            questions.push("Which platforms should be supported - iOS, Android, or cross-platform?".to_string());
        }
        if domains.iter().any(|d| d == "user_management") {
            questions.push(
                "What should user management cover - registration methods, permission levels, profiles?".to_string(),
            );
        }
        if domains.iter().any(|d| d == "data_processing") {
            questions.push("What kind of data will be processed, and roughly how much of it?".to_string());
        }
        if !ambiguous.is_empty() {
            questions.push(format!(
                "Could you make these more concrete: {}?",
                ambiguous.join(", ")
            ));
        }

        // Always-applicable questions fill the remaining slots
        questions.push("Who are the main users, and in what scenario will they use this?".to_string());
        questions.push("Any technical constraints or preferences - language, framework, deployment target?".to_string());
        questions.push("Which features are must-have for a first version, and which are optional?".to_string());

        questions.truncate(MAX_QUESTIONS);
        questions
    }
}

impl RequirementClarifier for HeuristicClarifier {
    fn clarify(&self, utterance: &str) -> SessionResult<Value> {
        if utterance.trim().is_empty() {
            return Err(SessionError::InvalidInput("empty requirement".to_string()));
        }

        let lowered = utterance.to_lowercase();
        let directions = Self::matched_categories(&lowered, TECH_KEYWORDS);
        let domains = Self::matched_categories(&lowered, DOMAIN_KEYWORDS);
        let ambiguous: Vec<&str> = AMBIGUOUS_INDICATORS
            .iter()
            .copied()
            .filter(|k| lowered.contains(k))
            .collect();

        let technical_direction = directions.first().cloned().unwrap_or_else(|| "general".to_string());
        let complexity = Self::complexity(&lowered);
        let questions = Self::questions(&directions, &domains, &ambiguous);

        debug!(
            %technical_direction,
            domains = domains.len(),
            questions = questions.len(),
            "requirement analyzed"
        );

        Ok(json!({
            "technical_direction": technical_direction,
            "functional_domains": domains,
            "complexity_estimate": complexity,
            "clarifying_questions": questions,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collab::RequirementAnalysis;

    #[test]
    fn test_web_requirement_detected() {
        let clarifier = HeuristicClarifier;
        let value = clarifier
            .clarify("I want to build a simple blog website where users can publish articles")
            .unwrap();
        let analysis = RequirementAnalysis::from_value(&value).unwrap();

        assert_eq!(analysis.technical_direction, "web");
        assert!(analysis.functional_domains.contains(&"user_management".to_string()));
        assert_eq!(analysis.complexity_estimate, "simple");
        assert!(!analysis.clarifying_questions.is_empty());
    }

    #[test]
    fn test_question_count_bounded() {
        let clarifier = HeuristicClarifier;
        let value = clarifier
            .clarify("a simple nice fast web app with user login that processes data and syncs with a third-party api")
            .unwrap();
        let analysis = RequirementAnalysis::from_value(&value).unwrap();
        assert!(analysis.clarifying_questions.len() <= MAX_QUESTIONS);
    }

    #[test]
    fn test_unrecognized_direction_is_general() {
        let clarifier = HeuristicClarifier;
        // No keyword from any table appears in this utterance
        let value = clarifier.clarify("quarterly budget planning").unwrap();
        let analysis = RequirementAnalysis::from_value(&value).unwrap();
        assert_eq!(analysis.technical_direction, "general");
        assert!(analysis.functional_domains.is_empty());
        assert_eq!(analysis.complexity_estimate, "medium");
    }

    #[test]
    fn test_keywords_match_inside_words() {
        // Matching is plain substring scan, so embedded keywords count
        let clarifier = HeuristicClarifier;
        let value = clarifier.clarify("je ne sais quoi").unwrap();
        let analysis = RequirementAnalysis::from_value(&value).unwrap();
        assert_eq!(analysis.technical_direction, "ai");
    }

    #[test]
    fn test_blank_utterance_rejected() {
        let err = HeuristicClarifier.clarify("   ").unwrap_err();
        assert!(matches!(err, SessionError::InvalidInput(_)));
    }

    #[test]
    fn test_deterministic_within_run() {
        let clarifier = HeuristicClarifier;
        let a = clarifier.clarify("a data analysis script for csv reports").unwrap();
        let b = clarifier.clarify("a data analysis script for csv reports").unwrap();
        assert_eq!(a, b);
    }
}
