//! PreferenceSet and the preference-extraction collaborator contract
//!
//! Preferences represent the current belief about what the user wants, not a
//! history: a later observation of the same key overwrites the earlier value.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{SessionError, SessionResult};

/// Mapping from preference key to most-recently-observed value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreferenceSet {
    entries: BTreeMap<String, String>,
}

impl PreferenceSet {
    /// Create an empty preference set
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a set from a persisted mapping
    pub fn from_mapping(mapping: BTreeMap<String, String>) -> Self {
        Self { entries: mapping }
    }

    /// Record an observation; returns the previous value when overwritten
    pub fn observe(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        debug!(%key, %value, "preference observed");
        self.entries.insert(key, value)
    }

    /// Current belief for a key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Copy-on-read view of all preferences
    pub fn as_mapping(&self) -> BTreeMap<String, String> {
        self.entries.clone()
    }

    /// Number of known preferences
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no preference has been observed yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Collaborator contract: extract preference candidates from an utterance
///
/// Implementations must be pure functions of the utterance - no side effects,
/// deterministic for identical input within one process run. Zero pairs is a
/// normal outcome. Input violating the textual contract (a blank utterance)
/// is signaled as [`SessionError::InvalidInput`].
pub trait PreferenceExtractor {
    /// Return zero or more (key, value) preference candidates, in extraction order
    fn extract(&self, utterance: &str) -> SessionResult<Vec<(String, String)>>;
}

/// Preference keys and the keywords that signal them
///
/// Fixed iteration order keeps extraction deterministic and makes the
/// last-applied-wins resolution for in-turn conflicts predictable.
const PREFERENCE_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "language_version",
        &["python3.8", "python3.9", "python3.10", "python3.11"],
    ),
    ("code_style", &["pep8", "black", "flake8"]),
    ("test_framework", &["pytest", "unittest", "nose"]),
    ("package_manager", &["pip", "poetry", "conda"]),
];

/// Default extractor: keyword scan over a fixed preference table
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordExtractor;

impl PreferenceExtractor for KeywordExtractor {
    fn extract(&self, utterance: &str) -> SessionResult<Vec<(String, String)>> {
        if utterance.trim().is_empty() {
            return Err(SessionError::InvalidInput("empty utterance".to_string()));
        }

        let lowered = utterance.to_lowercase();
        let mut pairs = Vec::new();
        for (key, keywords) in PREFERENCE_KEYWORDS {
            for keyword in *keywords {
                if lowered.contains(keyword) {
                    debug!(key, keyword, "preference keyword matched");
                    pairs.push((key.to_string(), keyword.to_string()));
                }
            }
        }
        Ok(pairs)
    }
}
