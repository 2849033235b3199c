//! ConversationContext - the evolving development context
//!
//! An open key/value accumulator rather than a rigid schema, so new
//! conversation dimensions (project type, tech stack, ...) can appear without
//! a migration of persisted records.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::debug;

/// Mutable key/value accumulator for derived development context
///
/// Keys are case-normalized (trimmed, lowercased) and unique. Merges are
/// last-write-wins: an incoming key overwrites, never drops, an existing one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversationContext {
    entries: BTreeMap<String, Value>,
}

/// Normalize a context key: trimmed and lowercased
fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase()
}

impl ConversationContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a context from a persisted mapping, normalizing keys
    pub fn from_mapping(mapping: BTreeMap<String, Value>) -> Self {
        let mut ctx = Self::new();
        ctx.merge(mapping);
        ctx
    }

    /// Apply a last-write-wins merge; keys absent from `partial` are untouched
    pub fn merge(&mut self, partial: impl IntoIterator<Item = (String, Value)>) {
        for (key, value) in partial {
            let key = normalize_key(&key);
            debug!(%key, "context merge");
            self.entries.insert(key, value);
        }
    }

    /// Pure read of a single key (case-normalized lookup)
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(&normalize_key(key))
    }

    /// Copy-on-read view of the full context
    ///
    /// Returns an owned mapping so callers cannot mutate the accumulator's
    /// internal state through the returned value.
    pub fn as_mapping(&self) -> BTreeMap<String, Value> {
        self.entries.clone()
    }

    /// Number of accumulated keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no context has been accumulated yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_last_write_wins() {
        let mut ctx = ConversationContext::new();
        ctx.merge([("project_type".to_string(), json!("web"))]);
        ctx.merge([
            ("tech_stack".to_string(), json!("flask")),
            ("project_type".to_string(), json!("api")),
        ]);

        let mapping = ctx.as_mapping();
        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping["project_type"], json!("api"));
        assert_eq!(mapping["tech_stack"], json!("flask"));
    }

    #[test]
    fn test_keys_case_normalized() {
        let mut ctx = ConversationContext::new();
        ctx.merge([("Project_Type".to_string(), json!("web"))]);
        ctx.merge([(" project_type ".to_string(), json!("cli"))]);

        assert_eq!(ctx.len(), 1);
        assert_eq!(ctx.get("PROJECT_TYPE"), Some(&json!("cli")));
    }

    #[test]
    fn test_as_mapping_is_a_copy() {
        let mut ctx = ConversationContext::new();
        ctx.merge([("k".to_string(), json!(1))]);

        let mut mapping = ctx.as_mapping();
        mapping.insert("k".to_string(), json!(2));
        mapping.insert("other".to_string(), json!(3));

        assert_eq!(ctx.get("k"), Some(&json!(1)));
        assert!(ctx.get("other").is_none());
    }

    #[test]
    fn test_fold_independence() {
        // Final context equals folding last-write-wins over the partials,
        // regardless of how they were batched.
        let partials = [
            vec![("a".to_string(), json!(1))],
            vec![("b".to_string(), json!(2)), ("a".to_string(), json!(3))],
            vec![("c".to_string(), json!(4))],
        ];

        let mut batched = ConversationContext::new();
        for partial in &partials {
            batched.merge(partial.clone());
        }

        let mut one_by_one = ConversationContext::new();
        for (k, v) in partials.iter().flatten() {
            one_by_one.merge([(k.clone(), v.clone())]);
        }

        assert_eq!(batched, one_by_one);
        assert_eq!(batched.get("a"), Some(&json!(3)));
    }
}
