//! HistoryLog - append-only record of development actions
//!
//! Every tool invocation lands here as an immutable entry stamped with the
//! conversation turn it happened in. The log is the session's audit trail:
//! no deletion or reordering operation exists.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Maximum stored length of a tool result, in characters
///
/// Longer results are truncated with a trailing ellipsis before storage.
pub const MAX_RESULT_LEN: usize = 200;

/// One recorded development action
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Wall-clock time of the action (HH:MM:SS)
    pub timestamp: String,
    /// Tool or operation name
    pub action: String,
    /// Serialized input, stored verbatim
    pub details: String,
    /// Serialized output, possibly truncated
    pub result: String,
    /// Session turn counter at entry time
    #[serde(rename = "conversation_turn")]
    pub turn: u32,
}

impl HistoryEntry {
    /// Create an entry stamped with the given turn
    pub fn new(action: impl Into<String>, details: impl Into<String>, result: &str, turn: u32) -> Self {
        Self {
            timestamp: Utc::now().format("%H:%M:%S").to_string(),
            action: action.into(),
            details: details.into(),
            result: truncate_result(result),
            turn,
        }
    }
}

/// Truncate a result string to `MAX_RESULT_LEN` characters
fn truncate_result(result: &str) -> String {
    if result.chars().count() <= MAX_RESULT_LEN {
        return result.to_string();
    }
    let truncated: String = result.chars().take(MAX_RESULT_LEN).collect();
    format!("{}...", truncated)
}

/// Ordered, append-only sequence of history entries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
}

impl HistoryLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a log from persisted entries, preserving their order
    pub fn from_entries(entries: Vec<HistoryEntry>) -> Self {
        Self { entries }
    }

    /// Append an entry; returns its position in the log
    pub fn append(&mut self, entry: HistoryEntry) -> usize {
        debug!(action = %entry.action, turn = entry.turn, "history append");
        self.entries.push(entry);
        self.entries.len() - 1
    }

    /// Entries with `entry.turn >= turn`, in original append order
    ///
    /// Each call returns a fresh iterator; the log itself is never consumed.
    pub fn entries_since(&self, turn: u32) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().filter(move |e| e.turn >= turn)
    }

    /// All entries in append order
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// The most recent `n` entries, oldest first
    pub fn recent(&self, n: usize) -> &[HistoryEntry] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }

    /// Number of recorded entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(action: &str, turn: u32) -> HistoryEntry {
        HistoryEntry::new(action, "{}", "ok", turn)
    }

    #[test]
    fn test_append_returns_position() {
        let mut log = HistoryLog::new();
        assert_eq!(log.append(entry("a", 0)), 0);
        assert_eq!(log.append(entry("b", 0)), 1);
        assert_eq!(log.append(entry("c", 1)), 2);
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn test_entries_since_filters_and_preserves_order() {
        let mut log = HistoryLog::new();
        log.append(entry("first", 1));
        log.append(entry("second", 1));
        log.append(entry("third", 2));

        let since_two: Vec<_> = log.entries_since(2).collect();
        assert_eq!(since_two.len(), 1);
        assert_eq!(since_two[0].action, "third");

        let since_one: Vec<_> = log.entries_since(1).collect();
        assert_eq!(since_one.len(), 3);
        assert_eq!(since_one[0].action, "first");
        assert_eq!(since_one[2].action, "third");

        // Restartable: a second call sees the same entries
        assert_eq!(log.entries_since(2).count(), 1);
    }

    #[test]
    fn test_entries_since_zero_returns_all() {
        let mut log = HistoryLog::new();
        log.append(entry("a", 0));
        log.append(entry("b", 3));
        assert_eq!(log.entries_since(0).count(), 2);
    }

    #[test]
    fn test_result_truncated() {
        let long = "x".repeat(MAX_RESULT_LEN + 50);
        let e = HistoryEntry::new("tool", "{}", &long, 0);
        assert_eq!(e.result.chars().count(), MAX_RESULT_LEN + 3);
        assert!(e.result.ends_with("..."));

        let short = "short output";
        let e = HistoryEntry::new("tool", "{}", short, 0);
        assert_eq!(e.result, short);
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        let multibyte = "é".repeat(MAX_RESULT_LEN + 10);
        let e = HistoryEntry::new("tool", "{}", &multibyte, 0);
        assert!(e.result.ends_with("..."));
        assert_eq!(e.result.chars().count(), MAX_RESULT_LEN + 3);
    }

    #[test]
    fn test_recent() {
        let mut log = HistoryLog::new();
        for i in 0..5 {
            log.append(entry(&format!("a{}", i), i));
        }
        let recent = log.recent(3);
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].action, "a2");
        assert_eq!(recent[2].action, "a4");

        assert_eq!(log.recent(100).len(), 5);
    }
}
