//! Session - the root entity of one development conversation
//!
//! A Session owns exactly one ConversationContext, HistoryLog, PreferenceSet
//! and MessageTranscript, and exposes the single mutation surface the rest of
//! the system uses. No other component writes these substructures directly.
//!
//! There is deliberately no ambient "current session": callers construct or
//! restore a Session once and pass the handle explicitly.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, info};
use uuid::Uuid;

use crate::context::ConversationContext;
use crate::error::{SessionError, SessionResult};
use crate::history::{HistoryEntry, HistoryLog};
use crate::prefs::{PreferenceExtractor, PreferenceSet};
use crate::snapshot::SessionSnapshot;
use crate::transcript::{Message, MessageTranscript, Role};

/// One development conversation's complete state
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    session_id: String,
    created_at: DateTime<Utc>,
    turn: u32,
    step: u32,
    context: ConversationContext,
    history: HistoryLog,
    preferences: PreferenceSet,
    transcript: MessageTranscript,
}

impl Session {
    /// Allocate a fresh session
    ///
    /// The id is UUIDv7 (timestamp-derived), counters start at zero, and all
    /// substructures are empty. A seed requirement, when given, becomes the
    /// first user message but does not advance the turn counter.
    pub fn create(seed_requirement: Option<&str>) -> Self {
        let session_id = format!("session-{}", Uuid::now_v7());
        info!(%session_id, "session created");

        let mut transcript = MessageTranscript::new();
        if let Some(seed) = seed_requirement {
            transcript.push(Message::user(seed));
        }

        Self {
            session_id,
            created_at: Utc::now(),
            turn: 0,
            step: 0,
            context: ConversationContext::new(),
            history: HistoryLog::new(),
            preferences: PreferenceSet::new(),
            transcript,
        }
    }

    /// Globally unique, immutable identifier
    pub fn id(&self) -> &str {
        &self.session_id
    }

    /// Creation time, set once
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Completed user-assistant exchanges so far
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Individual tool/agent steps so far (finer grain than turns)
    pub fn step(&self) -> u32 {
        self.step
    }

    /// The accumulated development context
    pub fn context(&self) -> &ConversationContext {
        &self.context
    }

    /// The development history log
    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// Learned user preferences
    pub fn preferences(&self) -> &PreferenceSet {
        &self.preferences
    }

    /// The raw message transcript
    pub fn transcript(&self) -> &MessageTranscript {
        &self.transcript
    }

    /// Append a message to the transcript; no other side effect
    pub fn record_message(&mut self, role: Role, text: impl Into<String>) {
        self.transcript.push(Message::new(role, text));
    }

    /// Record a tool invocation in the history log
    ///
    /// The entry is stamped with the current turn; the step counter advances.
    /// Visible to history readers immediately. Returns the entry's position.
    pub fn record_tool_invocation(
        &mut self,
        action: impl Into<String>,
        details: impl Into<String>,
        result: &str,
    ) -> usize {
        let entry = HistoryEntry::new(action, details, result, self.turn);
        debug!(action = %entry.action, step = self.step + 1, "tool invocation recorded");
        let position = self.history.append(entry);
        self.step += 1;
        position
    }

    /// Mark one complete user-assistant exchange
    ///
    /// A skipped call only coarsens audit granularity; later operations stay
    /// correct either way.
    pub fn advance_turn(&mut self) {
        self.turn += 1;
        debug!(turn = self.turn, "turn advanced");
    }

    /// Last-write-wins merge into the conversation context
    ///
    /// Returns a copy of the updated full context.
    pub fn merge_context(
        &mut self,
        partial: impl IntoIterator<Item = (String, Value)>,
    ) -> BTreeMap<String, Value> {
        self.context.merge(partial);
        self.context.as_mapping()
    }

    /// Run the preference extractor over an utterance and fold the result in
    ///
    /// Pairs are applied last-applied-wins in extraction order. Returns the
    /// delta: the pairs whose stored value actually changed. If the extractor
    /// fails, the preference set is left untouched.
    pub fn observe_preferences(
        &mut self,
        extractor: &dyn PreferenceExtractor,
        utterance: &str,
    ) -> SessionResult<Vec<(String, String)>> {
        let pairs = extractor.extract(utterance)?;

        let mut delta = Vec::new();
        for (key, value) in pairs {
            let previous = self.preferences.observe(key.clone(), value.clone());
            if previous.as_deref() != Some(value.as_str()) {
                delta.push((key, value));
            }
        }
        if !delta.is_empty() {
            info!(changed = delta.len(), "preferences updated");
        }
        Ok(delta)
    }

    /// Full serializable representation - the exact shape the store persists
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.session_id.clone(),
            created_at: self.created_at,
            conversation_context: self.context.as_mapping(),
            development_history: self.history.iter().cloned().collect(),
            user_preferences: self.preferences.as_mapping(),
            messages: self.transcript.iter().cloned().collect(),
            current_step: self.step,
            current_conversation_turn: self.turn,
        }
    }

    /// Reconstruct a session from a raw persisted record
    ///
    /// Fails with [`SessionError::Malformed`] when required fields are absent
    /// or counters are non-numeric/negative. Built as a constructor so a
    /// failed restore can never expose a partially populated session.
    pub fn restore(record: Value) -> SessionResult<Self> {
        let snapshot: SessionSnapshot =
            serde_json::from_value(record).map_err(|e| SessionError::Malformed(e.to_string()))?;
        Ok(Self::from_snapshot(snapshot))
    }

    /// Rebuild a session from an already-validated snapshot
    pub fn from_snapshot(snapshot: SessionSnapshot) -> Self {
        debug!(session_id = %snapshot.session_id, turn = snapshot.current_conversation_turn, "session restored");
        Self {
            session_id: snapshot.session_id,
            created_at: snapshot.created_at,
            turn: snapshot.current_conversation_turn,
            step: snapshot.current_step,
            context: ConversationContext::from_mapping(snapshot.conversation_context),
            history: HistoryLog::from_entries(snapshot.development_history),
            preferences: PreferenceSet::from_mapping(snapshot.user_preferences),
            transcript: MessageTranscript::from_messages(snapshot.messages),
        }
    }

    /// Human-readable state summary (REPL `/summary`, `ss list` output)
    pub fn summary(&self) -> String {
        let mut parts = vec![
            format!("Session: {}", self.session_id),
            format!("Conversation turns: {}", self.turn),
            format!("Steps executed: {}", self.step),
        ];

        if !self.context.is_empty() {
            let ctx: Vec<String> = self
                .context
                .as_mapping()
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect();
            parts.push(format!("Context: {}", ctx.join(", ")));
        }

        if !self.preferences.is_empty() {
            let prefs: Vec<String> = self
                .preferences
                .as_mapping()
                .iter()
                .map(|(k, v)| format!("{}:{}", k, v))
                .collect();
            parts.push(format!("Preferences: {}", prefs.join(", ")));
        }

        if !self.history.is_empty() {
            parts.push(format!("Actions recorded: {}", self.history.len()));
        }

        parts.join("\n")
    }
}
