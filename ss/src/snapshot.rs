//! The persisted session record
//!
//! This is the exact shape written by `Session::snapshot()` and read back by
//! `Session::restore()`. Deserialization is strict: every field is required,
//! and the counters are unsigned, so a record with absent keys, non-numeric
//! or negative counters fails validation rather than half-loading.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::history::HistoryEntry;
use crate::transcript::Message;

/// Complete serializable representation of a session at a point in time
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionSnapshot {
    pub session_id: String,
    pub created_at: DateTime<Utc>,
    pub conversation_context: BTreeMap<String, Value>,
    pub development_history: Vec<HistoryEntry>,
    pub user_preferences: BTreeMap<String, String>,
    pub messages: Vec<Message>,
    pub current_step: u32,
    pub current_conversation_turn: u32,
}
