//! SessionStore - conversation/session state core
//!
//! Accumulates conversation turns, derives and retains development context,
//! learns user preferences, records a chronological development history, and
//! persists/restores this state across process runs.
//!
//! # Architecture
//!
//! ```text
//! {store_path}/
//! ├── session-{uuid}.json    # one snapshot per session
//! └── ...
//! ```
//!
//! Each record is a single JSON object holding the full session state:
//! counters, conversation context, development history, user preferences and
//! the message transcript. Saves are atomic (temp file + rename), so a reader
//! never observes a partially written record.
//!
//! # Example
//!
//! ```ignore
//! use sessionstore::{KeywordExtractor, Role, Session, SessionStore};
//!
//! let mut session = Session::create(Some("build a blog website"));
//! session.merge_context([("project_type".to_string(), "web".into())]);
//! session.record_tool_invocation("requirement_clarifier", "{}", "3 questions asked");
//! session.advance_turn();
//!
//! let store = SessionStore::open(".sessions")?;
//! store.save(&session)?;
//! let restored = store.load(session.id())?;
//! ```

pub mod cli;
pub mod config;
mod context;
mod error;
mod history;
mod prefs;
mod session;
mod snapshot;
mod store;
mod transcript;

pub use context::ConversationContext;
pub use error::{SessionError, SessionResult};
pub use history::{HistoryEntry, HistoryLog, MAX_RESULT_LEN};
pub use prefs::{KeywordExtractor, PreferenceExtractor, PreferenceSet};
pub use session::Session;
pub use snapshot::SessionSnapshot;
pub use store::{SavePolicy, SessionStore, SessionSummary};
pub use transcript::{Message, MessageTranscript, Role};
