//! SessionStore - durable JSON persistence for sessions
//!
//! One pretty-printed JSON file per session, keyed by session id. Saves are
//! total: the record is written to a temporary file and renamed over the old
//! one, so a reader never observes a partially written record.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{SessionError, SessionResult};
use crate::session::Session;

/// When the agent should snapshot the session to the store
///
/// The save cadence is an explicit policy rather than a hard-coded trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SavePolicy {
    /// Save after every completed user-assistant exchange
    EveryTurn,
    /// Save whenever the step counter reaches a multiple of N
    EveryNSteps(u32),
    /// Only save when the caller asks for it
    Manual,
}

impl Default for SavePolicy {
    fn default() -> Self {
        Self::EveryTurn
    }
}

impl SavePolicy {
    /// Should the session be saved now that a turn completed?
    pub fn save_after_turn(&self) -> bool {
        matches!(self, Self::EveryTurn)
    }

    /// Should the session be saved now that the step counter reads `step`?
    pub fn save_after_step(&self, step: u32) -> bool {
        match self {
            Self::EveryNSteps(n) => *n > 0 && step % n == 0,
            _ => false,
        }
    }
}

/// Listing entry for a persisted session
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub session_id: String,
    pub path: PathBuf,
    pub created_at: DateTime<Utc>,
    pub conversation_turns: u32,
    pub steps: u32,
}

/// Durable storage for session snapshots
pub struct SessionStore {
    base_path: PathBuf,
}

impl SessionStore {
    /// Open or create a store at the given directory
    pub fn open(path: impl AsRef<Path>) -> SessionResult<Self> {
        let base_path = path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path)?;
        debug!(?base_path, "opened session store");
        Ok(Self { base_path })
    }

    /// File path a session id maps to
    pub fn path_for(&self, session_id: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", session_id))
    }

    /// Persist a session's snapshot, replacing any prior save for the same id
    ///
    /// Write-to-temporary-then-rename keeps the previous record intact if the
    /// new write fails partway. Returns the record's final location.
    pub fn save(&self, session: &Session) -> SessionResult<PathBuf> {
        let snapshot = session.snapshot();
        let content = serde_json::to_string_pretty(&snapshot)
            .map_err(|e| SessionError::Malformed(e.to_string()))?;

        let final_path = self.path_for(session.id());
        let tmp_path = self.base_path.join(format!(".{}.json.tmp", session.id()));

        fs::write(&tmp_path, content)?;
        fs::rename(&tmp_path, &final_path)?;

        info!(session_id = %session.id(), path = %final_path.display(), "session saved");
        Ok(final_path)
    }

    /// Load a session by id
    pub fn load(&self, session_id: &str) -> SessionResult<Session> {
        let path = self.path_for(session_id);
        if !path.exists() {
            return Err(SessionError::NotFound(session_id.to_string()));
        }

        let content = fs::read_to_string(&path)?;
        let record: serde_json::Value =
            serde_json::from_str(&content).map_err(|e| SessionError::Malformed(e.to_string()))?;

        let session = Session::restore(record)?;
        info!(%session_id, turn = session.turn(), step = session.step(), "session loaded");
        Ok(session)
    }

    /// All persisted session ids, lexically sorted
    pub fn list(&self) -> SessionResult<Vec<String>> {
        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.base_path)? {
            let path = entry?.path();
            if path.extension().map(|e| e == "json").unwrap_or(false)
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
            {
                ids.push(stem.to_string());
            }
        }
        ids.sort();
        Ok(ids)
    }

    /// Listing entries for all readable sessions, newest first
    ///
    /// Records that cannot be parsed are skipped rather than failing the
    /// whole listing.
    pub fn summaries(&self) -> SessionResult<Vec<SessionSummary>> {
        let mut summaries = Vec::new();
        for id in self.list()? {
            match self.load(&id) {
                Ok(session) => summaries.push(SessionSummary {
                    session_id: session.id().to_string(),
                    path: self.path_for(&id),
                    created_at: session.created_at(),
                    conversation_turns: session.turn(),
                    steps: session.step(),
                }),
                Err(e) => {
                    debug!(session_id = %id, error = %e, "skipping unreadable session record");
                }
            }
        }
        summaries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(summaries)
    }

    /// Remove a session's persisted state; no-op when it does not exist
    pub fn delete(&self, session_id: &str) -> SessionResult<()> {
        let path = self.path_for(session_id);
        if path.exists() {
            fs::remove_file(&path)?;
            info!(%session_id, "session deleted");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_load_round_trip() {
        let temp = tempdir().unwrap();
        let store = SessionStore::open(temp.path()).unwrap();

        let mut session = Session::create(Some("build a todo app"));
        session.merge_context([("project_type".to_string(), serde_json::json!("mobile"))]);
        session.record_tool_invocation("requirement_clarifier", "{}", "ok");
        session.advance_turn();

        store.save(&session).unwrap();
        let loaded = store.load(session.id()).unwrap();
        assert_eq!(loaded.snapshot(), session.snapshot());
    }

    #[test]
    fn test_load_nonexistent_is_not_found() {
        let temp = tempdir().unwrap();
        let store = SessionStore::open(temp.path()).unwrap();

        let err = store.load("nonexistent-id").unwrap_err();
        assert!(matches!(err, SessionError::NotFound(_)));
        // Must not create a placeholder record
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_save_is_idempotent_byte_for_byte() {
        let temp = tempdir().unwrap();
        let store = SessionStore::open(temp.path()).unwrap();

        let session = Session::create(None);
        let path = store.save(&session).unwrap();
        let first = fs::read(&path).unwrap();
        store.save(&session).unwrap();
        let second = fs::read(&path).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_save_overwrites_prior_record() {
        let temp = tempdir().unwrap();
        let store = SessionStore::open(temp.path()).unwrap();

        let mut session = Session::create(None);
        store.save(&session).unwrap();

        session.advance_turn();
        store.save(&session).unwrap();

        let loaded = store.load(session.id()).unwrap();
        assert_eq!(loaded.turn(), 1);
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn test_delete_then_load_is_not_found() {
        let temp = tempdir().unwrap();
        let store = SessionStore::open(temp.path()).unwrap();

        let session = Session::create(None);
        store.save(&session).unwrap();
        store.delete(session.id()).unwrap();

        let err = store.load(session.id()).unwrap_err();
        assert!(matches!(err, SessionError::NotFound(_)));
    }

    #[test]
    fn test_delete_nonexistent_is_noop() {
        let temp = tempdir().unwrap();
        let store = SessionStore::open(temp.path()).unwrap();
        store.delete("never-existed").unwrap();
    }

    #[test]
    fn test_list_sorted_and_stable() {
        let temp = tempdir().unwrap();
        let store = SessionStore::open(temp.path()).unwrap();

        let a = Session::create(None);
        let b = Session::create(None);
        store.save(&b).unwrap();
        store.save(&a).unwrap();

        let ids = store.list().unwrap();
        assert_eq!(ids.len(), 2);
        let mut expected = vec![a.id().to_string(), b.id().to_string()];
        expected.sort();
        assert_eq!(ids, expected);
        assert_eq!(store.list().unwrap(), ids);
    }

    #[test]
    fn test_load_malformed_record() {
        let temp = tempdir().unwrap();
        let store = SessionStore::open(temp.path()).unwrap();

        fs::write(temp.path().join("broken.json"), "{ not json").unwrap();
        let err = store.load("broken").unwrap_err();
        assert!(matches!(err, SessionError::Malformed(_)));

        // The offending record is left untouched
        assert_eq!(fs::read_to_string(temp.path().join("broken.json")).unwrap(), "{ not json");
    }

    #[test]
    fn test_summaries_skip_unreadable_records() {
        let temp = tempdir().unwrap();
        let store = SessionStore::open(temp.path()).unwrap();

        let session = Session::create(None);
        store.save(&session).unwrap();
        fs::write(temp.path().join("corrupt.json"), "{}").unwrap();

        let summaries = store.summaries().unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].session_id, session.id());
    }

    #[test]
    fn test_save_policy_every_turn() {
        let policy = SavePolicy::EveryTurn;
        assert!(policy.save_after_turn());
        assert!(!policy.save_after_step(5));
    }

    #[test]
    fn test_save_policy_every_n_steps() {
        let policy = SavePolicy::EveryNSteps(3);
        assert!(!policy.save_after_turn());
        assert!(!policy.save_after_step(1));
        assert!(policy.save_after_step(3));
        assert!(policy.save_after_step(6));

        // N = 0 never fires
        assert!(!SavePolicy::EveryNSteps(0).save_after_step(0));
    }

    #[test]
    fn test_save_policy_manual() {
        let policy = SavePolicy::Manual;
        assert!(!policy.save_after_turn());
        assert!(!policy.save_after_step(10));
    }
}
