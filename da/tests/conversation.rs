//! End-to-end conversation flow through agent and store

use devagent::{Agent, ProgressAction};
use sessionstore::{Role, SavePolicy, SessionStore};
use tempfile::tempdir;

#[test]
fn test_full_conversation_persists_and_resumes() {
    let temp = tempdir().unwrap();

    let store = SessionStore::open(temp.path()).unwrap();
    let mut agent = Agent::new(store, SavePolicy::EveryTurn, 20, None);

    let reply = agent
        .handle_user_input("I want a simple blog website with user login, tested with pytest")
        .unwrap();
    assert!(reply.contains("web"));
    assert!(reply.contains("test_framework=pytest"));

    agent.handle_user_input("format the code with black").unwrap();
    agent
        .track_progress(ProgressAction::CreateMilestone, "MVP", Some("first usable cut"))
        .unwrap();
    agent.save().unwrap();
    let id = agent.session().id().to_string();

    // A second process picks the conversation back up
    let store = SessionStore::open(temp.path()).unwrap();
    let resumed = Agent::resume(store, SavePolicy::EveryTurn, 20, &id).unwrap();

    assert_eq!(resumed.session().turn(), 2);
    assert_eq!(resumed.session().preferences().get("test_framework"), Some("pytest"));
    assert_eq!(resumed.session().preferences().get("code_style"), Some("black"));
    assert_eq!(
        resumed.session().context().get("technical_direction"),
        Some(&serde_json::json!("web"))
    );

    // Transcript alternates user/assistant per exchange
    let roles: Vec<Role> = resumed.session().transcript().iter().map(|m| m.role).collect();
    assert_eq!(roles, vec![Role::User, Role::Assistant, Role::User, Role::Assistant]);

    // History carries the clarification and the milestone
    let actions: Vec<&str> = resumed
        .session()
        .history()
        .iter()
        .map(|e| e.action.as_str())
        .collect();
    assert_eq!(actions, vec!["requirement_clarifier", "project_progress_tracker"]);
}

#[test]
fn test_history_audit_survives_round_trip() {
    let temp = tempdir().unwrap();
    let store = SessionStore::open(temp.path()).unwrap();
    let mut agent = Agent::new(store, SavePolicy::EveryTurn, 20, None);

    agent.handle_user_input("a data analysis script for csv files").unwrap();
    agent.handle_user_input("it should compute monthly totals").unwrap();
    agent
        .track_progress(ProgressAction::AddTask, "parse csv", None)
        .unwrap();
    agent.save().unwrap();
    let id = agent.session().id().to_string();

    let store = SessionStore::open(temp.path()).unwrap();
    let resumed = Agent::resume(store, SavePolicy::EveryTurn, 20, &id).unwrap();

    // Entries recorded after the first turn completed
    let later: Vec<u32> = resumed
        .session()
        .history()
        .entries_since(1)
        .map(|e| e.turn)
        .collect();
    assert_eq!(later, vec![2]);
}
