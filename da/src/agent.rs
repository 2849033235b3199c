//! Agent - orchestrates one development conversation
//!
//! The agent owns a Session, a SessionStore handle, and the collaborators.
//! Collaborator results are validated for shape BEFORE any session state is
//! touched, so a bad response leaves the session exactly as it was.

use std::fs;
use std::path::PathBuf;

use tracing::{debug, info, warn};

use sessionstore::{
    KeywordExtractor, PreferenceExtractor, Role, SavePolicy, Session, SessionResult, SessionStore,
};

use crate::collab::{
    CodeReviewer, HeuristicClarifier, HeuristicReviewer, ProgressAction, ProgressTracker,
    RequirementAnalysis, RequirementClarifier, ReviewReport,
};

/// Action names recorded in the history log
const ACTION_CLARIFY: &str = "requirement_clarifier";
const ACTION_REVIEW: &str = "code_reviewer";
const ACTION_PROGRESS: &str = "project_progress_tracker";

/// A conversational development assistant bound to one session
pub struct Agent {
    session: Session,
    store: SessionStore,
    save_policy: SavePolicy,
    max_turns: u32,
    clarifier: Box<dyn RequirementClarifier>,
    reviewer: Box<dyn CodeReviewer>,
    extractor: Box<dyn PreferenceExtractor>,
    progress: ProgressTracker,
    pending_clarifications: Vec<String>,
}

impl Agent {
    /// Start a fresh conversation with the default collaborators
    pub fn new(store: SessionStore, save_policy: SavePolicy, max_turns: u32, seed: Option<&str>) -> Self {
        Self {
            session: Session::create(seed),
            store,
            save_policy,
            max_turns,
            clarifier: Box::new(HeuristicClarifier),
            reviewer: Box::new(HeuristicReviewer),
            extractor: Box::new(KeywordExtractor),
            progress: ProgressTracker::new(),
            pending_clarifications: Vec::new(),
        }
    }

    /// Resume a persisted conversation by session id
    pub fn resume(
        store: SessionStore,
        save_policy: SavePolicy,
        max_turns: u32,
        session_id: &str,
    ) -> SessionResult<Self> {
        let session = store.load(session_id)?;
        Ok(Self {
            session,
            store,
            save_policy,
            max_turns,
            clarifier: Box::new(HeuristicClarifier),
            reviewer: Box::new(HeuristicReviewer),
            extractor: Box::new(KeywordExtractor),
            progress: ProgressTracker::new(),
            pending_clarifications: Vec::new(),
        })
    }

    /// Swap in a different requirement clarifier
    pub fn with_clarifier(mut self, clarifier: Box<dyn RequirementClarifier>) -> Self {
        self.clarifier = clarifier;
        self
    }

    /// Swap in a different code reviewer
    pub fn with_reviewer(mut self, reviewer: Box<dyn CodeReviewer>) -> Self {
        self.reviewer = reviewer;
        self
    }

    /// Swap in a different preference extractor
    pub fn with_extractor(mut self, extractor: Box<dyn PreferenceExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    /// Read access to the underlying session
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Questions asked of the user that have not been answered yet
    pub fn pending_clarifications(&self) -> &[String] {
        &self.pending_clarifications
    }

    /// Drop the current session and start over with a fresh one
    pub fn start_new_conversation(&mut self) {
        info!(previous = %self.session.id(), "starting new conversation");
        self.session = Session::create(None);
        self.progress = ProgressTracker::new();
        self.pending_clarifications.clear();
    }

    /// One full user-assistant exchange
    ///
    /// Records the user message, folds in stated preferences, runs the
    /// clarifier on the first requirement of the conversation, composes a
    /// reply, advances the turn, and saves per policy.
    pub fn handle_user_input(&mut self, input: &str) -> SessionResult<String> {
        if self.session.turn() >= self.max_turns {
            warn!(turn = self.session.turn(), "conversation turn limit reached");
            return Ok(format!(
                "This conversation reached its limit of {} turns. Start a new one with /new.",
                self.max_turns
            ));
        }

        // Extract before mutating anything so a blank input changes nothing
        let delta = self.session.observe_preferences(self.extractor.as_ref(), input)?;
        self.session.record_message(Role::User, input);

        let mut reply = if self.session.context().is_empty() {
            self.clarify_requirement(input)?
        } else {
            self.acknowledge(input)
        };

        if !delta.is_empty() {
            let noted: Vec<String> = delta.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
            reply.push_str(&format!("\n\nNoted your preferences: {}.", noted.join(", ")));
        }

        self.session.record_message(Role::Assistant, reply.clone());
        self.session.advance_turn();
        self.autosave_after_turn()?;

        debug!(turn = self.session.turn(), "exchange completed");
        Ok(reply)
    }

    /// First requirement of a conversation: clarify, then seed the context
    fn clarify_requirement(&mut self, input: &str) -> SessionResult<String> {
        let raw = self.clarifier.clarify(input)?;
        // Shape check first; only a valid response may touch the session
        let analysis = RequirementAnalysis::from_value(&raw)?;

        self.session
            .record_tool_invocation(ACTION_CLARIFY, input, &raw.to_string());
        self.session.merge_context([
            (
                "technical_direction".to_string(),
                serde_json::json!(analysis.technical_direction),
            ),
            (
                "functional_domains".to_string(),
                serde_json::json!(analysis.functional_domains),
            ),
            (
                "complexity_estimate".to_string(),
                serde_json::json!(analysis.complexity_estimate),
            ),
        ]);
        self.autosave_after_step()?;

        let mut lines = vec![format!(
            "I read this as a {} {} project.",
            analysis.complexity_estimate, analysis.technical_direction
        )];
        if !analysis.clarifying_questions.is_empty() {
            lines.push("Before we start, a few questions:".to_string());
            for (i, q) in analysis.clarifying_questions.iter().enumerate() {
                lines.push(format!("  {}. {}", i + 1, q));
            }
        }
        self.pending_clarifications = analysis.clarifying_questions;
        Ok(lines.join("\n"))
    }

    /// Follow-up turns once the context is established
    ///
    /// A follow-up answers whatever questions were outstanding.
    fn acknowledge(&mut self, input: &str) -> String {
        if !self.pending_clarifications.is_empty() {
            debug!(answered = self.pending_clarifications.len(), "clarifications resolved");
            self.pending_clarifications.clear();
        }
        let direction = self
            .session
            .context()
            .get("technical_direction")
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_else(|| "general".to_string());
        debug!(%direction, len = input.len(), "follow-up acknowledged");
        format!(
            "Got it. I've added that to the {} project plan. {}",
            direction,
            self.progress.show_summary()
        )
    }

    /// Review a file on disk and record the findings
    pub fn review_file(&mut self, path: &PathBuf) -> SessionResult<String> {
        let contents = fs::read_to_string(path)?;
        let raw = self.reviewer.review(&contents)?;
        let report = ReviewReport::from_value(&raw)?;

        self.session
            .record_tool_invocation(ACTION_REVIEW, &path.display().to_string(), &raw.to_string());
        self.autosave_after_step()?;

        let mut lines = vec![format!(
            "Reviewed {}: {} issues, {} suggestions.",
            path.display(),
            report.issues.len(),
            report.suggestions.len()
        )];
        for issue in &report.issues {
            lines.push(format!("  ! {}", issue));
        }
        for suggestion in &report.suggestions {
            lines.push(format!("  - {}", suggestion));
        }
        Ok(lines.join("\n"))
    }

    /// Run a progress-tracker operation and record it
    pub fn track_progress(&mut self, action: ProgressAction, name: &str, detail: Option<&str>) -> SessionResult<String> {
        let result = match action {
            ProgressAction::CreateMilestone => self.progress.create_milestone(name, detail.unwrap_or_default()),
            ProgressAction::AddTask => self.progress.add_task(name, detail),
            ProgressAction::CompleteTask => self.progress.complete_task(name),
            ProgressAction::ListMilestones => self.progress.list_milestones(),
            ProgressAction::ShowSummary => self.progress.show_summary(),
        };

        self.session
            .record_tool_invocation(ACTION_PROGRESS, &action.to_string(), &result);
        self.autosave_after_step()?;
        Ok(result)
    }

    /// Persist the session now, regardless of policy
    pub fn save(&self) -> SessionResult<PathBuf> {
        self.store.save(&self.session)
    }

    fn autosave_after_turn(&self) -> SessionResult<()> {
        if self.save_policy.save_after_turn() {
            self.store.save(&self.session)?;
        }
        Ok(())
    }

    fn autosave_after_step(&self) -> SessionResult<()> {
        if self.save_policy.save_after_step(self.session.step()) {
            self.store.save(&self.session)?;
        }
        Ok(())
    }

    /// Human-readable state summary
    pub fn summary(&self) -> String {
        let mut summary = self.session.summary();
        if !self.pending_clarifications.is_empty() {
            summary.push_str(&format!(
                "\nPending questions: {}",
                self.pending_clarifications.len()
            ));
        }
        summary
    }
}
