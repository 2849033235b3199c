//! Progress-tracking collaborator
//!
//! Milestones and tasks for the development conversation. Every operation is
//! an opaque named action from the session core's point of view - the agent
//! records each invocation and its rendered result in the history log.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// The named progress operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressAction {
    CreateMilestone,
    AddTask,
    CompleteTask,
    ListMilestones,
    ShowSummary,
}

impl std::fmt::Display for ProgressAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::CreateMilestone => "create_milestone",
            Self::AddTask => "add_task",
            Self::CompleteTask => "complete_task",
            Self::ListMilestones => "list_milestones",
            Self::ShowSummary => "show_summary",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum TaskStatus {
    Todo,
    Completed,
}

#[derive(Debug, Clone)]
struct Task {
    name: String,
    milestone: Option<String>,
    status: TaskStatus,
}

#[derive(Debug, Clone)]
struct Milestone {
    name: String,
    description: String,
    /// Percentage of associated tasks completed
    progress: u8,
}

/// In-memory project progress state for one conversation
#[derive(Debug, Clone, Default)]
pub struct ProgressTracker {
    milestones: Vec<Milestone>,
    tasks: Vec<Task>,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a milestone; duplicate names are allowed and listed in order
    pub fn create_milestone(&mut self, name: &str, description: &str) -> String {
        debug!(%name, "milestone created");
        self.milestones.push(Milestone {
            name: name.to_string(),
            description: description.to_string(),
            progress: 0,
        });
        format!("Created milestone: {}", name)
    }

    /// Add a task, optionally attached to a milestone
    pub fn add_task(&mut self, name: &str, milestone: Option<&str>) -> String {
        debug!(%name, ?milestone, "task added");
        self.tasks.push(Task {
            name: name.to_string(),
            milestone: milestone.map(str::to_string),
            status: TaskStatus::Todo,
        });
        format!(
            "Added task: {} (milestone: {})",
            name,
            milestone.unwrap_or("none")
        )
    }

    /// Complete the first matching task; recomputes milestone progress
    pub fn complete_task(&mut self, name: &str) -> String {
        let Some(task) = self.tasks.iter_mut().find(|t| t.name == name) else {
            return format!("No such task: {}", name);
        };
        task.status = TaskStatus::Completed;
        debug!(%name, "task completed");
        self.recompute_progress();
        format!("Completed task: {}", name)
    }

    fn recompute_progress(&mut self) {
        for milestone in &mut self.milestones {
            let attached: Vec<&Task> = self
                .tasks
                .iter()
                .filter(|t| t.milestone.as_deref() == Some(milestone.name.as_str()))
                .collect();
            if attached.is_empty() {
                continue;
            }
            let completed = attached.iter().filter(|t| t.status == TaskStatus::Completed).count();
            milestone.progress = ((completed * 100) / attached.len()) as u8;
        }
    }

    /// Render all milestones with their progress
    pub fn list_milestones(&self) -> String {
        if self.milestones.is_empty() {
            return "No milestones yet; create one with create_milestone".to_string();
        }
        let mut lines = vec![format!("Milestones ({}):", self.milestones.len())];
        for m in &self.milestones {
            lines.push(format!("  {} ({}%) - {}", m.name, m.progress, m.description));
        }
        lines.join("\n")
    }

    /// Render an overall progress summary
    pub fn show_summary(&self) -> String {
        let completed = self.tasks.iter().filter(|t| t.status == TaskStatus::Completed).count();
        let overall = if self.milestones.is_empty() {
            0
        } else {
            self.milestones.iter().map(|m| m.progress as usize).sum::<usize>() / self.milestones.len()
        };
        format!(
            "Overall progress: {}% | milestones: {} | tasks: {}/{} completed",
            overall,
            self.milestones.len(),
            completed,
            self.tasks.len()
        )
    }
}
