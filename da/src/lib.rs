//! devagent - conversational software development assistant
//!
//! An interactive agent that clarifies requirements, learns user
//! preferences, reviews code, and tracks project progress, with every
//! conversation persisted through [`sessionstore`].
//!
//! # Architecture
//!
//! ```text
//! da/src/
//! ├── agent.rs      # Conversation orchestration over a Session
//! ├── collab/       # Collaborator traits and default implementations
//! │   ├── clarifier.rs
//! │   ├── progress.rs
//! │   └── review.rs
//! ├── repl.rs       # Interactive loop and slash commands
//! ├── scenario.rs   # Canned demo conversations
//! ├── cli.rs        # Argument parsing
//! └── config.rs     # YAML configuration
//! ```

pub mod agent;
pub mod cli;
pub mod collab;
pub mod config;
pub mod repl;
pub mod scenario;

pub use agent::Agent;
pub use collab::{
    CodeReviewer, HeuristicClarifier, HeuristicReviewer, ProgressAction, ProgressTracker,
    RequirementAnalysis, RequirementClarifier, ReviewReport,
};
pub use config::Config;
pub use repl::Repl;
