//! CLI argument parsing for sessionstore

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ss")]
#[command(author, version, about = "Inspect and manage persisted conversation sessions", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List all persisted sessions
    List,

    /// Print a session's state summary
    Summary {
        /// Session ID
        #[arg(required = true)]
        session_id: String,
    },

    /// Dump a session's raw persisted record
    Show {
        /// Session ID
        #[arg(required = true)]
        session_id: String,
    },

    /// Delete a persisted session
    Delete {
        /// Session ID to delete
        #[arg(required = true)]
        session_id: String,
    },
}
