//! Command line interface for the development assistant

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "da")]
#[command(about = "Conversational software development assistant")]
#[command(version)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Initial requirement to process before the first prompt
    #[arg(short, long)]
    pub prompt: Option<String>,

    /// Resume a persisted session by id
    #[arg(short, long, value_name = "SESSION_ID")]
    pub load: Option<String>,

    /// List persisted sessions and exit
    #[arg(long)]
    pub list: bool,

    /// Replay the built-in demo scenarios and exit
    #[arg(long)]
    pub demo: bool,
}
