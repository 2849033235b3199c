use std::fs;
use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use eyre::{Context, Result};
use tracing::info;

use devagent::agent::Agent;
use devagent::cli::Cli;
use devagent::config::Config;
use devagent::repl::Repl;
use devagent::scenario;
use sessionstore::SessionStore;

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("devagent")
        .join("logs");
    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // CLI --log-level wins over the config file; INFO otherwise
    let level = match cli_log_level.or(config_log_level).map(str::to_uppercase).as_deref() {
        Some("TRACE") => tracing::Level::TRACE,
        Some("DEBUG") => tracing::Level::DEBUG,
        Some("WARN") | Some("WARNING") => tracing::Level::WARN,
        Some("ERROR") => tracing::Level::ERROR,
        Some("INFO") | None => tracing::Level::INFO,
        Some(other) => {
            eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", other);
            tracing::Level::INFO
        }
    };

    let log_file = fs::File::create(log_dir.join("devagent.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    setup_logging(cli.log_level.as_deref(), config.log_level.as_deref()).context("Failed to setup logging")?;

    info!(store_path = %config.store_path.display(), "devagent starting");

    if cli.list {
        return cmd_list(&config);
    }

    let store = SessionStore::open(&config.store_path).context("Failed to open session store")?;

    if cli.demo {
        let agent = Agent::new(store, config.save_policy, config.max_conversation_turns, None);
        return scenario::run_demo(agent);
    }

    let agent = match cli.load.as_deref() {
        Some(session_id) => Agent::resume(store, config.save_policy, config.max_conversation_turns, session_id)
            .context(format!("Failed to resume session '{}'", session_id))?,
        None => Agent::new(store, config.save_policy, config.max_conversation_turns, None),
    };

    Repl::new(agent).run(cli.prompt.as_deref())
}

/// List persisted sessions, newest first
fn cmd_list(config: &Config) -> Result<()> {
    let store = SessionStore::open(&config.store_path).context("Failed to open session store")?;
    let summaries = store.summaries()?;

    if summaries.is_empty() {
        println!("No sessions found in {}", config.store_path.display());
        return Ok(());
    }

    for s in summaries {
        println!(
            "{}  {}  turns: {}  steps: {}",
            s.session_id.cyan(),
            s.created_at.format("%Y-%m-%d %H:%M:%S").to_string().dimmed(),
            s.conversation_turns,
            s.steps
        );
    }
    Ok(())
}
