use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;

use sessionstore::SessionStore;
use sessionstore::cli::Cli;
use sessionstore::config::Config;

fn setup_logging() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    setup_logging().context("Failed to setup logging")?;

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!("sessionstore starting");

    match cli.command {
        sessionstore::cli::Command::List => {
            let store = SessionStore::open(&config.store_path)?;
            let summaries = store.summaries()?;
            if summaries.is_empty() {
                println!("No sessions found");
            } else {
                for s in summaries {
                    println!(
                        "{} created {} turns {} steps {}",
                        s.session_id.cyan(),
                        s.created_at.format("%Y-%m-%d %H:%M:%S").to_string().dimmed(),
                        s.conversation_turns.to_string().yellow(),
                        s.steps.to_string().yellow(),
                    );
                }
            }
        }
        sessionstore::cli::Command::Summary { session_id } => {
            let store = SessionStore::open(&config.store_path)?;
            let session = store.load(&session_id)?;
            println!("{}", session.summary());
        }
        sessionstore::cli::Command::Show { session_id } => {
            let store = SessionStore::open(&config.store_path)?;
            let session = store.load(&session_id)?;
            let record = serde_json::to_string_pretty(&session.snapshot())?;
            println!("{}", record);
        }
        sessionstore::cli::Command::Delete { session_id } => {
            let store = SessionStore::open(&config.store_path)?;
            store.delete(&session_id)?;
            println!("{} Deleted session: {}", "✓".green(), session_id);
        }
    }

    Ok(())
}
