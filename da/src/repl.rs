//! Interactive REPL for the development conversation

use std::path::PathBuf;

use colored::Colorize;
use eyre::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use sessionstore::{Role, SessionError};
use tracing::debug;

use crate::agent::Agent;
use crate::collab::ProgressAction;

/// Interactive conversation session
pub struct Repl {
    agent: Agent,
}

impl Repl {
    pub fn new(agent: Agent) -> Self {
        Self { agent }
    }

    /// Run the REPL main loop
    ///
    /// An initial requirement, when given, is processed before the first
    /// prompt. The session is saved on exit regardless of save policy.
    pub fn run(&mut self, initial_requirement: Option<&str>) -> Result<()> {
        self.print_welcome();

        if let Some(requirement) = initial_requirement {
            println!("{} {}", ">".bright_green(), requirement);
            self.process_user_input(requirement);
        }

        let mut rl = DefaultEditor::new().map_err(|e| eyre::eyre!("Failed to initialize readline: {}", e))?;

        loop {
            let readline = rl.readline(&format!("{} ", ">".bright_green()));

            match readline {
                Ok(line) => {
                    let input = line.trim();
                    if input.is_empty() {
                        continue;
                    }

                    let _ = rl.add_history_entry(input);

                    if input.starts_with('/') {
                        match self.handle_slash_command(input) {
                            SlashResult::Continue => continue,
                            SlashResult::Quit => break,
                        }
                    } else {
                        self.process_user_input(input);
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C - just show new prompt
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D - exit
                    println!();
                    break;
                }
                Err(err) => {
                    return Err(eyre::eyre!("Readline error: {}", err));
                }
            }
        }

        match self.agent.save() {
            Ok(path) => println!("Session saved to {}", path.display().to_string().dimmed()),
            Err(e) => eprintln!("{} Could not save session: {}", "!".red(), e),
        }
        println!("Goodbye!");
        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("{}", "Development Assistant".bright_cyan().bold());
        println!("Session: {}", self.agent.session().id().cyan());
        println!("Type {} for help, {} to quit", "/help".yellow(), "/quit".yellow());
        println!();
    }

    fn process_user_input(&mut self, input: &str) {
        match self.agent.handle_user_input(input) {
            Ok(reply) => {
                println!("{}", reply);
                println!();
            }
            Err(SessionError::InvalidInput(msg)) => {
                println!("{} {}", "?".yellow(), msg);
            }
            Err(e) => {
                eprintln!("{} {}", "Error:".red(), e);
            }
        }
    }

    /// Handle slash commands
    fn handle_slash_command(&mut self, input: &str) -> SlashResult {
        let parts: Vec<&str> = input.split_whitespace().collect();
        let cmd = parts.first().copied().unwrap_or("");
        debug!(%cmd, "slash command");

        match cmd {
            "/help" | "/h" => {
                self.print_help();
                SlashResult::Continue
            }
            "/quit" | "/q" | "/exit" => SlashResult::Quit,
            "/new" => {
                self.agent.start_new_conversation();
                println!("Started new session: {}", self.agent.session().id().cyan());
                SlashResult::Continue
            }
            "/summary" => {
                println!("{}", self.agent.summary());
                SlashResult::Continue
            }
            "/history" => {
                self.print_history();
                SlashResult::Continue
            }
            "/review" => {
                if let Some(path) = parts.get(1) {
                    match self.agent.review_file(&PathBuf::from(path)) {
                        Ok(report) => println!("{}", report),
                        Err(e) => eprintln!("{} {}", "Error:".red(), e),
                    }
                } else {
                    println!("Usage: {} <path>", "/review".yellow());
                }
                SlashResult::Continue
            }
            "/progress" => {
                match self.agent.track_progress(ProgressAction::ShowSummary, "", None) {
                    Ok(report) => println!("{}", report),
                    Err(e) => eprintln!("{} {}", "Error:".red(), e),
                }
                SlashResult::Continue
            }
            "/save" => {
                match self.agent.save() {
                    Ok(path) => println!("{} Saved to {}", "✓".green(), path.display()),
                    Err(e) => eprintln!("{} {}", "Error:".red(), e),
                }
                SlashResult::Continue
            }
            _ => {
                println!("{} Unknown command: {}", "?".yellow(), cmd);
                println!("Type {} for available commands", "/help".yellow());
                SlashResult::Continue
            }
        }
    }

    fn print_help(&self) {
        println!();
        println!("{}", "Available Commands:".bright_cyan());
        println!("  {:16} Show this help", "/help".yellow());
        println!("  {:16} Save session and exit", "/quit".yellow());
        println!("  {:16} Start a new session", "/new".yellow());
        println!("  {:16} Show session summary", "/summary".yellow());
        println!("  {:16} Show message history", "/history".yellow());
        println!("  {:16} Review a source file", "/review <path>".yellow());
        println!("  {:16} Show project progress", "/progress".yellow());
        println!("  {:16} Save the session now", "/save".yellow());
        println!();
        println!("Anything else is treated as conversation input.");
        println!();
    }

    fn print_history(&self) {
        let transcript = self.agent.session().transcript();
        if transcript.is_empty() {
            println!("{}", "No messages yet.".dimmed());
            return;
        }

        println!();
        println!("{}", "Message History:".bright_cyan());
        for (i, msg) in transcript.iter().enumerate() {
            let role = match msg.role {
                Role::User => "User".bright_green(),
                Role::Assistant => "Assistant".bright_blue(),
                Role::Tool => "Tool".bright_yellow(),
            };
            let preview: String = msg.content.chars().take(60).collect();
            let suffix = if msg.content.chars().count() > 60 { "..." } else { "" };
            println!("  {}. {}: {}{}", i + 1, role, preview, suffix);
        }
        println!();
    }
}

/// Result of handling a slash command
enum SlashResult {
    Continue,
    Quit,
}
