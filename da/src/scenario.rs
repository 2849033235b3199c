//! Canned demo conversations
//!
//! Each scenario replays a short requirement exchange through a real agent,
//! so demo runs exercise the same code paths as interactive use.

use colored::Colorize;
use eyre::Result;

use crate::agent::Agent;
use crate::collab::ProgressAction;

/// A scripted requirement conversation
pub struct Scenario {
    pub name: &'static str,
    pub requirement: &'static str,
    pub follow_ups: &'static [&'static str],
}

/// The built-in demo scenarios
pub const SCENARIOS: &[Scenario] = &[
    Scenario {
        name: "blog website",
        requirement: "I want to build a simple blog website where users can register and publish articles",
        follow_ups: &["use python3.11 with flask, tested with pytest"],
    },
    Scenario {
        name: "sales data analysis",
        requirement: "I need a data analysis script that reads csv sales reports and computes statistics",
        follow_ups: &["format the code with black please"],
    },
    Scenario {
        name: "restful user api",
        requirement: "Build a restful api service for user management with login and registration endpoints",
        follow_ups: &["manage dependencies with poetry"],
    },
    Scenario {
        name: "backup automation",
        requirement: "Write a script to automate scheduled backup of my project directory",
        follow_ups: &["keep it simple, a basic cron-driven batch job"],
    },
    Scenario {
        name: "todo mobile app",
        requirement: "Something like a simple todo app for mobile, android first",
        follow_ups: &["use pep8 style throughout"],
    },
];

/// Replay every demo scenario through the agent, one session each
pub fn run_demo(mut agent: Agent) -> Result<()> {
    for (i, scenario) in SCENARIOS.iter().enumerate() {
        if i > 0 {
            agent.start_new_conversation();
        }
        println!();
        println!("{} {}", "Demo:".bright_cyan().bold(), scenario.name);
        println!("{}", "-".repeat(60).dimmed());

        run_scenario(&mut agent, scenario)?;

        println!();
        println!("{}", agent.summary().dimmed());
        agent.save()?;
    }
    Ok(())
}

fn run_scenario(agent: &mut Agent, scenario: &Scenario) -> Result<()> {
    println!("{} {}", ">".bright_green(), scenario.requirement);
    let reply = agent.handle_user_input(scenario.requirement)?;
    println!("{}", reply);

    for follow_up in scenario.follow_ups {
        println!("{} {}", ">".bright_green(), follow_up);
        let reply = agent.handle_user_input(follow_up)?;
        println!("{}", reply);
    }

    // Show the progress tracker in action
    agent.track_progress(ProgressAction::CreateMilestone, "first version", Some(scenario.name))?;
    agent.track_progress(ProgressAction::AddTask, "sketch the design", Some("first version"))?;
    agent.track_progress(ProgressAction::CompleteTask, "sketch the design", None)?;
    let summary = agent.track_progress(ProgressAction::ShowSummary, "", None)?;
    println!("{}", summary);

    Ok(())
}
