//! TechBot Control - CLI front end for the TechBot diagnostic advisor.
//!
//! Logs go to stderr so they never mix with report output.

use anyhow::Result;
use clap::Parser;
use techbot_common::KnowledgeBase;
use techbotctl::cli::{Cli, Commands};
use techbotctl::config::TechbotConfig;
use techbotctl::errors::{EXIT_CORPUS_UNREADABLE, EXIT_GENERAL_ERROR};
use techbotctl::{commands, interactive};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("TECHBOT_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            EXIT_GENERAL_ERROR
        }
    };
    std::process::exit(code);
}

fn run(cli: Cli) -> Result<i32> {
    let config = TechbotConfig::load();

    let color = !cli.no_color
        && config.color
        && console::Term::stdout().features().colors_supported();

    // Flag overrides config overrides built-in.
    let knowledge = match cli.knowledge_dir.as_deref().or(config.knowledge_dir.as_deref()) {
        Some(dir) => match KnowledgeBase::load_dir(dir) {
            Ok(knowledge) => knowledge,
            Err(err) => {
                eprintln!("Error: {err}");
                return Ok(EXIT_CORPUS_UNREADABLE);
            }
        },
        None => KnowledgeBase::builtin(),
    };

    match &cli.command {
        None => interactive::run(&knowledge, color, config.banner),
        Some(command @ Commands::Diagnose { json, .. }) => {
            commands::diagnose(&command.diagnose_answers(), &knowledge, *json, color)
        }
        Some(Commands::Issues { json }) => commands::issues(&knowledge, *json, color),
        Some(Commands::Explain { issue }) => commands::explain(&knowledge, issue, color),
    }
}
