//! Command execution for the non-interactive subcommands.
//!
//! Batch diagnose declares every answer up front, so no question rule
//! ever becomes eligible and the session runs straight to its halt.

use crate::errors::{EXIT_SUCCESS, EXIT_UNKNOWN_ISSUE};
use anyhow::{Context, Result};
use chrono::Utc;
use owo_colors::OwoColorize;
use techbot_common::{Answer, DiagnosisReport, KnowledgeBase, Session, Symptom};
use tracing::info;

/// Run one pre-populated session and assemble its report.
pub fn batch_report(
    answers: &[(Symptom, Answer)],
    knowledge: &KnowledgeBase,
) -> DiagnosisReport {
    let started_at = Utc::now();
    let mut session = Session::new();
    for (symptom, answer) in answers {
        session.declare(*symptom, *answer);
    }
    // All facts are in place; the session halts without suspending.
    let outcome = session.run_with(&mut |symptom: Symptom| {
        // Unreachable with all 12 answers declared; a partial answer set
        // still terminates because unasked symptoms default to no.
        info!(symptom = %symptom, "undeclared symptom defaulted to no");
        Answer::No
    });
    DiagnosisReport::new(&session, &outcome, knowledge, started_at)
}

/// `diagnose` subcommand: print the report, human or JSON.
pub fn diagnose(
    answers: &[(Symptom, Answer)],
    knowledge: &KnowledgeBase,
    json: bool,
    color: bool,
) -> Result<i32> {
    let report = batch_report(answers, knowledge);
    if json {
        println!("{}", report.to_json().context("serializing report")?);
    } else if color {
        println!("{}", report.render_colored());
    } else {
        println!("{}", report.render_plain());
    }
    Ok(EXIT_SUCCESS)
}

/// `issues` subcommand: list every issue the advisor can diagnose.
pub fn issues(knowledge: &KnowledgeBase, json: bool, color: bool) -> Result<i32> {
    if json {
        let names = knowledge.issue_names();
        println!(
            "{}",
            serde_json::to_string_pretty(names).context("serializing issue list")?
        );
        return Ok(EXIT_SUCCESS);
    }

    if color {
        println!("{}", "Known issues:".bright_cyan().bold());
    } else {
        println!("Known issues:");
    }
    for name in knowledge.issue_names() {
        println!("  - {}", name);
    }
    Ok(EXIT_SUCCESS)
}

/// `explain` subcommand: description + solution for one issue.
pub fn explain(knowledge: &KnowledgeBase, issue: &str, color: bool) -> Result<i32> {
    let Some(record) = knowledge.lookup(issue) else {
        eprintln!("Unknown issue: {issue}");
        eprintln!("Run `techbotctl issues` to list known issue names.");
        return Ok(EXIT_UNKNOWN_ISSUE);
    };

    if color {
        println!("{}", record.name.bright_white().bold());
        println!();
        println!("{}", "Description:".bright_cyan());
        println!("{}", record.description);
        println!();
        println!("{}", "Solution:".bright_cyan());
        println!("{}", record.solution);
    } else {
        println!("{}", record.name);
        println!();
        println!("Description:");
        println!("{}", record.description);
        println!();
        println!("Solution:");
        println!("{}", record.solution);
    }
    Ok(EXIT_SUCCESS)
}
