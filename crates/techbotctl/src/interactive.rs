//! Interactive diagnostic session.
//!
//! Drives the engine from the terminal: the engine suspends on each
//! question, we print the prompt, read y/n, and resume. Any answer
//! other than an explicit yes counts as no.

use crate::errors::EXIT_SUCCESS;
use anyhow::Result;
use chrono::Utc;
use owo_colors::OwoColorize;
use std::io::{self, BufRead, Write};
use techbot_common::{Answer, DiagnosisReport, EngineState, KnowledgeBase, Session};

/// Run interactive sessions until the user declines another round.
pub fn run(knowledge: &KnowledgeBase, color: bool, banner: bool) -> Result<i32> {
    if banner {
        print_banner(color);
    }

    let mut session = Session::new();
    loop {
        let started_at = Utc::now();
        loop {
            match session.run_to_suspend().clone() {
                EngineState::AwaitingAnswer(symptom) => {
                    let answer = ask_yes_no(symptom.prompt(), color)?;
                    session.resume(answer);
                }
                EngineState::Halted(outcome) => {
                    let report = DiagnosisReport::new(&session, &outcome, knowledge, started_at);
                    println!();
                    if color {
                        println!("{}", report.render_colored());
                    } else {
                        println!("{}", report.render_plain());
                    }
                    break;
                }
                EngineState::Running => continue,
            }
        }

        if !confirm_continue("Troubleshoot another problem?", color)? {
            break;
        }
        session.reset();
        println!();
    }

    Ok(EXIT_SUCCESS)
}

fn print_banner(color: bool) {
    println!();
    if color {
        println!(
            "{}  {}",
            "*".bright_cyan().bold(),
            "TechBot diagnostic advisor".bright_white().bold()
        );
        println!(
            "   {}",
            "Answer y/n; anything else counts as no.".dimmed()
        );
    } else {
        println!("*  TechBot diagnostic advisor");
        println!("   Answer y/n; anything else counts as no.");
    }
    println!();
}

/// One question, one line of input. Never loops: the coercion contract
/// says every non-affirmative answer is a no.
fn ask_yes_no(prompt: &str, color: bool) -> io::Result<Answer> {
    if color {
        print!("   {}  {} ", "?".bright_cyan().bold(), prompt.bright_white());
    } else {
        print!("   ?  {prompt} ");
    }
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;
    Ok(Answer::from_input(&input))
}

/// Check if the user wants another diagnostic round.
fn confirm_continue(question: &str, color: bool) -> io::Result<bool> {
    println!();
    if color {
        print!(
            "   {}  {} [y/N]: ",
            "~".yellow().bold(),
            question.bright_white()
        );
    } else {
        print!("   ~  {question} [y/N]: ");
    }
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;
    Ok(Answer::from_input(&input).is_yes())
}
