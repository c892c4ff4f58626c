//! Decision Simulator - Exhaustive sweep of the diagnostic rule catalog
//!
//! Usage:
//!   decision_sim
//!   decision_sim --output ./artifacts/simulations
//!
//! Runs one batch session per point of the full 2^12 observation grid,
//! checks the engine invariants (exactly one halt, bounded firings, no
//! question ever asked in batch mode, powers_on=no always lands on
//! "No Power"), and writes a machine-readable JSON report.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use techbot_common::{Answer, EngineState, Outcome, Session, Symptom};

/// Batch sessions fire at most diagnose + report (or fallback alone).
const MAX_BATCH_FIRINGS: usize = 2;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GridReport {
    grid_size: usize,
    sessions_run: usize,
    halt_violations: usize,
    firing_bound_violations: usize,
    questions_asked: usize,
    no_power_violations: usize,
    max_firings_seen: usize,
    diagnosis_counts: BTreeMap<String, usize>,
    fallback_count: usize,
    success: bool,
    notes: String,
}

/// Map grid point bits onto answers: bit i set means Symptom::ALL[i] = yes.
fn declare_grid_point(session: &mut Session, mask: u16) {
    for (i, symptom) in Symptom::ALL.iter().enumerate() {
        let answer = if mask & (1 << i) != 0 {
            Answer::Yes
        } else {
            Answer::No
        };
        session.declare(*symptom, answer);
    }
}

fn sweep() -> GridReport {
    let grid_size = 1usize << Symptom::ALL.len();
    let mut halt_violations = 0;
    let mut firing_bound_violations = 0;
    let mut questions_asked = 0;
    let mut no_power_violations = 0;
    let mut max_firings_seen = 0;
    let mut diagnosis_counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut fallback_count = 0;

    let mut session = Session::new();
    for mask in 0..grid_size as u16 {
        declare_grid_point(&mut session, mask);

        // Every answer is declared, so the session must halt without
        // ever suspending on a question.
        loop {
            match session.step().clone() {
                EngineState::AwaitingAnswer(_) => {
                    questions_asked += 1;
                    session.resume(Answer::No);
                }
                EngineState::Halted(_) => break,
                EngineState::Running => continue,
            }
        }

        let firings = session.firing_count();
        max_firings_seen = max_firings_seen.max(firings);
        if firings > MAX_BATCH_FIRINGS {
            firing_bound_violations += 1;
        }

        match session.state() {
            EngineState::Halted(Outcome::Diagnosed { issue }) => {
                *diagnosis_counts.entry(issue.clone()).or_insert(0) += 1;
                // powers_on = no is unconditional: nothing may outrank it.
                if mask & 1 == 0 && issue != "No Power" {
                    no_power_violations += 1;
                }
            }
            EngineState::Halted(Outcome::NoDiagnosis) => {
                fallback_count += 1;
            }
            _ => halt_violations += 1,
        }

        session.reset();
    }

    let diagnosed: usize = diagnosis_counts.values().sum();
    let success = halt_violations == 0
        && firing_bound_violations == 0
        && questions_asked == 0
        && no_power_violations == 0
        && diagnosed + fallback_count == grid_size;

    GridReport {
        grid_size,
        sessions_run: grid_size,
        halt_violations,
        firing_bound_violations,
        questions_asked,
        no_power_violations,
        max_firings_seen,
        diagnosis_counts,
        fallback_count,
        success,
        notes: if success {
            "Every grid point halted exactly once within the firing bound.".to_string()
        } else {
            "Invariant violations found; see counters.".to_string()
        },
    }
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mut output_dir = PathBuf::from("./artifacts/simulations");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--output" => {
                if i + 1 < args.len() {
                    output_dir = PathBuf::from(&args[i + 1]);
                    i += 2;
                } else {
                    eprintln!("Error: --output requires a value");
                    std::process::exit(1);
                }
            }
            "--help" | "-h" => {
                println!("Decision Simulator - exhaustive rule catalog sweep");
                println!();
                println!("Usage:");
                println!("  decision_sim [--output <dir>]");
                println!();
                println!("Options:");
                println!("  --output <dir>  Report directory (default: ./artifacts/simulations)");
                std::process::exit(0);
            }
            _ => {
                eprintln!("Error: Unknown argument: {}", args[i]);
                eprintln!("Run with --help for usage");
                std::process::exit(1);
            }
        }
    }

    let report = sweep();

    if let Err(err) = fs::create_dir_all(&output_dir) {
        eprintln!("Error: cannot create {}: {err}", output_dir.display());
        std::process::exit(1);
    }
    let output_file = output_dir.join("decision_grid.json");
    let json = match serde_json::to_string_pretty(&report) {
        Ok(json) => json,
        Err(err) => {
            eprintln!("Error: cannot serialize report: {err}");
            std::process::exit(1);
        }
    };
    if let Err(err) = fs::write(&output_file, json) {
        eprintln!("Error: cannot write {}: {err}", output_file.display());
        std::process::exit(1);
    }

    println!("\n=== Decision Grid Sweep ===\n");
    println!("Grid points:          {}", report.grid_size);
    println!("Sessions run:         {}", report.sessions_run);
    println!("Max firings seen:     {}", report.max_firings_seen);
    println!("Questions asked:      {}", report.questions_asked);
    println!("Fallback outcomes:    {}", report.fallback_count);
    println!("Halt violations:      {}", report.halt_violations);
    println!("No-power violations:  {}", report.no_power_violations);
    println!("\nDiagnosis distribution:");
    for (issue, count) in &report.diagnosis_counts {
        println!("  {:>5}  {}", count, issue);
    }

    println!("\nNotes: {}", report.notes);
    println!("\nReport saved to: {}\n", output_file.display());

    if report.success {
        std::process::exit(0);
    } else {
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sweep_holds_every_invariant() {
        let report = sweep();
        assert!(report.success, "notes: {}", report.notes);
        assert_eq!(report.grid_size, 4096);
        // Half the grid has powers_on = no.
        assert_eq!(report.diagnosis_counts["No Power"], 2048);
    }
}
