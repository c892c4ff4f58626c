//! CLI flow coverage: argument parsing into engine answers, batch
//! diagnosis outcomes, and JSON report schema stability.

use clap::Parser;
use techbot_common::{Answer, DiagnosisReport, KnowledgeBase, Outcome, Symptom};
use techbotctl::cli::Cli;
use techbotctl::commands::batch_report;

fn parse_answers(args: &[&str]) -> Vec<(Symptom, Answer)> {
    let mut argv = vec!["techbotctl", "diagnose"];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv).unwrap();
    cli.command.unwrap().diagnose_answers()
}

#[test]
fn default_diagnose_flags_report_no_power() {
    let answers = parse_answers(&[]);
    let report = batch_report(&answers, &KnowledgeBase::builtin());
    assert_eq!(report.issue.as_deref(), Some("No Power"));
    assert!(report.description.is_some());
    assert!(report.solution.is_some());
}

#[test]
fn flag_combinations_reach_the_expected_diagnoses() {
    let kb = KnowledgeBase::builtin();
    let cases: &[(&[&str], &str)] = &[
        (
            &["--powers-on", "yes", "--beep-codes", "yes"],
            "POST Beep Codes at Startup",
        ),
        (
            &["--powers-on", "yes", "--blue-screen", "yes", "--freezes", "yes"],
            "Blue Screen of Death (BSOD)",
        ),
        (
            &["--powers-on", "yes", "--overheating", "yes", "--noisy-fan", "yes"],
            "Overheating",
        ),
        (
            &["--powers-on", "yes", "--slow-boot", "yes"],
            "Slow Boot",
        ),
        (
            &["--powers-on", "yes", "--usb-not-recognized", "yes"],
            "USB Devices Not Recognized",
        ),
        (
            &["--powers-on", "yes", "--general-sluggish", "yes"],
            "General Sluggishness",
        ),
    ];
    for (args, expected) in cases {
        let report = batch_report(&parse_answers(args), &kb);
        assert_eq!(report.issue.as_deref(), Some(*expected), "args {args:?}");
    }
}

#[test]
fn only_powering_on_falls_back() {
    let report = batch_report(
        &parse_answers(&["--powers-on", "yes"]),
        &KnowledgeBase::builtin(),
    );
    assert_eq!(report.outcome, Outcome::NoDiagnosis);
    assert!(report.issue.is_none());
}

#[test]
fn json_report_schema_is_stable() {
    let report = batch_report(
        &parse_answers(&["--powers-on", "yes", "--no-internet", "yes"]),
        &KnowledgeBase::builtin(),
    );
    let json = report.to_json().unwrap();
    assert!(json.contains("\"schema_version\": 1"));
    assert!(json.contains("\"issue\": \"No Internet Connection\""));
    assert!(json.contains("\"rules_fired\""));
    assert!(json.contains("\"answers\""));

    let parsed: DiagnosisReport = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.issue.as_deref(), Some("No Internet Connection"));
    assert_eq!(parsed.answers.len(), 12);
}

#[test]
fn batch_report_records_every_answer() {
    let report = batch_report(&parse_answers(&[]), &KnowledgeBase::builtin());
    assert_eq!(report.answers.len(), 12);
    let symptoms: Vec<Symptom> = report.answers.iter().map(|a| a.symptom).collect();
    assert_eq!(symptoms, Symptom::ALL.to_vec());
}
