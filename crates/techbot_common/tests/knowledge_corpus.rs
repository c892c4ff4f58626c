//! On-disk knowledge corpus loading.
//!
//! Builds corpus directories in the classic layout (issues.txt plus
//! per-issue description and solution files named by slug) and checks
//! the load and degradation paths.

use std::fs;
use std::path::Path;
use techbot_common::{
    slug, KnowledgeBase, TechbotError, MISSING_DESCRIPTION, MISSING_SOLUTION,
};

fn write_issue(dir: &Path, name: &str, description: Option<&str>, solution: Option<&str>) {
    let stem = slug(name);
    if let Some(text) = description {
        let sub = dir.join("issue descriptions");
        fs::create_dir_all(&sub).unwrap();
        fs::write(sub.join(format!("{stem}.txt")), text).unwrap();
    }
    if let Some(text) = solution {
        let sub = dir.join("issue solutions");
        fs::create_dir_all(&sub).unwrap();
        fs::write(sub.join(format!("{stem}.txt")), text).unwrap();
    }
}

#[test]
fn loads_a_complete_corpus() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("issues.txt"),
        "No Power\nBlue Screen of Death (BSOD)\n",
    )
    .unwrap();
    write_issue(dir.path(), "No Power", Some("Dead machine."), Some("Check the cable."));
    write_issue(
        dir.path(),
        "Blue Screen of Death (BSOD)",
        Some("Stop code on blue."),
        Some("Note the code.\n"),
    );

    let kb = KnowledgeBase::load_dir(dir.path()).unwrap();
    assert_eq!(kb.len(), 2);
    assert_eq!(
        kb.issue_names(),
        &["No Power".to_string(), "Blue Screen of Death (BSOD)".to_string()]
    );
    assert_eq!(kb.description_for("No Power"), "Dead machine.");
    // File content is trimmed on load.
    assert_eq!(kb.solution_for("Blue Screen of Death (BSOD)"), "Note the code.");
}

#[test]
fn missing_text_files_degrade_to_placeholders() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("issues.txt"), "No Power\nOverheating\n").unwrap();
    write_issue(dir.path(), "No Power", Some("Dead machine."), None);

    let kb = KnowledgeBase::load_dir(dir.path()).unwrap();
    assert_eq!(kb.description_for("No Power"), "Dead machine.");
    assert_eq!(kb.solution_for("No Power"), MISSING_SOLUTION);
    assert_eq!(kb.description_for("Overheating"), MISSING_DESCRIPTION);
    assert_eq!(kb.solution_for("Overheating"), MISSING_SOLUTION);
    // The record still exists; only its texts are placeholders.
    assert!(kb.lookup("Overheating").is_some());
}

#[test]
fn unreadable_index_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = KnowledgeBase::load_dir(dir.path()).unwrap_err();
    assert!(matches!(err, TechbotError::CorpusUnreadable { .. }));
}

#[test]
fn empty_index_loads_an_empty_corpus() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("issues.txt"), "\n\n").unwrap();
    let kb = KnowledgeBase::load_dir(dir.path()).unwrap();
    assert!(kb.is_empty());
    assert_eq!(kb.description_for("No Power"), MISSING_DESCRIPTION);
}

#[test]
fn index_order_is_listing_order() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("issues.txt"), "Overheating\nNo Power\n").unwrap();
    let kb = KnowledgeBase::load_dir(dir.path()).unwrap();
    assert_eq!(
        kb.issue_names(),
        &["Overheating".to_string(), "No Power".to_string()]
    );
}
