//! Session report: what was answered, what fired, what it means (v0.4.0).
//!
//! One serializable record per completed session. Front ends render it
//! plain or colored; `--json` emits it verbatim.

use crate::engine::{Outcome, Session};
use crate::facts::{Answer, Symptom};
use crate::knowledge::KnowledgeBase;
use chrono::{DateTime, Utc};
use owo_colors::OwoColorize;
use serde::{Deserialize, Serialize};

/// Bump when the report layout changes shape.
pub const REPORT_SCHEMA_VERSION: u32 = 1;

/// Shown for the no-diagnosis outcome.
pub const FALLBACK_MESSAGE: &str = "Couldn't pin it down exactly. Try refining your answers.";

/// One declared observation, in question order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportedAnswer {
    pub symptom: Symptom,
    pub answer: Answer,
}

/// Machine-readable record of one completed session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosisReport {
    pub schema_version: u32,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub outcome: Outcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solution: Option<String>,
    pub answers: Vec<ReportedAnswer>,
    pub rules_fired: Vec<String>,
}

impl DiagnosisReport {
    /// Assemble the report for a session that reached `outcome`.
    /// Knowledge lookups degrade to placeholders, never fail.
    pub fn new(
        session: &Session,
        outcome: &Outcome,
        knowledge: &KnowledgeBase,
        started_at: DateTime<Utc>,
    ) -> Self {
        let (issue, description, solution) = match outcome {
            Outcome::Diagnosed { issue } => (
                Some(issue.clone()),
                Some(knowledge.description_for(issue).to_string()),
                Some(knowledge.solution_for(issue).to_string()),
            ),
            _ => (None, None, None),
        };

        let answers = session
            .memory()
            .declared_answers()
            .into_iter()
            .map(|(symptom, answer)| ReportedAnswer { symptom, answer })
            .collect();

        Self {
            schema_version: REPORT_SCHEMA_VERSION,
            started_at,
            completed_at: Utc::now(),
            outcome: outcome.clone(),
            issue,
            description,
            solution,
            answers,
            rules_fired: session.firings().to_vec(),
        }
    }

    /// Pretty-printed JSON for `--json` front ends.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Plain-text rendering, no color codes.
    pub fn render_plain(&self) -> String {
        let mut lines = Vec::new();
        match &self.issue {
            Some(issue) => {
                lines.push(format!("Most probable issue: {}", issue));
                lines.push(String::new());
                lines.push("Description:".to_string());
                lines.push(self.description.clone().unwrap_or_default());
                lines.push(String::new());
                lines.push("Solution:".to_string());
                lines.push(self.solution.clone().unwrap_or_default());
            }
            None => match self.outcome {
                Outcome::NoApplicableRule => {
                    lines.push("Session ended with no applicable rule.".to_string());
                }
                _ => lines.push(FALLBACK_MESSAGE.to_string()),
            },
        }
        lines.push(String::new());
        lines.push(self.footer());
        lines.join("\n")
    }

    /// Colored rendering for interactive terminals.
    pub fn render_colored(&self) -> String {
        let mut lines = Vec::new();
        match &self.issue {
            Some(issue) => {
                lines.push(format!(
                    "{} Most probable issue: {}",
                    "+".bright_green().bold(),
                    issue.bright_white().bold()
                ));
                lines.push(String::new());
                lines.push(format!("{}", "Description:".bright_cyan()));
                lines.push(self.description.clone().unwrap_or_default());
                lines.push(String::new());
                lines.push(format!("{}", "Solution:".bright_cyan()));
                lines.push(self.solution.clone().unwrap_or_default());
            }
            None => match self.outcome {
                Outcome::NoApplicableRule => lines.push(format!(
                    "{} Session ended with no applicable rule.",
                    "!".bright_red().bold()
                )),
                _ => lines.push(format!("{} {}", "~".bright_yellow().bold(), FALLBACK_MESSAGE)),
            },
        }
        lines.push(String::new());
        lines.push(format!("{}", self.footer().dimmed()));
        lines.join("\n")
    }

    fn footer(&self) -> String {
        format!(
            "{} rules fired, {} answers recorded",
            self.rules_fired.len(),
            self.answers.len()
        )
    }
}
