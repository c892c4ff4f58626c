//! Forward-chaining inference session (v0.4.0).
//!
//! Each cycle builds the conflict set (eligible, not-yet-fired rules),
//! fires the highest-salience rule with declaration order breaking ties,
//! and applies its action. A fired rule never fires again in the same
//! session, so a session always terminates.
//!
//! The engine does no I/O. When a question rule fires it suspends and
//! hands the symptom to the caller; the caller resumes with an answer.

use crate::facts::{Answer, Symptom, WorkingMemory};
use crate::rules::{Rule, RuleAction, RuleCatalog};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Terminal outcome of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// A diagnosis rule fired and show-result reported it.
    Diagnosed { issue: String },
    /// The diagnosis slot was still empty when the fallback rule fired.
    NoDiagnosis,
    /// The conflict set went empty with no terminal rule. Unreachable
    /// with the canonical catalog, reachable with custom ones.
    NoApplicableRule,
}

/// Where a session currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineState {
    /// Rules are still eligible to fire.
    Running,
    /// A question rule fired; the caller must resume with this answer.
    AwaitingAnswer(Symptom),
    /// Terminal. A session halts exactly once.
    Halted(Outcome),
}

/// Supplies answers when the engine suspends on a question.
pub trait AnswerProvider {
    fn answer(&mut self, symptom: Symptom) -> Answer;
}

impl<F> AnswerProvider for F
where
    F: FnMut(Symptom) -> Answer,
{
    fn answer(&mut self, symptom: Symptom) -> Answer {
        self(symptom)
    }
}

/// Scripted provider for tests and batch harnesses. Anything not
/// scripted answers no.
#[derive(Debug, Clone, Default)]
pub struct ScriptedAnswers {
    answers: HashMap<Symptom, Answer>,
}

impl ScriptedAnswers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, symptom: Symptom, answer: Answer) -> Self {
        self.answers.insert(symptom, answer);
        self
    }

    pub fn yes(self, symptom: Symptom) -> Self {
        self.with(symptom, Answer::Yes)
    }

    pub fn no(self, symptom: Symptom) -> Self {
        self.with(symptom, Answer::No)
    }
}

impl AnswerProvider for ScriptedAnswers {
    fn answer(&mut self, symptom: Symptom) -> Answer {
        self.answers.get(&symptom).copied().unwrap_or(Answer::No)
    }
}

/// One diagnostic pass over one working memory.
///
/// Sessions are single-threaded and cheap; front ends that want
/// parallelism run one session per thread.
#[derive(Debug, Clone)]
pub struct Session {
    catalog: RuleCatalog,
    memory: WorkingMemory,
    /// Refraction marks, indexed by catalog position.
    fired: Vec<bool>,
    state: EngineState,
    /// Rule ids in firing order, for reports and the simulator.
    firings: Vec<String>,
}

impl Session {
    /// New session over the canonical catalog.
    pub fn new() -> Self {
        Self::with_catalog(RuleCatalog::canonical())
    }

    /// New session over an explicit catalog.
    pub fn with_catalog(catalog: RuleCatalog) -> Self {
        let fired = vec![false; catalog.len()];
        let mut memory = WorkingMemory::new();
        memory.open_session();
        Self {
            catalog,
            memory,
            fired,
            state: EngineState::Running,
            firings: Vec::new(),
        }
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn memory(&self) -> &WorkingMemory {
        &self.memory
    }

    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    /// Rule ids fired so far, in order.
    pub fn firings(&self) -> &[String] {
        &self.firings
    }

    pub fn firing_count(&self) -> usize {
        self.firings.len()
    }

    /// Pre-declare an observation. Batch front ends snapshot every
    /// answer this way, so no question rule ever becomes eligible.
    pub fn declare(&mut self, symptom: Symptom, answer: Answer) {
        self.memory.declare(symptom, answer);
    }

    /// Rules eligible to fire right now, in declaration order.
    pub fn conflict_set(&self) -> Vec<&Rule> {
        self.eligible_indices()
            .into_iter()
            .map(|i| &self.catalog.rules()[i])
            .collect()
    }

    fn eligible_indices(&self) -> Vec<usize> {
        self.catalog
            .rules()
            .iter()
            .enumerate()
            .filter(|(i, rule)| !self.fired[*i] && rule.condition.is_satisfied(&self.memory))
            .map(|(i, _)| i)
            .collect()
    }

    /// Fire the single best eligible rule.
    ///
    /// Highest salience wins; the earliest-declared rule wins ties. Does
    /// nothing unless the session is running.
    pub fn step(&mut self) -> &EngineState {
        if !matches!(self.state, EngineState::Running) {
            return &self.state;
        }

        let eligible = self.eligible_indices();
        let winner = eligible
            .into_iter()
            .max_by_key(|&i| (self.catalog.rules()[i].salience, Reverse(i)));

        let Some(idx) = winner else {
            info!("conflict set empty, no applicable rule");
            self.state = EngineState::Halted(Outcome::NoApplicableRule);
            return &self.state;
        };

        let rule = &self.catalog.rules()[idx];
        let id = rule.id.clone();
        let salience = rule.salience;
        let action = rule.action.clone();
        self.fired[idx] = true;
        self.firings.push(id.clone());
        debug!(rule = %id, salience, "rule fired");

        match action {
            RuleAction::Ask(symptom) => {
                self.state = EngineState::AwaitingAnswer(symptom);
            }
            RuleAction::Diagnose(issue) => {
                info!(%issue, rule = %id, "diagnosis asserted");
                self.memory.declare_diagnosis(issue);
            }
            RuleAction::Report => {
                let outcome = match self.memory.diagnosis() {
                    Some(issue) => Outcome::Diagnosed {
                        issue: issue.to_string(),
                    },
                    None => Outcome::NoDiagnosis,
                };
                info!(?outcome, firings = self.firings.len(), "session halted");
                self.state = EngineState::Halted(outcome);
            }
            RuleAction::Fallback => {
                info!(firings = self.firings.len(), "session halted without a diagnosis");
                self.state = EngineState::Halted(Outcome::NoDiagnosis);
            }
        }

        &self.state
    }

    /// Declare the answer the engine is waiting on and return to running.
    ///
    /// Ignored (with a log line) when the session is not suspended;
    /// answers only arrive through a suspension.
    pub fn resume(&mut self, answer: Answer) -> &EngineState {
        match self.state {
            EngineState::AwaitingAnswer(symptom) => {
                self.memory.declare(symptom, answer);
                self.state = EngineState::Running;
            }
            _ => {
                warn!("resume called while not awaiting an answer");
            }
        }
        &self.state
    }

    /// Drive the session until it suspends on a question or halts.
    pub fn run_to_suspend(&mut self) -> &EngineState {
        while matches!(self.state, EngineState::Running) {
            self.step();
        }
        &self.state
    }

    /// Drive the session to its halt, answering questions from the
    /// provider. Returns the terminal outcome.
    pub fn run_with<P: AnswerProvider + ?Sized>(&mut self, provider: &mut P) -> Outcome {
        loop {
            let state = self.run_to_suspend().clone();
            match state {
                EngineState::AwaitingAnswer(symptom) => {
                    let answer = provider.answer(symptom);
                    debug!(symptom = %symptom, %answer, "answer supplied");
                    self.resume(answer);
                }
                EngineState::Halted(outcome) => return outcome,
                EngineState::Running => continue,
            }
        }
    }

    /// Discard all facts and refraction marks, keeping the catalog. The
    /// next run starts a fresh session over the same rules.
    pub fn reset(&mut self) {
        self.memory.clear();
        self.memory.open_session();
        for mark in &mut self.fired {
            *mark = false;
        }
        self.firings.clear();
        self.state = EngineState::Running;
        info!("session reset");
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{Condition, ConditionTest, SALIENCE_NORMAL};

    fn always_rule(id: &str, salience: i32) -> Rule {
        Rule {
            id: id.to_string(),
            salience,
            condition: Condition::all(vec![]),
            action: RuleAction::Ask(Symptom::PowersOn),
        }
    }

    #[test]
    fn higher_salience_fires_first() {
        let catalog = RuleCatalog::custom(vec![
            always_rule("low", -5),
            always_rule("high", 10),
        ]);
        let mut session = Session::with_catalog(catalog);
        session.step();
        assert_eq!(session.firings(), &["high".to_string()]);
    }

    #[test]
    fn declaration_order_breaks_ties() {
        let catalog = RuleCatalog::custom(vec![
            always_rule("first", SALIENCE_NORMAL),
            always_rule("second", SALIENCE_NORMAL),
        ]);
        let mut session = Session::with_catalog(catalog);
        session.step();
        assert_eq!(session.firings(), &["first".to_string()]);
    }

    #[test]
    fn refraction_blocks_refiring() {
        let catalog = RuleCatalog::custom(vec![always_rule("only", SALIENCE_NORMAL)]);
        let mut session = Session::with_catalog(catalog);
        session.step();
        session.resume(Answer::Yes);
        // Condition still holds, but the rule already fired.
        session.step();
        assert_eq!(session.firing_count(), 1);
        assert_eq!(
            session.state(),
            &EngineState::Halted(Outcome::NoApplicableRule)
        );
    }

    #[test]
    fn empty_conflict_set_halts_without_terminal_rule() {
        let catalog = RuleCatalog::custom(vec![Rule {
            id: "never".to_string(),
            salience: SALIENCE_NORMAL,
            condition: Condition::all(vec![ConditionTest::Is(Symptom::PowersOn, Answer::Yes)]),
            action: RuleAction::Fallback,
        }]);
        let mut session = Session::with_catalog(catalog);
        session.step();
        assert_eq!(
            session.state(),
            &EngineState::Halted(Outcome::NoApplicableRule)
        );
    }

    #[test]
    fn step_after_halt_is_inert() {
        let catalog = RuleCatalog::custom(vec![]);
        let mut session = Session::with_catalog(catalog);
        session.step();
        let halted = session.state().clone();
        session.step();
        assert_eq!(session.state(), &halted);
        assert_eq!(session.firing_count(), 0);
    }

    #[test]
    fn resume_outside_suspension_changes_nothing() {
        let mut session = Session::new();
        session.resume(Answer::Yes);
        assert_eq!(session.state(), &EngineState::Running);
        assert!(session.memory().is_empty());
    }

    #[test]
    fn scripted_answers_default_to_no() {
        let mut provider = ScriptedAnswers::new().yes(Symptom::BlueScreen);
        assert_eq!(provider.answer(Symptom::BlueScreen), Answer::Yes);
        assert_eq!(provider.answer(Symptom::Freezes), Answer::No);
    }

    #[test]
    fn closures_are_answer_providers() {
        let mut session = Session::new();
        let outcome = session.run_with(&mut |symptom: Symptom| {
            Answer::from(matches!(symptom, Symptom::PowersOn | Symptom::NoInternet))
        });
        assert_eq!(
            outcome,
            Outcome::Diagnosed {
                issue: "No Internet Connection".to_string()
            }
        );
    }
}
