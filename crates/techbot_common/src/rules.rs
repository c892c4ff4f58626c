//! The canonical rule catalog (v0.4.0).
//!
//! One immutable table drives every front end: question rules gate on
//! the absence of an observation, diagnosis rules on observation values,
//! and two terminal rules sit below everything at negative salience.
//! Catalog order matters: it is the declaration order the engine uses to
//! break salience ties.

use crate::facts::{Answer, Symptom, WorkingMemory};
use crate::knowledge::issue_names;
use serde::Serialize;

/// Salience of every question and diagnosis rule.
pub const SALIENCE_NORMAL: i32 = 0;
/// Show-result sits below the whole catalog so it only fires once
/// every question and diagnosis has been dealt with.
pub const SALIENCE_SHOW_RESULT: i32 = -998;
/// Fallback is the floor: it fires only when nothing else can.
pub const SALIENCE_FALLBACK: i32 = -999;

/// A single test inside a rule condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionTest {
    /// The stored answer for the symptom equals the expected value.
    Is(Symptom, Answer),
    /// No answer has been declared for the symptom yet.
    Absent(Symptom),
    /// The diagnosis slot has been written.
    DiagnosisPresent,
    /// The diagnosis slot is still empty.
    DiagnosisAbsent,
}

impl ConditionTest {
    pub fn matches(&self, memory: &WorkingMemory) -> bool {
        match self {
            Self::Is(symptom, expected) => memory.get(*symptom) == Some(*expected),
            Self::Absent(symptom) => !memory.has(*symptom),
            Self::DiagnosisPresent => memory.has_diagnosis(),
            Self::DiagnosisAbsent => !memory.has_diagnosis(),
        }
    }
}

/// Conjunction of tests. The empty conjunction is always satisfied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Condition {
    tests: Vec<ConditionTest>,
}

impl Condition {
    pub fn all(tests: Vec<ConditionTest>) -> Self {
        Self { tests }
    }

    /// Satisfied only while the session is open and every test matches.
    pub fn is_satisfied(&self, memory: &WorkingMemory) -> bool {
        memory.is_open() && self.tests.iter().all(|t| t.matches(memory))
    }

    pub fn tests(&self) -> &[ConditionTest] {
        &self.tests
    }
}

/// What a rule does when it fires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleAction {
    /// Suspend the session until the caller supplies this observation.
    Ask(Symptom),
    /// Write the named issue into the diagnosis slot.
    Diagnose(String),
    /// Halt, reporting the diagnosed issue.
    Report,
    /// Halt with the could-not-pin-down outcome.
    Fallback,
}

/// A single condition to action rule.
#[derive(Debug, Clone, Serialize)]
pub struct Rule {
    pub id: String,
    pub salience: i32,
    pub condition: Condition,
    pub action: RuleAction,
}

/// Ordered, immutable rule table shared by every session.
#[derive(Debug, Clone, Serialize)]
pub struct RuleCatalog {
    rules: Vec<Rule>,
}

impl RuleCatalog {
    /// Build a catalog from an explicit rule list (simulators and tests).
    pub fn custom(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// The canonical TechBot catalog: 12 question rules, 11 diagnosis
    /// rules, then the two terminal rules.
    ///
    /// Diagnosis rules all carry the first-diagnosis-wins guard, and
    /// General Sluggishness is declared last so any sharper diagnosis
    /// eligible at the same time beats it on the declaration tie-break.
    pub fn canonical() -> Self {
        use Answer::{No, Yes};
        use ConditionTest::{Absent, DiagnosisAbsent, DiagnosisPresent, Is};
        use Symptom::*;

        let mut rules = Vec::with_capacity(25);

        for symptom in Symptom::ALL {
            rules.push(Rule {
                id: format!("ask_{}", symptom.key()),
                salience: SALIENCE_NORMAL,
                condition: Condition::all(vec![Absent(symptom)]),
                action: RuleAction::Ask(symptom),
            });
        }

        let diagnose = |id: &str, issue: &str, mut tests: Vec<ConditionTest>| {
            tests.push(DiagnosisAbsent);
            Rule {
                id: id.to_string(),
                salience: SALIENCE_NORMAL,
                condition: Condition::all(tests),
                action: RuleAction::Diagnose(issue.to_string()),
            }
        };

        rules.push(diagnose(
            "no_power",
            issue_names::NO_POWER,
            vec![Is(PowersOn, No)],
        ));
        rules.push(diagnose(
            "post_beeps",
            issue_names::POST_BEEPS,
            vec![Is(PowersOn, Yes), Is(BeepCodes, Yes)],
        ));
        rules.push(diagnose(
            "slow_boot",
            issue_names::SLOW_BOOT,
            vec![Is(PowersOn, Yes), Is(SlowBoot, Yes), Is(Overheating, No)],
        ));
        rules.push(diagnose(
            "bsod",
            issue_names::BSOD,
            vec![Is(BlueScreen, Yes)],
        ));
        rules.push(diagnose(
            "overheating",
            issue_names::OVERHEATING,
            vec![Is(Overheating, Yes), Is(NoisyFan, Yes)],
        ));
        rules.push(diagnose(
            "random_restarts",
            issue_names::RANDOM_RESTARTS,
            vec![Is(RandomRestarts, Yes), Is(Overheating, No)],
        ));
        rules.push(diagnose(
            "no_internet",
            issue_names::NO_INTERNET,
            vec![Is(NoInternet, Yes)],
        ));
        rules.push(diagnose(
            "freezes",
            issue_names::FREEZES,
            vec![Is(Freezes, Yes), Is(BlueScreen, No)],
        ));
        rules.push(diagnose(
            "disk_errors",
            issue_names::DISK_ERRORS,
            vec![Is(DiskErrors, Yes)],
        ));
        rules.push(diagnose(
            "usb_not_recognized",
            issue_names::USB_NOT_RECOGNIZED,
            vec![Is(UsbNotRecognized, Yes)],
        ));
        rules.push(diagnose(
            "general_sluggish",
            issue_names::GENERAL_SLUGGISH,
            vec![Is(GeneralSluggish, Yes)],
        ));

        rules.push(Rule {
            id: "show_result".to_string(),
            salience: SALIENCE_SHOW_RESULT,
            condition: Condition::all(vec![DiagnosisPresent]),
            action: RuleAction::Report,
        });
        rules.push(Rule {
            id: "fallback".to_string(),
            salience: SALIENCE_FALLBACK,
            condition: Condition::all(vec![DiagnosisAbsent]),
            action: RuleAction::Fallback,
        });

        Self { rules }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn find(&self, id: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleCatalog {
    fn default() -> Self {
        Self::canonical()
    }
}
