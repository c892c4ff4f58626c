//! Working memory for a diagnostic session (v0.2.0, reworked v0.4.0).
//!
//! Holds the yes/no observations collected so far plus the derived
//! diagnosis slot. One fact per key: re-declaring a key overwrites it,
//! so batch front ends can snapshot every answer up front.
//!
//! v0.4.0: session-open marker gates rule eligibility after clear().

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// The twelve yes/no observations a session can collect.
///
/// Declaration order here is also the canonical question order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Symptom {
    PowersOn,
    BeepCodes,
    SlowBoot,
    BlueScreen,
    Overheating,
    RandomRestarts,
    NoInternet,
    Freezes,
    DiskErrors,
    UsbNotRecognized,
    NoisyFan,
    GeneralSluggish,
}

impl Symptom {
    /// All observations in canonical question order.
    pub const ALL: [Symptom; 12] = [
        Symptom::PowersOn,
        Symptom::BeepCodes,
        Symptom::SlowBoot,
        Symptom::BlueScreen,
        Symptom::Overheating,
        Symptom::RandomRestarts,
        Symptom::NoInternet,
        Symptom::Freezes,
        Symptom::DiskErrors,
        Symptom::UsbNotRecognized,
        Symptom::NoisyFan,
        Symptom::GeneralSluggish,
    ];

    /// Stable key used for CLI flags, config and the JSON report.
    pub fn key(&self) -> &'static str {
        match self {
            Self::PowersOn => "powers_on",
            Self::BeepCodes => "beep_codes",
            Self::SlowBoot => "slow_boot",
            Self::BlueScreen => "blue_screen",
            Self::Overheating => "overheating",
            Self::RandomRestarts => "random_restarts",
            Self::NoInternet => "no_internet",
            Self::Freezes => "freezes",
            Self::DiskErrors => "disk_errors",
            Self::UsbNotRecognized => "usb_not_recognized",
            Self::NoisyFan => "noisy_fan",
            Self::GeneralSluggish => "general_sluggish",
        }
    }

    /// Question shown to the user when the engine asks for this observation.
    pub fn prompt(&self) -> &'static str {
        match self {
            Self::PowersOn => "Does the computer power on?",
            Self::BeepCodes => "Do you hear beep codes at startup?",
            Self::SlowBoot => "Is the system booting slowly?",
            Self::BlueScreen => "Do you see a blue screen (BSOD)?",
            Self::Overheating => "Is the computer overheating?",
            Self::RandomRestarts => "Does the computer restart or shut down randomly?",
            Self::NoInternet => "Is the internet connection down?",
            Self::Freezes => "Does the system freeze or stop responding?",
            Self::DiskErrors => "Are you seeing disk read/write errors?",
            Self::UsbNotRecognized => "Are USB devices not being recognized?",
            Self::NoisyFan => "Are the fans unusually loud?",
            Self::GeneralSluggish => "Does everything feel generally sluggish?",
        }
    }

    /// Parse a stable key back into a symptom.
    pub fn from_key(key: &str) -> Option<Symptom> {
        Symptom::ALL.iter().find(|s| s.key() == key).copied()
    }
}

impl std::fmt::Display for Symptom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// A two-valued observation answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Answer {
    Yes,
    No,
}

impl Answer {
    /// Lenient parse of terminal input. Explicit affirmatives count as
    /// yes; everything else (including empty input) counts as no.
    /// Ambiguous input is not an error.
    pub fn from_input(raw: &str) -> Answer {
        match raw.trim().to_lowercase().as_str() {
            "y" | "yes" => Answer::Yes,
            _ => Answer::No,
        }
    }

    pub fn is_yes(self) -> bool {
        self == Answer::Yes
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Answer::Yes => "yes",
            Answer::No => "no",
        }
    }
}

impl std::fmt::Display for Answer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<bool> for Answer {
    fn from(yes: bool) -> Self {
        if yes { Answer::Yes } else { Answer::No }
    }
}

/// Session-scoped fact store.
///
/// Cheap to clone, no persistence. Every session starts empty; the
/// open-session marker must be set before any rule can match, so a
/// cleared memory matches nothing until the next session opens.
#[derive(Debug, Clone, Default)]
pub struct WorkingMemory {
    observations: HashMap<Symptom, Answer>,
    diagnosis: Option<String>,
    session_open: bool,
}

impl WorkingMemory {
    /// Create an empty memory with no session open.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the open-session marker. Rules only match while this is set.
    pub fn open_session(&mut self) {
        self.session_open = true;
    }

    pub fn is_open(&self) -> bool {
        self.session_open
    }

    /// Declare an observation, overwriting any previous answer for the key.
    pub fn declare(&mut self, symptom: Symptom, answer: Answer) {
        if let Some(previous) = self.observations.insert(symptom, answer) {
            if previous != answer {
                debug!(symptom = %symptom, %previous, new = %answer, "observation overwritten");
            }
        }
    }

    /// Whether any answer has been declared for the key.
    pub fn has(&self, symptom: Symptom) -> bool {
        self.observations.contains_key(&symptom)
    }

    pub fn get(&self, symptom: Symptom) -> Option<Answer> {
        self.observations.get(&symptom).copied()
    }

    /// Write the diagnosis slot. Later writes overwrite, but the canonical
    /// catalog guards diagnosis rules so only the first one lands.
    pub fn declare_diagnosis(&mut self, issue: impl Into<String>) {
        let issue = issue.into();
        if let Some(previous) = &self.diagnosis {
            debug!(%previous, new = %issue, "diagnosis overwritten");
        }
        self.diagnosis = Some(issue);
    }

    pub fn diagnosis(&self) -> Option<&str> {
        self.diagnosis.as_deref()
    }

    pub fn has_diagnosis(&self) -> bool {
        self.diagnosis.is_some()
    }

    /// Declared answers in canonical question order (for reports).
    pub fn declared_answers(&self) -> Vec<(Symptom, Answer)> {
        Symptom::ALL
            .iter()
            .filter_map(|s| self.observations.get(s).map(|a| (*s, *a)))
            .collect()
    }

    /// Number of declared observations (diagnosis and marker not counted).
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Drop all observations, the diagnosis and the open-session marker.
    pub fn clear(&mut self) {
        self.observations.clear();
        self.diagnosis = None;
        self.session_open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_parse_is_lenient() {
        assert_eq!(Answer::from_input("y"), Answer::Yes);
        assert_eq!(Answer::from_input("yes"), Answer::Yes);
        assert_eq!(Answer::from_input("YES"), Answer::Yes);
        assert_eq!(Answer::from_input("  Y  "), Answer::Yes);
        assert_eq!(Answer::from_input("n"), Answer::No);
        assert_eq!(Answer::from_input("no"), Answer::No);
        assert_eq!(Answer::from_input(""), Answer::No);
        assert_eq!(Answer::from_input("maybe"), Answer::No);
        assert_eq!(Answer::from_input("yeah"), Answer::No);
    }

    #[test]
    fn declare_overwrites_existing_answer() {
        let mut memory = WorkingMemory::new();
        memory.declare(Symptom::PowersOn, Answer::Yes);
        memory.declare(Symptom::PowersOn, Answer::No);
        assert_eq!(memory.get(Symptom::PowersOn), Some(Answer::No));
        assert_eq!(memory.len(), 1);
    }

    #[test]
    fn clear_resets_everything() {
        let mut memory = WorkingMemory::new();
        memory.open_session();
        memory.declare(Symptom::BlueScreen, Answer::Yes);
        memory.declare_diagnosis("Blue Screen of Death (BSOD)");
        memory.clear();
        assert!(!memory.is_open());
        assert!(memory.is_empty());
        assert!(!memory.has_diagnosis());
    }

    #[test]
    fn declared_answers_follow_question_order() {
        let mut memory = WorkingMemory::new();
        memory.declare(Symptom::GeneralSluggish, Answer::Yes);
        memory.declare(Symptom::PowersOn, Answer::No);
        memory.declare(Symptom::Freezes, Answer::Yes);
        let keys: Vec<Symptom> = memory.declared_answers().iter().map(|(s, _)| *s).collect();
        assert_eq!(
            keys,
            vec![Symptom::PowersOn, Symptom::Freezes, Symptom::GeneralSluggish]
        );
    }

    #[test]
    fn symptom_keys_round_trip() {
        for symptom in Symptom::ALL {
            assert_eq!(Symptom::from_key(symptom.key()), Some(symptom));
        }
        assert_eq!(Symptom::from_key("warp_core"), None);
    }
}
