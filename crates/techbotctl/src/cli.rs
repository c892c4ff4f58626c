//! CLI - Command-line argument parsing
//!
//! Defines the CLI structure using clap.
//! Keeps argument parsing separate from execution logic.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use techbot_common::{Answer, Symptom};

/// TechBot CLI
#[derive(Parser)]
#[command(name = "techbotctl")]
#[command(about = "TechBot - Rule-based PC diagnostic advisor", long_about = None)]
#[command(version)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// Knowledge corpus directory (overrides config; default: built-in corpus)
    #[arg(long, global = true)]
    pub knowledge_dir: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand (if not provided, starts an interactive session)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Run one diagnosis with all answers supplied up front
    ///
    /// Every observation flag defaults to no, matching the untouched
    /// radio-button state of the batch front end.
    Diagnose {
        /// Does the computer power on?
        #[arg(long, value_enum, default_value_t = AnswerFlag::No)]
        powers_on: AnswerFlag,

        /// Beep codes at startup?
        #[arg(long, value_enum, default_value_t = AnswerFlag::No)]
        beep_codes: AnswerFlag,

        /// Slow boot?
        #[arg(long, value_enum, default_value_t = AnswerFlag::No)]
        slow_boot: AnswerFlag,

        /// Blue screen (BSOD)?
        #[arg(long, value_enum, default_value_t = AnswerFlag::No)]
        blue_screen: AnswerFlag,

        /// Overheating?
        #[arg(long, value_enum, default_value_t = AnswerFlag::No)]
        overheating: AnswerFlag,

        /// Random shutdowns or restarts?
        #[arg(long, value_enum, default_value_t = AnswerFlag::No)]
        random_restarts: AnswerFlag,

        /// No internet connection?
        #[arg(long, value_enum, default_value_t = AnswerFlag::No)]
        no_internet: AnswerFlag,

        /// Freezes or unresponsive applications?
        #[arg(long, value_enum, default_value_t = AnswerFlag::No)]
        freezes: AnswerFlag,

        /// Disk read/write errors?
        #[arg(long, value_enum, default_value_t = AnswerFlag::No)]
        disk_errors: AnswerFlag,

        /// USB devices not recognized?
        #[arg(long, value_enum, default_value_t = AnswerFlag::No)]
        usb_not_recognized: AnswerFlag,

        /// Fans unusually loud?
        #[arg(long, value_enum, default_value_t = AnswerFlag::No)]
        noisy_fan: AnswerFlag,

        /// General sluggishness?
        #[arg(long, value_enum, default_value_t = AnswerFlag::No)]
        general_sluggish: AnswerFlag,

        /// Output the full report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the issues the advisor can diagnose
    Issues {
        /// Output JSON only
        #[arg(long)]
        json: bool,
    },

    /// Show description and solution for one issue by name
    Explain {
        /// Exact issue name, e.g. "No Power"
        issue: String,
    },
}

/// Yes/no flag value for the batch diagnose command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AnswerFlag {
    Yes,
    No,
}

impl From<AnswerFlag> for Answer {
    fn from(flag: AnswerFlag) -> Self {
        match flag {
            AnswerFlag::Yes => Answer::Yes,
            AnswerFlag::No => Answer::No,
        }
    }
}

impl Commands {
    /// Flatten the diagnose flags into (symptom, answer) pairs in
    /// canonical order. Panics on non-diagnose variants.
    pub fn diagnose_answers(&self) -> Vec<(Symptom, Answer)> {
        let Commands::Diagnose {
            powers_on,
            beep_codes,
            slow_boot,
            blue_screen,
            overheating,
            random_restarts,
            no_internet,
            freezes,
            disk_errors,
            usb_not_recognized,
            noisy_fan,
            general_sluggish,
            ..
        } = self
        else {
            unreachable!("diagnose_answers called on a non-diagnose command");
        };

        vec![
            (Symptom::PowersOn, (*powers_on).into()),
            (Symptom::BeepCodes, (*beep_codes).into()),
            (Symptom::SlowBoot, (*slow_boot).into()),
            (Symptom::BlueScreen, (*blue_screen).into()),
            (Symptom::Overheating, (*overheating).into()),
            (Symptom::RandomRestarts, (*random_restarts).into()),
            (Symptom::NoInternet, (*no_internet).into()),
            (Symptom::Freezes, (*freezes).into()),
            (Symptom::DiskErrors, (*disk_errors).into()),
            (Symptom::UsbNotRecognized, (*usb_not_recognized).into()),
            (Symptom::NoisyFan, (*noisy_fan).into()),
            (Symptom::GeneralSluggish, (*general_sluggish).into()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnose_flags_default_to_no() {
        let cli = Cli::try_parse_from(["techbotctl", "diagnose"]).unwrap();
        let command = cli.command.unwrap();
        let answers = command.diagnose_answers();
        assert_eq!(answers.len(), 12);
        assert!(answers.iter().all(|(_, a)| *a == Answer::No));
    }

    #[test]
    fn diagnose_flags_parse_yes() {
        let cli = Cli::try_parse_from([
            "techbotctl",
            "diagnose",
            "--powers-on",
            "yes",
            "--blue-screen",
            "yes",
        ])
        .unwrap();
        let answers = cli.command.unwrap().diagnose_answers();
        let get = |s: Symptom| answers.iter().find(|(k, _)| *k == s).unwrap().1;
        assert_eq!(get(Symptom::PowersOn), Answer::Yes);
        assert_eq!(get(Symptom::BlueScreen), Answer::Yes);
        assert_eq!(get(Symptom::Freezes), Answer::No);
    }

    #[test]
    fn global_flags_parse_before_and_after_subcommand() {
        let cli = Cli::try_parse_from(["techbotctl", "--no-color", "issues"]).unwrap();
        assert!(cli.no_color);
        let cli = Cli::try_parse_from(["techbotctl", "issues", "--json"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Issues { json: true })));
    }

    #[test]
    fn no_subcommand_means_interactive() {
        let cli = Cli::try_parse_from(["techbotctl"]).unwrap();
        assert!(cli.command.is_none());
    }
}
