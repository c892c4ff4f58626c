//! Issue knowledge corpus (v0.3.0, loader reworked v0.4.0).
//!
//! Built-in entries cover every issue the canonical catalog can diagnose.
//! `load_dir` reads the classic on-disk layout instead: an `issues.txt`
//! index plus one description and one solution file per issue, named by
//! slug. Lookups never fail; missing texts degrade to placeholders.

use crate::error::TechbotError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Issue names shared between the rule catalog and the corpus.
///
/// The strings double as corpus keys, so they must match `issues.txt`
/// in an on-disk corpus byte for byte.
pub mod issue_names {
    pub const NO_POWER: &str = "No Power";
    pub const POST_BEEPS: &str = "POST Beep Codes at Startup";
    pub const SLOW_BOOT: &str = "Slow Boot";
    pub const BSOD: &str = "Blue Screen of Death (BSOD)";
    pub const OVERHEATING: &str = "Overheating";
    pub const RANDOM_RESTARTS: &str = "Random Shutdowns / Restarts";
    pub const NO_INTERNET: &str = "No Internet Connection";
    pub const FREEZES: &str = "System Freezes / Unresponsive Applications";
    pub const DISK_ERRORS: &str = "Disk Read/Write Errors";
    pub const USB_NOT_RECOGNIZED: &str = "USB Devices Not Recognized";
    pub const GENERAL_SLUGGISH: &str = "General Sluggishness";
}

/// Shown when an issue has no description in the corpus.
pub const MISSING_DESCRIPTION: &str = "(missing description)";
/// Shown when an issue has no solution in the corpus.
pub const MISSING_SOLUTION: &str = "(missing solution)";

/// Subdirectory holding per-issue description files.
const DESCRIPTIONS_DIR: &str = "issue descriptions";
/// Subdirectory holding per-issue solution files.
const SOLUTIONS_DIR: &str = "issue solutions";

/// A built-in corpus entry.
struct BuiltinIssue {
    name: &'static str,
    description: &'static str,
    solution: &'static str,
}

/// Built-in corpus, one entry per diagnosable issue.
const BUILTIN_ISSUES: &[BuiltinIssue] = &[
    BuiltinIssue {
        name: issue_names::NO_POWER,
        description: "The computer shows no sign of life when the power button is \
                      pressed: no fans, no lights, no display. This points at the \
                      power path rather than the operating system.",
        solution: "Check that the wall outlet works and the power cable is seated at \
                   both ends. Flip the PSU rocker switch off and on. On a laptop, try \
                   a different charger and remove the battery if possible. If nothing \
                   changes, the power supply or motherboard likely needs replacement.",
    },
    BuiltinIssue {
        name: issue_names::POST_BEEPS,
        description: "The machine powers on but the firmware halts with a beep \
                      pattern before the operating system loads. Beep codes are the \
                      BIOS reporting a hardware fault it found during self-test.",
        solution: "Count the beep pattern and look it up for your BIOS vendor (AMI, \
                   Award, Phoenix). Most patterns point at RAM or GPU: reseat the \
                   memory modules one at a time and reseat the graphics card. Clear \
                   CMOS if the pattern persists after reseating.",
    },
    BuiltinIssue {
        name: issue_names::SLOW_BOOT,
        description: "The system takes far longer than usual to reach the desktop, \
                      without overheating being involved. Usually caused by too many \
                      startup programs, a fragmented or failing disk, or pending \
                      updates.",
        solution: "Disable unneeded startup programs in the task manager. Check disk \
                   health and free space; move the OS to an SSD if it still lives on \
                   a spinning drive. Let pending OS updates finish and reboot once \
                   more.",
    },
    BuiltinIssue {
        name: issue_names::BSOD,
        description: "Windows halts with a blue screen and a stop code. BSODs are \
                      almost always driver or hardware faults; the stop code narrows \
                      down which subsystem crashed.",
        solution: "Note the stop code and the driver file named on the screen, if \
                   any. Roll back or update recently changed drivers. Run a memory \
                   test overnight. If the code mentions storage, check disk health \
                   before anything else.",
    },
    BuiltinIssue {
        name: issue_names::OVERHEATING,
        description: "The machine runs hot and loud: fans at full speed, hot air from \
                      the vents, possible thermal throttling or shutdowns under \
                      load. Dust buildup and dried thermal paste are the usual \
                      culprits.",
        solution: "Power down and blow the dust out of heatsinks and fans with \
                   compressed air. Make sure vents are unobstructed and the machine \
                   is not running on a soft surface. If it still overheats, repaste \
                   the CPU cooler or have a shop do it.",
    },
    BuiltinIssue {
        name: issue_names::RANDOM_RESTARTS,
        description: "The computer shuts down or restarts by itself without heat \
                      being the trigger. Points at an unstable power supply, failing \
                      RAM, or a crash set to auto-restart.",
        solution: "Disable automatic restart on system failure so a crash shows its \
                   error instead of rebooting. Test the RAM. If restarts happen \
                   under load, the power supply is the prime suspect; try a known \
                   good unit.",
    },
    BuiltinIssue {
        name: issue_names::NO_INTERNET,
        description: "The machine runs fine but cannot reach the network: pages do \
                      not load, downloads fail, the adapter may show no connectivity. \
                      The fault can sit anywhere between the adapter and the router.",
        solution: "Restart the router and modem first. Then toggle the adapter off \
                   and on, forget and rejoin the Wi-Fi network, or reseat the \
                   Ethernet cable. Run the OS network troubleshooter and renew the \
                   DHCP lease if it still fails.",
    },
    BuiltinIssue {
        name: issue_names::FREEZES,
        description: "Applications stop responding or the whole desktop locks up \
                      without a blue screen. Typically resource exhaustion, a hung \
                      driver, or malware chewing up the machine.",
        solution: "Open the task manager and look for a process pinning CPU, memory \
                   or disk. Update graphics and chipset drivers. Run a malware scan. \
                   If freezes persist in safe mode too, start suspecting RAM or \
                   storage.",
    },
    BuiltinIssue {
        name: issue_names::DISK_ERRORS,
        description: "Reads or writes fail, files corrupt, or the OS logs I/O errors. \
                      A failing drive often announces itself this way before dying \
                      outright.",
        solution: "Back up anything important immediately. Check the drive's SMART \
                   data and run the filesystem checker. Replace the drive at the \
                   first sign of reallocated or pending sectors; cables are worth \
                   reseating but rarely the real cause.",
    },
    BuiltinIssue {
        name: issue_names::USB_NOT_RECOGNIZED,
        description: "Devices plugged into USB ports are not detected, or connect and \
                      disconnect repeatedly. Can be the port, the cable, the device, \
                      or the USB controller drivers.",
        solution: "Try the device in another port and another cable; try a known \
                   good device in the suspect port. Reinstall the USB controller \
                   drivers from the device manager. Disable USB selective suspend in \
                   the power plan if devices drop out intermittently.",
    },
    BuiltinIssue {
        name: issue_names::GENERAL_SLUGGISH,
        description: "Everything works, just slowly: windows lag, applications take \
                      ages to open, the whole machine feels tired. Usually an \
                      accumulation problem rather than a single fault.",
        solution: "Free up disk space, trim startup programs, and check for \
                   background processes hogging resources. Run a malware scan. On an \
                   older machine, adding RAM and moving to an SSD are the two \
                   upgrades that matter.",
    },
];

/// One issue with its description and remediation text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueRecord {
    pub name: String,
    pub description: String,
    pub solution: String,
}

/// Read-only lookup from issue name to its texts.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    /// Issue names in listing order (builtin order or `issues.txt` order).
    names: Vec<String>,
    records: HashMap<String, IssueRecord>,
}

impl KnowledgeBase {
    /// The built-in corpus.
    pub fn builtin() -> Self {
        let names = BUILTIN_ISSUES.iter().map(|i| i.name.to_string()).collect();
        let records = BUILTIN_ISSUES
            .iter()
            .map(|i| {
                (
                    i.name.to_string(),
                    IssueRecord {
                        name: i.name.to_string(),
                        description: i.description.to_string(),
                        solution: i.solution.to_string(),
                    },
                )
            })
            .collect();
        Self { names, records }
    }

    /// Load a corpus from the classic on-disk layout.
    ///
    /// `issues.txt` must be readable; missing description or solution
    /// files are logged and replaced with placeholders.
    pub fn load_dir(dir: &Path) -> Result<Self, TechbotError> {
        let index_path = dir.join("issues.txt");
        let raw = fs::read_to_string(&index_path).map_err(|source| {
            TechbotError::CorpusUnreadable {
                path: index_path.display().to_string(),
                source,
            }
        })?;

        let names: Vec<String> = raw
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect();
        if names.is_empty() {
            warn!(path = %index_path.display(), "issue index is empty");
        }

        let mut records = HashMap::new();
        for name in &names {
            let file_stem = slug(name);
            let description = match read_text(dir, DESCRIPTIONS_DIR, &file_stem) {
                Some(text) => text,
                None => {
                    warn!(issue = %name, "no description file in corpus");
                    MISSING_DESCRIPTION.to_string()
                }
            };
            let solution = match read_text(dir, SOLUTIONS_DIR, &file_stem) {
                Some(text) => text,
                None => {
                    warn!(issue = %name, "no solution file in corpus");
                    MISSING_SOLUTION.to_string()
                }
            };
            records.insert(
                name.clone(),
                IssueRecord {
                    name: name.clone(),
                    description,
                    solution,
                },
            );
        }

        info!(issues = names.len(), dir = %dir.display(), "knowledge corpus loaded");
        Ok(Self { names, records })
    }

    pub fn lookup(&self, name: &str) -> Option<&IssueRecord> {
        self.records.get(name)
    }

    /// Description text, placeholder on a corpus miss.
    pub fn description_for(&self, name: &str) -> &str {
        self.records
            .get(name)
            .map(|r| r.description.as_str())
            .unwrap_or(MISSING_DESCRIPTION)
    }

    /// Solution text, placeholder on a corpus miss.
    pub fn solution_for(&self, name: &str) -> &str {
        self.records
            .get(name)
            .map(|r| r.solution.as_str())
            .unwrap_or(MISSING_SOLUTION)
    }

    /// Issue names in listing order.
    pub fn issue_names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

fn read_text(dir: &Path, subdir: &str, file_stem: &str) -> Option<String> {
    let path = dir.join(subdir).join(format!("{file_stem}.txt"));
    match fs::read_to_string(&path) {
        Ok(text) => Some(text.trim().to_string()),
        Err(_) => None,
    }
}

/// Derive the corpus filename stem for an issue name.
///
/// Lowercase, `(` `)` `/` dropped outright, every other non-alphanumeric
/// run collapsed to a single `_`, leading and trailing `_` stripped. So
/// "Blue Screen of Death (BSOD)" maps to `blue_screen_of_death_bsod` and
/// "Disk Read/Write Errors" maps to `disk_readwrite_errors`.
pub fn slug(name: &str) -> String {
    let lowered = name.to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    for c in lowered.chars() {
        match c {
            '(' | ')' | '/' => {}
            c if c.is_ascii_alphanumeric() => out.push(c),
            _ => {
                if !out.ends_with('_') {
                    out.push('_');
                }
            }
        }
    }
    out.trim_matches('_').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_matches_corpus_filenames() {
        assert_eq!(slug("No Power"), "no_power");
        assert_eq!(slug("Blue Screen of Death (BSOD)"), "blue_screen_of_death_bsod");
        assert_eq!(slug("Random Shutdowns / Restarts"), "random_shutdowns_restarts");
        assert_eq!(slug("Disk Read/Write Errors"), "disk_readwrite_errors");
        assert_eq!(slug("POST Beep Codes at Startup"), "post_beep_codes_at_startup");
    }

    #[test]
    fn builtin_covers_every_diagnosable_issue() {
        let kb = KnowledgeBase::builtin();
        assert_eq!(kb.len(), 11);
        for name in kb.issue_names() {
            let record = kb.lookup(name).unwrap();
            assert!(!record.description.is_empty());
            assert!(!record.solution.is_empty());
            assert_ne!(record.description, MISSING_DESCRIPTION);
            assert_ne!(record.solution, MISSING_SOLUTION);
        }
    }

    #[test]
    fn lookups_degrade_to_placeholders() {
        let kb = KnowledgeBase::builtin();
        assert!(kb.lookup("Haunted GPU").is_none());
        assert_eq!(kb.description_for("Haunted GPU"), MISSING_DESCRIPTION);
        assert_eq!(kb.solution_for("Haunted GPU"), MISSING_SOLUTION);
    }
}
