//! Configuration management for techbotctl.
//!
//! Loads settings from ~/.config/techbot/config.toml or uses defaults.
//! CLI flags always override config values.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Config file name under the techbot config directory
pub const CONFIG_FILE: &str = "config.toml";

/// User-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechbotConfig {
    /// On-disk knowledge corpus directory; built-in corpus when unset
    #[serde(default)]
    pub knowledge_dir: Option<PathBuf>,

    /// Colored output for interactive terminals
    #[serde(default = "default_color")]
    pub color: bool,

    /// Greeting banner before an interactive session
    #[serde(default = "default_banner")]
    pub banner: bool,
}

fn default_color() -> bool {
    true
}

fn default_banner() -> bool {
    true
}

impl Default for TechbotConfig {
    fn default() -> Self {
        Self {
            knowledge_dir: None,
            color: default_color(),
            banner: default_banner(),
        }
    }
}

impl TechbotConfig {
    /// Default config path: ~/.config/techbot/config.toml
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("techbot").join(CONFIG_FILE))
    }

    /// Load the user config, falling back to defaults when the file is
    /// absent or malformed. A malformed file is logged, never fatal.
    pub fn load() -> Self {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load from an explicit path (testable entry point).
    pub fn load_from(path: &Path) -> Self {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(_) => return Self::default(),
        };
        match toml::from_str(&raw) {
            Ok(config) => config,
            Err(err) => {
                warn!(path = %path.display(), %err, "malformed config, using defaults");
                Self::default()
            }
        }
    }
}
