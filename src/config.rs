//! Session configuration, read from YAML.
//!
//! ```yaml
//! start_dir: /home/me/projects
//! tagger: lexicon      # or: none
//! autocorrect: true
//! log_level: warn
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::tagger::{LexiconTagger, NoopTagger, Tagger};

/// Which tagging capability a session is built with
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaggerKind {
    #[default]
    Lexicon,
    None,
}

impl TaggerKind {
    pub fn build(self) -> Box<dyn Tagger> {
        match self {
            TaggerKind::Lexicon => Box::new(LexiconTagger::new()),
            TaggerKind::None => Box::new(NoopTagger),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Initial working directory (process cwd when unset)
    pub start_dir: Option<PathBuf>,
    pub tagger: TaggerKind,
    /// Replace a mistyped leading word when exactly one command is close
    pub autocorrect: bool,
    /// Fallback tracing filter when `NLTERM_LOG` is not set
    pub log_level: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            start_dir: None,
            tagger: TaggerKind::Lexicon,
            autocorrect: true,
            log_level: "warn".to_string(),
        }
    }
}

/// ~/.nlterm/config.yaml
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".nlterm").join("config.yaml"))
}

/// Line-editor history kept by the interactive shell
pub fn default_history_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".nlterm").join("history"))
}

impl ShellConfig {
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).context("Invalid configuration")
    }

    /// Load from an explicit path; missing or malformed files are errors
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::from_yaml(&content).with_context(|| format!("In config file {}", path.display()))
    }

    /// Load the user's default config if there is one, defaults otherwise
    pub fn load_default() -> Result<Self> {
        match default_config_path() {
            Some(path) if path.is_file() => Self::load(path),
            _ => Ok(Self::default()),
        }
    }

    /// Explicit path when given, else the default location
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Self::load_default(),
        }
    }
}
