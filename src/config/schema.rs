//! TOML schema for config.toml.
//!
//! ```toml
//! # Default storage file when --storage is not given
//! storage = "~/lists/home.json"
//!
//! [action_log]
//! enabled = true
//! path = "~/.local/share/tickbox/action.log"
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// User preferences stored in config.toml.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TickConfig {
    /// Storage file used when no flag or env var names one
    pub storage: Option<PathBuf>,

    /// Action log settings
    #[serde(default)]
    pub action_log: ActionLogConfig,
}

/// The `[action_log]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActionLogConfig {
    pub enabled: Option<bool>,
    pub path: Option<PathBuf>,
}

impl TickConfig {
    /// Parse config.toml contents.
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::Config(e.to_string()))
    }

    /// Read a config file; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(text) => toml::from_str(&text)
                .map_err(|e| Error::Config(format!("{}: {}", path.display(), e))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(Error::File {
                op: "read",
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Default location: `~/.config/tickbox/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tickbox").join("config.toml"))
    }
}

/// Expand a leading `~` to the home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    if let Ok(stripped) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    path.to_path_buf()
}
