//! Precedence resolution for session settings.
//!
//! ## Precedence (highest to lowest)
//!
//! 1. CLI flags
//! 2. Environment variables (`TICK_STORAGE`)
//! 3. config.toml
//! 4. Built-in defaults

use crate::action_log::{self, ActionLogger};
use crate::config::schema::{TickConfig, expand_home};
use std::path::{Path, PathBuf};

/// Environment variable naming the storage file.
pub const STORAGE_ENV: &str = "TICK_STORAGE";

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "TICK_CONFIG";

/// Tracks where a resolved value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueSource {
    /// Value from environment variable
    EnvVar(String),
    /// Value from config.toml
    ConfigFile,
    /// Value from CLI flag
    CliFlag,
    /// Built-in default value
    Default,
}

impl std::fmt::Display for ValueSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueSource::EnvVar(name) => write!(f, "env:{}", name),
            ValueSource::ConfigFile => write!(f, "config"),
            ValueSource::CliFlag => write!(f, "cli"),
            ValueSource::Default => write!(f, "default"),
        }
    }
}

/// A resolved value with its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved<T> {
    pub value: T,
    pub source: ValueSource,
}

impl<T> Resolved<T> {
    pub fn new(value: T, source: ValueSource) -> Self {
        Self { value, source }
    }
}

/// CLI overrides for settings resolution.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// `--storage`
    pub storage: Option<PathBuf>,
    /// `--no-action-log`
    pub disable_action_log: bool,
}

impl ConfigOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_storage(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage = Some(path.into());
        self
    }

    pub fn without_action_log(mut self) -> Self {
        self.disable_action_log = true;
        self
    }
}

/// Fully resolved settings with source tracking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSettings {
    /// Storage file; `None` means persistence is off for this session
    pub storage: Option<Resolved<PathBuf>>,
    pub action_log_enabled: Resolved<bool>,
    /// Action log file, when one could be determined
    pub action_log_path: Option<Resolved<PathBuf>>,
}

impl ResolvedSettings {
    pub fn storage(&self) -> Option<&Path> {
        self.storage.as_ref().map(|r| r.value.as_path())
    }

    /// Build the logger these settings describe.
    pub fn action_logger(&self) -> ActionLogger {
        match &self.action_log_path {
            Some(path) if self.action_log_enabled.value => ActionLogger::to_file(&path.value),
            _ => ActionLogger::disabled(),
        }
    }
}

/// Resolve settings from the config file, environment and CLI overrides.
pub fn resolve_settings(config: &TickConfig, overrides: &ConfigOverrides) -> ResolvedSettings {
    let storage = if let Some(path) = &overrides.storage {
        Some(Resolved::new(path.clone(), ValueSource::CliFlag))
    } else if let Some(path) = std::env::var_os(STORAGE_ENV).filter(|v| !v.is_empty()) {
        Some(Resolved::new(
            PathBuf::from(path),
            ValueSource::EnvVar(STORAGE_ENV.to_string()),
        ))
    } else {
        config
            .storage
            .as_ref()
            .map(|path| Resolved::new(expand_home(path), ValueSource::ConfigFile))
    };

    let action_log_enabled = if overrides.disable_action_log {
        Resolved::new(false, ValueSource::CliFlag)
    } else if let Some(enabled) = config.action_log.enabled {
        Resolved::new(enabled, ValueSource::ConfigFile)
    } else {
        Resolved::new(true, ValueSource::Default)
    };

    let action_log_path = match &config.action_log.path {
        Some(path) => Some(Resolved::new(expand_home(path), ValueSource::ConfigFile)),
        None => action_log::default_log_path().map(|p| Resolved::new(p, ValueSource::Default)),
    };

    ResolvedSettings {
        storage,
        action_log_enabled,
        action_log_path,
    }
}
