//! CLI argument definitions for Tickbox.

use crate::config::{CONFIG_ENV, ConfigOverrides};
use clap::Parser;
use std::path::PathBuf;

/// Long version string: crate version plus the commit it was built from.
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("TICK_GIT_COMMIT"),
    ", built ",
    env!("TICK_BUILD_TIMESTAMP"),
    ")"
);

/// Tickbox - An interactive list manager for tasks, shopping and reading.
///
/// Starts a session that reads one command per line:
/// list, new, done, undone, save, open, exit.
#[derive(Parser, Debug)]
#[command(name = "tick")]
#[command(author, version, long_version = LONG_VERSION, about = "An interactive list manager for tasks, shopping and reading", long_about = None)]
pub struct Cli {
    /// Storage file to load at startup and write on `save`.
    /// Can also be set via TICK_STORAGE or `storage` in config.toml.
    #[arg(long = "storage", value_name = "PATH")]
    pub storage: Option<PathBuf>,

    /// Path to config.toml (default: ~/.config/tickbox/config.toml)
    #[arg(long = "config", value_name = "PATH", env = CONFIG_ENV)]
    pub config: Option<PathBuf>,

    /// Do not append dispatched commands to the action log
    #[arg(long = "no-action-log")]
    pub no_action_log: bool,
}

impl Cli {
    /// Settings overrides carried by the flags.
    pub fn overrides(&self) -> ConfigOverrides {
        let mut overrides = ConfigOverrides::new();
        if let Some(path) = &self.storage {
            overrides = overrides.with_storage(path.clone());
        }
        if self.no_action_log {
            overrides = overrides.without_action_log();
        }
        overrides
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::path::Path;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_storage_flag() {
        let cli = Cli::try_parse_from(["tick", "--storage", "items.json"]).unwrap();
        let overrides = cli.overrides();
        assert_eq!(overrides.storage.as_deref(), Some(Path::new("items.json")));
        assert!(!overrides.disable_action_log);
    }

    #[test]
    fn test_no_action_log_flag() {
        let cli = Cli::try_parse_from(["tick", "--no-action-log"]).unwrap();
        assert!(cli.storage.is_none());
        assert!(cli.overrides().disable_action_log);
    }

    #[test]
    fn test_positional_arguments_rejected() {
        assert!(Cli::try_parse_from(["tick", "list"]).is_err());
    }
}
