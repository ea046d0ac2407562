//! Common test utilities for tickbox integration tests.
//!
//! Provides `TestEnv` for isolated test environments that don't pollute
//! the user's config, data or storage files.

#![allow(dead_code)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};
pub use tempfile::TempDir;

/// A test environment with an isolated home directory.
///
/// `home_dir` stands in for `$HOME`, `$XDG_CONFIG_HOME` and `$XDG_DATA_HOME`
/// so config.toml and the action log land inside the temp directory.
pub struct TestEnv {
    pub home_dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            home_dir: TempDir::new().unwrap(),
        }
    }

    /// Get a Command for the tick binary with isolated directories.
    pub fn tick(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_tick"));
        cmd.current_dir(self.home_dir.path());
        cmd.env("HOME", self.home_dir.path());
        cmd.env("XDG_CONFIG_HOME", self.config_home());
        cmd.env("XDG_DATA_HOME", self.data_home());
        cmd.env_remove("TICK_STORAGE");
        cmd.env_remove("TICK_CONFIG");
        cmd.env_remove("TICK_LOG");
        cmd
    }

    /// Run a session with `--storage` pointing at `storage_file()`.
    pub fn tick_with_storage(&self) -> Command {
        let mut cmd = self.tick();
        cmd.arg("--storage").arg(self.storage_file());
        cmd
    }

    pub fn path(&self) -> &Path {
        self.home_dir.path()
    }

    pub fn config_home(&self) -> PathBuf {
        self.home_dir.path().join(".config")
    }

    pub fn data_home(&self) -> PathBuf {
        self.home_dir.path().join(".local").join("share")
    }

    /// Where config.toml is looked up by default.
    pub fn config_file(&self) -> PathBuf {
        self.config_home().join("tickbox").join("config.toml")
    }

    /// Default action log location.
    pub fn action_log(&self) -> PathBuf {
        self.data_home().join("tickbox").join("action.log")
    }

    pub fn storage_file(&self) -> PathBuf {
        self.home_dir.path().join("items.json")
    }

    /// Write config.toml at the default location.
    pub fn write_config(&self, contents: &str) {
        let path = self.config_file();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, contents).unwrap();
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Join session input lines with newlines.
pub fn script(lines: &[&str]) -> String {
    let mut input = lines.join("\n");
    input.push('\n');
    input
}
