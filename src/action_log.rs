//! Action logging for Tickbox sessions.
//!
//! Every dispatched command is appended to a structured log file in JSONL
//! format. Logging is best-effort: failures are reported through `tracing`
//! and never interrupt the session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Represents a single action log entry.
#[derive(Debug, Serialize, Deserialize)]
pub struct ActionLog {
    /// ISO 8601 timestamp when the command finished
    pub timestamp: DateTime<Utc>,

    /// Label as typed by the user, lowercased
    pub command: String,

    /// Whether the command succeeded
    pub success: bool,

    /// Error message if the command failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Command execution duration in milliseconds
    pub duration_ms: u64,

    /// Number of items in the store afterwards
    pub item_count: usize,

    /// User who ran the session
    pub user: String,
}

/// Appends [`ActionLog`] entries to a file, or does nothing when disabled.
#[derive(Debug, Clone, Default)]
pub struct ActionLogger {
    path: Option<PathBuf>,
}

impl ActionLogger {
    /// Logger writing to `path`.
    pub fn to_file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Logger that drops every entry.
    pub fn disabled() -> Self {
        Self { path: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Record one command. Never fails.
    pub fn record(
        &self,
        command: &str,
        success: bool,
        error: Option<String>,
        duration_ms: u64,
        item_count: usize,
    ) {
        let Some(path) = &self.path else {
            return;
        };

        let entry = ActionLog {
            timestamp: Utc::now(),
            command: sanitize_label(command),
            success,
            error,
            duration_ms,
            item_count,
            user: get_current_user(),
        };

        if let Err(e) = write_log_entry(path, &entry) {
            tracing::warn!(path = %path.display(), error = %e, "failed to write action log");
        }
    }
}

/// Default log location: `~/.local/share/tickbox/action.log`.
pub fn default_log_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("tickbox").join("action.log"))
}

/// Write a log entry to the log file.
fn write_log_entry(path: &Path, entry: &ActionLog) -> Result<(), Box<dyn std::error::Error>> {
    // Create parent directories if needed
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string(entry)?;

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;

    writeln!(file, "{}", json)?;

    Ok(())
}

/// Normalize the typed label and truncate anything absurdly long.
fn sanitize_label(label: &str) -> String {
    let label = label.trim().to_lowercase();
    if label.chars().count() > 40 {
        let head: String = label.chars().take(37).collect();
        format!("{}... ({} chars)", head, label.chars().count())
    } else {
        label
    }
}

/// Get the current user's username.
fn get_current_user() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string())
}
