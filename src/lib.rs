//! Tickbox - An interactive list manager for tasks, shopping and reading.
//!
//! This library provides the core functionality for the `tick` CLI tool:
//! the typed item model, the in-memory store and its JSON file format,
//! the command registry, and the read-dispatch session loop.

pub mod action_log;
pub mod cli;
pub mod commands;
pub mod config;
pub mod console;
pub mod models;
pub mod session;
pub mod storage;

use std::path::PathBuf;


/// Library-level error type for Tickbox operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to {op} {}: {source}", path.display())]
    File {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed storage file {}: {source}", path.display())]
    MalformedFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unknown item kind: {0}")]
    UnknownKind(String),

    #[error("Cannot read {kind} record: {reason}")]
    Deserialization { kind: String, reason: String },

    #[error("No storage file configured")]
    NoStorageConfigured,

    #[error("Input stream closed")]
    InputClosed,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for Tickbox operations.
pub type Result<T> = std::result::Result<T, Error>;
