//! Configuration for Tickbox.
//!
//! ## config.toml - User preferences
//!
//! Located at `~/.config/tickbox/config.toml` unless `--config` or
//! `TICK_CONFIG` points elsewhere. Contains:
//! - `storage` - Default storage file
//! - `[action_log]` - Whether and where to write the action log
//!
//! Use the [`resolver`] module for precedence resolution.

pub mod resolver;
pub mod schema;

pub use resolver::{
    CONFIG_ENV, ConfigOverrides, Resolved, ResolvedSettings, STORAGE_ENV, ValueSource,
    resolve_settings,
};
pub use schema::{ActionLogConfig, TickConfig, expand_home};
