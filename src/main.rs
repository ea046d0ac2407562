//! Tickbox CLI - An interactive list manager for tasks, shopping and reading.

use clap::Parser;
use std::process;
use tickbox::cli::Cli;
use tickbox::config::{self, TickConfig};
use tickbox::console::Console;
use tickbox::session::{SHUTDOWN_MESSAGE, Session};
use tickbox::storage;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the tracing filter (e.g. `debug`).
const LOG_ENV: &str = "TICK_LOG";

fn main() {
    let cli = Cli::parse();
    init_tracing();

    if let Err(e) = ctrlc::set_handler(|| {
        // Wait out any in-flight save before exiting.
        let _writes = storage::hold_writes();
        println!();
        println!("{}", SHUTDOWN_MESSAGE);
        process::exit(0);
    }) {
        tracing::warn!(error = %e, "could not install interrupt handler");
    }

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> tickbox::Result<()> {
    let config_path = cli.config.clone().or_else(TickConfig::default_path);
    let file_config = match &config_path {
        Some(path) => TickConfig::load(path)?,
        None => TickConfig::default(),
    };

    let settings = config::resolve_settings(&file_config, &cli.overrides());
    if let Some(storage) = &settings.storage {
        tracing::debug!(path = %storage.value.display(), source = %storage.source, "storage resolved");
    }
    tracing::debug!(
        enabled = settings.action_log_enabled.value,
        source = %settings.action_log_enabled.source,
        "action log resolved"
    );

    let mut session = Session::new(Console::stdio(), settings.storage().map(|p| p.to_path_buf()))
        .with_action_log(settings.action_logger());
    let ending = session.run()?;
    tracing::debug!(?ending, items = session.store().len(), "session finished");
    Ok(())
}

/// Diagnostics go to stderr so they never interleave with the session on stdout.
fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
