//! The interactive read-dispatch loop.

use crate::action_log::ActionLogger;
use crate::commands::{self, Command, Context, Outcome};
use crate::console::Console;
use crate::storage::Store;
use crate::{Error, Result};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Printed on Ctrl+C or when input runs out.
pub const SHUTDOWN_MESSAGE: &str = "Shutting down, bye!";

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ending {
    /// The user typed `exit`.
    Exit,
    /// Input stream closed.
    Closed,
}

/// One interactive session over a store.
pub struct Session<R, W> {
    store: Store,
    console: Console<R, W>,
    storage: Option<PathBuf>,
    action_log: ActionLogger,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(console: Console<R, W>, storage: Option<PathBuf>) -> Self {
        Self {
            store: Store::new(),
            console,
            storage,
            action_log: ActionLogger::disabled(),
        }
    }

    pub fn with_action_log(mut self, action_log: ActionLogger) -> Self {
        self.action_log = action_log;
        self
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn console(&self) -> &Console<R, W> {
        &self.console
    }

    pub fn storage(&self) -> Option<&Path> {
        self.storage.as_deref()
    }

    /// Load the storage file into the store.
    ///
    /// Does nothing without a storage path. A failure is reported and the
    /// session starts from an empty list.
    pub fn preload(&mut self) -> Result<()> {
        if self.storage.is_none() {
            return Ok(());
        }
        let mut ctx = Context {
            store: &mut self.store,
            console: &mut self.console,
            storage: self.storage.as_deref(),
        };
        if let Err(e) = Command::Open.perform(&mut ctx) {
            tracing::warn!(error = %e, "initial load failed");
            ctx.console.say(format!("Error: {}", e))?;
            ctx.console.say("Starting with an empty list.")?;
        }
        Ok(())
    }

    /// Run one typed line through the dispatcher.
    pub fn handle(&mut self, line: &str) -> Result<Outcome> {
        let started = Instant::now();
        let mut ctx = Context {
            store: &mut self.store,
            console: &mut self.console,
            storage: self.storage.as_deref(),
        };
        let result = commands::dispatch(line, &mut ctx);

        if Command::from_label(line).is_some() {
            let duration = started.elapsed().as_millis() as u64;
            let error = match &result {
                Ok(Outcome::Failed { error }) => Some(error.clone()),
                Ok(_) => None,
                Err(e) => Some(e.to_string()),
            };
            self.action_log
                .record(line, error.is_none(), error, duration, self.store.len());
        }
        result
    }

    /// Preload, then prompt and dispatch until exit or end of input.
    pub fn run(&mut self) -> Result<Ending> {
        self.preload()?;

        let prompt = commands::command_prompt();
        loop {
            let line = match self.console.ask(&prompt) {
                Ok(line) => line,
                Err(Error::InputClosed) => return self.shut_down(),
                Err(e) => return Err(e),
            };

            match self.handle(&line) {
                Ok(Outcome::Continue | Outcome::Failed { .. }) => {}
                Ok(Outcome::Exit { .. }) => return Ok(Ending::Exit),
                Err(Error::InputClosed) => return self.shut_down(),
                Err(e) => return Err(e),
            }
        }
    }

    fn shut_down(&mut self) -> Result<Ending> {
        self.console.blank()?;
        self.console.say(SHUTDOWN_MESSAGE)?;
        Ok(Ending::Closed)
    }
}
