//! Command implementations for the Tickbox session.
//!
//! Every user-typed label maps to one variant of the closed [`Command`]
//! registry. Commands are organized by concern:
//! - `items` - list, new, done, undone
//! - `persist` - save, open

mod items;
mod persist;

use crate::console::Console;
use crate::storage::Store;
use crate::{Error, Result};
use std::fmt;
use std::io::{BufRead, Write};
use std::path::Path;

/// Message printed when the user asks to leave.
pub const FAREWELL: &str = "See you next time!";

/// Everything a command may touch while it runs.
pub struct Context<'a, R, W> {
    pub store: &'a mut Store,
    pub console: &'a mut Console<R, W>,
    /// Storage file configured at startup, if any.
    pub storage: Option<&'a Path>,
}

/// What the session loop should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    /// The command failed; the error was already shown to the user.
    Failed { error: String },
    /// The user asked to end the session.
    Exit { farewell: String },
}

/// The closed set of user-invocable commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    List,
    New,
    Done,
    Undone,
    Save,
    Open,
    Exit,
}

impl Command {
    /// Registry order; also the order labels appear in the prompt.
    pub const ALL: [Command; 7] = [
        Command::List,
        Command::New,
        Command::Done,
        Command::Undone,
        Command::Save,
        Command::Open,
        Command::Exit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Command::List => "list",
            Command::New => "new",
            Command::Done => "done",
            Command::Undone => "undone",
            Command::Save => "save",
            Command::Open => "open",
            Command::Exit => "exit",
        }
    }

    /// Case-insensitive lookup of a typed label.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim().to_lowercase();
        Self::ALL.into_iter().find(|command| command.label() == label)
    }

    /// Run the command against the session context.
    pub fn perform<R: BufRead, W: Write>(&self, ctx: &mut Context<'_, R, W>) -> Result<Outcome> {
        match self {
            Command::List => items::list(ctx),
            Command::New => items::new(ctx),
            Command::Done => items::mark(ctx, true),
            Command::Undone => items::mark(ctx, false),
            Command::Save => persist::save(ctx),
            Command::Open => persist::open(ctx),
            Command::Exit => Ok(Outcome::Exit {
                farewell: FAREWELL.to_string(),
            }),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The command prompt listing every label.
pub fn command_prompt() -> String {
    let labels: Vec<&str> = Command::ALL.iter().map(Command::label).collect();
    format!("Input your command: ({}): ", labels.join("|"))
}

/// Resolve `label` and run it.
///
/// Unknown labels and failed commands are reported and the session carries
/// on; a failure comes back as [`Outcome::Failed`]. An exit request prints
/// the farewell and is handed back to the caller. A closed input stream is
/// returned as an error so the caller can stop.
pub fn dispatch<R: BufRead, W: Write>(
    label: &str,
    ctx: &mut Context<'_, R, W>,
) -> Result<Outcome> {
    let Some(command) = Command::from_label(label) else {
        tracing::debug!(label, "unknown command label");
        ctx.console.say("Bad command, try again.")?;
        return Ok(Outcome::Continue);
    };

    match command.perform(ctx) {
        Ok(Outcome::Exit { farewell }) => {
            ctx.console.say(&farewell)?;
            Ok(Outcome::Exit { farewell })
        }
        Ok(outcome) => Ok(outcome),
        Err(Error::InputClosed) => Err(Error::InputClosed),
        Err(e) => {
            tracing::warn!(command = %command, error = %e, "command failed");
            let error = e.to_string();
            ctx.console.say(format!("Error: {}", error))?;
            Ok(Outcome::Failed { error })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Details, Item};
    use crate::test_utils::{ScriptedConsole, TestEnv, output_of, scripted};
    use std::fs;

    fn run(store: &mut Store, console: &mut ScriptedConsole, label: &str) -> Result<Outcome> {
        let mut ctx = Context {
            store,
            console,
            storage: None,
        };
        dispatch(label, &mut ctx)
    }

    #[test]
    fn test_labels_are_case_insensitive() {
        assert_eq!(Command::from_label("LIST"), Some(Command::List));
        assert_eq!(Command::from_label("  Undone "), Some(Command::Undone));
        assert_eq!(Command::from_label("delete"), None);
    }

    #[test]
    fn test_prompt_lists_every_label() {
        assert_eq!(
            command_prompt(),
            "Input your command: (list|new|done|undone|save|open|exit): "
        );
    }

    #[test]
    fn test_unknown_label_is_not_fatal() {
        let mut store = Store::new();
        let mut console = scripted(&[]);
        let outcome = run(&mut store, &mut console, "frobnicate").unwrap();
        assert_eq!(outcome, Outcome::Continue);
        assert_eq!(output_of(&console), "Bad command, try again.\n");
    }

    #[test]
    fn test_exit_prints_farewell_and_propagates() {
        let mut store = Store::new();
        let mut console = scripted(&[]);
        let outcome = run(&mut store, &mut console, "exit").unwrap();
        assert_eq!(
            outcome,
            Outcome::Exit {
                farewell: FAREWELL.to_string()
            }
        );
        assert_eq!(output_of(&console), "See you next time!\n");
    }

    #[test]
    fn test_closed_input_propagates() {
        let mut store = Store::new();
        let mut console = scripted(&["abc"]);
        let err = run(&mut store, &mut console, "new").unwrap_err();
        assert!(matches!(err, Error::InputClosed));
    }

    #[test]
    fn test_command_failure_is_reported_and_session_continues() {
        let env = TestEnv::new();
        let path = env.storage_file();
        fs::write(&path, "not json").unwrap();

        let mut store = Store::with_items(vec![Item::new(Details::Reading {
            heading: "paper".to_string(),
            url: "https://example.org".to_string(),
        })]);
        let mut console = scripted(&[]);
        let mut ctx = Context {
            store: &mut store,
            console: &mut console,
            storage: Some(&path),
        };
        let outcome = dispatch("open", &mut ctx).unwrap();

        assert!(matches!(outcome, Outcome::Failed { ref error } if error.starts_with("Malformed")));
        assert!(output_of(&console).starts_with("Error: Malformed storage file"));
        assert_eq!(store.len(), 1);
    }
}
