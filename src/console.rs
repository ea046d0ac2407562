//! Line-oriented prompting over any reader/writer pair.
//!
//! The session and every interactive command talk to the user through a
//! [`Console`], so tests can drive them with an in-memory script.

use crate::{Error, Result};
use std::fmt::Display;
use std::io::{self, BufRead, Stdin, Stdout, Write};

/// Prompt shown for every numeric menu selection.
pub const NUMBER_PROMPT: &str = "Input number: ";

/// A prompt/read channel to the user.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<io::StdinLock<'static>, Stdout> {
    /// Console bound to the process's stdin and stdout.
    pub fn stdio() -> Self {
        let stdin: Stdin = io::stdin();
        Self::new(stdin.lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print one line.
    pub fn say(&mut self, line: impl Display) -> Result<()> {
        writeln!(self.output, "{}", line)?;
        Ok(())
    }

    /// Print an empty line.
    pub fn blank(&mut self) -> Result<()> {
        writeln!(self.output)?;
        Ok(())
    }

    /// Show `prompt` and read one line without its trailing newline.
    ///
    /// Returns [`Error::InputClosed`] once the input stream is exhausted.
    pub fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(Error::InputClosed);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(line)
    }

    /// Keep asking until `parse` accepts the answer.
    ///
    /// A rejected answer prints `retry` and asks again.
    pub fn ask_until<T>(
        &mut self,
        prompt: &str,
        retry: &str,
        mut parse: impl FnMut(&str) -> Option<T>,
    ) -> Result<T> {
        loop {
            let answer = self.ask(prompt)?;
            match parse(answer.trim()) {
                Some(value) => return Ok(value),
                None => self.say(retry)?,
            }
        }
    }

    /// Read a menu selection in `0..len`.
    ///
    /// Non-numeric answers and out-of-range numbers both re-prompt.
    pub fn ask_index(&mut self, len: usize) -> Result<usize> {
        loop {
            let answer = self.ask(NUMBER_PROMPT)?;
            match answer.trim().parse::<usize>() {
                Ok(index) if index < len => return Ok(index),
                Ok(_) => self.say("Selection out of range, try again.")?,
                Err(_) => self.say("Bad input, try again.")?,
            }
        }
    }

    /// Borrow the underlying writer.
    pub fn output(&self) -> &W {
        &self.output
    }
}
