//! # Shell
//!
//! A line-oriented read-eval-print loop over any [`InputSource`] / [`ConsoleSink`] pair.
//!
//! ## States
//!
//! ```text
//! Prompting --prompt written--> Reading --line buffered--> Dispatching --+--> Prompting
//!                                  |                                     |
//!                                  +--end of input--> Terminated <--exit-+
//! ```
//!
//! The read is the only place the loop blocks. I/O errors are not retried: they end the loop
//! and are handed back to the caller as a [`ShellError`].

pub mod commands;
pub mod input;
pub mod pattern;

use core::fmt;

use crate::console::{ConsoleSink, InputSource};
use commands::{CommandResult, CommandTable};
use input::InputBuffer;

/// Prompt used when the caller does not configure one.
pub const DEFAULT_PROMPT: &[u8] = b"nyx> ";

/// Status handed to the environment when the loop terminates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitStatus(u8);

impl ExitStatus {
    pub const SUCCESS: ExitStatus = ExitStatus(0);
    pub const FAILURE: ExitStatus = ExitStatus(1);

    pub const fn code(self) -> u8 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Prompting,
    Reading,
    Dispatching,
    Terminated(ExitStatus),
}

/// Which side of the console failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellError<R, W> {
    Read(R),
    Write(W),
}

impl<R: fmt::Display, W: fmt::Display> fmt::Display for ShellError<R, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read(e) => write!(f, "failed to read input: {}", e),
            Self::Write(e) => write!(f, "failed to write output: {}", e),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ShellConfig<'a> {
    pub prompt: &'a [u8],
    pub commands: CommandTable<'a>,
}

impl Default for ShellConfig<'static> {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT,
            commands: CommandTable::BUILTIN,
        }
    }
}

pub struct Shell<'a, I, O> {
    input: I,
    output: O,
    config: ShellConfig<'a>,
    buffer: InputBuffer,
    state: State,
}

impl<'a, I: InputSource, O: ConsoleSink> Shell<'a, I, O> {
    pub fn new(input: I, output: O, config: ShellConfig<'a>) -> Self {
        Self {
            input,
            output,
            config,
            buffer: InputBuffer::new(),
            state: State::Prompting,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Performs a single transition and returns the new state. Once terminated, stays there.
    pub fn step(&mut self) -> Result<State, ShellError<I::Error, O::Error>> {
        self.state = match self.state {
            State::Prompting => {
                self.output
                    .write_bytes(self.config.prompt)
                    .map_err(ShellError::Write)?;
                State::Reading
            }
            State::Reading => {
                if self
                    .buffer
                    .read_line(&mut self.input)
                    .map_err(ShellError::Read)?
                {
                    State::Dispatching
                } else {
                    State::Terminated(ExitStatus::SUCCESS)
                }
            }
            State::Dispatching => match self.config.commands.lookup(self.buffer.command()) {
                Some(invocation) => {
                    let result = invocation
                        .action
                        .execute(invocation.argument, &mut self.output)
                        .map_err(ShellError::Write)?;
                    match result {
                        CommandResult::Continue => State::Prompting,
                        CommandResult::Exit(status) => State::Terminated(status),
                    }
                }
                None => State::Prompting,
            },
            State::Terminated(status) => State::Terminated(status),
        };
        Ok(self.state)
    }

    /// Runs until `exit`, end of input or an I/O error.
    pub fn run(&mut self) -> Result<ExitStatus, ShellError<I::Error, O::Error>> {
        loop {
            if let State::Terminated(status) = self.step()? {
                return Ok(status);
            }
        }
    }

    pub fn into_parts(self) -> (I, O) {
        (self.input, self.output)
    }
}
