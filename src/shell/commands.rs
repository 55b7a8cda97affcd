//! # Command Table
//!
//! Maps an input line to one of the built-in actions.
//!
//! ## Available Commands
//!
//! | Keyword  | Match  | Action                                   |
//! |----------|--------|------------------------------------------|
//! | `exit`   | exact  | terminate with status 0                  |
//! | `clear`  | exact  | clear the console                        |
//! | `cls`    | exact  | same as `clear`                          |
//! | `echo `  | prefix | write the rest of the line and a newline |
//!
//! ## Architecture
//!
//! The table is an ordered slice of [`Command`]s; the first entry whose keyword matches wins.
//! Anything that matches nothing is silently ignored. Executing an action returns a
//! [`CommandResult`] that tells the loop whether to keep going.

use super::pattern;
use super::ExitStatus;
use crate::console::ConsoleSink;

/// How a keyword is compared against the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// The whole line must equal the keyword.
    Exact,
    /// The line must start with the keyword; the rest becomes the argument.
    Prefix,
}

impl MatchKind {
    /// Returns the argument left after `keyword` when `line` matches.
    pub fn apply<'l>(self, line: &'l [u8], keyword: &[u8]) -> Option<&'l [u8]> {
        match self {
            Self::Exact => pattern::exact(line, keyword).then_some(&line[line.len()..]),
            Self::Prefix => pattern::prefix(line, keyword),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Exit,
    Clear,
    Echo,
}

pub enum CommandResult {
    Continue,
    Exit(ExitStatus),
}

impl Action {
    pub fn execute<S: ConsoleSink>(
        self,
        argument: &[u8],
        console: &mut S,
    ) -> Result<CommandResult, S::Error> {
        match self {
            Self::Exit => return Ok(CommandResult::Exit(ExitStatus::SUCCESS)),
            Self::Clear => console.clear()?,
            Self::Echo => {
                console.write_bytes(argument)?;
                console.write_bytes(b"\n")?;
            }
        }
        Ok(CommandResult::Continue)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    pub keyword: &'static [u8],
    pub kind: MatchKind,
    pub action: Action,
}

impl Command {
    pub const fn new(keyword: &'static [u8], kind: MatchKind, action: Action) -> Self {
        Self {
            keyword,
            kind,
            action,
        }
    }
}

/// A matched command and the bytes that follow its keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Invocation<'l> {
    pub action: Action,
    pub argument: &'l [u8],
}

#[derive(Debug, Clone, Copy)]
pub struct CommandTable<'a> {
    commands: &'a [Command],
}

/// Built-ins, in priority order.
const BUILTINS: &[Command] = &[
    Command::new(b"exit", MatchKind::Exact, Action::Exit),
    Command::new(b"clear", MatchKind::Exact, Action::Clear),
    Command::new(b"cls", MatchKind::Exact, Action::Clear),
    Command::new(b"echo ", MatchKind::Prefix, Action::Echo),
];

impl<'a> CommandTable<'a> {
    pub const BUILTIN: CommandTable<'static> = CommandTable::new(BUILTINS);

    pub const fn new(commands: &'a [Command]) -> Self {
        Self { commands }
    }

    pub fn commands(&self) -> &'a [Command] {
        self.commands
    }

    /// Finds the first command matching `line`, which must not carry its terminator.
    pub fn lookup<'l>(&self, line: &'l [u8]) -> Option<Invocation<'l>> {
        self.commands.iter().find_map(|command| {
            command
                .kind
                .apply(line, command.keyword)
                .map(|argument| Invocation {
                    action: command.action,
                    argument,
                })
        })
    }
}

impl Default for CommandTable<'static> {
    fn default() -> Self {
        Self::BUILTIN
    }
}
