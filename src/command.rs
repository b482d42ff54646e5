//! Commands that drive an [`Engine`](crate::engine::Engine).
//!
//! Besides the serde form, commands have a one-line text form used by
//! scripts:
//!
//! ```text
//! # three subjects, nine steps on the last one
//! add-subject 3
//! add-step 9
//! click 40 30
//! delete-subject
//! ```
//!
//! A trailing count (at most [`MAX_REPEAT`]) repeats a zero-argument command.
//! `#` starts a comment.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Largest repeat count a script line may carry.
pub const MAX_REPEAT: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    AddSubject,
    AddStep,
    DeleteSubject,
    DeleteStep,
    SoftReset,
    HardReset,
    Click { x: f32, y: f32 },
}

impl Command {
    fn keyword(&self) -> &'static str {
        match self {
            Command::AddSubject => "add-subject",
            Command::AddStep => "add-step",
            Command::DeleteSubject => "delete-subject",
            Command::DeleteStep => "delete-step",
            Command::SoftReset => "soft-reset",
            Command::HardReset => "hard-reset",
            Command::Click { .. } => "click",
        }
    }

    fn from_keyword(word: &str) -> Option<Self> {
        Some(match word {
            "add-subject" => Command::AddSubject,
            "add-step" => Command::AddStep,
            "delete-subject" => Command::DeleteSubject,
            "delete-step" => Command::DeleteStep,
            "soft-reset" => Command::SoftReset,
            "hard-reset" => Command::HardReset,
            "click" => Command::Click { x: 0.0, y: 0.0 },
            _ => return None,
        })
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Click { x, y } => write!(f, "click {x} {y}"),
            other => f.write_str(other.keyword()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CommandParseError {
    UnknownCommand { line: usize, word: String },
    InvalidArgument { line: usize, arg: String },
    WrongArity { line: usize, command: &'static str, found: usize },
}

impl fmt::Display for CommandParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCommand { line, word } => {
                write!(f, "line {line}: unknown command `{word}`")
            }
            Self::InvalidArgument { line, arg } => {
                write!(f, "line {line}: invalid argument `{arg}`")
            }
            Self::WrongArity { line, command, found } => {
                write!(f, "line {line}: `{command}` does not take {found} argument(s)")
            }
        }
    }
}

impl std::error::Error for CommandParseError {}

/// Parse one script line (1-based `line` for error messages).
/// Blank and comment-only lines yield no commands.
pub fn parse_line(line: usize, text: &str) -> Result<Vec<Command>, CommandParseError> {
    let text = text.split('#').next().unwrap_or_default().trim();
    let mut words = text.split_whitespace();
    let Some(word) = words.next() else {
        return Ok(Vec::new());
    };
    let args: Vec<&str> = words.collect();
    let cmd = Command::from_keyword(word).ok_or_else(|| CommandParseError::UnknownCommand {
        line,
        word: word.to_string(),
    })?;

    let number = |arg: &str| -> Result<f32, CommandParseError> {
        arg.parse::<f32>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| CommandParseError::InvalidArgument {
                line,
                arg: arg.to_string(),
            })
    };

    match (cmd, args.as_slice()) {
        (Command::Click { .. }, [x, y]) => Ok(vec![Command::Click {
            x: number(*x)?,
            y: number(*y)?,
        }]),
        (Command::Click { .. }, _) => Err(CommandParseError::WrongArity {
            line,
            command: cmd.keyword(),
            found: args.len(),
        }),
        (_, []) => Ok(vec![cmd]),
        (_, [count]) => {
            let count = count
                .parse::<usize>()
                .ok()
                .filter(|&n| n <= MAX_REPEAT)
                .ok_or_else(|| CommandParseError::InvalidArgument {
                    line,
                    arg: count.to_string(),
                })?;
            Ok(vec![cmd; count])
        }
        _ => Err(CommandParseError::WrongArity {
            line,
            command: cmd.keyword(),
            found: args.len(),
        }),
    }
}

/// Parse a whole script, one command (with optional count) per line.
pub fn parse_script(script: &str) -> Result<Vec<Command>, CommandParseError> {
    let mut out = Vec::new();
    for (i, text) in script.lines().enumerate() {
        out.extend(parse_line(i + 1, text)?);
    }
    Ok(out)
}

impl FromStr for Command {
    type Err = CommandParseError;

    /// Parse exactly one command; counts are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cmds = parse_line(1, s)?;
        match cmds.as_slice() {
            [cmd] => Ok(*cmd),
            _ => Err(CommandParseError::InvalidArgument {
                line: 1,
                arg: s.trim().to_string(),
            }),
        }
    }
}
