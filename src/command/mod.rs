//! Line commands and the session that runs them against a [`DB`](crate::DB).
//!
//! This layer owns all user-facing text: `NULL`, `TRANSACTION NOT FOUND`,
//! argument errors and help. The engine itself only returns values, counts
//! and [`Error`](crate::Error)s.

pub mod session;

use std::str::FromStr;

use thiserror::Error;

pub use session::Session;

/// Printed for `HELP` / `h`.
pub const HELP_TEXT: &str = "Valid operations are:\n\
SET [name] [value]\n\
GET [name]\n\
DELETE [name]\n\
COUNT [value]\n\
BEGIN\n\
ROLLBACK\n\
COMMIT\n\
END";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Set { name: String, value: String },
    Get { name: String },
    Delete { name: String },
    Count { value: String },
    Begin,
    Rollback,
    Commit,
    End,
}

/// Why a line could not be turned into a [`Command`].
///
/// `Display` is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty command")]
    Empty,
    #[error("{command} requires a valid {expected}.")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },
    #[error("{0} is not a recognized operation.")]
    Unrecognized(String),
}

impl FromStr for Command {
    type Err = ParseError;

    /// Keywords are case-sensitive. Tokens are split on any whitespace and
    /// surplus trailing tokens are ignored.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut args = line.split_whitespace();
        let keyword = args.next().ok_or(ParseError::Empty)?;

        let command = match keyword {
            "HELP" | "h" => Command::Help,
            "SET" => match (args.next(), args.next()) {
                (Some(name), Some(value)) => Command::Set {
                    name: name.to_owned(),
                    value: value.to_owned(),
                },
                _ => return Err(missing("SET", "name and value")),
            },
            "GET" => Command::Get {
                name: required(args.next(), "GET", "name")?,
            },
            "DELETE" => Command::Delete {
                name: required(args.next(), "DELETE", "name")?,
            },
            "COUNT" => Command::Count {
                value: required(args.next(), "COUNT", "value")?,
            },
            "BEGIN" => Command::Begin,
            "ROLLBACK" => Command::Rollback,
            "COMMIT" => Command::Commit,
            "END" => Command::End,
            other => return Err(ParseError::Unrecognized(other.to_owned())),
        };
        Ok(command)
    }
}

fn required(
    arg: Option<&str>,
    command: &'static str,
    expected: &'static str,
) -> Result<String, ParseError> {
    arg.map(str::to_owned)
        .ok_or_else(|| missing(command, expected))
}

fn missing(command: &'static str, expected: &'static str) -> ParseError {
    ParseError::MissingArgument { command, expected }
}
