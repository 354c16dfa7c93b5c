use tracing::debug;

use crate::command::{Command, HELP_TEXT, ParseError};
use crate::db::DB;
use crate::error::Error;

/// Response to `GET` on a name with no live record.
pub const NULL: &str = "NULL";

/// Response to `ROLLBACK` with no transaction open.
pub const TRANSACTION_NOT_FOUND: &str = "TRANSACTION NOT FOUND";

/// Drives one [`DB`] from text lines.
///
/// Each line produces `Some(response)`; an empty response means "nothing to
/// print". `END` produces `None` and the caller should stop reading.
pub struct Session {
    db: DB,
}

impl Session {
    pub fn new() -> Self {
        Self::with_db(DB::new())
    }

    pub fn with_db(db: DB) -> Self {
        Session { db }
    }

    pub fn db(&self) -> &DB {
        &self.db
    }

    pub fn into_db(self) -> DB {
        self.db
    }

    /// Parse and run one line.
    pub fn execute(&mut self, line: &str) -> Option<String> {
        match line.parse::<Command>() {
            Ok(command) => self.apply(command),
            Err(ParseError::Empty) => Some(String::new()),
            Err(e) => {
                debug!(target: "txkv::session", error = %e, "rejected line");
                Some(e.to_string())
            }
        }
    }

    /// Run an already-parsed command.
    pub fn apply(&mut self, command: Command) -> Option<String> {
        let response = match command {
            Command::Help => HELP_TEXT.to_owned(),
            Command::Set { name, value } => match self.db.set(&name, &value) {
                Ok(_) => String::new(),
                Err(e) => failed(&e),
            },
            Command::Get { name } => self.db.get(&name).unwrap_or(NULL).to_owned(),
            Command::Delete { name } => {
                self.db.delete(&name);
                String::new()
            }
            Command::Count { value } => self.db.count(&value).to_string(),
            Command::Begin => match self.db.begin() {
                Ok(()) => String::new(),
                Err(e) => failed(&e),
            },
            Command::Rollback => match self.db.rollback() {
                Ok(()) => String::new(),
                Err(Error::NoActiveTransaction) => TRANSACTION_NOT_FOUND.to_owned(),
                Err(e) => failed(&e),
            },
            Command::Commit => {
                self.db.commit();
                String::new()
            }
            Command::End => return None,
        };
        Some(response)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

fn failed(error: &Error) -> String {
    format!("Operation failed. {error}")
}
