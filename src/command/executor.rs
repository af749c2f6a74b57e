//! Command Executor
//!
//! Maps parsed commands onto store calls and renders the result as text.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::command::{parse, Command};
use crate::error::Result;
use crate::store::Store;

/// Result of executing one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Text to show the user
    Reply(String),
    /// The session should end
    Exit,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Reply(text) => f.write_str(text),
            Outcome::Exit => f.write_str("EXIT"),
        }
    }
}

/// Runs commands against a shared string store.
#[derive(Debug, Clone)]
pub struct CommandExecutor {
    store: Arc<Store<String>>,
}

impl CommandExecutor {
    pub fn new(store: Arc<Store<String>>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<Store<String>> {
        &self.store
    }

    /// Executes `command`, turning store errors into an `Error: ...` reply.
    pub fn execute(&self, command: &Command) -> Outcome {
        render(self.try_execute(command))
    }

    /// Parses and executes one line of input. Parse and store errors both
    /// become an `Error: ...` reply.
    pub fn execute_line(&self, line: &str) -> Outcome {
        render(self.try_execute_line(line))
    }

    pub fn try_execute_line(&self, line: &str) -> Result<Outcome> {
        let command = parse(line)?;
        self.try_execute(&command)
    }

    pub fn try_execute(&self, command: &Command) -> Result<Outcome> {
        debug!("Executing {}", command);
        let reply = match command {
            Command::Put {
                key,
                value,
                ttl: Some(ttl),
            } => {
                self.store.put_with_ttl(*key, value.clone(), *ttl)?;
                format!("OK (with TTL: {}ms)", ttl)
            }
            Command::Put {
                key,
                value,
                ttl: None,
            } => {
                self.store.put(*key, value.clone())?;
                "OK".to_string()
            }
            Command::Get { key } => self.store.get(*key).unwrap_or_else(|| "NULL".to_string()),
            Command::Delete { key } => {
                self.store.delete(*key)?;
                "OK".to_string()
            }
            Command::Stop => {
                self.store.stop();
                "Database stopped".to_string()
            }
            Command::Start => {
                self.store.start();
                "Database started".to_string()
            }
            Command::Size => self.store.size().to_string(),
            Command::Stats => serde_json::to_string(&self.store.stats())?,
            Command::Exit => return Ok(Outcome::Exit),
        };
        Ok(Outcome::Reply(reply))
    }
}

fn render(result: Result<Outcome>) -> Outcome {
    result.unwrap_or_else(|err| Outcome::Reply(format!("Error: {}", err)))
}
