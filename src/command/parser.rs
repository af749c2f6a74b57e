//! Command Parser
//!
//! Turns one line of text into a typed [`Command`].

use std::fmt;

use crate::error::CommandError;
use crate::store::Key;

/// A parsed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `PUT key value [ttl_ms]`
    Put {
        key: Key,
        value: String,
        ttl: Option<u64>,
    },
    /// `GET key`
    Get { key: Key },
    /// `DELETE key`
    Delete { key: Key },
    Stop,
    Start,
    Size,
    Stats,
    Exit,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Put {
                key,
                value,
                ttl: Some(ttl),
            } => write!(f, "PUT {} {} {}", key, value, ttl),
            Command::Put {
                key,
                value,
                ttl: None,
            } => write!(f, "PUT {} {}", key, value),
            Command::Get { key } => write!(f, "GET {}", key),
            Command::Delete { key } => write!(f, "DELETE {}", key),
            Command::Stop => f.write_str("STOP"),
            Command::Start => f.write_str("START"),
            Command::Size => f.write_str("SIZE"),
            Command::Stats => f.write_str("STATS"),
            Command::Exit => f.write_str("EXIT"),
        }
    }
}

// == Parse ==
/// Parses a line such as `PUT 1 hello 5000`.
///
/// Tokens are whitespace separated and the command name is case-insensitive.
/// Key and TTL are validated here; the store trusts what it is given.
pub fn parse(input: &str) -> Result<Command, CommandError> {
    let tokens: Vec<&str> = input.split_whitespace().collect();
    let Some(name) = tokens.first() else {
        return Err(invalid("Command cannot be empty"));
    };

    match name.to_ascii_uppercase().as_str() {
        "PUT" => parse_put(&tokens),
        "GET" => {
            let key = parse_single_key(&tokens, "GET")?;
            Ok(Command::Get { key })
        }
        "DELETE" => {
            let key = parse_single_key(&tokens, "DELETE")?;
            Ok(Command::Delete { key })
        }
        // Trailing tokens are ignored for argument-less commands
        "STOP" => Ok(Command::Stop),
        "START" => Ok(Command::Start),
        "SIZE" => Ok(Command::Size),
        "STATS" => Ok(Command::Stats),
        "EXIT" => Ok(Command::Exit),
        other => Err(invalid(format!("Invalid command: {}", other))),
    }
}

fn parse_put(tokens: &[&str]) -> Result<Command, CommandError> {
    match tokens {
        [_, key, value] => Ok(Command::Put {
            key: parse_key(key)?,
            value: value.to_string(),
            ttl: None,
        }),
        [_, key, value, ttl] => Ok(Command::Put {
            key: parse_key(key)?,
            value: value.to_string(),
            ttl: Some(parse_ttl(ttl)?),
        }),
        _ if tokens.len() < 3 => Err(invalid("PUT requires at least key and value")),
        _ => Err(invalid("PUT accepts only key, value, and optional TTL")),
    }
}

fn parse_single_key(tokens: &[&str], name: &str) -> Result<Key, CommandError> {
    match tokens {
        [_, key] => parse_key(key),
        _ => Err(invalid(format!("{} requires exactly one key", name))),
    }
}

fn parse_key(token: &str) -> Result<Key, CommandError> {
    token
        .parse()
        .map_err(|_| invalid(format!("Key must be an integer: {}", token)))
}

fn parse_ttl(token: &str) -> Result<u64, CommandError> {
    let ttl: i64 = token
        .parse()
        .map_err(|_| CommandError::InvalidTtl(format!("TTL must be a valid number: {}", token)))?;

    if ttl <= 0 {
        return Err(CommandError::InvalidTtl(format!(
            "TTL must be positive: {}",
            ttl
        )));
    }
    Ok(ttl as u64)
}

fn invalid(message: impl Into<String>) -> CommandError {
    CommandError::InvalidCommand(message.into())
}
