//! Integration Tests for the Command Layer
//!
//! Drives the store through text commands, the way the interactive binary does.

use std::sync::Arc;
use std::time::Duration;

use ttl_kv::command::{parse, CommandExecutor, Outcome};
use ttl_kv::Error;
use ttl_kv::{CommandError, Store};

// == Helper Functions ==

fn create_executor() -> CommandExecutor {
    CommandExecutor::new(Arc::new(Store::new()))
}

/// Executes a line the way the binary does and returns the reply text.
fn send(executor: &CommandExecutor, line: &str) -> String {
    executor.execute_line(line).to_string()
}

#[test]
fn test_session_transcript() {
    let executor = create_executor();

    let transcript = [
        ("PUT 1 a", "OK"),
        ("GET 1", "a"),
        ("PUT 1 b", "OK"),
        ("GET 1", "b"),
        ("DELETE 1", "OK"),
        ("GET 1", "NULL"),
        ("DELETE 1", "Error: Key 1 not found"),
        ("STOP", "Database stopped"),
        ("STOP", "Database stopped"),
        ("PUT 2 x", "Error: Database is currently stopped"),
        ("GET 2", "NULL"),
        ("START", "Database started"),
        ("PUT 2 x", "OK"),
        ("SIZE", "1"),
        ("EXIT", "EXIT"),
    ];

    for (line, expected) in transcript {
        assert_eq!(send(&executor, line), expected, "line: {}", line);
    }
}

#[test]
fn test_parse_errors_are_rendered() {
    let executor = create_executor();

    assert_eq!(send(&executor, "JUMP"), "Error: Invalid command: JUMP");
    assert_eq!(send(&executor, "PUT x 1"), "Error: Key must be an integer: x");
    assert_eq!(send(&executor, "PUT 1 v 0"), "Error: TTL must be positive: 0");
    assert_eq!(
        send(&executor, "PUT 1 v later"),
        "Error: TTL must be a valid number: later"
    );

    // Nothing reached the store
    assert_eq!(executor.store().size(), 0);
}

#[test]
fn test_ttl_through_commands() {
    let executor = create_executor();

    assert_eq!(send(&executor, "PUT 5 temp 30"), "OK (with TTL: 30ms)");
    assert_eq!(send(&executor, "GET 5"), "temp");

    std::thread::sleep(Duration::from_millis(60));

    assert_eq!(send(&executor, "SIZE"), "1");
    assert_eq!(send(&executor, "GET 5"), "NULL");
    assert_eq!(send(&executor, "SIZE"), "0");
}

#[test]
fn test_stats_reports_lazy_eviction() {
    let executor = create_executor();

    send(&executor, "PUT 1 a 10");
    std::thread::sleep(Duration::from_millis(30));
    send(&executor, "GET 1");

    let json: serde_json::Value = serde_json::from_str(&send(&executor, "STATS")).unwrap();
    assert_eq!(json["lazy_evictions"], 1);
    assert_eq!(json["misses"], 1);
    assert_eq!(json["total_entries"], 0);
}

#[test]
fn test_huge_ttl_through_commands() {
    let executor = create_executor();

    assert_eq!(
        send(&executor, "PUT 1 a 9223372036854775807"),
        "OK (with TTL: 9223372036854775807ms)"
    );
    assert_eq!(send(&executor, "GET 1"), "a");
}

#[test]
fn test_exit_outcome() {
    let executor = create_executor();
    assert_eq!(executor.execute_line("exit"), Outcome::Exit);
    assert!(matches!(
        executor.try_execute_line("DELETE 1 2"),
        Err(Error::Command(_))
    ));
}

#[test]
fn test_parse_error_kinds() {
    assert!(matches!(parse(""), Err(CommandError::InvalidCommand(_))));
    assert!(matches!(parse("PUT 1 a -1"), Err(CommandError::InvalidTtl(_))));
}
