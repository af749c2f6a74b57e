//! ttl_kv - Interactive front end for the in-process TTL store
//!
//! Reads commands from stdin, runs them against one shared store, and keeps a
//! background sweeper purging expired entries.

use std::io::BufRead;
use std::sync::Arc;

use anyhow::Context;
use tokio::io::AsyncWriteExt;
use tokio::signal;
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ttl_kv::command::{CommandExecutor, Outcome};
use ttl_kv::{Config, Store, Sweeper};

/// Main entry point.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the store and start the background sweeper
/// 4. Run the command loop until EXIT, end of input, or a shutdown signal
/// 5. Shut the sweeper down and wait for it
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they don't interleave with replies.
    // Defaults to "warn", can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ttl_kv=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env();
    info!(
        "Configuration loaded: sweep_interval={}ms, halt_sweeper_on_stop={}",
        config.sweep_interval_ms, config.halt_sweeper_on_stop
    );

    let store = Arc::new(Store::new());
    let (sweeper, sweeper_handle) = Sweeper::new(&store, config.sweep_interval())
        .halt_on_store_stop(config.halt_sweeper_on_stop)
        .spawn();
    let executor = CommandExecutor::new(store);

    print_banner();

    let result = tokio::select! {
        result = command_loop(&executor) => result,
        _ = shutdown_signal() => Ok(()),
    };

    println!("Shutting down database...");
    sweeper.shutdown();
    sweeper_handle.await.context("sweeper task panicked")?;
    println!("Database shutdown complete.");

    result
}

fn print_banner() {
    println!("=================================================");
    println!("  In-Memory Database with TTL Support");
    println!("=================================================");
    println!("Commands: PUT, GET, DELETE, STOP, START, SIZE, STATS, EXIT");
    println!("=================================================\n");
}

/// Reads lines until EXIT or end of input, printing one reply per command.
async fn command_loop(executor: &CommandExecutor) -> anyhow::Result<()> {
    let mut lines = spawn_line_reader();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.recv().await else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let reply = match executor.execute_line(&line) {
            Outcome::Exit => break,
            Outcome::Reply(text) => text,
        };

        stdout.write_all(reply.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
    }

    Ok(())
}

/// Reads stdin on a dedicated thread so a pending read never holds up
/// runtime shutdown.
fn spawn_line_reader() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();

    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    warn!("Failed to read stdin: {}", err);
                    break;
                }
            }
        }
    });

    rx
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
