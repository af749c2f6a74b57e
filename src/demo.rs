//! Multi-Threaded Demo
//!
//! Drives one shared store from several blocking workers through the command
//! layer while a sweeper runs, then walks through STOP/START and TTL expiry.
//! Every reply is handed to a sink as a transcript line.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;

use crate::command::CommandExecutor;
use crate::error::Result;
use crate::store::{Key, Store};
use crate::tasks::spawn_sweeper;

/// Receives transcript lines. Shared by all workers.
pub type Sink = Arc<dyn Fn(String) + Send + Sync>;

/// Demo parameters.
#[derive(Debug, Clone)]
pub struct DemoConfig {
    /// Number of concurrent workers
    pub threads: usize,
    /// Random commands issued by each worker
    pub ops_per_thread: usize,
    /// Keys are drawn from `0..key_space`
    pub key_space: Key,
    /// Upper bound of the random pause after each command
    pub max_pause: Duration,
    /// Sweeper interval
    pub sweep_interval: Duration,
    /// TTL of the entry used in the expiry walkthrough
    pub expiry_ttl: Duration,
    /// How long to wait before reading that entry again
    pub expiry_wait: Duration,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            threads: 5,
            ops_per_thread: 20,
            key_space: 100,
            max_pause: Duration::from_millis(100),
            sweep_interval: Duration::from_millis(500),
            expiry_ttl: Duration::from_millis(2000),
            expiry_wait: Duration::from_millis(3000),
        }
    }
}

/// Key outside any worker's range, used by the STOP/START walkthrough.
const LIFECYCLE_KEY: Key = 999;
/// Key used by the expiry walkthrough.
const EXPIRY_KEY: Key = 1000;

// == Worker ==
/// Issues `ops_per_thread` random PUT, PUT-with-TTL, GET and DELETE commands,
/// sending one `[Thread-id] ...` line per command to `sink`.
pub fn run_worker<R, F>(
    executor: &CommandExecutor,
    id: usize,
    config: &DemoConfig,
    rng: &mut R,
    mut sink: F,
) where
    R: Rng,
    F: FnMut(String),
{
    let max_pause_ms = config.max_pause.as_millis() as u64;

    for op in 0..config.ops_per_thread {
        let key = rng.gen_range(0..config.key_space);

        let line = match rng.gen_range(0..4) {
            0 => {
                let reply = executor.execute_line(&format!("PUT {} value_{}_{}", key, id, op));
                format!("[Thread-{}] PUT {} -> {}", id, key, reply)
            }
            1 => {
                let ttl: u64 = rng.gen_range(2000..5000);
                let reply =
                    executor.execute_line(&format!("PUT {} ttl_{}_{} {}", key, id, op, ttl));
                format!("[Thread-{}] PUT {} (TTL={}) -> {}", id, key, ttl, reply)
            }
            2 => {
                let reply = executor.execute_line(&format!("GET {}", key));
                format!("[Thread-{}] GET {} -> {}", id, key, reply)
            }
            _ => {
                let reply = executor.execute_line(&format!("DELETE {}", key));
                format!("[Thread-{}] DELETE {} -> {}", id, key, reply)
            }
        };
        sink(line);

        if max_pause_ms > 0 {
            std::thread::sleep(Duration::from_millis(rng.gen_range(0..max_pause_ms)));
        }
    }
}

// == Run Demo ==
/// Runs the whole demo against a fresh store and returns its final size.
///
/// Workers run on the blocking pool and share one executor; a sweeper runs on
/// `sweep_interval` for the whole demo and is shut down before returning.
pub async fn run_demo(config: &DemoConfig, sink: Sink) -> Result<usize> {
    let store = Arc::new(Store::new());
    let executor = CommandExecutor::new(Arc::clone(&store));
    let (sweeper, sweeper_handle) = spawn_sweeper(&store, config.sweep_interval);

    sink(format!("Threads: {}", config.threads));
    sink(format!("Operations per thread: {}", config.ops_per_thread));

    let workers: Vec<_> = (0..config.threads)
        .map(|id| {
            let executor = executor.clone();
            let config = config.clone();
            let sink = Arc::clone(&sink);
            tokio::task::spawn_blocking(move || {
                let mut rng = rand::thread_rng();
                run_worker(&executor, id, &config, &mut rng, |line| sink(line));
            })
        })
        .collect();

    for worker in workers {
        worker.await?;
    }

    sink("Testing STOP/START commands...".to_string());
    let put_lifecycle = format!("PUT {} test", LIFECYCLE_KEY);
    for line in ["STOP", put_lifecycle.as_str(), "START", put_lifecycle.as_str()] {
        sink(format!("{} -> {}", line, executor.execute_line(line)));
    }

    sink("Testing TTL expiration...".to_string());
    let ttl_ms = config.expiry_ttl.as_millis();
    let put_expiring = format!("PUT {} shortlived {}", EXPIRY_KEY, ttl_ms);
    sink(format!("{} -> {}", put_expiring, executor.execute_line(&put_expiring)));

    let get_expiring = format!("GET {}", EXPIRY_KEY);
    sink(format!(
        "{} (immediate) -> {}",
        get_expiring,
        executor.execute_line(&get_expiring)
    ));
    tokio::time::sleep(config.expiry_wait).await;
    sink(format!(
        "{} (after {}ms) -> {}",
        get_expiring,
        config.expiry_wait.as_millis(),
        executor.execute_line(&get_expiring)
    ));

    let size = store.size();
    sink(format!("Final database size: {}", size));

    sweeper.shutdown();
    sweeper_handle.await?;

    Ok(size)
}
