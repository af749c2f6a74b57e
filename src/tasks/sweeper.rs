//! TTL Sweeper Task
//!
//! Background task that periodically purges expired entries from a store.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::store::Store;

/// Lifecycle of a [`Sweeper`]. `Stopped` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweeperState {
    Active,
    Stopped,
}

// == Sweeper ==
/// Periodically calls [`Store::purge_expired`] until shut down.
///
/// The sweeper only holds a weak reference to the store, so it does not keep
/// the store alive; once the store is dropped the loop ends. The store lock
/// is taken for the purge alone and is never held across the sleep.
///
/// By default the sweeper's lifecycle is independent of the store's running
/// flag. With [`Sweeper::halt_on_store_stop`] enabled, the loop stops for good
/// as soon as it sees the store stopped, and a later [`Store::start`] does not
/// bring it back.
#[derive(Debug)]
pub struct Sweeper<T> {
    store: Weak<Store<T>>,
    interval: Duration,
    halt_on_store_stop: bool,
    active: AtomicBool,
    shutdown_tx: watch::Sender<bool>,
}

impl<T> Sweeper<T> {
    /// Creates an active sweeper for `store` that runs every `interval`.
    pub fn new(store: &Arc<Store<T>>, interval: Duration) -> Self {
        let (shutdown_tx, _) = watch::channel(false);
        Self {
            store: Arc::downgrade(store),
            interval,
            halt_on_store_stop: false,
            active: AtomicBool::new(true),
            shutdown_tx,
        }
    }

    /// Ties the sweeper's lifetime to the store's running flag.
    pub fn halt_on_store_stop(mut self, halt: bool) -> Self {
        self.halt_on_store_stop = halt;
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn state(&self) -> SweeperState {
        if self.is_active() {
            SweeperState::Active
        } else {
            SweeperState::Stopped
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    // == Shutdown ==
    /// Moves the sweeper to `Stopped`, waking it if it is asleep.
    ///
    /// Safe to call from any thread, any number of times.
    pub fn shutdown(&self) {
        if self.active.swap(false, Ordering::AcqRel) {
            debug!("Sweeper shutdown requested");
        }
        self.shutdown_tx.send_replace(true);
    }

    // == Run ==
    /// Runs the sweep loop until the sweeper is stopped.
    ///
    /// Each iteration purges first, then sleeps for the interval. Returns
    /// immediately if the sweeper is already stopped.
    pub async fn run(&self) {
        let mut shutdown_rx = self.shutdown_tx.subscribe();

        if self.is_active() {
            info!("Starting sweeper with interval of {:?}", self.interval);
        }

        while self.is_active() {
            let removed = {
                let Some(store) = self.store.upgrade() else {
                    info!("Store dropped, sweeper exiting");
                    break;
                };
                if self.halt_on_store_stop && !store.is_running() {
                    info!("Store stopped, sweeper halting");
                    break;
                }
                store.purge_expired()
            };

            if removed > 0 {
                info!("TTL sweep: removed {} expired entries", removed);
            } else {
                debug!("TTL sweep: no expired entries found");
            }

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                changed = shutdown_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
            }
        }

        self.active.store(false, Ordering::Release);
        info!("Sweeper stopped");
    }
}

impl<T: Send + 'static> Sweeper<T> {
    /// Spawns [`Sweeper::run`] on the current tokio runtime.
    ///
    /// Returns the shared sweeper, for calling `shutdown`, and the task handle.
    pub fn spawn(self) -> (Arc<Self>, JoinHandle<()>) {
        let sweeper = Arc::new(self);
        let task = Arc::clone(&sweeper);
        let handle = tokio::spawn(async move { task.run().await });
        (sweeper, handle)
    }
}

/// Spawns a background sweeper for `store` with the default, store-independent
/// lifecycle.
///
/// # Example
/// ```ignore
/// let store = Arc::new(Store::new());
/// let (sweeper, handle) = spawn_sweeper(&store, Duration::from_secs(1));
/// // Later, during shutdown:
/// sweeper.shutdown();
/// handle.await?;
/// ```
pub fn spawn_sweeper<T: Send + 'static>(
    store: &Arc<Store<T>>,
    interval: Duration,
) -> (Arc<Sweeper<T>>, JoinHandle<()>) {
    Sweeper::new(store, interval).spawn()
}
