//! Configuration Module
//!
//! Handles loading runtime configuration from environment variables.

use std::env;
use std::time::Duration;

/// Runtime configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Sweeper interval in milliseconds
    pub sweep_interval_ms: u64,
    /// Stop the sweeper for good the first time the store is stopped
    pub halt_sweeper_on_stop: bool,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SWEEP_INTERVAL_MS` - Sweep frequency in milliseconds (default: 1000)
    /// - `HALT_SWEEPER_ON_STOP` - `true`/`1` to couple the sweeper to the store lifecycle (default: false)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            sweep_interval_ms: env::var("SWEEP_INTERVAL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|ms| *ms > 0)
                .unwrap_or(defaults.sweep_interval_ms),
            halt_sweeper_on_stop: env::var("HALT_SWEEPER_ON_STOP")
                .ok()
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.halt_sweeper_on_stop),
        }
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_millis(self.sweep_interval_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sweep_interval_ms: 1000,
            halt_sweeper_on_stop: false,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
