//! Configuration loading and representation.

use serde::{Deserialize, Serialize};

use stockline_inventory::DEFAULT_WINDOW_DAYS;

pub const WINDOW_DAYS_ENV: &str = "STOCKLINE_WINDOW_DAYS";
pub const SYNTHETIC_SEED_ENV: &str = "STOCKLINE_SYNTHETIC_SEED";

/// Trajectory refresh settings.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrajectoryConfig {
    /// Trailing window length. Non-positive values are kept and rejected at
    /// refresh time with `InvalidWindow`.
    pub window_days: i64,
    /// Seed for the synthetic generator; entropy-seeded when absent.
    pub seed: Option<u64>,
}

impl Default for TrajectoryConfig {
    fn default() -> Self {
        Self {
            window_days: DEFAULT_WINDOW_DAYS,
            seed: None,
        }
    }
}

impl TrajectoryConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup. Unparsable values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let window_days = match lookup(WINDOW_DAYS_ENV) {
            Some(raw) => raw.trim().parse::<i64>().unwrap_or_else(|_| {
                tracing::warn!(var = WINDOW_DAYS_ENV, value = %raw, "not an integer; using default window");
                defaults.window_days
            }),
            None => defaults.window_days,
        };

        let seed = lookup(SYNTHETIC_SEED_ENV).and_then(|raw| match raw.trim().parse::<u64>() {
            Ok(seed) => Some(seed),
            Err(_) => {
                tracing::warn!(var = SYNTHETIC_SEED_ENV, value = %raw, "not a u64 seed; using entropy");
                None
            }
        });

        Self { window_days, seed }
    }

    pub fn with_window_days(mut self, window_days: i64) -> Self {
        self.window_days = window_days;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
