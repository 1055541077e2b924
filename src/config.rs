//! Configuration management

use anyhow::{Context, Result};

/// Planner configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Valhalla matrix provider URL (optional, falls back to haversine
    /// estimation when unset or unreachable)
    pub valhalla_url: Option<String>,

    /// Timeout for one matrix fetch, in seconds
    pub matrix_timeout_seconds: u64,

    /// Upper bound on stops accepted for exhaustive sequencing. The search
    /// is factorial in the stop count, so this stays small.
    pub max_sequenced_stops: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            valhalla_url: None,
            matrix_timeout_seconds: 30,
            max_sequenced_stops: 8,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let valhalla_url = std::env::var("VALHALLA_URL").ok();

        let matrix_timeout_seconds = match std::env::var("MATRIX_TIMEOUT_SECONDS") {
            Ok(raw) => raw
                .parse()
                .context("MATRIX_TIMEOUT_SECONDS must be a whole number of seconds")?,
            Err(_) => 30,
        };

        let max_sequenced_stops: usize = match std::env::var("MAX_SEQUENCED_STOPS") {
            Ok(raw) => raw
                .parse()
                .context("MAX_SEQUENCED_STOPS must be a whole number")?,
            Err(_) => 8,
        };

        if max_sequenced_stops == 0 {
            anyhow::bail!("MAX_SEQUENCED_STOPS must be at least 1");
        }
        if max_sequenced_stops > 10 {
            tracing::warn!(
                "MAX_SEQUENCED_STOPS={} makes the exhaustive search very expensive (n! orderings)",
                max_sequenced_stops
            );
        }

        Ok(Self {
            valhalla_url,
            matrix_timeout_seconds,
            max_sequenced_stops,
        })
    }
}
