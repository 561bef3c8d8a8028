//! # Telemetry
//!
//! Tracing subscriber setup from environment variables.
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `CR_LOG_LEVEL` | `EnvFilter` directive | `RUST_LOG`, then `info` |
//! | `CR_JSON_LOGS` | JSON lines instead of the pretty format | `false` |

use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Log output configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Filter directive (`info`, `cr_04_entry_service=debug,info`, ...).
    pub log_level: String,
    /// Emit JSON lines.
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

impl TelemetryConfig {
    /// Read the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            log_level: lookup("CR_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .filter(|level| !level.trim().is_empty())
                .unwrap_or(defaults.log_level),
            json_logs: lookup("CR_JSON_LOGS")
                .map(|raw| parse_flag(&raw))
                .unwrap_or(defaults.json_logs),
        }
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Telemetry setup failures.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The filter directive did not parse.
    #[error("invalid log filter '{directive}': {reason}")]
    InvalidFilter {
        /// Rejected directive.
        directive: String,
        /// Parser message.
        reason: String,
    },

    /// A global subscriber is already installed.
    #[error("subscriber init failed: {0}")]
    SubscriberInit(String),
}

/// Install the global subscriber.
pub fn init_tracing(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter =
        EnvFilter::try_new(&config.log_level).map_err(|e| TelemetryError::InvalidFilter {
            directive: config.log_level.clone(),
            reason: e.to_string(),
        })?;

    let output = if config.json_logs {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(output)
        .try_init()
        .map_err(|e| TelemetryError::SubscriberInit(e.to_string()))?;

    tracing::info!(
        log_level = %config.log_level,
        json = config.json_logs,
        "[runtime] Tracing initialized"
    );
    Ok(())
}
