//! # Clinical-Record Engine Runtime
//!
//! Process bootstrap for the entry engine.
//!
//! ## Startup sequence
//!
//! 1. Install the tracing subscriber (`CR_LOG_LEVEL`, `CR_JSON_LOGS`)
//! 2. Load [`EngineConfig`](cr_04_entry_service::EngineConfig) from `CR_*` variables
//! 3. Refuse a password-derived key in production
//! 4. Resolve the codec key and self-check it
//! 5. Build the registry from the built-in module table (chain continuity check)
//! 6. Wire the in-memory adapters behind the entry service
//!
//! The engine exposes no network surface of its own; a host embeds
//! [`EngineContainer`] and drives the inbound ports.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod container;
pub mod telemetry;

pub use container::{BootstrapError, ConcreteEntryService, EngineContainer};
pub use telemetry::{init_tracing, TelemetryConfig, TelemetryError};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
