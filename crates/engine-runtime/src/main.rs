//! Engine runtime binary.

use anyhow::{Context, Result};
use tracing::info;

use cr_04_entry_service::EngineConfig;
use engine_runtime::{init_tracing, EngineContainer, TelemetryConfig, VERSION};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing(&TelemetryConfig::from_env()).context("initializing tracing")?;

    let config = EngineConfig::from_env().context("reading CR_* configuration")?;
    info!("===========================================");
    info!("  Clinical-Record Engine v{}", VERSION);
    info!("  Environment: {}", config.environment);
    info!(
        "  Key source: {}",
        if config.key_source.is_password_derived() {
            "password-derived"
        } else {
            "explicit"
        }
    );
    info!("===========================================");

    let container = EngineContainer::new(config).context("wiring the engine")?;
    info!(
        "[runtime] Engine ready: {} audit record(s), {} entr(y/ies)",
        container.ledger.len(),
        container.store.entry_count()
    );

    info!("Engine is running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c()
        .await
        .context("waiting for shutdown signal")?;

    info!(
        "[runtime] Shutting down with {} audit record(s) written",
        container.ledger.len()
    );
    Ok(())
}
