//! # Engine Container
//!
//! Builds every subsystem with its in-memory adapters and hands them to the
//! entry service.
//!
//! ## Initialization order
//!
//! ```text
//! EngineConfig ─▶ FieldCodec (key resolve + self-check) ─▶ SchemaRegistry (chain check)
//!      ─▶ audit ledger ─▶ entry store ─▶ directory + gate ─▶ EntryService
//! ```

use std::sync::Arc;

use cr_01_schema_registry::{builtin_registry, RegistryError, SchemaRegistry, SchemaRegistryApi};
use cr_02_access_gate::{AccessGate, InMemoryDirectory};
use cr_03_audit_trail::{AuditTrail, InMemoryAuditLedger};
use cr_04_entry_service::{
    ConfigError, EngineConfig, EntryService, EntryServiceDependencies, InMemoryEntryStore,
    SystemTimeSource,
};
use serde_json::json;
use shared_crypto::{CryptoError, FieldCodec};
use thiserror::Error;
use tracing::info;

/// Entry service over the in-memory adapters.
pub type ConcreteEntryService = EntryService<
    SchemaRegistry,
    InMemoryEntryStore,
    AccessGate<InMemoryDirectory>,
    AuditTrail<InMemoryAuditLedger>,
    SystemTimeSource,
>;

/// Start-up failures.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Environment configuration rejected.
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    /// Key could not be resolved or failed its self-check.
    #[error("encryption key: {0}")]
    Key(#[from] CryptoError),

    /// The module table is inconsistent.
    #[error("module table: {0}")]
    Registry(#[from] RegistryError),
}

/// Everything the process needs, wired once at start-up.
pub struct EngineContainer {
    /// The entry engine.
    pub service: Arc<ConcreteEntryService>,
    /// Users, roles, dossiers and units; populated by the host.
    pub directory: Arc<InMemoryDirectory>,
    /// Append-only audit ledger.
    pub ledger: Arc<InMemoryAuditLedger>,
    /// Entry and catalog rows.
    pub store: Arc<InMemoryEntryStore>,
}

impl EngineContainer {
    /// Wire the engine with the built-in module table.
    pub fn new(config: EngineConfig) -> Result<Self, BootstrapError> {
        Self::with_registry(config, builtin_registry()?)
    }

    /// Wire the engine around a given registry.
    pub fn with_registry(
        config: EngineConfig,
        registry: SchemaRegistry,
    ) -> Result<Self, BootstrapError> {
        config.validate_for_production()?;

        let codec = FieldCodec::from_source(&config.key_source)?;
        self_check_codec(&codec)?;

        info!(
            environment = %config.environment,
            modules = registry.codes().len(),
            "[runtime] Module table loaded"
        );
        for code in registry.codes() {
            info!(
                "[runtime]   {} versions {:?}",
                code,
                registry.versions(&code)
            );
        }

        let ledger = Arc::new(InMemoryAuditLedger::new());
        let store = Arc::new(InMemoryEntryStore::new(ledger.clone()));
        let directory = Arc::new(InMemoryDirectory::new());

        let service = EntryService::new(
            EntryServiceDependencies {
                registry: Arc::new(registry),
                store: store.clone(),
                gate: AccessGate::new(directory.clone()),
                audit: AuditTrail::new(ledger.clone()),
                time_source: SystemTimeSource,
                codec,
            },
            config,
        );

        Ok(Self {
            service: Arc::new(service),
            directory,
            ledger,
            store,
        })
    }
}

/// Seal and reopen a throwaway value so a bad key fails start-up, not the first write.
fn self_check_codec(codec: &FieldCodec) -> Result<(), CryptoError> {
    let sample = json!({"self_check": true});
    let sealed = codec.seal(&sample)?;
    if codec.open(&sealed)? != sample {
        return Err(CryptoError::DecryptionFailed(
            "codec self-check did not round-trip".into(),
        ));
    }
    Ok(())
}
