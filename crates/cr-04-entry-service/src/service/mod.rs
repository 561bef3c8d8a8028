//! # Entry Service
//!
//! Orchestrates gate, registry, codec, store and audit for every entry and
//! catalog operation.
//!
//! ## Unit of work
//!
//! Each mutation is computed completely in memory (gate checks, validation,
//! migration, sealing, audit record), then handed to the store as one
//! `atomic_batch_write` containing both the row change and its audit record.
//! Nothing is written before the batch; a refused audit append leaves the
//! store untouched.
//!
//! ## Submodules
//!
//! - `entries`: create, read, update, upgrade, delete, restore, bulk
//! - `queries`: listing, statistics, available modules
//! - `catalog`: administrative module catalog
//! - `api`: port implementations and failure logging

mod api;
mod catalog;
mod entries;
mod queries;

use crate::config::EngineConfig;
use crate::domain::{EntryError, StoredEntry};
use crate::ports::{BatchOperation, EntryStore, TimeSource};
use cr_01_schema_registry::SchemaRegistryApi;
use cr_02_access_gate::AccessGateApi;
use cr_03_audit_trail::{AuditContext, AuditRecorder, AuditTrailApi};
use serde_json::Value;
use shared_crypto::{payload_signature, verify_payload_signature, FieldCodec};
use shared_types::{Action, Actor, EntryId, Payload, RequestContext, SchemaVersion};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Dependencies for [`EntryService`].
pub struct EntryServiceDependencies<R, S, G, A, T>
where
    R: SchemaRegistryApi,
    S: EntryStore,
    G: AccessGateApi,
    A: AuditTrailApi,
    T: TimeSource,
{
    /// Schema registry.
    pub registry: Arc<R>,
    /// Entry, catalog and audit persistence.
    pub store: Arc<S>,
    /// RBAC gate.
    pub gate: G,
    /// Audit query side.
    pub audit: A,
    /// Clock.
    pub time_source: T,
    /// Field codec holding the process-wide key.
    pub codec: FieldCodec,
}

/// The entry engine.
pub struct EntryService<R, S, G, A, T>
where
    R: SchemaRegistryApi,
    S: EntryStore,
    G: AccessGateApi,
    A: AuditTrailApi,
    T: TimeSource,
{
    registry: Arc<R>,
    store: Arc<S>,
    gate: G,
    audit: A,
    time_source: T,
    codec: FieldCodec,
    recorder: AuditRecorder,
    config: EngineConfig,
}

impl<R, S, G, A, T> EntryService<R, S, G, A, T>
where
    R: SchemaRegistryApi,
    S: EntryStore,
    G: AccessGateApi,
    A: AuditTrailApi,
    T: TimeSource,
{
    /// Create the service.
    pub fn new(deps: EntryServiceDependencies<R, S, G, A, T>, config: EngineConfig) -> Self {
        Self {
            registry: deps.registry,
            store: deps.store,
            gate: deps.gate,
            audit: deps.audit,
            time_source: deps.time_source,
            codec: deps.codec,
            recorder: AuditRecorder::new(),
            config,
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The registry in use.
    pub fn registry(&self) -> &Arc<R> {
        &self.registry
    }

    /// The store in use.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    fn audit_context(&self, actor: &Actor, request: &RequestContext) -> AuditContext {
        AuditContext::new(actor, request, self.time_source.now())
    }

    async fn commit(&self, operations: Vec<BatchOperation>) -> Result<(), EntryError> {
        let labels: Vec<&str> = operations.iter().map(BatchOperation::label).collect();
        debug!("[cr-04] Committing batch [{}]", labels.join(", "));
        self.store.atomic_batch_write(operations).await?;
        Ok(())
    }

    async fn load_entry(&self, id: EntryId) -> Result<StoredEntry, EntryError> {
        self.store
            .get_entry(id)
            .await?
            .ok_or_else(|| EntryError::NotFound("entry".into()))
    }

    /// Dossier check, then module check.
    async fn authorize_entry(
        &self,
        actor: &Actor,
        entry: &StoredEntry,
        action: Action,
    ) -> Result<(), EntryError> {
        self.gate.authorize_dossier(actor, entry.dossier_id, action).await?;
        self.gate.authorize_module(actor, &entry.module_code, action).await?;
        Ok(())
    }

    /// Requested version, or the latest one when absent.
    fn resolve_version(
        &self,
        code: &str,
        requested: Option<SchemaVersion>,
    ) -> Result<SchemaVersion, EntryError> {
        match requested {
            Some(version) if self.registry.resolve(code, version).is_some() => Ok(version),
            Some(version) => Err(EntryError::UnknownSchema(format!("{} v{}", code, version))),
            None => self
                .registry
                .latest_version(code)
                .ok_or_else(|| EntryError::UnknownSchema(code.to_string())),
        }
    }

    fn validate(
        &self,
        code: &str,
        version: SchemaVersion,
        raw: &Value,
    ) -> Result<Payload, EntryError> {
        let payload = self.registry.validate(code, version, raw)?;
        debug!("[cr-04] Payload valid for {} v{}", code, version);
        Ok(payload)
    }

    /// Sealed text and integrity signature of a plaintext payload.
    fn seal(&self, payload: &Payload) -> Result<(String, String), EntryError> {
        let sealed = self
            .codec
            .seal_payload(payload)
            .map_err(|e| EntryError::EncryptionFailure(e.to_string()))?;
        Ok((sealed.into_string(), payload_signature(payload)))
    }

    /// Open the stored payload and check its signature.
    ///
    /// A signature mismatch is logged, not enforced; the flag is returned.
    fn open_entry(&self, entry: &StoredEntry) -> Result<(Payload, bool), EntryError> {
        let payload = self.codec.open_payload(&entry.sealed()).map_err(|e| {
            error!(
                entry_id = %entry.id,
                module = %entry.module_code,
                "[cr-04] Stored payload cannot be decrypted: {}",
                e
            );
            EntryError::DecryptionFailure { entry_id: entry.id }
        })?;

        let verified = verify_payload_signature(&payload, &entry.signature);
        if !verified {
            warn!(entry_id = %entry.id, "[cr-04] Integrity signature mismatch");
        }
        Ok((payload, verified))
    }
}
