//! # Entry Flows
//!
//! The wired engine end to end: gate (cr-02) ─▶ registry (cr-01) ─▶ codec
//! (shared-crypto) ─▶ store + audit ledger (cr-03), observed only through the
//! public ports.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::{m1_registry, request, Clinic};
    use cr_03_audit_trail::{leaks_sensitive, EntityKind, MASK_TOKEN};
    use cr_04_entry_service::{
        AuditQueryApi, EntryApi, EntryError, EntryFilter, EntryUpdate, NewEntry, StoredEntry,
    };
    use serde_json::json;
    use shared_types::{Action, Payload};

    fn payload(value: serde_json::Value) -> Payload {
        value.as_object().cloned().unwrap()
    }

    fn clinic() -> Clinic {
        Clinic::with_registry(m1_registry(), &["M1"])
    }

    async fn entity_actions(clinic: &Clinic, id: &str) -> Vec<Action> {
        clinic
            .engine
            .service
            .audit_for_entity(&clinic.admin, EntityKind::ModuleEntries, id)
            .await
            .unwrap()
            .iter()
            .map(|record| record.action)
            .collect()
    }

    // =========================================================================
    // CREATE
    // =========================================================================

    #[tokio::test]
    async fn test_create_then_read_back() {
        let clinic = clinic();
        let service = &clinic.engine.service;

        let created = service
            .create_entry(
                &clinic.nurse,
                &request("POST /modules/entries"),
                NewEntry::new(clinic.dossier, "M1", json!({"a": 1})).with_version(1),
            )
            .await
            .unwrap();

        let read = service
            .get_entry(&clinic.nurse, &request("GET /modules/entries"), created.id, None)
            .await
            .unwrap();
        assert_eq!(read.payload, payload(json!({"a": 1})));
        assert!(read.integrity_verified);

        let records = service
            .audit_for_entity(&clinic.admin, EntityKind::ModuleEntries, &created.id.to_string())
            .await
            .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].action, Action::Create);
        assert_eq!(records[0].actor_id, clinic.nurse.id);
        assert_eq!(records[0].endpoint.as_deref(), Some("POST /modules/entries"));
        let after = records[0].after.as_ref().unwrap();
        assert_eq!(after["sealed_payload"], MASK_TOKEN);
        assert!(!leaks_sensitive::<StoredEntry>(after));
        assert_eq!(records[1].action, Action::Read);
        assert!(records[1].before.is_none() && records[1].after.is_none());
    }

    #[tokio::test]
    async fn test_unexpected_field_writes_nothing() {
        let clinic = clinic();
        let err = clinic
            .engine
            .service
            .create_entry(
                &clinic.nurse,
                &request("POST /modules/entries"),
                NewEntry::new(clinic.dossier, "M1", json!({"a": 1, "b": 2})).with_version(1),
            )
            .await
            .unwrap_err();

        match err {
            EntryError::SchemaViolation(violation) => {
                assert!(violation.mentions("b"));
                assert!(!violation.mentions("a"));
            }
            other => panic!("expected SchemaViolation, got {:?}", other),
        }
        assert_eq!(clinic.engine.store.entry_count(), 0);
        assert!(clinic.engine.ledger.is_empty());
    }

    // =========================================================================
    // UPGRADE
    // =========================================================================

    #[tokio::test]
    async fn test_upgrade_runs_chain_and_audits_update() {
        let clinic = clinic();
        let service = &clinic.engine.service;
        let created = service
            .create_entry(
                &clinic.nurse,
                &request("POST /modules/entries"),
                NewEntry::new(clinic.dossier, "M1", json!({"a": 1})).with_version(1),
            )
            .await
            .unwrap();

        let rejected = service
            .upgrade_entry_version(&clinic.nurse, &request("POST /upgrade"), created.id, 1)
            .await
            .unwrap_err();
        assert!(matches!(rejected, EntryError::InvalidRequest(_)));
        assert_eq!(clinic.engine.ledger.len(), 1);

        let upgraded = service
            .upgrade_entry_version(&clinic.nurse, &request("POST /upgrade"), created.id, 2)
            .await
            .unwrap();
        assert_eq!(upgraded.schema_version, 2);
        assert_eq!(upgraded.payload, payload(json!({"a": 1, "c": "x"})));

        let id = created.id.to_string();
        assert_eq!(
            entity_actions(&clinic, &id).await,
            vec![Action::Create, Action::Update]
        );
    }

    // =========================================================================
    // ISOLATION
    // =========================================================================

    #[tokio::test]
    async fn test_foreign_unit_dossier_is_never_returned() {
        let clinic = clinic();
        let service = &clinic.engine.service;
        let foreign = service
            .create_entry(
                &clinic.admin,
                &request("POST /modules/entries"),
                NewEntry::new(clinic.foreign_dossier, "M1", json!({"a": 99})).with_version(1),
            )
            .await
            .unwrap();

        let err = service
            .get_entry(&clinic.nurse, &request("GET /modules/entries"), foreign.id, None)
            .await
            .unwrap_err();
        assert!(matches!(err, EntryError::Forbidden(_)));
        assert!(!err.to_string().contains("99"));
        assert!(!err.to_string().contains(&clinic.foreign_dossier.to_string()));

        let page = service
            .list_entries(&clinic.nurse, &request("GET /modules/entries"), EntryFilter::default())
            .await
            .unwrap();
        assert_eq!(page.total, 0);
        assert!(page.items.is_empty());

        let filtered = service
            .list_entries(
                &clinic.nurse,
                &request("GET /modules/entries"),
                EntryFilter {
                    dossier_id: Some(clinic.foreign_dossier),
                    ..EntryFilter::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(filtered, EntryError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_granting_module_flips_forbidden() {
        let clinic = Clinic::with_registry(m1_registry(), &[]);
        let service = &clinic.engine.service;
        let entry = || NewEntry::new(clinic.dossier, "M1", json!({"a": 5})).with_version(1);

        let err = service
            .create_entry(&clinic.nurse, &request("POST /modules/entries"), entry())
            .await
            .unwrap_err();
        assert!(matches!(err, EntryError::Forbidden(_)));
        assert!(clinic.engine.ledger.is_empty());

        assert!(clinic.engine.directory.grant_module(clinic.role, "M1"));
        service
            .create_entry(&clinic.nurse, &request("POST /modules/entries"), entry())
            .await
            .unwrap();
        assert_eq!(clinic.engine.store.entry_count(), 1);
    }

    // =========================================================================
    // LIFECYCLE
    // =========================================================================

    #[tokio::test]
    async fn test_full_lifecycle_audit_trail() {
        let clinic = clinic();
        let service = &clinic.engine.service;
        let ctx = request("/modules/entries");

        let created = service
            .create_entry(
                &clinic.nurse,
                &ctx,
                NewEntry::new(clinic.dossier, "M1", json!({"a": 1})).with_version(1),
            )
            .await
            .unwrap();
        service
            .update_entry(
                &clinic.nurse,
                &ctx,
                created.id,
                EntryUpdate {
                    payload: Some(json!({"a": 2})),
                    occurred_at: None,
                },
            )
            .await
            .unwrap();
        service
            .delete_entry(&clinic.nurse, &ctx, created.id, Some("duplicate".into()))
            .await
            .unwrap();

        let gone = service
            .get_entry(&clinic.nurse, &ctx, created.id, None)
            .await
            .unwrap_err();
        assert!(matches!(gone, EntryError::Gone(_)));

        let restored = service
            .restore_entry(&clinic.nurse, &ctx, created.id)
            .await
            .unwrap();
        assert_eq!(restored.payload, payload(json!({"a": 2})));

        let refused = service
            .hard_delete_entry(&clinic.nurse, &ctx, created.id)
            .await
            .unwrap_err();
        assert!(matches!(refused, EntryError::Forbidden(_)));
        service
            .hard_delete_entry(&clinic.admin, &ctx, created.id)
            .await
            .unwrap();
        assert_eq!(clinic.engine.store.entry_count(), 0);

        let id = created.id.to_string();
        let trail = service
            .audit_for_entity(&clinic.admin, EntityKind::ModuleEntries, &id)
            .await
            .unwrap();
        let actions: Vec<Action> = trail.iter().map(|r| r.action).collect();
        assert_eq!(
            actions,
            vec![
                Action::Create,
                Action::Update,
                Action::Delete,
                Action::Update,
                Action::Delete,
            ]
        );
        for record in &trail {
            for snapshot in record.before.iter().chain(record.after.iter()) {
                assert!(!leaks_sensitive::<StoredEntry>(snapshot));
            }
        }

        let by_nurse = service
            .audit_for_actor(&clinic.admin, clinic.nurse.id, Some(EntityKind::ModuleEntries))
            .await
            .unwrap();
        assert_eq!(by_nurse.len(), 4);
        assert!(by_nurse.iter().all(|r| r.actor_id == clinic.nurse.id));
    }
}
