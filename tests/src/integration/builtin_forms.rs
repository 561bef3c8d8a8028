//! # Shipped Clinical Forms
//!
//! The built-in module table behind the wired engine: admission form
//! upgrade from v1 to v2, nested-path validation, module availability and
//! the administrative catalog.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::{request, Clinic};
    use cr_01_schema_registry::builtin::presa_in_carico;
    use cr_03_audit_trail::EntityKind;
    use cr_04_entry_service::{
        AuditQueryApi, CatalogApi, CatalogFilter, CatalogPatch, EntryApi, EntryError,
        EntryFilter, EntryView, NewCatalogEntry, NewEntry, StatsFilter,
    };
    use serde_json::{json, Value};
    use shared_types::Action;

    const ADMISSION: &str = presa_in_carico::CODE;

    fn admission_v1(diagnosi: &str) -> Value {
        json!({
            "utente": {"inizNome": "M", "inizCognome": "R", "dossier": 12, "struttura": "R3"},
            "paziente": {
                "paziente_nominativo": "Mario Rossi",
                "anno": 2024,
                "numero_progressivo": 3
            },
            "data_presa_in_carico": "2024-03-01",
            "diagnosi": diagnosi
        })
    }

    async fn admit(clinic: &Clinic, diagnosi: &str) -> EntryView {
        clinic
            .engine
            .service
            .create_entry(
                &clinic.nurse,
                &request("POST /modules/entries"),
                NewEntry::new(clinic.dossier, ADMISSION, admission_v1(diagnosi)).with_version(1),
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_admission_view_then_upgrade() {
        let clinic = Clinic::builtin(&[ADMISSION]);
        let service = &clinic.engine.service;
        let created = admit(&clinic, "Scompenso cardiaco").await;

        let as_v2 = service
            .get_entry(&clinic.nurse, &request("GET /modules/entries"), created.id, Some(2))
            .await
            .unwrap();
        assert_eq!(as_v2.schema_version, 1);
        assert_eq!(as_v2.view_version, 2);
        assert_eq!(as_v2.payload["diagnosi_principale"], "Scompenso cardiaco");
        assert!(!as_v2.payload.contains_key("diagnosi"));

        let stored = service
            .get_entry(&clinic.nurse, &request("GET /modules/entries"), created.id, None)
            .await
            .unwrap();
        assert_eq!(stored.payload["diagnosi"], "Scompenso cardiaco");

        let upgraded = service
            .upgrade_entry_version(&clinic.nurse, &request("POST /upgrade"), created.id, 2)
            .await
            .unwrap();
        assert_eq!(upgraded.schema_version, 2);
        assert_eq!(upgraded.payload["diagnosi_principale"], "Scompenso cardiaco");
        assert_eq!(upgraded.payload["utente"]["struttura"], "R3");

        let trail = service
            .audit_for_entity(
                &clinic.admin,
                EntityKind::ModuleEntries,
                &created.id.to_string(),
            )
            .await
            .unwrap();
        let update = trail.last().unwrap();
        assert_eq!(update.action, Action::Update);
        assert_eq!(update.before.as_ref().unwrap()["schema_version"], 1);
        assert_eq!(update.after.as_ref().unwrap()["schema_version"], 2);
    }

    #[tokio::test]
    async fn test_nested_violation_paths() {
        let clinic = Clinic::builtin(&[ADMISSION]);
        let mut raw = admission_v1("BPCO");
        raw["utente"]["struttura"] = json!("R4");
        raw["paziente"]["anno"] = json!(1990);

        let err = clinic
            .engine
            .service
            .create_entry(
                &clinic.nurse,
                &request("POST /modules/entries"),
                NewEntry::new(clinic.dossier, ADMISSION, raw).with_version(1),
            )
            .await
            .unwrap_err();
        match err {
            EntryError::SchemaViolation(violation) => {
                assert!(violation.mentions("utente.struttura"));
                assert!(violation.mentions("paziente.anno"));
                assert_eq!(violation.violations.len(), 2);
            }
            other => panic!("expected SchemaViolation, got {:?}", other),
        }
        assert_eq!(clinic.engine.store.entry_count(), 0);
    }

    #[tokio::test]
    async fn test_available_modules_and_stats() {
        let clinic = Clinic::builtin(&[ADMISSION]);
        let service = &clinic.engine.service;

        let modules = service.available_modules(&clinic.nurse, true).await.unwrap();
        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0].code, ADMISSION);
        assert_eq!(modules[0].versions, vec![1, 2]);
        assert_eq!(modules[0].latest_version, 2);
        assert!(modules[0].schema.is_some());

        let everything = service.available_modules(&clinic.admin, false).await.unwrap();
        assert_eq!(everything.len(), 3);
        assert!(everything.iter().all(|m| m.schema.is_none()));

        admit(&clinic, "BPCO").await;
        admit(&clinic, "Diabete").await;
        let stats = service
            .entry_stats(&clinic.nurse, StatsFilter::default())
            .await
            .unwrap();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.modules.len(), 1);
        assert_eq!(stats.modules[0].code, ADMISSION);

        let page = service
            .list_entries(
                &clinic.nurse,
                &request("GET /modules/entries"),
                EntryFilter {
                    module_code: Some(ADMISSION.into()),
                    page_size: 1,
                    ..EntryFilter::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(page.items.len(), 1);
        assert!(page.has_next);
    }

    #[tokio::test]
    async fn test_catalog_administration() {
        let clinic = Clinic::builtin(&[ADMISSION]);
        let service = &clinic.engine.service;
        let ctx = request("POST /admin/modules");

        let refused = service
            .create_module(
                &clinic.nurse,
                &ctx,
                NewCatalogEntry::new("rog26/1.1", "Presa in carico", 2),
            )
            .await
            .unwrap_err();
        assert!(matches!(refused, EntryError::Forbidden(_)));

        let created = service
            .create_module(
                &clinic.admin,
                &ctx,
                NewCatalogEntry::new(" rog26/1.1 ", "Presa in carico", 2),
            )
            .await
            .unwrap();
        assert_eq!(created.code, ADMISSION);

        let duplicate = service
            .create_module(
                &clinic.admin,
                &ctx,
                NewCatalogEntry::new(ADMISSION, "Duplicato", 1),
            )
            .await
            .unwrap_err();
        assert!(matches!(duplicate, EntryError::Conflict(_)));

        let updated = service
            .update_module(
                &clinic.admin,
                &ctx,
                ADMISSION,
                CatalogPatch {
                    active: Some(false),
                    ..CatalogPatch::default()
                },
            )
            .await
            .unwrap();
        assert!(!updated.active);

        let found = service
            .list_modules(
                &clinic.nurse,
                CatalogFilter {
                    query: Some("presa".into()),
                    active_only: false,
                },
            )
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        let active = service
            .list_modules(
                &clinic.nurse,
                CatalogFilter {
                    query: None,
                    active_only: true,
                },
            )
            .await
            .unwrap();
        assert!(active.is_empty());

        service
            .delete_module(&clinic.admin, &ctx, ADMISSION)
            .await
            .unwrap();
        let missing = service
            .get_module(&clinic.nurse, ADMISSION)
            .await
            .unwrap_err();
        assert!(matches!(missing, EntryError::NotFound(_)));

        let trail = service
            .audit_for_entity(&clinic.admin, EntityKind::ModuleCatalog, ADMISSION)
            .await
            .unwrap();
        let actions: Vec<Action> = trail.iter().map(|r| r.action).collect();
        assert_eq!(actions, vec![Action::Create, Action::Update, Action::Delete]);
    }
}
