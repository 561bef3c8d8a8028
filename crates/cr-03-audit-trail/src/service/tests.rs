use super::*;
use crate::adapters::InMemoryAuditLedger;
use crate::domain::AuditContext;
use crate::recorder::AuditRecorder;
use chrono::Utc;
use shared_types::{Action, Actor, RequestContext};
use uuid::Uuid;

fn ctx(actor: &Actor) -> AuditContext {
    AuditContext::new(actor, &RequestContext::internal("test"), Utc::now())
}

#[tokio::test]
async fn test_sequence_ids_are_monotonic() {
    let ledger = Arc::new(InMemoryAuditLedger::new());
    let actor = Actor::new(Uuid::new_v4(), "Laura", None, None);
    let recorder = AuditRecorder::new();

    let first = ledger
        .append(vec![
            recorder.record_read(EntityKind::ModuleEntries, "a", &ctx(&actor)),
            recorder.record_read(EntityKind::ModuleEntries, "b", &ctx(&actor)),
        ])
        .await
        .unwrap();
    let second = ledger
        .append(vec![recorder.record_read(EntityKind::ModuleEntries, "c", &ctx(&actor))])
        .await
        .unwrap();

    assert_eq!(first.iter().map(|r| r.sequence).collect::<Vec<_>>(), vec![1, 2]);
    assert_eq!(second[0].sequence, 3);
}

#[tokio::test]
async fn test_refused_append_stores_nothing() {
    let ledger = Arc::new(InMemoryAuditLedger::new());
    let actor = Actor::new(Uuid::new_v4(), "Laura", None, None);
    ledger.set_refuse_appends(true);

    let result = ledger
        .append(vec![AuditRecorder::new().record_read(
            EntityKind::ModuleEntries,
            "a",
            &ctx(&actor),
        )])
        .await;

    assert!(matches!(result, Err(AuditError::WriteFailed(_))));
    assert!(ledger.is_empty());
}

#[tokio::test]
async fn test_queries_by_entity_and_actor() {
    let ledger = Arc::new(InMemoryAuditLedger::new());
    let laura = Actor::new(Uuid::new_v4(), "Laura", None, None);
    let marco = Actor::new(Uuid::new_v4(), "Marco", None, None);
    let recorder = AuditRecorder::new();

    ledger
        .append(vec![
            recorder.record_read(EntityKind::ModuleEntries, "e1", &ctx(&laura)),
            recorder.record_mutation(
                Action::Create,
                EntityKind::ModuleCatalog,
                "ROG26/1.4",
                None,
                Some(serde_json::json!({"code": "ROG26/1.4"})),
                &ctx(&laura),
            ),
            recorder.record_read(EntityKind::ModuleEntries, "e1", &ctx(&marco)),
        ])
        .await
        .unwrap();

    let trail = AuditTrail::new(ledger);

    let e1 = trail.for_entity(EntityKind::ModuleEntries, "e1").await.unwrap();
    assert_eq!(e1.len(), 2);

    let laura_all = trail.for_actor(laura.id, None).await.unwrap();
    assert_eq!(laura_all.len(), 2);

    let laura_catalog = trail
        .for_actor(laura.id, Some(EntityKind::ModuleCatalog))
        .await
        .unwrap();
    assert_eq!(laura_catalog.len(), 1);
    assert_eq!(laura_catalog[0].action, Action::Create);
}
