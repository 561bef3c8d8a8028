//! # Test Fixtures
//!
//! A small clinic: two organizational units, one dossier in each, a nurse
//! in the first unit and a global administrator.

use cr_01_schema_registry::{
    builtin_registry, FieldKind, ModuleDefinition, ModuleSchema, SchemaRegistry, StepError,
};
use cr_02_access_gate::{Dossier, OrgUnit, Role};
use cr_04_entry_service::EngineConfig;
use engine_runtime::EngineContainer;
use serde_json::json;
use shared_types::{Actor, DossierId, OrgUnitId, Payload, RequestContext, RoleId};
use uuid::Uuid;

/// Wired engine plus the seeded directory ids.
pub struct Clinic {
    /// The engine under test.
    pub engine: EngineContainer,
    /// The nurse's unit.
    pub unit: OrgUnitId,
    /// Another unit the nurse does not belong to.
    pub other_unit: OrgUnitId,
    /// Dossier in `unit`.
    pub dossier: DossierId,
    /// Dossier in `other_unit`.
    pub foreign_dossier: DossierId,
    /// The nurse's role.
    pub role: RoleId,
    /// Non-administrator in `unit`.
    pub nurse: Actor,
    /// Global administrator.
    pub admin: Actor,
}

impl Clinic {
    /// Engine over `registry`, nurse role permitted on `modules`.
    pub fn with_registry(registry: SchemaRegistry, modules: &[&str]) -> Self {
        let engine = EngineContainer::with_registry(EngineConfig::for_testing(), registry)
            .expect("engine wiring");

        let unit = Uuid::new_v4();
        let other_unit = Uuid::new_v4();
        let dossier = Uuid::new_v4();
        let foreign_dossier = Uuid::new_v4();
        let role = Role::new(Uuid::new_v4(), "infermiere", modules.iter().copied());
        let role_id = role.id;

        let directory = &engine.directory;
        for (id, name) in [(unit, "RSA Girasole"), (other_unit, "RSA Mimosa")] {
            directory.put_org_unit(OrgUnit {
                id,
                name: name.into(),
                deleted: false,
            });
        }
        for (id, org_unit_id) in [(dossier, unit), (foreign_dossier, other_unit)] {
            directory.put_dossier(Dossier {
                id,
                org_unit_id,
                deleted: false,
            });
        }
        directory.put_role(role);

        Self {
            engine,
            unit,
            other_unit,
            dossier,
            foreign_dossier,
            role: role_id,
            nurse: Actor::new(Uuid::new_v4(), "Giulia Neri", Some(role_id), Some(unit)),
            admin: Actor::administrator(Uuid::new_v4(), "admin"),
        }
    }

    /// Engine over the shipped module table.
    pub fn builtin(modules: &[&str]) -> Self {
        Self::with_registry(builtin_registry().expect("builtin table"), modules)
    }
}

/// Request descriptor for an endpoint label.
pub fn request(endpoint: &str) -> RequestContext {
    RequestContext::new("192.168.1.20", endpoint)
}

fn append_c(mut payload: Payload) -> Result<Payload, StepError> {
    payload.insert("c".into(), json!("x"));
    Ok(payload)
}

/// `M1` v1 `{a: integer}`, v2 `{a, c: text}` with a step appending `c = "x"`.
pub fn m1_registry() -> SchemaRegistry {
    SchemaRegistry::builder()
        .define(ModuleDefinition::initial(
            "M1",
            "Scenario module",
            ModuleSchema::new().required("a", FieldKind::integer()),
        ))
        .define(ModuleDefinition::successor(
            "M1",
            2,
            "Scenario module",
            ModuleSchema::new()
                .required("a", FieldKind::integer())
                .required("c", FieldKind::free_text()),
            append_c,
        ))
        .build()
        .expect("scenario registry")
}
