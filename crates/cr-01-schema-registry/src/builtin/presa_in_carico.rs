//! ROG26/1.1 "Presa in carico" (admission).
//!
//! v2 renames `diagnosi` to `diagnosi_principale` and adds optional
//! secondary diagnoses.

use super::common;
use crate::domain::{FieldKind, ModuleDefinition, ModuleSchema, StepError};
use shared_types::Payload;

/// Module code.
pub const CODE: &str = "ROG26/1.1";

const TITLE: &str = "Presa in carico";

fn header() -> ModuleSchema {
    ModuleSchema::new()
        .required("utente", FieldKind::object(common::utente()))
        .required("paziente", FieldKind::object(common::anagrafica()))
        .nullable("data_presa_in_carico", FieldKind::Date)
        .optional("provenienza", FieldKind::choice(&["domicilio", "ospedale", "altra struttura"]))
}

fn v1() -> ModuleDefinition {
    ModuleDefinition::initial(
        CODE,
        TITLE,
        header()
            .required("diagnosi", FieldKind::text(500))
            .optional("note", FieldKind::free_text()),
    )
}

fn v2() -> ModuleDefinition {
    ModuleDefinition::successor(
        CODE,
        2,
        TITLE,
        header()
            .required("diagnosi_principale", FieldKind::text(500))
            .optional("diagnosi_secondarie", FieldKind::list(FieldKind::text(500)))
            .optional("note", FieldKind::free_text()),
        rename_diagnosi,
    )
}

/// `diagnosi` becomes `diagnosi_principale`.
pub fn rename_diagnosi(mut data: Payload) -> Result<Payload, StepError> {
    let diagnosi = data
        .remove("diagnosi")
        .ok_or_else(|| StepError("field 'diagnosi' is missing".into()))?;
    data.insert("diagnosi_principale".into(), diagnosi);
    Ok(data)
}

/// All versions.
pub fn definitions() -> Vec<ModuleDefinition> {
    vec![v1(), v2()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_rename_keeps_other_fields() {
        let data = json!({"diagnosi": "BPCO", "note": "n"}).as_object().cloned().unwrap();
        let out = rename_diagnosi(data).unwrap();
        assert_eq!(out.get("diagnosi_principale"), Some(&Value::from("BPCO")));
        assert!(out.get("diagnosi").is_none());
        assert_eq!(out.get("note"), Some(&json!("n")));
    }

    #[test]
    fn test_rename_without_source_field_fails() {
        assert!(rename_diagnosi(Payload::new()).is_err());
    }
}
