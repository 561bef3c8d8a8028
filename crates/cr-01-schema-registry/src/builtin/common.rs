//! Sections repeated across the nursing modules.

use crate::domain::{FieldKind, ModuleSchema};

/// Facility type.
pub const STRUTTURA: &[&str] = &["R3", "R3D"];

/// Header: patient initials, dossier number, facility type.
pub fn utente() -> ModuleSchema {
    ModuleSchema::new()
        .required("inizNome", FieldKind::text(200))
        .required("inizCognome", FieldKind::text(200))
        .required("dossier", FieldKind::integer())
        .required("struttura", FieldKind::choice(STRUTTURA))
}

/// Patient registry data repeated in every module.
pub fn anagrafica() -> ModuleSchema {
    ModuleSchema::new()
        .required("paziente_nominativo", FieldKind::text(200))
        .required("anno", FieldKind::integer_between(2000, 2100))
        .required("numero_progressivo", FieldKind::integer_at_least(1))
}

/// Who compiled the form and when.
pub fn compilazione() -> ModuleSchema {
    ModuleSchema::new()
        .required("data_compilazione", FieldKind::Date)
        .required("compilatore", FieldKind::choice(&["mmg", "infermiere"]))
        .required("firma", FieldKind::text(200))
}
