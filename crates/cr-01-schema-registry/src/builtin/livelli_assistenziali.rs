//! ROG26/1.3 "Valutazione livelli assistenziali" (care-level assessment).
//!
//! Twelve scored sections, each a maximum score and a list of options.

use super::common;
use crate::domain::{FieldKind, ModuleDefinition, ModuleSchema};

/// Module code.
pub const CODE: &str = "ROG26/1.3";

const SECTIONS: &[&str] = &[
    "capacita_di_movimento",
    "igiene_personale",
    "integrita_cutanea",
    "alimentazione",
    "stato_cognitivo_comunicazione",
    "eliminazione_urinaria",
    "stato_di_coscienza",
    "eliminazione_intestinale",
    "funzioni_sensoriali",
    "ritmo_sonno_veglia",
    "funzioni_respiratorie",
    "problematiche_terapeutiche",
];

fn opzione() -> ModuleSchema {
    ModuleSchema::new()
        .required("descrizione", FieldKind::free_text())
        .required("punteggio", FieldKind::integer())
        .optional("braden_punteggio", FieldKind::integer())
        .optional("spmsq_punteggio", FieldKind::integer())
        .optional("spmsq_range", FieldKind::free_text())
        .optional("sintomi_bpsd", FieldKind::list(FieldKind::free_text()))
}

fn sezione() -> ModuleSchema {
    ModuleSchema::new()
        .required("punteggio_massimo", FieldKind::integer())
        .required("opzioni", FieldKind::list(FieldKind::object(opzione())))
}

fn v1() -> ModuleDefinition {
    let mut schema = ModuleSchema::new()
        .required("utente", FieldKind::object(common::utente()))
        .required("strutt", FieldKind::choice(common::STRUTTURA))
        .required("paziente", FieldKind::object(common::anagrafica()));

    for section in SECTIONS {
        schema = schema.required(*section, FieldKind::object(sezione()));
    }

    let compatibilita = ModuleSchema::new()
        .required("punteggio_0_150", FieldKind::free_text())
        .required("punteggio_151_300", FieldKind::free_text());

    schema = schema
        .required("punteggio_totale", FieldKind::integer())
        .required(
            "compatibilita_livelli_assistenziali_tipologia_struttura",
            FieldKind::object(compatibilita),
        )
        .required("compilazione", FieldKind::object(common::compilazione()));

    ModuleDefinition::initial(CODE, "Valutazione livelli assistenziali", schema)
}

/// All versions.
pub fn definitions() -> Vec<ModuleDefinition> {
    vec![v1()]
}
