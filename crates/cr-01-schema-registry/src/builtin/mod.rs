//! # Built-in Module Table
//!
//! The clinical forms shipped with the engine.
//!
//! | Code | Versions | Title |
//! |------|----------|-------|
//! | `ROG26/1.1` | 1, 2 | Presa in carico |
//! | `ROG26/1.3` | 1 | Valutazione livelli assistenziali |
//! | `ROG26/1.4` | 1 | Valutazione infermieristica |

pub mod common;
pub mod livelli_assistenziali;
pub mod presa_in_carico;
pub mod valutazione_infermieristica;

use crate::domain::{ModuleDefinition, RegistryError};
use crate::registry::SchemaRegistry;

/// Every built-in definition.
pub fn builtin_definitions() -> Vec<ModuleDefinition> {
    let mut all = presa_in_carico::definitions();
    all.extend(livelli_assistenziali::definitions());
    all.extend(valutazione_infermieristica::definitions());
    all
}

/// Registry populated with the built-in table.
pub fn builtin_registry() -> Result<SchemaRegistry, RegistryError> {
    SchemaRegistry::builder()
        .define_all(builtin_definitions())
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::SchemaRegistryApi;
    use serde_json::{json, Value};

    fn utente() -> Value {
        json!({"inizNome": "M", "inizCognome": "R", "dossier": 12, "struttura": "R3"})
    }

    fn paziente() -> Value {
        json!({"paziente_nominativo": "Mario Rossi", "anno": 2024, "numero_progressivo": 3})
    }

    #[test]
    fn test_builtin_table_is_consistent() {
        let registry = builtin_registry().unwrap();
        assert_eq!(
            registry.codes(),
            vec!["ROG26/1.1", "ROG26/1.3", "ROG26/1.4"]
        );
        assert_eq!(registry.latest_version("ROG26/1.1"), Some(2));
    }

    #[test]
    fn test_presa_in_carico_upgrade_validates_at_v2() {
        let registry = builtin_registry().unwrap();
        let raw = json!({
            "utente": utente(),
            "paziente": paziente(),
            "data_presa_in_carico": "2024-03-01",
            "diagnosi": "Scompenso cardiaco"
        });
        let v1 = registry.validate(presa_in_carico::CODE, 1, &raw).unwrap();
        let v2 = registry.migrate(presa_in_carico::CODE, 1, 2, v1).unwrap();
        assert!(registry
            .validate(presa_in_carico::CODE, 2, &Value::Object(v2))
            .is_ok());
    }

    #[test]
    fn test_valutazione_infermieristica_minimal_form() {
        let registry = builtin_registry().unwrap();
        let mut paz = paziente();
        paz["peso_kg"] = json!(72.5);
        paz["altezza_mt"] = json!(1.75);
        paz["imc_kg_m2"] = Value::Null;

        let mut raw = json!({
            "utente": utente(),
            "paziente": paz,
            "attivita_fisiche_sportive": false,
            "patologie_croniche": true,
        });
        for key in [
            "rilievo_parametri_vitali",
            "modello_di_percezione_e_di_gestione_della_salute",
            "allergie_riferite",
            "quali_patologie_croniche",
            "anamnesi_ed_esame_obiettivo",
            "tao",
            "ossigenoterapia",
            "farmaci_h",
            "diagnosi_infermieristica",
            "valutazione_bisogni_infermieristici",
            "cadenza_monitoraggio_clinico_parametri_vitali",
            "patologie_da_monitorare",
            "scale_utilizzate",
            "data",
            "infermiere_compilatore",
            "firma",
        ] {
            raw[key] = Value::Null;
        }
        raw["valutazione_del_rischio"] = json!({
            "rischio_cadute_scala_di_conley": "medio",
            "rischio_infezioni_ica": null
        });

        assert!(registry
            .validate(valutazione_infermieristica::CODE, 1, &raw)
            .is_ok());

        raw["utente"]["struttura"] = json!("R4");
        let err = registry
            .validate(valutazione_infermieristica::CODE, 1, &raw)
            .unwrap_err();
        match err {
            RegistryError::Violation(v) => assert!(v.mentions("utente.struttura")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_livelli_assistenziali_section_paths() {
        let registry = builtin_registry().unwrap();
        let sezione = json!({
            "punteggio_massimo": 10,
            "opzioni": [{"descrizione": "autonomo", "punteggio": 0}]
        });
        let mut raw = json!({
            "utente": utente(),
            "strutt": "R3D",
            "paziente": paziente(),
            "punteggio_totale": 42,
            "compatibilita_livelli_assistenziali_tipologia_struttura": {
                "punteggio_0_150": "R3",
                "punteggio_151_300": "R3D"
            },
            "compilazione": {
                "data_compilazione": "2024-05-02",
                "compilatore": "infermiere",
                "firma": "L. Bianchi"
            }
        });
        for section in [
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
        ] {
            raw[section] = sezione.clone();
        }
        assert!(registry
            .validate(livelli_assistenziali::CODE, 1, &raw)
            .is_ok());

        raw["alimentazione"]["opzioni"][0]["punteggio"] = json!("zero");
        let err = registry
            .validate(livelli_assistenziali::CODE, 1, &raw)
            .unwrap_err();
        match err {
            RegistryError::Violation(v) => {
                assert!(v.mentions("alimentazione.opzioni[0].punteggio"))
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
