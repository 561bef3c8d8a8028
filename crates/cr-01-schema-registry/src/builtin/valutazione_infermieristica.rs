//! ROG26/1.4 "Valutazione infermieristica" (nursing assessment).
//!
//! Most clinical sections are `Nullable`: the key is part of the form even
//! when left blank. Sections whose fields carry a default on the paper form
//! are `Optional`.

use super::common;
use crate::domain::{FieldKind, ModuleDefinition, ModuleSchema};

/// Module code.
pub const CODE: &str = "ROG26/1.4";

const LATO: &[&str] = &["dx", "sn"];
const RISCHIO: &[&str] = &["assente", "basso", "medio", "alto"];
const AUTONOMIA_WC: &[&str] = &[
    "autonomo",
    "con uso di ausili",
    "con assistenza",
    "totale dipendenza",
];

fn choice(values: &[&str]) -> FieldKind {
    FieldKind::choice(values)
}

fn multi(values: &[&str]) -> FieldKind {
    FieldKind::multi_choice(values)
}

fn paziente() -> ModuleSchema {
    common::anagrafica()
        .nullable("peso_kg", FieldKind::number())
        .nullable("altezza_mt", FieldKind::number())
        .nullable("imc_kg_m2", FieldKind::number())
}

fn parametri_vitali() -> ModuleSchema {
    ModuleSchema::new()
        .nullable("frequenza_cardiaca_b_min", FieldKind::integer())
        .nullable("temperatura_corporea_c", FieldKind::number())
        .nullable("pressione_arteriosa_mmhg", FieldKind::free_text())
        .nullable("ecg", FieldKind::Boolean)
        .nullable("frequenza_respiratoria_atti_min", FieldKind::integer())
        .nullable("sato2", FieldKind::number())
        .nullable("altro_parametri_vitali", FieldKind::free_text())
}

fn percezione_salute() -> ModuleSchema {
    ModuleSchema::new()
        .required("consumo_tabacco", FieldKind::Boolean)
        .nullable("quantita_tabacco_die_numero_sigarette", FieldKind::integer())
        .nullable("interrotto_consumo_tabacco", FieldKind::Boolean)
        .nullable("data_interruzione_tabacco", FieldKind::Date)
        .required("consumo_alcolici", FieldKind::Boolean)
        .nullable("quantita_alcolici_die_cl", FieldKind::integer())
        .nullable("interrotto_consumo_alcolici", FieldKind::Boolean)
        .nullable("data_interruzione_alcolici", FieldKind::Date)
}

fn allergie() -> ModuleSchema {
    ModuleSchema::new()
        .nullable("farmaci", FieldKind::free_text())
        .nullable("alimenti", FieldKind::free_text())
        .nullable("altro_allergie", FieldKind::free_text())
}

fn comunicazione() -> ModuleSchema {
    ModuleSchema::new()
        .nullable(
            "stato_di_coscienza",
            choice(&["vigile-collaborante", "soporoso", "comatoso"]),
        )
        .nullable(
            "comunicazione",
            multi(&[
                "orientato",
                "disorientato",
                "regolare",
                "disfonia",
                "disartria",
                "afasia",
                "tracheostomia",
            ]),
        )
        .nullable("udito", multi(&["normoudente", "ipoacusia", "sordità"]))
        .nullable("sordita_lato", choice(LATO))
        .nullable("protesi_udito", FieldKind::Boolean)
        .nullable("protesi_udito_lato", choice(LATO))
        .nullable(
            "vista",
            multi(&["normovedente", "riduzione visus", "non vedente"]),
        )
        .nullable("protesi_vista", multi(&["occhiali", "lenti a contatto"]))
        .nullable(
            "condizioni_psichiche",
            multi(&[
                "tranquillo",
                "irrequieto/ansioso",
                "agitazione psicomotoria",
                "apatia/disinteresse",
                "deficit cognitivo",
            ]),
        )
}

fn respirazione() -> ModuleSchema {
    ModuleSchema::new()
        .nullable("tipologia", choice(&["eupnea", "dispnea"]))
        .nullable("dispnea_tipo", choice(&["da sforzo", "a riposo"]))
        .nullable("presenza_di_tosse", FieldKind::Boolean)
        .nullable("trattamento_o2", FieldKind::Boolean)
        .nullable("ossigenoterapia_l_min", FieldKind::number())
        .nullable("aspirazioni_secrezioni", FieldKind::Boolean)
        .nullable(
            "allergie_respirazione",
            multi(&["bpco", "asma", "pollini", "epiteli animali", "acari"]),
        )
        .nullable(
            "presidi_respirazione",
            multi(&["cpap", "respiratore", "ventilatore", "cannula guedel"]),
        )
}

fn circolazione() -> ModuleSchema {
    ModuleSchema::new()
        .nullable(
            "presidi_protesi",
            multi(&[
                "pace maker",
                "protesi valvolari",
                "sistema port",
                "c.v.c.",
                "altro",
            ]),
        )
        .nullable("altro_presidi_protesi", FieldKind::free_text())
        .nullable(
            "cute_mucose",
            multi(&[
                "normocromica",
                "pallida",
                "cianotica",
                "itterica",
                "disidratata",
            ]),
        )
        .nullable(
            "integrita_cutanea",
            multi(&["ferite chirurgiche", "ulcere distrofiche", "lividi", "edemi"]),
        )
        .nullable("presenza_lesioni_da_decubito_sede", FieldKind::free_text())
        .nullable("stadio_lesioni_da_decubito", choice(&["1°", "2°", "3°", "4°"]))
        .nullable(
            "rischio_lesioni_scala_braden",
            choice(&["basso", "medio", "elevato", "molto elevato"]),
        )
}

fn stato() -> ModuleSchema {
    let presa = &["normale", "debolezza", "paralisi"];
    ModuleSchema::new()
        .nullable("escursione_articolare", choice(&["completa", "altro"]))
        .nullable("altro_escursione_articolare", FieldKind::free_text())
        .nullable("presa_delle_mani", choice(presa))
        .nullable("debolezza_mani_lato", choice(LATO))
        .nullable("paralisi_mani_lato", choice(LATO))
        .nullable("presa_arti_inferiori", choice(presa))
        .nullable("debolezza_arti_inferiori_lato", choice(LATO))
        .nullable("paralisi_arti_inferiori_lato", choice(LATO))
        .nullable("depressione", FieldKind::Boolean)
        .nullable("ansia", choice(&["lieve", "moderata", "grave"]))
        .nullable("agitazione", FieldKind::Boolean)
        .nullable("riposo_sonno", multi(&["regolare", "irregolare", "insonnia"]))
        .nullable("tipo_dolore", choice(&["acuto", "cronico"]))
        .nullable("sede_dolore_acuto", FieldKind::free_text())
        .nullable("sede_dolore_cronico", FieldKind::free_text())
        .nullable(
            "caratteristiche_dolore",
            multi(&["intermittente", "ingravescente", "colico"]),
        )
        .nullable(
            "terapia_antidolorifica",
            multi(&["analgesici", "antipiretici", "antinfiammatori", "oppioidi"]),
        )
}

fn movimento_igiene() -> ModuleSchema {
    ModuleSchema::new()
        .optional(
            "autonomia_movimento",
            choice(&["autonomo", "con assistenza", "non autonomo"]),
        )
        .optional(
            "rischio_cadute_conley",
            choice(&["rischio minimo", "aumento del rischio", "rischio alto"]),
        )
        .optional("ausili_presidi_movimento", multi(&["deambulatore/carrozzina"]))
        .optional("autonomia_postura", choice(&["autonomo", "postura obbligata"]))
        .optional(
            "postura_obbligata_causa",
            multi(&["paralisi", "paresi", "allettato"]),
        )
        .optional(
            "ausili_presidi_postura",
            multi(&["sponde per letto", "materasso antidecubito", "altro"]),
        )
        .optional("altro_ausili_presidi_postura", FieldKind::free_text())
        .optional(
            "lavarsi",
            choice(&["si lava da solo", "si lava con aiuto", "totale dipendenza"]),
        )
        .optional(
            "vestirsi",
            choice(&["si veste da solo", "si veste con aiuto", "totale dipendenza"]),
        )
        .optional("autonomia_wc", choice(AUTONOMIA_WC))
        .optional("altro_uso_wc", FieldKind::free_text())
        .optional("autonomia_doccia", choice(AUTONOMIA_WC))
}

fn eliminazione_intestinale() -> ModuleSchema {
    ModuleSchema::new()
        .nullable(
            "grado_autonomia",
            choice(&[
                "alvo regolare",
                "incontinente",
                "diarrea",
                "stipsi",
                "utilizzo lassativi",
                "clisteri evacuativi",
            ]),
        )
        .nullable("frequenza_evacuazioni_n", FieldKind::integer())
        .nullable("data_utlima_evacuazione", FieldKind::free_text())
        .nullable(
            "consistenza",
            choice(&["asciutte-disidratate", "soffici", "semi liquide", "liquide"]),
        )
        .nullable(
            "colore",
            choice(&[
                "normocromiche",
                "con tracce di sangue",
                "con tracce di muco",
                "melena",
            ]),
        )
        .nullable(
            "presidi",
            choice(&[
                "sedia comoda",
                "padella",
                "pannolone",
                "colostomia/ilestomia",
                "enterostomia",
                "drenaggio",
            ]),
        )
}

fn eliminazione_urinaria() -> ModuleSchema {
    ModuleSchema::new()
        .optional(
            "grado_autonomia",
            choice(&["autonomo", "regolare", "incontinente"]),
        )
        .optional("incontinente_tipo", choice(&["totale", "parziale"]))
        .optional(
            "minzione",
            choice(&["normale", "disuria", "nicturia", "impellente"]),
        )
        .optional("frequenza_die", FieldKind::integer_at_least(0))
        .optional("diuresi_ml_24ore", FieldKind::integer_at_least(0))
        .optional(
            "diuresi_regolarita",
            choice(&["regolare", "anuria", "oliguria", "poliuria"]),
        )
        .optional(
            "caratteristiche",
            choice(&[
                "limpide",
                "ematuria",
                "piuria",
                "con sedimento",
                "ipercromiche",
                "torride",
            ]),
        )
        .optional(
            "presidi_urinaria",
            choice(&[
                "sedia comoda",
                "pappagallo",
                "pannolone",
                "catetere",
                "condom",
                "stomia",
                "drenaggio",
            ]),
        )
        .optional("stomia_tipo", FieldKind::free_text())
        .nullable("infezioni_urinarie", FieldKind::Boolean)
        .optional("se_si_specificare_segni_e_sintomi", FieldKind::free_text())
}

fn alimentazione() -> ModuleSchema {
    ModuleSchema::new()
        .optional(
            "autonomia",
            choice(&[
                "totale",
                "difficoltà masticazione",
                "parziale con aiuto",
                "totale dipendente",
            ]),
        )
        .optional(
            "deglutizione",
            choice(&["normale", "disfagia a solidi", "disfagia a liquidi"]),
        )
        .optional(
            "protesi",
            choice(&["superiore", "inferiore", "fissa", "mobile"]),
        )
        .optional("presidi", choice(&["sng", "peg/peg-j", "npt", "altro"]))
        .optional("altro_presidi", FieldKind::free_text())
        .optional(
            "dieta",
            choice(&[
                "dieta comune",
                "celiachia",
                "dieta speciale",
                "restrizioni dietetiche",
                "intolleranze",
                "allergie",
            ]),
        )
        .optional("dieta_speciale_specifica", FieldKind::free_text())
        .optional("restrizioni_dietetiche", FieldKind::free_text())
        .optional("intolleranze", FieldKind::free_text())
        .optional("allergie", FieldKind::free_text())
        .optional(
            "cavo_orale",
            choice(&["normale", "arrossamenti", "lesioni", "altro"]),
        )
        .optional("altro_cavo_orale", FieldKind::free_text())
        .optional(
            "stato_nutrizionale_scala_mna",
            choice(&["buono - normale", "rischio malnutrizione", "malnutrito"]),
        )
        .optional("variazioni_peso_ultimi_mesi", FieldKind::integer_at_least(0))
        .optional("variazione_peso_kg", FieldKind::number_between(-500.0, 500.0))
        .optional("tipo_variazione_peso", choice(&["aumento", "perdita"]))
        .optional("peso_kg", FieldKind::number_at_least(0.0))
        .optional("altezza_mt", FieldKind::number_at_least(0.0))
        .optional("imc", FieldKind::number_at_least(0.0))
        .optional(
            "grado_obesita",
            choice(&[
                "normale (18,5-25)",
                "1° grado (25-30)",
                "2° grado (30-40)",
                "3° grado (>40)",
            ]),
        )
        .optional(
            "presenza_di",
            choice(&[
                "inappetenza",
                "polifagia",
                "disfagia",
                "nausea",
                "conato",
                "vomito",
                "stomatite",
                "cachessia",
            ]),
        )
        .optional(
            "addome",
            choice(&["peristalsi", "timpanico", "trattabile", "dolente"]),
        )
        .optional(
            "idratazione_stato",
            choice(&["idratato", "disidratato", "gravemente disidratato"]),
        )
        .optional(
            "idratazione_autonomia",
            choice(&["spontanea", "con aiuto", "dipendente"]),
        )
}

fn anamnesi() -> ModuleSchema {
    ModuleSchema::new()
        .required("comunicazione", FieldKind::object(comunicazione()))
        .required("respirazione", FieldKind::object(respirazione()))
        .required(
            "circolazione_e_tessuti_cutanei",
            FieldKind::object(circolazione()),
        )
        .required("stato", FieldKind::object(stato()))
        .required("movimento_igiene", FieldKind::object(movimento_igiene()))
        .required(
            "eliminazione_intestinale",
            FieldKind::object(eliminazione_intestinale()),
        )
        .required(
            "eliminazione_vescicale_urinaria",
            FieldKind::object(eliminazione_urinaria()),
        )
        .required(
            "alimentazione_e_idratazione",
            FieldKind::object(alimentazione()),
        )
}

fn diagnosi() -> ModuleSchema {
    ModuleSchema::new()
        .nullable("patologia_prevalente", FieldKind::free_text())
        .nullable("patologia_secondaria_1", FieldKind::free_text())
        .nullable("patologia_secondaria_2", FieldKind::free_text())
}

fn rischio() -> ModuleSchema {
    ModuleSchema::new()
        .nullable("rischio_cadute_scala_di_conley", choice(RISCHIO))
        .nullable("rischio_infezioni_ica", choice(RISCHIO))
}

fn v1() -> ModuleDefinition {
    let schema = ModuleSchema::new()
        .required("utente", FieldKind::object(common::utente()))
        .required("paziente", FieldKind::object(paziente()))
        .nullable(
            "rilievo_parametri_vitali",
            FieldKind::object(parametri_vitali()),
        )
        .nullable(
            "modello_di_percezione_e_di_gestione_della_salute",
            FieldKind::object(percezione_salute()),
        )
        .nullable("allergie_riferite", FieldKind::object(allergie()))
        .required("attivita_fisiche_sportive", FieldKind::Boolean)
        .required("patologie_croniche", FieldKind::Boolean)
        .nullable("quali_patologie_croniche", FieldKind::free_text())
        .nullable("anamnesi_ed_esame_obiettivo", FieldKind::object(anamnesi()))
        .nullable("tao", FieldKind::Boolean)
        .nullable("ossigenoterapia", FieldKind::Boolean)
        .nullable("farmaci_h", FieldKind::Boolean)
        .nullable("diagnosi_infermieristica", FieldKind::object(diagnosi()))
        .nullable("valutazione_bisogni_infermieristici", FieldKind::free_text())
        .nullable(
            "cadenza_monitoraggio_clinico_parametri_vitali",
            FieldKind::free_text(),
        )
        .nullable("patologie_da_monitorare", FieldKind::free_text())
        .nullable("valutazione_del_rischio", FieldKind::object(rischio()))
        .nullable("scale_utilizzate", FieldKind::free_text())
        .nullable("data", FieldKind::Date)
        .nullable("infermiere_compilatore", FieldKind::free_text())
        .nullable("firma", FieldKind::free_text());

    ModuleDefinition::initial(CODE, "Valutazione infermieristica", schema)
}

/// All versions.
pub fn definitions() -> Vec<ModuleDefinition> {
    vec![v1()]
}
