//! # Payload Validator
//!
//! Structural check of a raw JSON value against a closed [`ModuleSchema`].
//! Every violation is collected; validation never stops at the first one.

use crate::domain::{FieldKind, ModuleSchema, Presence, Violation, ViolationKind};
use chrono::NaiveDate;
use serde_json::Value;
use shared_types::Payload;

/// Path used for the payload root.
pub const ROOT_PATH: &str = "$";

/// Validate `raw` against `schema`.
///
/// Returns the payload object on success, otherwise every violation found.
pub fn validate_payload(schema: &ModuleSchema, raw: &Value) -> Result<Payload, Vec<Violation>> {
    let Value::Object(map) = raw else {
        return Err(vec![Violation::new(
            ROOT_PATH,
            ViolationKind::WrongType { expected: "object" },
        )]);
    };

    let mut violations = Vec::new();
    check_object(schema, map, "", &mut violations);

    if violations.is_empty() {
        Ok(map.clone())
    } else {
        Err(violations)
    }
}

fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}

fn check_object(
    schema: &ModuleSchema,
    map: &serde_json::Map<String, Value>,
    prefix: &str,
    out: &mut Vec<Violation>,
) {
    for key in map.keys() {
        if schema.get(key).is_none() {
            out.push(Violation::new(join(prefix, key), ViolationKind::UnexpectedField));
        }
    }

    for field in schema.fields() {
        let path = join(prefix, &field.name);
        match (map.get(&field.name), field.presence) {
            (None, Presence::Optional) => {}
            (None, _) => out.push(Violation::new(path, ViolationKind::MissingField)),
            (Some(Value::Null), Presence::Required) => {
                out.push(Violation::new(path, ViolationKind::NullNotAllowed))
            }
            (Some(Value::Null), _) => {}
            (Some(value), _) => check_value(&field.kind, value, &path, out),
        }
    }
}

fn check_value(kind: &FieldKind, value: &Value, path: &str, out: &mut Vec<Violation>) {
    let wrong_type = || {
        Violation::new(
            path,
            ViolationKind::WrongType {
                expected: kind.label(),
            },
        )
    };

    match kind {
        FieldKind::Integer { min, max } => {
            let Some(n) = value.as_i64() else {
                out.push(wrong_type());
                return;
            };
            if min.is_some_and(|m| n < m) || max.is_some_and(|m| n > m) {
                out.push(Violation::new(
                    path,
                    ViolationKind::OutOfRange {
                        value: n.to_string(),
                    },
                ));
            }
        }
        FieldKind::Number { min, max } => {
            let Some(n) = value.as_f64() else {
                out.push(wrong_type());
                return;
            };
            if min.is_some_and(|m| n < m) || max.is_some_and(|m| n > m) {
                out.push(Violation::new(
                    path,
                    ViolationKind::OutOfRange {
                        value: n.to_string(),
                    },
                ));
            }
        }
        FieldKind::Text { max_len } => {
            let Some(s) = value.as_str() else {
                out.push(wrong_type());
                return;
            };
            let actual = s.chars().count();
            if let Some(max_len) = *max_len {
                if actual > max_len {
                    out.push(Violation::new(path, ViolationKind::TooLong { max_len, actual }));
                }
            }
        }
        FieldKind::Boolean => {
            if !value.is_boolean() {
                out.push(wrong_type());
            }
        }
        FieldKind::Date => {
            let Some(s) = value.as_str() else {
                out.push(wrong_type());
                return;
            };
            if NaiveDate::parse_from_str(s, "%Y-%m-%d").is_err() {
                out.push(Violation::new(
                    path,
                    ViolationKind::InvalidDate {
                        value: s.to_string(),
                    },
                ));
            }
        }
        FieldKind::Choice(values) => check_choice(values, value, path, kind, out),
        FieldKind::MultiChoice(values) => {
            let Some(items) = value.as_array() else {
                out.push(wrong_type());
                return;
            };
            for (i, item) in items.iter().enumerate() {
                check_choice(values, item, &format!("{}[{}]", path, i), kind, out);
            }
        }
        FieldKind::List(item_kind) => {
            let Some(items) = value.as_array() else {
                out.push(wrong_type());
                return;
            };
            for (i, item) in items.iter().enumerate() {
                let item_path = format!("{}[{}]", path, i);
                if item.is_null() {
                    out.push(Violation::new(item_path, ViolationKind::NullNotAllowed));
                } else {
                    check_value(item_kind, item, &item_path, out);
                }
            }
        }
        FieldKind::Object(schema) => {
            let Some(map) = value.as_object() else {
                out.push(wrong_type());
                return;
            };
            check_object(schema, map, path, out);
        }
    }
}

fn check_choice(
    values: &[String],
    value: &Value,
    path: &str,
    kind: &FieldKind,
    out: &mut Vec<Violation>,
) {
    match value.as_str() {
        Some(s) if values.iter().any(|v| v == s) => {}
        Some(s) => out.push(Violation::new(
            path,
            ViolationKind::NotAllowedValue {
                value: s.to_string(),
            },
        )),
        None => out.push(Violation::new(
            path,
            ViolationKind::WrongType {
                expected: kind.label(),
            },
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema() -> ModuleSchema {
        let opzione = ModuleSchema::new()
            .required("descrizione", FieldKind::free_text())
            .required("punteggio", FieldKind::integer());
        ModuleSchema::new()
            .required("a", FieldKind::integer())
            .nullable("peso_kg", FieldKind::number_at_least(0.0))
            .optional("nota", FieldKind::text(5))
            .optional("data", FieldKind::Date)
            .optional("struttura", FieldKind::choice(&["R3", "R3D"]))
            .optional("udito", FieldKind::multi_choice(&["normoudente", "ipoacusia"]))
            .optional("opzioni", FieldKind::list(FieldKind::object(opzione)))
    }

    fn paths(violations: &[Violation]) -> Vec<&str> {
        violations.iter().map(|v| v.path.as_str()).collect()
    }

    #[test]
    fn test_exact_fields_accepted() {
        let payload = validate_payload(&schema(), &json!({"a": 1, "peso_kg": null})).unwrap();
        assert_eq!(payload.get("a"), Some(&json!(1)));
    }

    #[test]
    fn test_extra_field_rejected() {
        let err = validate_payload(&schema(), &json!({"a": 1, "peso_kg": 70, "b": 2})).unwrap_err();
        assert_eq!(err, vec![Violation::new("b", ViolationKind::UnexpectedField)]);
    }

    #[test]
    fn test_collects_every_violation() {
        let raw = json!({
            "peso_kg": -1,
            "nota": "troppo lunga",
            "data": "2024-13-40",
            "struttura": "r3",
            "extra": true
        });
        let err = validate_payload(&schema(), &raw).unwrap_err();
        let found = paths(&err);
        for expected in ["extra", "a", "peso_kg", "nota", "data", "struttura"] {
            assert!(found.contains(&expected), "missing {}", expected);
        }
        assert_eq!(err.len(), 6);
    }

    #[test]
    fn test_presence_rules() {
        // nullable must be present
        let err = validate_payload(&schema(), &json!({"a": 1})).unwrap_err();
        assert_eq!(err, vec![Violation::new("peso_kg", ViolationKind::MissingField)]);

        // required may not be null
        let err = validate_payload(&schema(), &json!({"a": null, "peso_kg": null})).unwrap_err();
        assert_eq!(err, vec![Violation::new("a", ViolationKind::NullNotAllowed)]);

        // optional may be null
        let raw = json!({"a": 1, "peso_kg": 1.5, "nota": null});
        assert!(validate_payload(&schema(), &raw).is_ok());
    }

    #[test]
    fn test_integer_rejects_fraction() {
        let err = validate_payload(&schema(), &json!({"a": 1.5, "peso_kg": null})).unwrap_err();
        assert_eq!(
            err,
            vec![Violation::new("a", ViolationKind::WrongType { expected: "integer" })]
        );
    }

    #[test]
    fn test_choice_is_case_sensitive() {
        let ok = json!({"a": 1, "peso_kg": null, "struttura": "R3D"});
        assert!(validate_payload(&schema(), &ok).is_ok());

        let bad = json!({"a": 1, "peso_kg": null, "struttura": "r3d"});
        let err = validate_payload(&schema(), &bad).unwrap_err();
        assert_eq!(
            err[0].kind,
            ViolationKind::NotAllowedValue {
                value: "r3d".into()
            }
        );
    }

    #[test]
    fn test_single_choice_rejects_array() {
        let raw = json!({"a": 1, "peso_kg": null, "struttura": ["R3"]});
        let err = validate_payload(&schema(), &raw).unwrap_err();
        assert_eq!(
            err[0].kind,
            ViolationKind::WrongType { expected: "choice" }
        );
    }

    #[test]
    fn test_multi_choice_checks_each_element() {
        let raw = json!({"a": 1, "peso_kg": null, "udito": ["ipoacusia", "sordo"]});
        let err = validate_payload(&schema(), &raw).unwrap_err();
        assert_eq!(paths(&err), vec!["udito[1]"]);

        let ok = json!({"a": 1, "peso_kg": null, "udito": ["ipoacusia", "normoudente"]});
        assert!(validate_payload(&schema(), &ok).is_ok());
    }

    #[test]
    fn test_nested_paths() {
        let raw = json!({
            "a": 1,
            "peso_kg": null,
            "opzioni": [
                {"descrizione": "x", "punteggio": 1},
                {"descrizione": "y", "punteggio": "tre", "extra": 1}
            ]
        });
        let err = validate_payload(&schema(), &raw).unwrap_err();
        let found = paths(&err);
        assert!(found.contains(&"opzioni[1].punteggio"));
        assert!(found.contains(&"opzioni[1].extra"));
        assert_eq!(err.len(), 2);
    }

    #[test]
    fn test_text_length_counts_chars() {
        let raw = json!({"a": 1, "peso_kg": null, "nota": "àèìòù"});
        assert!(validate_payload(&schema(), &raw).is_ok());
    }

    #[test]
    fn test_non_object_root() {
        let err = validate_payload(&schema(), &json!([1, 2])).unwrap_err();
        assert_eq!(
            err,
            vec![Violation::new(ROOT_PATH, ViolationKind::WrongType { expected: "object" })]
        );
    }
}
