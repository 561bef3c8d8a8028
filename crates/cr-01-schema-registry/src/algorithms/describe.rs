//! Renders a schema as a JSON document for module listings.

use crate::domain::{FieldKind, ModuleDefinition, ModuleSchema};
use serde_json::{json, Map, Value};

/// Describe a definition: code, version, title and field tree.
pub fn describe_definition(definition: &ModuleDefinition) -> Value {
    json!({
        "code": definition.code(),
        "version": definition.version(),
        "title": definition.title,
        "fields": describe_schema(&definition.schema),
    })
}

/// Describe the fields of a schema in declaration order.
pub fn describe_schema(schema: &ModuleSchema) -> Value {
    Value::Array(
        schema
            .fields()
            .iter()
            .map(|field| {
                let mut out = describe_kind(&field.kind);
                out.insert("name".into(), json!(field.name));
                out.insert("presence".into(), json!(field.presence.as_str()));
                Value::Object(out)
            })
            .collect(),
    )
}

fn describe_kind(kind: &FieldKind) -> Map<String, Value> {
    let mut out = Map::new();
    out.insert("type".into(), json!(kind.label()));
    match kind {
        FieldKind::Integer { min, max } => {
            if let Some(min) = min {
                out.insert("min".into(), json!(min));
            }
            if let Some(max) = max {
                out.insert("max".into(), json!(max));
            }
        }
        FieldKind::Number { min, max } => {
            if let Some(min) = min {
                out.insert("min".into(), json!(min));
            }
            if let Some(max) = max {
                out.insert("max".into(), json!(max));
            }
        }
        FieldKind::Text { max_len: Some(n) } => {
            out.insert("max_len".into(), json!(n));
        }
        FieldKind::Choice(values) | FieldKind::MultiChoice(values) => {
            out.insert("values".into(), json!(values));
        }
        FieldKind::List(item) => {
            out.insert("items".into(), Value::Object(describe_kind(item)));
        }
        FieldKind::Object(schema) => {
            out.insert("fields".into(), describe_schema(schema));
        }
        FieldKind::Text { max_len: None } | FieldKind::Boolean | FieldKind::Date => {}
    }
    out
}
