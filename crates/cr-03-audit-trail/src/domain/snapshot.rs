//! # Snapshots
//!
//! Entities are serialized through serde and sensitive top-level fields are
//! replaced by [`MASK_TOKEN`] before anything reaches a record.

use super::errors::AuditError;
use super::record::EntityKind;
use serde::Serialize;
use serde_json::{Map, Value};

/// Replacement text for masked fields.
pub const MASK_TOKEN: &str = "<encrypted>";

/// Field names masked for every entity.
pub const ALWAYS_MASKED: &[&str] = &["password", "hashed_password"];

/// An entity that can be audited.
pub trait Auditable: Serialize {
    /// Entity kind recorded in the audit row.
    const KIND: EntityKind;

    /// Entity identifier as text.
    fn audit_id(&self) -> String;

    /// Entity-specific fields holding encrypted data or secrets.
    fn masked_fields() -> &'static [&'static str] {
        &[]
    }
}

fn is_masked<T: Auditable>(field: &str) -> bool {
    ALWAYS_MASKED.contains(&field) || T::masked_fields().contains(&field)
}

/// Serialize without masking. Only for diffing; never store the result.
fn raw_fields<T: Auditable>(entity: &T) -> Result<Map<String, Value>, AuditError> {
    match serde_json::to_value(entity) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(AuditError::Snapshot(format!(
            "{} does not serialize to an object",
            T::KIND
        ))),
        Err(e) => Err(AuditError::Snapshot(e.to_string())),
    }
}

fn mask<T: Auditable>(mut fields: Map<String, Value>) -> Value {
    for (name, value) in fields.iter_mut() {
        if is_masked::<T>(name) && !value.is_null() {
            *value = Value::String(MASK_TOKEN.to_string());
        }
    }
    Value::Object(fields)
}

/// Full masked snapshot.
pub fn snapshot<T: Auditable>(entity: &T) -> Result<Value, AuditError> {
    raw_fields(entity).map(mask::<T>)
}

/// Previous values of the fields that changed between `before` and `after`,
/// masked. `None` when nothing changed.
pub fn sparse_diff<T: Auditable>(before: &T, after: &T) -> Result<Option<Value>, AuditError> {
    let old = raw_fields(before)?;
    let new = raw_fields(after)?;

    let mut changed = Map::new();
    for (name, old_value) in &old {
        if new.get(name) != Some(old_value) {
            changed.insert(name.clone(), old_value.clone());
        }
    }
    for name in new.keys() {
        if !old.contains_key(name) {
            changed.insert(name.clone(), Value::Null);
        }
    }

    if changed.is_empty() {
        Ok(None)
    } else {
        Ok(Some(mask::<T>(changed)))
    }
}

/// Whether a snapshot contains a sensitive field in clear.
pub fn leaks_sensitive<T: Auditable>(snapshot: &Value) -> bool {
    let Some(map) = snapshot.as_object() else {
        return false;
    };
    map.iter().any(|(name, value)| {
        is_masked::<T>(name) && !value.is_null() && value.as_str() != Some(MASK_TOKEN)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize, Clone)]
    struct Account {
        id: u32,
        name: String,
        hashed_password: String,
        token: Option<String>,
    }

    impl Auditable for Account {
        const KIND: EntityKind = EntityKind::ModuleCatalog;

        fn audit_id(&self) -> String {
            self.id.to_string()
        }

        fn masked_fields() -> &'static [&'static str] {
            &["token"]
        }
    }

    fn account() -> Account {
        Account {
            id: 1,
            name: "a".into(),
            hashed_password: "$argon2$...".into(),
            token: Some("s3cr3t".into()),
        }
    }

    #[test]
    fn test_snapshot_masks_secrets() {
        let snap = snapshot(&account()).unwrap();
        assert_eq!(snap["hashed_password"], MASK_TOKEN);
        assert_eq!(snap["token"], MASK_TOKEN);
        assert_eq!(snap["name"], "a");
        assert!(!leaks_sensitive::<Account>(&snap));
    }

    #[test]
    fn test_null_secret_stays_null() {
        let mut a = account();
        a.token = None;
        assert_eq!(snapshot(&a).unwrap()["token"], Value::Null);
    }

    #[test]
    fn test_diff_contains_only_changed_fields() {
        let before = account();
        let mut after = account();
        after.name = "b".into();

        let diff = sparse_diff(&before, &after).unwrap().unwrap();
        assert_eq!(diff, json!({"name": "a"}));
    }

    #[test]
    fn test_diff_masks_changed_secret() {
        let before = account();
        let mut after = account();
        after.token = Some("other".into());

        let diff = sparse_diff(&before, &after).unwrap().unwrap();
        assert_eq!(diff, json!({"token": MASK_TOKEN}));
    }

    #[test]
    fn test_no_change_no_diff() {
        assert!(sparse_diff(&account(), &account()).unwrap().is_none());
    }

    #[test]
    fn test_leak_detection() {
        assert!(leaks_sensitive::<Account>(&json!({"token": "s3cr3t"})));
    }
}
