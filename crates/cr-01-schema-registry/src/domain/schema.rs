//! # Structural Schema
//!
//! Closed field lists describing one version of a module payload.
//!
//! ```ignore
//! let schema = ModuleSchema::new()
//!     .required("a", FieldKind::integer())
//!     .optional("note", FieldKind::text(200));
//! ```

/// Whether a field must be present and whether it may be `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Key must be present with a non-null value.
    Required,
    /// Key must be present; value may be `null`.
    Nullable,
    /// Key may be absent or `null`.
    Optional,
}

impl Presence {
    /// Lower-case label used in schema descriptions.
    pub fn as_str(&self) -> &'static str {
        match self {
            Presence::Required => "required",
            Presence::Nullable => "nullable",
            Presence::Optional => "optional",
        }
    }
}

/// Structural type of a field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// Whole number with optional inclusive bounds.
    Integer {
        /// Lower bound.
        min: Option<i64>,
        /// Upper bound.
        max: Option<i64>,
    },
    /// Any JSON number with optional inclusive bounds.
    Number {
        /// Lower bound.
        min: Option<f64>,
        /// Upper bound.
        max: Option<f64>,
    },
    /// String with optional maximum length in characters.
    Text {
        /// Maximum length.
        max_len: Option<usize>,
    },
    /// `true` / `false`.
    Boolean,
    /// ISO calendar date `YYYY-MM-DD`.
    Date,
    /// Exactly one of the declared values (case-sensitive).
    Choice(Vec<String>),
    /// Array whose every element is one of the declared values.
    MultiChoice(Vec<String>),
    /// Array of values of one kind.
    List(Box<FieldKind>),
    /// Nested closed object.
    Object(ModuleSchema),
}

impl FieldKind {
    /// Unbounded integer.
    pub fn integer() -> Self {
        FieldKind::Integer {
            min: None,
            max: None,
        }
    }

    /// Integer within `[min, max]`.
    pub fn integer_between(min: i64, max: i64) -> Self {
        FieldKind::Integer {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Integer `>= min`.
    pub fn integer_at_least(min: i64) -> Self {
        FieldKind::Integer {
            min: Some(min),
            max: None,
        }
    }

    /// Unbounded number.
    pub fn number() -> Self {
        FieldKind::Number {
            min: None,
            max: None,
        }
    }

    /// Number within `[min, max]`.
    pub fn number_between(min: f64, max: f64) -> Self {
        FieldKind::Number {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Number `>= min`.
    pub fn number_at_least(min: f64) -> Self {
        FieldKind::Number {
            min: Some(min),
            max: None,
        }
    }

    /// Text without a length limit.
    pub fn free_text() -> Self {
        FieldKind::Text { max_len: None }
    }

    /// Text of at most `max_len` characters.
    pub fn text(max_len: usize) -> Self {
        FieldKind::Text {
            max_len: Some(max_len),
        }
    }

    /// Single choice among `values`.
    pub fn choice(values: &[&str]) -> Self {
        FieldKind::Choice(values.iter().map(|v| v.to_string()).collect())
    }

    /// Any subset of `values`.
    pub fn multi_choice(values: &[&str]) -> Self {
        FieldKind::MultiChoice(values.iter().map(|v| v.to_string()).collect())
    }

    /// Array of `item`.
    pub fn list(item: FieldKind) -> Self {
        FieldKind::List(Box::new(item))
    }

    /// Nested object.
    pub fn object(schema: ModuleSchema) -> Self {
        FieldKind::Object(schema)
    }

    /// Short type label, also used in `WrongType` violations.
    pub fn label(&self) -> &'static str {
        match self {
            FieldKind::Integer { .. } => "integer",
            FieldKind::Number { .. } => "number",
            FieldKind::Text { .. } => "string",
            FieldKind::Boolean => "boolean",
            FieldKind::Date => "date",
            FieldKind::Choice(_) => "choice",
            FieldKind::MultiChoice(_) => "multi_choice",
            FieldKind::List(_) => "list",
            FieldKind::Object(_) => "object",
        }
    }
}

/// One declared field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    /// Key in the payload object.
    pub name: String,
    /// Value type.
    pub kind: FieldKind,
    /// Presence rule.
    pub presence: Presence,
}

/// Closed list of fields. Keys not declared here are rejected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModuleSchema {
    fields: Vec<FieldSpec>,
}

impl ModuleSchema {
    /// Empty schema (accepts only `{}`).
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field with an explicit presence rule.
    pub fn field(mut self, name: impl Into<String>, kind: FieldKind, presence: Presence) -> Self {
        self.fields.push(FieldSpec {
            name: name.into(),
            kind,
            presence,
        });
        self
    }

    /// Add a required, non-null field.
    pub fn required(self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.field(name, kind, Presence::Required)
    }

    /// Add a field that must be present but may be `null`.
    pub fn nullable(self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.field(name, kind, Presence::Nullable)
    }

    /// Add a field that may be omitted.
    pub fn optional(self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.field(name, kind, Presence::Optional)
    }

    /// Copy every field of `other` into this schema.
    pub fn extend(mut self, other: &ModuleSchema) -> Self {
        self.fields.extend(other.fields.iter().cloned());
        self
    }

    /// Declared fields in declaration order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Look up a field by name.
    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Names of duplicated keys, if the schema declares any field twice.
    pub fn duplicate_names(&self) -> Vec<String> {
        let mut seen = std::collections::BTreeSet::new();
        let mut dups = Vec::new();
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                dups.push(field.name.clone());
            }
        }
        dups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_keeps_declaration_order() {
        let schema = ModuleSchema::new()
            .required("b", FieldKind::Boolean)
            .nullable("a", FieldKind::integer())
            .optional("c", FieldKind::Date);

        let names: Vec<_> = schema.fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
        assert_eq!(schema.get("a").map(|f| f.presence), Some(Presence::Nullable));
        assert!(schema.get("z").is_none());
    }

    #[test]
    fn test_extend_and_duplicates() {
        let common = ModuleSchema::new().required("firma", FieldKind::text(200));
        let schema = ModuleSchema::new()
            .required("firma", FieldKind::free_text())
            .extend(&common);
        assert_eq!(schema.duplicate_names(), vec!["firma".to_string()]);
    }

    #[test]
    fn test_choice_helpers() {
        assert_eq!(
            FieldKind::choice(&["R3", "R3D"]),
            FieldKind::Choice(vec!["R3".into(), "R3D".into()])
        );
        assert_eq!(FieldKind::list(FieldKind::free_text()).label(), "list");
    }
}
