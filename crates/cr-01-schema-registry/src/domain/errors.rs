//! # Domain Errors
//!
//! Error types for the Schema Registry.

use shared_types::SchemaVersion;
use std::fmt;
use thiserror::Error;

/// Why a single field was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    /// Key not declared by the schema.
    UnexpectedField,
    /// Declared key absent.
    MissingField,
    /// `null` where the field is `Required`.
    NullNotAllowed,
    /// JSON type does not match the declared kind.
    WrongType {
        /// Declared kind label.
        expected: &'static str,
    },
    /// Value outside the declared enumeration.
    NotAllowedValue {
        /// Offending value.
        value: String,
    },
    /// Number outside the declared bounds.
    OutOfRange {
        /// Offending value, as text.
        value: String,
    },
    /// String longer than allowed.
    TooLong {
        /// Maximum length.
        max_len: usize,
        /// Actual length.
        actual: usize,
    },
    /// String is not an ISO `YYYY-MM-DD` date.
    InvalidDate {
        /// Offending value.
        value: String,
    },
}

/// One offending field, located by dotted path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Dotted path, e.g. `utente.struttura` or `opzioni[2].punteggio`; `$` is the root.
    pub path: String,
    /// Reason.
    pub kind: ViolationKind,
}

impl Violation {
    /// Create a violation.
    pub fn new(path: impl Into<String>, kind: ViolationKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ViolationKind::UnexpectedField => write!(f, "{}: unexpected field", self.path),
            ViolationKind::MissingField => write!(f, "{}: missing field", self.path),
            ViolationKind::NullNotAllowed => write!(f, "{}: null not allowed", self.path),
            ViolationKind::WrongType { expected } => {
                write!(f, "{}: expected {}", self.path, expected)
            }
            ViolationKind::NotAllowedValue { value } => {
                write!(f, "{}: value {:?} not allowed", self.path, value)
            }
            ViolationKind::OutOfRange { value } => {
                write!(f, "{}: {} out of range", self.path, value)
            }
            ViolationKind::TooLong { max_len, actual } => {
                write!(f, "{}: length {} exceeds {}", self.path, actual, max_len)
            }
            ViolationKind::InvalidDate { value } => {
                write!(f, "{}: {:?} is not a YYYY-MM-DD date", self.path, value)
            }
        }
    }
}

/// A payload failed structural validation. Lists every offending field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "payload for {code} v{version} has {} violation(s): {}",
    .violations.len(),
    render(.violations)
)]
pub struct SchemaViolation {
    /// Module code.
    pub code: String,
    /// Schema version validated against.
    pub version: SchemaVersion,
    /// All offending fields.
    pub violations: Vec<Violation>,
}

impl SchemaViolation {
    /// Whether a violation at `path` is present.
    pub fn mentions(&self, path: &str) -> bool {
        self.violations.iter().any(|v| v.path == path)
    }
}

fn render(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// A migration step function rejected its input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct StepError(pub String);

/// Forward migration failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MigrationError {
    /// Target precedes source; only forward migration exists.
    #[error("cannot migrate {code} backwards from v{from} to v{to}")]
    Downgrade {
        /// Module code.
        code: String,
        /// Source version.
        from: SchemaVersion,
        /// Requested target.
        to: SchemaVersion,
    },

    /// An intermediate step has no registered definition or function.
    #[error("no migration step to {code} v{missing} (requested v{from} -> v{to})")]
    Gap {
        /// Module code.
        code: String,
        /// Source version.
        from: SchemaVersion,
        /// Requested target.
        to: SchemaVersion,
        /// First missing destination version.
        missing: SchemaVersion,
    },

    /// A step function failed.
    #[error("migration of {code} to v{version} failed: {source}")]
    StepFailed {
        /// Module code.
        code: String,
        /// Destination version of the failing step.
        version: SchemaVersion,
        /// Step error.
        #[source]
        source: StepError,
    },
}

/// Registry lookup and validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// `(code, version)` not registered.
    #[error("unknown schema {code} v{version}")]
    UnknownSchema {
        /// Module code.
        code: String,
        /// Schema version.
        version: SchemaVersion,
    },

    /// No version of this module code is registered.
    #[error("unknown module code {0}")]
    UnknownModule(String),

    /// Payload failed validation.
    #[error(transparent)]
    Violation(#[from] SchemaViolation),

    /// Migration failed.
    #[error(transparent)]
    Migration(#[from] MigrationError),

    /// The definition table handed to the builder is inconsistent.
    #[error("invalid registry table: {0}")]
    InvalidTable(String),
}
