//! # Core Value Types
//!
//! Identifiers and small enums shared by all subsystems.
//!
//! ## Clusters
//!
//! - **Identity**: `UserId`, `RoleId`, `OrgUnitId`, `DossierId`, `EntryId`
//! - **Data**: `Payload`, `Timestamp`, `SchemaVersion`
//! - **Operations**: `Action`

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// =============================================================================
// IDENTITY
// =============================================================================

/// Identifier of an authenticated user.
pub type UserId = Uuid;

/// Identifier of a role (named set of permitted module codes).
pub type RoleId = Uuid;

/// Identifier of an organizational unit (facility / department).
pub type OrgUnitId = Uuid;

/// Identifier of a dossier (clinical case record).
pub type DossierId = Uuid;

/// Identifier of a module entry.
pub type EntryId = Uuid;

// =============================================================================
// DATA
// =============================================================================

/// Structured module payload, always plaintext while in memory.
///
/// Keys are semantically unordered; `serde_json::Map` keeps them sorted,
/// which gives a canonical text form for hashing.
pub type Payload = serde_json::Map<String, serde_json::Value>;

/// UTC instant used for every system and clinical timestamp.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Schema version tag. Versions start at 1.
pub type SchemaVersion = u32;

// =============================================================================
// OPERATIONS
// =============================================================================

/// Kind of operation requested against a module, dossier or entry.
///
/// The same vocabulary is used by the access gate and by audit records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    /// Read access.
    Read,
    /// Creation of a new record.
    Create,
    /// In-place modification (including version upgrade and restore).
    Update,
    /// Soft or hard deletion.
    Delete,
}

impl Action {
    /// Upper-case label, as stored in audit records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Read => "READ",
            Action::Create => "CREATE",
            Action::Update => "UPDATE",
            Action::Delete => "DELETE",
        }
    }

    /// Whether the action changes stored state.
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Action::Read)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
