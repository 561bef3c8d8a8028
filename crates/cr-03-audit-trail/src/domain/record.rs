//! # Audit Records
//!
//! Append-only rows: who did what to which entity, and what changed.
//!
//! | Action | before | after |
//! |--------|--------|-------|
//! | CREATE | - | full masked snapshot |
//! | UPDATE | changed fields only | full masked snapshot |
//! | DELETE | full masked snapshot | - |
//! | READ | - | - |

use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared_types::{Action, Actor, RequestContext, Timestamp, UserId};
use std::fmt;

/// Kind of audited entity. Records reference entities by kind + id only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// A clinical module entry.
    ModuleEntries,
    /// A module catalog row.
    ModuleCatalog,
}

impl EntityKind {
    /// Stable label used in stored records.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::ModuleEntries => "module_entries",
            EntityKind::ModuleCatalog => "module_catalog",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who/where/when of one operation, passed explicitly by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditContext {
    /// Acting user.
    pub actor_id: UserId,
    /// Acting user's display name.
    pub actor_name: String,
    /// Client IP.
    pub origin_ip: Option<String>,
    /// Endpoint label.
    pub endpoint: Option<String>,
    /// Operation time.
    pub at: Timestamp,
}

impl AuditContext {
    /// Build from the actor and request descriptors.
    pub fn new(actor: &Actor, request: &RequestContext, at: Timestamp) -> Self {
        Self {
            actor_id: actor.id,
            actor_name: actor.display_name.clone(),
            origin_ip: request.origin_ip.clone(),
            endpoint: request.endpoint.clone(),
            at,
        }
    }
}

/// A record ready to be appended; the store assigns the sequence id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAuditRecord {
    /// Operation time.
    pub timestamp: Timestamp,
    /// Acting user.
    pub actor_id: UserId,
    /// Acting user's display name.
    pub actor_name: String,
    /// Action kind.
    pub action: Action,
    /// Target entity kind.
    pub entity_type: EntityKind,
    /// Target entity id.
    pub entity_id: String,
    /// State before (sparse for UPDATE).
    pub before: Option<Value>,
    /// State after.
    pub after: Option<Value>,
    /// Client IP.
    pub origin_ip: Option<String>,
    /// Endpoint label.
    pub endpoint: Option<String>,
}

impl NewAuditRecord {
    /// Attach the sequence id assigned by the store.
    pub fn into_record(self, sequence: u64) -> AuditRecord {
        AuditRecord {
            sequence,
            timestamp: self.timestamp,
            actor_id: self.actor_id,
            actor_name: self.actor_name,
            action: self.action,
            entity_type: self.entity_type,
            entity_id: self.entity_id,
            before: self.before,
            after: self.after,
            origin_ip: self.origin_ip,
            endpoint: self.endpoint,
        }
    }
}

/// Stored, immutable audit row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    /// Monotonic sequence id.
    pub sequence: u64,
    /// Operation time.
    pub timestamp: Timestamp,
    /// Acting user.
    pub actor_id: UserId,
    /// Acting user's display name.
    pub actor_name: String,
    /// Action kind.
    pub action: Action,
    /// Target entity kind.
    pub entity_type: EntityKind,
    /// Target entity id.
    pub entity_id: String,
    /// State before (sparse for UPDATE).
    pub before: Option<Value>,
    /// State after.
    pub after: Option<Value>,
    /// Client IP.
    pub origin_ip: Option<String>,
    /// Endpoint label.
    pub endpoint: Option<String>,
}
