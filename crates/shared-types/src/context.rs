//! # Actor and Request Descriptors
//!
//! Produced by the authentication/session and HTTP collaborators and passed
//! explicitly into every access-gate and audit call.

use crate::entities::{OrgUnitId, RoleId, UserId};
use serde::{Deserialize, Serialize};

/// The authenticated user on whose behalf an operation runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// User identifier.
    pub id: UserId,
    /// Display name recorded in audit records.
    pub display_name: String,
    /// Global administrators bypass module and org-unit checks.
    pub is_administrator: bool,
    /// Assigned role, if any.
    pub role_id: Option<RoleId>,
    /// Assigned organizational unit, if any.
    pub org_unit_id: Option<OrgUnitId>,
}

impl Actor {
    /// Create a non-administrator actor.
    pub fn new(
        id: UserId,
        display_name: impl Into<String>,
        role_id: Option<RoleId>,
        org_unit_id: Option<OrgUnitId>,
    ) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            is_administrator: false,
            role_id,
            org_unit_id,
        }
    }

    /// Create a global administrator with no role or org-unit assignment.
    pub fn administrator(id: UserId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            is_administrator: true,
            role_id: None,
            org_unit_id: None,
        }
    }
}

/// Origin of the inbound call, supplied by the transport collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    /// Client IP address.
    pub origin_ip: Option<String>,
    /// Endpoint label, e.g. `"GET /modules/entries/{id}"`.
    pub endpoint: Option<String>,
}

impl RequestContext {
    /// Create a request context.
    pub fn new(origin_ip: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            origin_ip: Some(origin_ip.into()),
            endpoint: Some(endpoint.into()),
        }
    }

    /// Context for calls that do not originate from a network request.
    pub fn internal(label: impl Into<String>) -> Self {
        Self {
            origin_ip: None,
            endpoint: Some(label.into()),
        }
    }
}
