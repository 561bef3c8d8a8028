//! # Module Catalog
//!
//! Administrative rows describing module families. Independent of the
//! schema registry: the catalog is data, the registry is code.

use super::errors::EntryError;
use chrono::NaiveDate;
use cr_03_audit_trail::{Auditable, EntityKind};
use serde::{Deserialize, Serialize};
use shared_types::SchemaVersion;

/// Maximum code length after trimming.
pub const MAX_CODE_LEN: usize = 10;

/// Maximum display-name length.
pub const MAX_NAME_LEN: usize = 100;

/// One catalog row, keyed by its normalized code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleCatalogEntry {
    /// Upper-case code.
    pub code: String,
    /// Display name.
    pub name: Option<String>,
    /// Version new entries should use.
    pub current_schema_version: SchemaVersion,
    /// Whether the module is offered.
    pub active: bool,
    /// Day of the last change.
    pub updated_at: NaiveDate,
}

impl Auditable for ModuleCatalogEntry {
    const KIND: EntityKind = EntityKind::ModuleCatalog;

    fn audit_id(&self) -> String {
        self.code.clone()
    }
}

/// Create request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCatalogEntry {
    /// Code; trimmed and upper-cased.
    pub code: String,
    /// Display name.
    pub name: Option<String>,
    /// Must be positive.
    pub current_schema_version: SchemaVersion,
    /// Defaults to `true`.
    pub active: bool,
}

impl NewCatalogEntry {
    /// Active module.
    pub fn new(code: impl Into<String>, name: impl Into<String>, version: SchemaVersion) -> Self {
        Self {
            code: code.into(),
            name: Some(name.into()),
            current_schema_version: version,
            active: true,
        }
    }
}

/// Partial update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogPatch {
    /// New name.
    pub name: Option<String>,
    /// New current version; must be positive.
    pub current_schema_version: Option<SchemaVersion>,
    /// New active flag.
    pub active: Option<bool>,
}

/// Listing filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogFilter {
    /// Case-insensitive substring of code or name.
    pub query: Option<String>,
    /// Only active modules.
    pub active_only: bool,
}

impl CatalogFilter {
    /// Whether a row matches.
    pub fn matches(&self, entry: &ModuleCatalogEntry) -> bool {
        if self.active_only && !entry.active {
            return false;
        }
        let Some(query) = self.query.as_deref().map(str::trim).filter(|q| !q.is_empty()) else {
            return true;
        };
        let needle = query.to_lowercase();
        entry.code.to_lowercase().contains(&needle)
            || entry
                .name
                .as_deref()
                .is_some_and(|name| name.to_lowercase().contains(&needle))
    }
}

/// Trim, require non-empty, cap at [`MAX_CODE_LEN`] characters, upper-case.
pub fn normalize_code(raw: &str) -> Result<String, EntryError> {
    let code = raw.trim();
    if code.is_empty() {
        return Err(EntryError::InvalidRequest("code required".into()));
    }
    if code.chars().count() > MAX_CODE_LEN {
        return Err(EntryError::InvalidRequest(format!(
            "code max length {}",
            MAX_CODE_LEN
        )));
    }
    Ok(code.to_uppercase())
}

/// Version must be positive.
pub fn check_schema_version(version: SchemaVersion) -> Result<(), EntryError> {
    if version == 0 {
        return Err(EntryError::InvalidRequest(
            "current_schema_version must be > 0".into(),
        ));
    }
    Ok(())
}

/// Name must fit [`MAX_NAME_LEN`].
pub fn check_name(name: Option<&str>) -> Result<(), EntryError> {
    match name {
        Some(name) if name.chars().count() > MAX_NAME_LEN => Err(EntryError::InvalidRequest(
            format!("name max length {}", MAX_NAME_LEN),
        )),
        _ => Ok(()),
    }
}

impl CatalogPatch {
    /// Validate and apply to `entry`, stamping `today`.
    pub fn apply(
        &self,
        entry: &mut ModuleCatalogEntry,
        today: NaiveDate,
    ) -> Result<(), EntryError> {
        check_name(self.name.as_deref())?;
        if let Some(version) = self.current_schema_version {
            check_schema_version(version)?;
            entry.current_schema_version = version;
        }
        if let Some(name) = &self.name {
            entry.name = Some(name.clone());
        }
        if let Some(active) = self.active {
            entry.active = active;
        }
        entry.updated_at = today;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> ModuleCatalogEntry {
        ModuleCatalogEntry {
            code: "ROG26/1.4".into(),
            name: Some("Valutazione infermieristica".into()),
            current_schema_version: 1,
            active: true,
            updated_at: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        }
    }

    #[test]
    fn test_code_normalization() {
        assert_eq!(normalize_code("  rog26/1.4 ").unwrap(), "ROG26/1.4");
        assert!(normalize_code("   ").is_err());
        assert!(normalize_code("ABCDEFGHIJK").is_err());
        assert_eq!(normalize_code("ABCDEFGHIJ").unwrap(), "ABCDEFGHIJ");
    }

    #[test]
    fn test_version_must_be_positive() {
        assert!(check_schema_version(0).is_err());
        assert!(check_schema_version(3).is_ok());
    }

    #[test]
    fn test_filter_matches_code_or_name() {
        let entry = row();
        let by_name = CatalogFilter {
            query: Some("INFERM".into()),
            active_only: false,
        };
        let by_code = CatalogFilter {
            query: Some("rog26".into()),
            active_only: true,
        };
        let miss = CatalogFilter {
            query: Some("presa".into()),
            active_only: false,
        };
        assert!(by_name.matches(&entry));
        assert!(by_code.matches(&entry));
        assert!(!miss.matches(&entry));

        let mut inactive = row();
        inactive.active = false;
        assert!(!by_code.matches(&inactive));
    }

    #[test]
    fn test_patch_applies_partially() {
        let mut entry = row();
        let today = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        CatalogPatch {
            current_schema_version: Some(2),
            ..Default::default()
        }
        .apply(&mut entry, today)
        .unwrap();
        assert_eq!(entry.current_schema_version, 2);
        assert_eq!(entry.name.as_deref(), Some("Valutazione infermieristica"));
        assert_eq!(entry.updated_at, today);

        let bad = CatalogPatch {
            current_schema_version: Some(0),
            ..Default::default()
        };
        assert!(bad.apply(&mut entry, today).is_err());
    }
}
