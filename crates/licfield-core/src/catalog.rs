//! # License Catalog
//!
//! The static, read-only list of license definitions available to the
//! application. A catalog is loaded once at process start and never mutated
//! afterwards; form instances share it through the [`LicenseLookup`] seam.
//!
//! ## Custom Licenses
//!
//! A record flagged `is_custom` requires a free-text description whenever it
//! is selected. The flag is per record: a catalog may carry zero, one, or
//! several custom licenses, and nothing in this crate keys off a particular
//! id or name.
//!
//! ## File Format
//!
//! Catalog files are YAML or JSON, either a bare sequence of records or a
//! mapping with a `licenses` key:
//!
//! ```yaml
//! licenses:
//!   - id: 1
//!     name: CC BY
//!   - id: 9
//!     name: Special Permissions
//!     is_custom: true
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::identity::LicenseId;

const BUILTIN_CATALOG: &str = include_str!("../catalog/builtin.yaml");

// ─── License Record ──────────────────────────────────────────────────

/// One license definition from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LicenseRecord {
    /// Catalog-wide unique identifier.
    pub id: LicenseId,
    /// Human-readable display text.
    pub name: String,
    /// Whether selecting this license requires a free-text description.
    #[serde(default)]
    pub is_custom: bool,
    /// Link to the full license text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Short summary of what the license permits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether content under this license must name a copyright holder.
    #[serde(default)]
    pub copyright_holder_required: bool,
}

impl LicenseRecord {
    /// Create a record with no optional metadata.
    pub fn new(id: impl Into<LicenseId>, name: impl Into<String>, is_custom: bool) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_custom,
            url: None,
            description: None,
            copyright_holder_required: false,
        }
    }
}

// ─── Lookup Seam ─────────────────────────────────────────────────────

/// Read-only access to a set of license records.
///
/// Validators take this as an injected dependency rather than reaching for a
/// global catalog, so tests can supply synthetic record sets.
pub trait LicenseLookup {
    /// Find the record with the given id.
    fn find_license(&self, id: LicenseId) -> Option<&LicenseRecord>;

    /// All records in display order.
    fn licenses(&self) -> &[LicenseRecord];

    /// Whether `id` names a record in this catalog.
    fn contains(&self, id: LicenseId) -> bool {
        self.find_license(id).is_some()
    }
}

impl LicenseLookup for [LicenseRecord] {
    fn find_license(&self, id: LicenseId) -> Option<&LicenseRecord> {
        self.iter().find(|record| record.id == id)
    }

    fn licenses(&self) -> &[LicenseRecord] {
        self
    }
}

impl LicenseLookup for Vec<LicenseRecord> {
    fn find_license(&self, id: LicenseId) -> Option<&LicenseRecord> {
        self.as_slice().find_license(id)
    }

    fn licenses(&self) -> &[LicenseRecord] {
        self
    }
}

impl<T: LicenseLookup + ?Sized> LicenseLookup for &T {
    fn find_license(&self, id: LicenseId) -> Option<&LicenseRecord> {
        (**self).find_license(id)
    }

    fn licenses(&self) -> &[LicenseRecord] {
        (**self).licenses()
    }
}

impl<T: LicenseLookup + ?Sized> LicenseLookup for Arc<T> {
    fn find_license(&self, id: LicenseId) -> Option<&LicenseRecord> {
        (**self).find_license(id)
    }

    fn licenses(&self) -> &[LicenseRecord] {
        (**self).licenses()
    }
}

// ─── Catalog ─────────────────────────────────────────────────────────

/// Either catalog file layout.
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    Wrapped(WrappedCatalog),
    Bare(Vec<LicenseRecord>),
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct WrappedCatalog {
    licenses: Vec<LicenseRecord>,
}

impl CatalogDocument {
    fn into_records(self) -> Vec<LicenseRecord> {
        match self {
            Self::Wrapped(WrappedCatalog { licenses }) => licenses,
            Self::Bare(licenses) => licenses,
        }
    }
}

/// A validated, ordered, id-indexed license catalog.
#[derive(Debug, Clone)]
pub struct LicenseCatalog {
    records: Vec<LicenseRecord>,
    index: HashMap<LicenseId, usize>,
}

impl LicenseCatalog {
    /// Build a catalog from records in display order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateId`] if two records share an id and
    /// [`CatalogError::EmptyName`] if a record has a blank name.
    pub fn new(records: Vec<LicenseRecord>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(records.len());
        for (position, record) in records.iter().enumerate() {
            if record.name.trim().is_empty() {
                return Err(CatalogError::EmptyName { id: record.id });
            }
            if index.insert(record.id, position).is_some() {
                return Err(CatalogError::DuplicateId { id: record.id });
            }
        }
        Ok(Self { records, index })
    }

    /// The catalog shipped with the application.
    ///
    /// # Errors
    ///
    /// Only fails if the embedded document is malformed.
    pub fn builtin() -> Result<Self, CatalogError> {
        let catalog = Self::from_yaml_str(BUILTIN_CATALOG)?;
        catalog.log_loaded("builtin");
        Ok(catalog)
    }

    /// Parse a catalog from YAML.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Parse`] on malformed input, or any error from
    /// [`LicenseCatalog::new`].
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let document: CatalogDocument =
            serde_yaml::from_str(yaml).map_err(|e| CatalogError::Parse {
                reason: e.to_string(),
            })?;
        Self::new(document.into_records())
    }

    /// Parse a catalog from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Parse`] on malformed input, or any error from
    /// [`LicenseCatalog::new`].
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let document: CatalogDocument =
            serde_json::from_str(json).map_err(|e| CatalogError::Parse {
                reason: e.to_string(),
            })?;
        Self::new(document.into_records())
    }

    /// Load a catalog file, choosing the parser by extension.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnsupportedFormat`] for extensions other than
    /// `.json`, `.yaml` and `.yml`, [`CatalogError::Io`] if the file cannot be
    /// read, and parse or consistency errors otherwise.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let content = match extension.as_deref() {
            Some("json" | "yaml" | "yml") => std::fs::read_to_string(path)?,
            _ => {
                return Err(CatalogError::UnsupportedFormat {
                    path: path.to_path_buf(),
                })
            }
        };
        let catalog = if extension.as_deref() == Some("json") {
            Self::from_json_str(&content)?
        } else {
            Self::from_yaml_str(&content)?
        };

        catalog.log_loaded(&path.display().to_string());
        Ok(catalog)
    }

    fn log_loaded(&self, source: &str) {
        let custom = self.custom_licenses().count();
        tracing::info!(source, licenses = self.len(), custom, "loaded license catalog");
        if custom == 0 {
            tracing::warn!(
                source,
                "catalog has no custom license; description will never be required"
            );
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the catalog has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Every record flagged `is_custom`, in display order.
    pub fn custom_licenses(&self) -> impl Iterator<Item = &LicenseRecord> {
        self.records.iter().filter(|record| record.is_custom)
    }

    /// Iterate records in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, LicenseRecord> {
        self.records.iter()
    }
}

impl LicenseLookup for LicenseCatalog {
    fn find_license(&self, id: LicenseId) -> Option<&LicenseRecord> {
        self.index.get(&id).and_then(|&i| self.records.get(i))
    }

    fn licenses(&self) -> &[LicenseRecord] {
        &self.records
    }
}

impl<'a> IntoIterator for &'a LicenseCatalog {
    type Item = &'a LicenseRecord;
    type IntoIter = std::slice::Iter<'a, LicenseRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
