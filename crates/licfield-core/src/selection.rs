//! # License Selection
//!
//! The bound value of a license field: an optional license id and an
//! optional free-text description. The Form Host owns the value; the field
//! never edits it in place. Every edit is expressed as a [`SelectionPatch`]
//! and merged into a fresh copy.

use serde::{Deserialize, Serialize};

use crate::identity::LicenseId;

/// The current license choice for one form instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LicenseSelection {
    /// Selected license, or `None` for "no selection".
    #[serde(default)]
    pub license: Option<LicenseId>,
    /// Free-text description. Only meaningful for custom licenses.
    #[serde(default)]
    pub license_description: Option<String>,
}

impl LicenseSelection {
    /// A selection with a license and no description.
    pub fn with_license(license: LicenseId) -> Self {
        Self {
            license: Some(license),
            license_description: None,
        }
    }

    /// Builder-style description setter.
    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.license_description = Some(description.into());
        self
    }

    /// The description if it has visible text.
    ///
    /// Whitespace-only text counts as blank.
    pub fn description_text(&self) -> Option<&str> {
        self.license_description
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }

    /// Apply `patch` to a copy of this selection.
    ///
    /// Fields the patch does not touch are carried over unchanged. In
    /// particular, changing the license keeps any previously typed
    /// description.
    pub fn merged(&self, patch: &SelectionPatch) -> Self {
        Self {
            license: patch.license.unwrap_or(self.license),
            license_description: match &patch.license_description {
                Some(description) => description.clone(),
                None => self.license_description.clone(),
            },
        }
    }

    /// The license fields of a content item copied from (or synced with)
    /// `source`, with `mods` applied on top.
    pub fn copied_from(source: &Self, mods: Option<&SelectionPatch>) -> Self {
        match mods {
            Some(patch) => source.merged(patch),
            None => source.clone(),
        }
    }
}

/// A partial edit to a [`LicenseSelection`].
///
/// The outer `Option` says whether the field is touched; the inner value is
/// the new content, where `None` clears the field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionPatch {
    /// New license choice, if edited.
    pub license: Option<Option<LicenseId>>,
    /// New description, if edited.
    pub license_description: Option<Option<String>>,
}

impl SelectionPatch {
    /// An edit of the license choice only.
    pub fn license(license: Option<LicenseId>) -> Self {
        Self {
            license: Some(license),
            license_description: None,
        }
    }

    /// An edit of the description only.
    pub fn description(description: Option<String>) -> Self {
        Self {
            license: None,
            license_description: Some(description),
        }
    }

    /// Whether the patch touches nothing.
    pub fn is_empty(&self) -> bool {
        self.license.is_none() && self.license_description.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unset() {
        let selection = LicenseSelection::default();
        assert_eq!(selection.license, None);
        assert_eq!(selection.license_description, None);
    }

    #[test]
    fn test_license_edit_preserves_description() {
        let current =
            LicenseSelection::with_license(LicenseId(9)).described("Used with permission");
        let next = current.merged(&SelectionPatch::license(Some(LicenseId(1))));
        assert_eq!(next.license, Some(LicenseId(1)));
        assert_eq!(next.license_description.as_deref(), Some("Used with permission"));
        // the original is untouched
        assert_eq!(current.license, Some(LicenseId(9)));
    }

    #[test]
    fn test_description_edit_preserves_license() {
        let current = LicenseSelection::with_license(LicenseId(9));
        let next = current.merged(&SelectionPatch::description(Some("text".into())));
        assert_eq!(next.license, Some(LicenseId(9)));
        assert_eq!(next.license_description.as_deref(), Some("text"));
    }

    #[test]
    fn test_patch_can_clear_fields() {
        let current = LicenseSelection::with_license(LicenseId(9)).described("text");
        let cleared = current
            .merged(&SelectionPatch::description(None))
            .merged(&SelectionPatch::license(None));
        assert_eq!(cleared, LicenseSelection::default());
    }

    #[test]
    fn test_empty_patch_is_identity() {
        let current = LicenseSelection::with_license(LicenseId(3));
        assert!(SelectionPatch::default().is_empty());
        assert_eq!(current.merged(&SelectionPatch::default()), current);
    }

    #[test]
    fn test_description_text_trims() {
        let blank = LicenseSelection::with_license(LicenseId(9)).described("   \t");
        assert_eq!(blank.description_text(), None);
        let padded = LicenseSelection::with_license(LicenseId(9)).described("  ok ");
        assert_eq!(padded.description_text(), Some("ok"));
    }

    #[test]
    fn test_copied_from_carries_license_fields() {
        let source = LicenseSelection::with_license(LicenseId(9)).described("Partner terms");
        assert_eq!(LicenseSelection::copied_from(&source, None), source);
    }

    #[test]
    fn test_copied_from_applies_mods() {
        let source = LicenseSelection::with_license(LicenseId(9)).described("Partner terms");
        let mods = SelectionPatch::license(Some(LicenseId(2)));
        let copy = LicenseSelection::copied_from(&source, Some(&mods));
        assert_eq!(copy.license, Some(LicenseId(2)));
        assert_eq!(copy.license_description.as_deref(), Some("Partner terms"));
    }

    #[test]
    fn test_deserialize_with_missing_fields() {
        let selection: LicenseSelection = serde_json::from_str(r#"{"license": 4}"#).unwrap();
        assert_eq!(selection.license, Some(LicenseId(4)));
        assert_eq!(selection.license_description, None);

        let explicit_null: LicenseSelection =
            serde_json::from_str(r#"{"license": 9, "license_description": null}"#).unwrap();
        assert_eq!(explicit_null.license_description, None);
    }

    #[test]
    fn test_deserialize_rejects_mistyped_key() {
        let result: Result<LicenseSelection, _> = serde_json::from_str(r#"{"licence": 9}"#);
        assert!(result.is_err());
    }
}
