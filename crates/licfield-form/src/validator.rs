//! # License Field Validator
//!
//! Decides, for a selection, its field config, and an injected catalog,
//! whether the license selector and the description field are valid.
//!
//! ## Rules
//!
//! 1. **License.** Always valid when the field is optional. Otherwise valid
//!    iff the selected id names a record in the catalog. An id the catalog
//!    does not know is treated exactly like no selection.
//! 2. **Description.** Valid unless the selected record is flagged
//!    `is_custom`. For a custom license, valid iff the description has
//!    non-whitespace text. With no (known) license selected the rule has
//!    nothing to apply to and the description is valid.
//!
//! `readonly` and `disabled` are never consulted. Every call recomputes from
//! its arguments; no outcome is cached between calls.

use licfield_core::{LicenseLookup, LicenseRecord, LicenseSelection, ValidatorConfig};
use licfield_state::{DescriptionObservation, LicenseObservation};

use crate::error::FieldError;

/// Validates license selections against a catalog.
#[derive(Debug, Clone)]
pub struct LicenseFieldValidator<L> {
    catalog: L,
}

impl<L: LicenseLookup> LicenseFieldValidator<L> {
    /// Create a validator over `catalog`.
    pub fn new(catalog: L) -> Self {
        Self { catalog }
    }

    /// The injected catalog.
    pub fn catalog(&self) -> &L {
        &self.catalog
    }

    /// The catalog record for the selected license, if any.
    pub fn selected_record(&self, selection: &LicenseSelection) -> Option<&LicenseRecord> {
        self.catalog.find_license(selection.license?)
    }

    /// Like [`Self::selected_record`], but logs an id the catalog does not
    /// know. Called once per check or observation.
    fn lookup_logged(&self, selection: &LicenseSelection) -> Option<&LicenseRecord> {
        let record = self.selected_record(selection);
        if let (None, Some(id)) = (record, selection.license) {
            tracing::debug!(license = %id, "license not in catalog; treating as unset");
        }
        record
    }

    /// Whether the license selector is valid.
    pub fn is_license_valid(&self, selection: &LicenseSelection, config: &ValidatorConfig) -> bool {
        !config.required || self.selected_record(selection).is_some()
    }

    /// Whether the description input applies to this selection.
    pub fn requires_description(&self, selection: &LicenseSelection) -> bool {
        self.selected_record(selection).is_some_and(|record| record.is_custom)
    }

    /// Whether the description field is valid.
    pub fn is_description_valid(&self, selection: &LicenseSelection) -> bool {
        !self.requires_description(selection) || selection.description_text().is_some()
    }

    /// Every failure for `selection`, license first.
    pub fn check(&self, selection: &LicenseSelection, config: &ValidatorConfig) -> Vec<FieldError> {
        let mut errors = Vec::new();
        let record = self.lookup_logged(selection);

        if config.required && record.is_none() {
            errors.push(FieldError::RequiredFieldEmpty);
        }
        if let Some(record) = record.filter(|r| r.is_custom) {
            if selection.description_text().is_none() {
                errors.push(FieldError::DescriptionRequiredForCustomLicense { license: record.id });
            }
        }
        errors
    }

    /// Reduce a selection to what the license state machine needs.
    pub fn license_observation(
        &self,
        selection: &LicenseSelection,
        config: &ValidatorConfig,
    ) -> LicenseObservation {
        LicenseObservation {
            has_license: self.lookup_logged(selection).is_some(),
            required: config.required,
        }
    }

    /// Reduce a selection to what the description state machine needs.
    pub fn description_observation(&self, selection: &LicenseSelection) -> DescriptionObservation {
        DescriptionObservation {
            custom_selected: self.requires_description(selection),
            has_text: selection.description_text().is_some(),
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use licfield_core::LicenseId;

    const CUSTOM: LicenseId = LicenseId(9);
    const CC_BY: LicenseId = LicenseId(1);

    fn validator() -> LicenseFieldValidator<Vec<LicenseRecord>> {
        LicenseFieldValidator::new(vec![
            LicenseRecord::new(CC_BY, "CC BY", false),
            LicenseRecord::new(CUSTOM, "Special Permissions", true),
        ])
    }

    // ── isLicenseValid ───────────────────────────────────────────────

    #[test]
    fn test_required_without_license_is_invalid() {
        let v = validator();
        assert!(!v.is_license_valid(&LicenseSelection::default(), &ValidatorConfig::default()));
    }

    #[test]
    fn test_optional_without_license_is_valid() {
        let v = validator();
        assert!(v.is_license_valid(&LicenseSelection::default(), &ValidatorConfig::optional()));
    }

    #[test]
    fn test_known_license_is_valid() {
        let v = validator();
        let selection = LicenseSelection::with_license(CC_BY);
        assert!(v.is_license_valid(&selection, &ValidatorConfig::default()));
    }

    #[test]
    fn test_unknown_license_counts_as_unset() {
        let v = validator();
        let selection = LicenseSelection::with_license(LicenseId(404));
        assert!(!v.is_license_valid(&selection, &ValidatorConfig::default()));
        assert!(v.is_license_valid(&selection, &ValidatorConfig::optional()));
        assert!(v.is_description_valid(&selection));
        assert_eq!(
            v.check(&selection, &ValidatorConfig::default()),
            [FieldError::RequiredFieldEmpty]
        );
    }

    // ── isDescriptionValid ───────────────────────────────────────────

    #[test]
    fn test_description_irrelevant_for_standard_license() {
        let v = validator();
        let selection = LicenseSelection::with_license(CC_BY);
        assert!(!v.requires_description(&selection));
        assert!(v.is_description_valid(&selection));
    }

    #[test]
    fn test_description_vacuous_without_selection() {
        let v = validator();
        assert!(v.is_description_valid(&LicenseSelection::default()));
    }

    #[test]
    fn test_custom_license_requires_text() {
        let v = validator();
        let missing = LicenseSelection::with_license(CUSTOM);
        let empty = LicenseSelection::with_license(CUSTOM).described("");
        let blank = LicenseSelection::with_license(CUSTOM).described("   ");
        let present = LicenseSelection::with_license(CUSTOM).described("Used with permission");
        assert!(!v.is_description_valid(&missing));
        assert!(!v.is_description_valid(&empty));
        assert!(!v.is_description_valid(&blank));
        assert!(v.is_description_valid(&present));
    }

    #[test]
    fn test_description_requirement_ignores_required_flag() {
        let v = validator();
        let selection = LicenseSelection::with_license(CUSTOM);
        let errors = v.check(&selection, &ValidatorConfig::optional());
        assert_eq!(
            errors,
            [FieldError::DescriptionRequiredForCustomLicense { license: CUSTOM }]
        );
    }

    #[test]
    fn test_check_reports_nothing_when_valid() {
        let v = validator();
        let selection = LicenseSelection::with_license(CUSTOM).described("ok");
        assert!(v.check(&selection, &ValidatorConfig::default()).is_empty());
    }

    #[test]
    fn test_readonly_and_disabled_do_not_change_outcome() {
        let v = validator();
        let selection = LicenseSelection::with_license(CUSTOM);
        let base = ValidatorConfig::default();
        let locked = ValidatorConfig {
            readonly: true,
            disabled: true,
            ..base
        };
        assert_eq!(v.check(&selection, &base), v.check(&selection, &locked));
    }

    // ── Observations ─────────────────────────────────────────────────

    #[test]
    fn test_observations() {
        let v = validator();
        let selection = LicenseSelection::with_license(CUSTOM).described(" x ");
        let license = v.license_observation(&selection, &ValidatorConfig::default());
        assert!(license.has_license);
        assert!(license.required);
        let description = v.description_observation(&selection);
        assert!(description.custom_selected);
        assert!(description.has_text);
    }
}
