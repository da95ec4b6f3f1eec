//! # Field Errors
//!
//! The validation failures a license control can report. These are
//! values collected into reports, not errors that abort anything: both are
//! cleared by further input.

use serde::Serialize;
use thiserror::Error;

use licfield_core::LicenseId;

/// Which logical field of the license control an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldName {
    /// The license selector.
    License,
    /// The custom-license description.
    LicenseDescription,
}

impl FieldName {
    /// String representation, matching the bound value's keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::License => "license",
            Self::LicenseDescription => "license_description",
        }
    }
}

impl std::fmt::Display for FieldName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user-correctable validation failure.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum FieldError {
    /// No license is selected but the field is required.
    #[error("a license is required")]
    RequiredFieldEmpty,

    /// A custom license is selected and its description is blank.
    #[error("license {license} requires a description")]
    DescriptionRequiredForCustomLicense {
        /// The selected custom license.
        license: LicenseId,
    },
}

impl FieldError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::RequiredFieldEmpty => "required_field_empty",
            Self::DescriptionRequiredForCustomLicense { .. } => {
                "description_required_for_custom_license"
            }
        }
    }

    /// The field the error should be displayed on.
    pub fn field(&self) -> FieldName {
        match self {
            Self::RequiredFieldEmpty => FieldName::License,
            Self::DescriptionRequiredForCustomLicense { .. } => FieldName::LicenseDescription,
        }
    }
}
