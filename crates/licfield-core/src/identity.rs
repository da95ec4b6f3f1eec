//! # License Identifier Newtype
//!
//! Catalog records are keyed by a small integer id. Select widgets hand the
//! chosen option back as text, so [`LicenseId`] parses from a string as well
//! as deserializing from a JSON/YAML integer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseLicenseIdError;

/// Unique identifier of a license within the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LicenseId(pub u32);

impl LicenseId {
    /// Access the inner integer.
    pub fn get(self) -> u32 {
        self.0
    }

    /// Parse the raw value of a select input.
    ///
    /// Blank or non-numeric input yields `None`, which the field treats as
    /// "no selection".
    pub fn from_input(raw: &str) -> Option<Self> {
        raw.parse().ok()
    }
}

impl fmt::Display for LicenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for LicenseId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl FromStr for LicenseId {
    type Err = ParseLicenseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .map(Self)
            .map_err(|_| ParseLicenseIdError {
                input: s.to_string(),
            })
    }
}
