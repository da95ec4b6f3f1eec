//! # Error Types
//!
//! Defines the error types raised while loading the license catalog and the
//! field configuration. All errors use `thiserror` for derive-based
//! `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Catalog errors name the offending license id or file path.
//! - Validation outcomes are not errors. A blank required field is a
//!   field state reported by `licfield-form`, never a raised error.

use std::path::PathBuf;

use thiserror::Error;

use crate::identity::LicenseId;

/// Error raised while constructing or loading a [`LicenseCatalog`](crate::LicenseCatalog).
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Two records share the same id.
    #[error("duplicate license id {id} in catalog")]
    DuplicateId {
        /// The repeated id.
        id: LicenseId,
    },

    /// A record has an empty or whitespace-only display name.
    #[error("license {id} has an empty name")]
    EmptyName {
        /// The id of the unnamed record.
        id: LicenseId,
    },

    /// The catalog document did not parse.
    #[error("failed to parse catalog: {reason}")]
    Parse {
        /// Parser message.
        reason: String,
    },

    /// The catalog file extension is not one of `.json`, `.yaml`, `.yml`.
    #[error("unsupported catalog format for '{}'", path.display())]
    UnsupportedFormat {
        /// Path that was rejected.
        path: PathBuf,
    },

    /// IO error reading the catalog file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error raised while loading a [`LicfieldConfig`](crate::LicfieldConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration document did not parse.
    #[error("failed to parse config '{}': {reason}", path.display())]
    Parse {
        /// Path of the configuration file.
        path: PathBuf,
        /// Parser message.
        reason: String,
    },

    /// IO error reading the configuration file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A license id string was not a non-negative integer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("'{input}' is not a license id")]
pub struct ParseLicenseIdError {
    /// The rejected input.
    pub input: String,
}
