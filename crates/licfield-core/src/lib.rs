//! # licfield-core — Foundational Types for License Fields
//!
//! Defines the data every other `licfield-*` crate works with: license ids,
//! the read-only license catalog, the selection a form binds to a license
//! field, and the flags that configure that field.
//!
//! ## Key Design Principles
//!
//! 1. **Injected catalog.** Nothing reads a module-level catalog. Consumers
//!    take a [`LicenseLookup`] so tests can supply synthetic record sets.
//!
//! 2. **Custom is a flag.** A license requires a description because its
//!    record says `is_custom`, never because of its id or name.
//!
//! 3. **Copy, then merge.** A [`LicenseSelection`] is edited by merging a
//!    [`SelectionPatch`] into a new value. The previous value is untouched.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `licfield-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod catalog;
pub mod config;
pub mod error;
pub mod identity;
pub mod selection;

// Re-export primary types for ergonomic imports.
pub use catalog::{LicenseCatalog, LicenseLookup, LicenseRecord};
pub use config::{LicfieldConfig, ValidatorConfig};
pub use error::{CatalogError, ConfigError, ParseLicenseIdError};
pub use identity::LicenseId;
pub use selection::{LicenseSelection, SelectionPatch};
