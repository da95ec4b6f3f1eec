//! # Settings Resolution
//!
//! Combines the optional config file with command-line flags. Flags win
//! over the config file; the config file wins over built-in defaults.

use std::path::Path;

use anyhow::{Context, Result};

use licfield_core::{LicenseCatalog, LicfieldConfig};

/// Load the config file if one was given, otherwise use defaults.
pub fn load_config(path: Option<&Path>) -> Result<LicfieldConfig> {
    match path {
        Some(path) => LicfieldConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(LicfieldConfig::default()),
    }
}

/// Load the catalog named by `flag`, else by the config, else the
/// built-in catalog.
pub fn resolve_catalog(flag: Option<&Path>, config: &LicfieldConfig) -> Result<LicenseCatalog> {
    match flag.or(config.catalog.as_deref()) {
        Some(path) => LicenseCatalog::load(path)
            .with_context(|| format!("failed to load catalog {}", path.display())),
        None => {
            tracing::debug!("using built-in license catalog");
            LicenseCatalog::builtin().context("built-in catalog is malformed")
        }
    }
}
