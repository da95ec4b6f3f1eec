//! # Configuration
//!
//! [`ValidatorConfig`] carries the per-field flags the Form Host passes as
//! props. [`LicfieldConfig`] is the on-disk configuration read by the CLI:
//! where to find the catalog and the default field flags.
//!
//! ```yaml
//! catalog: licenses.yaml
//! field:
//!   required: false
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_required() -> bool {
    true
}

/// Flags controlling one license field.
///
/// `readonly` and `disabled` only change how the field renders and whether
/// it accepts edits. They never change a validity outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValidatorConfig {
    /// Whether a license selection is mandatory.
    #[serde(default = "default_required")]
    pub required: bool,
    /// View-only rendering; edits are blocked.
    #[serde(default)]
    pub readonly: bool,
    /// The control is inert.
    #[serde(default)]
    pub disabled: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            required: true,
            readonly: false,
            disabled: false,
        }
    }
}

impl ValidatorConfig {
    /// Config for a field whose license may be left empty.
    pub fn optional() -> Self {
        Self {
            required: false,
            ..Self::default()
        }
    }

    /// Whether the field accepts user edits.
    pub fn accepts_edits(&self) -> bool {
        !self.readonly && !self.disabled
    }
}

/// File-backed settings for the `licfield` tool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LicfieldConfig {
    /// Catalog file. The built-in catalog is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,
    /// Default field flags.
    #[serde(default)]
    pub field: ValidatorConfig,
}

impl LicfieldConfig {
    /// Load a config file. `.json` files are parsed as JSON, anything else
    /// as YAML.
    ///
    /// A relative `catalog` path is resolved against the config file's
    /// directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Parse`] if it does not parse.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        let mut config: Self = if is_json {
            serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?
        } else if content.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?
        };

        if let (Some(catalog), Some(base)) = (&config.catalog, path.parent()) {
            if catalog.is_relative() {
                config.catalog = Some(base.join(catalog));
            }
        }
        tracing::debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }
}
