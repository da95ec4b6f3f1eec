//! # Catalog Subcommand
//!
//! Lists the license catalog in display order and checks catalog files
//! before they are deployed.
//!
//! ## Usage
//!
//! ```bash
//! licfield catalog list
//! licfield catalog list --catalog licenses.yaml --json
//! licfield catalog check licenses.yaml
//! ```

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Args, Subcommand};

use licfield_core::{LicenseCatalog, LicenseLookup, LicfieldConfig};

use crate::settings::resolve_catalog;

/// Catalog subcommand arguments.
#[derive(Args, Debug)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommand,
}

/// Available catalog subcommands.
#[derive(Subcommand, Debug)]
pub enum CatalogCommand {
    /// Print every license in display order.
    List {
        /// Catalog file. Defaults to the configured or built-in catalog.
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Load a catalog file and report whether it is usable.
    Check {
        /// Catalog file (.yaml, .yml or .json).
        path: PathBuf,
    },
}

/// Execute the catalog subcommand.
pub fn run_catalog(args: &CatalogArgs, config: &LicfieldConfig) -> Result<u8> {
    match &args.command {
        CatalogCommand::List { catalog, json } => {
            let catalog = resolve_catalog(catalog.as_deref(), config)?;
            run_list(&catalog, *json)
        }
        CatalogCommand::Check { path } => Ok(run_check(path)),
    }
}

fn run_list(catalog: &LicenseCatalog, json: bool) -> Result<u8> {
    if json {
        println!("{}", serde_json::to_string_pretty(catalog.licenses())?);
        return Ok(0);
    }
    for record in catalog {
        let marker = if record.is_custom {
            "  (custom: description required)"
        } else {
            ""
        };
        println!("  {:>4}  {}{marker}", record.id, record.name);
    }
    println!();
    println!("Total: {} licenses", catalog.len());
    Ok(0)
}

fn run_check(path: &Path) -> u8 {
    match LicenseCatalog::load(path) {
        Ok(catalog) => {
            println!(
                "OK: {} ({} licenses, {} custom)",
                path.display(),
                catalog.len(),
                catalog.custom_licenses().count()
            );
            0
        }
        Err(e) => {
            println!("FAIL: {}: {e}", path.display());
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_valid_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("licenses.yaml");
        std::fs::write(&path, "- id: 1\n  name: CC BY\n").unwrap();
        assert_eq!(run_check(&path), 0);
    }

    #[test]
    fn test_check_duplicate_ids_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("licenses.yaml");
        std::fs::write(&path, "- id: 1\n  name: A\n- id: 1\n  name: B\n").unwrap();
        assert_eq!(run_check(&path), 1);
    }

    #[test]
    fn test_check_mistyped_custom_flag_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("licenses.yaml");
        std::fs::write(&path, "- id: 1\n  name: A\n- id: 9\n  name: Special\n  iscustom: true\n")
            .unwrap();
        assert_eq!(run_check(&path), 1);
    }

    #[test]
    fn test_list_builtin() {
        let args = CatalogArgs {
            command: CatalogCommand::List {
                catalog: None,
                json: true,
            },
        };
        assert_eq!(run_catalog(&args, &LicfieldConfig::default()).unwrap(), 0);
    }

    #[test]
    fn test_list_missing_catalog_is_error() {
        let args = CatalogArgs {
            command: CatalogCommand::List {
                catalog: Some(PathBuf::from("/nonexistent/licenses.yaml")),
                json: false,
            },
        };
        assert!(run_catalog(&args, &LicfieldConfig::default()).is_err());
    }
}
