//! # licfield-cli — CLI Tool for License Field Validation
//!
//! Provides the `licfield` command-line interface over the license
//! catalog and the license field validator.
//!
//! ## Subcommands
//!
//! - `licfield catalog list`: print the catalog in display order.
//! - `licfield catalog check`: load a catalog file and report problems.
//! - `licfield validate`: validate one license selection.
//!
//! ## Configuration
//!
//! `--config` points at a YAML or JSON file naming a catalog and default
//! field flags. Command-line flags take precedence over the file, and
//! the file over built-in defaults.
//!
//! ```bash
//! licfield --config licfield.yaml validate --license 9 --description "Partner terms"
//! ```

pub mod catalog;
pub mod settings;
pub mod validate;
