//! # Validate Subcommand
//!
//! Mounts a license field with a selection and its flags, runs one
//! validation sweep, and reports the outcome. Exit code 0 when the
//! selection is valid, 1 when it is not.
//!
//! ## Usage
//!
//! ```bash
//! licfield validate --license 9 --description "Partner agreement"
//! licfield validate --selection resource.yaml --json
//! licfield validate --optional
//! ```
//!
//! A selection file holds `license` and `license_description` keys; both
//! may be absent or null.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use licfield_core::{
    LicenseCatalog, LicenseId, LicenseLookup, LicenseSelection, LicfieldConfig, ValidatorConfig,
};
use licfield_form::{
    DescriptionFieldState, FieldAffordances, FormHost, FormReport, LicenseField,
    LicenseFieldState, LicenseFieldValidator,
};

use crate::settings::resolve_catalog;

/// Arguments for the validate subcommand.
#[derive(Args, Debug, Default)]
pub struct ValidateArgs {
    /// Catalog file. Defaults to the configured or built-in catalog.
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Read the selection from a YAML or JSON file.
    #[arg(long, conflicts_with_all = ["license", "description"])]
    pub selection: Option<PathBuf>,

    /// Selected license id. Text that is not an id means no selection.
    #[arg(long)]
    pub license: Option<String>,

    /// License description text.
    #[arg(long)]
    pub description: Option<String>,

    /// Treat the license as optional.
    #[arg(long)]
    pub optional: bool,

    /// Mount the field readonly.
    #[arg(long)]
    pub readonly: bool,

    /// Mount the field disabled.
    #[arg(long)]
    pub disabled: bool,

    /// Print the outcome as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Everything one validation run observed.
#[derive(Debug, Serialize)]
pub struct ValidationOutcome {
    pub selection: LicenseSelection,
    pub config: ValidatorConfig,
    pub license_state: LicenseFieldState,
    pub description_state: DescriptionFieldState,
    pub affordances: FieldAffordances,
    pub report: FormReport,
}

/// Execute the validate subcommand.
pub fn run_validate(args: &ValidateArgs, config: &LicfieldConfig) -> Result<u8> {
    let catalog = resolve_catalog(args.catalog.as_deref(), config)?;
    let selection = read_selection(args)?;
    let field_config = field_config(args, config);

    let outcome = evaluate(&catalog, selection, field_config);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print_outcome(&catalog, &outcome);
    }

    Ok(if outcome.report.is_valid { 0 } else { 1 })
}

/// Mount a field, sweep it once, and capture its observable state.
pub fn evaluate(
    catalog: &LicenseCatalog,
    selection: LicenseSelection,
    config: ValidatorConfig,
) -> ValidationOutcome {
    let mut field = LicenseField::new(LicenseFieldValidator::new(catalog), selection, config, ());
    let report = {
        let mut host = FormHost::new();
        host.register(&mut field);
        host.validate()
    };

    ValidationOutcome {
        selection: field.value().clone(),
        config,
        license_state: field.license_state(),
        description_state: field.description_state(),
        affordances: field.affordances(),
        report,
    }
}

/// Flags override the config file; readonly/disabled from either source apply.
fn field_config(args: &ValidateArgs, config: &LicfieldConfig) -> ValidatorConfig {
    let base = config.field;
    ValidatorConfig {
        required: base.required && !args.optional,
        readonly: base.readonly || args.readonly,
        disabled: base.disabled || args.disabled,
    }
}

fn read_selection(args: &ValidateArgs) -> Result<LicenseSelection> {
    if let Some(path) = &args.selection {
        return load_selection(path);
    }

    let license = args.license.as_deref().and_then(|raw| {
        let parsed = LicenseId::from_input(raw);
        if parsed.is_none() && !raw.trim().is_empty() {
            tracing::warn!(input = raw, "license is not an id; treating as no selection");
        }
        parsed
    });

    Ok(LicenseSelection {
        license,
        license_description: args.description.clone(),
    })
}

fn load_selection(path: &Path) -> Result<LicenseSelection> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read selection {}", path.display()))?;
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    let selection = if is_json {
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse selection {}", path.display()))?
    } else if content.trim().is_empty() {
        LicenseSelection::default()
    } else {
        serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse selection {}", path.display()))?
    };
    Ok(selection)
}

fn print_outcome(catalog: &LicenseCatalog, outcome: &ValidationOutcome) {
    let license = match outcome.selection.license {
        Some(id) => match catalog.find_license(id) {
            Some(record) => format!("{id} ({})", record.name),
            None => format!("{id} (not in catalog)"),
        },
        None => "none".to_string(),
    };
    println!("License:     {license}");
    if outcome.affordances.description_visible {
        let text = outcome.selection.description_text().unwrap_or("<empty>");
        println!("Description: {text}");
    }
    println!(
        "State:       license={} description={}",
        outcome.license_state, outcome.description_state
    );

    if outcome.report.is_valid {
        println!("OK");
        return;
    }
    for reported in &outcome.report.errors {
        println!("FAIL [{}] {}: {}", reported.error.code(), reported.field, reported.error);
    }
}
