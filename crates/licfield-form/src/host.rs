//! # Form Host Sweep
//!
//! The Form Host decides when errors become visible. It runs a pull-based
//! sweep: every registered participant is asked to validate itself, which
//! arms its error display, and the returned failures are aggregated into a
//! single [`FormReport`].

use serde::Serialize;

use crate::error::{FieldError, FieldName};

/// A form control that takes part in the host's validation sweep.
pub trait Validatable {
    /// Name used to attribute errors in the report.
    fn field_name(&self) -> &str;

    /// Arm error display and return the current failures.
    fn validate(&mut self) -> Vec<FieldError>;

    /// Disarm error display.
    fn reset_validation(&mut self);
}

impl<T: Validatable + ?Sized> Validatable for &mut T {
    fn field_name(&self) -> &str {
        (**self).field_name()
    }

    fn validate(&mut self) -> Vec<FieldError> {
        (**self).validate()
    }

    fn reset_validation(&mut self) {
        (**self).reset_validation();
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// One failure attributed to a control and field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportedError {
    /// The participant's name.
    pub control: String,
    /// The logical field within the control.
    pub field: FieldName,
    /// The failure.
    pub error: FieldError,
}

/// Result of a validation sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormReport {
    /// Whether every participant is valid.
    pub is_valid: bool,
    /// All failures, in registration order.
    pub errors: Vec<ReportedError>,
}

impl Default for FormReport {
    fn default() -> Self {
        Self::ok()
    }
}

impl FormReport {
    /// A passing report.
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    /// Add a failure. Marks the report invalid.
    pub fn add_error(&mut self, control: &str, error: FieldError) {
        self.is_valid = false;
        self.errors.push(ReportedError {
            control: control.to_string(),
            field: error.field(),
            error,
        });
    }

    /// Merge another report into this one.
    pub fn merge(&mut self, other: FormReport) {
        if !other.is_valid {
            self.is_valid = false;
        }
        self.errors.extend(other.errors);
    }

    /// Failures reported for one control.
    pub fn errors_for<'a>(&'a self, control: &'a str) -> impl Iterator<Item = &'a FieldError> + 'a {
        self.errors
            .iter()
            .filter(move |e| e.control == control)
            .map(|e| &e.error)
    }
}

// ---------------------------------------------------------------------------
// Host
// ---------------------------------------------------------------------------

/// Owns the participants of one form and sweeps them on demand.
#[derive(Default)]
pub struct FormHost<'a> {
    fields: Vec<Box<dyn Validatable + 'a>>,
}

impl std::fmt::Debug for FormHost<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.fields.iter().map(|field| field.field_name()).collect();
        f.debug_struct("FormHost").field("fields", &names).finish()
    }
}

impl<'a> FormHost<'a> {
    /// An empty host.
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Add a participant. Borrow a field with `&mut field` to keep using it
    /// after the host is dropped.
    pub fn register(&mut self, field: impl Validatable + 'a) {
        self.fields.push(Box::new(field));
    }

    /// Number of participants.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no participant is registered.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Validate every participant and aggregate the failures.
    pub fn validate(&mut self) -> FormReport {
        let mut report = FormReport::ok();
        for field in &mut self.fields {
            let errors = field.validate();
            let name = field.field_name().to_string();
            for error in errors {
                report.add_error(&name, error);
            }
        }
        tracing::debug!(
            fields = self.fields.len(),
            errors = report.errors.len(),
            valid = report.is_valid,
            "form validation sweep"
        );
        report
    }

    /// Disarm every participant's error display.
    pub fn reset_validation(&mut self) {
        for field in &mut self.fields {
            field.reset_validation();
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
