//! # licfield-form — License Field Validation
//!
//! The license control of a content-authoring form: which license is
//! chosen, whether a description is needed, and whether both are valid.
//!
//! ## Components
//!
//! - [`LicenseFieldValidator`]: the two validity rules over an injected
//!   catalog. Pure; safe to call on every keystroke.
//! - [`LicenseField`]: the mounted control. Holds the bound value and flags,
//!   emits merged selections through a [`ChangeSink`], and tracks per-field
//!   state machines from `licfield-state`.
//! - [`FormHost`]: runs the validation sweep over every [`Validatable`]
//!   participant and aggregates a [`FormReport`].
//!
//! ## Concurrency
//!
//! Everything here is synchronous. A catalog wrapped in `Arc` can back any
//! number of fields on any number of threads; each field and its value are
//! owned by one form instance.

pub mod error;
pub mod field;
pub mod host;
pub mod sink;
pub mod validator;

pub use error::{FieldError, FieldName};
pub use field::{FieldAffordances, LicenseField};
pub use host::{FormHost, FormReport, ReportedError, Validatable};
pub use sink::ChangeSink;
pub use validator::LicenseFieldValidator;

// Field states are part of this crate's public surface.
pub use licfield_state::{DescriptionFieldState, LicenseFieldState};
