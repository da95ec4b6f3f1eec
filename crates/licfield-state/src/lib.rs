//! # licfield-state — Field State Machines
//!
//! Implements the validation state machines of a license control. Each
//! field resolves its state from an observation of the current value plus
//! whether a validation sweep has armed it.
//!
//! ## State Machines
//!
//! - **License** (`LicenseFieldState`): `Unset`, `InvalidRequired`, `Valid`.
//!   Invalid only when a selection is required, nothing from the catalog is
//!   selected, and the field has been validated.
//!
//! - **Description** (`DescriptionFieldState`): `NotApplicable`,
//!   `InvalidRequired`, `Valid`. Applicable only while a custom license is
//!   selected.
//!
//! ## Design
//!
//! This crate knows nothing about catalogs or selections. Callers reduce the
//! current value to a [`LicenseObservation`] or [`DescriptionObservation`]
//! and feed it with a [`FieldEvent`]. Resolution is a pure function of the
//! observation, so repeating it on every keystroke is safe.

pub mod field;

pub use field::{
    DescriptionFieldMachine, DescriptionFieldState, DescriptionObservation, FieldEvent,
    FieldMachine, FieldState, FieldTransitionRecord, LicenseFieldMachine, LicenseFieldState,
    LicenseObservation, MAX_TRANSITIONS,
};
