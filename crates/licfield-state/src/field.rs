//! # Field State Machines
//!
//! Tracks the validation state of the two logical fields of a license
//! control: the license selector and the custom-license description.
//!
//! ## States
//!
//! ```text
//! License field:
//!
//!   Unset ──(license chosen)──▶ Valid
//!     │  ▲                        │
//!     │  └──(cleared, disarmed)───┤
//!     │                           │
//!     └──(validate, required)──▶ InvalidRequired ◀──(cleared, armed, required)
//!
//! Description field:
//!
//!   NotApplicable ──(custom chosen)──▶ InvalidRequired ──(text typed)──▶ Valid
//!        ▲                                   ▲                            │
//!        └───────(non-custom / no license)───┴──────(text cleared)────────┘
//! ```
//!
//! Neither machine has a terminal state; both live as long as the field.
//!
//! ## Arming
//!
//! A field starts disarmed. The first validation sweep from the Form Host
//! arms it; from then on an empty required license resolves to
//! `InvalidRequired` on every change, not only on the next sweep. Resetting
//! validation disarms it again. The description state does not depend on
//! arming, but whether its error is shown does.
//!
//! State is always recomputed from the latest observation. A field that was
//! valid once is not remembered as valid.

use serde::{Deserialize, Serialize};

// ─── Events ──────────────────────────────────────────────────────────

/// Something that makes a field re-resolve its state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldEvent {
    /// The bound value changed (user edit or programmatic overwrite).
    SelectionChanged,
    /// The Form Host ran a validation sweep.
    ValidationTriggered,
    /// The Form Host cleared validation state.
    ValidationReset,
}

impl FieldEvent {
    /// String representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SelectionChanged => "selection_changed",
            Self::ValidationTriggered => "validation_triggered",
            Self::ValidationReset => "validation_reset",
        }
    }
}

impl std::fmt::Display for FieldEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── State Trait ─────────────────────────────────────────────────────

/// A field state derivable from an observation of the current value.
pub trait FieldState: Copy + Eq + std::fmt::Debug {
    /// What the machine needs to know about the current value.
    type Observation: Copy;

    /// State before any observation.
    fn initial() -> Self;

    /// Resolve the state for `observation`. `armed` is true once a
    /// validation sweep has run.
    fn resolve(observation: Self::Observation, armed: bool) -> Self;

    /// Whether the state represents a validation failure.
    fn is_invalid(&self) -> bool;
}

// ─── License Field ───────────────────────────────────────────────────

/// Validation state of the license selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LicenseFieldState {
    /// No license chosen and no error to report.
    Unset,
    /// No license chosen, the field is required, and validation has run.
    InvalidRequired,
    /// A license from the catalog is chosen.
    Valid,
}

/// What the license field state depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LicenseObservation {
    /// A license present in the catalog is selected.
    pub has_license: bool,
    /// A license selection is mandatory.
    pub required: bool,
}

impl FieldState for LicenseFieldState {
    type Observation = LicenseObservation;

    fn initial() -> Self {
        Self::Unset
    }

    fn resolve(observation: LicenseObservation, armed: bool) -> Self {
        if observation.has_license {
            Self::Valid
        } else if observation.required && armed {
            Self::InvalidRequired
        } else {
            Self::Unset
        }
    }

    fn is_invalid(&self) -> bool {
        matches!(self, Self::InvalidRequired)
    }
}

impl LicenseFieldState {
    /// String representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unset => "unset",
            Self::InvalidRequired => "invalid_required",
            Self::Valid => "valid",
        }
    }
}

impl std::fmt::Display for LicenseFieldState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Description Field ───────────────────────────────────────────────

/// Validation state of the custom-license description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DescriptionFieldState {
    /// The selected license is not custom, or nothing is selected.
    NotApplicable,
    /// A custom license is selected and the description is blank.
    InvalidRequired,
    /// A custom license is selected and the description has text.
    Valid,
}

/// What the description field state depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DescriptionObservation {
    /// The selected license is flagged custom.
    pub custom_selected: bool,
    /// The description is non-blank after trimming.
    pub has_text: bool,
}

impl FieldState for DescriptionFieldState {
    type Observation = DescriptionObservation;

    fn initial() -> Self {
        Self::NotApplicable
    }

    fn resolve(observation: DescriptionObservation, _armed: bool) -> Self {
        match (observation.custom_selected, observation.has_text) {
            (false, _) => Self::NotApplicable,
            (true, true) => Self::Valid,
            (true, false) => Self::InvalidRequired,
        }
    }

    fn is_invalid(&self) -> bool {
        matches!(self, Self::InvalidRequired)
    }
}

impl DescriptionFieldState {
    /// String representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotApplicable => "not_applicable",
            Self::InvalidRequired => "invalid_required",
            Self::Valid => "valid",
        }
    }

    /// Whether the description input should be shown.
    pub fn is_applicable(&self) -> bool {
        !matches!(self, Self::NotApplicable)
    }
}

impl std::fmt::Display for DescriptionFieldState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Machine ─────────────────────────────────────────────────────────

/// Number of state changes a [`FieldMachine`] keeps. Older records are
/// dropped first.
pub const MAX_TRANSITIONS: usize = 64;

/// Record of a field state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldTransitionRecord<S> {
    /// State before the event.
    pub from_state: S,
    /// State after the event.
    pub to_state: S,
    /// The event that caused the change.
    pub event: FieldEvent,
}

/// A field state plus its arming flag and change history.
///
/// Only events that change the state are recorded, and only the most
/// recent [`MAX_TRANSITIONS`] of those are kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldMachine<S> {
    state: S,
    armed: bool,
    transitions: Vec<FieldTransitionRecord<S>>,
}

impl<S: FieldState> Default for FieldMachine<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: FieldState> FieldMachine<S> {
    /// A disarmed machine in the initial state.
    pub fn new() -> Self {
        Self {
            state: S::initial(),
            armed: false,
            transitions: Vec::new(),
        }
    }

    /// Current state.
    pub fn state(&self) -> S {
        self.state
    }

    /// Whether a validation sweep has armed the field.
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Whether an error should be displayed on the field.
    pub fn shows_error(&self) -> bool {
        self.armed && self.state.is_invalid()
    }

    /// Ordered log of the most recent state changes, oldest first.
    pub fn transitions(&self) -> &[FieldTransitionRecord<S>] {
        &self.transitions
    }

    /// Feed an event with the current observation and return the new state.
    pub fn apply(&mut self, event: FieldEvent, observation: S::Observation) -> S {
        match event {
            FieldEvent::ValidationTriggered => self.armed = true,
            FieldEvent::ValidationReset => self.armed = false,
            FieldEvent::SelectionChanged => {}
        }
        let next = S::resolve(observation, self.armed);
        if next != self.state {
            if self.transitions.len() == MAX_TRANSITIONS {
                self.transitions.remove(0);
            }
            self.transitions.push(FieldTransitionRecord {
                from_state: self.state,
                to_state: next,
                event,
            });
            self.state = next;
        }
        next
    }
}

/// Machine for the license selector.
pub type LicenseFieldMachine = FieldMachine<LicenseFieldState>;

/// Machine for the description field.
pub type DescriptionFieldMachine = FieldMachine<DescriptionFieldState>;

// ─── Tests ───────────────────────────────────────────────────────────
