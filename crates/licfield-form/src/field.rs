//! # License Field
//!
//! The license control as the Form Host sees it: a bound value and flags
//! coming in, "input" notifications going out, and a validation hook the
//! host polls during its sweep.
//!
//! ## Data Flow
//!
//! ```text
//!   Form Host ──set_value()──▶ LicenseField ──on_input()──▶ ChangeSink (Form Host)
//!                                   │
//!        user edit ─────────────────┘ merged copy of the bound value
//! ```
//!
//! An edit never changes the bound value directly. The field merges the
//! edited part into a copy, emits the copy, and waits for the host to hand
//! it back through [`LicenseField::set_value`]. The first overwrite after an
//! emit that matches the emitted value is that hand-back and is not
//! re-emitted; any other overwrite is forwarded to the sink.

use licfield_core::{LicenseId, LicenseLookup, LicenseSelection, SelectionPatch, ValidatorConfig};
use licfield_state::{
    DescriptionFieldMachine, DescriptionFieldState, FieldEvent, LicenseFieldMachine,
    LicenseFieldState,
};
use serde::Serialize;

use crate::error::FieldError;
use crate::host::Validatable;
use crate::sink::ChangeSink;
use crate::validator::LicenseFieldValidator;

/// How the control should render. Derived from the value and flags; has no
/// bearing on validity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldAffordances {
    /// Show the description input (a custom license is selected).
    pub description_visible: bool,
    /// The user may change the value (neither readonly nor disabled).
    pub editable: bool,
    /// The control reacts to focus and pointer input (not disabled).
    pub interactive: bool,
}

/// A license selector with its conditional description input.
#[derive(Debug)]
pub struct LicenseField<L, S> {
    name: String,
    validator: LicenseFieldValidator<L>,
    config: ValidatorConfig,
    value: LicenseSelection,
    last_emitted: Option<LicenseSelection>,
    sink: S,
    license_machine: LicenseFieldMachine,
    description_machine: DescriptionFieldMachine,
}

impl<L: LicenseLookup, S: ChangeSink> LicenseField<L, S> {
    /// Mount a field with its initial bound value.
    pub fn new(
        validator: LicenseFieldValidator<L>,
        value: LicenseSelection,
        config: ValidatorConfig,
        sink: S,
    ) -> Self {
        let mut field = Self {
            name: "license".to_string(),
            validator,
            config,
            value,
            last_emitted: None,
            sink,
            license_machine: LicenseFieldMachine::new(),
            description_machine: DescriptionFieldMachine::new(),
        };
        field.observe(FieldEvent::SelectionChanged);
        field
    }

    /// Builder-style name used when the host reports errors.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// The bound value.
    pub fn value(&self) -> &LicenseSelection {
        &self.value
    }

    /// The current flags.
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// The validator, and through it the catalog.
    pub fn validator(&self) -> &LicenseFieldValidator<L> {
        &self.validator
    }

    /// The change channel.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Unmount the field and return its change channel.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Current license selector state.
    pub fn license_state(&self) -> LicenseFieldState {
        self.license_machine.state()
    }

    /// Current description state.
    pub fn description_state(&self) -> DescriptionFieldState {
        self.description_machine.state()
    }

    /// The license selector's state machine, including its history.
    pub fn license_machine(&self) -> &LicenseFieldMachine {
        &self.license_machine
    }

    /// The description's state machine, including its history.
    pub fn description_machine(&self) -> &DescriptionFieldMachine {
        &self.description_machine
    }

    /// Whether the license selector should display an error.
    pub fn license_shows_error(&self) -> bool {
        self.license_machine.shows_error()
    }

    /// Whether the description input should display an error.
    pub fn description_shows_error(&self) -> bool {
        self.description_machine.shows_error()
    }

    /// Rendering affordances for the current value and flags.
    pub fn affordances(&self) -> FieldAffordances {
        FieldAffordances {
            description_visible: self.validator.requires_description(&self.value),
            editable: self.config.accepts_edits(),
            interactive: !self.config.disabled,
        }
    }

    /// Whether the license selector is valid right now.
    pub fn is_license_valid(&self) -> bool {
        self.validator.is_license_valid(&self.value, &self.config)
    }

    /// Whether the description field is valid right now.
    pub fn is_description_valid(&self) -> bool {
        self.validator.is_description_valid(&self.value)
    }

    /// Handle the raw value of the license select input.
    ///
    /// Text that does not parse as an id clears the selection.
    pub fn on_license_input(&mut self, raw: &str) -> Option<LicenseSelection> {
        self.on_license_selected(LicenseId::from_input(raw))
    }

    /// Handle a license choice.
    pub fn on_license_selected(&mut self, license: Option<LicenseId>) -> Option<LicenseSelection> {
        self.emit_change(SelectionPatch::license(license))
    }

    /// Handle typing in the description input. `None` clears it.
    pub fn on_description_input(&mut self, text: Option<&str>) -> Option<LicenseSelection> {
        self.emit_change(SelectionPatch::description(text.map(str::to_string)))
    }

    /// Merge `patch` into a copy of the bound value and send it to the sink.
    ///
    /// Returns the emitted value, or `None` when the field does not accept
    /// edits.
    pub fn emit_change(&mut self, patch: SelectionPatch) -> Option<LicenseSelection> {
        if !self.config.accepts_edits() {
            tracing::debug!(
                field = %self.name,
                readonly = self.config.readonly,
                disabled = self.config.disabled,
                "ignoring edit on locked license field"
            );
            return None;
        }
        let merged = self.value.merged(&patch);
        Some(self.send(merged))
    }

    /// Overwrite the bound value from the host.
    ///
    /// Field states are re-derived. The value is forwarded to the sink
    /// unless it hands back the value this field last emitted. Each emitted
    /// value suppresses at most one overwrite: the next `set_value` call
    /// consumes it whether or not it matches, so a host that rejects an edit
    /// by restoring the old value will see a later overwrite to the
    /// rejected value forwarded.
    pub fn set_value(&mut self, value: LicenseSelection) {
        let echo = self.last_emitted.take().as_ref() == Some(&value);
        self.value = value;
        self.observe(FieldEvent::SelectionChanged);
        if !echo {
            let value = self.value.clone();
            self.send(value);
        }
    }

    /// Replace the flags. States are re-derived because `required` may
    /// have changed.
    pub fn set_config(&mut self, config: ValidatorConfig) {
        self.config = config;
        self.observe(FieldEvent::SelectionChanged);
    }

    fn send(&mut self, value: LicenseSelection) -> LicenseSelection {
        tracing::trace!(field = %self.name, ?value, "emitting license field input");
        self.last_emitted = Some(value.clone());
        self.sink.on_input(value.clone());
        value
    }

    fn observe(&mut self, event: FieldEvent) {
        let license = self.validator.license_observation(&self.value, &self.config);
        let description = self.validator.description_observation(&self.value);
        self.license_machine.apply(event, license);
        self.description_machine.apply(event, description);
    }
}

impl<L: LicenseLookup, S: ChangeSink> Validatable for LicenseField<L, S> {
    fn field_name(&self) -> &str {
        &self.name
    }

    fn validate(&mut self) -> Vec<FieldError> {
        self.observe(FieldEvent::ValidationTriggered);
        self.validator.check(&self.value, &self.config)
    }

    fn reset_validation(&mut self) {
        self.observe(FieldEvent::ValidationReset);
    }
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use licfield_core::LicenseRecord;

    const CC_BY: LicenseId = LicenseId(1);
    const CUSTOM: LicenseId = LicenseId(9);

    type TestField = LicenseField<Vec<LicenseRecord>, Vec<LicenseSelection>>;

    fn mount(value: LicenseSelection, config: ValidatorConfig) -> TestField {
        let catalog = vec![
            LicenseRecord::new(CC_BY, "CC BY", false),
            LicenseRecord::new(CUSTOM, "Special Permissions", true),
        ];
        LicenseField::new(LicenseFieldValidator::new(catalog), value, config, Vec::new())
    }

    /// Emit an edit and have the host accept it, as a bound form would.
    fn accept(field: &mut TestField, emitted: Option<LicenseSelection>) {
        if let Some(value) = emitted {
            field.set_value(value);
        }
    }

    // ── Emission ─────────────────────────────────────────────────────

    #[test]
    fn test_license_input_emits_parsed_id() {
        let mut field = mount(LicenseSelection::default(), ValidatorConfig::default());
        let emitted = field.on_license_input("9").unwrap();
        assert_eq!(emitted.license, Some(CUSTOM));
        assert_eq!(field.sink().as_slice(), [emitted]);
    }

    #[test]
    fn test_edit_does_not_touch_bound_value() {
        let mut field = mount(LicenseSelection::default(), ValidatorConfig::default());
        field.on_license_selected(Some(CC_BY));
        assert_eq!(field.value(), &LicenseSelection::default());
    }

    #[test]
    fn test_description_input_keeps_license() {
        let mut field = mount(LicenseSelection::with_license(CUSTOM), ValidatorConfig::default());
        let emitted = field.on_description_input(Some("Used with permission")).unwrap();
        assert_eq!(emitted.license, Some(CUSTOM));
        assert_eq!(emitted.license_description.as_deref(), Some("Used with permission"));
    }

    #[test]
    fn test_switching_away_from_custom_keeps_description() {
        let initial = LicenseSelection::with_license(CUSTOM).described("Partner terms");
        let mut field = mount(initial, ValidatorConfig::default());
        let emitted = field.on_license_selected(Some(CC_BY)).unwrap();
        assert_eq!(emitted.license_description.as_deref(), Some("Partner terms"));
    }

    #[test]
    fn test_garbage_input_clears_selection() {
        let mut field = mount(LicenseSelection::with_license(CC_BY), ValidatorConfig::default());
        let emitted = field.on_license_input("").unwrap();
        assert_eq!(emitted.license, None);
    }

    #[test]
    fn test_locked_field_ignores_edits() {
        for config in [
            ValidatorConfig {
                readonly: true,
                ..ValidatorConfig::default()
            },
            ValidatorConfig {
                disabled: true,
                ..ValidatorConfig::default()
            },
        ] {
            let mut field = mount(LicenseSelection::default(), config);
            assert!(field.on_license_selected(Some(CC_BY)).is_none());
            assert!(field.on_description_input(Some("x")).is_none());
            assert!(field.sink().is_empty());
        }
    }

    // ── Host overwrites ──────────────────────────────────────────────

    #[test]
    fn test_accepting_own_edit_is_not_re_emitted() {
        let mut field = mount(LicenseSelection::default(), ValidatorConfig::default());
        let emitted = field.on_license_selected(Some(CC_BY));
        accept(&mut field, emitted);
        assert_eq!(field.sink().len(), 1);
        assert_eq!(field.value().license, Some(CC_BY));
        assert_eq!(field.license_state(), LicenseFieldState::Valid);
    }

    #[test]
    fn test_programmatic_overwrite_is_forwarded() {
        let mut field = mount(LicenseSelection::default(), ValidatorConfig::default());
        let external = LicenseSelection::with_license(CUSTOM).described("From source");
        field.set_value(external.clone());
        assert_eq!(field.sink().as_slice(), [external]);
        assert_eq!(field.description_state(), DescriptionFieldState::Valid);
    }

    #[test]
    fn test_overwrite_after_rejected_edit_is_forwarded() {
        let mut field = mount(LicenseSelection::default(), ValidatorConfig::default());
        let edit = field.on_license_selected(Some(CC_BY)).unwrap();

        // The host rejects the edit by restoring the bound value.
        field.set_value(LicenseSelection::default());
        assert_eq!(field.sink().len(), 2);

        field.set_value(edit.clone());
        assert_eq!(field.sink().len(), 3);
        assert_eq!(field.sink().last(), Some(&edit));
        assert_eq!(field.value().license, Some(CC_BY));
    }

    #[test]
    fn test_echo_suppresses_only_one_overwrite() {
        let mut field = mount(LicenseSelection::default(), ValidatorConfig::default());
        let emitted = field.on_license_selected(Some(CC_BY));
        accept(&mut field, emitted.clone());
        assert_eq!(field.sink().len(), 1);

        accept(&mut field, emitted);
        assert_eq!(field.sink().len(), 2);
    }

    // ── Affordances ──────────────────────────────────────────────────

    #[test]
    fn test_description_visible_only_for_custom() {
        let mut field = mount(LicenseSelection::default(), ValidatorConfig::default());
        assert!(!field.affordances().description_visible);
        field.set_value(LicenseSelection::with_license(CUSTOM));
        assert!(field.affordances().description_visible);
        field.set_value(LicenseSelection::with_license(CC_BY));
        assert!(!field.affordances().description_visible);
    }

    #[test]
    fn test_affordances_follow_flags() {
        let readonly = mount(
            LicenseSelection::default(),
            ValidatorConfig {
                readonly: true,
                ..ValidatorConfig::default()
            },
        );
        assert!(!readonly.affordances().editable);
        assert!(readonly.affordances().interactive);

        let disabled = mount(
            LicenseSelection::default(),
            ValidatorConfig {
                disabled: true,
                ..ValidatorConfig::default()
            },
        );
        assert!(!disabled.affordances().editable);
        assert!(!disabled.affordances().interactive);
    }

    // ── Validation hook ──────────────────────────────────────────────

    #[test]
    fn test_validate_arms_license_error() {
        let mut field = mount(LicenseSelection::default(), ValidatorConfig::default());
        assert!(!field.license_shows_error());
        let errors = field.validate();
        assert_eq!(errors, [FieldError::RequiredFieldEmpty]);
        assert!(field.license_shows_error());
        assert_eq!(field.license_state(), LicenseFieldState::InvalidRequired);

        field.reset_validation();
        assert!(!field.license_shows_error());
    }

    #[test]
    fn test_making_field_optional_clears_error() {
        let mut field = mount(LicenseSelection::default(), ValidatorConfig::default());
        field.validate();
        field.set_config(ValidatorConfig::optional());
        assert_eq!(field.license_state(), LicenseFieldState::Unset);
        assert!(field.is_license_valid());
    }

    #[test]
    fn test_named_field() {
        let field =
            mount(LicenseSelection::default(), ValidatorConfig::default()).named("node_license");
        assert_eq!(field.field_name(), "node_license");
    }
}
