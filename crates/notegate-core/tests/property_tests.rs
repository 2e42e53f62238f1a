//! Property-based tests for the access gate
//!
//! Uses proptest to check the match/mismatch contract across random PINs

use notegate_core::{
    AccessGate, GateConfig, GateResult, GateState, MemoryNotes, MemorySettings, NoteRecord,
    PinInput, RecordingNotifier, RecordingSink, SecretComparison, INVALID_PIN_MESSAGE,
};
use proptest::prelude::*;

/// Non-empty stored PINs, mostly digits
fn pin_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[0-9]{1,8}|[a-zA-Z0-9!@#]{1,16}").unwrap()
}

/// Arbitrary user input, including empty
fn input_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9!@# ]{0,16}").unwrap()
}

fn comparison_strategy() -> impl Strategy<Value = SecretComparison> {
    prop_oneof![Just(SecretComparison::ConstantTime), Just(SecretComparison::Plain)]
}

fn notes() -> Vec<NoteRecord> {
    vec![NoteRecord::new(1, "Weekend", "b333333333333r")]
}

proptest! {
    /// Property: the stored PIN always unlocks, clears the field and hides entry
    #[test]
    fn prop_matching_pin_unlocks(pin in pin_strategy(), comparison in comparison_strategy()) {
        let config = GateConfig { comparison, ..GateConfig::default() };
        let provider = MemoryNotes::new(notes());
        let mut gate = AccessGate::new(
            config,
            MemorySettings::with_entry("pkey", &pin),
            provider.clone(),
            RecordingSink::new(),
            RecordingNotifier::new(),
        );
        let mut input = PinInput::new(pin.clone());

        let result = gate.attempt_access(&mut input);

        prop_assert_eq!(result, GateResult::Unlocked(notes()));
        prop_assert_eq!(gate.state(), GateState::Unlocked);
        prop_assert!(input.is_empty());
        prop_assert!(!gate.view().pin_field_visible);
        prop_assert!(!gate.view().submit_visible);
        prop_assert_eq!(provider.closed_count(), 1);
    }

    /// Property: any other input is rejected and leaves the gate untouched
    #[test]
    fn prop_other_input_rejected(
        pin in pin_strategy(),
        attempt in input_strategy(),
        comparison in comparison_strategy(),
    ) {
        prop_assume!(attempt != pin);

        let config = GateConfig { comparison, ..GateConfig::default() };
        let provider = MemoryNotes::new(notes());
        let notifier = RecordingNotifier::new();
        let mut gate = AccessGate::new(
            config,
            MemorySettings::with_entry("pkey", &pin),
            provider.clone(),
            RecordingSink::new(),
            notifier.clone(),
        );
        let view = gate.view();
        let mut input = PinInput::new(attempt.clone());

        let result = gate.attempt_access(&mut input);

        prop_assert_eq!(result, GateResult::Rejected(INVALID_PIN_MESSAGE.to_string()));
        prop_assert_eq!(gate.state(), GateState::Locked);
        prop_assert_eq!(gate.view(), view);
        prop_assert_eq!(input.as_str(), attempt.as_str());
        prop_assert_eq!(provider.query_count(), 0);
        prop_assert_eq!(notifier.messages(), vec![INVALID_PIN_MESSAGE.to_string()]);
    }
}
