//! Presentation projection of the gate state
//!
//! The gate only knows `Locked`/`Unlocked`; this module turns that into the
//! visibility of the PIN field, the submit control and the notes list.

use crate::models::GateState;

/// Widget visibility for one screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenView {
    /// PIN entry field visible
    pub pin_field_visible: bool,
    /// Submit control visible
    pub submit_visible: bool,
    /// Submit control accepts presses
    pub submit_enabled: bool,
    /// Notes list visible
    pub list_visible: bool,
}

impl ScreenView {
    /// Idle view for `state`
    pub fn from_state(state: GateState) -> Self {
        match state {
            GateState::Locked => Self {
                pin_field_visible: true,
                submit_visible: true,
                submit_enabled: true,
                list_visible: false,
            },
            GateState::Unlocked => Self {
                pin_field_visible: false,
                submit_visible: false,
                submit_enabled: false,
                list_visible: true,
            },
        }
    }

    /// View while an attempt is running
    pub fn in_flight(state: GateState) -> Self {
        Self {
            submit_enabled: false,
            ..Self::from_state(state)
        }
    }
}

impl Default for ScreenView {
    fn default() -> Self {
        Self::from_state(GateState::default())
    }
}
