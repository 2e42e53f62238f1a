//! Thread-shared access gate
//!
//! One screen owns one gate. When the gate is reachable from more than one
//! thread, invocations are serialized: an attempt that arrives while another
//! is running is refused instead of queued, which mirrors a disabled submit
//! control.

use crate::gate::AccessGate;
use crate::models::{GateResult, GateState};
use crate::provider::{ConfigProvider, DisplaySink, NotesProvider, Notifier};
use crate::secret::PinInput;
use crate::view::ScreenView;
use crate::{Error, Result};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cloneable handle on one access gate
pub struct SharedAccessGate<C, N, D, M> {
    gate: Arc<Mutex<AccessGate<C, N, D, M>>>,
    in_flight: Arc<AtomicBool>,
    unlocked: Arc<AtomicBool>,
}

impl<C, N, D, M> Clone for SharedAccessGate<C, N, D, M> {
    fn clone(&self) -> Self {
        Self {
            gate: Arc::clone(&self.gate),
            in_flight: Arc::clone(&self.in_flight),
            unlocked: Arc::clone(&self.unlocked),
        }
    }
}

impl<C, N, D, M> SharedAccessGate<C, N, D, M>
where
    C: ConfigProvider,
    N: NotesProvider,
    D: DisplaySink,
    M: Notifier,
{
    /// Wrap a gate for sharing
    pub fn new(gate: AccessGate<C, N, D, M>) -> Self {
        let unlocked = gate.state().is_unlocked();
        Self {
            gate: Arc::new(Mutex::new(gate)),
            in_flight: Arc::new(AtomicBool::new(false)),
            unlocked: Arc::new(AtomicBool::new(unlocked)),
        }
    }

    /// Run an attempt unless one is already in progress
    pub fn try_attempt_access(&self, input: &mut PinInput) -> Result<GateResult> {
        let mut gate = self.gate.try_lock().ok_or_else(|| {
            tracing::debug!("Access attempt refused: another attempt is running");
            Error::AttemptInProgress
        })?;

        let _in_flight = InFlight::enter(&self.in_flight);
        let result = gate.attempt_access(input);
        self.unlocked
            .store(gate.state().is_unlocked(), Ordering::SeqCst);

        Ok(result)
    }

    /// Last observed gate state; does not wait for a running attempt
    pub fn state(&self) -> GateState {
        if self.unlocked.load(Ordering::SeqCst) {
            GateState::Unlocked
        } else {
            GateState::Locked
        }
    }

    /// Check if an attempt is currently running
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Widget visibility, with submit disabled while an attempt runs
    pub fn view(&self) -> ScreenView {
        if self.is_in_flight() {
            ScreenView::in_flight(self.state())
        } else {
            ScreenView::from_state(self.state())
        }
    }
}

/// Keeps the in-flight flag set until dropped, including on unwind
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn enter(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
