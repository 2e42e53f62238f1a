//! PIN gate in front of the private notes
//!
//! Reads the stored PIN, compares it with the entered one and, on a match,
//! binds the notes to the display sink and clears the entry field. A mismatch
//! only produces the user-facing rejection message.

use crate::config::GateConfig;
use crate::cursor::CursorGuard;
use crate::models::{
    ColumnBinding, GateResult, GateState, GateStats, NoteRecord, INVALID_PIN_MESSAGE,
    NOTE_COLUMNS,
};
use crate::provider::{ConfigProvider, DisplaySink, NotesProvider, Notifier};
use crate::secret::{secret_matches, PinInput};
use crate::view::ScreenView;
use zeroize::Zeroizing;

/// Access gate for one notes screen
pub struct AccessGate<C, N, D, M> {
    config: GateConfig,
    settings: C,
    notes: N,
    sink: D,
    notifier: M,
    state: GateState,
    stats: GateStats,
}

impl<C, N, D, M> AccessGate<C, N, D, M>
where
    C: ConfigProvider,
    N: NotesProvider,
    D: DisplaySink,
    M: Notifier,
{
    /// Create a locked gate over its collaborators
    pub fn new(config: GateConfig, settings: C, notes: N, sink: D, notifier: M) -> Self {
        Self {
            config,
            settings,
            notes,
            sink,
            notifier,
            state: GateState::Locked,
            stats: GateStats::default(),
        }
    }

    /// Current gate state
    pub fn state(&self) -> GateState {
        self.state
    }

    /// Attempt counters
    pub fn stats(&self) -> &GateStats {
        &self.stats
    }

    /// Gate configuration
    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Widget visibility for the current state
    pub fn view(&self) -> ScreenView {
        ScreenView::from_state(self.state)
    }

    /// Check `input` against the stored PIN and reveal the notes on a match
    ///
    /// Never fails: collaborator errors are logged and absorbed. On success
    /// the input field is cleared and the gate is `Unlocked`; on mismatch the
    /// state is left untouched and the notifier shows the rejection message.
    /// A settings read that fails counts as a mismatch.
    pub fn attempt_access(&mut self, input: &mut PinInput) -> GateResult {
        let matched = match self.stored_secret() {
            Some(stored) => self.pin_matches(&stored, input.as_str()),
            None => false,
        };

        if matched {
            GateResult::Unlocked(self.unlock(input))
        } else {
            self.reject()
        }
    }

    /// Stored PIN, empty when unset; `None` when the settings read failed
    fn stored_secret(&self) -> Option<Zeroizing<String>> {
        match self.settings.get(&self.config.pin_key) {
            Ok(Some(secret)) => Some(Zeroizing::new(secret)),
            Ok(None) => {
                tracing::debug!("No PIN stored under '{}'", self.config.pin_key);
                Some(Zeroizing::new(String::new()))
            }
            Err(e) => {
                tracing::warn!("Failed to read stored PIN, rejecting attempt: {}", e);
                None
            }
        }
    }

    fn pin_matches(&self, stored: &str, input: &str) -> bool {
        match secret_matches(&self.config, stored, input) {
            Ok(matched) => matched,
            Err(e) => {
                tracing::warn!("Stored PIN could not be checked: {}", e);
                false
            }
        }
    }

    fn unlock(&mut self, input: &mut PinInput) -> Vec<NoteRecord> {
        let mut cursor = match self.notes.query(&NOTE_COLUMNS) {
            Ok(Some(cursor)) => Some(CursorGuard::new(cursor)),
            Ok(None) => {
                tracing::warn!("Notes provider returned no cursor");
                None
            }
            Err(e) => {
                tracing::warn!("Notes query failed: {}", e);
                None
            }
        };

        let records = match cursor.as_mut() {
            Some(guard) => guard.read_all().unwrap_or_else(|e| {
                tracing::warn!("Failed to read notes cursor: {}", e);
                Vec::new()
            }),
            None => Vec::new(),
        };

        if let Err(e) = self.sink.bind(&records, ColumnBinding::default()) {
            tracing::warn!("Failed to bind notes for display: {}", e);
        }

        input.clear();
        self.state = GateState::Unlocked;
        self.stats
            .unlocked_at
            .get_or_insert_with(|| chrono::Utc::now().timestamp());

        if let Some(guard) = cursor {
            guard.release();
        }

        tracing::info!("Notes unlocked ({} records)", records.len());
        records
    }

    fn reject(&mut self) -> GateResult {
        self.stats.rejected_attempts = self.stats.rejected_attempts.saturating_add(1);
        tracing::warn!(
            "Access rejected (attempts: {})",
            self.stats.rejected_attempts
        );

        self.notifier.notify(INVALID_PIN_MESSAGE);
        GateResult::Rejected(INVALID_PIN_MESSAGE.to_string())
    }
}
