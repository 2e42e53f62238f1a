//! Gate models

use serde::{Deserialize, Serialize};

/// Message shown when the entered PIN does not unlock the notes
pub const INVALID_PIN_MESSAGE: &str = "Please Enter a valid pin!";

/// Row id column of the notes dataset
pub const COLUMN_ID: &str = "_id";
/// Title column of the notes dataset
pub const COLUMN_TITLE: &str = "title";
/// Body column of the notes dataset
pub const COLUMN_NOTE: &str = "note";

/// Columns requested from the notes provider on unlock
pub const NOTE_COLUMNS: [&str; 3] = [COLUMN_ID, COLUMN_TITLE, COLUMN_NOTE];

/// Private note record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteRecord {
    /// Note ID
    pub id: i64,
    /// Note title
    pub title: String,
    /// Note body
    pub note: String,
}

impl NoteRecord {
    /// Create new record
    pub fn new(id: i64, title: impl Into<String>, note: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            note: note.into(),
        }
    }
}

/// Gate state of one screen instance
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GateState {
    /// PIN entry visible, notes hidden
    #[default]
    Locked,
    /// PIN entry hidden, notes bound to the display sink
    Unlocked,
}

impl GateState {
    /// Check if the notes have been revealed
    pub fn is_unlocked(&self) -> bool {
        matches!(self, GateState::Unlocked)
    }
}

/// Outcome of one access attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateResult {
    /// PIN matched; carries the records that were bound for display
    Unlocked(Vec<NoteRecord>),
    /// PIN did not match; carries the message shown to the user
    Rejected(String),
}

impl GateResult {
    /// Check if this attempt unlocked the notes
    pub fn is_unlocked(&self) -> bool {
        matches!(self, GateResult::Unlocked(_))
    }

    /// Records disclosed by this attempt (empty when rejected)
    pub fn records(&self) -> &[NoteRecord] {
        match self {
            GateResult::Unlocked(records) => records,
            GateResult::Rejected(_) => &[],
        }
    }
}

/// Which record fields feed which display slots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnBinding {
    /// Column shown as the entry title
    pub title_field: &'static str,
    /// Column shown as the entry body
    pub body_field: &'static str,
}

impl Default for ColumnBinding {
    fn default() -> Self {
        Self {
            title_field: COLUMN_TITLE,
            body_field: COLUMN_NOTE,
        }
    }
}

/// Attempt counters kept for later review
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GateStats {
    /// Rejected attempts on this gate instance
    pub rejected_attempts: u32,
    /// When the notes were revealed (unix seconds)
    pub unlocked_at: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_state_default_is_locked() {
        assert_eq!(GateState::default(), GateState::Locked);
        assert!(!GateState::Locked.is_unlocked());
        assert!(GateState::Unlocked.is_unlocked());
    }

    #[test]
    fn test_rejected_result_has_no_records() {
        let result = GateResult::Rejected(INVALID_PIN_MESSAGE.to_string());
        assert!(!result.is_unlocked());
        assert!(result.records().is_empty());
    }

    #[test]
    fn test_default_binding_projects_title_and_note() {
        let binding = ColumnBinding::default();
        assert_eq!(binding.title_field, "title");
        assert_eq!(binding.body_field, "note");
    }
}
