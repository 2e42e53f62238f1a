//! PIN-gated access to private notes
//!
//! A single screen-level gate: the entered PIN is compared with the stored
//! one, and only on a match are the notes queried and handed to the display.
//!
//! ## Collaborators
//!
//! - **Settings**: key-value store holding the PIN ([`ConfigProvider`])
//! - **Notes**: data provider queried on unlock ([`NotesProvider`])
//! - **Display**: list view the notes are bound to ([`DisplaySink`])
//! - **Notifier**: transient message on rejection ([`Notifier`])
//!
//! ## Known weaknesses
//!
//! [`GateConfig::legacy`] reproduces the original screen: cleartext PIN,
//! plain (non constant-time) comparison, and an unset PIN opened by empty
//! input. The defaults compare in constant time and refuse to unlock when no
//! PIN is stored; [`SecretFormat::Argon2Phc`] avoids keeping the PIN in
//! cleartext.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod cursor;
pub mod error;
pub mod gate;
pub mod models;
pub mod provider;
pub mod secret;
pub mod shared;
pub mod view;

/// Test support shared by the workspace crates.
#[cfg(feature = "test-helpers")]
pub mod testing;

pub use config::{EmptySecretPolicy, GateConfig, SecretComparison, SecretFormat, DEFAULT_PIN_KEY};
pub use cursor::CursorGuard;
pub use error::{Error, ErrorCategory, Result};
pub use gate::AccessGate;
pub use models::{
    ColumnBinding, GateResult, GateState, GateStats, NoteRecord, COLUMN_ID, COLUMN_NOTE,
    COLUMN_TITLE, INVALID_PIN_MESSAGE, NOTE_COLUMNS,
};
pub use provider::{
    ConfigProvider, DisplaySink, LogNotifier, MemoryCursor, MemoryNotes, MemorySettings,
    NoteCursor, NotesProvider, Notifier, QueryBehavior, RecordingNotifier, RecordingSink,
};
pub use secret::{hash_pin, secret_matches, PinInput};
pub use shared::SharedAccessGate;
pub use view::ScreenView;
