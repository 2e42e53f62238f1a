//! SQLite storage for the notes gate
//!
//! Provides the settings store holding the PIN and the notes data provider,
//! both over one shared database with versioned migrations.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod database;
pub mod error;
pub mod migrations;
pub mod notes;
pub mod settings;

pub use database::Database;
pub use error::{Error, Result};
pub use migrations::DEFAULT_NOTES;
pub use notes::{RowCursor, SqliteNotesProvider};
pub use settings::SqliteSettings;

use parking_lot::Mutex;
use std::sync::Arc;

/// Settings store and notes provider sharing one database
pub fn open_stores(db: Database) -> (SqliteSettings, SqliteNotesProvider) {
    let db = Arc::new(Mutex::new(db));
    (
        SqliteSettings::new(Arc::clone(&db)),
        SqliteNotesProvider::new(db),
    )
}
