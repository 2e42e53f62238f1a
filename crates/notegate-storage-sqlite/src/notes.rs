//! Notes data provider backed by the `notes` table

use crate::{Database, Error, Result};
use notegate_core::{
    NoteCursor, NoteRecord, NotesProvider, COLUMN_ID, COLUMN_NOTE, COLUMN_TITLE, NOTE_COLUMNS,
};
use parking_lot::Mutex;
use rusqlite::Row;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// Notes provider
#[derive(Clone)]
pub struct SqliteNotesProvider {
    db: Arc<Mutex<Database>>,
    open_cursors: Arc<AtomicU32>,
}

impl SqliteNotesProvider {
    /// Create provider over a shared database
    pub fn new(db: Arc<Mutex<Database>>) -> Self {
        Self {
            db,
            open_cursors: Arc::new(AtomicU32::new(0)),
        }
    }

    /// Cursors handed out and not yet closed
    pub fn open_cursors(&self) -> u32 {
        self.open_cursors.load(Ordering::SeqCst)
    }

    /// Read all notes projecting `columns`, in `_id` order
    pub fn load(&self, columns: &[&str]) -> Result<Vec<NoteRecord>> {
        if columns.is_empty() {
            return Err(Error::Validation("No columns requested".to_string()));
        }
        if let Some(unknown) = columns.iter().find(|c| !NOTE_COLUMNS.contains(*c)) {
            return Err(Error::Validation(format!("Unknown notes column: {}", unknown)));
        }

        let sql = format!("SELECT {} FROM notes ORDER BY _id", columns.join(", "));
        let db = self.db.lock();
        let mut stmt = db.conn().prepare(&sql)?;
        let records = stmt
            .query_map([], |row| row_to_note(row, columns))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(records)
    }
}

fn row_to_note(row: &Row<'_>, columns: &[&str]) -> rusqlite::Result<NoteRecord> {
    let id: i64 = if columns.contains(&COLUMN_ID) {
        row.get(COLUMN_ID)?
    } else {
        0
    };
    let text = |name: &str| -> rusqlite::Result<String> {
        if columns.contains(&name) {
            Ok(row.get::<_, Option<String>>(name)?.unwrap_or_default())
        } else {
            Ok(String::new())
        }
    };

    Ok(NoteRecord {
        id,
        title: text(COLUMN_TITLE)?,
        note: text(COLUMN_NOTE)?,
    })
}

impl NotesProvider for SqliteNotesProvider {
    type Cursor = RowCursor;

    fn query(&self, columns: &[&str]) -> notegate_core::Result<Option<RowCursor>> {
        let rows = self
            .load(columns)
            .map_err(|e| notegate_core::Error::Provider(e.to_string()))?;

        self.open_cursors.fetch_add(1, Ordering::SeqCst);
        tracing::debug!("Notes cursor opened ({} rows)", rows.len());

        Ok(Some(RowCursor {
            rows,
            open_cursors: Arc::clone(&self.open_cursors),
            closed: false,
        }))
    }
}

/// Materialized result of a notes query
pub struct RowCursor {
    rows: Vec<NoteRecord>,
    open_cursors: Arc<AtomicU32>,
    closed: bool,
}

impl NoteCursor for RowCursor {
    fn read_all(&mut self) -> notegate_core::Result<Vec<NoteRecord>> {
        if self.closed {
            return Err(notegate_core::Error::Provider("Cursor is closed".to_string()));
        }
        Ok(self.rows.clone())
    }

    fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.rows.clear();
            self.open_cursors.fetch_sub(1, Ordering::SeqCst);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migrations::DEFAULT_NOTES;

    fn provider() -> SqliteNotesProvider {
        let db = Database::open_in_memory().unwrap();
        SqliteNotesProvider::new(Arc::new(Mutex::new(db)))
    }

    #[test]
    fn test_load_default_notes_in_order() {
        let notes = provider().load(&NOTE_COLUMNS).unwrap();

        assert_eq!(notes.len(), DEFAULT_NOTES.len());
        assert_eq!(notes[0], NoteRecord::new(1, "office", "10 Meetings. 5 Calls. Lunch with CEO"));
        assert_eq!(notes[5].title, "Weekend");
    }

    #[test]
    fn test_projection_leaves_other_fields_empty() {
        let notes = provider().load(&["title"]).unwrap();
        assert_eq!(notes[1].title, "home");
        assert_eq!(notes[1].id, 0);
        assert_eq!(notes[1].note, "");
    }

    #[test]
    fn test_unknown_column_refused() {
        let err = provider().load(&["title", "password"]).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(provider().load(&[]).is_err());
    }

    #[test]
    fn test_cursor_close_accounting() {
        let provider = provider();
        let mut cursor = provider.query(&NOTE_COLUMNS).unwrap().unwrap();
        assert_eq!(provider.open_cursors(), 1);
        assert_eq!(cursor.read_all().unwrap().len(), 6);

        cursor.close();
        cursor.close();
        assert_eq!(provider.open_cursors(), 0);
        assert!(cursor.read_all().is_err());
    }

    #[test]
    fn test_null_columns_read_as_empty() {
        let provider = provider();
        provider
            .db
            .lock()
            .conn()
            .execute("INSERT INTO notes (title, note) VALUES (NULL, NULL)", [])
            .unwrap();

        let notes = provider.load(&NOTE_COLUMNS).unwrap();
        let last = notes.last().unwrap();
        assert_eq!(last.id, 7);
        assert_eq!(last.title, "");
        assert_eq!(last.note, "");
    }
}
