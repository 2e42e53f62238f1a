//! Scoped ownership of a notes query handle

use crate::models::NoteRecord;
use crate::provider::NoteCursor;
use crate::Result;

/// RAII guard for a [`NoteCursor`]
///
/// The cursor is closed exactly once: by [`CursorGuard::release`] or, failing
/// that, when the guard is dropped.
pub struct CursorGuard<C: NoteCursor> {
    cursor: C,
    released: bool,
}

impl<C: NoteCursor> CursorGuard<C> {
    /// Take ownership of an open cursor
    pub fn new(cursor: C) -> Self {
        Self {
            cursor,
            released: false,
        }
    }

    /// Read every row through the guarded cursor
    pub fn read_all(&mut self) -> Result<Vec<NoteRecord>> {
        self.cursor.read_all()
    }

    /// Close the cursor now
    pub fn release(mut self) {
        self.close_once();
    }

    fn close_once(&mut self) {
        if !self.released {
            self.released = true;
            self.cursor.close();
            tracing::debug!("Notes cursor released");
        }
    }
}

impl<C: NoteCursor> Drop for CursorGuard<C> {
    fn drop(&mut self) {
        self.close_once();
    }
}
