//! Collaborators consumed by the access gate
//!
//! The gate only talks to the outside world through these traits:
//! - [`ConfigProvider`]: key-value settings holding the stored PIN
//! - [`NotesProvider`]: data source for the private notes
//! - [`DisplaySink`]: list view the notes are bound to
//! - [`Notifier`]: transient user-facing messages
//!
//! In-memory implementations are provided for embedding and tests. They share
//! their state through `Arc`, so a clone handed to the gate can be observed
//! from the outside.

use crate::models::{ColumnBinding, NoteRecord};
use crate::{Error, Result};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// Key-value settings store
pub trait ConfigProvider {
    /// Look up `key`; `None` when no entry exists
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Look up `key`, falling back to `default`
    fn get_or(&self, key: &str, default: &str) -> Result<String> {
        Ok(self.get(key)?.unwrap_or_else(|| default.to_string()))
    }
}

/// Handle on a notes query result
///
/// Must be closed exactly once. The gate guarantees this with `CursorGuard`.
pub trait NoteCursor {
    /// Read every row of the result set
    fn read_all(&mut self) -> Result<Vec<NoteRecord>>;

    /// Release the handle
    fn close(&mut self);
}

/// Notes data provider
pub trait NotesProvider {
    /// Cursor type returned by [`NotesProvider::query`]
    type Cursor: NoteCursor;

    /// Query all notes projecting `columns`; `None` when no handle is available
    fn query(&self, columns: &[&str]) -> Result<Option<Self::Cursor>>;
}

/// List view the notes are bound to
pub trait DisplaySink {
    /// Bind `records` for display using `binding` for title and body
    fn bind(&mut self, records: &[NoteRecord], binding: ColumnBinding) -> Result<()>;
}

/// Transient user-facing message channel
pub trait Notifier {
    /// Show `message`; fire-and-forget
    fn notify(&self, message: &str);
}

// =============================================================================
// In-memory implementations
// =============================================================================

/// In-memory settings store
#[derive(Debug, Clone, Default)]
pub struct MemorySettings {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl MemorySettings {
    /// Create empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create store with one entry
    pub fn with_entry(key: &str, value: &str) -> Self {
        let settings = Self::new();
        settings.put(key, value);
        settings
    }

    /// Insert or replace an entry
    pub fn put(&self, key: &str, value: &str) {
        self.values.lock().insert(key.to_string(), value.to_string());
    }

    /// Remove an entry
    pub fn remove(&self, key: &str) {
        self.values.lock().remove(key);
    }
}

impl ConfigProvider for MemorySettings {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.lock().get(key).cloned())
    }
}

/// How [`MemoryNotes`] answers a query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryBehavior {
    /// Return a cursor over the stored records
    Records,
    /// Return no handle at all
    NullHandle,
    /// Fail the query
    QueryError,
    /// Return a cursor whose read fails
    ReadError,
}

#[derive(Debug, Default)]
struct CursorCounters {
    queries: AtomicU32,
    opened: AtomicU32,
    closed: AtomicU32,
}

/// In-memory notes provider
#[derive(Debug, Clone)]
pub struct MemoryNotes {
    records: Arc<Mutex<Vec<NoteRecord>>>,
    behavior: Arc<Mutex<QueryBehavior>>,
    last_columns: Arc<Mutex<Option<Vec<String>>>>,
    counters: Arc<CursorCounters>,
}

impl MemoryNotes {
    /// Create provider serving `records`
    pub fn new(records: Vec<NoteRecord>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
            behavior: Arc::new(Mutex::new(QueryBehavior::Records)),
            last_columns: Arc::new(Mutex::new(None)),
            counters: Arc::new(CursorCounters::default()),
        }
    }

    /// Create provider with no records
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Change how subsequent queries are answered
    pub fn set_behavior(&self, behavior: QueryBehavior) {
        *self.behavior.lock() = behavior;
    }

    /// Number of queries issued
    pub fn query_count(&self) -> u32 {
        self.counters.queries.load(Ordering::SeqCst)
    }

    /// Number of cursors handed out
    pub fn opened_count(&self) -> u32 {
        self.counters.opened.load(Ordering::SeqCst)
    }

    /// Number of cursor close calls
    pub fn closed_count(&self) -> u32 {
        self.counters.closed.load(Ordering::SeqCst)
    }

    /// Columns of the most recent query
    pub fn last_columns(&self) -> Option<Vec<String>> {
        self.last_columns.lock().clone()
    }
}

impl NotesProvider for MemoryNotes {
    type Cursor = MemoryCursor;

    fn query(&self, columns: &[&str]) -> Result<Option<MemoryCursor>> {
        self.counters.queries.fetch_add(1, Ordering::SeqCst);
        *self.last_columns.lock() = Some(columns.iter().map(|c| c.to_string()).collect());

        let behavior = *self.behavior.lock();
        match behavior {
            QueryBehavior::NullHandle => Ok(None),
            QueryBehavior::QueryError => Err(Error::Provider("query failed".to_string())),
            QueryBehavior::Records | QueryBehavior::ReadError => {
                self.counters.opened.fetch_add(1, Ordering::SeqCst);
                Ok(Some(MemoryCursor {
                    records: self.records.lock().clone(),
                    fail_read: behavior == QueryBehavior::ReadError,
                    counters: Arc::clone(&self.counters),
                }))
            }
        }
    }
}

/// Cursor returned by [`MemoryNotes`]
#[derive(Debug)]
pub struct MemoryCursor {
    records: Vec<NoteRecord>,
    fail_read: bool,
    counters: Arc<CursorCounters>,
}

impl NoteCursor for MemoryCursor {
    fn read_all(&mut self) -> Result<Vec<NoteRecord>> {
        if self.fail_read {
            return Err(Error::Provider("cursor read failed".to_string()));
        }
        Ok(self.records.clone())
    }

    fn close(&mut self) {
        self.counters.closed.fetch_add(1, Ordering::SeqCst);
    }
}

/// Display sink that records what was bound
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    bound: Arc<Mutex<Option<(Vec<NoteRecord>, ColumnBinding)>>>,
    bind_calls: Arc<AtomicU32>,
    fail: bool,
}

impl RecordingSink {
    /// Create sink accepting every bind
    pub fn new() -> Self {
        Self::default()
    }

    /// Create sink rejecting every bind
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Records of the last successful bind
    pub fn bound_records(&self) -> Option<Vec<NoteRecord>> {
        self.bound.lock().as_ref().map(|(records, _)| records.clone())
    }

    /// Binding of the last successful bind
    pub fn binding(&self) -> Option<ColumnBinding> {
        self.bound.lock().as_ref().map(|(_, binding)| *binding)
    }

    /// Number of bind calls, successful or not
    pub fn bind_calls(&self) -> u32 {
        self.bind_calls.load(Ordering::SeqCst)
    }
}

impl DisplaySink for RecordingSink {
    fn bind(&mut self, records: &[NoteRecord], binding: ColumnBinding) -> Result<()> {
        self.bind_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(Error::Display("list view unavailable".to_string()));
        }
        *self.bound.lock() = Some((records.to_vec(), binding));
        Ok(())
    }
}

/// Notifier that records every message
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    messages: Arc<Mutex<Vec<String>>>,
}

impl RecordingNotifier {
    /// Create notifier
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages shown so far
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.lock().push(message.to_string());
    }
}

/// Notifier that forwards messages to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) {
        tracing::info!(target: "notegate::notify", "{}", message);
    }
}
