//! Database schema migrations

use crate::{Error, Result};
use rusqlite::{params, Connection, OptionalExtension};

const SCHEMA_VERSION: i32 = 3;

/// Notes present in a freshly created database
pub const DEFAULT_NOTES: [(&str, &str); 6] = [
    ("office", "10 Meetings. 5 Calls. Lunch with CEO"),
    ("home", "Buy toys for baby, Order dinner"),
    ("holiday", "Either Eurpoe or Karibia"),
    ("Expense", "Spent too much on home theater"),
    ("Exercise", "Alternate days running"),
    ("Weekend", "b333333333333r"),
];

/// Run all migrations
///
/// Pending steps and the version write commit together.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    let current_version = get_schema_version(conn)?;

    tracing::debug!(
        "Running migrations: current_version={}, target_version={}",
        current_version,
        SCHEMA_VERSION
    );

    if current_version > SCHEMA_VERSION {
        return Err(Error::Migration(format!(
            "Database schema version {} is newer than supported version {}",
            current_version, SCHEMA_VERSION
        )));
    }

    if current_version == SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn.unchecked_transaction()?;

    if current_version < 1 {
        migrate_v1(&tx)?;
    }

    if current_version < 2 {
        migrate_v2(&tx)?;
    }

    if current_version < 3 {
        migrate_v3(&tx)?;
    }

    set_schema_version(&tx, SCHEMA_VERSION)?;
    tx.commit()?;

    Ok(())
}

/// Current schema version; 0 for an empty database
pub fn get_schema_version(conn: &Connection) -> Result<i32> {
    let has_table: bool = conn.query_row(
        "SELECT EXISTS (SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'schema_version')",
        [],
        |row| row.get(0),
    )?;
    if !has_table {
        return Ok(0);
    }

    let version = conn
        .query_row(
            "SELECT version FROM schema_version ORDER BY version DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    Ok(version.unwrap_or(0))
}

fn set_schema_version(conn: &Connection, version: i32) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (version INTEGER PRIMARY KEY)",
        [],
    )?;

    let inserted = conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        [version],
    )?;
    if inserted > 0 {
        tracing::debug!("Inserted schema version {}", version);
    }

    Ok(())
}

fn migrate_v1(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS settings (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn migrate_v2(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS notes (
            _id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT,
            note TEXT
        );
        "#,
    )?;
    Ok(())
}

fn migrate_v3(conn: &Connection) -> Result<()> {
    let existing: i64 = conn.query_row("SELECT COUNT(*) FROM notes", [], |row| row.get(0))?;
    if existing > 0 {
        tracing::debug!("Notes table already has {} rows, skipping seed", existing);
        return Ok(());
    }

    let mut stmt = conn.prepare("INSERT INTO notes (title, note) VALUES (?1, ?2)")?;
    for (title, note) in DEFAULT_NOTES {
        stmt.execute(params![title, note])?;
    }
    tracing::debug!("Seeded {} default notes", DEFAULT_NOTES.len());
    Ok(())
}
