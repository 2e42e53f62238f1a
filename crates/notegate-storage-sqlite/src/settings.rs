//! Key-value settings backed by the `settings` table
//!
//! Holds the stored PIN read by the access gate, and the registration flow
//! that writes it.

use crate::{Database, Error, Result};
use argon2::password_hash::SaltString;
use notegate_core::{ConfigProvider, SecretFormat, INVALID_PIN_MESSAGE};
use parking_lot::Mutex;
use rand::rngs::OsRng;
use rusqlite::{params, OptionalExtension};
use std::sync::Arc;

/// Settings store
#[derive(Clone)]
pub struct SqliteSettings {
    db: Arc<Mutex<Database>>,
}

impl SqliteSettings {
    /// Create store over a shared database
    pub fn new(db: Arc<Mutex<Database>>) -> Self {
        Self { db }
    }

    /// Read a value
    pub fn get_value(&self, key: &str) -> Result<Option<String>> {
        let db = self.db.lock();
        let value = db
            .conn()
            .query_row(
                "SELECT value FROM settings WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Insert or replace a value
    pub fn put(&self, key: &str, value: &str) -> Result<()> {
        let db = self.db.lock();
        db.conn().execute(
            "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Remove a value; returns whether it existed
    pub fn remove(&self, key: &str) -> Result<bool> {
        let db = self.db.lock();
        let removed = db
            .conn()
            .execute("DELETE FROM settings WHERE key = ?1", params![key])?;
        Ok(removed > 0)
    }

    /// Store the PIN that unlocks the notes
    ///
    /// An empty PIN is refused with the same message the gate shows.
    pub fn register_pin(&self, key: &str, pin: &str, format: SecretFormat) -> Result<()> {
        if pin.is_empty() {
            return Err(Error::Validation(INVALID_PIN_MESSAGE.to_string()));
        }

        match format {
            SecretFormat::Cleartext => self.put(key, pin)?,
            SecretFormat::Argon2Phc => {
                let salt = SaltString::generate(&mut OsRng);
                let hash = notegate_core::hash_pin(pin, salt.as_str())?;
                self.put(key, &hash)?;
            }
        }

        tracing::info!("PIN registered under '{}' ({:?})", key, format);
        Ok(())
    }
}

impl ConfigProvider for SqliteSettings {
    fn get(&self, key: &str) -> notegate_core::Result<Option<String>> {
        self.get_value(key)
            .map_err(|e| notegate_core::Error::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notegate_core::{secret_matches, GateConfig};

    fn settings() -> SqliteSettings {
        let db = Database::open_in_memory().unwrap();
        SqliteSettings::new(Arc::new(Mutex::new(db)))
    }

    #[test]
    fn test_put_get_remove() {
        let settings = settings();
        assert!(settings.get_value("pkey").unwrap().is_none());

        settings.put("pkey", "1234").unwrap();
        settings.put("pkey", "5678").unwrap();
        assert_eq!(settings.get_value("pkey").unwrap().as_deref(), Some("5678"));

        assert!(settings.remove("pkey").unwrap());
        assert!(!settings.remove("pkey").unwrap());
    }

    #[test]
    fn test_config_provider_default() {
        let settings = settings();
        assert_eq!(settings.get_or("pkey", "").unwrap(), "");
    }

    #[test]
    fn test_register_empty_pin_refused() {
        let settings = settings();
        let err = settings
            .register_pin("pkey", "", SecretFormat::Cleartext)
            .unwrap_err();
        assert!(matches!(err, Error::Validation(ref msg) if msg == INVALID_PIN_MESSAGE));
        assert!(settings.get_value("pkey").unwrap().is_none());
    }

    #[test]
    fn test_register_hashed_pin() {
        let settings = settings();
        settings
            .register_pin("pkey", "1234", SecretFormat::Argon2Phc)
            .unwrap();

        let stored = settings.get_value("pkey").unwrap().unwrap();
        assert_ne!(stored, "1234");

        let config = GateConfig {
            secret_format: SecretFormat::Argon2Phc,
            ..GateConfig::default()
        };
        assert!(secret_matches(&config, &stored, "1234").unwrap());
        assert!(!secret_matches(&config, &stored, "0000").unwrap());
    }
}
