//! Gate configuration

use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings key the stored PIN lives under
pub const DEFAULT_PIN_KEY: &str = "pkey";

/// What an empty (or absent) stored secret means
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptySecretPolicy {
    /// No PIN configured means nothing unlocks
    #[default]
    Reject,
    /// Empty input matches an empty stored secret (legacy behaviour)
    MatchEmpty,
}

/// How a cleartext stored secret is compared to the input
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecretComparison {
    /// Byte-wise equality that does not leak the mismatch position
    #[default]
    ConstantTime,
    /// Plain string equality. Timing depends on the common prefix length.
    Plain,
}

/// Encoding of the stored secret
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecretFormat {
    /// PIN stored as-is. Readable by anything with access to the settings store.
    #[default]
    Cleartext,
    /// Argon2id PHC string
    Argon2Phc,
}

/// Access gate configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Settings key of the stored PIN
    pub pin_key: String,
    /// Behaviour when no PIN is stored
    pub empty_secret_policy: EmptySecretPolicy,
    /// Cleartext comparison mode
    pub comparison: SecretComparison,
    /// Stored secret encoding
    pub secret_format: SecretFormat,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            pin_key: DEFAULT_PIN_KEY.to_string(),
            empty_secret_policy: EmptySecretPolicy::default(),
            comparison: SecretComparison::default(),
            secret_format: SecretFormat::default(),
        }
    }
}

impl GateConfig {
    /// Configuration reproducing the original screen exactly: cleartext PIN,
    /// plain equality, and an unset PIN unlocked by empty input.
    pub fn legacy() -> Self {
        Self {
            pin_key: DEFAULT_PIN_KEY.to_string(),
            empty_secret_policy: EmptySecretPolicy::MatchEmpty,
            comparison: SecretComparison::Plain,
            secret_format: SecretFormat::Cleartext,
        }
    }

    /// Parse from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
