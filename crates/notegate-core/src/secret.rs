//! PIN input buffer and stored-secret matching

use crate::config::{EmptySecretPolicy, GateConfig, SecretComparison, SecretFormat};
use crate::{Error, Result};
use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, ParamsBuilder, Version,
};
use std::fmt;
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, Zeroizing};

/// Argon2id parameters for PIN hashes
/// Memory: 16 MiB, Iterations: 2, Parallelism: 2
pub const PIN_ARGON2_PARAMS: (u32, u32, u32) = (16384, 2, 2);

/// Contents of the PIN entry field
///
/// The buffer is wiped when cleared and when dropped.
#[derive(Default)]
pub struct PinInput {
    value: Zeroizing<String>,
}

impl PinInput {
    /// Create field holding `value`
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: Zeroizing::new(value.into()),
        }
    }

    /// Replace the field contents
    pub fn set(&mut self, value: impl Into<String>) {
        self.value.zeroize();
        *self.value = value.into();
    }

    /// Current contents
    pub fn as_str(&self) -> &str {
        self.value.as_str()
    }

    /// Check if the field is empty
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Overwrite the field with the empty string
    pub fn clear(&mut self) {
        self.value.zeroize();
    }
}

impl fmt::Debug for PinInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PinInput")
            .field("len", &self.value.len())
            .finish()
    }
}

/// Decide whether `input` unlocks a gate whose stored secret is `stored`
pub fn secret_matches(config: &GateConfig, stored: &str, input: &str) -> Result<bool> {
    if stored.is_empty() {
        return Ok(match config.empty_secret_policy {
            EmptySecretPolicy::Reject => false,
            EmptySecretPolicy::MatchEmpty => input.is_empty(),
        });
    }

    match config.secret_format {
        SecretFormat::Cleartext => Ok(match config.comparison {
            SecretComparison::Plain => input == stored,
            SecretComparison::ConstantTime => input.as_bytes().ct_eq(stored.as_bytes()).into(),
        }),
        SecretFormat::Argon2Phc => {
            let parsed = PasswordHash::new(stored)
                .map_err(|e| Error::InvalidSecretHash(e.to_string()))?;
            Ok(Argon2::default()
                .verify_password(input.as_bytes(), &parsed)
                .is_ok())
        }
    }
}

/// Hash a PIN into an Argon2id PHC string using the given B64 salt
pub fn hash_pin(pin: &str, salt_b64: &str) -> Result<String> {
    let salt = SaltString::from_b64(salt_b64)
        .map_err(|e| Error::InvalidSecretHash(e.to_string()))?;

    let params = ParamsBuilder::new()
        .m_cost(PIN_ARGON2_PARAMS.0)
        .t_cost(PIN_ARGON2_PARAMS.1)
        .p_cost(PIN_ARGON2_PARAMS.2)
        .build()
        .map_err(|e| Error::InvalidSecretHash(e.to_string()))?;

    let argon2 = Argon2::new(argon2::Algorithm::Argon2id, Version::V0x13, params);

    Ok(argon2
        .hash_password(pin.as_bytes(), &salt)
        .map_err(|e| Error::InvalidSecretHash(e.to_string()))?
        .to_string())
}
