//! # Password Hashing
//!
//! Hashes and verifies admin/cashier passwords.
//!
//! ## Two Formats On Disk
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Stored value                             Verified with                 │
//! │  ───────────────────────────────────────  ─────────────────────────     │
//! │  $argon2id$v=19$m=19456,t=2,p=1$...       Argon2 (salted, PHC string)   │
//! │  240be518fabd2724ddb6f04eeb1da596...      hex(SHA-256(password))        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Files written by older versions hold unsalted SHA-256 digests. They stay
//! valid forever; the configured [`PasswordScheme`] only decides how *new*
//! passwords are hashed.

use std::fmt;
use std::str::FromStr;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString};
use argon2::Argon2;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{StoreError, StoreResult};

/// How new password hashes are produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PasswordScheme {
    /// Salted Argon2id, PHC string format.
    #[default]
    Argon2,

    /// Unsalted hex SHA-256. Only for files shared with older installs.
    Sha256,
}

impl fmt::Display for PasswordScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PasswordScheme::Argon2 => f.write_str("argon2"),
            PasswordScheme::Sha256 => f.write_str("sha256"),
        }
    }
}

impl FromStr for PasswordScheme {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "argon2" | "argon2id" => Ok(PasswordScheme::Argon2),
            "sha256" | "sha-256" | "legacy" => Ok(PasswordScheme::Sha256),
            other => Err(StoreError::Config(format!("unknown password scheme: {other}"))),
        }
    }
}

/// Hashes new passwords with one scheme, verifies stored hashes of any scheme.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordHasher {
    scheme: PasswordScheme,
}

impl PasswordHasher {
    /// Creates a hasher producing `scheme` hashes.
    pub fn new(scheme: PasswordScheme) -> Self {
        PasswordHasher { scheme }
    }

    /// Returns the scheme used for new hashes.
    pub fn scheme(&self) -> PasswordScheme {
        self.scheme
    }

    /// Hashes `password` for storage.
    pub fn hash(&self, password: &str) -> StoreResult<String> {
        match self.scheme {
            PasswordScheme::Sha256 => Ok(sha256_hex(password)),
            PasswordScheme::Argon2 => {
                let salt = SaltString::generate(&mut OsRng);
                Argon2::default()
                    .hash_password(password.as_bytes(), &salt)
                    .map(|hash| hash.to_string())
                    .map_err(|e| StoreError::PasswordHash(e.to_string()))
            }
        }
    }

    /// Checks `password` against a stored hash of either format.
    ///
    /// Malformed stored values never verify.
    pub fn verify(&self, password: &str, stored: &str) -> bool {
        if stored.starts_with("$argon2") {
            let Ok(parsed) = PasswordHash::new(stored) else {
                return false;
            };
            return Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok();
        }

        !stored.is_empty() && sha256_hex(password).eq_ignore_ascii_case(stored)
    }
}

/// Lowercase hex SHA-256 digest, the legacy on-disk format.
pub fn sha256_hex(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

// =============================================================================
// Unit Tests
// =============================================================================
