//! # User Store
//!
//! Admin and cashier credentials. The admin lives in its own document so a
//! cashier operation can never overwrite it.
//!
//! ```text
//! admin.txt      {"username": "admin", "password": "<hash>"}
//! cashiers.txt   {"john": "<hash>", "mary": "<hash>"}
//! ```

use std::collections::BTreeMap;
use std::path::PathBuf;

use mart_core::validation::{validate_cashier_credentials, validate_required};
use mart_core::{is_admin_username, ADMIN_USERNAME};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::DEFAULT_ADMIN_PASSWORD;
use crate::document::JsonDocument;
use crate::error::{StoreError, StoreResult};
use crate::password::PasswordHasher;

/// The single admin record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminRecord {
    pub username: String,
    pub password: String,
}

/// Username → password hash.
pub type CashierTable = BTreeMap<String, String>;

/// Store for admin and cashier accounts.
#[derive(Debug)]
pub struct UserStore {
    admin: JsonDocument<AdminRecord>,
    cashiers: JsonDocument<CashierTable>,
    hasher: PasswordHasher,
    default_admin_password: String,
}

impl UserStore {
    /// Creates a store over the admin and cashier files.
    ///
    /// New passwords are hashed with `hasher`; the admin record, when first
    /// created, gets the stock `admin123` password.
    pub fn new(
        admin_path: impl Into<PathBuf>,
        cashiers_path: impl Into<PathBuf>,
        hasher: PasswordHasher,
    ) -> Self {
        UserStore {
            admin: JsonDocument::new(admin_path),
            cashiers: JsonDocument::new(cashiers_path),
            hasher,
            default_admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
        }
    }

    /// Overrides the password written when the admin record is created.
    pub fn with_default_admin_password(mut self, password: impl Into<String>) -> Self {
        self.default_admin_password = password.into();
        self
    }

    /// Writes the default admin record if the admin file does not exist.
    ///
    /// Idempotent. A damaged admin file is left alone (and logins as admin
    /// fail) rather than being reset to the default password. Returns `true`
    /// if the record was created by this call.
    pub fn ensure_admin(&self) -> StoreResult<bool> {
        let created = self.admin.create_if_absent(|| {
            Ok(AdminRecord {
                username: ADMIN_USERNAME.to_string(),
                password: self.hasher.hash(&self.default_admin_password)?,
            })
        })?;

        if created {
            info!(path = %self.admin.path().display(), "Created default admin account");
        }
        Ok(created)
    }

    /// Registers a cashier.
    ///
    /// ## Returns
    /// * `Err(StoreError::Validation)` - Empty field or the reserved admin name
    /// * `Err(StoreError::Duplicate)` - Username already registered
    pub fn add_cashier(&self, username: &str, password: &str) -> StoreResult<()> {
        validate_cashier_credentials(username, password)?;
        let username = username.trim();
        debug!(username, "Adding cashier");

        self.cashiers.update(|table| {
            if table.contains_key(username) {
                return Err(StoreError::duplicate("Username", username));
            }
            table.insert(username.to_string(), self.hasher.hash(password)?);
            Ok(())
        })?;

        info!(username, "Cashier added");
        Ok(())
    }

    /// Replaces a cashier's password.
    pub fn update_cashier(&self, username: &str, new_password: &str) -> StoreResult<()> {
        validate_required("username", username)?;
        validate_required("password", new_password)?;
        if is_admin_username(username) {
            return Err(StoreError::admin_protected("update"));
        }
        let username = username.trim();
        debug!(username, "Updating cashier password");

        self.cashiers.update(|table| {
            let slot = table
                .get_mut(username)
                .ok_or_else(|| StoreError::not_found("Cashier", username))?;
            *slot = self.hasher.hash(new_password)?;
            Ok(())
        })
    }

    /// Removes a cashier.
    pub fn delete_cashier(&self, username: &str) -> StoreResult<()> {
        validate_required("username", username)?;
        if is_admin_username(username) {
            return Err(StoreError::admin_protected("delete"));
        }
        let username = username.trim();
        debug!(username, "Deleting cashier");

        self.cashiers.update(|table| {
            table
                .remove(username)
                .map(|_| ())
                .ok_or_else(|| StoreError::not_found("Cashier", username))
        })?;

        info!(username, "Cashier deleted");
        Ok(())
    }

    /// Returns all cashier usernames, sorted ascending.
    pub fn list_cashiers(&self) -> StoreResult<Vec<String>> {
        Ok(self.cashiers.load()?.into_keys().collect())
    }

    /// Checks a username/password pair.
    ///
    /// Names matching `admin` (any case) are checked against the admin
    /// record only; every other name against the cashier table only.
    pub fn validate(&self, username: &str, password: &str) -> StoreResult<bool> {
        self.ensure_admin()?;

        if username.trim().is_empty() || password.is_empty() {
            return Ok(false);
        }

        if is_admin_username(username) {
            self.validate_admin(password)
        } else {
            self.validate_cashier(username, password)
        }
    }

    /// Checks a password against the admin record.
    pub fn validate_admin(&self, password: &str) -> StoreResult<bool> {
        match self.admin.read()? {
            Some(record) => Ok(self.hasher.verify(password, &record.password)),
            None => {
                warn!(
                    path = %self.admin.path().display(),
                    "Admin record missing or malformed, rejecting admin login"
                );
                Ok(false)
            }
        }
    }

    /// Checks a password against one cashier's hash.
    pub fn validate_cashier(&self, username: &str, password: &str) -> StoreResult<bool> {
        let table = self.cashiers.load()?;
        Ok(table
            .get(username.trim())
            .is_some_and(|hash| self.hasher.verify(password, hash)))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
