//! # Store Error Types
//!
//! Error types for store operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  ValidationError / CoreError (mart-core)                               │
//! │  std::io::Error, serde_json::Error, argon2 errors                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds context and categorization            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Caller shows `err.to_string()` in an error dialog                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use mart_core::{CoreError, ValidationError};
use thiserror::Error;

/// Store operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Entity not found in its store.
    ///
    /// ## When This Occurs
    /// - Updating/deleting/selling a product that isn't on the shelf
    /// - Updating/deleting a cashier that was never registered
    /// - A category with no products at all
    #[error("{entity} '{id}' not found")]
    NotFound { entity: String, id: String },

    /// Uniqueness violation.
    ///
    /// ## When This Occurs
    /// - Product name already on that shelf (any letter case)
    /// - Cashier username already registered
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// The admin account cannot be changed through cashier operations.
    #[error("Cannot {action} the admin account")]
    AdminProtected { action: String },

    /// Business rule failure (insufficient stock, empty cart, ...).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Input validation failure.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Reading or writing a backing file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A document could not be encoded.
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Password hashing failed.
    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    /// Configuration could not be loaded, validated or saved.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Creates a Duplicate error.
    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        StoreError::Duplicate {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Creates an AdminProtected error.
    pub fn admin_protected(action: impl Into<String>) -> Self {
        StoreError::AdminProtected {
            action: action.into(),
        }
    }

    /// Wraps an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<toml::de::Error> for StoreError {
    fn from(err: toml::de::Error) -> Self {
        StoreError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for StoreError {
    fn from(err: toml::ser::Error) -> Self {
        StoreError::Config(err.to_string())
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            StoreError::not_found("Product", "Laptop").to_string(),
            "Product 'Laptop' not found"
        );
        assert_eq!(
            StoreError::duplicate("Username", "john").to_string(),
            "Username 'john' already exists"
        );
        assert_eq!(
            StoreError::admin_protected("delete").to_string(),
            "Cannot delete the admin account"
        );
    }

    #[test]
    fn test_core_errors_pass_through_verbatim() {
        let err: StoreError = CoreError::EmptyCart.into();
        assert_eq!(err.to_string(), "Cart is empty");
    }
}
