//! Error types for rentaltrack.
//!
//! This module defines all error types used throughout the rentaltrack crate.
//! Domain errors are surfaced to the caller as-is; storage and configuration
//! errors carry enough context to be shown to the user directly.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for rentaltrack operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Domain Errors ===
    /// A required input field was missing or blank.
    #[error("invalid input: {field} is required")]
    InvalidInput {
        /// Name of the offending field.
        field: &'static str,
    },

    /// A customer with this phone number is already registered.
    #[error("a customer with phone number {phone} is already registered")]
    DuplicateKey {
        /// The conflicting phone number.
        phone: String,
    },

    /// No customer is registered under this phone number.
    #[error("no customer found with phone number {phone}")]
    NotFound {
        /// The phone number that was looked up.
        phone: String,
    },

    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to run database migrations.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Persisted data parsed but violates a registry invariant.
    #[error("corrupt rental data: {message}")]
    CorruptData {
        /// Description of the violated invariant.
        message: String,
    },

    // === Generic Errors ===
    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for rentaltrack operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create an invalid input error for the given field.
    #[must_use]
    pub fn invalid_input(field: &'static str) -> Self {
        Self::InvalidInput { field }
    }

    /// Create a duplicate key error for the given phone number.
    #[must_use]
    pub fn duplicate_key(phone: impl Into<String>) -> Self {
        Self::DuplicateKey {
            phone: phone.into(),
        }
    }

    /// Create a not found error for the given phone number.
    #[must_use]
    pub fn not_found(phone: impl Into<String>) -> Self {
        Self::NotFound {
            phone: phone.into(),
        }
    }

    /// Create a corrupt data error.
    #[must_use]
    pub fn corrupt_data(message: impl Into<String>) -> Self {
        Self::CorruptData {
            message: message.into(),
        }
    }

    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this error is a missing-input error.
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }

    /// Check if this error is a duplicate phone number.
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::DuplicateKey { .. })
    }

    /// Check if this error is an unknown phone number.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
