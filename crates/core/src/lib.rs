//! Shared primitives for all Rust crates in Rolegrant.

#![forbid(unsafe_code)]

/// Process environment accessors.
pub mod env;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use env::{get_env, get_env_or, lookup_env, lookup_env_or};

/// Result type used across Rolegrant crates.
pub type AppResult<T> = Result<T, AppError>;

/// A validated non-empty UTF-8 string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Creates a validated string with surrounding whitespace removed.
    pub fn trimmed(value: impl AsRef<str>, field: &str) -> AppResult<Self> {
        let value = value.as_ref().trim();
        if value.is_empty() {
            return Err(AppError::Validation(format!("{field} must not be empty")));
        }

        Ok(Self(value.to_owned()))
    }

    /// Returns the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

/// Common application error categories.
#[derive(Debug, Error)]
pub enum AppError {
    /// Required configuration is missing or malformed.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Invalid input or a referenced record that does not exist.
    #[error("validation error: {0}")]
    Validation(String),

    /// Requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Write operation violates a uniqueness constraint.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Storage layer failure.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns true for errors raised by the storage layer, including constraint conflicts.
    #[must_use]
    pub fn is_persistence(&self) -> bool {
        matches!(self, Self::Conflict(_) | Self::Persistence(_))
    }
}
