//! Error types for the user store

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors surfaced by persistence adapters.
///
/// "Not found" is deliberately absent: a missing row is an `Option::None`
/// (or `false` from delete), never an error, at every layer of the core.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store rejected a write because the email is already taken.
    /// Raised on create; never recovered internally.
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// Any other store or connectivity fault. Fatal to the request.
    #[error("Database error: {0}")]
    Database(String),
}

impl StoreError {
    /// True when the error is the duplicate-email signal.
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, StoreError::UniqueViolation(_))
    }
}
