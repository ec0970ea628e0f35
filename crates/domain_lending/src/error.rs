//! Lending domain errors

use thiserror::Error;

use core_kernel::PortError;

/// Error type for lending operations
#[derive(Debug, Error)]
pub enum LendingError {
    /// Malformed or out-of-order input; the caller can correct and resubmit.
    /// Validation failures never mutate stored state.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Unknown application id; terminal for the request
    #[error("Not found: {0}")]
    NotFound(String),

    /// Store adapter failure surfaced to the caller
    #[error("Store error: {0}")]
    Store(#[from] PortError),
}

impl LendingError {
    pub fn validation(message: impl Into<String>) -> Self {
        LendingError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        LendingError::NotFound(message.into())
    }
}
