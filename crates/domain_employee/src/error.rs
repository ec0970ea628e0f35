//! Employee registry errors

use thiserror::Error;

use core_kernel::PortError;

#[derive(Debug, Error)]
pub enum EmployeeError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Store error: {0}")]
    Store(#[from] PortError),
}

impl EmployeeError {
    pub fn validation(message: impl Into<String>) -> Self {
        EmployeeError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        EmployeeError::NotFound(message.into())
    }
}
