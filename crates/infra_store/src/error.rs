//! Storage error types

use thiserror::Error;

use core_kernel::PortError;

/// Errors raised by the PostgreSQL adapters
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("SQL error: {0}")]
    Sql(#[from] sqlx::Error),
}

impl From<serde_json::Error> for StoreError {
    fn from(error: serde_json::Error) -> Self {
        StoreError::Serialization(error.to_string())
    }
}

/// Maps adapter errors onto the transport-agnostic port error the domain
/// crates consume
impl From<StoreError> for PortError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::ConnectionFailed(message) => PortError::connection(message),
            StoreError::Serialization(message) => PortError::serialization(message),
            StoreError::Sql(sqlx::Error::PoolTimedOut) => {
                PortError::connection("connection pool timed out")
            }
            StoreError::Sql(error) => PortError::internal(error.to_string()),
        }
    }
}
