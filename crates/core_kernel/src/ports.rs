//! Ports and adapters infrastructure
//!
//! Each domain defines a port trait for the storage it needs; adapters
//! (PostgreSQL document store, in-memory) implement those traits. This
//! module holds the error type and marker trait shared by all ports.

use std::fmt;
use thiserror::Error;

/// Error type for port operations
///
/// A unified error type that all store adapters return, so domain services
/// handle failures the same way regardless of the backing implementation.
#[derive(Debug, Error)]
pub enum PortError {
    /// The requested entity was not found
    #[error("Not found: {entity_type} with id {id}")]
    NotFound {
        entity_type: String,
        id: String,
    },

    /// Connection to the underlying store failed
    #[error("Connection error: {message}")]
    Connection {
        message: String,
    },

    /// Stored document could not be decoded into the current schema
    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
    },

    /// An internal adapter error occurred
    #[error("Internal error: {message}")]
    Internal {
        message: String,
    },
}

impl PortError {
    /// Creates a NotFound error
    pub fn not_found(entity_type: impl Into<String>, id: impl fmt::Display) -> Self {
        PortError::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    /// Creates a Connection error
    pub fn connection(message: impl Into<String>) -> Self {
        PortError::Connection {
            message: message.into(),
        }
    }

    /// Creates a Serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        PortError::Serialization {
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        PortError::Internal {
            message: message.into(),
        }
    }

    /// Returns true if this error indicates the entity was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, PortError::NotFound { .. })
    }
}

/// Marker trait for all domain ports
///
/// All port traits extend this marker to ensure they are thread-safe and
/// usable in async contexts.
pub trait DomainPort: Send + Sync + 'static {}
