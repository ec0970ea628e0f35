//! Core Kernel - Foundational types and utilities for the salary advance system
//!
//! This crate provides the building blocks used across all domain modules:
//! - Money types with precise decimal arithmetic
//! - Strongly-typed identifiers
//! - Shared port error types

pub mod money;
pub mod identifiers;
pub mod ports;

pub use money::{Money, Currency, Rate, MoneyError};
pub use identifiers::{ApplicationId, CustomerId, EmployeeId};
pub use ports::{PortError, DomainPort};
