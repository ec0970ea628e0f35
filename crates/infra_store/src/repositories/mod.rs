//! Repository implementations for domain entities
//!
//! Each repository persists one aggregate as a JSONB document per row and
//! implements the corresponding domain store port. Queries are runtime-bound
//! so the crate builds without a live database.

pub mod applications;
pub mod employees;

pub use applications::PgApplicationStore;
pub use employees::PgEmployeeStore;
