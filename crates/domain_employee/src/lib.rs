//! Employee registry - a simple CRUD aggregate with no state machine
//!
//! Employees share the store abstraction with the lending domain but have
//! none of its lifecycle semantics: an admin creates a record once and lists
//! the registry. Kept as an independent crate so the lending domain stays
//! free of unrelated entities.

pub mod employee;
pub mod registry;
pub mod ports;
pub mod error;

pub use employee::{Employee, EmployeeStatus, NewEmployee};
pub use registry::EmployeeRegistry;
pub use ports::{EmployeeStore, InMemoryEmployeeStore};
pub use error::EmployeeError;
