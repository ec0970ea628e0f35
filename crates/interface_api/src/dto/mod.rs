//! Request/response data transfer objects

pub mod lending;
pub mod employee;
pub mod admin;
