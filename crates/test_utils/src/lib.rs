//! Shared test infrastructure for the salary advance workspace
//!
//! - `fixtures`: predictable, ready-made values for common inputs
//! - `builders`: builders that construct applications at any lifecycle point

pub mod fixtures;
pub mod builders;

pub use fixtures::*;
pub use builders::*;
