//! Request handlers

pub mod lending;
pub mod admin;
pub mod health;
