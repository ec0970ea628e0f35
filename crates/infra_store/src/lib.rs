//! PostgreSQL storage layer
//!
//! Implements the domain store ports over PostgreSQL using SQLx. Each
//! aggregate is persisted as one JSONB document per row, replaced whole on
//! every write, which matches the whole-entity upsert semantics the domain
//! ports expose. The schema lives in `schema.sql` at the crate root.

pub mod pool;
pub mod error;
pub mod repositories;

pub use pool::{create_pool, create_pool_from_url, DatabaseConfig, DatabasePool};
pub use error::StoreError;
pub use repositories::{PgApplicationStore, PgEmployeeStore};
