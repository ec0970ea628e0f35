//! Employee repository

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use core_kernel::{DomainPort, EmployeeId, PortError};
use domain_employee::{Employee, EmployeeStore};

use crate::error::StoreError;

/// PostgreSQL-backed implementation of `EmployeeStore`
///
/// One row per employee in `employees`, full record in the `doc` JSONB
/// column, `created_at` denormalized for the admin listing order.
#[derive(Debug, Clone)]
pub struct PgEmployeeStore {
    pool: PgPool,
}

impl PgEmployeeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn decode_row(row: sqlx::postgres::PgRow) -> Result<Employee, StoreError> {
    let doc: serde_json::Value = row.try_get("doc")?;
    Ok(serde_json::from_value(doc)?)
}

impl DomainPort for PgEmployeeStore {}

#[async_trait]
impl EmployeeStore for PgEmployeeStore {
    async fn get(&self, id: EmployeeId) -> Result<Option<Employee>, PortError> {
        let row = sqlx::query("SELECT doc FROM employees WHERE id = $1")
            .bind(*id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::from)?;

        Ok(row.map(decode_row).transpose()?)
    }

    async fn upsert(&self, employee: &Employee) -> Result<(), PortError> {
        let doc = serde_json::to_value(employee).map_err(StoreError::from)?;

        sqlx::query(
            "INSERT INTO employees (id, created_at, doc) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (id) DO UPDATE SET doc = EXCLUDED.doc",
        )
        .bind(*employee.id.as_uuid())
        .bind(employee.created_at)
        .bind(doc)
        .execute(&self.pool)
        .await
        .map_err(StoreError::from)?;

        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Employee>, PortError> {
        let rows = sqlx::query("SELECT doc FROM employees ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(StoreError::from)?;

        let employees = rows
            .into_iter()
            .map(decode_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(employees)
    }
}
