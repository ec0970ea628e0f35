//! Salary advance application repository

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use core_kernel::{ApplicationId, CustomerId, DomainPort, PortError};
use domain_lending::{Application, ApplicationStore};

use crate::error::StoreError;

/// PostgreSQL-backed implementation of `ApplicationStore`
///
/// One row per application in `salary_advance_applications`; the full entity
/// lives in the `doc` JSONB column and is replaced whole on every write. The
/// `customer_id` and `created_at` columns are denormalized for the
/// latest-by-customer and admin listing queries.
#[derive(Debug, Clone)]
pub struct PgApplicationStore {
    pool: PgPool,
}

impl PgApplicationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_doc(&self, id: Uuid) -> Result<Option<Application>, StoreError> {
        let row = sqlx::query("SELECT doc FROM salary_advance_applications WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(decode_row).transpose()
    }
}

fn decode_row(row: sqlx::postgres::PgRow) -> Result<Application, StoreError> {
    let doc: serde_json::Value = row.try_get("doc")?;
    Ok(serde_json::from_value(doc)?)
}

impl DomainPort for PgApplicationStore {}

#[async_trait]
impl ApplicationStore for PgApplicationStore {
    async fn get(&self, id: ApplicationId) -> Result<Option<Application>, PortError> {
        Ok(self.fetch_doc(*id.as_uuid()).await?)
    }

    async fn latest_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Option<Application>, PortError> {
        let row = sqlx::query(
            "SELECT doc FROM salary_advance_applications \
             WHERE customer_id = $1 \
             ORDER BY created_at DESC \
             LIMIT 1",
        )
        .bind(*customer_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::from)?;

        Ok(row.map(decode_row).transpose()?)
    }

    async fn upsert(&self, application: &Application) -> Result<(), PortError> {
        let doc = serde_json::to_value(application).map_err(StoreError::from)?;

        sqlx::query(
            "INSERT INTO salary_advance_applications (id, customer_id, created_at, doc) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (id) DO UPDATE SET doc = EXCLUDED.doc",
        )
        .bind(*application.id.as_uuid())
        .bind(*application.customer_id.as_uuid())
        .bind(application.created_at)
        .bind(doc)
        .execute(&self.pool)
        .await
        .map_err(StoreError::from)?;

        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Application>, PortError> {
        let rows = sqlx::query(
            "SELECT doc FROM salary_advance_applications ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(StoreError::from)?;

        let applications = rows
            .into_iter()
            .map(decode_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(applications)
    }
}
