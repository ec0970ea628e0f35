//! Lending domain ports
//!
//! The `ApplicationStore` trait defines the storage operations the stage
//! transition controller needs: load by id, load most-recent for a
//! customer, whole-entity upsert, and a full listing for the admin view.
//! Adapters implement it over PostgreSQL (infra_store) or in memory (below,
//! used by tests and demo mode).

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use core_kernel::{ApplicationId, CustomerId, DomainPort, PortError};

use crate::application::Application;

/// Storage port consumed by the stage transition controller
#[async_trait]
pub trait ApplicationStore: DomainPort {
    /// Loads an application by id
    async fn get(&self, id: ApplicationId) -> Result<Option<Application>, PortError>;

    /// Loads the most recently created application for a customer
    async fn latest_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Option<Application>, PortError>;

    /// Persists the full entity as a single replace keyed by id
    ///
    /// Last write wins: no per-application lock is held across
    /// load-validate-mutate-persist, so two concurrent transitions on the
    /// same id race and the later write silently discards the earlier
    /// effect. Accepted for a single-actor-per-application workload; a
    /// version counter checked on replace (failing with a conflict and
    /// requiring reload-and-retry) is the upgrade path if that changes.
    async fn upsert(&self, application: &Application) -> Result<(), PortError>;

    /// All applications, newest first (admin view)
    async fn list_all(&self) -> Result<Vec<Application>, PortError>;
}

/// In-memory implementation of `ApplicationStore`
///
/// Backs the test suite and local demo mode; no durability.
#[derive(Debug, Default)]
pub struct InMemoryApplicationStore {
    applications: Arc<RwLock<HashMap<ApplicationId, Application>>>,
}

impl InMemoryApplicationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DomainPort for InMemoryApplicationStore {}

#[async_trait]
impl ApplicationStore for InMemoryApplicationStore {
    async fn get(&self, id: ApplicationId) -> Result<Option<Application>, PortError> {
        Ok(self.applications.read().await.get(&id).cloned())
    }

    async fn latest_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Option<Application>, PortError> {
        let applications = self.applications.read().await;
        Ok(applications
            .values()
            .filter(|a| a.customer_id == customer_id)
            .max_by_key(|a| a.created_at)
            .cloned())
    }

    async fn upsert(&self, application: &Application) -> Result<(), PortError> {
        self.applications
            .write()
            .await
            .insert(application.id, application.clone());
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Application>, PortError> {
        let applications = self.applications.read().await;
        let mut all: Vec<Application> = applications.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upsert_and_get() {
        let store = InMemoryApplicationStore::new();
        let app = Application::new(CustomerId::new_v7(), None);

        store.upsert(&app).await.unwrap();

        let loaded = store.get(app.id).await.unwrap().unwrap();
        assert_eq!(loaded.id, app.id);
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_none() {
        let store = InMemoryApplicationStore::new();
        assert!(store.get(ApplicationId::new_v7()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_upsert_replaces_whole_entity() {
        let store = InMemoryApplicationStore::new();
        let mut app = Application::new(CustomerId::new_v7(), None);
        store.upsert(&app).await.unwrap();

        app.record_event("Apply", "Application started", serde_json::json!({}));
        store.upsert(&app).await.unwrap();

        let loaded = store.get(app.id).await.unwrap().unwrap();
        assert_eq!(loaded.timeline.len(), 1);
    }

    #[tokio::test]
    async fn test_latest_for_customer_picks_newest() {
        let store = InMemoryApplicationStore::new();
        let customer = CustomerId::new_v7();

        let mut first = Application::new(customer, None);
        let mut second = Application::new(customer, None);
        // Force a strict ordering regardless of clock resolution
        first.created_at = second.created_at - chrono::Duration::seconds(1);
        second.created_at = first.created_at + chrono::Duration::seconds(2);

        store.upsert(&first).await.unwrap();
        store.upsert(&second).await.unwrap();
        store
            .upsert(&Application::new(CustomerId::new_v7(), None))
            .await
            .unwrap();

        let latest = store.latest_for_customer(customer).await.unwrap().unwrap();
        assert_eq!(latest.id, second.id);
    }

    #[tokio::test]
    async fn test_list_all_newest_first() {
        let store = InMemoryApplicationStore::new();
        let mut older = Application::new(CustomerId::new_v7(), None);
        let newer = Application::new(CustomerId::new_v7(), None);
        older.created_at = newer.created_at - chrono::Duration::seconds(10);

        store.upsert(&older).await.unwrap();
        store.upsert(&newer).await.unwrap();

        let all = store.list_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, newer.id);
        assert_eq!(all[1].id, older.id);
    }
}
