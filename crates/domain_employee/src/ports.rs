//! Employee storage port and in-memory adapter

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use core_kernel::{DomainPort, EmployeeId, PortError};

use crate::employee::Employee;

/// Storage port for the employee registry
#[async_trait]
pub trait EmployeeStore: DomainPort {
    async fn get(&self, id: EmployeeId) -> Result<Option<Employee>, PortError>;

    /// Persists the full record as a single replace keyed by id
    async fn upsert(&self, employee: &Employee) -> Result<(), PortError>;

    /// All employees, newest first (admin view)
    async fn list_all(&self) -> Result<Vec<Employee>, PortError>;
}

/// In-memory implementation of `EmployeeStore`
///
/// Backs the test suite and local demo mode; no durability.
#[derive(Debug, Default)]
pub struct InMemoryEmployeeStore {
    employees: Arc<RwLock<HashMap<EmployeeId, Employee>>>,
}

impl InMemoryEmployeeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DomainPort for InMemoryEmployeeStore {}

#[async_trait]
impl EmployeeStore for InMemoryEmployeeStore {
    async fn get(&self, id: EmployeeId) -> Result<Option<Employee>, PortError> {
        Ok(self.employees.read().await.get(&id).cloned())
    }

    async fn upsert(&self, employee: &Employee) -> Result<(), PortError> {
        self.employees
            .write()
            .await
            .insert(employee.id, employee.clone());
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Employee>, PortError> {
        let employees = self.employees.read().await;
        let mut all: Vec<Employee> = employees.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }
}
