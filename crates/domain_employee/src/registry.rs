//! Employee registry service

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use core_kernel::EmployeeId;

use crate::employee::{Employee, NewEmployee};
use crate::error::EmployeeError;
use crate::ports::EmployeeStore;

/// CRUD operations over the employee store
pub struct EmployeeRegistry {
    store: Arc<dyn EmployeeStore>,
}

impl EmployeeRegistry {
    pub fn new(store: Arc<dyn EmployeeStore>) -> Self {
        Self { store }
    }

    /// Creates a new employee record
    pub async fn create(&self, new: NewEmployee) -> Result<Employee, EmployeeError> {
        if new.name.trim().is_empty() {
            return Err(EmployeeError::validation("Employee name is required"));
        }
        if new.department.trim().is_empty() {
            return Err(EmployeeError::validation("Department is required"));
        }
        if new.post.trim().is_empty() {
            return Err(EmployeeError::validation("Post is required"));
        }

        let employee = Employee {
            id: EmployeeId::new_v7(),
            employee_code: employee_code(),
            name: new.name,
            department: new.department,
            post: new.post,
            email: new.email,
            phone: new.phone,
            salary: new.salary,
            joining_date: new.joining_date,
            resignation_date: new.resignation_date,
            last_working_date: new.last_working_date,
            address: new.address,
            status: new.status.unwrap_or_default(),
            photo_url: new.photo_url,
            created_at: Utc::now(),
        };

        self.store.upsert(&employee).await?;
        tracing::info!(employee_id = %employee.id, code = %employee.employee_code, "employee created");
        Ok(employee)
    }

    /// Loads an employee by id
    pub async fn get(&self, id: EmployeeId) -> Result<Employee, EmployeeError> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| EmployeeError::not_found(format!("Employee {id}")))
    }

    /// All employees, newest first (admin view)
    pub async fn list(&self) -> Result<Vec<Employee>, EmployeeError> {
        Ok(self.store.list_all().await?)
    }
}

/// Generates a human-facing employee code: `EMP` plus 6 uppercase hex chars
fn employee_code() -> String {
    let hex = Uuid::new_v4().simple().to_string().to_uppercase();
    format!("EMP{}", &hex[..6])
}
