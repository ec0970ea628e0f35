//! Employee aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{EmployeeId, Money};

/// Employment status; `Active` unless HR records otherwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeStatus {
    Active,
    Abscond,
    Resigned,
    Terminated,
    Death,
}

impl Default for EmployeeStatus {
    fn default() -> Self {
        EmployeeStatus::Active
    }
}

/// An employee record
///
/// Employment dates are kept as opaque strings; HR supplies them in local
/// formats and nothing downstream computes with them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    /// Human-facing code, assigned at creation, immutable
    pub employee_code: String,
    pub name: String,
    pub department: String,
    pub post: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub salary: Option<Money>,
    pub joining_date: Option<String>,
    pub resignation_date: Option<String>,
    pub last_working_date: Option<String>,
    pub address: Option<String>,
    pub status: EmployeeStatus,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Attributes supplied when creating an employee; id, code, and timestamp
/// are assigned by the registry
#[derive(Debug, Clone, Default)]
pub struct NewEmployee {
    pub name: String,
    pub department: String,
    pub post: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub salary: Option<Money>,
    pub joining_date: Option<String>,
    pub resignation_date: Option<String>,
    pub last_working_date: Option<String>,
    pub address: Option<String>,
    pub status: Option<EmployeeStatus>,
    pub photo_url: Option<String>,
}
