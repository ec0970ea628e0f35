//! Employee DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use domain_employee::{Employee, EmployeeStatus};

#[derive(Debug, Deserialize)]
pub struct EmployeeCreateRequest {
    pub name: String,
    pub department: String,
    pub post: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub salary: Option<Decimal>,
    pub joining_date: Option<String>,
    pub resignation_date: Option<String>,
    pub last_working_date: Option<String>,
    pub address: Option<String>,
    pub status: Option<EmployeeStatus>,
    pub photo_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EmployeeListResponse {
    pub employees: Vec<Employee>,
}
