//! Admin handlers
//!
//! Credential-check login plus the employee registry and the application
//! listing. Login is env-credential based; there is no session or token, the
//! front end just gates its admin screens on the response.

use axum::{extract::State, Json};

use core_kernel::{Currency, Money};
use domain_employee::{Employee, NewEmployee};

use crate::dto::admin::*;
use crate::dto::employee::*;
use crate::error::ApiError;
use crate::AppState;

/// Env-credential admin login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<AdminLoginRequest>,
) -> Result<Json<AdminLoginResponse>, ApiError> {
    let config = &state.config;
    if config.admin_email.is_empty() || config.admin_password.is_empty() {
        return Err(ApiError::Internal(
            "Admin credentials not configured".to_string(),
        ));
    }

    if request.email == config.admin_email && request.password == config.admin_password {
        return Ok(Json(AdminLoginResponse {
            success: true,
            message: "Admin login successful".to_string(),
        }));
    }

    Err(ApiError::Unauthorized(
        "Invalid admin credentials".to_string(),
    ))
}

/// Adds a new employee
pub async fn create_employee(
    State(state): State<AppState>,
    Json(request): Json<EmployeeCreateRequest>,
) -> Result<Json<Employee>, ApiError> {
    let new = NewEmployee {
        name: request.name,
        department: request.department,
        post: request.post,
        email: request.email,
        phone: request.phone,
        salary: request
            .salary
            .map(|amount| Money::new(amount, Currency::INR)),
        joining_date: request.joining_date,
        resignation_date: request.resignation_date,
        last_working_date: request.last_working_date,
        address: request.address,
        status: request.status,
        photo_url: request.photo_url,
    };

    let employee = state.registry.create(new).await?;
    Ok(Json(employee))
}

/// Lists all employees, newest first
pub async fn list_employees(
    State(state): State<AppState>,
) -> Result<Json<EmployeeListResponse>, ApiError> {
    let employees = state.registry.list().await?;
    Ok(Json(EmployeeListResponse { employees }))
}

/// Lists all salary advance applications, newest first
pub async fn list_applications(
    State(state): State<AppState>,
) -> Result<Json<AdminApplicationsResponse>, ApiError> {
    let applications = state.lending.list_applications().await?;
    Ok(Json(AdminApplicationsResponse { applications }))
}
