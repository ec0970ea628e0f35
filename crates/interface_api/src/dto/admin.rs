//! Admin DTOs

use serde::{Deserialize, Serialize};

use domain_lending::Application;

#[derive(Debug, Deserialize)]
pub struct AdminLoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AdminLoginResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct AdminApplicationsResponse {
    pub applications: Vec<Application>,
}
