//! HTTP API layer
//!
//! REST surface for the salary advance workflow using Axum. All routes live
//! under `/api`; responses return the full updated application so the client
//! never needs a follow-up read after a transition.
//!
//! # Architecture
//!
//! - **Handlers**: thin adapters from wire shapes to domain services
//! - **DTOs**: request payload shapes (responses serialize domain types)
//! - **Error Handling**: domain errors mapped to consistent JSON responses

pub mod config;
pub mod error;
pub mod handlers;
pub mod dto;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use domain_employee::{EmployeeRegistry, EmployeeStore};
use domain_lending::{AdvanceService, ApplicationStore};

use crate::config::ApiConfig;
use crate::handlers::{admin, health, lending};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub lending: Arc<AdvanceService>,
    pub registry: Arc<EmployeeRegistry>,
    pub config: ApiConfig,
}

impl AppState {
    /// Wires the domain services over the given store adapters
    pub fn new(
        applications: Arc<dyn ApplicationStore>,
        employees: Arc<dyn EmployeeStore>,
        config: ApiConfig,
    ) -> Self {
        Self {
            lending: Arc::new(AdvanceService::new(applications)),
            registry: Arc::new(EmployeeRegistry::new(employees)),
            config,
        }
    }
}

/// Creates the main API router
pub fn create_router(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route("/login", post(admin::login))
        .route(
            "/employees",
            post(admin::create_employee).get(admin::list_employees),
        )
        .route("/applications", get(admin::list_applications));

    let advance_routes = Router::new()
        .route("/applications", post(lending::create_application))
        .route("/applications/current", get(lending::get_current_application))
        .route("/applications/:id", get(lending::get_application))
        .route("/kyc/submit", post(lending::submit_kyc))
        .route("/income/submit", post(lending::submit_income))
        .route("/risk/score", post(lending::score_risk))
        .route("/offer/generate", post(lending::generate_offer))
        .route("/offer/accept", post(lending::accept_offer))
        .route("/video-kyc/complete", post(lending::complete_video_kyc))
        .route("/disbursement", post(lending::disburse))
        .route("/repayment/record", post(lending::record_repayment));

    let api_routes = Router::new()
        .route("/health", get(health::health_check))
        .nest("/admin", admin_routes)
        .nest("/salary-advance", advance_routes);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
