//! Salary advance handlers
//!
//! Thin adapters from the wire shapes to `AdvanceService` operations. The
//! caller's identity is not resolved here; customer-facing endpoints act as
//! the configured demo customer.

use axum::{
    extract::{Path, State},
    Json,
};

use core_kernel::{ApplicationId, CustomerId};
use domain_lending::Application;

use crate::dto::lending::*;
use crate::error::ApiError;
use crate::AppState;

fn parse_app_id(raw: &str) -> Result<ApplicationId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid application id: {raw}")))
}

/// Starts a new application for the demo customer
pub async fn create_application(
    State(state): State<AppState>,
    Json(request): Json<ApplicationCreateRequest>,
) -> Result<Json<Application>, ApiError> {
    let customer = CustomerId::from_uuid(state.config.demo_customer_id);
    let app = state
        .lending
        .create_application(customer, request.applicant_name)
        .await?;
    Ok(Json(app))
}

/// Returns the demo customer's most recent application
pub async fn get_current_application(
    State(state): State<AppState>,
) -> Result<Json<Application>, ApiError> {
    let customer = CustomerId::from_uuid(state.config.demo_customer_id);
    let app = state.lending.current_application(customer).await?;
    Ok(Json(app))
}

/// Returns an application by id
pub async fn get_application(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Application>, ApiError> {
    let app = state.lending.get_application(parse_app_id(&id)?).await?;
    Ok(Json(app))
}

/// Submits PAN, Aadhaar and selfie info
pub async fn submit_kyc(
    State(state): State<AppState>,
    Json(request): Json<KycSubmitRequest>,
) -> Result<Json<Application>, ApiError> {
    let app = state
        .lending
        .submit_kyc(
            parse_app_id(&request.app_id)?,
            &request.pan,
            &request.aadhaar,
            request.selfie_url.is_some(),
        )
        .await?;
    Ok(Json(app))
}

/// Submits employer and salary details
pub async fn submit_income(
    State(state): State<AppState>,
    Json(request): Json<IncomeSubmitRequest>,
) -> Result<Json<Application>, ApiError> {
    let app = state
        .lending
        .submit_income(
            parse_app_id(&request.app_id)?,
            &request.employer_name,
            request.avg_net_salary,
            request.salary_credit_dates,
        )
        .await?;
    Ok(Json(app))
}

/// Runs the simulated bureau pull and risk rules
pub async fn score_risk(
    State(state): State<AppState>,
    Json(request): Json<RiskScoreRequest>,
) -> Result<Json<Application>, ApiError> {
    let app = state.lending.score_risk(parse_app_id(&request.app_id)?).await?;
    Ok(Json(app))
}

/// Generates the salary advance offer
pub async fn generate_offer(
    State(state): State<AppState>,
    Json(request): Json<OfferGenerateRequest>,
) -> Result<Json<Application>, ApiError> {
    let app = state
        .lending
        .generate_offer(parse_app_id(&request.app_id)?)
        .await?;
    Ok(Json(app))
}

/// Records the customer's acceptance of the offer
pub async fn accept_offer(
    State(state): State<AppState>,
    Json(request): Json<OfferAcceptRequest>,
) -> Result<Json<Application>, ApiError> {
    let app = state
        .lending
        .accept_offer(parse_app_id(&request.app_id)?, &request.language)
        .await?;
    Ok(Json(app))
}

/// Marks video KYC as completed
pub async fn complete_video_kyc(
    State(state): State<AppState>,
    Json(request): Json<VideoKycCompleteRequest>,
) -> Result<Json<Application>, ApiError> {
    let app = state
        .lending
        .complete_video_kyc(parse_app_id(&request.app_id)?)
        .await?;
    Ok(Json(app))
}

/// Simulates instant disbursement
pub async fn disburse(
    State(state): State<AppState>,
    Json(request): Json<DisbursementRequest>,
) -> Result<Json<Application>, ApiError> {
    let app = state.lending.disburse(parse_app_id(&request.app_id)?).await?;
    Ok(Json(app))
}

/// Records the repayment and closes the advance
pub async fn record_repayment(
    State(state): State<AppState>,
    Json(request): Json<RepaymentRecordRequest>,
) -> Result<Json<Application>, ApiError> {
    let app = state
        .lending
        .record_repayment(parse_app_id(&request.app_id)?, request.late_fee)
        .await?;
    Ok(Json(app))
}
