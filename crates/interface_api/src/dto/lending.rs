//! Salary advance request DTOs
//!
//! Responses serialize the `Application` aggregate directly; only request
//! payloads need their own shapes here.

use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ApplicationCreateRequest {
    pub applicant_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct KycSubmitRequest {
    pub app_id: String,
    pub pan: String,
    pub aadhaar: String,
    pub selfie_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct IncomeSubmitRequest {
    pub app_id: String,
    pub employer_name: String,
    pub avg_net_salary: Decimal,
    pub salary_credit_dates: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct RiskScoreRequest {
    pub app_id: String,
}

#[derive(Debug, Deserialize)]
pub struct OfferGenerateRequest {
    pub app_id: String,
}

#[derive(Debug, Deserialize)]
pub struct OfferAcceptRequest {
    pub app_id: String,
    /// Declaration language, e.g. "en", "hi" or "en+hi"
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    "en+hi".to_string()
}

#[derive(Debug, Deserialize)]
pub struct VideoKycCompleteRequest {
    pub app_id: String,
}

#[derive(Debug, Deserialize)]
pub struct DisbursementRequest {
    pub app_id: String,
}

#[derive(Debug, Deserialize)]
pub struct RepaymentRecordRequest {
    pub app_id: String,
    #[serde(default)]
    pub late_fee: Decimal,
}
