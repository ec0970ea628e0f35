//! Stage transition controller
//!
//! `AdvanceService` drives the application lifecycle. Every transition is
//! atomic from the caller's point of view: load the current entity,
//! validate preconditions (fail fast, no mutation), mutate in memory,
//! append exactly one timeline event, then persist the full entity as a
//! single replace. Validation failures leave the stored entity untouched.
//!
//! Preconditions gate on sub-records, not on `current_stage`; the stage
//! pointer is advisory and only ever moves forward.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;

use core_kernel::{ApplicationId, Currency, CustomerId, Money};

use crate::application::{
    Application, DisbursementStatus, RepaymentStatus, Stage, VideoKycStatus,
};
use crate::error::LendingError;
use crate::ports::ApplicationStore;
use crate::rules;

/// All advances are denominated in rupees
const SETTLEMENT_CURRENCY: Currency = Currency::INR;

/// Simulated face-match confidence reported by the KYC transition
const SIMULATED_FACE_MATCH_SCORE: Decimal = dec!(0.92);

/// Orchestrates salary advance stage transitions over an injected store
pub struct AdvanceService {
    store: Arc<dyn ApplicationStore>,
}

impl AdvanceService {
    /// Creates a new service over the given application store
    pub fn new(store: Arc<dyn ApplicationStore>) -> Self {
        Self { store }
    }

    async fn load(&self, id: ApplicationId) -> Result<Application, LendingError> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| LendingError::not_found(format!("Application {id}")))
    }

    async fn persist(&self, application: Application) -> Result<Application, LendingError> {
        self.store.upsert(&application).await?;
        Ok(application)
    }

    /// Starts a new application for a customer
    pub async fn create_application(
        &self,
        customer_id: CustomerId,
        applicant_name: Option<String>,
    ) -> Result<Application, LendingError> {
        let mut app = Application::new(customer_id, applicant_name);
        app.record_event("Apply", "Application started", json!({}));

        tracing::info!(application_id = %app.id, customer_id = %customer_id, "application created");
        self.persist(app).await
    }

    /// Loads the most recent application for a customer
    pub async fn current_application(
        &self,
        customer_id: CustomerId,
    ) -> Result<Application, LendingError> {
        self.store
            .latest_for_customer(customer_id)
            .await?
            .ok_or_else(|| LendingError::not_found("No application found"))
    }

    /// Loads an application by id
    pub async fn get_application(
        &self,
        id: ApplicationId,
    ) -> Result<Application, LendingError> {
        self.load(id).await
    }

    /// All applications, newest first (admin view)
    pub async fn list_applications(&self) -> Result<Vec<Application>, LendingError> {
        Ok(self.store.list_all().await?)
    }

    /// Submits PAN, Aadhaar, and selfie info; verification is simulated
    pub async fn submit_kyc(
        &self,
        id: ApplicationId,
        pan: &str,
        aadhaar: &str,
        selfie_present: bool,
    ) -> Result<Application, LendingError> {
        let mut app = self.load(id).await?;

        let pan = pan.trim();
        if pan.chars().count() != 10 {
            return Err(LendingError::validation("Invalid PAN format"));
        }
        if aadhaar.len() != 12 || !aadhaar.bytes().all(|b| b.is_ascii_digit()) {
            return Err(LendingError::validation("Invalid Aadhaar format"));
        }

        app.kyc.pan = Some(pan.to_uppercase());
        app.kyc.pan_verified = true;
        app.kyc.aadhaar = Some(aadhaar.to_string());
        app.kyc.aadhaar_verified = true;
        app.kyc.selfie_captured = selfie_present;
        app.kyc.face_match_score = Some(SIMULATED_FACE_MATCH_SCORE);
        app.kyc.face_match_passed = true;

        app.advance_to(Stage::IncomeCheck);
        app.record_event(
            "KYC",
            "PAN & Aadhaar verified, selfie and face match completed (simulated)",
            json!({}),
        );

        tracing::info!(application_id = %app.id, "kyc submitted");
        self.persist(app).await
    }

    /// Submits employer and salary details; stability is derived from the
    /// count of supplied credit dates
    pub async fn submit_income(
        &self,
        id: ApplicationId,
        employer_name: &str,
        avg_net_salary: Decimal,
        salary_credit_dates: Vec<String>,
    ) -> Result<Application, LendingError> {
        if avg_net_salary <= dec!(0) {
            return Err(LendingError::validation("Average salary must be positive"));
        }

        let mut app = self.load(id).await?;

        app.income.employer_name = Some(employer_name.to_string());
        app.income.avg_net_salary = Some(Money::new(avg_net_salary, SETTLEMENT_CURRENCY));
        app.income.stability_score = Some(rules::stability_score(&salary_credit_dates));
        app.income.salary_credit_dates = salary_credit_dates;

        app.advance_to(Stage::RiskScoring);
        app.record_event(
            "Income Check",
            "Employer and salary details submitted, stability evaluated (simulated)",
            json!({}),
        );

        tracing::info!(application_id = %app.id, "income submitted");
        self.persist(app).await
    }

    /// Simulates the bureau pull and internal risk rules
    pub async fn score_risk(&self, id: ApplicationId) -> Result<Application, LendingError> {
        let mut app = self.load(id).await?;

        let avg_salary = app
            .income
            .avg_net_salary
            .ok_or_else(|| LendingError::validation("Income details missing"))?;

        let bureau_score = rules::bureau_score(avg_salary.amount());
        let category = rules::risk_category(bureau_score);

        app.risk.bureau_score = Some(bureau_score);
        app.risk.risk_category = Some(category);

        app.advance_to(Stage::Offer);
        app.record_event(
            "Risk Scoring",
            &format!("Bureau score {bureau_score}, risk category {category} (simulated)"),
            json!({}),
        );

        tracing::info!(application_id = %app.id, bureau_score, "risk scored");
        self.persist(app).await
    }

    /// Generates the salary advance offer from income and risk profile
    pub async fn generate_offer(&self, id: ApplicationId) -> Result<Application, LendingError> {
        let mut app = self.load(id).await?;

        let (avg_salary, category) = match (app.income.avg_net_salary, app.risk.risk_category) {
            (Some(salary), Some(category)) => (salary, category),
            _ => {
                return Err(LendingError::validation(
                    "Income or risk information missing",
                ))
            }
        };

        let terms = rules::offer_terms(avg_salary, category, Utc::now());

        app.offer.amount = Some(terms.amount);
        app.offer.processing_fee = Some(terms.processing_fee);
        app.offer.interest_rate_annual = Some(terms.interest_rate_annual);
        app.offer.repayment_date = Some(terms.repayment_date);

        // Stage is already `offer` after risk scoring; the pointer is
        // unchanged by regeneration
        app.advance_to(Stage::Offer);
        app.record_event(
            "Offer",
            "Salary advance offer generated",
            json!({
                "amount": terms.amount.amount(),
                "processing_fee": terms.processing_fee.amount(),
                "interest_rate_annual": terms.interest_rate_annual,
                "repayment_date": terms.repayment_date.to_rfc3339(),
            }),
        );

        tracing::info!(application_id = %app.id, amount = %terms.amount, "offer generated");
        self.persist(app).await
    }

    /// Records the customer's acceptance of the offer and declarations
    pub async fn accept_offer(
        &self,
        id: ApplicationId,
        language: &str,
    ) -> Result<Application, LendingError> {
        let mut app = self.load(id).await?;

        if app.offer.amount.is_none() {
            return Err(LendingError::validation("Offer not generated yet"));
        }

        app.consent.accepted = true;
        app.consent.accepted_at = Some(Utc::now());
        app.consent.language = Some(language.to_string());

        app.advance_to(Stage::Consent);
        app.record_event(
            "Consent",
            "Customer accepted offer and declarations",
            json!({ "language": language }),
        );

        tracing::info!(application_id = %app.id, "offer accepted");
        self.persist(app).await
    }

    /// Marks video KYC as completed (simulated; no stricter precondition)
    pub async fn complete_video_kyc(
        &self,
        id: ApplicationId,
    ) -> Result<Application, LendingError> {
        let mut app = self.load(id).await?;

        app.video_kyc.status = VideoKycStatus::Completed;
        app.video_kyc.completed_at = Some(Utc::now());

        app.advance_to(Stage::VideoKyc);
        app.record_event("Video KYC", "Video KYC marked as completed (simulated)", json!({}));

        tracing::info!(application_id = %app.id, "video kyc completed");
        self.persist(app).await
    }

    /// Simulates instant disbursement; repayment falls due on the offer's
    /// repayment date
    pub async fn disburse(&self, id: ApplicationId) -> Result<Application, LendingError> {
        let mut app = self.load(id).await?;

        let amount = app
            .offer
            .amount
            .ok_or_else(|| LendingError::validation("Offer not generated"))?;
        if !app.consent.accepted {
            return Err(LendingError::validation("Offer not accepted"));
        }

        let disbursed_at = Utc::now();
        let reference_id = rules::disbursement_reference();

        app.disbursement.status = DisbursementStatus::Done;
        app.disbursement.amount = Some(amount);
        app.disbursement.reference_id = Some(reference_id.clone());
        app.disbursement.disbursed_at = Some(disbursed_at);

        app.repayment.status = RepaymentStatus::Due;
        app.repayment.due_date = app.offer.repayment_date;

        app.advance_to(Stage::Repayment);
        app.record_event(
            "Disbursement",
            "Amount disbursed to customer (simulated)",
            json!({
                "amount": amount.amount(),
                "reference_id": reference_id,
                "disbursed_at": disbursed_at.to_rfc3339(),
            }),
        );

        tracing::info!(application_id = %app.id, amount = %amount, reference_id = %reference_id, "disbursed");
        self.persist(app).await
    }

    /// Records the repayment and closes the advance
    pub async fn record_repayment(
        &self,
        id: ApplicationId,
        late_fee: Decimal,
    ) -> Result<Application, LendingError> {
        let mut app = self.load(id).await?;

        if !matches!(
            app.repayment.status,
            RepaymentStatus::Due | RepaymentStatus::Overdue
        ) {
            return Err(LendingError::validation("Repayment is not due"));
        }

        let late_fee = Money::new(late_fee, SETTLEMENT_CURRENCY);
        let paid_at = Utc::now();
        let outcome = rules::settle_repayment(&late_fee);

        app.repayment.status = outcome.repayment_status;
        app.repayment.paid_date = Some(paid_at);
        app.repayment.late_fee = Some(late_fee);
        app.collection.status = outcome.collection_status;

        app.advance_to(Stage::Closed);
        app.record_event(
            "Repayment",
            "Repayment recorded and loan closed",
            json!({
                "late_fee": late_fee.amount(),
                "paid_at": paid_at.to_rfc3339(),
            }),
        );

        tracing::info!(application_id = %app.id, late_fee = %late_fee, "repayment recorded");
        self.persist(app).await
    }
}
