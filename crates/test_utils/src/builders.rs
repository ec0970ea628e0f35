//! Test data builders
//!
//! `ApplicationBuilder` constructs an application advanced to any point in
//! the lifecycle without going through the transition controller, for tests
//! that need a mid-lifecycle starting state.

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{Currency, CustomerId, Money};
use domain_lending::{
    Application, DisbursementStatus, RepaymentStatus, RiskCategory, Stage, VideoKycStatus,
    rules,
};
use domain_employee::{EmployeeStatus, NewEmployee};

use crate::fixtures::{IdFixtures, StringFixtures};

/// Builder for applications at an arbitrary lifecycle point
pub struct ApplicationBuilder {
    customer_id: CustomerId,
    applicant_name: Option<String>,
    avg_net_salary: Money,
    credit_months: usize,
    stage: Stage,
}

impl Default for ApplicationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplicationBuilder {
    pub fn new() -> Self {
        Self {
            customer_id: IdFixtures::customer(),
            applicant_name: Some("Asha Rao".to_string()),
            avg_net_salary: Money::new(dec!(60000.00), Currency::INR),
            credit_months: 6,
            stage: Stage::Apply,
        }
    }

    pub fn with_customer(mut self, customer_id: CustomerId) -> Self {
        self.customer_id = customer_id;
        self
    }

    pub fn with_applicant_name(mut self, name: impl Into<String>) -> Self {
        self.applicant_name = Some(name.into());
        self
    }

    pub fn with_salary(mut self, amount: Decimal) -> Self {
        self.avg_net_salary = Money::new(amount, Currency::INR);
        self
    }

    pub fn with_credit_months(mut self, months: usize) -> Self {
        self.credit_months = months;
        self
    }

    /// Advances the built application to the given lifecycle point, filling
    /// every earlier sub-record consistently
    pub fn at_stage(mut self, stage: Stage) -> Self {
        self.stage = stage;
        self
    }

    pub fn build(self) -> Application {
        let mut app = Application::new(self.customer_id, self.applicant_name.clone());
        app.record_event("Apply", "Application started", serde_json::json!({}));

        let reached = |target: Stage| stage_order(self.stage) >= stage_order(target);

        if reached(Stage::IncomeCheck) {
            app.kyc.pan = Some(StringFixtures::pan().to_string());
            app.kyc.pan_verified = true;
            app.kyc.aadhaar = Some(StringFixtures::aadhaar().to_string());
            app.kyc.aadhaar_verified = true;
            app.kyc.selfie_captured = true;
            app.kyc.face_match_score = Some(dec!(0.92));
            app.kyc.face_match_passed = true;
        }

        if reached(Stage::RiskScoring) {
            let dates = StringFixtures::credit_dates(self.credit_months);
            app.income.employer_name = Some(StringFixtures::employer().to_string());
            app.income.avg_net_salary = Some(self.avg_net_salary);
            app.income.stability_score = Some(rules::stability_score(&dates));
            app.income.salary_credit_dates = dates;
        }

        if reached(Stage::Offer) {
            let score = rules::bureau_score(self.avg_net_salary.amount());
            app.risk.bureau_score = Some(score);
            app.risk.risk_category = Some(rules::risk_category(score));
        }

        if reached(Stage::Consent) {
            let category = app.risk.risk_category.unwrap_or(RiskCategory::High);
            let terms = rules::offer_terms(self.avg_net_salary, category, Utc::now());
            app.offer.amount = Some(terms.amount);
            app.offer.processing_fee = Some(terms.processing_fee);
            app.offer.interest_rate_annual = Some(terms.interest_rate_annual);
            app.offer.repayment_date = Some(terms.repayment_date);

            app.consent.accepted = true;
            app.consent.accepted_at = Some(Utc::now());
            app.consent.language = Some("en+hi".to_string());
        }

        if reached(Stage::VideoKyc) {
            app.video_kyc.status = VideoKycStatus::Completed;
            app.video_kyc.completed_at = Some(Utc::now());
        }

        if reached(Stage::Repayment) {
            app.disbursement.status = DisbursementStatus::Done;
            app.disbursement.amount = app.offer.amount;
            app.disbursement.reference_id = Some(rules::disbursement_reference());
            app.disbursement.disbursed_at = Some(Utc::now());
            app.repayment.status = RepaymentStatus::Due;
            app.repayment.due_date = app.offer.repayment_date;
        }

        if reached(Stage::Closed) {
            app.repayment.status = RepaymentStatus::Paid;
            app.repayment.paid_date = Some(Utc::now());
            app.repayment.late_fee = Some(Money::zero(Currency::INR));
        }

        app.advance_to(self.stage);
        app
    }
}

fn stage_order(stage: Stage) -> u8 {
    match stage {
        Stage::Apply => 0,
        Stage::Kyc => 1,
        Stage::IncomeCheck => 2,
        Stage::RiskScoring => 3,
        Stage::Offer => 4,
        Stage::Consent => 5,
        Stage::VideoKyc => 6,
        Stage::Disbursement => 7,
        Stage::Repayment => 8,
        Stage::Closed => 9,
        Stage::Rejected => 10,
    }
}

/// Builder for employee records
pub struct EmployeeBuilder {
    new: NewEmployee,
}

impl Default for EmployeeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EmployeeBuilder {
    pub fn new() -> Self {
        Self {
            new: NewEmployee {
                name: "Ravi Kumar".to_string(),
                department: "Operations".to_string(),
                post: "Analyst".to_string(),
                email: Some("ravi.kumar@example.com".to_string()),
                salary: Some(Money::new(dec!(42000.00), Currency::INR)),
                joining_date: Some(
                    (Utc::now() - Duration::days(365)).format("%Y-%m-%d").to_string(),
                ),
                ..NewEmployee::default()
            },
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.new.name = name.into();
        self
    }

    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.new.department = department.into();
        self
    }

    pub fn with_status(mut self, status: EmployeeStatus) -> Self {
        self.new.status = Some(status);
        self
    }

    pub fn build(self) -> NewEmployee {
        self.new
    }
}
