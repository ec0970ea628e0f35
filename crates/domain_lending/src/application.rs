//! Application aggregate
//!
//! One `Application` exists per lending attempt. Each sub-record is written
//! by exactly one stage transition and read-only afterwards; the timeline is
//! append-only and receives exactly one event per successful transition.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use core_kernel::{ApplicationId, CustomerId, Money};

/// Current persistence schema version. Loaders translate older documents
/// into this shape instead of silently dropping unknown fields.
pub const SCHEMA_VERSION: u32 = 1;

/// A stage in the fixed application lifecycle
///
/// `current_stage` is advisory: transitions gate on their own sub-record
/// preconditions rather than on stage membership, so out-of-order calls that
/// satisfy their preconditions are accepted. The pointer itself only ever
/// moves forward through the fixed order (or to the terminal `Rejected`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Apply,
    Kyc,
    IncomeCheck,
    RiskScoring,
    Offer,
    Consent,
    VideoKyc,
    Disbursement,
    Repayment,
    Closed,
    /// Terminal branch reachable from any non-terminal stage (reserved,
    /// unused by current transitions)
    Rejected,
}

impl Stage {
    /// Position in the forward order; `None` for the terminal reject branch
    fn order(&self) -> Option<u8> {
        match self {
            Stage::Apply => Some(0),
            Stage::Kyc => Some(1),
            Stage::IncomeCheck => Some(2),
            Stage::RiskScoring => Some(3),
            Stage::Offer => Some(4),
            Stage::Consent => Some(5),
            Stage::VideoKyc => Some(6),
            Stage::Disbursement => Some(7),
            Stage::Repayment => Some(8),
            Stage::Closed => Some(9),
            Stage::Rejected => None,
        }
    }

    /// Returns true for stages with no outgoing transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, Stage::Closed | Stage::Rejected)
    }
}

/// Risk categories derived from the simulated bureau score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskCategory {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            RiskCategory::Low => "LOW",
            RiskCategory::Medium => "MEDIUM",
            RiskCategory::High => "HIGH",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoKycStatus {
    Pending,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisbursementStatus {
    Pending,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepaymentStatus {
    Pending,
    Due,
    Paid,
    Overdue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionStatus {
    None,
    SoftReminder,
    Calling,
    Escalated,
    Settled,
}

/// One entry in the append-only audit timeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub step: String,
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub meta: Value,
}

/// KYC details, written once by the KYC transition
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KycInfo {
    pub pan: Option<String>,
    pub pan_verified: bool,
    pub aadhaar: Option<String>,
    pub aadhaar_verified: bool,
    pub selfie_captured: bool,
    pub face_match_score: Option<Decimal>,
    pub face_match_passed: bool,
}

/// Income details, written once by the income transition
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IncomeInfo {
    pub employer_name: Option<String>,
    pub avg_net_salary: Option<Money>,
    pub salary_credit_dates: Vec<String>,
    pub stability_score: Option<Decimal>,
}

/// Risk profile, written once by the risk transition
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RiskInfo {
    pub bureau_score: Option<i32>,
    pub risk_category: Option<RiskCategory>,
}

/// Offer terms, written once by the offer transition
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OfferInfo {
    pub amount: Option<Money>,
    pub processing_fee: Option<Money>,
    pub interest_rate_annual: Option<Decimal>,
    pub repayment_date: Option<DateTime<Utc>>,
}

/// Consent record, written once by the consent transition
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConsentInfo {
    pub accepted: bool,
    pub accepted_at: Option<DateTime<Utc>>,
    pub language: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoKycInfo {
    pub status: VideoKycStatus,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Default for VideoKycInfo {
    fn default() -> Self {
        Self {
            status: VideoKycStatus::Pending,
            completed_at: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisbursementInfo {
    pub status: DisbursementStatus,
    pub amount: Option<Money>,
    pub reference_id: Option<String>,
    pub disbursed_at: Option<DateTime<Utc>>,
}

impl Default for DisbursementInfo {
    fn default() -> Self {
        Self {
            status: DisbursementStatus::Pending,
            amount: None,
            reference_id: None,
            disbursed_at: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepaymentInfo {
    pub status: RepaymentStatus,
    pub due_date: Option<DateTime<Utc>>,
    pub paid_date: Option<DateTime<Utc>>,
    pub late_fee: Option<Money>,
}

impl Default for RepaymentInfo {
    fn default() -> Self {
        Self {
            status: RepaymentStatus::Pending,
            due_date: None,
            paid_date: None,
            late_fee: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionInfo {
    pub status: CollectionStatus,
    pub notes: Vec<String>,
}

impl Default for CollectionInfo {
    fn default() -> Self {
        Self {
            status: CollectionStatus::None,
            notes: Vec::new(),
        }
    }
}

/// The salary advance application aggregate root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    /// Unique identifier, assigned at creation, immutable
    pub id: ApplicationId,
    /// Identifier of the applying customer; immutable after creation
    pub customer_id: CustomerId,
    pub applicant_name: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Persistence schema version for forward migration
    pub schema_version: u32,
    /// Advisory pointer to the furthest stage reached
    pub current_stage: Stage,

    pub kyc: KycInfo,
    pub income: IncomeInfo,
    pub risk: RiskInfo,
    pub offer: OfferInfo,
    pub consent: ConsentInfo,
    pub video_kyc: VideoKycInfo,
    pub disbursement: DisbursementInfo,
    pub repayment: RepaymentInfo,
    pub collection: CollectionInfo,

    /// Append-only audit log; one entry per successful transition
    pub timeline: Vec<TimelineEvent>,
}

impl Application {
    /// Creates a new application with defaulted sub-records at stage `Apply`
    pub fn new(customer_id: CustomerId, applicant_name: Option<String>) -> Self {
        Self {
            id: ApplicationId::new_v7(),
            customer_id,
            applicant_name,
            created_at: Utc::now(),
            schema_version: SCHEMA_VERSION,
            current_stage: Stage::Apply,
            kyc: KycInfo::default(),
            income: IncomeInfo::default(),
            risk: RiskInfo::default(),
            offer: OfferInfo::default(),
            consent: ConsentInfo::default(),
            video_kyc: VideoKycInfo::default(),
            disbursement: DisbursementInfo::default(),
            repayment: RepaymentInfo::default(),
            collection: CollectionInfo::default(),
            timeline: Vec::new(),
        }
    }

    /// Appends one audit event; the timeline is never reordered or edited
    pub fn record_event(&mut self, step: &str, status: &str, meta: Value) {
        self.timeline.push(TimelineEvent {
            step: step.to_string(),
            status: status.to_string(),
            timestamp: Utc::now(),
            meta,
        });
    }

    /// Moves the advisory stage pointer forward
    ///
    /// The pointer never moves backwards: if a transition is invoked after a
    /// later stage was already reached (out-of-documented-order calls are
    /// permitted), the pointer keeps the furthest stage. `Rejected` is
    /// always reachable from a non-terminal stage.
    pub fn advance_to(&mut self, target: Stage) {
        if target == Stage::Rejected {
            if !self.current_stage.is_terminal() {
                self.current_stage = Stage::Rejected;
            }
            return;
        }
        match (self.current_stage.order(), target.order()) {
            (Some(current), Some(next)) if next > current => {
                self.current_stage = target;
            }
            _ => {}
        }
    }
}
