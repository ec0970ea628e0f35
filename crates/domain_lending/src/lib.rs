//! Lending domain - the salary advance application lifecycle
//!
//! This crate owns the only real logic in the system:
//!
//! - The `Application` aggregate with its write-once sub-records and
//!   append-only audit timeline
//! - The pure business rule engine (stability scoring, bureau simulation,
//!   risk categorization, offer sizing, repayment settlement)
//! - The `AdvanceService` stage transition controller, which validates
//!   preconditions, applies the rules, appends exactly one timeline event,
//!   and persists the full entity through the `ApplicationStore` port

pub mod application;
pub mod rules;
pub mod service;
pub mod ports;
pub mod error;

pub use application::{
    Application, Stage, TimelineEvent, KycInfo, IncomeInfo, RiskInfo, OfferInfo,
    ConsentInfo, VideoKycInfo, DisbursementInfo, RepaymentInfo, CollectionInfo,
    RiskCategory, VideoKycStatus, DisbursementStatus, RepaymentStatus, CollectionStatus,
};
pub use rules::OfferTerms;
pub use service::AdvanceService;
pub use ports::{ApplicationStore, InMemoryApplicationStore};
pub use error::LendingError;
