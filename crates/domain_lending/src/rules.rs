//! Business rule engine
//!
//! Pure, deterministic functions over already-validated input. No I/O; the
//! bureau pull and face match of a production deployment are simulated here
//! behind the same contracts, so real integrations can be substituted later
//! without touching the transition controller.
//!
//! Monetary results are rounded half-to-even to two decimal places.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use core_kernel::{Currency, Money, Rate};

use crate::application::{CollectionStatus, RepaymentStatus, RiskCategory};

/// Processing fee charged on the offered amount
pub const PROCESSING_FEE_RATE: Rate = Rate::new(dec!(0.02));

/// Fixed annual interest rate
pub const ANNUAL_INTEREST_RATE: Rate = Rate::new(dec!(0.24));

/// Repayment falls due this many days after offer generation
/// (approximately the next salary date)
pub const REPAYMENT_TERM_DAYS: i64 = 30;

/// Stability score from the count of reported salary credit dates
///
/// `min(10 * count, 100)`: monotonic non-decreasing in the count, saturating
/// at 100 once ten or more dates are supplied.
pub fn stability_score(credit_dates: &[String]) -> Decimal {
    let months = credit_dates.len().min(10) as i64;
    Decimal::from(months * 10)
}

/// Simulated bureau score, tiered on average net salary only
///
/// The stability score is deliberately not an input; the tiers stand in for
/// an external bureau pull.
pub fn bureau_score(avg_salary: Decimal) -> i32 {
    if avg_salary >= dec!(50000) {
        780
    } else if avg_salary >= dec!(30000) {
        730
    } else {
        680
    }
}

/// Risk category from a bureau score
pub fn risk_category(bureau_score: i32) -> RiskCategory {
    if bureau_score >= 750 {
        RiskCategory::Low
    } else if bureau_score >= 700 {
        RiskCategory::Medium
    } else {
        RiskCategory::High
    }
}

/// Fraction of average salary offered per risk category
fn offer_multiplier(category: RiskCategory) -> Decimal {
    match category {
        RiskCategory::Low => dec!(0.6),
        RiskCategory::Medium => dec!(0.4),
        RiskCategory::High => dec!(0.25),
    }
}

/// A computed salary advance offer
#[derive(Debug, Clone, PartialEq)]
pub struct OfferTerms {
    pub amount: Money,
    pub processing_fee: Money,
    pub interest_rate_annual: Decimal,
    pub repayment_date: DateTime<Utc>,
}

/// Sizes an offer from average salary and risk category
pub fn offer_terms(
    avg_salary: Money,
    category: RiskCategory,
    now: DateTime<Utc>,
) -> OfferTerms {
    let amount = avg_salary
        .multiply(offer_multiplier(category))
        .round_bankers(2);
    let processing_fee = PROCESSING_FEE_RATE.apply(&amount).round_bankers(2);

    OfferTerms {
        amount,
        processing_fee,
        interest_rate_annual: ANNUAL_INTEREST_RATE.as_percentage(),
        repayment_date: now + Duration::days(REPAYMENT_TERM_DAYS),
    }
}

/// Generates a fresh, human-legible disbursement reference
///
/// Format `NEFT-` followed by 10 uppercase hex characters. Uniqueness is a
/// best-effort property of the UUID generator, not database-enforced.
pub fn disbursement_reference() -> String {
    let hex = Uuid::new_v4().simple().to_string().to_uppercase();
    format!("NEFT-{}", &hex[..10])
}

/// Outcome of settling a repayment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepaymentSettlement {
    pub repayment_status: RepaymentStatus,
    pub collection_status: CollectionStatus,
}

/// Settles a repayment: the advance is paid, and the collection record is
/// marked settled only when a late fee was actually charged
pub fn settle_repayment(late_fee: &Money) -> RepaymentSettlement {
    RepaymentSettlement {
        repayment_status: RepaymentStatus::Paid,
        collection_status: if late_fee.is_positive() {
            CollectionStatus::Settled
        } else {
            CollectionStatus::None
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dates(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("2025-{:02}-01", (i % 12) + 1)).collect()
    }

    #[test]
    fn test_stability_score_formula() {
        assert_eq!(stability_score(&dates(0)), dec!(0));
        assert_eq!(stability_score(&dates(4)), dec!(40));
        assert_eq!(stability_score(&dates(10)), dec!(100));
        assert_eq!(stability_score(&dates(12)), dec!(100));
    }

    #[test]
    fn test_bureau_score_tier_boundaries() {
        assert_eq!(bureau_score(dec!(49999)), 730);
        assert_eq!(bureau_score(dec!(50000)), 780);
        assert_eq!(bureau_score(dec!(30000)), 730);
        assert_eq!(bureau_score(dec!(29999.99)), 680);
    }

    #[test]
    fn test_risk_category_mapping() {
        assert_eq!(risk_category(780), RiskCategory::Low);
        assert_eq!(risk_category(750), RiskCategory::Low);
        assert_eq!(risk_category(749), RiskCategory::Medium);
        assert_eq!(risk_category(730), RiskCategory::Medium);
        assert_eq!(risk_category(700), RiskCategory::Medium);
        assert_eq!(risk_category(699), RiskCategory::High);
        assert_eq!(risk_category(680), RiskCategory::High);
    }

    #[test]
    fn test_rate_constants() {
        assert_eq!(PROCESSING_FEE_RATE.as_percentage(), dec!(2));
        assert_eq!(ANNUAL_INTEREST_RATE.as_percentage(), dec!(24));
    }

    #[test]
    fn test_offer_terms_low_risk() {
        let now = Utc::now();
        let terms = offer_terms(
            Money::new(dec!(50000), Currency::INR),
            RiskCategory::Low,
            now,
        );

        assert_eq!(terms.amount.amount(), dec!(30000.00));
        assert_eq!(terms.processing_fee.amount(), dec!(600.00));
        assert_eq!(terms.interest_rate_annual, dec!(24.0));
        assert_eq!(terms.repayment_date, now + Duration::days(30));
    }

    #[test]
    fn test_offer_terms_multipliers() {
        let now = Utc::now();
        let salary = Money::new(dec!(40000), Currency::INR);

        let medium = offer_terms(salary, RiskCategory::Medium, now);
        assert_eq!(medium.amount.amount(), dec!(16000.00));

        let high = offer_terms(salary, RiskCategory::High, now);
        assert_eq!(high.amount.amount(), dec!(10000.00));
    }

    #[test]
    fn test_offer_fee_rounds_half_even() {
        let now = Utc::now();
        // 31687.50 * 0.02 = 633.75 exactly; 30312.50 * 0.02 = 606.25
        let terms = offer_terms(
            Money::new(dec!(52812.50), Currency::INR),
            RiskCategory::Low,
            now,
        );
        assert_eq!(terms.amount.amount(), dec!(31687.50));
        assert_eq!(terms.processing_fee.amount(), dec!(633.75));
    }

    #[test]
    fn test_disbursement_reference_format() {
        let reference = disbursement_reference();
        assert!(reference.starts_with("NEFT-"));

        let suffix = &reference["NEFT-".len()..];
        assert_eq!(suffix.len(), 10);
        assert!(suffix
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }

    #[test]
    fn test_disbursement_references_distinct() {
        let a = disbursement_reference();
        let b = disbursement_reference();
        assert_ne!(a, b);
    }

    #[test]
    fn test_settle_repayment_without_late_fee() {
        let outcome = settle_repayment(&Money::zero(Currency::INR));
        assert_eq!(outcome.repayment_status, RepaymentStatus::Paid);
        assert_eq!(outcome.collection_status, CollectionStatus::None);
    }

    #[test]
    fn test_settle_repayment_with_late_fee() {
        let outcome = settle_repayment(&Money::new(dec!(250), Currency::INR));
        assert_eq!(outcome.repayment_status, RepaymentStatus::Paid);
        assert_eq!(outcome.collection_status, CollectionStatus::Settled);
    }
}
