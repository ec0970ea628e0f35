//! Pre-built test fixtures
//!
//! Predictable values for common inputs so tests only spell out what they
//! actually care about.

use core_kernel::{Currency, CustomerId, Money};
use rust_decimal_macros::dec;
use uuid::Uuid;

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// Salary that lands in the top bureau tier
    pub fn high_salary() -> Money {
        Money::new(dec!(60000.00), Currency::INR)
    }

    /// A typical late fee
    pub fn late_fee() -> Money {
        Money::new(dec!(250.00), Currency::INR)
    }
}

/// Fixture for identifier test data
pub struct IdFixtures;

impl IdFixtures {
    /// A fixed, recognizable customer id for single-customer scenarios
    pub fn demo_customer() -> CustomerId {
        CustomerId::from_uuid(Uuid::from_u128(1))
    }

    pub fn customer() -> CustomerId {
        CustomerId::new_v7()
    }
}

/// Fixture for string-typed inputs
pub struct StringFixtures;

impl StringFixtures {
    pub fn pan() -> &'static str {
        "ABCDE1234F"
    }

    pub fn aadhaar() -> &'static str {
        "123456789012"
    }

    pub fn employer() -> &'static str {
        "Acme Industries Pvt Ltd"
    }

    /// Month-start credit dates, one per requested month
    pub fn credit_dates(months: usize) -> Vec<String> {
        (0..months)
            .map(|i| format!("2025-{:02}-01", (i % 12) + 1))
            .collect()
    }
}
