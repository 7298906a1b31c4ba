//! Coverage value objects
//!
//! A motor quote consists of the mandatory third-party liability coverage
//! ("Haftpflicht") and an optional comprehensive coverage ("Kasko"). Both
//! behave identically; they differ only in identity, which `CoverageKind`
//! carries for messages and output.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

use core_kernel::{Money, Rate};

/// Highest discount a coverage may carry, in percent
///
/// A 100% discount would zero the premium and is never allowed.
pub const MAX_DISCOUNT: i32 = 99;

/// The two coverage slots of a quote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoverageKind {
    /// Third-party liability, required on every quote
    Mandatory,
    /// Comprehensive cover, may be absent
    Optional,
}

impl CoverageKind {
    /// Returns the label used in plausibility messages
    pub fn label(&self) -> &'static str {
        match self {
            CoverageKind::Mandatory => "Haftpflicht",
            CoverageKind::Optional => "Kasko",
        }
    }
}

impl fmt::Display for CoverageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single priced coverage with its percentage discount
///
/// The discount is kept as a signed integer so that out-of-range input
/// survives construction and is reported by validation instead of being
/// silently clamped. Its range is declared here and checked by
/// `validation::coverage_constraints`; the premium is a `Decimal` amount
/// and is checked there directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Coverage {
    premium: Money,
    #[validate(range(min = 0, max = 99))]
    discount: i32,
}

impl Coverage {
    /// Creates an undiscounted coverage
    ///
    /// # Arguments
    ///
    /// * `premium` - Base premium before any discount; `Money` keeps 4
    ///   decimal places, so finer amounts are rounded on construction
    pub fn new(premium: Money) -> Self {
        Self { premium, discount: 0 }
    }

    /// Sets an explicit discount in percent
    pub fn with_discount(mut self, discount: i32) -> Self {
        self.discount = discount;
        self
    }

    /// Returns the base premium
    pub fn premium(&self) -> Money {
        self.premium
    }

    /// Returns the discount in percent
    pub fn discount(&self) -> i32 {
        self.discount
    }

    pub(crate) fn set_discount(&mut self, discount: i32) {
        self.discount = discount;
    }

    /// Premium after the discount: `premium * (100 - discount) / 100`
    pub fn discounted_premium(&self) -> Money {
        Rate::from_percentage(dec!(100) - Decimal::from(self.discount)).apply(&self.premium)
    }

    /// Amount taken off the premium by the discount
    pub fn discount_amount(&self) -> Money {
        self.premium - self.discounted_premium()
    }
}
