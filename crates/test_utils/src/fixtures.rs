//! Pre-built Test Fixtures
//!
//! Provides ready-to-use coverages and amounts. The numbers are the ones
//! used throughout the quote test suite so scenarios stay recognizable.

use core_kernel::Money;
use domain_quote::Coverage;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Shorthand for a money amount
pub fn eur(amount: Decimal) -> Money {
    Money::new(amount)
}

/// Fixture for coverage test data
pub struct CoverageFixtures;

impl CoverageFixtures {
    /// Undiscounted coverage with the given premium
    pub fn priced(premium: Decimal) -> Coverage {
        Coverage::new(Money::new(premium))
    }

    /// Coverage with the given premium and discount
    pub fn discounted(premium: Decimal, discount: i32) -> Coverage {
        Coverage::new(Money::new(premium)).with_discount(discount)
    }

    /// Mandatory coverage of 100€, the more expensive one in most scenarios
    pub fn mandatory_100() -> Coverage {
        Self::priced(dec!(100))
    }

    /// Optional coverage of 50€
    pub fn optional_50() -> Coverage {
        Self::priced(dec!(50))
    }

    /// Coverage of 75€, used for equal-premium scenarios
    pub fn even_75() -> Coverage {
        Self::priced(dec!(75))
    }

    /// Coverage with a negative premium and a negative discount
    pub fn implausible() -> Coverage {
        Self::discounted(dec!(-100), -10)
    }
}

/// Fixture for the demo scenario (500€ liability, 300€ comprehensive)
pub struct DemoFixtures;

impl DemoFixtures {
    pub fn liability() -> Coverage {
        CoverageFixtures::priced(dec!(500))
    }

    pub fn comprehensive() -> Coverage {
        CoverageFixtures::priced(dec!(300))
    }

    pub fn target() -> Money {
        eur(dec!(600))
    }
}
