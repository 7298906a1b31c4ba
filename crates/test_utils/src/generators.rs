//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating quote inputs that respect
//! the domain constraints.

use core_kernel::Money;
use domain_quote::Coverage;
use proptest::prelude::*;

/// Premiums and a target price below their gross total but still reachable
#[derive(Debug, Clone)]
pub struct TargetScenario {
    pub mandatory: Money,
    pub optional: Option<Money>,
    pub target: Money,
}

impl TargetScenario {
    pub fn gross(&self) -> Money {
        self.mandatory + self.optional.unwrap_or_default()
    }

    pub fn coverages(&self) -> (Coverage, Option<Coverage>) {
        (Coverage::new(self.mandatory), self.optional.map(Coverage::new))
    }
}

/// Strategy for premiums between 1€ and 10,000€, in cents
pub fn premium_minor_strategy() -> impl Strategy<Value = i64> {
    100i64..1_000_000i64
}

/// Strategy for valid positive premiums
pub fn premium_strategy() -> impl Strategy<Value = Money> {
    premium_minor_strategy().prop_map(Money::from_minor)
}

/// Strategy for valid discounts
pub fn discount_strategy() -> impl Strategy<Value = i32> {
    0i32..=99i32
}

/// Strategy for plausible coverages
pub fn coverage_strategy() -> impl Strategy<Value = Coverage> {
    (premium_strategy(), discount_strategy())
        .prop_map(|(premium, discount)| Coverage::new(premium).with_discount(discount))
}

/// Strategy for reachable targets strictly below the gross total
pub fn target_scenario_strategy() -> impl Strategy<Value = TargetScenario> {
    (premium_minor_strategy(), proptest::option::of(premium_minor_strategy())).prop_flat_map(
        |(mandatory, optional)| {
            let gross = mandatory + optional.unwrap_or(0);
            let minimum = (gross + 99) / 100;
            (minimum..gross).prop_map(move |target| TargetScenario {
                mandatory: Money::from_minor(mandatory),
                optional: optional.map(Money::from_minor),
                target: Money::from_minor(target),
            })
        },
    )
}

/// Strategy for targets at or above the gross total
pub fn generous_target_scenario_strategy() -> impl Strategy<Value = TargetScenario> {
    (
        premium_minor_strategy(),
        proptest::option::of(premium_minor_strategy()),
        0i64..100_000i64,
    )
        .prop_map(|(mandatory, optional, surplus)| {
            let gross = mandatory + optional.unwrap_or(0);
            TargetScenario {
                mandatory: Money::from_minor(mandatory),
                optional: optional.map(Money::from_minor),
                target: Money::from_minor(gross + surplus),
            }
        })
}
