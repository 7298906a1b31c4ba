//! Custom Test Assertions
//!
//! Provides assertion helpers for quote types that give more meaningful
//! failure messages than standard assertions.

use core_kernel::Money;
use domain_quote::{Coverage, Quote, QuoteError, MAX_DISCOUNT};
use rust_decimal::Decimal;

/// Asserts that two Money values are approximately equal within a tolerance
///
/// # Panics
///
/// Panics if the amounts differ by more than tolerance
pub fn assert_money_approx_eq(actual: &Money, expected: &Money, tolerance: Decimal) {
    let diff = (actual.amount() - expected.amount()).abs();
    assert!(
        diff <= tolerance,
        "Money amounts differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual.amount(),
        expected.amount(),
        diff,
        tolerance
    );
}

/// Asserts that a coverage discount lies within 0..=99
pub fn assert_discount_in_bounds(coverage: &Coverage) {
    assert!(
        (0..=MAX_DISCOUNT).contains(&coverage.discount()),
        "Discount out of bounds: {}%",
        coverage.discount()
    );
}

/// Asserts that the net total of a quote is close to its target price
pub fn assert_net_near_target(quote: &Quote, tolerance: Decimal) {
    let target = quote
        .target_price()
        .expect("quote was built without a target price");
    assert_money_approx_eq(&quote.net_total(), &target, tolerance);
}

/// Asserts that an error carries exactly the given messages, in order
pub fn assert_messages(error: &QuoteError, expected: &[&str]) {
    let actual = error.messages();
    assert_eq!(
        actual, expected,
        "Unexpected plausibility messages:\n{}",
        error.report()
    );
}

/// Asserts that an error mentions `needle` in at least one message
pub fn assert_mentions(error: &QuoteError, needle: &str) {
    assert!(
        error.report().mentions(needle),
        "Expected a message containing {:?}, got:\n{}",
        needle,
        error.report()
    );
}
