//! Tests for the target-price discount allocation
//!
//! Scenarios follow the premium pairs used throughout the quote suite:
//! the more expensive coverage must carry the discount first.

use rust_decimal_macros::dec;

use domain_quote::{
    AllocationOutcome, AllocatorSettings, Coverage, DiscountAllocator, Quote, QuoteError,
};
use test_utils::{
    assert_discount_in_bounds, assert_mentions, assert_money_approx_eq, assert_net_near_target,
    eur, CoverageFixtures, DemoFixtures,
};

fn quote_with_target(target: rust_decimal::Decimal, mandatory: Coverage, optional: Option<Coverage>) -> Quote {
    Quote::with_target(eur(target), mandatory, optional).expect("target should be reachable")
}

// ============================================================================
// Priority Tests
// ============================================================================

mod priority {
    use super::*;

    #[test]
    fn test_mandatory_more_expensive_takes_discount() {
        let quote = quote_with_target(
            dec!(120),
            CoverageFixtures::mandatory_100(),
            Some(CoverageFixtures::optional_50()),
        );

        assert_eq!(quote.gross_total(), eur(dec!(150)));
        assert_net_near_target(&quote, dec!(0.5));
        assert!((20..=35).contains(&quote.mandatory_coverage().discount()));
        assert!(quote.optional_coverage().unwrap().discount() < 10);
    }

    #[test]
    fn test_optional_more_expensive_takes_discount() {
        let quote = quote_with_target(
            dec!(120),
            CoverageFixtures::priced(dec!(50)),
            Some(CoverageFixtures::priced(dec!(100))),
        );

        assert_net_near_target(&quote, dec!(0.5));
        assert_eq!(quote.optional_coverage().unwrap().discount(), 30);
        assert_eq!(quote.mandatory_coverage().discount(), 0);
    }

    #[test]
    fn test_equal_premiums_prefer_mandatory() {
        let quote = quote_with_target(
            dec!(120),
            CoverageFixtures::even_75(),
            Some(CoverageFixtures::even_75()),
        );

        assert_eq!(quote.gross_total(), eur(dec!(150)));
        assert_net_near_target(&quote, dec!(0.5));
        assert_eq!(quote.mandatory_coverage().discount(), 40);
        assert_eq!(quote.optional_coverage().unwrap().discount(), 0);
    }

    #[test]
    fn test_total_percentage_points_stay_low() {
        let quote = quote_with_target(
            dec!(110),
            CoverageFixtures::mandatory_100(),
            Some(CoverageFixtures::priced(dec!(20))),
        );

        let mandatory = quote.mandatory_coverage().discount();
        let optional = quote.optional_coverage().unwrap().discount();
        assert!(mandatory > 0);
        assert!(optional <= 5);
        assert!(mandatory + optional < 20);
    }

    #[test]
    fn test_total_percentage_points_stay_low_optional_expensive() {
        let quote = quote_with_target(
            dec!(110),
            CoverageFixtures::priced(dec!(20)),
            Some(CoverageFixtures::mandatory_100()),
        );

        let mandatory = quote.mandatory_coverage().discount();
        let optional = quote.optional_coverage().unwrap().discount();
        assert!(optional > 0);
        assert!(mandatory <= 5);
        assert!(mandatory + optional < 20);
    }
}

// ============================================================================
// Spill-over Tests
// ============================================================================

mod spill_over {
    use super::*;

    #[test]
    fn test_large_discount_mandatory_expensive() {
        let quote = quote_with_target(
            dec!(60),
            CoverageFixtures::mandatory_100(),
            Some(CoverageFixtures::optional_50()),
        );

        assert_net_near_target(&quote, dec!(1.0));
        assert!(quote.mandatory_coverage().discount() > 70);
    }

    #[test]
    fn test_large_discount_optional_expensive() {
        let quote = quote_with_target(
            dec!(60),
            CoverageFixtures::priced(dec!(50)),
            Some(CoverageFixtures::priced(dec!(100))),
        );

        assert_net_near_target(&quote, dec!(1.0));
        assert!(quote.optional_coverage().unwrap().discount() > 80);
    }

    #[test]
    fn test_saturation_near_minimum() {
        let quote = quote_with_target(
            dec!(2.0),
            CoverageFixtures::mandatory_100(),
            Some(CoverageFixtures::optional_50()),
        );

        assert_net_near_target(&quote, dec!(0.5));
        assert!(quote.mandatory_coverage().discount() >= 98);
        assert!(quote.optional_coverage().unwrap().discount() >= 98);
    }

    #[test]
    fn test_exact_minimum_is_reachable() {
        let quote = quote_with_target(
            dec!(1.5),
            CoverageFixtures::mandatory_100(),
            Some(CoverageFixtures::optional_50()),
        );

        assert_eq!(quote.mandatory_coverage().discount(), 99);
        assert_eq!(quote.optional_coverage().unwrap().discount(), 99);
        assert_eq!(quote.net_total(), eur(dec!(1.5)));
    }
}

// ============================================================================
// Early Exit Tests
// ============================================================================

mod early_exit {
    use super::*;

    #[test]
    fn test_target_equal_to_gross() {
        let quote = quote_with_target(
            dec!(150),
            CoverageFixtures::mandatory_100(),
            Some(CoverageFixtures::optional_50()),
        );

        assert_eq!(quote.net_total(), eur(dec!(150)));
        assert_eq!(quote.mandatory_coverage().discount(), 0);
        assert_eq!(quote.optional_coverage().unwrap().discount(), 0);
        assert_eq!(quote.allocation(), AllocationOutcome::Untouched);
    }

    #[test]
    fn test_target_above_gross() {
        let quote = quote_with_target(
            dec!(200),
            CoverageFixtures::mandatory_100(),
            Some(CoverageFixtures::optional_50()),
        );

        assert_eq!(quote.net_total(), quote.gross_total());
        assert_eq!(quote.mandatory_coverage().discount(), 0);
        assert_eq!(quote.optional_coverage().unwrap().discount(), 0);
    }

    #[test]
    fn test_explicit_discounts_survive_generous_target() {
        let quote = quote_with_target(
            dec!(200),
            CoverageFixtures::discounted(dec!(100), 20),
            Some(CoverageFixtures::discounted(dec!(50), 10)),
        );

        assert_eq!(quote.mandatory_coverage().discount(), 20);
        assert_eq!(quote.net_total(), eur(dec!(125)));
    }
}

// ============================================================================
// Mandatory Only Tests
// ============================================================================

mod mandatory_only {
    use super::*;

    #[test]
    fn test_target_without_optional() {
        let quote = quote_with_target(dec!(80), CoverageFixtures::mandatory_100(), None);

        assert_eq!(quote.gross_total(), eur(dec!(100)));
        assert_net_near_target(&quote, dec!(0.5));
        assert!((15..=25).contains(&quote.mandatory_coverage().discount()));
    }

    #[test]
    fn test_rounding_oscillation_ends_best_effort() {
        let quote = quote_with_target(dec!(80.5), CoverageFixtures::mandatory_100(), None);

        assert_eq!(quote.mandatory_coverage().discount(), 20);
        assert_eq!(quote.net_total(), eur(dec!(80)));
        assert_eq!(quote.allocation(), AllocationOutcome::BestEffort { iterations: 100 });
    }
}

// ============================================================================
// Demo Scenario
// ============================================================================

mod demo {
    use super::*;

    #[test]
    fn test_demo_target_converges_immediately() {
        let quote = Quote::with_target(
            DemoFixtures::target(),
            DemoFixtures::liability(),
            Some(DemoFixtures::comprehensive()),
        )
        .unwrap();

        assert_eq!(quote.mandatory_coverage().discount(), 40);
        assert_eq!(quote.optional_coverage().unwrap().discount(), 0);
        assert_eq!(quote.net_total(), eur(dec!(600)));
        assert_eq!(quote.allocation(), AllocationOutcome::Converged { iterations: 0 });
    }
}

// ============================================================================
// Unreachable Target Tests
// ============================================================================

mod unreachable {
    use super::*;

    #[test]
    fn test_target_below_minimum() {
        let error = Quote::with_target(
            eur(dec!(1.0)),
            CoverageFixtures::mandatory_100(),
            Some(CoverageFixtures::optional_50()),
        )
        .unwrap_err();

        assert_mentions(&error, "nicht erreichbar");
        assert_mentions(&error, "Minimaler Beitrag");
        assert_eq!(
            error,
            QuoteError::UnreachableTarget {
                target: eur(dec!(1.0)),
                minimum: eur(dec!(1.5)),
            }
        );
    }

    #[test]
    fn test_message_formats_two_decimals() {
        let error = Quote::with_target(eur(dec!(0.5)), CoverageFixtures::mandatory_100(), None)
            .unwrap_err();

        assert!(error.to_string().contains("Zielbeitrag von 0.50€"));
        assert!(error.to_string().contains("(99%): 1.00€"));
    }

    #[test]
    fn test_allocator_leaves_coverages_untouched_on_error() {
        let mut mandatory = CoverageFixtures::discounted(dec!(100), 5);
        let mut optional = CoverageFixtures::discounted(dec!(50), 7);

        let result = DiscountAllocator::default().allocate(eur(dec!(0.5)), &mut mandatory, Some(&mut optional));

        assert!(result.is_err());
        assert_eq!(mandatory.discount(), 5);
        assert_eq!(optional.discount(), 7);
    }
}

// ============================================================================
// Allocator API Tests
// ============================================================================

mod allocator {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = AllocatorSettings::default();

        assert_eq!(settings.tolerance, dec!(0.01));
        assert_eq!(settings.max_iterations, 100);
    }

    #[test]
    fn test_zero_iterations_keeps_initial_guess() {
        let mut mandatory = CoverageFixtures::mandatory_100();
        let allocator = DiscountAllocator::new(AllocatorSettings {
            tolerance: dec!(0.01),
            max_iterations: 0,
        });

        let outcome = allocator.allocate(eur(dec!(80.5)), &mut mandatory, None).unwrap();

        assert_eq!(mandatory.discount(), 20);
        assert_eq!(outcome, AllocationOutcome::BestEffort { iterations: 0 });
    }

    #[test]
    fn test_wide_tolerance_accepts_initial_guess() {
        let mut mandatory = CoverageFixtures::mandatory_100();
        let allocator = DiscountAllocator::new(AllocatorSettings {
            tolerance: dec!(1),
            max_iterations: 100,
        });

        let outcome = allocator.allocate(eur(dec!(80.5)), &mut mandatory, None).unwrap();

        assert_eq!(outcome, AllocationOutcome::Converged { iterations: 0 });
        assert!(outcome.is_allocated());
    }

    #[test]
    fn test_allocation_on_zero_premium_leaves_it_to_validation() {
        let mut mandatory = CoverageFixtures::priced(dec!(0));
        let mut optional = CoverageFixtures::optional_50();

        let outcome = DiscountAllocator::default()
            .allocate(eur(dec!(20)), &mut mandatory, Some(&mut optional))
            .unwrap();

        assert_eq!(optional.discount(), 60);
        assert_eq!(mandatory.discount(), 0);
        assert_eq!(outcome, AllocationOutcome::Converged { iterations: 0 });
    }
}

// ============================================================================
// Property Tests
// ============================================================================

mod properties {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal::Decimal;
    use test_utils::{generous_target_scenario_strategy, target_scenario_strategy};

    proptest! {
        #[test]
        fn reachable_targets_are_met_within_one_step(scenario in target_scenario_strategy()) {
            let (mandatory, optional) = scenario.coverages();
            let quote = Quote::with_target(scenario.target, mandatory, optional).unwrap();

            // One percentage point of the larger premium is the coarsest move the search makes.
            let step = scenario.mandatory.max(scenario.optional.unwrap_or_default()).amount() / Decimal::from(100);
            assert_money_approx_eq(&quote.net_total(), &scenario.target, step);

            assert_discount_in_bounds(quote.mandatory_coverage());
            if let Some(optional) = quote.optional_coverage() {
                assert_discount_in_bounds(optional);
            }
            prop_assert_eq!(quote.gross_total(), scenario.gross());
        }

        #[test]
        fn generous_targets_leave_discounts_at_zero(scenario in generous_target_scenario_strategy()) {
            let (mandatory, optional) = scenario.coverages();
            let quote = Quote::with_target(scenario.target, mandatory, optional).unwrap();

            prop_assert_eq!(quote.mandatory_coverage().discount(), 0);
            prop_assert_eq!(quote.net_total(), quote.gross_total());
            prop_assert_eq!(quote.allocation(), AllocationOutcome::Untouched);
        }

        #[test]
        fn cheaper_coverage_untouched_when_primary_suffices(scenario in target_scenario_strategy()) {
            let (mandatory, optional) = scenario.coverages();
            let Some(optional_premium) = scenario.optional else {
                return Ok(());
            };
            let primary_premium = scenario.mandatory.max(optional_premium);
            let needed = scenario.gross() - scenario.target;
            prop_assume!(needed.amount() * Decimal::from(100) <= primary_premium.amount() * Decimal::from(98));

            let quote = Quote::with_target(scenario.target, mandatory, optional).unwrap();
            let secondary_discount = if optional_premium > scenario.mandatory {
                quote.mandatory_coverage().discount()
            } else {
                quote.optional_coverage().unwrap().discount()
            };
            prop_assert_eq!(secondary_discount, 0);
        }
    }
}
