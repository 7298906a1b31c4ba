//! Target-price discount allocation
//!
//! Given a target price, the allocator chooses integer percentage discounts
//! for the mandatory and the optional coverage so that the net total lands
//! on the target.
//!
//! # Strategy
//!
//! The more expensive coverage (the *primary*) is discounted first, which
//! keeps the percentage points low: 10€ off a 100€ premium is 10%, the same
//! amount off a 20€ premium would be 50%. On equal premiums the mandatory
//! coverage is primary.
//!
//! 1. A closed-form guess rounds every percentage up, so the net total never
//!    ends above the target.
//! 2. A bounded search then moves one percentage point at a time to cancel
//!    the rounding: more discount goes to the primary first, discount is
//!    taken back from the secondary first.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use core_kernel::{Money, Rate};
use crate::coverage::{Coverage, MAX_DISCOUNT};
use crate::error::QuoteError;

/// Share of a premium that can be discounted away
const MAX_DISCOUNT_RATE: Rate = Rate::new(dec!(0.99));

/// Share of the gross total left over when every coverage is at maximum discount
const MIN_PRICE_RATE: Rate = Rate::new(dec!(0.01));

/// Tuning of the rounding-correction search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocatorSettings {
    /// Net total counts as on target when closer than this
    pub tolerance: Decimal,
    /// Upper bound on single-point adjustments
    pub max_iterations: u32,
}

impl Default for AllocatorSettings {
    fn default() -> Self {
        Self {
            tolerance: dec!(0.01),
            max_iterations: 100,
        }
    }
}

/// What the allocator did to a quote's coverages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AllocationOutcome {
    /// No target price was given
    NotRequested,
    /// Target was at or above the gross total; discounts were left as they were
    Untouched,
    /// Net total is within tolerance of the target
    Converged { iterations: u32 },
    /// Search stopped without reaching the tolerance
    BestEffort { iterations: u32 },
}

impl AllocationOutcome {
    /// Returns true if discounts were computed for a target
    pub fn is_allocated(&self) -> bool {
        matches!(
            self,
            AllocationOutcome::Converged { .. } | AllocationOutcome::BestEffort { .. }
        )
    }
}

/// Computes target-price discounts for a pair of coverages
#[derive(Debug, Clone, Default)]
pub struct DiscountAllocator {
    settings: AllocatorSettings,
}

impl DiscountAllocator {
    /// Creates an allocator with the given settings
    pub fn new(settings: AllocatorSettings) -> Self {
        Self { settings }
    }

    /// Returns the allocator settings
    pub fn settings(&self) -> &AllocatorSettings {
        &self.settings
    }

    /// Rewrites the discounts of `mandatory` and `optional` so that their net
    /// total approaches `target`
    ///
    /// # Arguments
    ///
    /// * `target` - Desired net total
    /// * `mandatory` - The mandatory coverage
    /// * `optional` - The optional coverage, if the quote has one
    ///
    /// # Errors
    ///
    /// Returns `QuoteError::UnreachableTarget` if the target is below 1% of
    /// the gross total, `QuoteError::Arithmetic` if the premiums add up beyond
    /// the representable range. Nothing is modified in either case.
    #[instrument(level = "debug", skip(self, mandatory, optional), fields(target = %target))]
    pub fn allocate(
        &self,
        target: Money,
        mandatory: &mut Coverage,
        optional: Option<&mut Coverage>,
    ) -> Result<AllocationOutcome, QuoteError> {
        let gross = match optional.as_deref() {
            Some(optional) => mandatory.premium().checked_add(&optional.premium())?,
            None => mandatory.premium(),
        };

        if target >= gross {
            debug!(%gross, "target at or above gross total, no discount needed");
            return Ok(AllocationOutcome::Untouched);
        }

        let minimum = MIN_PRICE_RATE.apply(&gross);
        if target < minimum {
            warn!(%gross, %minimum, "target price not reachable");
            return Err(QuoteError::unreachable(target, minimum));
        }

        let needed = gross.checked_sub(&target)?;
        let mut pair = match optional {
            Some(optional) if optional.premium() > mandatory.premium() => {
                CoveragePair::new(optional, Some(mandatory))
            }
            Some(optional) => CoveragePair::new(mandatory, Some(optional)),
            None => CoveragePair::new(mandatory, None),
        };

        pair.initial_guess(needed);
        debug!(
            primary = pair.primary.discount(),
            secondary = ?pair.secondary.as_ref().map(|c| c.discount()),
            %needed,
            "initial discount guess"
        );

        let outcome = pair.refine(target, &self.settings);
        match outcome {
            AllocationOutcome::BestEffort { iterations } => warn!(
                iterations,
                net = %pair.net_total(),
                "target not met within tolerance, keeping closest allocation"
            ),
            _ => debug!(?outcome, net = %pair.net_total(), "discounts allocated"),
        }

        Ok(outcome)
    }
}

/// Coverages ordered by discount priority
struct CoveragePair<'a> {
    primary: &'a mut Coverage,
    secondary: Option<&'a mut Coverage>,
}

impl<'a> CoveragePair<'a> {
    fn new(primary: &'a mut Coverage, secondary: Option<&'a mut Coverage>) -> Self {
        Self { primary, secondary }
    }

    fn net_total(&self) -> Money {
        self.primary.discounted_premium()
            + self
                .secondary
                .as_ref()
                .map_or(Money::zero(), |c| c.discounted_premium())
    }

    fn initial_guess(&mut self, needed: Money) {
        let primary_max = MAX_DISCOUNT_RATE.apply(&self.primary.premium());

        match self.secondary.as_deref_mut() {
            Some(secondary) if needed > primary_max => {
                self.primary.set_discount(MAX_DISCOUNT);
                let remaining = needed - primary_max;
                secondary.set_discount(discount_percent(remaining, secondary.premium()));
            }
            Some(secondary) => {
                self.primary.set_discount(discount_percent(needed, self.primary.premium()));
                secondary.set_discount(0);
            }
            None => {
                self.primary.set_discount(discount_percent(needed, self.primary.premium()));
            }
        }
    }

    fn refine(&mut self, target: Money, settings: &AllocatorSettings) -> AllocationOutcome {
        let on_target = |net: Money| (net - target).abs().amount() < settings.tolerance;

        for iteration in 0..settings.max_iterations {
            let net = self.net_total();
            if on_target(net) {
                return AllocationOutcome::Converged { iterations: iteration };
            }

            let moved = if net > target { self.increase() } else { self.decrease() };
            if !moved {
                return AllocationOutcome::BestEffort { iterations: iteration };
            }
        }

        let iterations = settings.max_iterations;
        if on_target(self.net_total()) {
            AllocationOutcome::Converged { iterations }
        } else {
            AllocationOutcome::BestEffort { iterations }
        }
    }

    /// One more percentage point, primary first
    fn increase(&mut self) -> bool {
        if self.primary.discount() < MAX_DISCOUNT {
            self.primary.set_discount(self.primary.discount() + 1);
            return true;
        }
        match self.secondary.as_deref_mut() {
            Some(secondary) if secondary.discount() < MAX_DISCOUNT => {
                secondary.set_discount(secondary.discount() + 1);
                true
            }
            _ => false,
        }
    }

    /// One percentage point less, secondary first
    fn decrease(&mut self) -> bool {
        if let Some(secondary) = self.secondary.as_deref_mut() {
            if secondary.discount() > 0 {
                secondary.set_discount(secondary.discount() - 1);
                return true;
            }
        }
        if self.primary.discount() > 0 {
            self.primary.set_discount(self.primary.discount() - 1);
            return true;
        }
        false
    }
}

/// Smallest whole percentage of `premium` covering `amount`, capped at 99
///
/// A zero premium cannot absorb any discount and yields 0.
fn discount_percent(amount: Money, premium: Money) -> i32 {
    let Ok(ratio) = amount.ratio_to(&premium) else {
        return 0;
    };
    ratio
        .checked_mul(dec!(100))
        .map(|percent| percent.ceil())
        .and_then(|percent| percent.to_i32())
        .unwrap_or(MAX_DISCOUNT)
        .min(MAX_DISCOUNT)
}
