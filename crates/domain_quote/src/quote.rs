//! Quote aggregate
//!
//! A quote combines the mandatory coverage with an optional one, applies
//! their discounts and, when a target price is requested, lets the
//! `DiscountAllocator` choose those discounts first.
//!
//! # Construction order
//!
//! ```text
//! allocate discounts (target given) -> plausibility checks -> totals
//! ```
//!
//! The unreachable-target check runs before plausibility, so a quote with a
//! target far below its (possibly invalid) premiums reports only that error.

use serde::Serialize;
use tracing::{info, warn};

use core_kernel::Money;
use crate::allocation::{AllocationOutcome, AllocatorSettings, DiscountAllocator};
use crate::coverage::{Coverage, CoverageKind};
use crate::error::QuoteError;
use crate::validation::{QuoteDraft, QuoteValidator};

/// A priced, plausible motor insurance quote
///
/// Totals are computed once at construction; a quote never changes after
/// it has been built.
#[derive(Debug, Clone, Serialize)]
pub struct Quote {
    mandatory: Coverage,
    optional: Option<Coverage>,
    target_price: Option<Money>,
    gross_total: Money,
    net_total: Money,
    allocation: AllocationOutcome,
}

impl Quote {
    /// Quotes the mandatory coverage alone
    pub fn new(mandatory: Coverage) -> Result<Self, QuoteError> {
        QuoteBuilder::new().mandatory(mandatory).build()
    }

    /// Quotes the mandatory coverage together with an optional one
    pub fn with_optional(mandatory: Coverage, optional: Option<Coverage>) -> Result<Self, QuoteError> {
        QuoteBuilder::new()
            .mandatory(mandatory)
            .optional_if_present(optional)
            .build()
    }

    /// Quotes both coverages and allocates discounts to meet `target_price`
    ///
    /// # Errors
    ///
    /// * `QuoteError::UnreachableTarget` if the target is below 1% of the gross total
    /// * `QuoteError::Plausibility` with every violation found afterwards
    pub fn with_target(
        target_price: Money,
        mandatory: Coverage,
        optional: Option<Coverage>,
    ) -> Result<Self, QuoteError> {
        QuoteBuilder::new()
            .target_price(target_price)
            .mandatory(mandatory)
            .optional_if_present(optional)
            .build()
    }

    /// Returns a builder for quotes assembled step by step
    pub fn builder() -> QuoteBuilder {
        QuoteBuilder::new()
    }

    pub fn mandatory_coverage(&self) -> &Coverage {
        &self.mandatory
    }

    pub fn optional_coverage(&self) -> Option<&Coverage> {
        self.optional.as_ref()
    }

    /// Returns the coverage occupying the given slot
    pub fn coverage(&self, kind: CoverageKind) -> Option<&Coverage> {
        match kind {
            CoverageKind::Mandatory => Some(&self.mandatory),
            CoverageKind::Optional => self.optional.as_ref(),
        }
    }

    pub fn target_price(&self) -> Option<Money> {
        self.target_price
    }

    /// Sum of all premiums before discount
    pub fn gross_total(&self) -> Money {
        self.gross_total
    }

    /// Sum of all discounted premiums
    pub fn net_total(&self) -> Money {
        self.net_total
    }

    /// Total amount discounted away
    pub fn total_discount(&self) -> Money {
        self.gross_total - self.net_total
    }

    /// What the discount allocation did while building this quote
    pub fn allocation(&self) -> AllocationOutcome {
        self.allocation
    }
}

/// Builder for quotes
///
/// Unlike the `Quote` constructors, the builder can describe a quote without
/// a mandatory coverage; `build` then reports it as a plausibility error.
#[derive(Debug, Clone, Default)]
pub struct QuoteBuilder {
    mandatory: Option<Coverage>,
    optional: Option<Coverage>,
    target_price: Option<Money>,
    settings: AllocatorSettings,
}

impl QuoteBuilder {
    /// Creates a new empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the mandatory coverage
    pub fn mandatory(mut self, coverage: Coverage) -> Self {
        self.mandatory = Some(coverage);
        self
    }

    /// Sets the optional coverage
    pub fn optional(mut self, coverage: Coverage) -> Self {
        self.optional = Some(coverage);
        self
    }

    /// Sets or clears the optional coverage
    pub fn optional_if_present(mut self, coverage: Option<Coverage>) -> Self {
        self.optional = coverage;
        self
    }

    /// Requests discounts that bring the net total to `target`
    pub fn target_price(mut self, target: Money) -> Self {
        self.target_price = Some(target);
        self
    }

    /// Overrides the allocator tuning
    pub fn settings(mut self, settings: AllocatorSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Builds the quote
    ///
    /// # Errors
    ///
    /// Returns `QuoteError::UnreachableTarget` before any plausibility check
    /// runs, otherwise `QuoteError::Plausibility` carrying every violation.
    /// Premiums too large to be summed yield `QuoteError::Arithmetic`.
    pub fn build(self) -> Result<Quote, QuoteError> {
        let QuoteBuilder {
            mut mandatory,
            mut optional,
            target_price,
            settings,
        } = self;

        // Allocation needs the mandatory coverage; a missing one is left to validation.
        let allocation = match (target_price, mandatory.as_mut()) {
            (Some(target), Some(mandatory)) => {
                DiscountAllocator::new(settings).allocate(target, mandatory, optional.as_mut())?
            }
            _ => AllocationOutcome::NotRequested,
        };

        let validation = QuoteValidator::validate(&QuoteDraft {
            mandatory: mandatory.as_ref(),
            optional: optional.as_ref(),
            target_price,
        });
        if let Err(messages) = validation.into_result() {
            warn!(violations = messages.len(), "quote rejected by plausibility checks");
            return Err(QuoteError::plausibility(messages));
        }

        let Some(mandatory) = mandatory else {
            return Err(QuoteError::plausibility(vec![format!(
                "{} ist Pflichtfeld",
                CoverageKind::Mandatory.label()
            )]));
        };

        let coverages = || std::iter::once(&mandatory).chain(optional.as_ref());
        let gross_total = coverages()
            .map(Coverage::premium)
            .try_fold(Money::zero(), |total, premium| total.checked_add(&premium))?;
        let net_total = coverages()
            .map(Coverage::discounted_premium)
            .try_fold(Money::zero(), |total, premium| total.checked_add(&premium))?;

        info!(
            %gross_total,
            %net_total,
            mandatory_discount = mandatory.discount(),
            optional_discount = ?optional.as_ref().map(|c| c.discount()),
            ?allocation,
            "quote computed"
        );

        Ok(Quote {
            mandatory,
            optional,
            target_price,
            gross_total,
            net_total,
            allocation,
        })
    }
}
