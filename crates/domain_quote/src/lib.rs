//! Motor Insurance Quote Domain
//!
//! This crate prices a motor insurance quote made of the mandatory
//! third-party liability coverage and an optional comprehensive coverage.
//!
//! # Architecture
//!
//! The domain layer is infrastructure-agnostic, containing only business logic:
//! - **Aggregate**: `Quote`, built once and immutable afterwards
//! - **Value Objects**: `Coverage`, `CoverageKind`
//! - **Domain Services**: `DiscountAllocator` (target-price search),
//!   `QuoteValidator` (plausibility checks collecting every violation)
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_quote::{Coverage, Quote};
//!
//! let quote = Quote::with_target(
//!     Money::new(dec!(600)),
//!     Coverage::new(Money::new(dec!(500))),
//!     Some(Coverage::new(Money::new(dec!(300)))),
//! )?;
//!
//! assert_eq!(quote.mandatory_coverage().discount(), 40);
//! ```

pub mod allocation;
pub mod coverage;
pub mod error;
pub mod quote;
pub mod validation;

pub use allocation::{AllocationOutcome, AllocatorSettings, DiscountAllocator};
pub use coverage::{Coverage, CoverageKind, MAX_DISCOUNT};
pub use error::{PlausibilityReport, QuoteError};
pub use quote::{Quote, QuoteBuilder};
pub use validation::{validate_coverage, QuoteDraft, QuoteValidator, ValidationResult};
