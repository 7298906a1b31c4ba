//! Plausibility checks for quotes and coverages
//!
//! Field constraints are expressed as small functions yielding
//! `validator::ValidationError`s tagged with the field they concern. The
//! aggregator runs every check, maps each violation to a fixed sentence for
//! its coverage slot and merges everything into one ordered list.
//!
//! # Check order
//!
//! 1. Mandatory coverage present
//! 2. Quote fields (target price positive)
//! 3. Mandatory coverage fields (premium positive, discount within 0..=99)
//! 4. Optional coverage fields

use validator::{Validate, ValidationError};

use core_kernel::Money;
use crate::coverage::{Coverage, CoverageKind, MAX_DISCOUNT};

const CODE_REQUIRED: &str = "required";
const CODE_POSITIVE: &str = "positive";
const CODE_MIN: &str = "min";
const CODE_MAX: &str = "max";

/// Result of a plausibility check
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether the checked record is plausible
    pub is_valid: bool,
    /// Violation messages in check order
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// Creates a successful validation result
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    /// Adds an error to the result
    pub fn add_error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
        self.is_valid = false;
    }

    /// Merges another validation result into this one
    pub fn merge(&mut self, other: ValidationResult) {
        if !other.is_valid {
            self.is_valid = false;
        }
        self.errors.extend(other.errors);
    }

    /// Converts into `Err` carrying all messages when any check failed
    pub fn into_result(self) -> Result<(), Vec<String>> {
        if self.is_valid {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::ok()
    }
}

/// Field a constraint applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    MandatoryCoverage,
    TargetPrice,
    Premium,
    Discount,
}

/// A single failed constraint
#[derive(Debug, Clone, PartialEq)]
pub struct FieldViolation {
    pub field: Field,
    pub error: ValidationError,
}

impl FieldViolation {
    fn new(field: Field, code: &'static str) -> Self {
        Self {
            field,
            error: ValidationError::new(code),
        }
    }
}

/// Everything the aggregator needs to know about a quote under construction
#[derive(Debug, Clone, Copy, Default)]
pub struct QuoteDraft<'a> {
    pub mandatory: Option<&'a Coverage>,
    pub optional: Option<&'a Coverage>,
    pub target_price: Option<Money>,
}

/// Constraints declared on the quote itself
pub fn quote_constraints(draft: &QuoteDraft<'_>) -> Vec<FieldViolation> {
    let mut violations = Vec::new();

    if draft.mandatory.is_none() {
        violations.push(FieldViolation::new(Field::MandatoryCoverage, CODE_REQUIRED));
    }
    if let Some(target) = draft.target_price {
        if !target.is_positive() {
            violations.push(FieldViolation::new(Field::TargetPrice, CODE_POSITIVE));
        }
    }

    violations
}

/// Constraints declared on a coverage
///
/// The discount range comes from the `#[validate(range)]` declaration on
/// `Coverage`; its single `range` violation is narrowed to the bound that
/// was crossed.
pub fn coverage_constraints(coverage: &Coverage) -> Vec<FieldViolation> {
    let mut violations = Vec::new();

    if !coverage.premium().is_positive() {
        violations.push(FieldViolation::new(Field::Premium, CODE_POSITIVE));
    }
    if let Err(errors) = coverage.validate() {
        if let Some(discount_errors) = errors.field_errors().get("discount") {
            for error in discount_errors.iter() {
                let mut error = error.clone();
                error.code = if coverage.discount() < 0 { CODE_MIN } else { CODE_MAX }.into();
                violations.push(FieldViolation {
                    field: Field::Discount,
                    error,
                });
            }
        }
    }

    violations
}

/// Maps a violation to its user-facing sentence
///
/// `context` names the coverage slot the violation was found in; without one
/// the generic sentence is used.
pub fn describe(violation: &FieldViolation, context: Option<CoverageKind>) -> String {
    let subject = |noun: &str| match context {
        Some(kind) => format!("{} für die {}", noun, kind.label()),
        None => noun.to_string(),
    };

    match (violation.field, &*violation.error.code) {
        (Field::MandatoryCoverage, _) => {
            format!("{} ist Pflichtfeld", CoverageKind::Mandatory.label())
        }
        (Field::TargetPrice, _) => "Zielbeitrag muss positiv sein".to_string(),
        (Field::Premium, _) => format!("{} muss positiv sein", subject("Prämie")),
        (Field::Discount, CODE_MIN) => format!("{} darf nicht negativ sein", subject("Rabatt")),
        (Field::Discount, _) => {
            format!("{} darf nicht größer {} sein", subject("Rabatt"), MAX_DISCOUNT)
        }
    }
}

fn collect(violations: Vec<FieldViolation>, context: Option<CoverageKind>) -> ValidationResult {
    let mut result = ValidationResult::ok();
    for violation in &violations {
        result.add_error(describe(violation, context));
    }
    result
}

/// Validates a single coverage
///
/// # Arguments
///
/// * `coverage` - The coverage to check
/// * `context` - Slot the coverage occupies, used to word the messages
pub fn validate_coverage(coverage: &Coverage, context: Option<CoverageKind>) -> ValidationResult {
    collect(coverage_constraints(coverage), context)
}

/// Validator for quotes
///
/// Runs every check and never stops at the first violation.
///
/// # Examples
///
/// ```rust,ignore
/// let result = QuoteValidator::validate(&QuoteDraft {
///     mandatory: Some(&mandatory),
///     optional: None,
///     target_price: None,
/// });
///
/// if !result.is_valid {
///     for error in result.errors {
///         println!("Plausibility error: {}", error);
///     }
/// }
/// ```
pub struct QuoteValidator;

impl QuoteValidator {
    /// Validates a quote draft and all of its coverages
    pub fn validate(draft: &QuoteDraft<'_>) -> ValidationResult {
        let mut result = collect(quote_constraints(draft), None);

        if let Some(mandatory) = draft.mandatory {
            result.merge(validate_coverage(mandatory, Some(CoverageKind::Mandatory)));
        }
        if let Some(optional) = draft.optional {
            result.merge(validate_coverage(optional, Some(CoverageKind::Optional)));
        }

        result
    }
}
