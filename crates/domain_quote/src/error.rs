//! Quote domain errors
//!
//! A quote is rejected either because the requested target price cannot be
//! reached, or because plausibility checks found one or more violations.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use core_kernel::{Money, MoneyError};

const BANNER_WIDTH: usize = 70;

/// Errors that can occur while building a quote
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuoteError {
    /// Target price lies below the lowest net total obtainable at maximum discount
    #[error("Zielbeitrag von {target} ist nicht erreichbar. Minimaler Beitrag bei maximalem Rabatt (99%): {minimum}")]
    UnreachableTarget {
        target: Money,
        minimum: Money,
    },

    /// Premiums whose totals cannot be represented
    #[error("Beitrag nicht berechenbar: {0}")]
    Arithmetic(#[from] MoneyError),

    /// All plausibility violations found on the quote
    #[error("{0}")]
    Plausibility(PlausibilityReport),
}

impl QuoteError {
    /// Creates an unreachable-target error
    pub fn unreachable(target: Money, minimum: Money) -> Self {
        QuoteError::UnreachableTarget { target, minimum }
    }

    /// Creates a plausibility error from the collected messages
    pub fn plausibility(messages: Vec<String>) -> Self {
        QuoteError::Plausibility(PlausibilityReport::new(messages))
    }

    /// Returns every message carried by this error, in check order
    pub fn messages(&self) -> Vec<String> {
        match self {
            QuoteError::UnreachableTarget { .. } | QuoteError::Arithmetic(_) => {
                vec![self.to_string()]
            }
            QuoteError::Plausibility(report) => report.messages().to_vec(),
        }
    }

    /// Renders this error as a bannered plausibility report
    pub fn report(&self) -> PlausibilityReport {
        match self {
            QuoteError::Plausibility(report) => report.clone(),
            other => PlausibilityReport::new(other.messages()),
        }
    }
}

/// Ordered list of human-readable plausibility messages
///
/// `Display` renders the numbered block shown to users:
///
/// ```text
/// ======================================================================
/// PLAUSIBILITÄTSFEHLER
/// ======================================================================
///   1. Prämie für die Haftpflicht muss positiv sein
/// ======================================================================
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlausibilityReport {
    messages: Vec<String>,
}

impl PlausibilityReport {
    pub fn new(messages: Vec<String>) -> Self {
        Self { messages }
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns true if any message contains `needle`
    pub fn mentions(&self, needle: &str) -> bool {
        self.messages.iter().any(|m| m.contains(needle))
    }
}

impl fmt::Display for PlausibilityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.messages.is_empty() {
            return f.write_str("Plausibilitätsprüfung fehlgeschlagen");
        }

        let banner = "=".repeat(BANNER_WIDTH);
        writeln!(f)?;
        writeln!(f, "{banner}")?;
        writeln!(f, "PLAUSIBILITÄTSFEHLER")?;
        writeln!(f, "{banner}")?;
        for (i, message) in self.messages.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, message)?;
        }
        write!(f, "{banner}")
    }
}
