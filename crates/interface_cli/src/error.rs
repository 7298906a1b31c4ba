//! CLI error handling

use thiserror::Error;

use core_kernel::CoreError;
use domain_quote::QuoteError;

/// CLI error types
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Quote(#[from] QuoteError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Returns the quote error if the failure came from quoting
    pub fn as_quote_error(&self) -> Option<&QuoteError> {
        match self {
            CliError::Quote(error) => Some(error),
            _ => None,
        }
    }
}
