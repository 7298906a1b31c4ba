//! CLI configuration

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Deserialize;

use core_kernel::CoreError;
use domain_quote::AllocatorSettings;

/// CLI configuration
///
/// Every field falls back to its default when the matching `QUOTE_*`
/// variable is unset.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Log level
    pub log_level: String,
    /// Emit logs as JSON lines instead of plain text
    pub log_json: bool,
    /// Allocator tolerance in euros
    pub tolerance: Decimal,
    /// Allocator iteration cap
    pub max_iterations: u32,
}

impl Default for CliConfig {
    fn default() -> Self {
        let settings = AllocatorSettings::default();
        Self {
            log_level: "info".to_string(),
            log_json: false,
            tolerance: settings.tolerance,
            max_iterations: settings.max_iterations,
        }
    }
}

impl CliConfig {
    /// Loads configuration from the process environment
    pub fn from_env() -> Result<Self, CoreError> {
        Self::load(config::Environment::with_prefix("QUOTE"))
    }

    /// Loads configuration from an explicit variable map instead of the environment
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, CoreError> {
        Self::load(config::Environment::with_prefix("QUOTE").source(Some(vars)))
    }

    fn load(source: config::Environment) -> Result<Self, CoreError> {
        let config: Self = config::Config::builder()
            .add_source(source)
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| CoreError::configuration(e.to_string()))?;

        if config.tolerance <= Decimal::ZERO {
            return Err(CoreError::configuration(format!(
                "tolerance must be positive, got {}",
                config.tolerance
            )));
        }

        Ok(config)
    }

    /// Returns the allocator tuning
    pub fn settings(&self) -> AllocatorSettings {
        AllocatorSettings {
            tolerance: self.tolerance,
            max_iterations: self.max_iterations,
        }
    }
}
