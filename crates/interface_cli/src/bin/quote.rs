//! Motor Insurance Quote - CLI Binary
//!
//! # Usage
//!
//! ```bash
//! # Liability and comprehensive with explicit discounts
//! quote calc --mandatory 500 --optional 300 --mandatory-discount 10
//!
//! # Let the allocator find discounts for a target price
//! quote calc --mandatory 500 --optional 300 --target 600
//!
//! # Sample walkthrough
//! quote demo
//! ```
//!
//! # Environment Variables
//!
//! * `QUOTE_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `QUOTE_LOG_JSON` - Emit JSON log lines (default: false)
//! * `QUOTE_TOLERANCE` - Allocator tolerance in euros (default: 0.01)
//! * `QUOTE_MAX_ITERATIONS` - Allocator iteration cap (default: 100)

use clap::Parser;
use interface_cli::{cli::Cli, commands, config::CliConfig, render};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Main entry point for the quote CLI.
///
/// # Errors
///
/// Returns an error if configuration cannot be loaded or output cannot be
/// written. A rejected quote prints its plausibility report to stderr and
/// exits with status 1.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = CliConfig::from_env()?;

    let log_level = if cli.verbose { "debug" } else { config.log_level.as_str() };
    init_tracing(log_level, config.log_json);

    tracing::debug!(
        tolerance = %config.tolerance,
        max_iterations = config.max_iterations,
        "configuration loaded"
    );

    let mut stdout = std::io::stdout().lock();
    if let Err(error) = commands::run(cli.command, &config, &mut stdout) {
        match error.as_quote_error() {
            Some(quote_error) => {
                tracing::warn!(error = %quote_error, "quote rejected");
                eprintln!("{}", render::failure(quote_error));
                std::process::exit(1);
            }
            None => return Err(error.into()),
        }
    }

    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so stdout carries only the quote.
///
/// # Arguments
///
/// * `log_level` - The minimum log level to output (trace, debug, info, warn, error)
/// * `json` - Emit one JSON object per event
fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!json).then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}
