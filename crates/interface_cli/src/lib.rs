//! Command Line Interface
//!
//! This crate exposes the quote domain as the `quote` binary.
//!
//! # Architecture
//!
//! - **Cli**: Argument definitions (`calc` and `demo` subcommands)
//! - **Config**: Allocator tuning and log level from `QUOTE_*` environment variables
//! - **Commands**: Turning arguments into quotes, the demo walkthrough
//! - **Render**: Text and JSON output
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_cli::{cli::Cli, commands, config::CliConfig};
//!
//! let config = CliConfig::from_env()?;
//! commands::run(Cli::parse().command, &config, &mut std::io::stdout())?;
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod render;

pub use error::CliError;
