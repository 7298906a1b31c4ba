//! Command line arguments

use clap::{Args, Parser, Subcommand};

use core_kernel::Money;

#[derive(Debug, Parser)]
#[command(name = "quote")]
#[command(about = "Motor insurance quotes with target-price discount allocation")]
#[command(version)]
pub struct Cli {
    /// Enable debug output (overrides QUOTE_LOG_LEVEL)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Price a single quote
    Calc(CalcArgs),
    /// Walk through the sample quotes
    Demo,
}

#[derive(Debug, Clone, Args)]
pub struct CalcArgs {
    /// Premium of the mandatory liability coverage, e.g. 500 or 499,90
    /// (at most 4 decimal places)
    #[arg(long, allow_negative_numbers = true)]
    pub mandatory: Money,

    /// Premium of the optional comprehensive coverage (at most 4 decimal places)
    #[arg(long, allow_negative_numbers = true)]
    pub optional: Option<Money>,

    /// Discount in percent on the mandatory coverage
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub mandatory_discount: i32,

    /// Discount in percent on the optional coverage
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub optional_discount: i32,

    /// Desired net total; discounts are then computed instead of taken as given
    #[arg(long, allow_negative_numbers = true)]
    pub target: Option<Money>,

    /// Print the quote as JSON
    #[arg(long)]
    pub json: bool,
}
