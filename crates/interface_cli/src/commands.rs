//! Subcommand execution
//!
//! Commands write their output to any `io::Write` so the binary can hand in
//! stdout while tests capture a buffer.

use std::io::Write;

use rust_decimal_macros::dec;
use tracing::{info, instrument};

use core_kernel::Money;
use domain_quote::{AllocatorSettings, Coverage, Quote, QuoteError};

use crate::cli::{CalcArgs, Command};
use crate::config::CliConfig;
use crate::error::CliError;
use crate::render;

/// Runs a parsed subcommand
pub fn run(command: Command, config: &CliConfig, out: &mut impl Write) -> Result<(), CliError> {
    let settings = config.settings();
    match command {
        Command::Calc(args) => calc(&args, settings, out),
        Command::Demo => demo(settings, out),
    }
}

/// Builds the quote described by the `calc` arguments
pub fn build_quote(args: &CalcArgs, settings: AllocatorSettings) -> Result<Quote, QuoteError> {
    let mut builder = Quote::builder()
        .mandatory(Coverage::new(args.mandatory).with_discount(args.mandatory_discount))
        .settings(settings);
    if let Some(premium) = args.optional {
        builder = builder.optional(Coverage::new(premium).with_discount(args.optional_discount));
    }
    if let Some(target) = args.target {
        builder = builder.target_price(target);
    }
    builder.build()
}

#[instrument(skip_all, fields(mandatory = %args.mandatory))]
fn calc(args: &CalcArgs, settings: AllocatorSettings, out: &mut impl Write) -> Result<(), CliError> {
    let quote = build_quote(args, settings)?;
    if args.json {
        writeln!(out, "{}", render::quote_json(&quote)?)?;
    } else {
        write!(out, "{}", render::quote_summary(&quote))?;
    }
    Ok(())
}

/// One walkthrough example
#[derive(Debug, Clone)]
pub struct Scenario {
    pub title: &'static str,
    pub target: Option<Money>,
    pub mandatory: Coverage,
    pub optional: Option<Coverage>,
    /// Scenario demonstrates a rejected quote
    pub expect_failure: bool,
}

impl Scenario {
    fn quote(&self, settings: AllocatorSettings) -> Result<Quote, QuoteError> {
        let builder = Quote::builder()
            .mandatory(self.mandatory.clone())
            .optional_if_present(self.optional.clone())
            .settings(settings);
        match self.target {
            Some(target) => builder.target_price(target).build(),
            None => builder.build(),
        }
    }
}

/// The four walkthrough examples: liability alone, both coverages, a 600€
/// target, and a negative premium that must be rejected
pub fn demo_scenarios() -> Vec<Scenario> {
    let liability = || Coverage::new(Money::new(dec!(500)));
    let comprehensive = || Coverage::new(Money::new(dec!(300)));

    vec![
        Scenario {
            title: "Nur Haftpflicht",
            target: None,
            mandatory: liability(),
            optional: None,
            expect_failure: false,
        },
        Scenario {
            title: "Haftpflicht + Kasko",
            target: None,
            mandatory: liability(),
            optional: Some(comprehensive()),
            expect_failure: false,
        },
        Scenario {
            title: "Mit Zielbeitrag von 600€",
            target: Some(Money::new(dec!(600))),
            mandatory: liability(),
            optional: Some(comprehensive()),
            expect_failure: false,
        },
        Scenario {
            title: "Validierungsfehler (negative Prämie)",
            target: None,
            mandatory: Coverage::new(Money::new(dec!(-100))),
            optional: None,
            expect_failure: true,
        },
    ]
}

fn demo(settings: AllocatorSettings, out: &mut impl Write) -> Result<(), CliError> {
    writeln!(out, "=== KFZ-Versicherung Tarifierung ===")?;

    for (i, scenario) in demo_scenarios().iter().enumerate() {
        writeln!(out)?;
        writeln!(out, "Beispiel {}: {}", i + 1, scenario.title)?;

        match scenario.quote(settings) {
            Ok(quote) => write!(out, "{}", render::compact_summary(&quote))?,
            Err(error) if scenario.expect_failure => {
                writeln!(out, "{}", render::failure(&error))?;
                writeln!(out, "Erwarteter Fehler aufgetreten (siehe oben)")?;
            }
            Err(error) => return Err(error.into()),
        }
    }

    writeln!(out)?;
    writeln!(out, "=== Programm beendet ===")?;
    info!("demo finished");
    Ok(())
}
