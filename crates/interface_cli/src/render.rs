//! Output formatting

use domain_quote::{Coverage, CoverageKind, Quote, QuoteError};

/// Placeholder for a coverage the quote does not include
pub const NOT_AVAILABLE: &str = "N/A";

/// Renders a quote as the human-readable summary
///
/// ```text
/// Zielbeitrag: 600.00€
/// Gesamtprämie: 800.00€
/// Nettoprämie: 600.00€
/// Haftpflicht Rabatt: 40%
/// Kasko Rabatt: 0%
/// ```
///
/// The target line only appears when a target was requested; an absent
/// optional coverage is shown as `N/A`.
pub fn quote_summary(quote: &Quote) -> String {
    lines_to_string(summary_lines(quote, true))
}

/// Same as `quote_summary`, but leaves out the line of an absent optional
/// coverage
pub fn compact_summary(quote: &Quote) -> String {
    lines_to_string(summary_lines(quote, false))
}

fn summary_lines(quote: &Quote, show_absent: bool) -> Vec<String> {
    let target = quote
        .target_price()
        .map(|target| format!("Zielbeitrag: {target}"));
    let totals = [
        format!("Gesamtprämie: {}", quote.gross_total()),
        format!("Nettoprämie: {}", quote.net_total()),
    ];
    let discounts = [CoverageKind::Mandatory, CoverageKind::Optional]
        .into_iter()
        .map(|kind| (kind, quote.coverage(kind)))
        .filter(|(_, coverage)| show_absent || coverage.is_some())
        .map(|(kind, coverage)| format!("{} Rabatt: {}", kind.label(), discount(coverage)));

    target.into_iter().chain(totals).chain(discounts).collect()
}

fn lines_to_string(lines: Vec<String>) -> String {
    lines.into_iter().map(|line| line + "\n").collect()
}

/// Renders a quote as pretty-printed JSON
pub fn quote_json(quote: &Quote) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(quote)
}

/// Renders a failed quote as the bannered plausibility report
pub fn failure(error: &QuoteError) -> String {
    error.report().to_string()
}

fn discount(coverage: Option<&Coverage>) -> String {
    match coverage {
        Some(coverage) => format!("{}%", coverage.discount()),
        None => NOT_AVAILABLE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{eur, CoverageFixtures, DemoFixtures};
    use rust_decimal_macros::dec;

    #[test]
    fn test_summary_without_optional() {
        let quote = Quote::new(DemoFixtures::liability()).unwrap();

        assert_eq!(
            quote_summary(&quote),
            "Gesamtprämie: 500.00€\n\
             Nettoprämie: 500.00€\n\
             Haftpflicht Rabatt: 0%\n\
             Kasko Rabatt: N/A\n"
        );
    }

    #[test]
    fn test_compact_summary_omits_absent_optional() {
        let quote = Quote::new(DemoFixtures::liability()).unwrap();

        assert_eq!(
            compact_summary(&quote),
            "Gesamtprämie: 500.00€\n\
             Nettoprämie: 500.00€\n\
             Haftpflicht Rabatt: 0%\n"
        );
    }

    #[test]
    fn test_compact_summary_keeps_present_optional() {
        let quote = Quote::with_optional(
            DemoFixtures::liability(),
            Some(DemoFixtures::comprehensive()),
        )
        .unwrap();

        assert_eq!(compact_summary(&quote), quote_summary(&quote));
    }

    #[test]
    fn test_summary_with_target() {
        let quote = Quote::with_target(
            DemoFixtures::target(),
            DemoFixtures::liability(),
            Some(DemoFixtures::comprehensive()),
        )
        .unwrap();

        let summary = quote_summary(&quote);
        assert!(summary.starts_with("Zielbeitrag: 600.00€\n"));
        assert!(summary.contains("Nettoprämie: 600.00€"));
        assert!(summary.contains("Haftpflicht Rabatt: 40%"));
        assert!(summary.contains("Kasko Rabatt: 0%"));
    }

    #[test]
    fn test_json_contains_coverages() {
        let quote = Quote::with_optional(
            CoverageFixtures::mandatory_100(),
            Some(CoverageFixtures::discounted(dec!(50), 10)),
        )
        .unwrap();

        let json: serde_json::Value = serde_json::from_str(&quote_json(&quote).unwrap()).unwrap();
        assert_eq!(json["optional"]["discount"], 10);
        assert!(json["target_price"].is_null());
    }

    #[test]
    fn test_failure_banner() {
        let error = Quote::with_target(
            eur(dec!(1)),
            CoverageFixtures::mandatory_100(),
            Some(CoverageFixtures::optional_50()),
        )
        .unwrap_err();

        let rendered = failure(&error);
        assert!(rendered.contains("PLAUSIBILITÄTSFEHLER"));
        assert!(rendered.contains("  1. Zielbeitrag von 1.00€ ist nicht erreichbar"));
    }
}
