//! Projection report and its text rendering.

use std::fmt::Write as _;

use portsim_core::{AssetStatistics, StatisticsSummary};
use serde::Serialize;

/// Everything a run prints: inputs, seed, terminal summary and pool statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub initial_amount: f64,
    pub path_count: usize,
    pub horizon_months: usize,
    pub seed: u64,
    pub summary: StatisticsSummary,
    /// Share of paths ending below the initial amount
    pub probability_of_loss: f64,
    pub assets: Vec<AssetStatistics>,
}

impl Report {
    /// Render the report as plain text.
    #[must_use]
    pub fn render_text(&self, currency: &str) -> String {
        let mut out = String::new();
        let money = |v: f64| format_currency(v, currency);

        // Writing to a String cannot fail
        let _ = writeln!(out, "Bootstrap projection");
        let _ = writeln!(out, "  Initial amount:    {}", money(self.initial_amount));
        let _ = writeln!(out, "  Paths:             {}", self.path_count);
        let _ = writeln!(
            out,
            "  Horizon:           {} months ({:.1} years)",
            self.horizon_months,
            self.horizon_months as f64 / 12.0
        );
        let _ = writeln!(out, "  Seed:              {}", self.seed);
        let _ = writeln!(out);
        let _ = writeln!(out, "Terminal value");
        let _ = writeln!(out, "  Mean:              {}", money(self.summary.mean));
        let _ = writeln!(
            out,
            "  Std deviation:     {}",
            money(self.summary.standard_deviation)
        );
        let _ = writeln!(out, "  5th percentile:    {}", money(self.summary.percentile_5));
        let _ = writeln!(out, "  Median:            {}", money(self.summary.percentile_50));
        let _ = writeln!(out, "  95th percentile:   {}", money(self.summary.percentile_95));
        let _ = writeln!(
            out,
            "  Chance of loss:    {}",
            format_percentage(self.probability_of_loss)
        );

        if !self.assets.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(
                out,
                "{:<12} {:>8} {:>10} {:>10} {:>10} {:>10}",
                "Asset", "Periods", "Mean", "Geo mean", "Std dev", "Worst"
            );
            for asset in &self.assets {
                let _ = writeln!(
                    out,
                    "{:<12} {:>8} {:>10} {:>10} {:>10} {:>10}",
                    asset.name,
                    asset.periods,
                    format_percentage(asset.arithmetic_mean),
                    format_percentage(asset.geometric_mean),
                    format_percentage(asset.std_dev),
                    format_percentage(asset.min),
                );
            }
        }

        out
    }
}

/// Format a currency value with thousands separators and two decimals
pub fn format_currency(value: f64, symbol: &str) -> String {
    if !value.is_finite() {
        return format!("{symbol}{value}");
    }

    let cents_total = (value.abs() * 100.0).round() as u64;
    let whole = cents_total / 100;
    let cents = cents_total % 100;

    // Add thousands separators
    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if value < 0.0 && cents_total > 0 { "-" } else { "" };
    format!("{sign}{symbol}{grouped}.{cents:02}")
}

/// Format a fraction as a percentage
pub fn format_percentage(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> Report {
        Report {
            initial_amount: 1_000.0,
            path_count: 10_000,
            horizon_months: 120,
            seed: 42,
            summary: StatisticsSummary {
                mean: 2_345.678,
                standard_deviation: 812.5,
                percentile_5: 1_102.0,
                percentile_50: 2_200.0,
                percentile_95: 3_900.25,
            },
            probability_of_loss: 0.0312,
            assets: vec![AssetStatistics {
                name: "PETR4".to_string(),
                arithmetic_mean: 0.012,
                geometric_mean: 0.009,
                std_dev: 0.08,
                min: -0.21,
                max: 0.19,
                periods: 60,
            }],
        }
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0, "$"), "$0.00");
        assert_eq!(format_currency(999.999, "$"), "$1,000.00");
        assert_eq!(format_currency(1_234_567.891, "$"), "$1,234,567.89");
        assert_eq!(format_currency(-2_500.5, "R$"), "-R$2,500.50");
        assert_eq!(format_currency(123_456.0, "€"), "€123,456.00");
    }

    #[test]
    fn test_format_currency_non_finite() {
        assert_eq!(format_currency(f64::NAN, "$"), "$NaN");
        assert_eq!(format_currency(f64::INFINITY, "$"), "$inf");
        assert_eq!(format_currency(f64::NEG_INFINITY, "$"), "$-inf");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.0312), "3.12%");
        assert_eq!(format_percentage(-0.21), "-21.00%");
    }

    #[test]
    fn test_render_text() {
        let text = sample_report().render_text("$");
        assert!(text.contains("Seed:              42"));
        assert!(text.contains("120 months (10.0 years)"));
        assert!(text.contains("Mean:              $2,345.68"));
        assert!(text.contains("95th percentile:   $3,900.25"));
        assert!(text.contains("Chance of loss:    3.12%"));
        assert!(text.contains("PETR4"));
    }

    #[test]
    fn test_serializes_to_json() {
        let json = serde_json::to_value(sample_report()).unwrap();
        assert_eq!(json["seed"], 42);
        assert_eq!(json["summary"]["percentile_50"], 2_200.0);
        assert_eq!(json["assets"][0]["name"], "PETR4");
    }
}
