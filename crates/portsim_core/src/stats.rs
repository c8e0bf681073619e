//! Summary statistics over a terminal value distribution

use serde::{Deserialize, Serialize};

use crate::error::SimulationError;

/// Standard percentiles reported in a summary
pub mod standard {
    pub const P5: f64 = 5.0;
    pub const P50: f64 = 50.0;
    pub const P95: f64 = 95.0;
}

/// Statistics of the terminal values of a projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatisticsSummary {
    pub mean: f64,
    /// Population standard deviation (divides by N)
    pub standard_deviation: f64,
    pub percentile_5: f64,
    pub percentile_50: f64,
    pub percentile_95: f64,
}

/// Summarize a terminal distribution (one value per path).
pub fn summarize(terminal: &[f64]) -> Result<StatisticsSummary, SimulationError> {
    if terminal.is_empty() {
        return Err(SimulationError::EmptyDistribution);
    }

    let mean = mean(terminal);
    let standard_deviation = population_std_dev(terminal, mean);

    let mut sorted = terminal.to_vec();
    sorted.sort_by(f64::total_cmp);

    Ok(StatisticsSummary {
        mean,
        standard_deviation,
        percentile_5: percentile(&sorted, standard::P5)?,
        percentile_50: percentile(&sorted, standard::P50)?,
        percentile_95: percentile(&sorted, standard::P95)?,
    })
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn population_std_dev(values: &[f64], mean: f64) -> f64 {
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Percentile of an ascending-sorted sample, interpolating linearly between ranks.
///
/// `pct` is on the 0-100 scale; the value sits at rank `pct / 100 * (n - 1)`.
pub fn percentile(sorted: &[f64], pct: f64) -> Result<f64, SimulationError> {
    if !(0.0..=100.0).contains(&pct) {
        return Err(SimulationError::InvalidPercentile(pct));
    }
    let (Some(&first), Some(&last)) = (sorted.first(), sorted.last()) else {
        return Err(SimulationError::EmptyDistribution);
    };
    if sorted.len() == 1 {
        return Ok(first);
    }

    let rank = pct / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if upper >= sorted.len() {
        return Ok(last);
    }

    let fraction = rank - lower as f64;
    Ok(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

/// Share of paths whose terminal value ended strictly below `threshold`.
pub fn probability_below(terminal: &[f64], threshold: f64) -> Result<f64, SimulationError> {
    if terminal.is_empty() {
        return Err(SimulationError::EmptyDistribution);
    }
    let below = terminal.iter().filter(|&&v| v < threshold).count();
    Ok(below as f64 / terminal.len() as f64)
}
