//! Bootstrap Monte Carlo portfolio projection
//!
//! This crate projects the distribution of a portfolio's future value by
//! resampling historical periodic returns. It provides:
//! - A validated, immutable return pool (periods x assets)
//! - The projector: N independent paths compounding one resampled return per period
//! - Summary statistics over the terminal values (mean, std dev, P5/P50/P95)
//! - A builder that turns raw price series into a monthly return pool
//!
//! ```ignore
//! use portsim_core::{ReturnPool, SimulationConfig, project, summarize};
//!
//! let pool = ReturnPool::from_rows(vec![vec![0.10, 0.02], vec![-0.05, 0.01]])?;
//! let config = SimulationConfig::from_years(1_000.0, 10_000, 10)?;
//! let projection = project(&pool, &config, Some(42))?;
//! let summary = summarize(&projection.terminal())?;
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod config;
pub mod error;
pub mod history;
pub mod progress;
pub mod simulation;
pub mod stats;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use config::SimulationConfig;
pub use error::{ConfigError, HistoryError, SimulationError};
pub use history::{PriceHistory, PricePoint, PriceSeries};
pub use model::{AssetStatistics, ProjectionMatrix, ReturnPool};
pub use progress::ProjectionProgress;
pub use simulation::{
    DrawSource, project, project_with_progress, project_with_rng, project_with_source,
};
pub use stats::{StatisticsSummary, percentile, probability_below, summarize};
