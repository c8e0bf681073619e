//! Simulation configuration
//!
//! `SimulationConfig` holds the three knobs of a projection run. Defaults match
//! a 1,000 investment projected over 10 years of monthly periods with 10,000 paths.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_initial_amount() -> f64 {
    1_000.0
}

fn default_path_count() -> usize {
    10_000
}

fn default_horizon() -> usize {
    10 * 12
}

/// Configuration for a projection run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Starting portfolio value
    #[serde(default = "default_initial_amount")]
    pub initial_amount: f64,

    /// Number of independent simulated paths (N)
    #[serde(default = "default_path_count")]
    pub path_count: usize,

    /// Number of compounding periods per path (H)
    #[serde(default = "default_horizon")]
    pub horizon: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            initial_amount: default_initial_amount(),
            path_count: default_path_count(),
            horizon: default_horizon(),
        }
    }
}

impl SimulationConfig {
    /// Create and validate a configuration.
    pub fn new(
        initial_amount: f64,
        path_count: usize,
        horizon: usize,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            initial_amount,
            path_count,
            horizon,
        };
        config.validate()?;
        Ok(config)
    }

    /// Create a configuration with the horizon given in years of monthly periods.
    pub fn from_years(
        initial_amount: f64,
        path_count: usize,
        years: usize,
    ) -> Result<Self, ConfigError> {
        Self::new(initial_amount, path_count, Self::years_to_months(years)?)
    }

    /// Convert a horizon in years to monthly periods.
    pub fn years_to_months(years: usize) -> Result<usize, ConfigError> {
        years
            .checked_mul(12)
            .ok_or(ConfigError::HorizonOverflow { years })
    }

    /// Check that every field is usable for a projection.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.initial_amount.is_finite() && self.initial_amount > 0.0) {
            return Err(ConfigError::InvalidInitialAmount(self.initial_amount));
        }
        if self.path_count == 0 {
            return Err(ConfigError::ZeroPathCount);
        }
        if self.horizon == 0 {
            return Err(ConfigError::ZeroHorizon);
        }
        Ok(())
    }

    #[must_use]
    pub fn with_initial_amount(mut self, initial_amount: f64) -> Self {
        self.initial_amount = initial_amount;
        self
    }

    #[must_use]
    pub fn with_path_count(mut self, path_count: usize) -> Self {
        self.path_count = path_count;
        self
    }

    #[must_use]
    pub fn with_horizon(mut self, horizon: usize) -> Self {
        self.horizon = horizon;
        self
    }

    /// Total number of compounding steps a run performs.
    #[must_use]
    pub fn total_steps(&self) -> usize {
        self.path_count.saturating_mul(self.horizon)
    }
}
