//! Run settings: a settings file merged with command-line overrides.

use std::path::Path;

use color_eyre::eyre::WrapErr;
use portsim_core::SimulationConfig;
use serde::{Deserialize, Serialize};

use crate::input::read_document;

/// Settings file contents
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSettings {
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Values given on the command line; these win over the settings file
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Overrides {
    pub initial_amount: Option<f64>,
    pub path_count: Option<usize>,
    pub horizon_months: Option<usize>,
    /// Horizon in years of monthly periods; ignored when `horizon_months` is set
    pub horizon_years: Option<usize>,
    pub seed: Option<u64>,
}

impl RunSettings {
    /// Load settings from a YAML or JSON file.
    pub fn load(path: &Path) -> color_eyre::Result<Self> {
        let settings: Self = read_document(path)?;
        tracing::debug!(?settings, "loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Apply overrides and fix the seed.
    ///
    /// A run without any seed gets a fresh random one so the report can
    /// always show the seed needed to reproduce it.
    pub fn resolve(self, overrides: Overrides) -> color_eyre::Result<(SimulationConfig, u64)> {
        let mut config = self.simulation;
        if let Some(amount) = overrides.initial_amount {
            config = config.with_initial_amount(amount);
        }
        if let Some(paths) = overrides.path_count {
            config = config.with_path_count(paths);
        }
        let horizon = match (overrides.horizon_months, overrides.horizon_years) {
            (Some(months), _) => Some(months),
            (None, Some(years)) => Some(
                SimulationConfig::years_to_months(years).wrap_err("invalid simulation settings")?,
            ),
            (None, None) => None,
        };
        if let Some(months) = horizon {
            config = config.with_horizon(months);
        }
        config.validate().wrap_err("invalid simulation settings")?;

        let seed = overrides
            .seed
            .or(self.seed)
            .unwrap_or_else(rand::random::<u64>);
        Ok((config, seed))
    }
}
