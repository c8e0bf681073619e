use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Historical periodic returns for a basket of assets.
///
/// Rows are historical periods and columns are assets. A pool always has at
/// least one period and one asset, and every entry is a finite fractional
/// return (0.03 = +3%). The matrix never changes after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ReturnPoolData", into = "ReturnPoolData")]
pub struct ReturnPool {
    /// Asset names in column order
    names: Vec<String>,
    num_periods: usize,
    /// Row-major returns: `returns[period * num_assets + asset]`
    returns: Vec<f64>,
}

/// Serialized form of a [`ReturnPool`].
///
/// `assets` may be omitted, in which case columns are labelled `asset_0`, `asset_1`, ...
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnPoolData {
    #[serde(default)]
    pub assets: Vec<String>,
    /// One row per historical period, one return per asset
    pub periods: Vec<Vec<f64>>,
}

impl TryFrom<ReturnPoolData> for ReturnPool {
    type Error = ConfigError;

    fn try_from(data: ReturnPoolData) -> Result<Self, Self::Error> {
        if data.assets.is_empty() {
            ReturnPool::from_rows(data.periods)
        } else {
            ReturnPool::new(data.assets, data.periods)
        }
    }
}

impl From<ReturnPool> for ReturnPoolData {
    fn from(pool: ReturnPool) -> Self {
        let periods = pool.rows().map(<[f64]>::to_vec).collect();
        ReturnPoolData {
            assets: pool.names,
            periods,
        }
    }
}

impl ReturnPool {
    /// Create a pool from labelled period rows, validating shape and values.
    pub fn new(names: Vec<String>, periods: Vec<Vec<f64>>) -> Result<Self, ConfigError> {
        let Some(first) = periods.first() else {
            return Err(ConfigError::NoPeriods);
        };
        let num_assets = first.len();
        if num_assets == 0 {
            return Err(ConfigError::NoAssets);
        }
        if names.len() != num_assets {
            return Err(ConfigError::AssetCountMismatch {
                names: names.len(),
                columns: num_assets,
            });
        }

        let mut returns = Vec::with_capacity(periods.len() * num_assets);
        for (period, row) in periods.iter().enumerate() {
            if row.len() != num_assets {
                return Err(ConfigError::RaggedRow {
                    period,
                    expected: num_assets,
                    found: row.len(),
                });
            }
            for (asset, &value) in row.iter().enumerate() {
                if !value.is_finite() {
                    return Err(ConfigError::NonFiniteReturn {
                        period,
                        asset,
                        value,
                    });
                }
                if value <= -1.0 {
                    tracing::warn!(
                        period,
                        asset = names[asset].as_str(),
                        value,
                        "return wipes out the position; paths drawing it end at or below zero"
                    );
                }
            }
            returns.extend_from_slice(row);
        }

        Ok(Self {
            names,
            num_periods: periods.len(),
            returns,
        })
    }

    /// Create a pool from unlabelled period rows.
    pub fn from_rows(periods: Vec<Vec<f64>>) -> Result<Self, ConfigError> {
        let num_assets = periods.first().map_or(0, Vec::len);
        let names = (0..num_assets).map(|i| format!("asset_{i}")).collect();
        Self::new(names, periods)
    }

    /// Number of historical periods (rows).
    #[must_use]
    pub fn num_periods(&self) -> usize {
        self.num_periods
    }

    /// Number of assets (columns).
    #[must_use]
    pub fn num_assets(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Return for `period` and `asset`, or `None` when out of range.
    #[must_use]
    pub fn get(&self, period: usize, asset: usize) -> Option<f64> {
        if period >= self.num_periods || asset >= self.num_assets() {
            return None;
        }
        Some(self.value(period, asset))
    }

    #[inline]
    pub(crate) fn value(&self, period: usize, asset: usize) -> f64 {
        self.returns[period * self.names.len() + asset]
    }

    /// Iterate over period rows.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.returns.chunks_exact(self.names.len())
    }

    /// Iterate over one asset's historical series.
    pub fn column(&self, asset: usize) -> impl Iterator<Item = f64> + '_ {
        self.returns
            .iter()
            .skip(asset)
            .step_by(self.names.len())
            .copied()
    }

    /// Compute basic statistics of one asset's historical returns.
    #[must_use]
    pub fn asset_statistics(&self, asset: usize) -> Option<AssetStatistics> {
        if asset >= self.num_assets() {
            return None;
        }
        let n = self.num_periods as f64;
        let arithmetic_mean = self.column(asset).sum::<f64>() / n;

        // Geometric mean: (product of (1+r))^(1/n) - 1
        let product: f64 = self.column(asset).map(|r| 1.0 + r).product();
        let geometric_mean = product.powf(1.0 / n) - 1.0;

        let variance = self
            .column(asset)
            .map(|r| (r - arithmetic_mean).powi(2))
            .sum::<f64>()
            / n;

        Some(AssetStatistics {
            name: self.names[asset].clone(),
            arithmetic_mean,
            geometric_mean,
            std_dev: variance.sqrt(),
            min: self.column(asset).fold(f64::INFINITY, f64::min),
            max: self.column(asset).fold(f64::NEG_INFINITY, f64::max),
            periods: self.num_periods,
        })
    }
}

/// Basic statistics for one asset's historical returns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetStatistics {
    pub name: String,
    pub arithmetic_mean: f64,
    pub geometric_mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub periods: usize,
}
