use std::fmt;

use jiff::civil::Date;

/// Reasons a return pool or simulation configuration is rejected
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The pool has no asset columns
    NoAssets,
    /// The pool has no historical periods
    NoPeriods,
    /// A period row does not have one return per asset
    RaggedRow {
        period: usize,
        expected: usize,
        found: usize,
    },
    /// A return is NaN or infinite
    NonFiniteReturn {
        period: usize,
        asset: usize,
        value: f64,
    },
    /// Asset labels do not match the number of columns
    AssetCountMismatch { names: usize, columns: usize },
    ZeroPathCount,
    ZeroHorizon,
    /// A horizon in years does not fit in a count of months
    HorizonOverflow { years: usize },
    /// Initial amount must be finite and strictly positive
    InvalidInitialAmount(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NoAssets => write!(f, "return pool has no assets"),
            ConfigError::NoPeriods => write!(f, "return pool has no periods"),
            ConfigError::RaggedRow {
                period,
                expected,
                found,
            } => write!(
                f,
                "period {period} has {found} returns, expected one per asset ({expected})"
            ),
            ConfigError::NonFiniteReturn {
                period,
                asset,
                value,
            } => write!(
                f,
                "return at period {period}, asset {asset} is not finite ({value})"
            ),
            ConfigError::AssetCountMismatch { names, columns } => {
                write!(f, "{names} asset names given for {columns} return columns")
            }
            ConfigError::ZeroPathCount => write!(f, "path count must be at least 1"),
            ConfigError::ZeroHorizon => write!(f, "horizon must be at least 1 period"),
            ConfigError::HorizonOverflow { years } => {
                write!(f, "horizon of {years} years is too large to count in months")
            }
            ConfigError::InvalidInitialAmount(amount) => {
                write!(f, "initial amount must be positive and finite (got {amount})")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors surfaced by the projector and the statistics summarizer
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// Inputs were rejected before any sampling happened
    InvalidConfiguration(ConfigError),
    /// Statistics were requested over zero paths
    EmptyDistribution,
    /// Percentile outside of [0, 100]
    InvalidPercentile(f64),
    /// The run was cancelled through its progress handle
    Cancelled,
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::InvalidConfiguration(e) => write!(f, "invalid configuration: {e}"),
            SimulationError::EmptyDistribution => {
                write!(f, "cannot summarize an empty distribution")
            }
            SimulationError::InvalidPercentile(p) => {
                write!(f, "percentile {p} is outside of [0, 100]")
            }
            SimulationError::Cancelled => write!(f, "projection cancelled"),
        }
    }
}

impl std::error::Error for SimulationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimulationError::InvalidConfiguration(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for SimulationError {
    fn from(e: ConfigError) -> Self {
        SimulationError::InvalidConfiguration(e)
    }
}

/// Errors raised while turning price series into a return pool
#[derive(Debug, Clone, PartialEq)]
pub enum HistoryError {
    /// No price series were supplied
    NoSeries,
    /// A series has no price points
    EmptySeries { asset: String },
    /// The same asset name appears twice
    DuplicateAsset { asset: String },
    /// A close price is non-finite or not strictly positive
    InvalidPrice {
        asset: String,
        date: Date,
        close: f64,
    },
    /// No month has a defined return for every asset
    InsufficientHistory,
    /// The resampled returns did not form a valid pool
    Pool(ConfigError),
}

impl fmt::Display for HistoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryError::NoSeries => write!(f, "no price series supplied"),
            HistoryError::EmptySeries { asset } => write!(f, "price series {asset} is empty"),
            HistoryError::DuplicateAsset { asset } => {
                write!(f, "asset {asset} appears more than once")
            }
            HistoryError::InvalidPrice { asset, date, close } => {
                write!(f, "invalid close {close} for {asset} on {date}")
            }
            HistoryError::InsufficientHistory => write!(
                f,
                "not enough overlapping history to compute a single monthly return"
            ),
            HistoryError::Pool(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for HistoryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HistoryError::Pool(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for HistoryError {
    fn from(e: ConfigError) -> Self {
        HistoryError::Pool(e)
    }
}

pub type Result<T> = std::result::Result<T, SimulationError>;
