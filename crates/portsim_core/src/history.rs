//! Building a monthly return pool from raw price history
//!
//! Prices are sampled at each calendar month end with forward fill, turned
//! into month-over-month percentage changes, and every month where any asset
//! lacks a defined return is dropped (this always includes the first month).

use std::collections::HashSet;

use jiff::ToSpan;
use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::error::HistoryError;
use crate::model::ReturnPool;

/// A single observed closing price
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: Date,
    pub close: f64,
}

/// Observed prices for one asset, in any order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    pub asset: String,
    pub points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(asset: impl Into<String>, points: Vec<PricePoint>) -> Self {
        Self {
            asset: asset.into(),
            points,
        }
    }

    /// Build a series from `(date, close)` pairs.
    pub fn from_closes(
        asset: impl Into<String>,
        closes: impl IntoIterator<Item = (Date, f64)>,
    ) -> Self {
        Self::new(
            asset,
            closes
                .into_iter()
                .map(|(date, close)| PricePoint { date, close })
                .collect(),
        )
    }
}

/// Price history for a basket of assets
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceHistory {
    pub series: Vec<PriceSeries>,
    /// Only use prices from the trailing window ending at the latest observation
    #[serde(default)]
    pub lookback_years: Option<u16>,
}

type MonthKey = (i16, i8);

fn month_key(date: Date) -> MonthKey {
    (date.year(), date.month())
}

/// Every calendar month from `first` to `last`, inclusive.
fn months_between(first: MonthKey, last: MonthKey) -> Vec<MonthKey> {
    let mut months = Vec::new();
    let (mut year, mut month) = first;
    while (year, month) <= last {
        months.push((year, month));
        if month == 12 {
            year += 1;
            month = 1;
        } else {
            month += 1;
        }
    }
    months
}

impl PriceHistory {
    pub fn new(series: Vec<PriceSeries>) -> Self {
        Self {
            series,
            lookback_years: None,
        }
    }

    #[must_use]
    pub fn with_lookback_years(mut self, years: u16) -> Self {
        self.lookback_years = Some(years);
        self
    }

    fn validate(&self) -> Result<(), HistoryError> {
        if self.series.is_empty() {
            return Err(HistoryError::NoSeries);
        }
        let mut seen = HashSet::new();
        for series in &self.series {
            if !seen.insert(series.asset.as_str()) {
                return Err(HistoryError::DuplicateAsset {
                    asset: series.asset.clone(),
                });
            }
            if series.points.is_empty() {
                return Err(HistoryError::EmptySeries {
                    asset: series.asset.clone(),
                });
            }
            if let Some(bad) = series
                .points
                .iter()
                .find(|p| !(p.close.is_finite() && p.close > 0.0))
            {
                return Err(HistoryError::InvalidPrice {
                    asset: series.asset.clone(),
                    date: bad.date,
                    close: bad.close,
                });
            }
        }
        Ok(())
    }

    /// Latest observation date across all series.
    fn latest_date(&self) -> Option<Date> {
        self.series
            .iter()
            .flat_map(|s| s.points.iter().map(|p| p.date))
            .max()
    }

    /// Resample to month-end prices and compute the monthly return pool.
    pub fn monthly_returns(&self) -> Result<ReturnPool, HistoryError> {
        self.validate()?;

        let cutoff = match (self.lookback_years, self.latest_date()) {
            (Some(years), Some(latest)) => {
                Some(latest.saturating_sub(i64::from(years).years()))
            }
            _ => None,
        };

        let windowed: Vec<Vec<PricePoint>> = self
            .series
            .iter()
            .map(|series| {
                let mut points: Vec<PricePoint> = series
                    .points
                    .iter()
                    .filter(|p| cutoff.is_none_or(|c| p.date > c))
                    .copied()
                    .collect();
                points.sort_by_key(|p| p.date);
                points
            })
            .collect();

        let dates = windowed.iter().flatten().map(|p| p.date);
        let (Some(first), Some(last)) = (dates.clone().min(), dates.max()) else {
            return Err(HistoryError::InsufficientHistory);
        };
        let months = months_between(month_key(first), month_key(last));

        let month_ends: Vec<Vec<Option<f64>>> = windowed
            .iter()
            .map(|points| forward_filled_month_ends(points, &months))
            .collect();

        let rows: Vec<Vec<f64>> = (1..months.len())
            .filter_map(|m| {
                month_ends
                    .iter()
                    .map(|ends| match (ends[m - 1], ends[m]) {
                        (Some(previous), Some(current)) => Some(current / previous - 1.0),
                        _ => None,
                    })
                    .collect::<Option<Vec<f64>>>()
            })
            .collect();

        if rows.is_empty() {
            return Err(HistoryError::InsufficientHistory);
        }

        tracing::debug!(
            assets = self.series.len(),
            months = months.len(),
            periods = rows.len(),
            "resampled price history into monthly returns"
        );

        let names = self.series.iter().map(|s| s.asset.clone()).collect();
        Ok(ReturnPool::new(names, rows)?)
    }
}

/// Last close on or before each month's end; `None` before the first observation.
fn forward_filled_month_ends(points: &[PricePoint], months: &[MonthKey]) -> Vec<Option<f64>> {
    let mut ends = Vec::with_capacity(months.len());
    let mut current = None;
    let mut next = 0;
    for &month in months {
        while next < points.len() && month_key(points[next].date) <= month {
            current = Some(points[next].close);
            next += 1;
        }
        ends.push(current);
    }
    ends
}
