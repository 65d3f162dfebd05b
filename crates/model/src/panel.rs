//! Panel store indexed for trailing-window queries.

use std::{collections::HashMap, ops::Range};

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use sintra_primitives::{Date, Industry, Lookback, Observation, SecurityId};
use sintra_traits::{Window, WindowSelector};

use crate::ModelError;

/// Days from 0001-01-01 (CE) to 1970-01-01, the origin of polars dates.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Column names of a prepared panel frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelSchema {
    /// Security identifier column (integer).
    pub security: String,
    /// Observation date column.
    pub date: String,
    /// Raw return column.
    pub ret: String,
    /// Security excess return column.
    pub excess_return: String,
    /// Market excess return column.
    pub market_excess: String,
    /// Price column.
    pub price: String,
    /// Shares outstanding column.
    pub shares_outstanding: String,
    /// Industry label (or SIC code) column.
    pub industry: String,
}

impl Default for PanelSchema {
    fn default() -> Self {
        Self {
            security: "PERMNO".to_string(),
            date: "date".to_string(),
            ret: "RETX".to_string(),
            excess_return: "excess_stock".to_string(),
            market_excess: "excess_mkt".to_string(),
            price: "PRC".to_string(),
            shares_outstanding: "SHROUT".to_string(),
            industry: "industry".to_string(),
        }
    }
}

/// Read-only panel of observations, sorted by security then date.
///
/// Each security's rows form one contiguous, date-ordered slice, so a window
/// lookup is two binary searches instead of a scan over the whole panel.
#[derive(Debug, Clone, Default)]
pub struct PanelIndex {
    observations: Vec<Observation>,
    ranges: HashMap<SecurityId, Range<usize>>,
}

impl PanelIndex {
    /// Build the index from observations in any order.
    #[must_use]
    pub fn new(mut observations: Vec<Observation>) -> Self {
        observations.sort_by(|a, b| a.security.cmp(&b.security).then(a.date.cmp(&b.date)));

        let mut ranges = HashMap::new();
        let mut start = 0;
        for i in 1..=observations.len() {
            if i == observations.len() || observations[i].security != observations[start].security
            {
                ranges.insert(observations[start].security, start..i);
                start = i;
            }
        }

        Self { observations, ranges }
    }

    /// Build the index from a prepared polars frame.
    ///
    /// Missing or non-finite returns become `None`; the security and date
    /// columns must be fully populated.
    ///
    /// # Errors
    /// Returns `ModelError::MissingColumn` if a schema column is absent,
    /// `ModelError::InvalidValue` for a null identifier or date, and
    /// `ModelError::Polars` if a column cannot be cast.
    pub fn from_frame(df: &DataFrame, schema: &PanelSchema) -> Result<Self, ModelError> {
        let securities = i64_column(df, &schema.security)?;
        let dates = date_column(df, &schema.date)?;
        let rets = f64_column(df, &schema.ret)?;
        let stock = f64_column(df, &schema.excess_return)?;
        let market = f64_column(df, &schema.market_excess)?;
        let prices = f64_column(df, &schema.price)?;
        let shares = f64_column(df, &schema.shares_outstanding)?;
        let industries = string_column(df, &schema.industry)?;

        let mut observations = Vec::with_capacity(df.height());
        for row in 0..df.height() {
            let security = securities[row].ok_or_else(|| ModelError::InvalidValue {
                column: schema.security.clone(),
                row,
            })?;
            let date = dates[row]
                .ok_or_else(|| ModelError::InvalidValue { column: schema.date.clone(), row })?;

            observations.push(Observation {
                security: SecurityId::new(security),
                date,
                ret: rets[row],
                excess_return: stock[row],
                market_excess: market[row],
                price: prices[row].unwrap_or(f64::NAN),
                shares_outstanding: shares[row].unwrap_or(f64::NAN),
                industry: industries[row]
                    .as_deref()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(Industry::Other),
            });
        }

        Ok(Self::new(observations))
    }

    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Number of distinct securities.
    #[must_use]
    pub fn n_securities(&self) -> usize {
        self.ranges.len()
    }

    /// All observations, sorted by security then date.
    #[must_use]
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Date-ordered history of one security.
    #[must_use]
    pub fn history(&self, security: SecurityId) -> &[Observation] {
        self.ranges.get(&security).map_or(&[], |r| &self.observations[r.clone()])
    }
}

impl WindowSelector for PanelIndex {
    fn select(&self, security: SecurityId, as_of: Date, lookback: Lookback) -> Window<'_> {
        let history = self.history(security);
        let end = history.partition_point(|o| o.date <= as_of);
        let start = lookback
            .window_start(as_of)
            .map_or(0, |lower| history[..end].partition_point(|o| o.date <= lower));

        Window::new(security, as_of, lookback, &history[start..end])
    }
}

fn column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column, ModelError> {
    df.column(name).map_err(|_| ModelError::MissingColumn(name.to_string()))
}

fn f64_column(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>, ModelError> {
    let casted = column(df, name)?.cast(&DataType::Float64)?;
    Ok(casted.f64()?.into_iter().map(|v| v.filter(|x| x.is_finite())).collect())
}

fn i64_column(df: &DataFrame, name: &str) -> Result<Vec<Option<i64>>, ModelError> {
    let casted = column(df, name)?.cast(&DataType::Int64)?;
    Ok(casted.i64()?.into_iter().collect())
}

fn string_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>, ModelError> {
    let casted = column(df, name)?.cast(&DataType::String)?;
    Ok(casted.str()?.into_iter().map(|s| s.map(str::to_string)).collect())
}

fn date_column(df: &DataFrame, name: &str) -> Result<Vec<Option<Date>>, ModelError> {
    let days = column(df, name)?.cast(&DataType::Date)?.cast(&DataType::Int32)?;
    Ok(days
        .i32()?
        .into_iter()
        .map(|d| d.and_then(|d| Date::from_num_days_from_ce_opt(d + UNIX_EPOCH_DAYS_FROM_CE)))
        .collect())
}
