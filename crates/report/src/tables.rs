//! Aggregate report tables over an exposure frame.

use polars::prelude::*;
use sintra_primitives::{Field, Lookback};
use tracing::debug;

use crate::{
    INDUSTRY, ReportError, YEAR,
    frame::volatility_fields,
};

fn require(frame: &DataFrame, names: &[String]) -> Result<(), ReportError> {
    for name in names {
        if frame.column(name).is_err() {
            return Err(ReportError::MissingColumn(name.clone()));
        }
    }
    Ok(())
}

fn beta_columns(lookbacks: &[Lookback]) -> Vec<String> {
    lookbacks.iter().map(|&l| Field::Beta(l).to_string()).collect()
}

/// Mean and standard deviation of every beta column by year and industry.
///
/// Output columns are `year`, `industry`, then `beta_Lm_mean` and
/// `beta_Lm_std` per lookback, sorted by year and industry.
///
/// # Errors
/// Returns `ReportError::MissingColumn` if a required column is absent.
pub fn annual_stats(frame: &DataFrame, lookbacks: &[Lookback]) -> Result<DataFrame, ReportError> {
    let betas = beta_columns(lookbacks);
    require(frame, &[YEAR.to_string(), INDUSTRY.to_string()])?;
    require(frame, &betas)?;

    let aggs: Vec<Expr> = betas
        .iter()
        .flat_map(|c| {
            [
                col(c.as_str()).mean().alias(format!("{c}_mean")),
                col(c.as_str()).std(1).alias(format!("{c}_std")),
            ]
        })
        .collect();

    let stats = frame
        .clone()
        .lazy()
        .group_by([col(YEAR), col(INDUSTRY)])
        .agg(aggs)
        .sort([YEAR, INDUSTRY], SortMultipleOptions::default())
        .collect()?;
    debug!(groups = stats.height(), "annual beta statistics");
    Ok(stats)
}

/// Missing-beta tabulation by year, industry and beta column.
///
/// Output columns are `year`, `industry`, `beta_period`, `total_obs`,
/// `missing_count` and `missing_pct` (0 to 100).
///
/// # Errors
/// Returns `ReportError::MissingColumn` if a required column is absent.
pub fn missing_exposures(
    frame: &DataFrame,
    lookbacks: &[Lookback],
) -> Result<DataFrame, ReportError> {
    let betas = beta_columns(lookbacks);
    require(frame, &[YEAR.to_string(), INDUSTRY.to_string()])?;
    require(frame, &betas)?;

    let parts: Vec<LazyFrame> = betas
        .iter()
        .map(|c| {
            frame
                .clone()
                .lazy()
                .group_by([col(YEAR), col(INDUSTRY)])
                .agg([
                    len().cast(DataType::Int64).alias("total_obs"),
                    col(c.as_str()).null_count().cast(DataType::Int64).alias("missing_count"),
                ])
                .with_column(lit(c.clone()).alias("beta_period"))
        })
        .collect();
    if parts.is_empty() {
        return Ok(DataFrame::empty());
    }

    let pct = (col("missing_count").cast(DataType::Float64)
        / col("total_obs").cast(DataType::Float64))
        * lit(100.0);

    Ok(concat(parts, UnionArgs::default())?
        .with_column(pct.alias("missing_pct"))
        .select([
            col(YEAR),
            col(INDUSTRY),
            col("beta_period"),
            col("total_obs"),
            col("missing_count"),
            col("missing_pct"),
        ])
        .sort([YEAR, INDUSTRY, "beta_period"], SortMultipleOptions::default())
        .collect()?)
}

/// Mean of every volatility column by year.
///
/// Output columns are `year`, then `tvol_Lm`, `svol_Lm` and `ivol_Lm` per
/// lookback, sorted by year.
///
/// # Errors
/// Returns `ReportError::MissingColumn` if a required column is absent.
pub fn volatility_trends(
    frame: &DataFrame,
    lookbacks: &[Lookback],
) -> Result<DataFrame, ReportError> {
    let vols: Vec<String> = lookbacks
        .iter()
        .flat_map(|&l| volatility_fields(l).map(|f| f.to_string()))
        .collect();
    require(frame, &[YEAR.to_string()])?;
    require(frame, &vols)?;

    let aggs: Vec<Expr> = vols.iter().map(|c| col(c.as_str()).mean()).collect();
    Ok(frame
        .clone()
        .lazy()
        .group_by([col(YEAR)])
        .agg(aggs)
        .sort([YEAR], SortMultipleOptions::default())
        .collect()?)
}
