//! Flat exposure table.

use polars::prelude::*;
use sintra_model::SampledRow;
use sintra_primitives::{Field, Lookback};
use sintra_traits::CrossSectionEntity;

/// Security identifier column.
pub const PERMNO: &str = "permno";
/// Evaluation year column.
pub const YEAR: &str = "year";
/// Industry label column.
pub const INDUSTRY: &str = "industry";
/// Excess return column.
pub const EXCESS_STOCK: &str = "excess_stock";
/// Market capitalisation column.
pub const MARKET_CAP: &str = "mktcap";

/// The per-lookback exposure fields, in column order.
pub(crate) const fn exposure_fields(lookback: Lookback) -> [Field; 5] {
    [
        Field::Beta(lookback),
        Field::Alpha(lookback),
        Field::TotalVolatility(lookback),
        Field::SystematicVolatility(lookback),
        Field::IdiosyncraticVolatility(lookback),
    ]
}

/// The per-lookback volatility fields.
pub(crate) const fn volatility_fields(lookback: Lookback) -> [Field; 3] {
    [
        Field::TotalVolatility(lookback),
        Field::SystematicVolatility(lookback),
        Field::IdiosyncraticVolatility(lookback),
    ]
}

/// One row per sampled observation with its exposures as columns.
///
/// Columns are `permno`, `year`, `industry`, `excess_stock`, `mktcap`, then
/// `beta_Lm`, `alpha_Lm`, `tvol_Lm`, `svol_Lm` and `ivol_Lm` for every
/// lookback. Undefined exposures are null.
///
/// # Errors
/// Returns `ReportError::Polars` if the frame cannot be assembled.
pub fn exposure_frame(
    rows: &[SampledRow],
    lookbacks: &[Lookback],
) -> Result<DataFrame, crate::ReportError> {
    let field_column = |field: Field| -> Column {
        let values: Vec<Option<f64>> = rows.iter().map(|r| r.field(field)).collect();
        Series::new(field.to_string().into(), values).into_column()
    };

    let mut columns = vec![
        Series::new(
            PERMNO.into(),
            rows.iter().map(|r| r.observation.security.get()).collect::<Vec<i64>>(),
        )
        .into_column(),
        Series::new(YEAR.into(), rows.iter().map(|r| r.period()).collect::<Vec<i32>>())
            .into_column(),
        Series::new(
            INDUSTRY.into(),
            rows.iter().map(|r| r.observation.industry.label()).collect::<Vec<&str>>(),
        )
        .into_column(),
        field_column(Field::ExcessReturn),
        field_column(Field::MarketCap),
    ];
    for &lookback in lookbacks {
        columns.extend(exposure_fields(lookback).map(field_column));
    }

    Ok(DataFrame::new(columns)?)
}
