//! Cleaning of coded numeric columns and SIC classification.

use polars::prelude::*;
use sintra_primitives::Industry;

use crate::UtilsError;

/// Parse a numeric string after stripping every character that is not a
/// digit, exponent marker, decimal point or sign.
///
/// Return files encode special cases with letters (`"C"`, `"B"`), which
/// become `None`.
#[must_use]
pub fn clean_numeric(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, 'e' | 'E' | '.' | '-' | '+'))
        .collect();
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Replace each named column with its cleaned `Float64` version.
///
/// # Errors
/// Returns `UtilsError::MissingColumn` if a column is absent and
/// `UtilsError::Polars` if it cannot be read as text.
pub fn clean_numeric_columns(mut df: DataFrame, columns: &[&str]) -> Result<DataFrame, UtilsError> {
    for &name in columns {
        let values: Vec<Option<f64>> =
            text_column(&df, name)?.into_iter().map(|v| v.and_then(clean_numeric)).collect();
        df.with_column(Series::new(name.into(), values))?;
    }
    Ok(df)
}

/// Add an `output` column holding the industry label of each SIC code in
/// `sic`. Missing codes are classified as "Other".
///
/// # Errors
/// Returns `UtilsError::MissingColumn` if `sic` is absent.
pub fn classify_industries(
    mut df: DataFrame,
    sic: &str,
    output: &str,
) -> Result<DataFrame, UtilsError> {
    let labels: Vec<&'static str> = text_column(&df, sic)?
        .into_iter()
        .map(|code| code.map_or(Industry::Other, Industry::from_sic).label())
        .collect();
    df.with_column(Series::new(output.into(), labels))?;
    Ok(df)
}

fn text_column(df: &DataFrame, name: &str) -> Result<StringChunked, UtilsError> {
    let column = df.column(name).map_err(|_| UtilsError::MissingColumn(name.to_string()))?;
    Ok(column.cast(&DataType::String)?.str()?.clone())
}
