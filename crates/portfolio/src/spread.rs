//! Top-minus-bottom quintile spreads.

use std::collections::BTreeMap;

use sintra_primitives::{PortfolioField, PortfolioRecord};
use tracing::debug;

/// Highest quintile of a five-bucket sort.
pub const TOP_QUINTILE: u8 = 5;
/// Lowest quintile.
pub const BOTTOM_QUINTILE: u8 = 1;

/// Per-period `high - low` differences of `field`.
///
/// Periods missing either bucket, or whose aggregate is undefined in either,
/// are left out.
#[must_use]
pub fn period_spreads(
    records: &[PortfolioRecord],
    field: PortfolioField,
    high: u8,
    low: u8,
) -> BTreeMap<i32, f64> {
    let mut legs: BTreeMap<i32, (Option<f64>, Option<f64>)> = BTreeMap::new();
    for record in records {
        let entry = legs.entry(record.period).or_default();
        if record.quintile == high {
            entry.0 = record.get(field);
        } else if record.quintile == low {
            entry.1 = record.get(field);
        }
    }

    legs.into_iter()
        .filter_map(|(period, legs)| match legs {
            (Some(h), Some(l)) => Some((period, h - l)),
            _ => {
                debug!(period, high, low, "missing bucket, period excluded from spread");
                None
            }
        })
        .collect()
}

/// Mean over periods of the `high - low` difference of `field`.
///
/// `None` if no period has both buckets.
#[must_use]
pub fn spread_between(
    records: &[PortfolioRecord],
    field: PortfolioField,
    high: u8,
    low: u8,
) -> Option<f64> {
    let spreads = period_spreads(records, field, high, low);
    if spreads.is_empty() {
        return None;
    }
    Some(spreads.values().sum::<f64>() / spreads.len() as f64)
}

/// Mean over periods of quintile 5 minus quintile 1.
#[must_use]
pub fn spread(records: &[PortfolioRecord], field: PortfolioField) -> Option<f64> {
    spread_between(records, field, TOP_QUINTILE, BOTTOM_QUINTILE)
}
