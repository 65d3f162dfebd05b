//! Risk-free rate join and excess-return columns.

use polars::prelude::*;

use crate::RawColumns;

/// Name of the security excess return column.
pub(crate) const EXCESS_STOCK: &str = "excess_stock";
/// Name of the market excess return column.
pub(crate) const EXCESS_MARKET: &str = "excess_mkt";
/// Name of the market capitalisation column.
pub(crate) const MARKET_CAP: &str = "mktcap";

/// Attach the risk-free rate to the panel.
///
/// Left-joins `rf` (columns `columns.date` and `columns.rf`) on date, sorts
/// by date and forward fills the rate, so panel dates without a quote carry
/// the most recent earlier one.
pub fn attach_risk_free(panel: LazyFrame, rf: LazyFrame, columns: &RawColumns) -> LazyFrame {
    let date = columns.date.as_str();
    let rate = columns.rf.as_str();

    let rf = rf.select([col(date), col(rate).cast(DataType::Float64)]);
    let sort_options = SortMultipleOptions::new().with_maintain_order(true);

    panel
        .join(rf, [col(date)], [col(date)], JoinArgs::new(JoinType::Left))
        .sort([date], sort_options)
        .with_column(col(rate).forward_fill(None).alias(rate))
}

/// Add `excess_stock`, `excess_mkt` and `mktcap` columns.
///
/// `excess_stock = retx - rf`, `excess_mkt = market - rf` and
/// `mktcap = |price| * shares`. Nulls propagate.
pub fn with_excess_returns(panel: LazyFrame, columns: &RawColumns) -> LazyFrame {
    let rf = || col(columns.rf.as_str()).cast(DataType::Float64);

    panel.with_columns([
        (col(columns.retx.as_str()).cast(DataType::Float64) - rf()).alias(EXCESS_STOCK),
        (col(columns.market.as_str()).cast(DataType::Float64) - rf()).alias(EXCESS_MARKET),
        (col(columns.price.as_str()).cast(DataType::Float64).abs()
            * col(columns.shares.as_str()).cast(DataType::Float64))
        .alias(MARKET_CAP),
    ])
}

#[cfg(test)]
mod tests {
    use sintra_primitives::Date;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn risk_free_is_forward_filled() {
        let panel = df! {
            "PERMNO" => &[1_i64, 2, 1, 2],
            "date" => &[date(2020, 2, 28), date(2020, 1, 31), date(2020, 1, 31), date(2020, 2, 28)],
            "RETX" => &[0.02, 0.01, 0.03, -0.01],
        }
        .unwrap()
        .lazy();
        let rf = df! {
            "date" => &[date(2020, 1, 31)],
            "rf" => &[0.001],
        }
        .unwrap()
        .lazy();

        let result = attach_risk_free(panel, rf, &RawColumns::default())
            .sort(["PERMNO", "date"], SortMultipleOptions::default())
            .collect()
            .unwrap();

        assert_eq!(result.height(), 4);
        let permnos: Vec<Option<i64>> =
            result.column("PERMNO").unwrap().i64().unwrap().into_iter().collect();
        let rates: Vec<Option<f64>> =
            result.column("rf").unwrap().f64().unwrap().into_iter().collect();
        assert_eq!(permnos, vec![Some(1), Some(1), Some(2), Some(2)]);
        assert_eq!(rates, vec![Some(0.001); 4]);
    }

    #[test]
    fn excess_returns_and_market_cap() {
        let panel = df! {
            "PERMNO" => &[1_i64, 1],
            "date" => &[date(2020, 1, 31), date(2020, 2, 28)],
            "RETX" => &[Some(0.05), None],
            "vwretd" => &[0.02, 0.01],
            "rf" => &[0.01, 0.01],
            "PRC" => &[-25.0, 30.0],
            "SHROUT" => &[100.0, 100.0],
        }
        .unwrap()
        .lazy();

        let result = with_excess_returns(panel, &RawColumns::default()).collect().unwrap();

        let stock: Vec<Option<f64>> =
            result.column(EXCESS_STOCK).unwrap().f64().unwrap().into_iter().collect();
        let market: Vec<Option<f64>> =
            result.column(EXCESS_MARKET).unwrap().f64().unwrap().into_iter().collect();
        let caps: Vec<Option<f64>> =
            result.column(MARKET_CAP).unwrap().f64().unwrap().into_iter().collect();

        assert_eq!(stock, vec![Some(0.05 - 0.01), None]);
        assert_eq!(market, vec![Some(0.02 - 0.01), Some(0.01 - 0.01)]);
        assert_eq!(caps, vec![Some(2_500.0), Some(3_000.0)]);
    }
}
