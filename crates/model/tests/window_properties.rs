//! Property tests for window selection and estimation.
//!
//! 1. Indexed window lookup agrees with a linear scan of the panel
//! 2. Windows never contain rows outside (as_of - lookback, as_of]
//! 3. Fitted beta recovers an exact linear relation

use proptest::prelude::*;
use sintra_model::{ExposurePipeline, PanelIndex};
use sintra_primitives::{Date, EvaluationKey, Industry, Lookback, Observation, SecurityId};
use sintra_traits::WindowSelector;

// ── Strategies ───────────────────────────────────────────────────────

fn arb_row() -> impl Strategy<Value = Observation> {
    (
        0_i64..4,
        0_i32..1_500,
        prop::option::weighted(0.9, -0.3..0.3_f64),
        prop::option::weighted(0.9, -0.2..0.2_f64),
    )
        .prop_map(|(security, offset, stock, market)| Observation {
            security: SecurityId::new(security),
            date: Date::from_num_days_from_ce_opt(736_330 + offset).unwrap(),
            ret: stock,
            excess_return: stock,
            market_excess: market,
            price: 10.0,
            shares_outstanding: 10.0,
            industry: Industry::Other,
        })
}

fn arb_lookback() -> impl Strategy<Value = Lookback> {
    prop_oneof![Just(Lookback::TWELVE), Just(Lookback::TWENTY_FOUR), Just(Lookback::THIRTY_SIX)]
}

fn linear_scan(
    rows: &[Observation],
    security: SecurityId,
    as_of: Date,
    lookback: Lookback,
) -> Vec<Date> {
    let lower = lookback.window_start(as_of).unwrap();
    let mut dates: Vec<Date> = rows
        .iter()
        .filter(|r| r.security == security)
        .filter(|r| r.date > lower && r.date <= as_of)
        .filter(|r| r.excess_return.is_some() && r.market_excess.is_some())
        .map(|r| r.date)
        .collect();
    dates.sort();
    dates
}

// ── 1 & 2. Window lookup ─────────────────────────────────────────────

proptest! {
    #[test]
    fn index_matches_linear_scan(
        rows in prop::collection::vec(arb_row(), 0..200),
        security in 0_i64..5,
        year in 2017_i32..2022,
        lookback in arb_lookback(),
    ) {
        let index = PanelIndex::new(rows.clone());
        let as_of = Date::from_ymd_opt(year, 12, 31).unwrap();
        let id = SecurityId::new(security);

        let window = index.select(id, as_of, lookback);
        let got: Vec<Date> = window.rows().iter().map(|r| r.date).collect();

        prop_assert_eq!(got, linear_scan(&rows, id, as_of, lookback));
    }

    #[test]
    fn window_rows_stay_in_bounds(
        rows in prop::collection::vec(arb_row(), 0..200),
        year in 2017_i32..2022,
        lookback in arb_lookback(),
    ) {
        let index = PanelIndex::new(rows);
        let as_of = Date::from_ymd_opt(year, 12, 31).unwrap();
        let lower = lookback.window_start(as_of).unwrap();

        for security in 0..4 {
            let window = index.select(SecurityId::new(security), as_of, lookback);
            prop_assert!(window.rows().iter().all(|r| r.date > lower && r.date <= as_of));
            prop_assert!(window.rows().windows(2).all(|w| w[0].date <= w[1].date));
        }
    }
}

// ── 3. Exact recovery ────────────────────────────────────────────────

proptest! {
    #[test]
    fn beta_recovers_linear_relation(
        beta in -3.0..3.0_f64,
        alpha in -0.01..0.01_f64,
        market in prop::collection::vec(-0.1..0.1_f64, 12),
    ) {
        let spread = market.iter().cloned().fold(f64::MIN, f64::max)
            - market.iter().cloned().fold(f64::MAX, f64::min);
        prop_assume!(spread > 1e-3);

        let rows: Vec<Observation> = market
            .iter()
            .enumerate()
            .map(|(i, &m)| Observation {
                security: SecurityId::new(1),
                date: Date::from_ymd_opt(2020, i as u32 + 1, 15).unwrap(),
                ret: Some(alpha + beta * m),
                excess_return: Some(alpha + beta * m),
                market_excess: Some(m),
                price: 1.0,
                shares_outstanding: 1.0,
                industry: Industry::Other,
            })
            .collect();

        let index = PanelIndex::new(rows);
        let records = ExposurePipeline::new()
            .estimate_key(&index, EvaluationKey::new(SecurityId::new(1), 2020));

        for record in records {
            prop_assert_eq!(record.sample_size(), 12);
            prop_assert!((record.beta().unwrap() - beta).abs() < 1e-8);
            prop_assert!((record.alpha().unwrap() - alpha).abs() < 1e-8);
            prop_assert!(record.volatility().unwrap().idiosyncratic < 1e-8);
        }
    }
}
