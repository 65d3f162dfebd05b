//! Example: Rolling betas and quintile sorts on a simulated panel
//!
//! This example demonstrates the sintra workflow without any input files:
//! 1. Simulating monthly excess returns for securities with known betas
//! 2. Drawing a seeded evaluation sample per year and industry
//! 3. Estimating 12/24/36 month betas and volatility components
//! 4. Sorting on beta and idiosyncratic volatility and printing spreads
//!
//! Run with: `cargo run --example beta_sorts --features full`

use rand::{Rng, SeedableRng, rngs::StdRng};
use rand_distr::{Distribution, Normal};
use sintra::{
    model::{ExposurePipeline, PanelIndex, attach_exposures, evaluation_keys},
    portfolio::{QuintileSorter, SortSpec, spread},
    primitives::{Date, Field, Industry, Lookback, Observation, PortfolioField, SecurityId, Weighting},
    report::describe_by_industry,
    utils::sample_evaluation_set,
};

// ============================================================================
// CONFIGURATION
// ============================================================================

const N_SECURITIES: i64 = 300;
const FIRST_YEAR: i32 = 2010;
const LAST_YEAR: i32 = 2019;
const PER_GROUP: usize = 25;
const SEED: u64 = 42;

// ============================================================================
// MAIN ENTRY POINT
// ============================================================================

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let panel = PanelIndex::new(simulate_panel()?);
    println!(
        "Simulated {} observations for {} securities",
        panel.len(),
        panel.n_securities()
    );

    let sample = sample_evaluation_set(panel.observations(), PER_GROUP, SEED);
    let records = ExposurePipeline::new().run(&panel, &evaluation_keys(&sample));
    let rows = attach_exposures(sample, &records);
    println!("Sampled {} rows, {} exposure records", rows.len(), records.len());

    println!("\n{:<40} {:>6} {:>8} {:>8}", "industry / lookback", "N", "mean", "std");
    for s in describe_by_industry(&rows, &Lookback::STANDARD) {
        println!(
            "{:<40} {:>6} {:>8} {:>8}",
            format!("{} / {}", s.industry, s.lookback),
            s.summary.count,
            fmt(s.summary.mean),
            fmt(s.summary.std)
        );
    }

    for field in [Field::Beta(Lookback::TWELVE), Field::IdiosyncraticVolatility(Lookback::TWELVE)] {
        let sorts = QuintileSorter::new(SortSpec::on(field))?.sort(&rows);
        println!("\nSort on {field}");
        for weighting in [Weighting::Equal, Weighting::Value] {
            println!(
                "  {weighting}: Q5-Q1 return {}",
                fmt(spread(sorts.records(weighting), PortfolioField::Return))
            );
        }
    }

    Ok(())
}

// ============================================================================
// SIMULATION
// ============================================================================

fn month_end(year: i32, month: u32) -> Option<Date> {
    let (y, m) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    Date::from_ymd_opt(y, m, 1)?.pred_opt()
}

fn simulate_panel() -> Result<Vec<Observation>, Box<dyn std::error::Error>> {
    let mut rng = StdRng::seed_from_u64(SEED);
    let market = Normal::new(0.006, 0.045)?;
    let noise = Normal::new(0.0, 0.06)?;

    let months: Vec<(Date, f64)> = (FIRST_YEAR..=LAST_YEAR)
        .flat_map(|y| (1..=12).map(move |m| (y, m)))
        .filter_map(|(y, m)| month_end(y, m))
        .map(|d| (d, market.sample(&mut rng)))
        .collect();

    let mut rows = Vec::with_capacity(months.len() * N_SECURITIES as usize);
    for security in 0..N_SECURITIES {
        let beta = rng.gen_range(0.3..1.8);
        let industry = Industry::ALL[security as usize % Industry::ALL.len()];
        let shares = rng.gen_range(1_000.0..100_000.0);
        let mut price: f64 = rng.gen_range(5.0..200.0);

        for &(date, mkt) in &months {
            let excess = beta * mkt + noise.sample(&mut rng);
            price *= 1.0 + excess;
            rows.push(Observation {
                security: SecurityId::new(security),
                date,
                ret: Some(excess + 0.002),
                excess_return: Some(excess),
                market_excess: Some(mkt),
                price,
                shares_outstanding: shares,
                industry,
            });
        }
    }
    Ok(rows)
}

fn fmt(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.4}"))
}
