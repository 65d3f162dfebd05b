//! Benchmarks for sintra-model window selection and exposure estimation.
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::{Rng, SeedableRng, rngs::StdRng};
use sintra_model::{ExposurePipeline, PanelIndex, PipelineConfig};
use sintra_primitives::{Date, EvaluationKey, Industry, Lookback, Observation, SecurityId};
use sintra_traits::WindowSelector;

fn month_end(year: i32, month: u32) -> Date {
    let (y, m) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    Date::from_ymd_opt(y, m, 1).and_then(|d| d.pred_opt()).unwrap()
}

fn random_panel(n_securities: i64, years: std::ops::RangeInclusive<i32>) -> PanelIndex {
    let mut rng = StdRng::seed_from_u64(7);
    let mut rows = Vec::new();
    for security in 0..n_securities {
        let beta = rng.gen_range(0.2..2.0);
        for year in years.clone() {
            for month in 1..=12 {
                let market = rng.r#gen::<f64>() * 0.1 - 0.05;
                let stock = beta * market + rng.r#gen::<f64>() * 0.04 - 0.02;
                rows.push(Observation {
                    security: SecurityId::new(security),
                    date: month_end(year, month),
                    ret: Some(stock),
                    excess_return: Some(stock),
                    market_excess: Some(market),
                    price: 10.0,
                    shares_outstanding: 1_000.0,
                    industry: Industry::Manufacturing,
                });
            }
        }
    }
    PanelIndex::new(rows)
}

fn keys(n_securities: i64, year: i32) -> Vec<EvaluationKey> {
    (0..n_securities).map(|s| EvaluationKey::new(SecurityId::new(s), year)).collect()
}

fn bench_window_selection(c: &mut Criterion) {
    let mut group = c.benchmark_group("window_selection");

    for n_securities in [100, 1_000, 5_000] {
        let panel = random_panel(n_securities, 2000..=2010);
        let as_of = Date::from_ymd_opt(2008, 12, 31).unwrap();

        group.throughput(Throughput::Elements(n_securities as u64));
        group.bench_with_input(
            BenchmarkId::new("n_securities", n_securities),
            &panel,
            |b, panel| {
                b.iter(|| {
                    (0..n_securities)
                        .map(|s| {
                            panel.select(SecurityId::new(s), black_box(as_of), Lookback::THIRTY_SIX).len()
                        })
                        .sum::<usize>()
                });
            },
        );
    }

    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("exposure_pipeline");
    group.sample_size(20);

    let n_securities = 2_000;
    let panel = random_panel(n_securities, 2005..=2010);
    let keys = keys(n_securities, 2010);

    for parallel in [false, true] {
        let pipeline =
            ExposurePipeline::with_config(PipelineConfig { parallel, ..PipelineConfig::default() })
                .unwrap();
        group.throughput(Throughput::Elements(keys.len() as u64));
        group.bench_with_input(BenchmarkId::new("parallel", parallel), &keys, |b, keys| {
            b.iter(|| pipeline.run(&panel, black_box(keys)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_window_selection, bench_pipeline);
criterion_main!(benches);
