//! Rolling beta analysis CLI tool.
//!
//! Estimates 12/24/36 month betas and volatility components for a sample of
//! securities, writes report tables and evaluates quintile sorts.
//!
//! Usage: `cargo run --features cli --bin analyze -- PANEL.csv RISK_FREE.csv [--out DIR]`
//! Example: `cargo run --features cli --bin analyze -- msf.csv dtb3.csv --seed 7`

use std::{
    fs::{self, File},
    path::{Path, PathBuf},
};

use clap::Parser;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use sintra::{
    model::{
        ExposurePipeline, PanelIndex, PanelSchema, PipelineConfig, SampledRow, attach_exposures,
        evaluation_keys,
    },
    portfolio::{QuintileSort, QuintileSorter, SortSpec, spread},
    primitives::{Field, Lookback, PortfolioField, PortfolioRecord, Weighting},
    report::{
        IndustrySummary, Summary, annual_stats, describe_by_industry, exposure_frame,
        missing_exposures, volatility_trends,
    },
    utils::{
        RawColumns, SamplingConfig, attach_risk_free, classify_industries, clean_numeric_columns,
        with_excess_returns,
    },
};
use tracing::info;
use tracing_subscriber::EnvFilter;

type BoxError = Box<dyn std::error::Error>;

/// Command line arguments.
#[derive(Debug, Parser)]
#[command(name = "analyze", about = "Rolling beta estimation and quintile sorts")]
struct Args {
    /// Monthly security file (CSV).
    panel: PathBuf,

    /// Risk-free rate series (CSV with date and rate columns).
    risk_free: PathBuf,

    /// JSON configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Sampling seed, overriding the configuration.
    #[arg(long)]
    seed: Option<u64>,

    /// Observations sampled per year and industry, overriding the configuration.
    #[arg(long)]
    sample_size: Option<usize>,

    /// Output directory for report tables.
    #[arg(long, default_value = "output")]
    out: PathBuf,
}

/// Full run configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
struct AnalyzeConfig {
    columns: RawColumns,
    schema: PanelSchema,
    sampling: SamplingConfig,
    pipeline: PipelineConfig,
    sorts: Vec<SortSpec>,
}

impl Default for AnalyzeConfig {
    fn default() -> Self {
        Self {
            columns: RawColumns::default(),
            schema: PanelSchema::default(),
            sampling: SamplingConfig::default(),
            pipeline: PipelineConfig::default(),
            sorts: vec![
                SortSpec::on(Field::Beta(Lookback::TWELVE)),
                SortSpec::on(Field::IdiosyncraticVolatility(Lookback::TWELVE)),
            ],
        }
    }
}

fn main() -> Result<(), BoxError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => serde_json::from_str::<AnalyzeConfig>(&fs::read_to_string(path)?)?,
        None => AnalyzeConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.sampling.seed = seed;
    }
    if let Some(per_group) = args.sample_size {
        config.sampling.per_group = per_group;
    }

    run(&args, &config)
}

fn run(args: &Args, config: &AnalyzeConfig) -> Result<(), BoxError> {
    config.sampling.validate()?;
    let panel = load_panel(&args.panel, &args.risk_free, config)?;
    info!(
        observations = panel.len(),
        securities = panel.n_securities(),
        "panel loaded"
    );

    let sample = config.sampling.draw(panel.observations());
    info!(sampled = sample.len(), seed = config.sampling.seed, "evaluation set drawn");

    let keys = evaluation_keys(&sample);
    let pipeline = ExposurePipeline::with_config(config.pipeline.clone())?;
    let records = pipeline.run(&panel, &keys);
    let rows = attach_exposures(sample, &records);

    fs::create_dir_all(&args.out)?;
    write_reports(&args.out, &rows, &config.pipeline.lookbacks)?;

    for spec in &config.sorts {
        let sorts = QuintileSorter::new(*spec)?.sort(&rows);
        write_csv(&args.out.join(format!("portfolios_{}.csv", spec.sort)), &mut portfolio_frame(&sorts)?)?;
        print_spreads(spec, &sorts);
    }

    info!(out = %args.out.display(), "reports written");
    Ok(())
}

/// Read, clean and index the monthly file.
fn load_panel(panel: &Path, risk_free: &Path, config: &AnalyzeConfig) -> Result<PanelIndex, BoxError> {
    let columns = &config.columns;

    let raw = read_csv(panel)?;
    let raw = clean_numeric_columns(raw, &[columns.ret.as_str(), columns.retx.as_str()])?;
    let raw = classify_industries(raw, &columns.sic, &config.schema.industry)?;
    let rf = read_csv(risk_free)?;

    let prepared = with_excess_returns(attach_risk_free(raw.lazy(), rf.lazy(), columns), columns)
        .collect()?;
    Ok(PanelIndex::from_frame(&prepared, &config.schema)?)
}

fn read_csv(path: &Path) -> Result<DataFrame, BoxError> {
    Ok(CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(10_000))
        .map_parse_options(|opts| opts.with_try_parse_dates(true))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?)
}

fn write_csv(path: &Path, df: &mut DataFrame) -> Result<(), BoxError> {
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file).include_header(true).finish(df)?;
    Ok(())
}

fn write_reports(out: &Path, rows: &[SampledRow], lookbacks: &[Lookback]) -> Result<(), BoxError> {
    let mut exposures = exposure_frame(rows, lookbacks)?;
    write_csv(&out.join("exposures.csv"), &mut exposures)?;
    write_csv(&out.join("descriptive_stats.csv"), &mut summary_frame(&describe_by_industry(rows, lookbacks))?)?;
    write_csv(&out.join("annual_stats.csv"), &mut annual_stats(&exposures, lookbacks)?)?;
    write_csv(&out.join("missing_betas.csv"), &mut missing_exposures(&exposures, lookbacks)?)?;
    write_csv(&out.join("volatility_trends.csv"), &mut volatility_trends(&exposures, lookbacks)?)?;
    Ok(())
}

fn summary_frame(summaries: &[IndustrySummary]) -> PolarsResult<DataFrame> {
    let mut columns = vec![
        Column::new(
            "industry".into(),
            summaries.iter().map(|s| s.industry.label()).collect::<Vec<_>>(),
        ),
        Column::new(
            "beta_period".into(),
            summaries.iter().map(|s| Field::Beta(s.lookback).to_string()).collect::<Vec<_>>(),
        ),
    ];
    for (i, label) in Summary::LABELS.iter().enumerate() {
        let values: Vec<Option<f64>> = summaries.iter().map(|s| s.summary.values()[i]).collect();
        columns.push(Column::new((*label).into(), values));
    }
    DataFrame::new(columns)
}

fn portfolio_frame(sorts: &QuintileSort) -> PolarsResult<DataFrame> {
    let records: Vec<&PortfolioRecord> =
        sorts.equal_weighted.iter().chain(&sorts.value_weighted).collect();
    DataFrame::new(vec![
        Column::new("period".into(), records.iter().map(|r| r.period).collect::<Vec<_>>()),
        Column::new(
            "quintile".into(),
            records.iter().map(|r| u32::from(r.quintile)).collect::<Vec<_>>(),
        ),
        Column::new(
            "weighting".into(),
            records.iter().map(|r| r.weighting.to_string()).collect::<Vec<_>>(),
        ),
        Column::new(
            "members".into(),
            records.iter().map(|r| r.members as u64).collect::<Vec<_>>(),
        ),
        Column::new("mean_return".into(), records.iter().map(|r| r.mean_return).collect::<Vec<_>>()),
        Column::new(
            "mean_secondary".into(),
            records.iter().map(|r| r.mean_secondary).collect::<Vec<_>>(),
        ),
    ])
}

fn print_spreads(spec: &SortSpec, sorts: &QuintileSort) {
    let fmt = |v: Option<f64>| v.map_or_else(|| "undefined".to_string(), |v| format!("{v:.6}"));

    println!("\nSort on {}", spec.sort);
    for weighting in [Weighting::Equal, Weighting::Value] {
        let records = sorts.records(weighting);
        println!(
            "  {weighting}: Q5-Q1 return {}  Q5-Q1 {} {}",
            fmt(spread(records, PortfolioField::Return)),
            spec.secondary,
            fmt(spread(records, PortfolioField::Secondary)),
        );
    }
}
