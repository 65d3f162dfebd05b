//! Descriptive statistics.

use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};
use sintra_math::{excess_kurtosis, mean, quantile_sorted, sample_std, skewness, sorted_finite};
use sintra_model::SampledRow;
use sintra_primitives::{Industry, Lookback};

/// Distribution summary of a sample.
///
/// Every statistic is `None` for an empty sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Number of finite values.
    pub count: usize,
    /// Mean.
    pub mean: Option<f64>,
    /// Sample standard deviation (N - 1).
    pub std: Option<f64>,
    /// Biased skewness; needs at least three values.
    pub skew: Option<f64>,
    /// Biased excess kurtosis; needs at least four values.
    pub kurtosis: Option<f64>,
    /// Minimum.
    pub min: Option<f64>,
    /// 1st percentile.
    pub p1: Option<f64>,
    /// 5th percentile.
    pub p5: Option<f64>,
    /// 25th percentile.
    pub p25: Option<f64>,
    /// Median.
    pub p50: Option<f64>,
    /// 75th percentile.
    pub p75: Option<f64>,
    /// 95th percentile.
    pub p95: Option<f64>,
    /// 99th percentile.
    pub p99: Option<f64>,
    /// Maximum.
    pub max: Option<f64>,
}

impl Summary {
    /// Column labels, in the order of [`Summary::values`].
    pub const LABELS: [&'static str; 14] = [
        "N", "mean", "std", "skew", "kurtosis", "min", "1%", "5%", "25%", "50%", "75%", "95%",
        "99%", "max",
    ];

    /// Statistics in the order of [`Summary::LABELS`], with the count as a float.
    #[must_use]
    pub fn values(&self) -> [Option<f64>; 14] {
        [
            Some(self.count as f64),
            self.mean,
            self.std,
            self.skew,
            self.kurtosis,
            self.min,
            self.p1,
            self.p5,
            self.p25,
            self.p50,
            self.p75,
            self.p95,
            self.p99,
            self.max,
        ]
    }
}

/// Summarise the finite values of `data`; NaN and infinities are ignored.
#[must_use]
pub fn describe(data: ArrayView1<'_, f64>) -> Summary {
    let sorted = sorted_finite(data);
    if sorted.is_empty() {
        return Summary::default();
    }
    let view = ArrayView1::from(sorted.as_slice());
    let pct = |q: f64| quantile_sorted(&sorted, q).ok();

    Summary {
        count: sorted.len(),
        mean: mean(view),
        std: sample_std(view).ok(),
        skew: skewness(view),
        kurtosis: excess_kurtosis(view),
        min: sorted.first().copied(),
        p1: pct(0.01),
        p5: pct(0.05),
        p25: pct(0.25),
        p50: pct(0.50),
        p75: pct(0.75),
        p95: pct(0.95),
        p99: pct(0.99),
        max: sorted.last().copied(),
    }
}

/// Beta summary of one industry and lookback.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndustrySummary {
    /// Industry.
    pub industry: Industry,
    /// Lookback of the summarised beta.
    pub lookback: Lookback,
    /// Statistics over rows with a defined beta.
    pub summary: Summary,
}

/// Beta summaries per industry present in `rows` and per lookback.
///
/// Output is ordered by industry, then by lookback as given. Undefined betas
/// are excluded from each summary.
#[must_use]
pub fn describe_by_industry(rows: &[SampledRow], lookbacks: &[Lookback]) -> Vec<IndustrySummary> {
    Industry::ALL
        .into_iter()
        .filter(|industry| rows.iter().any(|r| r.observation.industry == *industry))
        .flat_map(|industry| {
            lookbacks.iter().map(move |&lookback| {
                let betas: Vec<f64> = rows
                    .iter()
                    .filter(|r| r.observation.industry == industry)
                    .filter_map(|r| r.exposure(lookback)?.beta())
                    .collect();
                IndustrySummary {
                    industry,
                    lookback,
                    summary: describe(ArrayView1::from(betas.as_slice())),
                }
            })
        })
        .collect()
}
