//! Sort fields and portfolio record types.

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::Lookback;

/// A per-entity characteristic usable for sorting, averaging or weighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum Field {
    /// Raw return.
    #[display("ret")]
    Return,
    /// Return in excess of the risk-free rate.
    #[display("excess_stock")]
    ExcessReturn,
    /// Market capitalisation.
    #[display("mktcap")]
    MarketCap,
    /// Beta over a lookback.
    #[display("beta_{_0}")]
    Beta(Lookback),
    /// Alpha over a lookback.
    #[display("alpha_{_0}")]
    Alpha(Lookback),
    /// Total volatility over a lookback.
    #[display("tvol_{_0}")]
    TotalVolatility(Lookback),
    /// Systematic volatility over a lookback.
    #[display("svol_{_0}")]
    SystematicVolatility(Lookback),
    /// Idiosyncratic volatility over a lookback.
    #[display("ivol_{_0}")]
    IdiosyncraticVolatility(Lookback),
}

/// Portfolio weighting scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum Weighting {
    /// Arithmetic mean over bucket members.
    #[display("ew")]
    Equal,
    /// Weighted by the magnitude of the weighting field.
    #[display("vw")]
    Value,
}

/// Which aggregate of a [`PortfolioRecord`] to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortfolioField {
    /// Average return.
    Return,
    /// Average secondary characteristic.
    Secondary,
}

/// One bucket of a characteristic sort for one period.
///
/// Quintile 1 holds the lowest values of the sort field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PortfolioRecord {
    /// Evaluation period.
    pub period: i32,
    /// Bucket number, starting at 1.
    pub quintile: u8,
    /// Weighting scheme of the aggregates.
    pub weighting: Weighting,
    /// Number of entities assigned to the bucket.
    pub members: usize,
    /// Average return.
    pub mean_return: Option<f64>,
    /// Average secondary characteristic.
    pub mean_secondary: Option<f64>,
}

impl PortfolioRecord {
    /// Read one of the aggregates.
    #[must_use]
    pub const fn get(&self, field: PortfolioField) -> Option<f64> {
        match field {
            PortfolioField::Return => self.mean_return,
            PortfolioField::Secondary => self.mean_secondary,
        }
    }
}
