//! Column names of the raw monthly security file.

use serde::{Deserialize, Serialize};

/// Column names of the raw security file and the risk-free series.
///
/// Defaults follow the CRSP monthly stock file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawColumns {
    /// Observation date.
    pub date: String,
    /// Total return.
    pub ret: String,
    /// Return excluding dividends.
    pub retx: String,
    /// Value-weighted market return.
    pub market: String,
    /// Price.
    pub price: String,
    /// Shares outstanding.
    pub shares: String,
    /// SIC code.
    pub sic: String,
    /// Risk-free rate.
    pub rf: String,
}

impl Default for RawColumns {
    fn default() -> Self {
        Self {
            date: "date".to_string(),
            ret: "RET".to_string(),
            retx: "RETX".to_string(),
            market: "vwretd".to_string(),
            price: "PRC".to_string(),
            shares: "SHROUT".to_string(),
            sic: "SICCD".to_string(),
            rf: "rf".to_string(),
        }
    }
}
