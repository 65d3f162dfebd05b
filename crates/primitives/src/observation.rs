//! Panel observation and lookback window types.

use chrono::{Datelike, Months};
use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::{Date, Industry, SecurityId};

/// One security-date row of the panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Security identifier.
    pub security: SecurityId,
    /// Observation date.
    pub date: Date,
    /// Raw (ex-dividend) return.
    pub ret: Option<f64>,
    /// Security return in excess of the risk-free rate.
    pub excess_return: Option<f64>,
    /// Market return in excess of the risk-free rate.
    pub market_excess: Option<f64>,
    /// Price. Negative values mark bid/ask midpoints and are kept as-is.
    pub price: f64,
    /// Shares outstanding.
    pub shares_outstanding: f64,
    /// Industry classification.
    pub industry: Industry,
}

impl Observation {
    /// Calendar year of the observation.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.date.year()
    }

    /// Market capitalisation, `|price| * shares_outstanding`.
    #[must_use]
    pub fn market_cap(&self) -> f64 {
        self.price.abs() * self.shares_outstanding
    }

    /// Both excess return series, if both are present.
    #[must_use]
    pub const fn excess_pair(&self) -> Option<(f64, f64)> {
        match (self.excess_return, self.market_excess) {
            (Some(stock), Some(market)) => Some((stock, market)),
            _ => None,
        }
    }
}

/// Length of a trailing estimation window in calendar months.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
)]
#[display("{months}m")]
pub struct Lookback {
    months: u32,
}

impl Lookback {
    /// Twelve months.
    pub const TWELVE: Self = Self::new(12);
    /// Twenty-four months.
    pub const TWENTY_FOUR: Self = Self::new(24);
    /// Thirty-six months.
    pub const THIRTY_SIX: Self = Self::new(36);
    /// The standard set of lookbacks.
    pub const STANDARD: [Self; 3] = [Self::TWELVE, Self::TWENTY_FOUR, Self::THIRTY_SIX];

    /// Create a lookback of `months` calendar months.
    #[must_use]
    pub const fn new(months: u32) -> Self {
        Self { months }
    }

    /// Number of months.
    #[must_use]
    pub const fn months(self) -> u32 {
        self.months
    }

    /// Exclusive lower bound of the window ending at `as_of`.
    ///
    /// Month arithmetic clamps to the end of shorter months, so
    /// 2020-03-31 minus one month is 2020-02-29.
    #[must_use]
    pub fn window_start(self, as_of: Date) -> Option<Date> {
        as_of.checked_sub_months(Months::new(self.months))
    }

    /// Column suffix used in reports, e.g. `beta_12m`.
    #[must_use]
    pub fn column(self, prefix: &str) -> String {
        format!("{prefix}_{self}")
    }
}
