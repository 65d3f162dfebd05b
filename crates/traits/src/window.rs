//! Window selection trait definitions.

use ndarray::Array1;
use sintra_primitives::{Date, Lookback, Observation, SecurityId};

/// Observations of one security inside a trailing window, ordered by date.
///
/// Every row carries both excess return series.
#[derive(Debug, Clone)]
pub struct Window<'a> {
    /// Security the window belongs to.
    pub security: SecurityId,
    /// Inclusive upper bound of the window.
    pub as_of: Date,
    /// Window length.
    pub lookback: Lookback,
    rows: Vec<&'a Observation>,
}

impl<'a> Window<'a> {
    /// Build a window from rows, keeping only those with both excess returns.
    ///
    /// Rows must already be ordered by date.
    #[must_use]
    pub fn new(
        security: SecurityId,
        as_of: Date,
        lookback: Lookback,
        rows: impl IntoIterator<Item = &'a Observation>,
    ) -> Self {
        let rows = rows.into_iter().filter(|r| r.excess_pair().is_some()).collect();
        Self { security, as_of, lookback, rows }
    }

    /// Number of paired observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The rows, oldest first.
    #[must_use]
    pub fn rows(&self) -> &[&'a Observation] {
        &self.rows
    }

    /// Security excess returns (n,).
    #[must_use]
    pub fn stock_excess(&self) -> Array1<f64> {
        self.rows.iter().filter_map(|r| r.excess_return).collect()
    }

    /// Market excess returns (n,).
    #[must_use]
    pub fn market_excess(&self) -> Array1<f64> {
        self.rows.iter().filter_map(|r| r.market_excess).collect()
    }
}

/// Lookup of trailing windows for a security.
pub trait WindowSelector: Send + Sync {
    /// Observations of `security` dated strictly after `as_of - lookback` and
    /// on or before `as_of`, restricted to rows with both excess returns and
    /// ordered by date ascending.
    fn select(&self, security: SecurityId, as_of: Date, lookback: Lookback) -> Window<'_>;
}
