//! Error types for mathematical operations.

/// Errors that can occur during mathematical operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MathError {
    /// Invalid quantile level.
    #[error("invalid quantile: {0} (must be in [0, 1])")]
    InvalidQuantile(f64),

    /// Dimension mismatch.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Actual dimension.
        actual: usize,
    },

    /// Too few observations for the statistic.
    #[error("insufficient data: need at least {required} observations, got {actual}")]
    InsufficientData {
        /// Required number of observations.
        required: usize,
        /// Actual number of observations.
        actual: usize,
    },

    /// The regressor has no variation.
    #[error("degenerate regressor: zero variance")]
    ZeroVariance,

    /// Numerical instability (NaN or Inf).
    #[error("numerical instability: {0}")]
    NumericalInstability(String),
}
