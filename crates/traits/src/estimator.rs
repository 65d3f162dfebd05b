//! Exposure estimation trait definitions.

use sintra_primitives::{Exposure, VolatilityTriple};

use crate::Window;

/// Reasons a window yields no exposure estimate.
///
/// Neither stops a run: the affected record is marked undefined.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExposureError {
    /// Too few paired observations in the window.
    #[error("insufficient data: need at least {required} observations, got {actual}")]
    InsufficientData {
        /// Required number of observations.
        required: usize,
        /// Actual number of observations.
        actual: usize,
    },

    /// The market excess return does not vary inside the window.
    #[error("degenerate regression: market excess return has zero variance")]
    DegenerateRegression,
}

/// Fitted exposure together with the sample size it came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FittedExposure {
    /// Regression coefficients.
    pub exposure: Exposure,
    /// Number of paired observations used.
    pub sample_size: usize,
}

/// Estimates market exposure over a window.
pub trait ExposureModel: Send + Sync {
    /// Fit the exposure of the window's security to the market.
    ///
    /// # Errors
    /// Returns `ExposureError` when the window cannot support a fit.
    fn estimate(&self, window: &Window<'_>) -> Result<FittedExposure, ExposureError>;

    /// Decompose the window's volatility given its fitted beta.
    ///
    /// # Errors
    /// Returns `ExposureError` when the window cannot support the variances.
    fn decompose(&self, window: &Window<'_>, beta: f64)
    -> Result<VolatilityTriple, ExposureError>;
}
