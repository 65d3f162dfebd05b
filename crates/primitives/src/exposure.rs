//! Exposure and volatility record types.

use serde::{Deserialize, Serialize};

use crate::{EvaluationKey, Lookback, SecurityId};

/// Fitted single-factor regression coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Exposure {
    /// Slope on the market excess return.
    pub beta: f64,
    /// Intercept.
    pub alpha: f64,
}

/// Volatility decomposition over one estimation window.
///
/// The three components come from separate variance computations and are not
/// reconciled: `total² = systematic² + idiosyncratic²` holds only approximately.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolatilityTriple {
    /// Sample standard deviation of the security excess return.
    pub total: f64,
    /// Beta times the sample standard deviation of the market excess return.
    /// Carries the sign of beta.
    pub systematic: f64,
    /// Sample standard deviation of `stock - beta * market`.
    pub idiosyncratic: f64,
}

/// Exposure plus its volatility decomposition. Either both exist or neither.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowEstimate {
    /// Regression coefficients.
    pub exposure: Exposure,
    /// Volatility decomposition over the same window.
    pub volatility: VolatilityTriple,
}

/// Exposure estimates for one security, year and lookback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExposureRecord {
    key: EvaluationKey,
    lookback: Lookback,
    sample_size: usize,
    estimate: Option<WindowEstimate>,
}

impl ExposureRecord {
    /// Record for a window that could not be estimated.
    #[must_use]
    pub const fn undefined(key: EvaluationKey, lookback: Lookback, sample_size: usize) -> Self {
        Self { key, lookback, sample_size, estimate: None }
    }

    /// Record for a successfully estimated window.
    #[must_use]
    pub const fn defined(
        key: EvaluationKey,
        lookback: Lookback,
        sample_size: usize,
        estimate: WindowEstimate,
    ) -> Self {
        Self { key, lookback, sample_size, estimate: Some(estimate) }
    }

    /// Evaluation key.
    #[must_use]
    pub const fn key(&self) -> EvaluationKey {
        self.key
    }

    /// Security identifier.
    #[must_use]
    pub const fn security(&self) -> SecurityId {
        self.key.security
    }

    /// Evaluation year.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.key.year
    }

    /// Lookback length.
    #[must_use]
    pub const fn lookback(&self) -> Lookback {
        self.lookback
    }

    /// Number of paired observations in the window.
    #[must_use]
    pub const fn sample_size(&self) -> usize {
        self.sample_size
    }

    /// The full estimate, if defined.
    #[must_use]
    pub const fn estimate(&self) -> Option<&WindowEstimate> {
        self.estimate.as_ref()
    }

    /// Whether beta (and everything derived from it) is defined.
    #[must_use]
    pub const fn is_defined(&self) -> bool {
        self.estimate.is_some()
    }

    /// Beta.
    #[must_use]
    pub fn beta(&self) -> Option<f64> {
        self.estimate.map(|e| e.exposure.beta)
    }

    /// Alpha.
    #[must_use]
    pub fn alpha(&self) -> Option<f64> {
        self.estimate.map(|e| e.exposure.alpha)
    }

    /// Volatility decomposition.
    #[must_use]
    pub fn volatility(&self) -> Option<VolatilityTriple> {
        self.estimate.map(|e| e.volatility)
    }
}
