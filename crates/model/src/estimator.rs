//! Window-level exposure estimation and volatility decomposition.

use serde::{Deserialize, Serialize};
use sintra_math::{MathError, sample_std, simple_ols};
use sintra_primitives::{Exposure, VolatilityTriple};
use sintra_traits::{ExposureError, ExposureModel, FittedExposure, Window};

use crate::ModelError;

/// Configuration for the exposure estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Minimum number of paired observations for a window to be estimated.
    pub min_observations: usize,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self { min_observations: 3 }
    }
}

impl EstimatorConfig {
    /// Check the configuration.
    ///
    /// # Errors
    /// Returns `ModelError::InvalidConfig` if fewer than two observations are
    /// allowed, since sample variances need at least two.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.min_observations < 2 {
            return Err(ModelError::InvalidConfig(format!(
                "min_observations must be at least 2, got {}",
                self.min_observations
            )));
        }
        Ok(())
    }
}

/// Single-factor OLS exposure model.
///
/// Regresses the security excess return on the market excess return.
#[derive(Debug, Clone, Default)]
pub struct OlsExposureModel {
    config: EstimatorConfig,
}

impl OlsExposureModel {
    /// Create a model with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a model with a custom configuration.
    ///
    /// # Errors
    /// Returns `ModelError::InvalidConfig` if the configuration is invalid.
    pub fn with_config(config: EstimatorConfig) -> Result<Self, ModelError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    fn check_size(&self, window: &Window<'_>) -> Result<(), ExposureError> {
        let actual = window.len();
        if actual < self.config.min_observations {
            return Err(ExposureError::InsufficientData {
                required: self.config.min_observations,
                actual,
            });
        }
        Ok(())
    }
}

fn classify(err: MathError) -> ExposureError {
    match err {
        MathError::InsufficientData { required, actual } => {
            ExposureError::InsufficientData { required, actual }
        }
        _ => ExposureError::DegenerateRegression,
    }
}

impl ExposureModel for OlsExposureModel {
    fn estimate(&self, window: &Window<'_>) -> Result<FittedExposure, ExposureError> {
        self.check_size(window)?;

        let y = window.stock_excess();
        let x = window.market_excess();
        let fit = simple_ols(y.view(), x.view()).map_err(classify)?;

        Ok(FittedExposure {
            exposure: Exposure { beta: fit.slope, alpha: fit.intercept },
            sample_size: fit.n_obs(),
        })
    }

    fn decompose(
        &self,
        window: &Window<'_>,
        beta: f64,
    ) -> Result<VolatilityTriple, ExposureError> {
        self.check_size(window)?;
        if !beta.is_finite() {
            return Err(ExposureError::DegenerateRegression);
        }

        let stock = window.stock_excess();
        let market = window.market_excess();
        let residuals = &stock - &(&market * beta);

        let total = sample_std(stock.view()).map_err(classify)?;
        let market_std = sample_std(market.view()).map_err(classify)?;
        let idiosyncratic = sample_std(residuals.view()).map_err(classify)?;

        Ok(VolatilityTriple { total, systematic: beta * market_std, idiosyncratic })
    }
}
