//! Exposure estimation over many (security, year) keys and lookbacks.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use sintra_primitives::{EvaluationKey, ExposureRecord, Lookback, WindowEstimate};
use sintra_traits::{ExposureError, ExposureModel, WindowSelector};
use tracing::{debug, info};

use crate::{EstimatorConfig, ModelError, OlsExposureModel};

/// Configuration for the exposure pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Lookbacks to estimate, in output order.
    pub lookbacks: Vec<Lookback>,
    /// Estimator settings.
    pub estimator: EstimatorConfig,
    /// Estimate keys in parallel.
    pub parallel: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            lookbacks: Lookback::STANDARD.to_vec(),
            estimator: EstimatorConfig::default(),
            parallel: true,
        }
    }
}

impl PipelineConfig {
    /// Check the configuration.
    ///
    /// # Errors
    /// Returns `ModelError::InvalidConfig` for an empty lookback list, a
    /// zero-month lookback or an invalid estimator configuration.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.lookbacks.is_empty() {
            return Err(ModelError::InvalidConfig("no lookbacks configured".to_string()));
        }
        if let Some(bad) = self.lookbacks.iter().find(|l| l.months() == 0) {
            return Err(ModelError::InvalidConfig(format!("lookback must be positive, got {bad}")));
        }
        self.estimator.validate()
    }
}

/// Runs an exposure model over every key and lookback.
#[derive(Debug, Clone)]
pub struct ExposurePipeline<M = OlsExposureModel> {
    model: M,
    config: PipelineConfig,
}

impl ExposurePipeline<OlsExposureModel> {
    /// Pipeline with the OLS model and default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self { model: OlsExposureModel::new(), config: PipelineConfig::default() }
    }

    /// Pipeline with the OLS model and a custom configuration.
    ///
    /// # Errors
    /// Returns `ModelError::InvalidConfig` if the configuration is invalid.
    pub fn with_config(config: PipelineConfig) -> Result<Self, ModelError> {
        config.validate()?;
        let model = OlsExposureModel::with_config(config.estimator)?;
        Ok(Self { model, config })
    }
}

impl Default for ExposurePipeline<OlsExposureModel> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: ExposureModel> ExposurePipeline<M> {
    /// Pipeline around any exposure model.
    ///
    /// # Errors
    /// Returns `ModelError::InvalidConfig` if the configuration is invalid.
    pub fn with_model(model: M, config: PipelineConfig) -> Result<Self, ModelError> {
        config.validate()?;
        Ok(Self { model, config })
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Estimate every lookback for every key.
    ///
    /// Output is grouped by key in input order, then by lookback in
    /// configuration order, regardless of whether the work ran in parallel.
    /// Windows that cannot be estimated yield undefined records.
    pub fn run<S: WindowSelector>(&self, selector: &S, keys: &[EvaluationKey]) -> Vec<ExposureRecord> {
        info!(
            keys = keys.len(),
            lookbacks = self.config.lookbacks.len(),
            parallel = self.config.parallel,
            "estimating exposures"
        );

        let records: Vec<ExposureRecord> = if self.config.parallel {
            keys.par_iter().flat_map_iter(|key| self.estimate_key(selector, *key)).collect()
        } else {
            keys.iter().flat_map(|key| self.estimate_key(selector, *key)).collect()
        };

        let defined = records.iter().filter(|r| r.is_defined()).count();
        info!(records = records.len(), defined, "exposure estimation finished");
        records
    }

    /// Estimate every lookback for a single key.
    pub fn estimate_key<S: WindowSelector>(
        &self,
        selector: &S,
        key: EvaluationKey,
    ) -> Vec<ExposureRecord> {
        self.config.lookbacks.iter().map(|&lookback| self.estimate_one(selector, key, lookback)).collect()
    }

    fn estimate_one<S: WindowSelector>(
        &self,
        selector: &S,
        key: EvaluationKey,
        lookback: Lookback,
    ) -> ExposureRecord {
        let Some(as_of) = key.as_of() else {
            debug!(security = %key.security, year = key.year, "no representable as-of date");
            return ExposureRecord::undefined(key, lookback, 0);
        };

        let window = selector.select(key.security, as_of, lookback);
        let n = window.len();

        let estimate = self.model.estimate(&window).and_then(|fitted| {
            let volatility = self.model.decompose(&window, fitted.exposure.beta)?;
            Ok(WindowEstimate { exposure: fitted.exposure, volatility })
        });

        match estimate {
            Ok(estimate) => ExposureRecord::defined(key, lookback, n, estimate),
            Err(err) => {
                log_undefined(key, lookback, &err);
                ExposureRecord::undefined(key, lookback, n)
            }
        }
    }
}

fn log_undefined(key: EvaluationKey, lookback: Lookback, err: &ExposureError) {
    debug!(security = %key.security, year = key.year, %lookback, %err, "exposure undefined");
}
