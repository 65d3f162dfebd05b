//! Error types for data preparation.

/// Errors raised while preparing the raw panel.
#[derive(Debug, thiserror::Error)]
pub enum UtilsError {
    /// A required raw column is absent.
    #[error("missing column: {0}")]
    MissingColumn(String),

    /// Sampling settings that cannot produce an evaluation set.
    #[error("invalid sampling config: {0}")]
    InvalidSampling(String),

    /// Underlying polars failure.
    #[error(transparent)]
    Polars(#[from] polars::error::PolarsError),
}
