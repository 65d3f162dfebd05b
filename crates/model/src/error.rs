//! Error types for exposure estimation.

/// Errors that can occur while loading the panel or configuring estimation.
///
/// Windows that cannot be estimated are not errors; they produce undefined
/// records (see [`sintra_traits::ExposureError`]).
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// Polars error.
    #[error("data processing error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Missing required column.
    #[error("missing required column: {0}")]
    MissingColumn(String),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Null or unrepresentable value in a required column.
    #[error("invalid value in column {column} at row {row}")]
    InvalidValue {
        /// Column name.
        column: String,
        /// Row index.
        row: usize,
    },
}
