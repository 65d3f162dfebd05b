//! Error types for reporting.

/// Errors that can occur while building report tables.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// Polars error.
    #[error("data processing error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Missing required column.
    #[error("missing required column: {0}")]
    MissingColumn(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ReportError::MissingColumn("beta_12m".to_string());
        assert_eq!(err.to_string(), "missing required column: beta_12m");
    }
}
