//! Error types for portfolio sorting.

/// Errors that can occur while configuring a sort.
///
/// Empty periods and missing buckets are not errors; they are skipped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortfolioError {
    /// Invalid sort configuration.
    #[error("invalid sort configuration: {0}")]
    InvalidConfig(String),
}
