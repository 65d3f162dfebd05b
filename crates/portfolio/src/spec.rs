//! Sort request configuration.

use serde::{Deserialize, Serialize};
use sintra_primitives::{Field, Lookback};

use crate::PortfolioError;

/// Which fields to sort on, average and weight by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortSpec {
    /// Characteristic that defines the buckets.
    pub sort: Field,
    /// Field averaged as the bucket return.
    pub ret: Field,
    /// Second field averaged per bucket, usually the sort characteristic.
    pub secondary: Field,
    /// Field whose magnitude weights the value-weighted averages.
    pub weight: Field,
    /// Number of buckets.
    pub buckets: usize,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self::on(Field::Beta(Lookback::TWELVE))
    }
}

impl SortSpec {
    /// Quintile sort on `field`, averaging excess returns and `field` itself,
    /// weighted by market capitalisation.
    #[must_use]
    pub const fn on(field: Field) -> Self {
        Self {
            sort: field,
            ret: Field::ExcessReturn,
            secondary: field,
            weight: Field::MarketCap,
            buckets: 5,
        }
    }

    /// Check the configuration.
    ///
    /// # Errors
    /// Returns `PortfolioError::InvalidConfig` unless `1 <= buckets <= 255`.
    pub fn validate(&self) -> Result<(), PortfolioError> {
        if self.buckets == 0 || self.buckets > usize::from(u8::MAX) {
            return Err(PortfolioError::InvalidConfig(format!(
                "buckets must be between 1 and 255, got {}",
                self.buckets
            )));
        }
        Ok(())
    }
}
