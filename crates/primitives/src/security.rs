//! Security identifier types.

use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};

use crate::Date;

/// Unique identifier for a security (a CRSP `PERMNO`, for instance).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    From,
    Into,
    Serialize,
    Deserialize,
)]
pub struct SecurityId(pub i64);

impl SecurityId {
    /// Create a new security ID.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw integer value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

/// A (security, year) pair for which exposure records are requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EvaluationKey {
    /// Security being evaluated.
    pub security: SecurityId,
    /// Evaluation year.
    pub year: i32,
}

impl EvaluationKey {
    /// Create a new evaluation key.
    #[must_use]
    pub const fn new(security: SecurityId, year: i32) -> Self {
        Self { security, year }
    }

    /// The as-of date of the evaluation: December 31 of the year.
    ///
    /// Returns `None` only for years outside chrono's supported range.
    #[must_use]
    pub fn as_of(&self) -> Option<Date> {
        Date::from_ymd_opt(self.year, 12, 31)
    }
}
