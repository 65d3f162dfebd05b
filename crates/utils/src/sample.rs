//! Reproducible evaluation-set sampling.

use std::collections::BTreeMap;

use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};
use serde::{Deserialize, Serialize};
use sintra_primitives::{Industry, Observation};
use tracing::debug;

use crate::UtilsError;

/// Sampling settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Maximum observations drawn per (year, industry) group.
    pub per_group: usize,
    /// Random seed.
    pub seed: u64,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self { per_group: 10, seed: 42 }
    }
}

impl SamplingConfig {
    /// Check that the settings can draw anything.
    ///
    /// # Errors
    /// Returns `UtilsError::InvalidSampling` if `per_group` is zero.
    pub fn validate(&self) -> Result<(), UtilsError> {
        if self.per_group == 0 {
            return Err(UtilsError::InvalidSampling("per_group must be positive".to_string()));
        }
        Ok(())
    }

    /// Draw a sample with these settings.
    #[must_use]
    pub fn draw(&self, observations: &[Observation]) -> Vec<Observation> {
        sample_evaluation_set(observations, self.per_group, self.seed)
    }
}

/// Draw up to `per_group` observations without replacement from every
/// (year, industry) group.
///
/// Each group is put into (security, date) order and sampled with a fresh
/// generator seeded from `seed`, so the result depends only on the set of
/// observations and the seed. Output is sorted by year, industry, security
/// and date.
#[must_use]
pub fn sample_evaluation_set(
    observations: &[Observation],
    per_group: usize,
    seed: u64,
) -> Vec<Observation> {
    let mut groups: BTreeMap<(i32, Industry), Vec<&Observation>> = BTreeMap::new();
    for observation in observations {
        groups.entry((observation.year(), observation.industry)).or_default().push(observation);
    }

    let mut sample = Vec::new();
    for ((year, industry), mut members) in groups {
        members.sort_by(|a, b| a.security.cmp(&b.security).then(a.date.cmp(&b.date)));

        let mut rng = StdRng::seed_from_u64(seed);
        let take = per_group.min(members.len());
        let mut drawn: Vec<Observation> =
            members.choose_multiple(&mut rng, take).map(|o| (*o).clone()).collect();
        drawn.sort_by(|a, b| a.security.cmp(&b.security).then(a.date.cmp(&b.date)));

        debug!(year, %industry, available = members.len(), drawn = drawn.len(), "sampled group");
        sample.extend(drawn);
    }
    sample
}
