//! Per-period quintile sorting.

use std::collections::BTreeMap;

use ndarray::Array1;
use rayon::prelude::*;
use sintra_math::{assign_bin, mean, quantile_bin_edges, weighted_mean};
use sintra_primitives::{Field, PortfolioRecord, Weighting};
use sintra_traits::CrossSectionEntity;
use tracing::debug;

use crate::{PortfolioError, SortSpec};

/// Equal- and value-weighted bucket records of one sort.
///
/// Both sequences are ordered by period, then bucket.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuintileSort {
    /// Equal-weighted records.
    pub equal_weighted: Vec<PortfolioRecord>,
    /// Value-weighted records.
    pub value_weighted: Vec<PortfolioRecord>,
}

impl QuintileSort {
    /// Records of one weighting scheme.
    #[must_use]
    pub fn records(&self, weighting: Weighting) -> &[PortfolioRecord] {
        match weighting {
            Weighting::Equal => &self.equal_weighted,
            Weighting::Value => &self.value_weighted,
        }
    }

    /// Check if no period produced a bucket.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.equal_weighted.is_empty()
    }
}

/// Bucket numbers (starting at 1) for a cross-section of sort values.
///
/// Edges are the `0, 1/n, ..., 1` linear-interpolated quantiles with repeated
/// edges dropped, so heavy ties give fewer than `n_buckets` buckets and a
/// constant cross-section forms bucket 1 alone. A value equal to an interior
/// edge goes to the lower bucket. Non-finite values get `None`.
#[must_use]
pub fn assign_buckets(values: &[f64], n_buckets: usize) -> Vec<Option<u8>> {
    let finite: Array1<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    let Ok(edges) = quantile_bin_edges(finite.view(), n_buckets) else {
        return vec![None; values.len()];
    };

    values
        .iter()
        .map(|&v| assign_bin(v, &edges).and_then(|b| u8::try_from(b + 1).ok()))
        .collect()
}

/// Sorts cross-sections into quantile buckets period by period.
#[derive(Debug, Clone)]
pub struct QuintileSorter {
    spec: SortSpec,
    parallel: bool,
}

impl Default for QuintileSorter {
    fn default() -> Self {
        Self { spec: SortSpec::default(), parallel: true }
    }
}

impl QuintileSorter {
    /// Create a sorter for a sort request.
    ///
    /// # Errors
    /// Returns `PortfolioError::InvalidConfig` if the request is invalid.
    pub fn new(spec: SortSpec) -> Result<Self, PortfolioError> {
        spec.validate()?;
        Ok(Self { spec, parallel: true })
    }

    /// Enable or disable sorting periods in parallel.
    #[must_use]
    pub const fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Get the sort request.
    #[must_use]
    pub const fn spec(&self) -> &SortSpec {
        &self.spec
    }

    /// Sort every period of `entities`.
    ///
    /// Periods in which no entity has a sort value produce no records.
    pub fn sort<E: CrossSectionEntity>(&self, entities: &[E]) -> QuintileSort {
        let mut periods: BTreeMap<i32, Vec<&E>> = BTreeMap::new();
        for entity in entities {
            periods.entry(entity.period()).or_default().push(entity);
        }
        let periods: Vec<(i32, Vec<&E>)> = periods.into_iter().collect();

        let sorted: Vec<(Vec<PortfolioRecord>, Vec<PortfolioRecord>)> = if self.parallel {
            periods.par_iter().map(|(period, members)| self.sort_period(*period, members)).collect()
        } else {
            periods.iter().map(|(period, members)| self.sort_period(*period, members)).collect()
        };

        let mut out = QuintileSort::default();
        for (equal, value) in sorted {
            out.equal_weighted.extend(equal);
            out.value_weighted.extend(value);
        }
        out
    }

    fn sort_period<E: CrossSectionEntity>(
        &self,
        period: i32,
        members: &[&E],
    ) -> (Vec<PortfolioRecord>, Vec<PortfolioRecord>) {
        let spec = &self.spec;
        let candidates: Vec<(&E, f64)> = members
            .iter()
            .filter_map(|e| e.field(spec.sort).filter(|v| v.is_finite()).map(|v| (*e, v)))
            .collect();

        if candidates.is_empty() {
            debug!(period, field = %spec.sort, "no sort values, skipping period");
            return (Vec::new(), Vec::new());
        }

        let values: Vec<f64> = candidates.iter().map(|(_, v)| *v).collect();
        let labels = assign_buckets(&values, spec.buckets);

        let mut buckets: BTreeMap<u8, Vec<&E>> = BTreeMap::new();
        for ((entity, _), label) in candidates.iter().zip(labels) {
            if let Some(label) = label {
                buckets.entry(label).or_default().push(*entity);
            }
        }
        if buckets.len() < spec.buckets {
            debug!(
                period,
                formed = buckets.len(),
                requested = spec.buckets,
                "ties reduced bucket count"
            );
        }

        let mut equal = Vec::with_capacity(buckets.len());
        let mut value = Vec::with_capacity(buckets.len());
        for (quintile, bucket) in buckets {
            equal.push(PortfolioRecord {
                period,
                quintile,
                weighting: Weighting::Equal,
                members: bucket.len(),
                mean_return: equal_mean(&bucket, spec.ret),
                mean_secondary: equal_mean(&bucket, spec.secondary),
            });
            value.push(PortfolioRecord {
                period,
                quintile,
                weighting: Weighting::Value,
                members: bucket.len(),
                mean_return: value_mean(&bucket, spec.ret, spec.weight),
                mean_secondary: value_mean(&bucket, spec.secondary, spec.weight),
            });
        }
        (equal, value)
    }
}

fn equal_mean<E: CrossSectionEntity>(bucket: &[&E], field: Field) -> Option<f64> {
    let values: Array1<f64> =
        bucket.iter().filter_map(|e| e.field(field)).filter(|v| v.is_finite()).collect();
    mean(values.view())
}

/// Magnitude-weighted mean of `field` over members where both `field` and
/// `weight` are finite.
///
/// Weights are renormalised over those members rather than divided by the
/// whole bucket's total weight, so a member missing `field` does not pull
/// the mean toward zero.
fn value_mean<E: CrossSectionEntity>(bucket: &[&E], field: Field, weight: Field) -> Option<f64> {
    let (values, weights): (Vec<f64>, Vec<f64>) = bucket
        .iter()
        .filter_map(|e| Some((e.field(field)?, e.field(weight)?)))
        .filter(|(v, w)| v.is_finite() && w.is_finite())
        .unzip();
    weighted_mean(Array1::from(values).view(), Array1::from(weights).view())
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use rstest::rstest;

    use super::*;

    #[derive(Debug)]
    struct Entity {
        period: i32,
        beta: Option<f64>,
        ret: Option<f64>,
        cap: Option<f64>,
    }

    impl CrossSectionEntity for Entity {
        fn period(&self) -> i32 {
            self.period
        }

        fn field(&self, field: Field) -> Option<f64> {
            match field {
                Field::Beta(_) => self.beta,
                Field::ExcessReturn => self.ret,
                Field::MarketCap => self.cap,
                _ => None,
            }
        }
    }

    fn entity(period: i32, beta: f64, ret: f64, cap: f64) -> Entity {
        Entity { period, beta: Some(beta), ret: Some(ret), cap: Some(cap) }
    }

    #[rstest]
    #[case(vec![1.0, 2.0, 3.0, 4.0, 5.0], vec![1, 2, 3, 4, 5])]
    #[case(vec![5.0, 4.0, 3.0, 2.0, 1.0], vec![5, 4, 3, 2, 1])]
    #[case(vec![7.0; 5], vec![1; 5])]
    #[case(vec![1.0, 1.0, 1.0, 1.0, 2.0], vec![1, 1, 1, 1, 2])]
    fn bucket_assignment(#[case] values: Vec<f64>, #[case] expected: Vec<u8>) {
        let labels = assign_buckets(&values, 5);
        assert_eq!(labels, expected.into_iter().map(Some).collect::<Vec<_>>());
    }

    #[test]
    fn ten_values_two_per_bucket() {
        let values: Vec<f64> = (1..=10).map(f64::from).collect();
        let labels: Vec<u8> = assign_buckets(&values, 5).into_iter().flatten().collect();
        assert_eq!(labels, vec![1, 1, 2, 2, 3, 3, 4, 4, 5, 5]);
    }

    #[test]
    fn five_entities_five_quintiles() {
        let entities: Vec<Entity> =
            (1..=5).map(|i| entity(2010, f64::from(i), 0.01 * f64::from(i), 1.0)).collect();
        let result = QuintileSorter::default().sort(&entities);

        assert_eq!(result.equal_weighted.len(), 5);
        for (i, record) in result.equal_weighted.iter().enumerate() {
            assert_eq!(record.quintile as usize, i + 1);
            assert_eq!(record.members, 1);
            assert_eq!(record.mean_secondary, Some((i + 1) as f64));
        }
        assert_eq!(result.value_weighted[4].mean_return, Some(0.05));
    }

    #[test]
    fn constant_sort_field_forms_one_bucket() {
        let entities: Vec<Entity> = (0..5).map(|i| entity(2010, 1.0, f64::from(i), 1.0)).collect();
        let result = QuintileSorter::default().sort(&entities);

        assert_eq!(result.equal_weighted.len(), 1);
        assert_eq!(result.equal_weighted[0].quintile, 1);
        assert_eq!(result.equal_weighted[0].members, 5);
        assert_relative_eq!(result.equal_weighted[0].mean_return.unwrap(), 2.0);
    }

    #[test]
    fn missing_sort_values_are_dropped_and_empty_periods_skipped() {
        let mut entities: Vec<Entity> =
            (1..=5).map(|i| entity(2011, f64::from(i), 0.0, 1.0)).collect();
        entities.push(Entity { period: 2011, beta: None, ret: Some(9.0), cap: Some(1.0) });
        entities.push(Entity { period: 2010, beta: None, ret: Some(1.0), cap: Some(1.0) });

        let result = QuintileSorter::default().sort(&entities);
        assert!(result.equal_weighted.iter().all(|r| r.period == 2011));
        assert_eq!(result.equal_weighted.iter().map(|r| r.members).sum::<usize>(), 5);
    }

    #[test]
    fn value_weights_use_magnitudes() {
        // both land in bucket 1 of a two-bucket sort
        let entities = vec![
            entity(2010, 1.0, 0.10, -300.0),
            entity(2010, 1.0, 0.20, 100.0),
            entity(2010, 2.0, 0.00, 1.0),
            entity(2010, 3.0, 0.00, 1.0),
        ];
        let sorter = QuintileSorter::new(SortSpec { buckets: 2, ..SortSpec::default() }).unwrap();
        let result = sorter.sort(&entities);

        let vw = &result.value_weighted[0];
        assert_eq!(vw.members, 2);
        assert_relative_eq!(vw.mean_return.unwrap(), 0.75 * 0.10 + 0.25 * 0.20, epsilon = 1e-12);
        assert_relative_eq!(result.equal_weighted[0].mean_return.unwrap(), 0.15, epsilon = 1e-12);
    }

    #[test]
    fn value_weights_renormalise_over_members_with_returns() {
        let entities = vec![
            entity(2010, 1.0, 0.10, 100.0),
            Entity { period: 2010, beta: Some(1.0), ret: None, cap: Some(300.0) },
        ];
        let result = QuintileSorter::default().sort(&entities);

        let vw = &result.value_weighted[0];
        assert_eq!(vw.members, 2);
        assert_relative_eq!(vw.mean_return.unwrap(), 0.10, epsilon = 1e-12);
    }

    #[test]
    fn zero_total_weight_falls_back_to_equal() {
        let entities = vec![entity(2010, 1.0, 0.02, 0.0)];
        let result = QuintileSorter::default().sort(&entities);
        assert_eq!(result.value_weighted[0].mean_return, Some(0.02));
    }

    #[test]
    fn missing_returns_give_undefined_aggregates() {
        let entities = vec![Entity { period: 2010, beta: Some(1.0), ret: None, cap: Some(5.0) }];
        let result = QuintileSorter::default().sort(&entities);

        assert_eq!(result.equal_weighted[0].mean_return, None);
        assert_eq!(result.value_weighted[0].mean_return, None);
        assert_eq!(result.equal_weighted[0].mean_secondary, Some(1.0));
    }

    #[test]
    fn periods_are_ascending_and_parallel_matches_sequential() {
        let entities: Vec<Entity> = [2012, 2010, 2011]
            .into_iter()
            .flat_map(|p| {
                (0..12).map(move |i| {
                    let x = f64::from(i);
                    entity(p, x * 0.3, x * 0.01, 10.0 + x)
                })
            })
            .collect();

        let parallel = QuintileSorter::default().sort(&entities);
        let sequential = QuintileSorter::default().with_parallel(false).sort(&entities);

        assert_eq!(parallel, sequential);
        let periods: Vec<i32> = parallel.equal_weighted.iter().map(|r| r.period).collect();
        assert!(periods.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(parallel.records(Weighting::Value).len(), 15);
    }
}
