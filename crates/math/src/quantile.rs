//! Quantiles and quantile-based binning.

use ndarray::ArrayView1;

use crate::MathError;

/// Quantile of already sorted data using linear interpolation between the
/// closest ranks (position `q * (n - 1)`).
///
/// # Errors
/// Returns `MathError::InvalidQuantile` if `q` is outside `[0, 1]` and
/// `MathError::InsufficientData` for empty input.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> Result<f64, MathError> {
    if !(0.0..=1.0).contains(&q) {
        return Err(MathError::InvalidQuantile(q));
    }
    let n = sorted.len();
    if n == 0 {
        return Err(MathError::InsufficientData { required: 1, actual: 0 });
    }

    let pos = q * (n - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;

    Ok(if lo == hi { sorted[lo] } else { sorted[lo] + (sorted[hi] - sorted[lo]) * frac })
}

/// Finite values of `data`, sorted ascending.
#[must_use]
pub fn sorted_finite(data: ArrayView1<'_, f64>) -> Vec<f64> {
    let mut values: Vec<f64> = data.iter().copied().filter(|x| x.is_finite()).collect();
    values.sort_by(f64::total_cmp);
    values
}

/// Quantile of unsorted data; non-finite values are ignored.
///
/// # Errors
/// Same as [`quantile_sorted`].
pub fn quantile(data: ArrayView1<'_, f64>, q: f64) -> Result<f64, MathError> {
    quantile_sorted(&sorted_finite(data), q)
}

/// Quantile bin edges for `n_bins` equal-count bins.
///
/// Edges sit at the `0, 1/n, ..., 1` quantiles. Repeated edges are dropped,
/// so fewer than `n_bins` bins result when the data have heavy ties. The
/// returned vector is strictly increasing and has at least one element.
///
/// # Errors
/// Returns `MathError::InsufficientData` if `data` has no finite value or
/// `n_bins` is zero.
pub fn quantile_bin_edges(data: ArrayView1<'_, f64>, n_bins: usize) -> Result<Vec<f64>, MathError> {
    if n_bins == 0 {
        return Err(MathError::InsufficientData { required: 1, actual: 0 });
    }
    let sorted = sorted_finite(data);

    let mut edges = Vec::with_capacity(n_bins + 1);
    for i in 0..=n_bins {
        let edge = quantile_sorted(&sorted, i as f64 / n_bins as f64)?;
        if edges.last().is_none_or(|&last| edge > last) {
            edges.push(edge);
        }
    }
    Ok(edges)
}

/// Number of bins described by `edges`; a single collapsed edge is one bin.
#[must_use]
pub const fn bin_count(edges: &[f64]) -> usize {
    if edges.len() <= 1 { edges.len() } else { edges.len() - 1 }
}

/// Zero-based bin of `value` given edges from [`quantile_bin_edges`].
///
/// Bins are right-closed, `(e[i], e[i + 1]]`, with the first bin also closed
/// on the left, so a value equal to an interior edge lands in the lower bin.
/// Returns `None` for values outside the edge range or non-finite values.
#[must_use]
pub fn assign_bin(value: f64, edges: &[f64]) -> Option<usize> {
    let (&first, &last) = (edges.first()?, edges.last()?);
    if !value.is_finite() || value < first || value > last {
        return None;
    }
    if edges.len() == 1 {
        return Some(0);
    }
    let upper = &edges[1..];
    Some(upper.partition_point(|&e| e < value).min(upper.len() - 1))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use ndarray::array;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0.0, 1.0)]
    #[case(0.25, 2.0)]
    #[case(0.5, 3.0)]
    #[case(0.2, 1.8)]
    #[case(1.0, 5.0)]
    fn linear_interpolation(#[case] q: f64, #[case] expected: f64) {
        let data = array![5.0, 1.0, 3.0, 2.0, 4.0];
        assert_relative_eq!(quantile(data.view(), q).unwrap(), expected, epsilon = 1e-12);
    }

    #[test]
    fn invalid_quantile() {
        assert_eq!(quantile_sorted(&[1.0], 1.5), Err(MathError::InvalidQuantile(1.5)));
        assert!(quantile_sorted(&[], 0.5).is_err());
    }

    #[test]
    fn quintile_edges_for_distinct_values() {
        let data = array![1.0, 2.0, 3.0, 4.0, 5.0];
        let edges = quantile_bin_edges(data.view(), 5).unwrap();
        assert_eq!(edges.len(), 6);
        assert_relative_eq!(edges[1], 1.8, epsilon = 1e-12);
        assert_relative_eq!(edges[4], 4.2, epsilon = 1e-12);

        let bins: Vec<usize> = data.iter().map(|&v| assign_bin(v, &edges).unwrap()).collect();
        assert_eq!(bins, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn duplicate_edges_are_dropped() {
        let data = array![1.0, 1.0, 1.0, 1.0, 2.0];
        let edges = quantile_bin_edges(data.view(), 5).unwrap();
        // the 0%..60% quantiles are all 1.0
        assert_eq!(edges.len(), 3);
        assert_relative_eq!(edges[0], 1.0);
        assert_relative_eq!(edges[1], 1.2, epsilon = 1e-12);
        assert_relative_eq!(edges[2], 2.0);
        assert_eq!(bin_count(&edges), 2);
        assert_eq!(assign_bin(1.0, &edges), Some(0));
        assert_eq!(assign_bin(2.0, &edges), Some(1));
    }

    #[test]
    fn constant_data_collapses_to_one_bin() {
        let data = array![3.0, 3.0, 3.0];
        let edges = quantile_bin_edges(data.view(), 5).unwrap();
        assert_eq!(edges, vec![3.0]);
        assert_eq!(bin_count(&edges), 1);
        assert_eq!(assign_bin(3.0, &edges), Some(0));
        assert_eq!(assign_bin(4.0, &edges), None);
    }

    #[test]
    fn ties_on_edge_go_to_lower_bin() {
        let edges = vec![0.0, 1.0, 2.0];
        assert_eq!(assign_bin(1.0, &edges), Some(0));
        assert_eq!(assign_bin(1.0001, &edges), Some(1));
        assert_eq!(assign_bin(0.0, &edges), Some(0));
        assert_eq!(assign_bin(2.0, &edges), Some(1));
        assert_eq!(assign_bin(-0.1, &edges), None);
        assert_eq!(assign_bin(f64::NAN, &edges), None);
    }

    #[test]
    fn non_finite_values_are_ignored() {
        let data = array![f64::NAN, 1.0, 2.0, f64::INFINITY];
        assert_relative_eq!(quantile(data.view(), 1.0).unwrap(), 2.0);
    }

    #[test]
    fn empty_data_has_no_edges() {
        let data: ndarray::Array1<f64> = array![];
        assert!(quantile_bin_edges(data.view(), 5).is_err());
    }
}
