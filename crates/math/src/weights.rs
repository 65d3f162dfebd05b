//! Weight generation functions.

use ndarray::{Array1, ArrayView1};

/// Normalise the magnitudes of `raw` so they sum to 1.
///
/// Each weight is `|raw_i| / sum(|raw|)`. When the magnitudes sum to zero (or
/// are not finite) every element receives `1 / n`, so a single element always
/// gets weight 1.
///
/// # Returns
/// Array of weights with the same length as `raw`; empty for empty input.
#[must_use]
pub fn magnitude_weights(raw: ArrayView1<'_, f64>) -> Array1<f64> {
    let n = raw.len();
    if n == 0 {
        return Array1::zeros(0);
    }

    let magnitudes = raw.mapv(f64::abs);
    let total: f64 = magnitudes.sum();

    if total > 0.0 && total.is_finite() {
        magnitudes / total
    } else {
        Array1::from_elem(n, 1.0 / n as f64)
    }
}

/// Weighted average of `values` with weights from [`magnitude_weights`].
///
/// `None` for empty input or mismatched lengths.
#[must_use]
pub fn weighted_mean(values: ArrayView1<'_, f64>, raw_weights: ArrayView1<'_, f64>) -> Option<f64> {
    if values.is_empty() || values.len() != raw_weights.len() {
        return None;
    }
    Some(magnitude_weights(raw_weights).dot(&values))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use ndarray::array;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(array![100.0, 200.0, 300.0, 400.0])]
    #[case(array![-100.0, 200.0, -300.0])]
    #[case(array![1e-9, 5e12])]
    #[case(array![0.0, 0.0, 0.0])]
    fn weights_sum_to_one(#[case] raw: Array1<f64>) {
        let weights = magnitude_weights(raw.view());
        assert_relative_eq!(weights.sum(), 1.0, epsilon = 1e-9);
        assert!(weights.iter().all(|&w| w >= 0.0));
    }

    #[test]
    fn negative_weights_use_magnitude() {
        let weights = magnitude_weights(array![-1.0, 3.0].view());
        assert_relative_eq!(weights[0], 0.25);
        assert_relative_eq!(weights[1], 0.75);
    }

    #[test]
    fn single_element_gets_full_weight() {
        assert_relative_eq!(magnitude_weights(array![42.0].view())[0], 1.0);
        assert_relative_eq!(magnitude_weights(array![0.0].view())[0], 1.0);
    }

    #[test]
    fn zero_total_falls_back_to_equal() {
        let weights = magnitude_weights(array![0.0, 0.0, 0.0, 0.0].view());
        assert!(weights.iter().all(|&w| (w - 0.25).abs() < 1e-12));
    }

    #[test]
    fn empty_input() {
        let raw: Array1<f64> = array![];
        assert!(magnitude_weights(raw.view()).is_empty());
        assert_eq!(weighted_mean(raw.view(), raw.view()), None);
    }

    #[test]
    fn weighted_mean_matches_manual() {
        let values = array![0.01, 0.03];
        let caps = array![100.0, 300.0];
        assert_relative_eq!(
            weighted_mean(values.view(), caps.view()).unwrap(),
            0.025,
            epsilon = 1e-12
        );
    }
}
