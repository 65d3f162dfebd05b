//! Sample moments.

use ndarray::ArrayView1;

use crate::MathError;

/// Arithmetic mean, `None` for empty input.
#[must_use]
pub fn mean(data: ArrayView1<'_, f64>) -> Option<f64> {
    data.mean()
}

/// Sample variance with Bessel's correction (divides by `n - 1`).
///
/// # Errors
/// Returns `MathError::InsufficientData` for fewer than two observations and
/// `MathError::NumericalInstability` if the data contain NaN or Inf.
pub fn sample_variance(data: ArrayView1<'_, f64>) -> Result<f64, MathError> {
    let n = data.len();
    if n < 2 {
        return Err(MathError::InsufficientData { required: 2, actual: n });
    }
    let mean = data.sum() / n as f64;
    let ss: f64 = data.iter().map(|x| (x - mean).powi(2)).sum();
    let variance = ss / (n - 1) as f64;
    if variance.is_finite() {
        Ok(variance)
    } else {
        Err(MathError::NumericalInstability("non-finite variance".to_string()))
    }
}

/// Sample standard deviation, the square root of [`sample_variance`].
///
/// # Errors
/// Same as [`sample_variance`].
pub fn sample_std(data: ArrayView1<'_, f64>) -> Result<f64, MathError> {
    sample_variance(data).map(f64::sqrt)
}

fn central_moments(data: ArrayView1<'_, f64>) -> (f64, f64, f64) {
    let n = data.len() as f64;
    let mean = data.sum() / n;
    let (m2, m3, m4) = data.iter().fold((0.0, 0.0, 0.0), |(m2, m3, m4), x| {
        let d = x - mean;
        let d2 = d * d;
        (m2 + d2, m3 + d2 * d, m4 + d2 * d2)
    });
    (m2 / n, m3 / n, m4 / n)
}

/// Biased (population) skewness, `m3 / m2^1.5`.
///
/// `None` when there are fewer than three observations or no dispersion.
#[must_use]
pub fn skewness(data: ArrayView1<'_, f64>) -> Option<f64> {
    if data.len() < 3 {
        return None;
    }
    let (m2, m3, _) = central_moments(data);
    (m2 > 0.0).then(|| m3 / m2.powf(1.5))
}

/// Biased Fisher (excess) kurtosis, `m4 / m2^2 - 3`.
///
/// `None` when there are fewer than four observations or no dispersion.
#[must_use]
pub fn excess_kurtosis(data: ArrayView1<'_, f64>) -> Option<f64> {
    if data.len() < 4 {
        return None;
    }
    let (m2, _, m4) = central_moments(data);
    (m2 > 0.0).then(|| m4 / (m2 * m2) - 3.0)
}
