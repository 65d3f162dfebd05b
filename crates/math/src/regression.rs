//! Single-regressor least squares.

use ndarray::{Array1, ArrayView1};

use crate::MathError;

/// Relative threshold below which the regressor is treated as constant.
///
/// Compared against `Sxx / sum(x^2)` so the test is scale free.
pub const DEGENERATE_TOLERANCE: f64 = 1e-12;

/// Result of an ordinary least squares fit `y = intercept + slope * x + e`.
#[derive(Debug, Clone)]
pub struct OlsFit {
    /// Fitted slope.
    pub slope: f64,
    /// Fitted intercept.
    pub intercept: f64,
    /// Residuals `y - intercept - slope * x`.
    pub residuals: Array1<f64>,
    /// R-squared.
    pub r_squared: f64,
}

impl OlsFit {
    /// Number of observations in the fit.
    #[must_use]
    pub fn n_obs(&self) -> usize {
        self.residuals.len()
    }
}

/// Fit `y` on a constant and `x` by ordinary least squares.
///
/// Uses centred cross products, `slope = Sxy / Sxx`, which avoids forming and
/// inverting the 2x2 normal matrix.
///
/// # Arguments
/// * `y` - Response vector (n,)
/// * `x` - Regressor vector (n,)
///
/// # Errors
/// Returns `MathError::DimensionMismatch` if the lengths differ,
/// `MathError::InsufficientData` for fewer than two observations,
/// `MathError::ZeroVariance` if `x` is (numerically) constant and
/// `MathError::NumericalInstability` if the inputs are not finite.
pub fn simple_ols(y: ArrayView1<'_, f64>, x: ArrayView1<'_, f64>) -> Result<OlsFit, MathError> {
    let n = y.len();
    if x.len() != n {
        return Err(MathError::DimensionMismatch { expected: n, actual: x.len() });
    }
    if n < 2 {
        return Err(MathError::InsufficientData { required: 2, actual: n });
    }
    if !y.iter().chain(x.iter()).all(|v| v.is_finite()) {
        return Err(MathError::NumericalInstability("non-finite regression input".to_string()));
    }

    let nf = n as f64;
    let x_mean = x.sum() / nf;
    let y_mean = y.sum() / nf;

    let (sxx, sxy, syy) =
        x.iter().zip(y.iter()).fold((0.0, 0.0, 0.0), |(sxx, sxy, syy), (&xi, &yi)| {
            let dx = xi - x_mean;
            let dy = yi - y_mean;
            (sxx + dx * dx, sxy + dx * dy, syy + dy * dy)
        });

    let x_scale: f64 = x.iter().map(|v| v * v).sum();
    if sxx <= DEGENERATE_TOLERANCE * x_scale || sxx == 0.0 {
        return Err(MathError::ZeroVariance);
    }

    let slope = sxy / sxx;
    let intercept = y_mean - slope * x_mean;

    let residuals: Array1<f64> =
        y.iter().zip(x.iter()).map(|(&yi, &xi)| yi - intercept - slope * xi).collect();

    let ss_res: f64 = residuals.iter().map(|r| r * r).sum();
    let r_squared = if syy > 0.0 { 1.0 - ss_res / syy } else { 1.0 };

    Ok(OlsFit { slope, intercept, residuals, r_squared })
}
