//! Least-squares solver for the conditional AR fit.
//!
//! Solves the normal equations with a Cholesky decomposition and recovers
//! coefficient standard errors from the inverse Gram matrix.

use crate::error::{PipelineError, Result};

/// Result of an ordinary least-squares fit.
///
/// `coefficients[0]` is the intercept; the remaining entries follow the
/// order of the predictor columns. `std_errors` is aligned with
/// `coefficients`.
#[derive(Debug, Clone)]
pub struct OlsFit {
    pub coefficients: Vec<f64>,
    pub std_errors: Vec<f64>,
    pub residual_variance: f64,
}

impl OlsFit {
    /// Number of estimated parameters (including the intercept).
    pub fn num_params(&self) -> usize {
        self.coefficients.len()
    }
}

/// Fit `y = b0 + b1*x1 + ... + bk*xk` by ordinary least squares.
///
/// `predictors` is column-major: one slice per regressor, each the same
/// length as `y`. Requires strictly more observations than parameters so
/// the residual variance is defined.
pub fn ols_fit(y: &[f64], predictors: &[Vec<f64>]) -> Result<OlsFit> {
    let n = y.len();
    let k = predictors.len() + 1;

    if n == 0 {
        return Err(PipelineError::EmptyData);
    }
    for column in predictors {
        if column.len() != n {
            return Err(PipelineError::DimensionMismatch {
                expected: n,
                got: column.len(),
            });
        }
    }
    if n <= k {
        return Err(PipelineError::InsufficientData { needed: k + 1, got: n });
    }

    // Accumulate the Gram matrix X'X and X'y, with an implicit leading
    // column of ones for the intercept.
    let mut xtx = vec![vec![0.0; k]; k];
    let mut xty = vec![0.0; k];
    for row in 0..n {
        let mut x = Vec::with_capacity(k);
        x.push(1.0);
        for column in predictors {
            x.push(column[row]);
        }
        for i in 0..k {
            xty[i] += x[i] * y[row];
            for j in 0..k {
                xtx[i][j] += x[i] * x[j];
            }
        }
    }

    // Small ridge term keeps the factorization alive on near-collinear
    // designs.
    for (i, row) in xtx.iter_mut().enumerate() {
        row[i] += 1e-8;
    }

    let factor = cholesky(&xtx).ok_or_else(|| {
        PipelineError::ComputationError("normal equations are not positive definite".to_string())
    })?;
    let coefficients = cholesky_solve(&factor, &xty);

    // Residual variance with degrees-of-freedom correction.
    let mut rss = 0.0;
    for row in 0..n {
        let mut fitted = coefficients[0];
        for (j, column) in predictors.iter().enumerate() {
            fitted += coefficients[j + 1] * column[row];
        }
        let e = y[row] - fitted;
        rss += e * e;
    }
    let residual_variance = rss / (n - k) as f64;

    // Var(beta) = sigma^2 * (X'X)^-1; invert by solving against unit
    // vectors with the existing factorization.
    let mut std_errors = Vec::with_capacity(k);
    for i in 0..k {
        let mut unit = vec![0.0; k];
        unit[i] = 1.0;
        let column = cholesky_solve(&factor, &unit);
        std_errors.push((residual_variance * column[i]).max(0.0).sqrt());
    }

    Ok(OlsFit {
        coefficients,
        std_errors,
        residual_variance,
    })
}

/// Cholesky factorization `A = L L'` of a symmetric positive definite
/// matrix. Returns `None` when the matrix is not positive definite.
fn cholesky(a: &[Vec<f64>]) -> Option<Vec<Vec<f64>>> {
    let n = a.len();
    let mut l = vec![vec![0.0; n]; n];

    for i in 0..n {
        for j in 0..=i {
            let mut sum = a[i][j];
            for k in 0..j {
                sum -= l[i][k] * l[j][k];
            }
            if i == j {
                if sum <= 0.0 {
                    return None;
                }
                l[i][j] = sum.sqrt();
            } else {
                l[i][j] = sum / l[j][j];
            }
        }
    }

    Some(l)
}

/// Solve `L L' x = b` given the Cholesky factor `L`.
fn cholesky_solve(l: &[Vec<f64>], b: &[f64]) -> Vec<f64> {
    let n = b.len();

    // Forward substitution: L y = b
    let mut y = vec![0.0; n];
    for i in 0..n {
        let mut sum = b[i];
        for j in 0..i {
            sum -= l[i][j] * y[j];
        }
        y[i] = sum / l[i][i];
    }

    // Backward substitution: L' x = y
    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let mut sum = y[i];
        for j in (i + 1)..n {
            sum -= l[j][i] * x[j];
        }
        x[i] = sum / l[i][i];
    }

    x
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn recovers_exact_linear_relationship() {
        // y = 2 + 3x
        let x = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let y: Vec<f64> = x.iter().map(|xi| 2.0 + 3.0 * xi).collect();

        let fit = ols_fit(&y, &[x]).unwrap();
        assert_relative_eq!(fit.coefficients[0], 2.0, epsilon = 1e-5);
        assert_relative_eq!(fit.coefficients[1], 3.0, epsilon = 1e-5);
        assert!(fit.residual_variance < 1e-8);
    }

    #[test]
    fn recovers_two_regressors() {
        // y = 1 + 2*x1 - 0.5*x2, non-collinear design
        let x1 = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let x2 = vec![0.5, 2.5, 1.0, 3.0, 1.5, 3.5, 2.0, 4.0];
        let y: Vec<f64> = x1
            .iter()
            .zip(&x2)
            .map(|(a, b)| 1.0 + 2.0 * a - 0.5 * b)
            .collect();

        let fit = ols_fit(&y, &[x1, x2]).unwrap();
        assert_relative_eq!(fit.coefficients[0], 1.0, epsilon = 1e-4);
        assert_relative_eq!(fit.coefficients[1], 2.0, epsilon = 1e-4);
        assert_relative_eq!(fit.coefficients[2], -0.5, epsilon = 1e-4);
        assert_eq!(fit.std_errors.len(), 3);
    }

    #[test]
    fn standard_errors_shrink_with_sample_size() {
        let noisy = |n: usize| {
            let x: Vec<f64> = (0..n).map(|i| i as f64 * 0.1).collect();
            let y: Vec<f64> = x
                .iter()
                .enumerate()
                .map(|(i, xi)| 1.0 + 2.0 * xi + (i as f64 * 0.7).sin() * 0.3)
                .collect();
            ols_fit(&y, &[x]).unwrap()
        };

        let small = noisy(20);
        let large = noisy(200);
        assert!(large.std_errors[1] < small.std_errors[1]);
    }

    #[test]
    fn no_regressors_returns_mean_as_intercept() {
        let y = vec![2.0, 4.0, 6.0, 8.0, 10.0];
        let fit = ols_fit(&y, &[]).unwrap();
        assert_relative_eq!(fit.coefficients[0], 6.0, epsilon = 1e-6);
        assert_eq!(fit.num_params(), 1);
    }

    #[test]
    fn rejects_degenerate_shapes() {
        assert!(matches!(ols_fit(&[], &[]), Err(PipelineError::EmptyData)));
        assert!(matches!(
            ols_fit(&[1.0, 2.0], &[vec![1.0]]),
            Err(PipelineError::DimensionMismatch { .. })
        ));
        // Two observations cannot support two parameters plus variance.
        assert!(matches!(
            ols_fit(&[1.0, 2.0], &[vec![1.0, 2.0]]),
            Err(PipelineError::InsufficientData { .. })
        ));
    }
}
