//! ARIMA (Autoregressive Integrated Moving Average) model.
//!
//! The autoregressive part is estimated by conditional least squares on the
//! differenced series, solved exactly through the normal equations, so
//! repeated fits of the same series produce identical estimates. Moving
//! average terms, when requested, are estimated from the autocorrelation of
//! the autoregressive residuals.

use crate::core::DailySeries;
use crate::error::{PipelineError, Result};
use crate::models::arima::diff::{difference, integrate};
use crate::models::arima::summary::{CoefficientRow, ModelSummary};
use crate::models::Forecaster;
use crate::utils::ols::ols_fit;
use crate::utils::stats::two_sided_p_value;

/// ARIMA order specification (p, d, q).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArimaOrder {
    /// Autoregressive order.
    pub p: usize,
    /// Differencing order.
    pub d: usize,
    /// Moving-average order.
    pub q: usize,
}

impl ArimaOrder {
    /// Create a validated order specification.
    pub fn new(p: usize, d: usize, q: usize) -> Result<Self> {
        if p > 10 {
            return Err(PipelineError::InvalidParameter(
                "autoregressive order must be <= 10".to_string(),
            ));
        }
        if d > 2 {
            return Err(PipelineError::InvalidParameter(
                "differencing order must be <= 2".to_string(),
            ));
        }
        if q > 10 {
            return Err(PipelineError::InvalidParameter(
                "moving-average order must be <= 10".to_string(),
            ));
        }
        Ok(Self { p, d, q })
    }

    /// Number of estimated parameters (AR + MA + intercept).
    pub fn num_params(&self) -> usize {
        self.p + self.q + 1
    }

    /// Minimum series length the fit accepts.
    ///
    /// Leaves at least one residual degree of freedom beyond the lagged
    /// regression.
    pub fn min_observations(&self) -> usize {
        self.d + 2 * self.p.max(self.q) + 2
    }
}

impl std::fmt::Display for ArimaOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ARIMA({},{},{})", self.p, self.d, self.q)
    }
}

/// ARIMA forecasting model with a fixed order.
#[derive(Debug, Clone)]
pub struct Arima {
    order: ArimaOrder,
    ar: Vec<f64>,
    ma: Vec<f64>,
    intercept: f64,
    /// Standard errors for [intercept, ar...]. MA estimates carry none.
    std_errors: Vec<f64>,
    original: Option<Vec<f64>>,
    differenced: Option<Vec<f64>>,
    fitted: Option<Vec<f64>>,
    residuals: Option<Vec<f64>>,
    sigma2: Option<f64>,
    log_likelihood: Option<f64>,
    aic: Option<f64>,
    bic: Option<f64>,
}

impl Arima {
    /// Create an unfitted model with the given order.
    pub fn new(p: usize, d: usize, q: usize) -> Result<Self> {
        Ok(Self::with_order(ArimaOrder::new(p, d, q)?))
    }

    /// Create an unfitted model from a validated order.
    pub fn with_order(order: ArimaOrder) -> Self {
        Self {
            order,
            ar: Vec::new(),
            ma: Vec::new(),
            intercept: 0.0,
            std_errors: Vec::new(),
            original: None,
            differenced: None,
            fitted: None,
            residuals: None,
            sigma2: None,
            log_likelihood: None,
            aic: None,
            bic: None,
        }
    }

    /// The order specification.
    pub fn order(&self) -> ArimaOrder {
        self.order
    }

    /// Autoregressive coefficients, lag 1 first.
    pub fn ar_coefficients(&self) -> &[f64] {
        &self.ar
    }

    /// Moving-average coefficients, lag 1 first.
    pub fn ma_coefficients(&self) -> &[f64] {
        &self.ma
    }

    /// Intercept of the differenced-scale regression.
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Residual variance on the differenced scale.
    pub fn sigma2(&self) -> Option<f64> {
        self.sigma2
    }

    /// Gaussian log-likelihood of the fit.
    pub fn log_likelihood(&self) -> Option<f64> {
        self.log_likelihood
    }

    /// Akaike information criterion.
    pub fn aic(&self) -> Option<f64> {
        self.aic
    }

    /// Bayesian information criterion.
    pub fn bic(&self) -> Option<f64> {
        self.bic
    }

    /// Build the fit summary for display.
    pub fn summary(&self) -> Result<ModelSummary> {
        let differenced = self.differenced.as_ref().ok_or(PipelineError::FitRequired)?;

        let mut rows = Vec::with_capacity(self.order.num_params());
        let named = std::iter::once(("const".to_string(), self.intercept)).chain(
            self.ar
                .iter()
                .enumerate()
                .map(|(i, &coef)| (format!("ar.L{}", i + 1), coef)),
        );
        for (i, (name, estimate)) in named.enumerate() {
            let std_error = self.std_errors.get(i).copied().unwrap_or(f64::NAN);
            let z = estimate / std_error;
            rows.push(CoefficientRow {
                name,
                estimate,
                std_error,
                z,
                p_value: two_sided_p_value(z),
            });
        }
        for (j, &coef) in self.ma.iter().enumerate() {
            // Moment-based MA estimates come without standard errors.
            rows.push(CoefficientRow {
                name: format!("ma.L{}", j + 1),
                estimate: coef,
                std_error: f64::NAN,
                z: f64::NAN,
                p_value: f64::NAN,
            });
        }

        Ok(ModelSummary {
            model: self.order.to_string(),
            n_obs: differenced.len(),
            coefficients: rows,
            sigma2: self.sigma2.unwrap_or(f64::NAN),
            log_likelihood: self.log_likelihood.unwrap_or(f64::NAN),
            aic: self.aic.unwrap_or(f64::NAN),
            bic: self.bic.unwrap_or(f64::NAN),
        })
    }

    /// Estimate MA coefficients from the autocorrelation of the residuals.
    fn estimate_ma(residuals: &[f64], q: usize) -> Vec<f64> {
        if q == 0 || residuals.is_empty() {
            return vec![0.0; q];
        }

        let n = residuals.len();
        let mean = residuals.iter().sum::<f64>() / n as f64;
        let centered: Vec<f64> = residuals.iter().map(|r| r - mean).collect();
        let var = centered.iter().map(|r| r * r).sum::<f64>() / n as f64;

        let mut coefficients = vec![0.0; q];
        if var > 1e-10 {
            for (k, coef) in coefficients.iter_mut().enumerate() {
                let lag = k + 1;
                let cov = centered[lag..]
                    .iter()
                    .zip(&centered)
                    .map(|(a, b)| a * b)
                    .sum::<f64>()
                    / n as f64;
                *coef = (cov / var).clamp(-0.99, 0.99);
            }
        }
        coefficients
    }

    /// Compute fitted values and residuals on the differenced scale, then
    /// the fit statistics.
    fn finalize_fit(&mut self, differenced: &[f64]) {
        let n = differenced.len();
        let start = self.order.p.max(self.order.q);

        let mut fitted = vec![f64::NAN; n];
        let mut residuals = vec![0.0; n];
        for t in start..n {
            let mut pred = self.intercept;
            for (i, &phi) in self.ar.iter().enumerate() {
                pred += phi * differenced[t - 1 - i];
            }
            for (j, &theta) in self.ma.iter().enumerate() {
                pred += theta * residuals[t - 1 - j];
            }
            fitted[t] = pred;
            residuals[t] = differenced[t] - pred;
        }

        let n_eff = (n - start) as f64;
        if n_eff > 0.0 {
            let sigma2 = residuals[start..].iter().map(|r| r * r).sum::<f64>() / n_eff;
            let k = self.order.num_params() as f64;
            let ll = -0.5 * n_eff * (1.0 + sigma2.ln() + (2.0 * std::f64::consts::PI).ln());

            self.sigma2 = Some(sigma2);
            self.log_likelihood = Some(ll);
            self.aic = Some(-2.0 * ll + 2.0 * k);
            self.bic = Some(-2.0 * ll + k * n_eff.ln());
        }

        self.fitted = Some(fitted);
        self.residuals = Some(residuals);
    }
}

impl Forecaster for Arima {
    fn fit(&mut self, series: &DailySeries) -> Result<()> {
        let values = series.values();
        if values.is_empty() {
            return Err(PipelineError::EmptyData);
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(PipelineError::MissingValues);
        }

        let min_len = self.order.min_observations();
        if values.len() < min_len {
            return Err(PipelineError::InsufficientData {
                needed: min_len,
                got: values.len(),
            });
        }

        let differenced = difference(values, self.order.d);
        let start = self.order.p.max(self.order.q);

        // Conditional least squares on the lagged design.
        let targets: Vec<f64> = differenced[start..].to_vec();
        let lags: Vec<Vec<f64>> = (0..self.order.p)
            .map(|i| {
                (start..differenced.len())
                    .map(|t| differenced[t - 1 - i])
                    .collect()
            })
            .collect();
        let fit = ols_fit(&targets, &lags)?;

        self.intercept = fit.coefficients[0];
        self.ar = fit.coefficients[1..].to_vec();
        self.std_errors = fit.std_errors;

        if self.order.q > 0 {
            // Residual autocorrelation of the AR fit seeds the MA terms.
            let mut ar_residuals = Vec::with_capacity(targets.len());
            for (row, &y) in targets.iter().enumerate() {
                let mut pred = self.intercept;
                for (i, column) in lags.iter().enumerate() {
                    pred += self.ar[i] * column[row];
                }
                ar_residuals.push(y - pred);
            }
            self.ma = Self::estimate_ma(&ar_residuals, self.order.q);
        } else {
            self.ma = Vec::new();
        }

        self.original = Some(values.to_vec());
        self.finalize_fit(&differenced);
        self.differenced = Some(differenced);

        Ok(())
    }

    fn predict(&self, horizon: usize) -> Result<Vec<f64>> {
        let original = self.original.as_ref().ok_or(PipelineError::FitRequired)?;
        let differenced = self.differenced.as_ref().ok_or(PipelineError::FitRequired)?;
        let residuals = self.residuals.as_ref().ok_or(PipelineError::FitRequired)?;

        if horizon == 0 {
            return Ok(Vec::new());
        }

        // Recursive forecast on the differenced scale; future shocks are
        // zero.
        let mut extended = differenced.clone();
        let mut extended_residuals = residuals.clone();
        for _ in 0..horizon {
            let t = extended.len();
            let mut pred = self.intercept;
            for (i, &phi) in self.ar.iter().enumerate() {
                if t > i {
                    pred += phi * extended[t - 1 - i];
                }
            }
            for (j, &theta) in self.ma.iter().enumerate() {
                if t > j {
                    pred += theta * extended_residuals[t - 1 - j];
                }
            }
            extended.push(pred);
            extended_residuals.push(0.0);
        }

        let forecast_diff = &extended[differenced.len()..];
        Ok(integrate(forecast_diff, original, self.order.d))
    }

    fn fitted_values(&self) -> Option<&[f64]> {
        self.fitted.as_deref()
    }

    fn residuals(&self) -> Option<&[f64]> {
        self.residuals.as_deref()
    }

    fn name(&self) -> &str {
        "ARIMA"
    }
}
