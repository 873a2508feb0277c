//! Differencing and integration for the ARIMA model.

/// Difference a series `d` times.
pub fn difference(series: &[f64], d: usize) -> Vec<f64> {
    let mut result = series.to_vec();
    for _ in 0..d {
        if result.len() <= 1 {
            return Vec::new();
        }
        result = result.windows(2).map(|w| w[1] - w[0]).collect();
    }
    result
}

/// Integrate forecasts on the differenced scale back to the original scale.
///
/// `original` supplies the initial values at each differencing level; it
/// must be the series the model was differenced from.
pub fn integrate(forecast_diff: &[f64], original: &[f64], d: usize) -> Vec<f64> {
    if d == 0 || forecast_diff.is_empty() {
        return forecast_diff.to_vec();
    }

    let mut result = forecast_diff.to_vec();
    for level in (0..d).rev() {
        let seed = *difference(original, level).last().unwrap_or(&0.0);
        let mut total = seed;
        for value in result.iter_mut() {
            total += *value;
            *value = total;
        }
    }
    result
}
