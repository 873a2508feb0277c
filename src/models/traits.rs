//! Forecaster trait defining the interface for time-series models.

use crate::core::DailySeries;
use crate::error::Result;

/// Common interface for forecasting models over a daily series.
///
/// Object-safe, so models can be held as `Box<dyn Forecaster>`.
pub trait Forecaster {
    /// Fit the model to the daily series.
    fn fit(&mut self, series: &DailySeries) -> Result<()>;

    /// Predict the given number of steps past the end of the fitted series.
    fn predict(&self, horizon: usize) -> Result<Vec<f64>>;

    /// In-sample fitted values, once fitted.
    fn fitted_values(&self) -> Option<&[f64]>;

    /// Residuals (actual - fitted), once fitted.
    fn residuals(&self) -> Option<&[f64]>;

    /// Model name for display.
    fn name(&self) -> &str;

    /// Check if the model has been fitted.
    fn is_fitted(&self) -> bool {
        self.fitted_values().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::arima::Arima;
    use chrono::NaiveDate;

    fn series(n: usize) -> DailySeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let dates = (0..n as i64)
            .map(|i| start + chrono::Duration::days(i))
            .collect();
        let values = (0..n).map(|i| 50.0 + (i as f64 * 0.4).sin() * 5.0).collect();
        DailySeries::new(dates, values).unwrap()
    }

    #[test]
    fn boxed_forecaster_fit_and_predict() {
        let mut model: Box<dyn Forecaster> = Box::new(Arima::new(2, 1, 0).unwrap());
        assert!(!model.is_fitted());

        model.fit(&series(40)).unwrap();
        assert!(model.is_fitted());
        assert_eq!(model.name(), "ARIMA");

        let forecast = model.predict(5).unwrap();
        assert_eq!(forecast.len(), 5);
    }
}
