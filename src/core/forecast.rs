//! Forecast result pairing predicted values with future dates.

use crate::error::{PipelineError, Result};
use chrono::NaiveDate;

/// Predicted values paired 1:1 with future dates at daily frequency.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastPath {
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
}

impl ForecastPath {
    /// Create a forecast path, validating the pairing.
    pub fn new(dates: Vec<NaiveDate>, values: Vec<f64>) -> Result<Self> {
        if dates.len() != values.len() {
            return Err(PipelineError::DimensionMismatch {
                expected: dates.len(),
                got: values.len(),
            });
        }
        Ok(Self { dates, values })
    }

    /// Number of forecast steps.
    pub fn horizon(&self) -> usize {
        self.values.len()
    }

    /// Check if the forecast is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Forecast dates, ascending.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Predicted values, aligned with `dates`.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Iterate over `(date, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.dates.iter().copied().zip(self.values.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    #[test]
    fn forecast_pairs_dates_with_values() {
        let path = ForecastPath::new(vec![date(1), date(2)], vec![10.0, 11.0]).unwrap();
        assert_eq!(path.horizon(), 2);
        assert!(!path.is_empty());

        let pairs: Vec<_> = path.iter().collect();
        assert_eq!(pairs, vec![(date(1), 10.0), (date(2), 11.0)]);
    }

    #[test]
    fn forecast_rejects_mismatched_lengths() {
        assert!(matches!(
            ForecastPath::new(vec![date(1)], vec![1.0, 2.0]),
            Err(PipelineError::DimensionMismatch { expected: 1, got: 2 })
        ));
    }
}
