//! Daily aggregate series derived from a timestamp-indexed table.

use crate::core::table::DataTable;
use crate::error::{PipelineError, Result};
use chrono::{Duration, NaiveDate};
use std::collections::BTreeMap;

/// A date-indexed series of daily sums, ascending by date.
///
/// Read-only after construction; consumed by both rendering and model
/// fitting.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySeries {
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
}

impl DailySeries {
    /// Create a series from parallel date and value vectors.
    ///
    /// Dates must be strictly increasing.
    pub fn new(dates: Vec<NaiveDate>, values: Vec<f64>) -> Result<Self> {
        if dates.len() != values.len() {
            return Err(PipelineError::DimensionMismatch {
                expected: dates.len(),
                got: values.len(),
            });
        }
        for pair in dates.windows(2) {
            if pair[1] <= pair[0] {
                return Err(PipelineError::TimestampError(
                    "dates must be strictly increasing".to_string(),
                ));
            }
        }
        Ok(Self { dates, values })
    }

    /// Aggregate a numeric column of an indexed table by calendar date.
    ///
    /// Sums the target column across all rows sharing the date portion of
    /// the index timestamp. Rows with a missing index timestamp are
    /// excluded; missing target values are ignored by the sum, so a date
    /// whose values are all missing aggregates to zero.
    pub fn aggregate(table: &DataTable, target_column: &str) -> Result<Self> {
        let timestamps = table.index_timestamps()?;
        let column = table.column(target_column)?;
        let values = column.as_numeric().ok_or_else(|| {
            PipelineError::InvalidParameter(format!(
                "column '{target_column}' is not numeric; clean the table first"
            ))
        })?;

        let mut sums: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for (timestamp, value) in timestamps.iter().zip(values) {
            let Some(timestamp) = timestamp else {
                continue;
            };
            let entry = sums.entry(timestamp.date_naive()).or_insert(0.0);
            if value.is_finite() {
                *entry += value;
            }
        }

        let (dates, values): (Vec<_>, Vec<_>) = sums.into_iter().unzip();
        Ok(Self { dates, values })
    }

    /// Number of observed days.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Check if the series is empty.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Observed dates, ascending.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Daily sums, aligned with `dates`.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// The last observed date.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    /// Consecutive future dates at daily frequency, starting the day after
    /// the last observed date.
    pub fn future_dates(&self, horizon: usize) -> Result<Vec<NaiveDate>> {
        let last = self.last_date().ok_or(PipelineError::EmptyData)?;
        Ok((1..=horizon as i64)
            .map(|offset| last + Duration::days(offset))
            .collect())
    }
}
