//! Cleaning stage: timestamp parsing and numeric coercion.
//!
//! Both operations substitute a missing marker for unparseable values
//! instead of failing, preserve the row count, and are idempotent.

use crate::core::{ColumnValues, DataTable};
use crate::error::{PipelineError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use tracing::debug;

/// Datetime formats tried in order when parsing timestamp fields.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%d-%m-%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

/// Date-only formats tried after the datetime formats; midnight is assumed.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y", "%d/%m/%Y"];

/// Clean the table in place for forecasting.
///
/// Parses `time_column` into timestamps and coerces `target_column` to
/// numeric. Row count is preserved; individual unparseable values become
/// missing markers. A missing column is an error.
pub fn clean(table: &mut DataTable, time_column: &str, target_column: &str) -> Result<()> {
    parse_timestamps(table, time_column)?;
    coerce_numeric(table, target_column)?;
    debug!(
        time_column,
        target_column,
        rows = table.n_rows(),
        "table cleaned"
    );
    Ok(())
}

/// Parse a column into timestamps in place.
///
/// Text fields go through the format list; numeric fields are read as Unix
/// seconds. Values that do not parse become `None`. Re-parsing an already
/// parsed column is a no-op.
pub fn parse_timestamps(table: &mut DataTable, column: &str) -> Result<()> {
    let col = table.column_mut(column)?;
    let parsed = match col.values() {
        ColumnValues::Timestamp(_) => return Ok(()),
        ColumnValues::Text(raw) => raw.iter().map(|s| parse_timestamp(s)).collect(),
        ColumnValues::Numeric(values) => values
            .iter()
            .map(|v| {
                if v.is_finite() {
                    DateTime::from_timestamp(*v as i64, 0)
                } else {
                    None
                }
            })
            .collect(),
    };
    col.set_values(ColumnValues::Timestamp(parsed))
}

/// Coerce a column to numeric in place.
///
/// Unparseable or empty fields become `NaN`. Coercing an already numeric
/// column is a no-op; a timestamp column cannot be coerced.
pub fn coerce_numeric(table: &mut DataTable, column: &str) -> Result<()> {
    let col = table.column_mut(column)?;
    let coerced = match col.values() {
        ColumnValues::Numeric(_) => return Ok(()),
        ColumnValues::Text(raw) => raw
            .iter()
            .map(|s| s.trim().parse::<f64>().unwrap_or(f64::NAN))
            .collect(),
        ColumnValues::Timestamp(_) => {
            return Err(PipelineError::InvalidParameter(format!(
                "cannot coerce timestamp column '{column}' to numeric"
            )))
        }
    };
    col.set_values(ColumnValues::Numeric(coerced))
}

/// Parse one timestamp field, trying datetime formats, then date-only
/// formats, then Unix seconds.
pub fn parse_timestamp(field: &str) -> Option<DateTime<Utc>> {
    let field = field.trim();
    if field.is_empty() {
        return None;
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(field, format) {
            return Some(Utc.from_utc_datetime(&dt));
        }
    }
    for format in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(field, format) {
            return Some(Utc.from_utc_datetime(&d.and_time(NaiveTime::MIN)));
        }
    }
    if let Ok(seconds) = field.parse::<i64>() {
        return DateTime::from_timestamp(seconds, 0);
    }

    None
}
