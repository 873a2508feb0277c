//! Column-oriented table for raw transaction data.

use crate::error::{PipelineError, Result};
use chrono::{DateTime, Utc};

/// Type of the values held by a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DType {
    /// Raw string fields as read from the file.
    Text,
    /// Floating-point values; `NaN` marks a missing value.
    Numeric,
    /// Parsed timestamps; `None` marks a missing value.
    Timestamp,
}

impl std::fmt::Display for DType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DType::Text => write!(f, "text"),
            DType::Numeric => write!(f, "numeric"),
            DType::Timestamp => write!(f, "timestamp"),
        }
    }
}

/// Storage for one column's values.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValues {
    Text(Vec<String>),
    Numeric(Vec<f64>),
    Timestamp(Vec<Option<DateTime<Utc>>>),
}

impl ColumnValues {
    fn len(&self) -> usize {
        match self {
            ColumnValues::Text(v) => v.len(),
            ColumnValues::Numeric(v) => v.len(),
            ColumnValues::Timestamp(v) => v.len(),
        }
    }
}

/// A named column of homogeneous values.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    values: ColumnValues,
}

impl Column {
    /// Create a column from a name and values.
    pub fn new(name: impl Into<String>, values: ColumnValues) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of values (including missing ones).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the column has no values.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Type of the stored values.
    pub fn dtype(&self) -> DType {
        match self.values {
            ColumnValues::Text(_) => DType::Text,
            ColumnValues::Numeric(_) => DType::Numeric,
            ColumnValues::Timestamp(_) => DType::Timestamp,
        }
    }

    /// Number of non-missing values.
    ///
    /// Text fields count as missing only when empty; numeric values when
    /// non-finite; timestamps when unparsed.
    pub fn non_null(&self) -> usize {
        match &self.values {
            ColumnValues::Text(v) => v.iter().filter(|s| !s.trim().is_empty()).count(),
            ColumnValues::Numeric(v) => v.iter().filter(|x| x.is_finite()).count(),
            ColumnValues::Timestamp(v) => v.iter().filter(|t| t.is_some()).count(),
        }
    }

    /// The raw values.
    pub fn values(&self) -> &ColumnValues {
        &self.values
    }

    /// Replace the stored values, preserving the name.
    ///
    /// The replacement must have the same length as the current values.
    pub fn set_values(&mut self, values: ColumnValues) -> Result<()> {
        if values.len() != self.len() {
            return Err(PipelineError::DimensionMismatch {
                expected: self.len(),
                got: values.len(),
            });
        }
        self.values = values;
        Ok(())
    }

    /// Numeric values, if this is a numeric column.
    pub fn as_numeric(&self) -> Option<&[f64]> {
        match &self.values {
            ColumnValues::Numeric(v) => Some(v),
            _ => None,
        }
    }

    /// Timestamp values, if this is a timestamp column.
    pub fn as_timestamps(&self) -> Option<&[Option<DateTime<Utc>>]> {
        match &self.values {
            ColumnValues::Timestamp(v) => Some(v),
            _ => None,
        }
    }

    /// Display form of one value, for row previews.
    pub fn display_value(&self, row: usize) -> String {
        match &self.values {
            ColumnValues::Text(v) => v.get(row).cloned().unwrap_or_default(),
            ColumnValues::Numeric(v) => match v.get(row) {
                Some(x) if x.is_finite() => format!("{x}"),
                _ => "NaN".to_string(),
            },
            ColumnValues::Timestamp(v) => match v.get(row) {
                Some(Some(t)) => t.format("%Y-%m-%d %H:%M:%S").to_string(),
                _ => "NaT".to_string(),
            },
        }
    }
}

/// A column-oriented table loaded from a transaction CSV.
///
/// All columns have the same length. Cleaning mutates columns in place; the
/// forecasting stage marks a timestamp column as the row index. Row order is
/// the only identity; no uniqueness constraints are enforced.
#[derive(Debug, Clone, PartialEq)]
pub struct DataTable {
    columns: Vec<Column>,
    n_rows: usize,
    index: Option<String>,
}

impl DataTable {
    /// Create a table from columns, validating equal lengths.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let n_rows = columns.first().map(|c| c.len()).unwrap_or(0);
        for column in &columns {
            if column.len() != n_rows {
                return Err(PipelineError::DimensionMismatch {
                    expected: n_rows,
                    got: column.len(),
                });
            }
        }
        Ok(Self {
            columns,
            n_rows,
            index: None,
        })
    }

    /// Number of rows.
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Number of columns.
    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// Check if the table holds no rows.
    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }

    /// All columns in order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column names in order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name()).collect()
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Result<&Column> {
        self.columns
            .iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| PipelineError::ColumnNotFound(name.to_string()))
    }

    /// Look up a column by name, mutably.
    pub fn column_mut(&mut self, name: &str) -> Result<&mut Column> {
        self.columns
            .iter_mut()
            .find(|c| c.name() == name)
            .ok_or_else(|| PipelineError::ColumnNotFound(name.to_string()))
    }

    /// Name of the index column, if one has been set.
    pub fn index(&self) -> Option<&str> {
        self.index.as_deref()
    }

    /// Mark a timestamp column as the row index.
    ///
    /// Mutates the table in place; the column must already hold parsed
    /// timestamps.
    pub fn set_index(&mut self, name: &str) -> Result<()> {
        let column = self.column(name)?;
        if column.dtype() != DType::Timestamp {
            return Err(PipelineError::TimestampError(format!(
                "column '{name}' is not a timestamp column"
            )));
        }
        self.index = Some(name.to_string());
        Ok(())
    }

    /// Timestamps of the index column.
    pub fn index_timestamps(&self) -> Result<&[Option<DateTime<Utc>>]> {
        let name = self
            .index
            .as_deref()
            .ok_or_else(|| PipelineError::TimestampError("no index column set".to_string()))?;
        let column = self.column(name)?;
        column
            .as_timestamps()
            .ok_or_else(|| PipelineError::TimestampError(format!(
                "index column '{name}' is not a timestamp column"
            )))
    }
}
