//! Exploratory inspection of the loaded table.
//!
//! Pure diagnostics: schema summary, row preview, and descriptive
//! statistics, printed to stdout. Nothing here is consumed downstream and
//! nothing mutates the table. A degenerate table simply prints degenerate
//! statistics.

use crate::core::{DType, DataTable};
use crate::utils::stats;
use std::fmt::Write as _;

/// Rows shown by the preview section.
pub const PREVIEW_ROWS: usize = 5;

const NAME_WIDTH: usize = 18;
const CELL_WIDTH: usize = 22;

/// Print the full inspection report: schema, head rows, and descriptive
/// statistics.
pub fn explore(table: &DataTable, preview_rows: usize) {
    println!("Data information:");
    println!("{}", schema_summary(table));
    println!("First few rows of the data:");
    println!("{}", head(table, preview_rows));
    println!("Descriptive statistics:");
    println!("{}", describe(table));
}

/// Schema summary: shape plus per-column dtype and non-null count.
pub fn schema_summary(table: &DataTable) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "  {} rows x {} columns",
        table.n_rows(),
        table.n_columns()
    );
    let _ = writeln!(
        out,
        "  {:<NAME_WIDTH$} {:<10} {:>8}",
        "Column", "Dtype", "Non-Null"
    );
    let _ = writeln!(out, "  {}", "-".repeat(NAME_WIDTH + 20));
    for column in table.columns() {
        let _ = writeln!(
            out,
            "  {:<NAME_WIDTH$} {:<10} {:>8}",
            truncated(column.name(), NAME_WIDTH),
            column.dtype().to_string(),
            column.non_null()
        );
    }
    out
}

/// First `n` rows, one line per row.
pub fn head(table: &DataTable, n: usize) -> String {
    let mut out = String::new();
    let _ = write!(out, "  {:>4}", "#");
    for column in table.columns() {
        let _ = write!(out, " {:>CELL_WIDTH$}", truncated(column.name(), CELL_WIDTH));
    }
    let _ = writeln!(out);

    for row in 0..n.min(table.n_rows()) {
        let _ = write!(out, "  {row:>4}");
        for column in table.columns() {
            let _ = write!(
                out,
                " {:>CELL_WIDTH$}",
                truncated(&column.display_value(row), CELL_WIDTH)
            );
        }
        let _ = writeln!(out);
    }
    out
}

/// Descriptive statistics for the numeric columns: count, mean, std, min,
/// quartiles, max. Statistics are computed over non-missing values only.
pub fn describe(table: &DataTable) -> String {
    let numeric: Vec<_> = table
        .columns()
        .iter()
        .filter(|c| c.dtype() == DType::Numeric)
        .collect();

    let mut out = String::new();
    if numeric.is_empty() {
        let _ = writeln!(out, "  (no numeric columns)");
        return out;
    }

    let _ = write!(out, "  {:<8}", "");
    for column in &numeric {
        let _ = write!(out, " {:>CELL_WIDTH$}", truncated(column.name(), CELL_WIDTH));
    }
    let _ = writeln!(out);

    let finite: Vec<Vec<f64>> = numeric
        .iter()
        .map(|c| {
            c.as_numeric()
                .unwrap_or(&[])
                .iter()
                .copied()
                .filter(|v| v.is_finite())
                .collect()
        })
        .collect();

    let rows: [(&str, Box<dyn Fn(&[f64]) -> f64>); 8] = [
        ("count", Box::new(|v: &[f64]| v.len() as f64)),
        ("mean", Box::new(stats::mean)),
        ("std", Box::new(stats::std_dev)),
        ("min", Box::new(|v: &[f64]| stats::quantile(v, 0.0))),
        ("25%", Box::new(|v: &[f64]| stats::quantile(v, 0.25))),
        ("50%", Box::new(|v: &[f64]| stats::quantile(v, 0.5))),
        ("75%", Box::new(|v: &[f64]| stats::quantile(v, 0.75))),
        ("max", Box::new(|v: &[f64]| stats::quantile(v, 1.0))),
    ];

    for (label, compute) in &rows {
        let _ = write!(out, "  {label:<8}");
        for values in &finite {
            let _ = write!(out, " {:>CELL_WIDTH$.4}", compute(values));
        }
        let _ = writeln!(out);
    }
    out
}

fn truncated(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len - 3])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Column, ColumnValues, DataTable};

    fn sample_table() -> DataTable {
        DataTable::new(vec![
            Column::new(
                "DateTime",
                ColumnValues::Text(vec![
                    "2024-03-01 09:00:00".to_string(),
                    "2024-03-01 10:30:00".to_string(),
                    "2024-03-02 11:00:00".to_string(),
                ]),
            ),
            Column::new(
                "TransactionNo",
                ColumnValues::Numeric(vec![3.0, 4.0, f64::NAN]),
            ),
        ])
        .unwrap()
    }

    #[test]
    fn schema_lists_every_column_with_dtype() {
        let summary = schema_summary(&sample_table());
        assert!(summary.contains("3 rows x 2 columns"));
        assert!(summary.contains("DateTime"));
        assert!(summary.contains("text"));
        assert!(summary.contains("TransactionNo"));
        assert!(summary.contains("numeric"));
    }

    #[test]
    fn schema_reports_non_null_counts() {
        let summary = schema_summary(&sample_table());
        // TransactionNo has one NaN out of three values.
        let line = summary
            .lines()
            .find(|l| l.contains("TransactionNo"))
            .unwrap();
        assert!(line.trim_end().ends_with('2'));
    }

    #[test]
    fn head_is_limited_to_requested_rows() {
        let preview = head(&sample_table(), 2);
        assert!(preview.contains("2024-03-01 09:00:00"));
        assert!(!preview.contains("2024-03-02 11:00:00"));
    }

    #[test]
    fn describe_covers_numeric_columns_only() {
        let report = describe(&sample_table());
        assert!(report.contains("TransactionNo"));
        assert!(!report.contains("DateTime"));
        assert!(report.contains("count"));
        assert!(report.contains("mean"));
        assert!(report.contains("75%"));
    }

    #[test]
    fn describe_skips_missing_values() {
        let report = describe(&sample_table());
        let count_line = report.lines().find(|l| l.contains("count")).unwrap();
        assert!(count_line.contains('2'));
        let mean_line = report.lines().find(|l| l.contains("mean")).unwrap();
        assert!(mean_line.contains("3.5"));
    }

    #[test]
    fn describe_without_numeric_columns_degrades_gracefully() {
        let table = DataTable::new(vec![Column::new(
            "Items",
            ColumnValues::Text(vec!["bread".to_string()]),
        )])
        .unwrap();
        assert!(describe(&table).contains("no numeric columns"));
    }
}
