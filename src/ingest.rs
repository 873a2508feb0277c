//! CSV loading for the transaction table.

use crate::core::{Column, ColumnValues, DataTable};
use crate::error::{PipelineError, Result};
use std::path::Path;
use tracing::debug;

/// Load a CSV file into a [`DataTable`].
///
/// The first record is treated as the header row. Each column is inferred
/// as numeric when every non-empty field parses as `f64` (empty fields
/// become `NaN`), and kept as text otherwise. No further validation happens
/// here; the cleaner decides what the pipeline actually needs.
pub fn load_table(path: impl AsRef<Path>) -> Result<DataTable> {
    let path = path.as_ref();
    let load_error = |message: String| PipelineError::Load {
        path: path.display().to_string(),
        message,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| load_error(e.to_string()))?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| load_error(e.to_string()))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut fields: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    for record in reader.records() {
        let record = record.map_err(|e| load_error(e.to_string()))?;
        if record.len() != headers.len() {
            return Err(load_error(format!(
                "expected {} fields per record, got {}",
                headers.len(),
                record.len()
            )));
        }
        for (column, field) in fields.iter_mut().zip(record.iter()) {
            column.push(field.to_string());
        }
    }

    let columns: Vec<Column> = headers
        .into_iter()
        .zip(fields)
        .map(|(name, raw)| Column::new(name, infer_values(raw)))
        .collect();

    let table = DataTable::new(columns)?;
    debug!(
        rows = table.n_rows(),
        columns = table.n_columns(),
        "parsed csv"
    );
    Ok(table)
}

/// Infer a column as numeric or text from its raw fields.
fn infer_values(raw: Vec<String>) -> ColumnValues {
    let mut saw_number = false;
    for field in &raw {
        let field = field.trim();
        if field.is_empty() {
            continue;
        }
        if field.parse::<f64>().is_ok() {
            saw_number = true;
        } else {
            return ColumnValues::Text(raw);
        }
    }
    if !saw_number {
        // All-empty or no rows: keep as text rather than invent a dtype.
        return ColumnValues::Text(raw);
    }

    ColumnValues::Numeric(
        raw.iter()
            .map(|field| field.trim().parse::<f64>().unwrap_or(f64::NAN))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DType;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn loads_headers_and_rows() {
        let file = write_csv(
            "DateTime,TransactionNo,Items\n\
             2024-03-01 09:00:00,3,bread\n\
             2024-03-01 10:30:00,4,scone\n",
        );

        let table = load_table(file.path()).unwrap();
        assert_eq!(table.n_rows(), 2);
        assert_eq!(
            table.column_names(),
            vec!["DateTime", "TransactionNo", "Items"]
        );
    }

    #[test]
    fn infers_numeric_and_text_columns() {
        let file = write_csv(
            "DateTime,TransactionNo,Items\n\
             2024-03-01 09:00:00,3,bread\n\
             2024-03-01 10:30:00,4,scone\n",
        );

        let table = load_table(file.path()).unwrap();
        assert_eq!(table.column("DateTime").unwrap().dtype(), DType::Text);
        assert_eq!(table.column("TransactionNo").unwrap().dtype(), DType::Numeric);
        assert_eq!(table.column("Items").unwrap().dtype(), DType::Text);
        assert_eq!(
            table.column("TransactionNo").unwrap().as_numeric().unwrap(),
            &[3.0, 4.0]
        );
    }

    #[test]
    fn empty_fields_become_nan_in_numeric_columns() {
        let file = write_csv("n\n1\n\n3\n");
        let table = load_table(file.path()).unwrap();
        let values = table.column("n").unwrap().as_numeric().unwrap();
        assert_eq!(values.len(), 3);
        assert!(values[1].is_nan());
        assert_eq!(table.column("n").unwrap().non_null(), 2);
    }

    #[test]
    fn mixed_column_stays_text() {
        let file = write_csv("v\n1\ntwo\n3\n");
        let table = load_table(file.path()).unwrap();
        assert_eq!(table.column("v").unwrap().dtype(), DType::Text);
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let result = load_table("/no/such/dir/transactions.csv");
        assert!(matches!(result, Err(PipelineError::Load { .. })));
    }

    #[test]
    fn ragged_record_is_a_load_error() {
        let file = write_csv("a,b\n1,2\n3\n");
        let result = load_table(file.path());
        assert!(matches!(result, Err(PipelineError::Load { .. })));
    }

    #[test]
    fn header_only_file_yields_empty_table() {
        let file = write_csv("DateTime,TransactionNo\n");
        let table = load_table(file.path()).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.n_columns(), 2);
    }
}
