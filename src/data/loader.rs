use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{
    Array, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array,
    StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{CellValue, Table};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one sample per line (e.g. `blood_transfusion.csv`)
/// * `.json`    – `[{ "Recency": 2, ..., "Class": "donated" }, ...]`
/// * `.parquet` – flat file with scalar columns
pub fn load_file(path: &Path) -> Result<Table> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::info!(
        "Loaded {} rows with columns {:?} from {}",
        table.len(),
        table.column_names,
        path.display()
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, every later row one sample.
/// Cell types are guessed per cell (integer, float, bool, text, empty → null).
pub fn load_csv(path: &Path) -> Result<Table> {
    let reader = csv::Reader::from_path(path).context("opening CSV")?;
    read_csv(reader)
}

/// Parse CSV text that is already in memory.
pub fn parse_csv_str(text: &str) -> Result<Table> {
    read_csv(csv::Reader::from_reader(text.as_bytes()))
}

fn read_csv<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Table> {
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    if headers.is_empty() {
        bail!("CSV has no header row");
    }

    let mut rows = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        if record.len() != headers.len() {
            bail!(
                "CSV row {row_no}: expected {} fields but found {}",
                headers.len(),
                record.len()
            );
        }
        rows.push(record.iter().map(|v| guess_cell_type(v.trim())).collect());
    }

    Ok(Table::from_rows(headers, rows))
}

fn guess_cell_type(s: &str) -> CellValue {
    if s.is_empty() {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return CellValue::Float(f);
    }
    if s == "true" || s == "false" {
        return CellValue::Bool(s == "true");
    }
    CellValue::String(s.to_string())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Recency": 2, "Frequency": 50, "Monetary": 12500, "Time": 98, "Class": "donated" },
///   ...
/// ]
/// ```
///
/// Columns are taken from the first record; later records must carry the
/// same keys.
fn load_json(path: &Path) -> Result<Table> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root.as_array().context("Expected top-level JSON array")?;

    let headers: Vec<String> = match records.first() {
        Some(first) => first
            .as_object()
            .context("Row 0 is not a JSON object")?
            .keys()
            .cloned()
            .collect(),
        None => Vec::new(),
    };

    let mut rows = Vec::with_capacity(records.len());

    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let row = headers
            .iter()
            .map(|key| {
                obj.get(key)
                    .map(json_to_cell)
                    .with_context(|| format!("Row {i}: missing key '{key}'"))
            })
            .collect::<Result<Vec<_>>>()?;
        rows.push(row);
    }

    Ok(Table::from_rows(headers, rows))
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a flat Parquet file.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`), as long as every column is a scalar
/// (strings, ints, floats, bools).
fn load_parquet(path: &Path) -> Result<Table> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;

        for row in 0..batch.num_rows() {
            let cells = (0..batch.num_columns())
                .map(|col| extract_cell_value(batch.column(col), row))
                .collect::<Result<Vec<_>>>()
                .with_context(|| format!("Row {}", rows.len()))?;
            rows.push(cells);
        }
    }

    Ok(Table::from_rows(headers, rows))
}

// -- Parquet / Arrow helpers --

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell_value(col: &Arc<dyn Array>, row: usize) -> Result<CellValue> {
    if col.is_null(row) {
        return Ok(CellValue::Null);
    }
    let cell = match col.data_type() {
        DataType::Utf8 => {
            let arr = downcast::<StringArray>(col)?;
            CellValue::String(arr.value(row).to_string())
        }
        DataType::LargeUtf8 => CellValue::String(col.as_string::<i64>().value(row).to_string()),
        DataType::Int32 => CellValue::Integer(downcast::<Int32Array>(col)?.value(row) as i64),
        DataType::Int64 => CellValue::Integer(downcast::<Int64Array>(col)?.value(row)),
        DataType::Float32 => CellValue::Float(downcast::<Float32Array>(col)?.value(row) as f64),
        DataType::Float64 => CellValue::Float(downcast::<Float64Array>(col)?.value(row)),
        DataType::Boolean => CellValue::Bool(downcast::<BooleanArray>(col)?.value(row)),
        other => bail!("Unsupported column type {other:?}; expected a scalar column"),
    };
    Ok(cell)
}

fn downcast<T: 'static>(col: &Arc<dyn Array>) -> Result<&T> {
    col.as_any()
        .downcast_ref::<T>()
        .with_context(|| format!("column of type {:?} has an unexpected layout", col.data_type()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_cells_are_typed() {
        let table = parse_csv_str("Recency,Monetary,Class\n2,1250.5,donated\n,3,not donated\n")
            .unwrap();
        assert_eq!(table.column_names, vec!["Recency", "Monetary", "Class"]);
        assert_eq!(table.rows[0][0], CellValue::Integer(2));
        assert_eq!(table.rows[0][1], CellValue::Float(1250.5));
        assert_eq!(table.rows[1][0], CellValue::Null);
        assert_eq!(table.unique_values["Class"].len(), 2);
    }

    #[test]
    fn csv_with_ragged_row_is_rejected() {
        assert!(parse_csv_str("a,b\n1,2\n3\n").is_err());
    }

    #[test]
    fn json_records_load_as_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blood.json");
        std::fs::write(
            &path,
            r#"[{"Recency": 2, "Class": "donated"}, {"Recency": 4.5, "Class": "not donated"}]"#,
        )
        .unwrap();
        let table = load_file(&path).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.column_names, vec!["Recency", "Class"]);
        assert_eq!(table.rows[1][0], CellValue::Float(4.5));
    }

    #[test]
    fn json_columns_keep_file_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blood.json");
        std::fs::write(
            &path,
            r#"[{"Time": 98, "Recency": 2, "Monetary": 12500, "Class": "donated"}]"#,
        )
        .unwrap();
        let table = load_file(&path).unwrap();
        assert_eq!(table.column_names, vec!["Time", "Recency", "Monetary", "Class"]);
        let data = table.split_target("Class").unwrap();
        assert_eq!(data.feature_names, vec!["Time", "Recency", "Monetary"]);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        assert!(load_file(Path::new("scores.xlsx")).is_err());
    }
}
