use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use arrow::array::Array;
use arrow::util::display::array_value_to_string;
use log::{info, warn};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{Dataset, Row};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a registration table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one record per line (the published export)
/// * `.json`    – `[{ "Make": "TESLA", "Model Year": 2020, ... }, ...]`
/// * `.parquet` – any flat schema; every cell is rendered to text
///
/// Every cell is kept as its raw text. Empty CSV cells and nulls are
/// stored as absent.
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }?;

    info!(
        "loaded {} rows ({} columns) from {}",
        dataset.len(),
        dataset.column_names().len(),
        path.display()
    );
    Ok(dataset)
}

/// Like [`load_file`], but a failed load degrades to an empty dataset so
/// every view renders empty instead of aborting.
pub fn load_or_empty(path: &Path) -> Dataset {
    match load_file(path) {
        Ok(ds) => ds,
        Err(err) => {
            warn!("failed to load {}: {err:#}", path.display());
            Dataset::empty()
        }
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path).context("opening CSV")?;
    read_csv(file)
}

/// Parse CSV text with a header row into a dataset.
///
/// Bytes that are not valid UTF-8 are replaced with U+FFFD instead of
/// failing the whole load.
pub fn read_csv<R: Read>(source: R) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(source);
    let headers: Vec<String> = reader
        .byte_headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| String::from_utf8_lossy(h).into_owned())
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.byte_records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let row: Row = headers
            .iter()
            .zip(record.iter())
            .filter(|(_, value)| !value.is_empty())
            .map(|(name, value)| (name.as_str(), String::from_utf8_lossy(value)))
            .collect();
        rows.push(row);
    }

    Ok(Dataset::from_rows(rows))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Make": "TESLA", "Model": "MODEL 3", "Model Year": 2020, "Electric Range": 266 },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    read_json(&text)
}

/// Parse a records-oriented JSON array into a dataset.
pub fn read_json(text: &str) -> Result<Dataset> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;
    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut rows = Vec::with_capacity(records.len());
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        let row: Row = obj
            .iter()
            .filter_map(|(key, val)| json_to_cell(val).map(|cell| (key.as_str(), cell)))
            .collect();
        rows.push(row);
    }

    Ok(Dataset::from_rows(rows))
}

fn json_to_cell(val: &JsonValue) -> Option<String> {
    match val {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file written by Pandas (`df.to_parquet()`) or Polars
/// (`df.write_parquet()`). Nested columns are rendered with Arrow's display
/// formatting.
fn load_parquet(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        for row_idx in 0..batch.num_rows() {
            let mut row = Row::new();
            for (col_idx, field) in schema.fields().iter().enumerate() {
                let column = batch.column(col_idx);
                if column.is_null(row_idx) {
                    continue;
                }
                let cell = array_value_to_string(column, row_idx).with_context(|| {
                    format!("Row {row_idx}: failed to read '{}'", field.name())
                })?;
                row.insert(field.name().as_str(), cell);
            }
            rows.push(row);
        }
    }

    Ok(Dataset::from_rows(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{ELECTRIC_RANGE, MAKE, MODEL_YEAR};

    #[test]
    fn csv_cells_stay_raw_and_empty_cells_are_absent() {
        let text = "Make,Model Year,Electric Range\nTESLA,2020,266\nKIA,,0\n";
        let ds = read_csv(text.as_bytes()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.rows()[0].get(MODEL_YEAR), Some("2020"));
        assert_eq!(ds.rows()[1].get(MODEL_YEAR), None);
        assert_eq!(ds.rows()[1].get(ELECTRIC_RANGE), Some("0"));
    }

    #[test]
    fn invalid_utf8_cell_is_replaced_not_fatal() {
        let ds = read_csv(&b"Make,City\nKIA,Yak\xffima\n"[..]).unwrap();
        assert_eq!(ds.rows()[0].get("City"), Some("Yak\u{FFFD}ima"));
    }

    #[test]
    fn short_csv_records_are_accepted() {
        let ds = read_csv("Make,City\nNISSAN\n".as_bytes()).unwrap();
        assert_eq!(ds.rows()[0].get(MAKE), Some("NISSAN"));
        assert_eq!(ds.rows()[0].get("City"), None);
    }

    #[test]
    fn json_scalars_are_stringified() {
        let text = r#"[{"Make":"BMW","Model Year":2019,"Clean":true,"City":null}]"#;
        let ds = read_json(text).unwrap();
        let row = &ds.rows()[0];
        assert_eq!(row.get(MAKE), Some("BMW"));
        assert_eq!(row.get(MODEL_YEAR), Some("2019"));
        assert_eq!(row.get("Clean"), Some("true"));
        assert_eq!(row.get("City"), None);
    }

    #[test]
    fn json_must_be_an_array_of_objects() {
        assert!(read_json(r#"{"Make":"BMW"}"#).is_err());
        assert!(read_json(r#"[1, 2]"#).is_err());
    }

    #[test]
    fn unknown_extension_fails_and_degrades_to_empty() {
        let path = Path::new("registrations.xlsx");
        assert!(load_file(path).is_err());
        assert!(load_or_empty(path).is_empty());
    }
}
