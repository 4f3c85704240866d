//! Decoding CSV and JSON files into [`Dataset`]s.
//!
//! CSV goes through polars' reader (with fallbacks for badly quoted files);
//! JSON must be an array of flat objects.

use std::fs::File;
use std::io::Cursor;
use std::path::Path;

use polars::prelude::*;
use tracing::{debug, info};

use crate::error::{InsightError, Result, ResultExt};
use crate::types::{Dataset, Record, Value};

/// Convert a polars [`DataFrame`] into a [`Dataset`].
///
/// Numeric columns become [`Value::Number`], boolean columns
/// [`Value::Bool`], everything else its string form. Nulls become
/// [`Value::Missing`].
pub fn dataset_from_dataframe(df: &DataFrame) -> Result<Dataset> {
    let headers: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    let mut records: Vec<Record> = (0..df.height())
        .map(|_| Record::with_capacity(headers.len()))
        .collect();

    for column in df.get_columns() {
        let name = column.name().to_string();
        let values = series_values(column.as_materialized_series())
            .context(format!("Failed to decode column '{name}'"))?;
        for (record, value) in records.iter_mut().zip(values) {
            record.insert(name.clone(), value);
        }
    }

    Ok(Dataset::new(headers, records))
}

fn series_values(series: &Series) -> Result<Vec<Value>> {
    let values: Vec<Value> = match series.dtype() {
        DataType::Boolean => series
            .bool()?
            .into_iter()
            .map(|v| v.map_or(Value::Missing, Value::Bool))
            .collect(),
        DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32
        | DataType::UInt64
        | DataType::Float32
        | DataType::Float64 => {
            let floats = series.cast(&DataType::Float64)?;
            floats
                .f64()?
                .into_iter()
                .map(|v| v.map_or(Value::Missing, Value::Number))
                .collect()
        }
        _ => {
            let strings = series.cast(&DataType::String)?;
            strings
                .str()?
                .into_iter()
                .map(|v| v.map_or(Value::Missing, Value::from))
                .collect()
        }
    };
    Ok(values)
}

/// Convert a [`Dataset`] back into a polars [`DataFrame`].
///
/// A column whose present values are all numbers becomes `Float64`, all
/// booleans becomes `Boolean`, anything else `String`.
pub fn dataframe_from_dataset(dataset: &Dataset) -> Result<DataFrame> {
    let columns: Vec<Column> = dataset
        .headers()
        .iter()
        .map(|header| column_from_dataset(dataset, header))
        .collect();
    Ok(DataFrame::new(columns)?)
}

fn column_from_dataset(dataset: &Dataset, name: &str) -> Column {
    let mut present = dataset.present_values(name).peekable();
    let has_values = present.peek().is_some();
    let (all_numbers, all_bools) = present.fold((has_values, has_values), |(n, b), v| {
        (
            n && matches!(v, Value::Number(_)),
            b && matches!(v, Value::Bool(_)),
        )
    });

    if all_numbers {
        let values: Vec<Option<f64>> = dataset
            .column_values(name)
            .map(|v| match v {
                Value::Number(n) => Some(*n),
                _ => None,
            })
            .collect();
        Series::new(name.into(), values).into()
    } else if all_bools {
        let values: Vec<Option<bool>> = dataset
            .column_values(name)
            .map(|v| match v {
                Value::Bool(b) => Some(*b),
                _ => None,
            })
            .collect();
        Series::new(name.into(), values).into()
    } else {
        let values: Vec<Option<String>> = dataset
            .column_values(name)
            .map(|v| (!v.is_missing()).then(|| v.to_text().into_owned()))
            .collect();
        Series::new(name.into(), values).into()
    }
}

/// Write a dataset as CSV with a header row.
pub fn write_csv(dataset: &Dataset, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let mut df = dataframe_from_dataset(dataset)?;
    let mut file = File::create(path)?;

    CsvWriter::new(&mut file)
        .include_header(true)
        .with_separator(b',')
        .with_quote_char(b'"')
        .finish(&mut df)?;

    info!("Dataset saved: {}", path.display());
    Ok(())
}

/// Rows as a JSON array of objects whose keys follow `headers`.
pub fn records_to_json(headers: &[String], rows: &[&Record]) -> serde_json::Value {
    let rows = rows
        .iter()
        .map(|record| {
            let object: serde_json::Map<String, serde_json::Value> = headers
                .iter()
                .map(|header| {
                    let value = record.get(header).map_or(serde_json::Value::Null, to_json);
                    (header.clone(), value)
                })
                .collect();
            serde_json::Value::Object(object)
        })
        .collect();
    serde_json::Value::Array(rows)
}

fn to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Missing => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Number(n) => serde_json::Number::from_f64(*n)
            .map_or(serde_json::Value::Null, serde_json::Value::Number),
        Value::Text(s) => serde_json::Value::String(s.clone()),
    }
}

/// Load a CSV file, retrying with looser parsing when the first attempt fails.
pub fn read_csv(path: impl AsRef<Path>) -> Result<Dataset> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Err(InsightError::EmptyDataset);
    }

    let df = load_csv_with_fallbacks(path, &content)
        .context(format!("Failed to read CSV file {}", path.display()))?;
    if df.height() == 0 {
        return Err(InsightError::EmptyDataset);
    }

    info!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "Loaded CSV"
    );
    dataset_from_dataframe(&df)
}

fn load_csv_with_fallbacks(path: &Path, content: &str) -> PolarsResult<DataFrame> {
    // Strategy 1: standard loading with quote handling
    match CsvReadOptions::default()
        .with_infer_schema_length(Some(100))
        .with_has_header(true)
        .with_parse_options(CsvParseOptions::default().with_quote_char(Some(b'"')))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()
    {
        Ok(df) => return Ok(df),
        Err(e) => debug!("Standard CSV loading failed: {}", e),
    }

    // Strategy 2: no quote handling
    match CsvReadOptions::default()
        .with_infer_schema_length(Some(100))
        .with_has_header(true)
        .with_parse_options(CsvParseOptions::default().with_quote_char(None))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()
    {
        Ok(df) => return Ok(df),
        Err(e) => debug!("CSV loading without quotes failed: {}", e),
    }

    // Strategy 3: collapse doubled quotes and blank lines, then parse from memory
    CsvReadOptions::default()
        .with_infer_schema_length(Some(100))
        .with_has_header(true)
        .into_reader_with_file_handle(Cursor::new(clean_csv_content(content)))
        .finish()
}

fn clean_csv_content(content: &str) -> String {
    content
        .replace("\"\"\"", "\"")
        .replace("\"\"", "\"")
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse a JSON array of objects.
///
/// Headers are the union of object keys in first-seen order. Nested arrays
/// and objects are kept as their JSON text.
pub fn parse_json_records(json: &str) -> Result<Dataset> {
    let parsed: serde_json::Value = serde_json::from_str(json)?;
    let serde_json::Value::Array(items) = parsed else {
        return Err(InsightError::UnsupportedFormat(
            "JSON input must be an array of objects".to_string(),
        ));
    };

    let mut headers: Vec<String> = Vec::new();
    let mut records = Vec::with_capacity(items.len());
    for item in items {
        let serde_json::Value::Object(object) = item else {
            return Err(InsightError::UnsupportedFormat(
                "JSON rows must be objects".to_string(),
            ));
        };
        let mut record = Record::with_capacity(object.len());
        for (key, value) in object {
            if !headers.contains(&key) {
                headers.push(key.clone());
            }
            record.insert(key, json_value(value));
        }
        records.push(record);
    }

    if records.is_empty() {
        return Err(InsightError::EmptyDataset);
    }
    Ok(Dataset::new(headers, records))
}

fn json_value(value: serde_json::Value) -> Value {
    match value {
        serde_json::Value::Null => Value::Missing,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => n.as_f64().map_or(Value::Missing, Value::Number),
        serde_json::Value::String(s) => Value::Text(s),
        other => Value::Text(other.to_string()),
    }
}

/// Load a JSON file holding an array of objects.
pub fn read_json(path: impl AsRef<Path>) -> Result<Dataset> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Err(InsightError::EmptyDataset);
    }
    let dataset =
        parse_json_records(&content).context(format!("Failed to read JSON file {}", path.display()))?;
    info!(
        path = %path.display(),
        rows = dataset.len(),
        columns = dataset.headers().len(),
        "Loaded JSON"
    );
    Ok(dataset)
}

/// Load a `.csv` or `.json` file, chosen by extension.
pub fn read_dataset(path: impl AsRef<Path>) -> Result<Dataset> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "csv" => read_csv(path),
        "json" => read_json(path),
        other => Err(InsightError::UnsupportedFormat(if other.is_empty() {
            format!("{} has no file extension", path.display())
        } else {
            format!(".{other}")
        })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_from_dataframe() {
        let df = DataFrame::new(vec![
            Series::new("Region".into(), &["North", "South"]).into(),
            Series::new("Units".into(), &[Some(3i64), None]).into(),
            Series::new("Price".into(), &[1.5f64, 2.0]).into(),
            Series::new("Active".into(), &[true, false]).into(),
        ])
        .unwrap();

        let ds = dataset_from_dataframe(&df).unwrap();
        assert_eq!(ds.headers(), ["Region", "Units", "Price", "Active"]);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.value(0, "Region"), &Value::from("North"));
        assert_eq!(ds.value(0, "Units"), &Value::Number(3.0));
        assert_eq!(ds.value(1, "Units"), &Value::Missing);
        assert_eq!(ds.value(1, "Price"), &Value::Number(2.0));
        assert_eq!(ds.value(1, "Active"), &Value::Bool(false));
    }

    #[test]
    fn test_dataframe_round_trip() {
        let ds = parse_json_records(
            r#"[
                {"city": "Taipei", "visits": 3, "member": true},
                {"city": null, "visits": 4.5, "member": false},
                {"city": "Tainan", "visits": "n/a"}
            ]"#,
        )
        .unwrap();
        let df = dataframe_from_dataset(&ds).unwrap();

        assert_eq!(df.shape(), (3, 3));
        assert_eq!(df.column("city").unwrap().dtype(), &DataType::String);
        // "n/a" makes the column textual
        assert_eq!(df.column("visits").unwrap().dtype(), &DataType::String);
        assert_eq!(df.column("member").unwrap().dtype(), &DataType::Boolean);

        let back = dataset_from_dataframe(&df).unwrap();
        assert_eq!(back.headers(), ds.headers());
        assert_eq!(back.value(1, "city"), &Value::Missing);
        assert_eq!(back.value(0, "visits"), &Value::from("3"));
        assert_eq!(back.value(2, "member"), &Value::Missing);
    }

    #[test]
    fn test_records_to_json_follows_headers() {
        let ds = parse_json_records(r#"[{"b": 1, "a": "x"}, {"a": "y"}]"#).unwrap();
        let rows: Vec<&Record> = ds.records().iter().collect();
        let json = records_to_json(ds.headers(), &rows);

        assert_eq!(
            serde_json::to_string(&json).unwrap(),
            r#"[{"b":1.0,"a":"x"},{"b":null,"a":"y"}]"#
        );
    }

    #[test]
    fn test_parse_json_records() {
        let json = r#"[
            {"name": "a", "score": 1, "tags": ["x"]},
            {"score": null, "extra": true, "name": "b"}
        ]"#;
        let ds = parse_json_records(json).unwrap();

        assert_eq!(ds.headers(), ["name", "score", "tags", "extra"]);
        assert_eq!(ds.value(0, "score"), &Value::Number(1.0));
        assert_eq!(ds.value(1, "score"), &Value::Missing);
        assert_eq!(ds.value(0, "tags"), &Value::from(r#"["x"]"#));
        assert_eq!(ds.value(0, "extra"), &Value::Missing);
        assert_eq!(ds.value(1, "extra"), &Value::Bool(true));
    }

    #[test]
    fn test_parse_json_rejects_non_arrays() {
        let err = parse_json_records(r#"{"a": 1}"#).unwrap_err();
        assert_eq!(err.error_code(), "UNSUPPORTED_FORMAT");

        let err = parse_json_records("[1, 2]").unwrap_err();
        assert_eq!(err.error_code(), "UNSUPPORTED_FORMAT");
    }

    #[test]
    fn test_parse_json_empty_array() {
        let err = parse_json_records("[]").unwrap_err();
        assert!(err.is_no_data());
    }

    #[test]
    fn test_clean_csv_content() {
        let cleaned = clean_csv_content("a,b\n\n\"\"x\"\",1\n   \n");
        assert_eq!(cleaned, "a,b\n\"x\",1");
    }

    #[test]
    fn test_read_dataset_unsupported_extension() {
        let err = read_dataset("data.xlsx").unwrap_err();
        assert_eq!(err.error_code(), "UNSUPPORTED_FORMAT");
        assert!(err.to_string().contains(".xlsx"));
    }
}
