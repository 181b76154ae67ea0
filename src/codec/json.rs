//! JSON record-array codec

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::Value;

use crate::model::{CellValue, DataFrame};

use super::RecordCodec;

/// Codec for JSON files holding an array of objects, one object per row.
///
/// Reading takes the union of object keys, in first-appearance order, as
/// the column list; an absent key is the missing marker. Writing emits
/// one object per row with keys in column order and the missing marker
/// as JSON `null`.
pub struct JsonCodec;

impl RecordCodec for JsonCodec {
    fn read(&self, path: &Path) -> Result<DataFrame> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open JSON file: {}", path.display()))?;
        let reader = BufReader::new(file);

        let value: Value = serde_json::from_reader(reader).context("Failed to parse JSON file")?;

        // A single top-level object is a one-row table
        let array = match value {
            Value::Array(arr) => arr,
            Value::Object(_) => vec![value],
            _ => bail!("JSON must be an array or object"),
        };

        let mut records = Vec::with_capacity(array.len());
        for item in &array {
            let Value::Object(obj) = item else {
                bail!("JSON array items must be objects");
            };
            records.push(
                obj.iter()
                    .map(|(key, v)| (key.clone(), json_value_to_cell(v)))
                    .collect::<Vec<_>>(),
            );
        }

        Ok(DataFrame::from_records(&records)?)
    }

    fn write(&self, frame: &DataFrame, path: &Path) -> Result<()> {
        let mut rows = Vec::with_capacity(frame.row_count());
        for row in 0..frame.row_count() {
            let mut object = serde_json::Map::new();
            for column in frame.columns() {
                let cell = serde_json::to_value(&column.values()[row])
                    .context("Failed to serialize cell")?;
                object.insert(column.name().to_string(), cell);
            }
            rows.push(Value::Object(object));
        }

        let file = File::create(path)
            .with_context(|| format!("Failed to create JSON file: {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &Value::Array(rows))
            .context("Failed to write JSON file")?;
        Ok(())
    }

    fn supports_extension(&self, ext: &str) -> bool {
        ext == "json"
    }
}

fn json_value_to_cell(value: &Value) -> CellValue {
    match value {
        Value::Null => CellValue::Null,
        Value::Bool(b) => CellValue::Bool(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Int(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::Str(n.to_string())
            }
        }
        Value::String(s) => CellValue::parse_temporal(s).unwrap_or_else(|| CellValue::Str(s.clone())),
        // nested structure flattens to its JSON text
        Value::Array(_) | Value::Object(_) => {
            CellValue::Str(serde_json::to_string(value).unwrap_or_default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_value_to_cell() {
        assert_eq!(json_value_to_cell(&Value::Null), CellValue::Null);
        assert_eq!(json_value_to_cell(&serde_json::json!(42)), CellValue::Int(42));
        assert_eq!(
            json_value_to_cell(&serde_json::json!(2.5)),
            CellValue::Float(2.5)
        );
        assert_eq!(
            json_value_to_cell(&serde_json::json!("hi")),
            CellValue::from("hi")
        );
        assert!(matches!(
            json_value_to_cell(&serde_json::json!("2023-05-01")),
            CellValue::Date(_)
        ));
    }
}
