//! CSV record codec

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use anyhow::{Context, Result};

use crate::model::{CellValue, Column, DataFrame};

use super::RecordCodec;

/// Codec for delimited-text files with a header row.
///
/// Reading infers cell kinds from the text; an empty cell is the missing
/// marker. Writing emits each cell's display form, the missing marker as
/// an empty field, so kinds are re-inferred on the way back in.
pub struct CsvCodec;

impl RecordCodec for CsvCodec {
    fn read(&self, path: &Path) -> Result<DataFrame> {
        let file =
            File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
        let reader = BufReader::new(file);
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader
            .headers()
            .context("Failed to read CSV headers")?
            .clone();
        let names: Vec<String> = headers.iter().map(|name| name.to_string()).collect();

        let mut cells: Vec<Vec<CellValue>> = vec![Vec::new(); names.len()];
        for (row_num, result) in csv_reader.records().enumerate() {
            let record = result
                .with_context(|| format!("Failed to read CSV row {}", row_num + 2))?; // +2 for 1-indexing and header
            for (idx, column) in cells.iter_mut().enumerate() {
                // short rows pad with the missing marker
                column.push(
                    record
                        .get(idx)
                        .map(CellValue::infer)
                        .unwrap_or(CellValue::Null),
                );
            }
        }

        let columns = names
            .into_iter()
            .zip(cells)
            .map(|(name, values)| Column::new(name, values))
            .collect();
        Ok(DataFrame::from_columns(columns)?)
    }

    fn write(&self, frame: &DataFrame, path: &Path) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create file: {}", path.display()))?;
        let mut writer = csv::Writer::from_writer(BufWriter::new(file));

        writer
            .write_record(frame.column_names())
            .context("Failed to write CSV header")?;
        for row in 0..frame.row_count() {
            let record: Vec<String> = frame
                .columns()
                .iter()
                .map(|col| match &col.values()[row] {
                    CellValue::Null => String::new(),
                    cell => cell.to_string(),
                })
                .collect();
            writer
                .write_record(&record)
                .with_context(|| format!("Failed to write CSV row {}", row + 2))?;
        }
        writer.flush().context("Failed to flush CSV output")?;
        Ok(())
    }

    fn supports_extension(&self, ext: &str) -> bool {
        matches!(ext, "csv" | "tsv" | "txt")
    }
}
