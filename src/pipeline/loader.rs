//! Dataset loader for CSV and Parquet files

use anyhow::{Context, Result};
use polars::prelude::*;
use std::path::Path;
use tracing::debug;

use super::error::CleanError;
use super::schema::{has_column, ID_COLUMN, SOURCE_ID_COLUMN};

/// Lowercased extension of `path`, empty when there is none
pub(crate) fn file_extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// Load a dataset from a file (CSV or Parquet based on extension).
///
/// `infer_schema_length` is the number of CSV rows used for type inference;
/// `0` scans the whole file.
pub fn load_dataset(path: &Path, infer_schema_length: usize) -> Result<DataFrame> {
    let extension = file_extension(path);

    let df = match extension.as_str() {
        "csv" => {
            let schema_length = if infer_schema_length == 0 {
                None
            } else {
                Some(infer_schema_length)
            };

            CsvReadOptions::default()
                .with_has_header(true)
                .with_infer_schema_length(schema_length)
                .try_into_reader_with_file_path(Some(path.to_path_buf()))
                .with_context(|| format!("Failed to open CSV file: {}", path.display()))?
                .finish()
                .with_context(|| format!("Failed to load CSV file: {}", path.display()))?
        }
        "parquet" => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("Failed to open Parquet file: {}", path.display()))?;
            ParquetReader::new(file)
                .finish()
                .with_context(|| format!("Failed to load Parquet file: {}", path.display()))?
        }
        _ => return Err(CleanError::UnsupportedFormat { extension }.into()),
    };

    debug!(rows = df.height(), cols = df.width(), "loaded {}", path.display());
    Ok(df)
}

/// Load a dataset and report its shape and estimated memory footprint.
///
/// Returns `(frame, rows, columns, memory_mb)`.
pub fn load_dataset_with_progress(
    path: &Path,
    infer_schema_length: usize,
) -> Result<(DataFrame, usize, usize, f64)> {
    let df = load_dataset(path, infer_schema_length)?;
    let (rows, cols) = df.shape();
    let memory_mb = df.estimated_size() as f64 / (1024.0 * 1024.0);
    Ok((df, rows, cols, memory_mb))
}

/// Rename the source `Number` column to `ID`.
///
/// Skipped when `Number` is absent or `ID` already exists. Returns whether
/// the rename happened.
pub fn rename_id_column(df: &mut DataFrame) -> Result<bool> {
    if !has_column(df, SOURCE_ID_COLUMN) || has_column(df, ID_COLUMN) {
        return Ok(false);
    }

    df.rename(SOURCE_ID_COLUMN, ID_COLUMN.into())
        .with_context(|| format!("Failed to rename '{}' to '{}'", SOURCE_ID_COLUMN, ID_COLUMN))?;
    Ok(true)
}
