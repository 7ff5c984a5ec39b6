//! Output writer for CSV and Parquet files

use anyhow::{Context, Result};
use polars::prelude::*;
use std::path::Path;
use tracing::debug;

use super::error::CleanError;
use super::loader::file_extension;

/// Save dataset to file (CSV or Parquet based on extension).
///
/// The parent directory is created when missing. No row index is written.
pub fn save_dataset(df: &mut DataFrame, path: &Path) -> Result<()> {
    let extension = file_extension(path);
    if !matches!(extension.as_str(), "csv" | "parquet") {
        return Err(CleanError::UnsupportedFormat { extension }.into());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }

    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;

    if extension == "csv" {
        let mut file = file;
        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(df)
            .with_context(|| format!("Failed to write CSV file: {}", path.display()))?;
    } else {
        ParquetWriter::new(file)
            .finish(df)
            .with_context(|| format!("Failed to write Parquet file: {}", path.display()))?;
    }

    debug!(rows = df.height(), cols = df.width(), "wrote {}", path.display());
    Ok(())
}
