//! Command-line argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

use crate::pipeline::{EncodingOrder, PipelineConfig, DEFAULT_MISSING_THRESHOLD};

/// breachclean - Clean a breach-notification dataset and derive model-ready features
#[derive(Parser, Debug)]
#[command(name = "breachclean")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input file path (CSV or Parquet)
    #[arg(short, long, default_value = "data/main_dataset.csv")]
    pub input: PathBuf,

    /// Output file path (CSV or Parquet, determined by extension).
    /// Missing parent directories are created.
    #[arg(short, long, default_value = "outputs/Cleaned_main_dataset.csv")]
    pub output: PathBuf,

    /// Missing value threshold - drop columns with a null ratio above this
    #[arg(long, default_value_t = DEFAULT_MISSING_THRESHOLD, value_parser = validate_ratio)]
    pub missing_threshold: f64,

    /// Order in which categorical values receive integer codes
    #[arg(long, value_enum, default_value_t = EncodingOrder::FirstSeen)]
    pub encoding_order: EncodingOrder,

    /// Number of rows shown in the dataset preview
    #[arg(long, default_value = "10")]
    pub head_rows: usize,

    /// Number of rows to use for schema inference (CSV only).
    /// Use 0 for full table scan.
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,

    /// Write the run summary as JSON to this path
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Overwrite an existing output file without asking
    #[arg(long, default_value = "false")]
    pub no_confirm: bool,

    /// Enable debug logging on stderr (RUST_LOG takes precedence)
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,
}

impl Cli {
    /// Pipeline options selected on the command line
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            missing_threshold: self.missing_threshold,
            encoding_order: self.encoding_order,
        }
    }
}

/// Validator for ratio thresholds
fn validate_ratio(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if !(0.0..=1.0).contains(&value) {
        Err(format!("threshold must be between 0.0 and 1.0, got {}", value))
    } else {
        Ok(value)
    }
}
