//! End-to-end cleaning pipeline over an in-memory dataset

use anyhow::Result;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::info;

use super::aggregate::summarize_by_breach_type;
use super::coerce::coerce_types;
use super::dedup::remove_duplicates;
use super::encode::{CategoryEncoder, EncodingOrder};
use super::error::CleanError;
use super::fallback::apply_date_fallback;
use super::features::derive_calendar_features;
use super::loader::rename_id_column;
use super::missing::{handle_missing_values, DEFAULT_MISSING_THRESHOLD};
use super::prune::prune_columns;
use super::schema::ColumnPresence;
use crate::report::CleaningSummary;

/// Tunable options of a cleaning run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Columns with a null ratio strictly above this are dropped
    pub missing_threshold: f64,
    pub encoding_order: EncodingOrder,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            missing_threshold: DEFAULT_MISSING_THRESHOLD,
            encoding_order: EncodingOrder::default(),
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.missing_threshold) {
            return Err(CleanError::InvalidThreshold {
                name: "missing threshold",
                value: self.missing_threshold,
            }
            .into());
        }
        Ok(())
    }
}

/// Cleaned dataset together with what was done to it
#[derive(Debug)]
pub struct CleaningOutcome {
    pub df: DataFrame,
    pub summary: CleaningSummary,
}

/// Steps of a run, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStep {
    RenameId,
    MissingValues,
    Duplicates,
    TypeCoercion,
    Pruning,
    DateFallback,
    CalendarFeatures,
    Encoding,
    BreachSummary,
}

impl PipelineStep {
    pub const ALL: [PipelineStep; 9] = [
        PipelineStep::RenameId,
        PipelineStep::MissingValues,
        PipelineStep::Duplicates,
        PipelineStep::TypeCoercion,
        PipelineStep::Pruning,
        PipelineStep::DateFallback,
        PipelineStep::CalendarFeatures,
        PipelineStep::Encoding,
        PipelineStep::BreachSummary,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            PipelineStep::RenameId => "Rename Identifier",
            PipelineStep::MissingValues => "Missing Value Handling",
            PipelineStep::Duplicates => "Duplicate Removal",
            PipelineStep::TypeCoercion => "Type Conversion",
            PipelineStep::Pruning => "Column Pruning",
            PipelineStep::DateFallback => "Breach Date Fallback",
            PipelineStep::CalendarFeatures => "Feature Derivation",
            PipelineStep::Encoding => "Categorical Encoding",
            PipelineStep::BreachSummary => "Average Individuals Affected per Breach Type",
        }
    }
}

/// Applies every cleaning step, in order, to one dataset
#[derive(Debug, Clone, Default)]
pub struct CleaningPipeline {
    config: PipelineConfig,
}

impl CleaningPipeline {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run rename, missing-value handling, deduplication, type coercion,
    /// pruning, date fallback, calendar features, encoding and aggregation.
    pub fn run(&self, df: DataFrame) -> Result<CleaningOutcome> {
        self.run_with(df, |_, _, _| {})
    }

    /// Like [`run`](Self::run), calling `on_step` after each step with the
    /// summary so far and the time the step took.
    pub fn run_with<F>(&self, df: DataFrame, mut on_step: F) -> Result<CleaningOutcome>
    where
        F: FnMut(PipelineStep, &CleaningSummary, Duration),
    {
        let (rows, cols) = df.shape();
        let mut summary = CleaningSummary::new(rows, cols);
        let mut df = df;

        let start = Instant::now();
        summary.renamed_id = rename_id_column(&mut df)?;
        on_step(PipelineStep::RenameId, &summary, start.elapsed());

        let start = Instant::now();
        let (df, missing) = handle_missing_values(df, self.config.missing_threshold)?;
        summary.set_missing(missing);
        on_step(PipelineStep::MissingValues, &summary, start.elapsed());

        let start = Instant::now();
        let (mut df, removed) = remove_duplicates(df)?;
        summary.set_duplicates_removed(removed);
        on_step(PipelineStep::Duplicates, &summary, start.elapsed());

        let start = Instant::now();
        let presence = ColumnPresence::detect(&df);
        summary.set_coercion(coerce_types(&mut df, &presence)?);
        on_step(PipelineStep::TypeCoercion, &summary, start.elapsed());

        let start = Instant::now();
        let (mut df, pruned) = prune_columns(df);
        summary.set_pruned(pruned);
        on_step(PipelineStep::Pruning, &summary, start.elapsed());

        let start = Instant::now();
        let presence = ColumnPresence::detect(&df);
        summary.set_date_fallback(apply_date_fallback(&mut df, &presence)?);
        on_step(PipelineStep::DateFallback, &summary, start.elapsed());

        let start = Instant::now();
        summary.set_features(derive_calendar_features(&mut df)?);
        on_step(PipelineStep::CalendarFeatures, &summary, start.elapsed());

        let start = Instant::now();
        let encoder = CategoryEncoder::new(self.config.encoding_order);
        summary.set_encoded(encoder.encode_categoricals(&mut df)?);
        on_step(PipelineStep::Encoding, &summary, start.elapsed());

        let start = Instant::now();
        summary.set_breach_summary(summarize_by_breach_type(&df)?);
        let (rows, cols) = df.shape();
        summary.set_final_shape(rows, cols);
        on_step(PipelineStep::BreachSummary, &summary, start.elapsed());

        info!(rows, cols, "cleaning pipeline finished");
        Ok(CleaningOutcome { df, summary })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_threshold_rejected_up_front() {
        let config = PipelineConfig {
            missing_threshold: -0.1,
            ..Default::default()
        };
        assert!(CleaningPipeline::new(config).is_err());
    }

    #[test]
    fn test_run_with_reports_every_step_in_order() {
        let df = df! {
            "Number" => [1i64, 2, 2],
            "State" => ["TX", "CA", "CA"],
        }
        .unwrap();

        let mut seen = Vec::new();
        let outcome = CleaningPipeline::default()
            .run_with(df, |step, summary, _| seen.push((step, summary.duplicates_removed)))
            .unwrap();

        let steps: Vec<PipelineStep> = seen.iter().map(|(step, _)| *step).collect();
        assert_eq!(steps, PipelineStep::ALL);
        // The duplicate count is visible from the duplicate step onwards
        assert_eq!(seen[1].1, 0);
        assert_eq!(seen[2].1, 1);
        assert_eq!(outcome.summary.final_rows, 2);
    }

    #[test]
    fn test_default_config_values() {
        let config = PipelineConfig::default();
        assert_eq!(config.missing_threshold, 0.8);
        assert_eq!(config.encoding_order, EncodingOrder::FirstSeen);
    }
}
