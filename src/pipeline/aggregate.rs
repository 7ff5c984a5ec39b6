//! Average individuals affected per breach type

use anyhow::{Context, Result};
use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Table};
use polars::prelude::*;
use serde::Serialize;
use tracing::warn;

use super::schema::{
    has_column, AVG_AFFECTED_COLUMN, BREACH_TYPE_COLUMN, INDIVIDUALS_AFFECTED_COLUMN,
};

/// One row of the breach-type summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreachTypeSummary {
    /// `None` for rows whose breach type is null
    pub breach_type: Option<String>,
    /// `None` when the group has no numeric affected counts
    pub avg_individuals_affected: Option<f64>,
}

/// Group by `Type_of_Breach` and average `Individuals_Affected`.
///
/// Groups are sorted by breach type. Returns `None` when either column is
/// missing.
pub fn summarize_by_breach_type(df: &DataFrame) -> Result<Option<Vec<BreachTypeSummary>>> {
    if !has_column(df, BREACH_TYPE_COLUMN) {
        return Ok(None);
    }
    if !has_column(df, INDIVIDUALS_AFFECTED_COLUMN) {
        warn!(
            "'{}' present but '{}' missing, skipping breach summary",
            BREACH_TYPE_COLUMN, INDIVIDUALS_AFFECTED_COLUMN
        );
        return Ok(None);
    }

    let grouped = df
        .clone()
        .lazy()
        .select([
            col(BREACH_TYPE_COLUMN).cast(DataType::String),
            col(INDIVIDUALS_AFFECTED_COLUMN).cast(DataType::Float64),
        ])
        .group_by([col(BREACH_TYPE_COLUMN)])
        .agg([col(INDIVIDUALS_AFFECTED_COLUMN)
            .mean()
            .alias(AVG_AFFECTED_COLUMN)])
        .sort_by_exprs([col(BREACH_TYPE_COLUMN)], SortMultipleOptions::default())
        .collect()
        .context("Failed to aggregate individuals affected by breach type")?;

    let types = grouped.column(BREACH_TYPE_COLUMN)?.as_materialized_series().clone();
    let means = grouped.column(AVG_AFFECTED_COLUMN)?.as_materialized_series().clone();

    let summary = types
        .str()?
        .into_iter()
        .zip(means.f64()?.into_iter())
        .map(|(breach_type, avg)| BreachTypeSummary {
            breach_type: breach_type.map(str::to_string),
            avg_individuals_affected: avg,
        })
        .collect();

    Ok(Some(summary))
}

/// Render the summary as an indented table
pub fn breach_summary_table(summary: &[BreachTypeSummary]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new(BREACH_TYPE_COLUMN).add_attribute(Attribute::Bold),
        Cell::new(AVG_AFFECTED_COLUMN).add_attribute(Attribute::Bold),
    ]);

    for row in summary {
        table.add_row(vec![
            Cell::new(row.breach_type.as_deref().unwrap_or("null")),
            Cell::new(
                row.avg_individuals_affected
                    .map_or_else(|| "-".to_string(), |v| format!("{:.2}", v)),
            )
            .set_alignment(CellAlignment::Right),
        ]);
    }

    table
        .to_string()
        .lines()
        .map(|line| format!("    {}", line))
        .collect::<Vec<_>>()
        .join("\n")
}
