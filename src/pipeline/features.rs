//! Calendar features derived from the breach date

use anyhow::{Context, Result};
use chrono::Datelike;
use polars::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use super::schema::{has_column, BREACH_DATE_COLUMN, BREACH_MONTH_COLUMN, BREACH_QUARTER_COLUMN};
use super::temporal::{date_days, days_to_date, quarter_of_month};

/// Outcome of [`derive_calendar_features`]
#[derive(Debug, Clone, Default, Serialize)]
pub struct FeatureReport {
    pub derived: Vec<String>,
    /// Month used for rows without a breach date
    pub month_mode: Option<i32>,
    /// Rows whose month and quarter came from the mode
    pub filled: usize,
}

/// Most frequent value; ties go to the smallest value. `None` when every
/// value is null.
pub fn mode_smallest<I>(values: I) -> Option<i32>
where
    I: IntoIterator<Item = Option<i32>>,
{
    let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
    for v in values.into_iter().flatten() {
        *counts.entry(v).or_default() += 1;
    }

    let mut best: Option<(i32, usize)> = None;
    for (value, count) in counts {
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value)
}

/// Add `Breach_Month` (1-12) and `Breach_Quarter` (1-4) from `Date_of_Breach`.
///
/// Rows without a breach date take the month mode, and the quarter of that
/// month, so month and quarter always agree. Skipped when the breach date
/// column is absent.
pub fn derive_calendar_features(df: &mut DataFrame) -> Result<FeatureReport> {
    let mut report = FeatureReport::default();
    if !has_column(df, BREACH_DATE_COLUMN) {
        return Ok(report);
    }

    let months: Vec<Option<i32>> =
        date_days(df.column(BREACH_DATE_COLUMN)?.as_materialized_series())?
            .into_iter()
            .map(|d| d.and_then(days_to_date).map(|date| date.month() as i32))
            .collect();

    let mode = mode_smallest(months.iter().copied());
    report.month_mode = mode;
    report.filled = if mode.is_some() {
        months.iter().filter(|m| m.is_none()).count()
    } else {
        0
    };

    let months: Vec<Option<i32>> = months.into_iter().map(|m| m.or(mode)).collect();
    let quarters: Vec<Option<i32>> = months
        .iter()
        .map(|m| m.map(|month| quarter_of_month(month as u32) as i32))
        .collect();

    df.with_column(Series::new(BREACH_MONTH_COLUMN.into(), months))
        .with_context(|| format!("Failed to add '{}'", BREACH_MONTH_COLUMN))?;
    df.with_column(Series::new(BREACH_QUARTER_COLUMN.into(), quarters))
        .with_context(|| format!("Failed to add '{}'", BREACH_QUARTER_COLUMN))?;

    report.derived = vec![
        BREACH_MONTH_COLUMN.to_string(),
        BREACH_QUARTER_COLUMN.to_string(),
    ];
    debug!(mode = ?report.month_mode, filled = report.filled, "derived calendar features");
    Ok(report)
}
