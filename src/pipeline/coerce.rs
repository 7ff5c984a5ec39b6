//! Type coercion: year and date columns to `Date`, known text columns to `Categorical`

use anyhow::{Context, Result};
use polars::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};

use super::schema::{is_numeric_dtype, ColumnPresence, YEAR_COLUMN};
use super::temporal::{date_days, date_series, date_to_days, parse_year, year_start};

/// Columns changed by [`coerce_types`]
#[derive(Debug, Clone, Default, Serialize)]
pub struct CoercionReport {
    /// Columns converted to `Date`, with the number of cells that failed to parse
    pub dates: Vec<(String, usize)>,
    pub categoricals: Vec<String>,
}

/// Convert the well-known columns present in `df`.
///
/// - `year` becomes January 1 of that year.
/// - Each date column is parsed to a `Date`.
/// - Each categorical candidate is cast to `Categorical`.
///
/// Cells that cannot be converted become null.
pub fn coerce_types(df: &mut DataFrame, presence: &ColumnPresence) -> Result<CoercionReport> {
    let mut report = CoercionReport::default();

    if presence.year {
        let failed = coerce_year_column(df, YEAR_COLUMN)?;
        report.dates.push((YEAR_COLUMN.to_string(), failed));
    }

    for &name in &presence.date_columns {
        let failed = coerce_date_column(df, name)?;
        report.dates.push((name.to_string(), failed));
    }

    for &name in &presence.categorical_columns {
        coerce_categorical_column(df, name)?;
        report.categoricals.push(name.to_string());
    }

    Ok(report)
}

/// Replace a year column with January 1 of each year.
///
/// Integral numbers and four-digit strings are accepted. Returns the number of
/// non-null cells that could not be converted.
pub fn coerce_year_column(df: &mut DataFrame, name: &str) -> Result<usize> {
    let series = df.column(name)?.as_materialized_series().clone();

    let days: Vec<Option<i32>> = match series.dtype() {
        DataType::Date | DataType::Datetime(_, _) => date_days(&series)?,
        dtype if is_numeric_dtype(dtype) => {
            let floats = series.cast(&DataType::Float64)?;
            floats
                .f64()?
                .into_iter()
                .map(|v| {
                    v.filter(|y| y.is_finite() && y.fract() == 0.0)
                        .and_then(|y| year_start(y as i64))
                        .map(date_to_days)
                })
                .collect()
        }
        DataType::String | DataType::Categorical(_, _) => {
            let text = series.cast(&DataType::String)?;
            text.str()?
                .into_iter()
                .map(|v| v.and_then(parse_year).map(date_to_days))
                .collect()
        }
        other => {
            warn!(column = name, dtype = %other, "year column has no date interpretation");
            vec![None; series.len()]
        }
    };

    replace_with_dates(df, name, &series, days)
}

/// Parse a date column into a `Date`. Returns the number of non-null cells
/// that did not parse.
pub fn coerce_date_column(df: &mut DataFrame, name: &str) -> Result<usize> {
    let series = df.column(name)?.as_materialized_series().clone();

    let days = match series.dtype() {
        DataType::Date
        | DataType::Datetime(_, _)
        | DataType::String
        | DataType::Categorical(_, _)
        | DataType::Null => date_days(&series)?,
        other => {
            warn!(column = name, dtype = %other, "date column has no date interpretation");
            vec![None; series.len()]
        }
    };

    replace_with_dates(df, name, &series, days)
}

fn replace_with_dates(
    df: &mut DataFrame,
    name: &str,
    original: &Series,
    days: Vec<Option<i32>>,
) -> Result<usize> {
    let parsed = days.iter().filter(|d| d.is_some()).count();
    let failed = (original.len() - original.null_count()).saturating_sub(parsed);

    df.with_column(date_series(name, days)?)
        .with_context(|| format!("Failed to convert '{}' to dates", name))?;

    debug!(column = name, failed, "coerced to date");
    Ok(failed)
}

/// Cast a column to `Categorical`
pub fn coerce_categorical_column(df: &mut DataFrame, name: &str) -> Result<()> {
    let series = df.column(name)?.as_materialized_series();
    if matches!(series.dtype(), DataType::Categorical(_, _)) {
        return Ok(());
    }

    let categorical = series
        .cast(&DataType::String)?
        .cast(&DataType::Categorical(None, CategoricalOrdering::Physical))
        .with_context(|| format!("Failed to cast '{}' to categorical", name))?;
    df.with_column(categorical)?;
    Ok(())
}
