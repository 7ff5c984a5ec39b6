//! Missing value analysis, high-null column removal and imputation

use anyhow::{Context, Result};
use polars::prelude::*;
use serde::Serialize;
use tracing::debug;

use super::error::CleanError;
use super::profile::null_counts;
use super::schema::{is_integer_dtype, is_numeric_dtype, is_text_dtype, UNKNOWN_SENTINEL};

/// Default ratio above which a column is dropped
pub const DEFAULT_MISSING_THRESHOLD: f64 = 0.8;

/// How a single column's nulls were filled
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Imputation {
    /// Text column filled with the sentinel
    Sentinel { column: String, filled: usize },
    /// Numeric column filled with its median
    Median {
        column: String,
        median: f64,
        filled: usize,
    },
}

/// Outcome of [`handle_missing_values`]
#[derive(Debug, Clone, Default, Serialize)]
pub struct MissingReport {
    pub nulls_before: Vec<(String, usize)>,
    pub dropped_columns: Vec<String>,
    pub imputations: Vec<Imputation>,
    pub nulls_after: Vec<(String, usize)>,
}

/// Fraction of null cells per column, in frame order.
///
/// An empty frame has no defined ratios and yields an empty list.
pub fn analyze_missing_values(df: &DataFrame) -> Result<Vec<(String, f64)>> {
    if df.height() == 0 {
        return Ok(Vec::new());
    }

    let total = df.height() as f64;
    Ok(df
        .get_columns()
        .iter()
        .map(|c| (c.name().to_string(), c.null_count() as f64 / total))
        .collect())
}

/// Columns whose missing ratio is strictly above `threshold`
pub fn get_columns_above_threshold(missing_ratios: &[(String, f64)], threshold: f64) -> Vec<String> {
    missing_ratios
        .iter()
        .filter(|(_, ratio)| *ratio > threshold)
        .map(|(name, _)| name.clone())
        .collect()
}

/// Drop high-null columns, then impute what remains.
///
/// Text and categorical columns get [`UNKNOWN_SENTINEL`]; numeric columns get
/// their own median, computed after the drop. Other column types keep their
/// nulls.
pub fn handle_missing_values(df: DataFrame, threshold: f64) -> Result<(DataFrame, MissingReport)> {
    if !(0.0..=1.0).contains(&threshold) {
        return Err(CleanError::InvalidThreshold {
            name: "missing threshold",
            value: threshold,
        }
        .into());
    }

    let nulls_before = null_counts(&df);
    let ratios = analyze_missing_values(&df)?;
    let dropped_columns = get_columns_above_threshold(&ratios, threshold);

    let mut df = if dropped_columns.is_empty() {
        df
    } else {
        debug!(?dropped_columns, threshold, "dropping high-null columns");
        df.drop_many(&dropped_columns)
    };

    let imputations = impute_missing_values(&mut df)?;

    let report = MissingReport {
        nulls_before,
        dropped_columns,
        imputations,
        nulls_after: null_counts(&df),
    };
    Ok((df, report))
}

/// Fill nulls in every text and numeric column of `df`
pub fn impute_missing_values(df: &mut DataFrame) -> Result<Vec<Imputation>> {
    let mut imputations = Vec::new();
    let names: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();

    for name in names {
        let series = df.column(&name)?.as_materialized_series().clone();
        let nulls = series.null_count();
        if nulls == 0 {
            continue;
        }

        let dtype = series.dtype().clone();
        if is_text_dtype(&dtype) {
            let filled = fill_text_nulls(&series, UNKNOWN_SENTINEL)?;
            df.with_column(filled)
                .with_context(|| format!("Failed to impute column '{}'", name))?;
            imputations.push(Imputation::Sentinel { column: name, filled: nulls });
        } else if is_numeric_dtype(&dtype) {
            let Some(median) = series.median() else {
                debug!(column = %name, "all-null numeric column has no median");
                continue;
            };
            let filled = fill_numeric_nulls(&series, median)?;
            df.with_column(filled)
                .with_context(|| format!("Failed to impute column '{}'", name))?;
            imputations.push(Imputation::Median {
                column: name,
                median,
                filled: nulls,
            });
        }
    }

    Ok(imputations)
}

/// Replace nulls in a text or categorical series, preserving its type
pub fn fill_text_nulls(series: &Series, fill: &str) -> Result<Series> {
    let text = series.cast(&DataType::String)?;
    let values: Vec<&str> = text.str()?.into_iter().map(|v| v.unwrap_or(fill)).collect();
    let filled = Series::new(series.name().clone(), values);

    if matches!(series.dtype(), DataType::Categorical(_, _)) {
        Ok(filled.cast(series.dtype())?)
    } else {
        Ok(filled)
    }
}

/// Replace nulls in a numeric series with `value`. Non-null cells are kept.
///
/// Integer series keep their type when `value` is integral and are widened
/// to `Float64` otherwise.
pub fn fill_numeric_nulls(series: &Series, value: f64) -> Result<Series> {
    let target = if is_integer_dtype(series.dtype()) && value.fract() == 0.0 {
        series.dtype().clone()
    } else if series.dtype() == &DataType::Float32 {
        DataType::Float32
    } else {
        DataType::Float64
    };

    let base = series.cast(&target)?;
    let fill = Series::new(series.name().clone(), vec![value; series.len()]).cast(&target)?;
    Ok(base.zip_with(&series.is_not_null(), &fill)?)
}
