//! Filling missing breach dates from `breach_start` or the breach year

use anyhow::{Context, Result};
use chrono::Datelike;
use polars::prelude::*;
use serde::Serialize;
use tracing::debug;

use super::schema::{ColumnPresence, BREACH_DATE_COLUMN, BREACH_START_COLUMN, YEAR_COLUMN};
use super::temporal::{date_days, date_series, date_to_days, days_to_date, year_start};

/// Which source filled missing breach dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum DateFallback {
    /// `breach_start` supplied the missing dates
    BreachStart,
    /// January 1 of `year` supplied the missing dates
    YearStart,
    /// No fallback source, or no breach date column
    #[default]
    None,
}

impl std::fmt::Display for DateFallback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateFallback::BreachStart => write!(f, "{}", BREACH_START_COLUMN),
            DateFallback::YearStart => write!(f, "January 1 of {}", YEAR_COLUMN),
            DateFallback::None => write!(f, "none"),
        }
    }
}

/// Outcome of [`apply_date_fallback`]
#[derive(Debug, Clone, Default, Serialize)]
pub struct FallbackReport {
    pub source: DateFallback,
    pub filled: usize,
    pub dropped_breach_start: bool,
}

/// Fill null breach dates, then drop `breach_start` if present.
///
/// `breach_start` takes precedence over `year`; the two are never combined.
pub fn apply_date_fallback(df: &mut DataFrame, presence: &ColumnPresence) -> Result<FallbackReport> {
    let mut report = FallbackReport::default();

    if presence.breach_date {
        if presence.breach_start {
            let source = date_days(df.column(BREACH_START_COLUMN)?.as_materialized_series())?;
            report.filled = fill_breach_dates(df, &source)?;
            report.source = DateFallback::BreachStart;
        } else if presence.year {
            let source: Vec<Option<i32>> =
                date_days(df.column(YEAR_COLUMN)?.as_materialized_series())?
                    .into_iter()
                    .map(|d| {
                        d.and_then(days_to_date)
                            .and_then(|date| year_start(date.year() as i64))
                            .map(date_to_days)
                    })
                    .collect();
            report.filled = fill_breach_dates(df, &source)?;
            report.source = DateFallback::YearStart;
        }
    }

    if presence.breach_start {
        df.drop_in_place(BREACH_START_COLUMN)
            .with_context(|| format!("Failed to drop '{}'", BREACH_START_COLUMN))?;
        report.dropped_breach_start = true;
    }

    debug!(source = %report.source, filled = report.filled, "applied date fallback");
    Ok(report)
}

/// Fill null breach dates row-wise from `source`. Returns the number filled.
fn fill_breach_dates(df: &mut DataFrame, source: &[Option<i32>]) -> Result<usize> {
    let current = date_days(df.column(BREACH_DATE_COLUMN)?.as_materialized_series())?;

    let mut filled = 0;
    let merged: Vec<Option<i32>> = current
        .into_iter()
        .zip(source.iter())
        .map(|(value, fallback)| match (value, fallback) {
            (Some(v), _) => Some(v),
            (None, Some(f)) => {
                filled += 1;
                Some(*f)
            }
            (None, None) => None,
        })
        .collect();

    df.with_column(date_series(BREACH_DATE_COLUMN, merged)?)
        .with_context(|| format!("Failed to update '{}'", BREACH_DATE_COLUMN))?;
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::schema::has_column;
    use chrono::NaiveDate;

    fn days(y: i32, m: u32, d: u32) -> Option<i32> {
        Some(date_to_days(NaiveDate::from_ymd_opt(y, m, d).unwrap()))
    }

    fn breach_dates(df: &DataFrame) -> Vec<Option<i32>> {
        date_days(df.column(BREACH_DATE_COLUMN).unwrap().as_materialized_series()).unwrap()
    }

    #[test]
    fn test_breach_start_takes_precedence_over_year() {
        let mut df = DataFrame::new(vec![
            date_series("Date_of_Breach", vec![days(2015, 3, 1), None]).unwrap().into(),
            date_series("breach_start", vec![days(2015, 2, 1), days(2016, 5, 9)]).unwrap().into(),
            date_series("year", vec![days(2010, 1, 1), days(2010, 1, 1)]).unwrap().into(),
        ])
        .unwrap();
        let presence = ColumnPresence::detect(&df);

        let report = apply_date_fallback(&mut df, &presence).unwrap();

        assert_eq!(report.source, DateFallback::BreachStart);
        assert_eq!(report.filled, 1);
        assert!(report.dropped_breach_start);
        assert!(!has_column(&df, "breach_start"));
        assert_eq!(breach_dates(&df), vec![days(2015, 3, 1), days(2016, 5, 9)]);
    }

    #[test]
    fn test_year_fallback_synthesizes_january_first() {
        let mut df = DataFrame::new(vec![
            date_series("Date_of_Breach", vec![None, days(2018, 7, 4), None]).unwrap().into(),
            date_series("year", vec![days(2020, 1, 1), days(2018, 1, 1), None]).unwrap().into(),
        ])
        .unwrap();
        let presence = ColumnPresence::detect(&df);

        let report = apply_date_fallback(&mut df, &presence).unwrap();

        assert_eq!(report.source, DateFallback::YearStart);
        assert_eq!(report.filled, 1);
        assert!(!report.dropped_breach_start);
        assert_eq!(
            breach_dates(&df),
            vec![days(2020, 1, 1), days(2018, 7, 4), None]
        );
    }

    #[test]
    fn test_breach_start_dropped_without_breach_date() {
        let mut df = DataFrame::new(vec![
            date_series("breach_start", vec![days(2015, 2, 1)]).unwrap().into(),
        ])
        .unwrap();
        let presence = ColumnPresence::detect(&df);

        let report = apply_date_fallback(&mut df, &presence).unwrap();

        assert_eq!(report.source, DateFallback::None);
        assert!(report.dropped_breach_start);
        assert_eq!(df.width(), 0);
    }

    #[test]
    fn test_no_columns_is_a_no_op() {
        let mut df = df! { "State" => ["TX"] }.unwrap();
        let presence = ColumnPresence::detect(&df);

        let report = apply_date_fallback(&mut df, &presence).unwrap();

        assert_eq!(report.source, DateFallback::None);
        assert!(!report.dropped_breach_start);
        assert_eq!(df.width(), 1);
    }
}
