//! Date parsing and conversion between polars `Date` columns and day numbers
//!
//! Dates are handled as `i32` days since 1970-01-01, the physical
//! representation of a polars `Date`.

use anyhow::Result;
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use polars::prelude::*;

use super::error::CleanError;

/// Days from 0001-01-01 (CE day 1) to 1970-01-01
const EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Date formats tried in order for text cells. `%y` precedes `%Y` since
/// `%Y` would also accept a two-digit year.
const DATE_FORMATS: [&str; 7] = [
    "%Y-%m-%d",
    "%m/%d/%y",
    "%m/%d/%Y",
    "%Y/%m/%d",
    "%d-%b-%Y",
    "%B %d, %Y",
    "%b %d, %Y",
];

/// Date-time formats; the time part is discarded
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%m/%d/%Y %H:%M",
];

pub fn date_to_days(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - EPOCH_DAYS_FROM_CE
}

pub fn days_to_date(days: i32) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(days.checked_add(EPOCH_DAYS_FROM_CE)?)
}

/// Parse a text cell into a date, `None` when no accepted format matches
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// January 1 of `year`, for years in `1..=9999`
pub fn year_start(year: i64) -> Option<NaiveDate> {
    if !(1..=9999).contains(&year) {
        return None;
    }
    NaiveDate::from_ymd_opt(year as i32, 1, 1)
}

/// Parse a year cell given as text: exactly four ASCII digits
pub fn parse_year(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.len() != 4 || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    year_start(trimmed.parse().ok()?)
}

/// Calendar quarter (1-4) of a month (1-12)
pub fn quarter_of_month(month: u32) -> u32 {
    (month - 1) / 3 + 1
}

/// Read a date-like column as day numbers.
///
/// `Date` and `Datetime` columns are read directly, text columns are parsed
/// cell by cell with unparseable cells becoming `None`, and all-null columns
/// yield all `None`. Any other type is rejected.
pub fn date_days(series: &Series) -> Result<Vec<Option<i32>>> {
    match series.dtype() {
        DataType::Date => physical_days(series),
        DataType::Datetime(_, _) => physical_days(&series.cast(&DataType::Date)?),
        DataType::String | DataType::Categorical(_, _) => {
            let text = series.cast(&DataType::String)?;
            Ok(text
                .str()?
                .into_iter()
                .map(|v| v.and_then(parse_date).map(date_to_days))
                .collect())
        }
        DataType::Null => Ok(vec![None; series.len()]),
        other => Err(CleanError::UnexpectedType {
            column: series.name().to_string(),
            expected: "date, datetime or text",
            found: other.to_string(),
        }
        .into()),
    }
}

fn physical_days(series: &Series) -> Result<Vec<Option<i32>>> {
    let physical = series.cast(&DataType::Int32)?;
    Ok(physical.i32()?.into_iter().collect())
}

/// Build a `Date` series from day numbers
pub fn date_series(name: &str, days: Vec<Option<i32>>) -> Result<Series> {
    let physical = Series::new(name.into(), days);
    Ok(physical.cast(&DataType::Date)?)
}
