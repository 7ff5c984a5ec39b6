//! Shared test utilities and fixture generators
#![allow(dead_code)]

use polars::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// A small breach-notification table with the usual quirks.
///
/// This DataFrame includes:
/// - `Unnamed: 0`: index artifact (pruned)
/// - `Number`: source id (renamed to `ID`)
/// - `Name_of_Covered_Entity`, `State`, `Type_of_Breach`: categorical text
/// - `Individuals_Affected`: numeric with one null (median-imputed)
/// - `Date_of_Breach`: dates as text, one missing, one unparseable range
/// - `breach_start`: fallback dates (used, then dropped)
/// - `Business_Associate_Involved`: denylisted
/// - `Notes`: 90% missing (dropped)
/// - row 9 duplicates row 8 exactly
pub fn create_breach_dataframe() -> DataFrame {
    df! {
        "Unnamed: 0" => [0i64, 1, 2, 3, 4, 5, 6, 7, 8, 8],
        "Number" => [1i64, 2, 3, 4, 5, 6, 7, 8, 9, 9],
        "Name_of_Covered_Entity" => [
            Some("Acme Health"), Some("Brightside Clinic"), Some("Acme Health"), None,
            Some("County Hospital"), Some("Delta Dental"), Some("Eastside Labs"),
            Some("Fairview Pharmacy"), Some("Grove Medical"), Some("Grove Medical"),
        ],
        "State" => ["TX", "CA", "TX", "NY", "CA", "FL", "WA", "TX", "OR", "OR"],
        "Type_of_Breach" => [
            "Theft", "Hacking/IT Incident", "Theft", "Loss", "Hacking/IT Incident",
            "Unauthorized Access/Disclosure", "Theft", "Loss", "Hacking/IT Incident",
            "Hacking/IT Incident",
        ],
        "Individuals_Affected" => [
            Some(1000i64), Some(5000), None, Some(700), Some(9000), Some(1200), Some(800),
            Some(650), Some(3000), Some(3000),
        ],
        "Date_of_Breach" => [
            Some("01/15/2010"), Some("03/02/2010"), None, Some("10/16/2009 - 10/20/2009"),
            Some("07/04/2011"), Some("11/30/2011"), Some("02/14/2012"), Some("05/05/2012"),
            Some("08/21/2012"), Some("08/21/2012"),
        ],
        "breach_start" => [
            Some("2010-01-15"), Some("2010-03-02"), Some("2010-06-01"), Some("2009-10-16"),
            Some("2011-07-04"), None, Some("2012-02-14"), Some("2012-05-05"),
            Some("2012-08-21"), Some("2012-08-21"),
        ],
        "Business_Associate_Involved" => [
            Some("No"), Some("Yes"), Some("No"), None, Some("No"), Some("No"), Some("Yes"),
            Some("No"), Some("No"), Some("No"),
        ],
        "Notes" => [
            Some("paper records"), None, None, None, None, None, None, None, None, None,
        ],
    }
    .unwrap()
}

/// Rows that rely on the year fallback: no `breach_start` column at all
pub fn create_year_fallback_dataframe() -> DataFrame {
    df! {
        "year" => [2020i64, 2018, 2019],
        "Date_of_Breach" => [None, Some("07/04/2018"), Some("not a date")],
        "Type_of_Breach" => ["Theft", "Loss", "Theft"],
        "Individuals_Affected" => [10i64, 20, 30],
    }
    .unwrap()
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("main_dataset.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Assert that a DataFrame has expected shape
pub fn assert_shape(df: &DataFrame, expected_rows: usize, expected_cols: usize) {
    let (rows, cols) = df.shape();
    assert_eq!(rows, expected_rows, "Row count mismatch: expected {}, got {}", expected_rows, rows);
    assert_eq!(cols, expected_cols, "Column count mismatch: expected {}, got {}", expected_cols, cols);
}

/// Assert that a DataFrame contains specific columns
pub fn assert_has_columns(df: &DataFrame, expected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in expected_cols {
        assert!(
            actual_cols.contains(&col.to_string()),
            "Missing expected column: '{}'. Actual columns: {:?}",
            col,
            actual_cols
        );
    }
}

/// Assert that a DataFrame does NOT contain specific columns
pub fn assert_missing_columns(df: &DataFrame, unexpected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in unexpected_cols {
        assert!(
            !actual_cols.contains(&col.to_string()),
            "Unexpected column still present: '{}'",
            col
        );
    }
}

/// Integer values of a column, cast to i64
pub fn i64_values(df: &DataFrame, name: &str) -> Vec<Option<i64>> {
    df.column(name)
        .unwrap()
        .as_materialized_series()
        .cast(&DataType::Int64)
        .unwrap()
        .i64()
        .unwrap()
        .into_iter()
        .collect()
}

/// String values of a column, cast to String
pub fn str_values(df: &DataFrame, name: &str) -> Vec<Option<String>> {
    df.column(name)
        .unwrap()
        .as_materialized_series()
        .cast(&DataType::String)
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect()
}
