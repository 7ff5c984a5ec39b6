//! Well-known column names and the typed record of which ones are present

use polars::prelude::*;

/// Source identifier column, renamed to [`ID_COLUMN`] on load
pub const SOURCE_ID_COLUMN: &str = "Number";
pub const ID_COLUMN: &str = "ID";

pub const YEAR_COLUMN: &str = "year";
pub const BREACH_DATE_COLUMN: &str = "Date_of_Breach";
pub const POSTED_DATE_COLUMN: &str = "Date_Posted_or_Updated";
pub const BREACH_START_COLUMN: &str = "breach_start";
pub const BREACH_END_COLUMN: &str = "breach_end";

pub const ENTITY_COLUMN: &str = "Name_of_Covered_Entity";
pub const STATE_COLUMN: &str = "State";
pub const BREACH_TYPE_COLUMN: &str = "Type_of_Breach";
pub const LOCATION_COLUMN: &str = "Location_of_Breached_Information";
pub const BUSINESS_ASSOCIATE_COLUMN: &str = "Business_Associate_Involved";

pub const INDIVIDUALS_AFFECTED_COLUMN: &str = "Individuals_Affected";

pub const BREACH_MONTH_COLUMN: &str = "Breach_Month";
pub const BREACH_QUARTER_COLUMN: &str = "Breach_Quarter";
pub const AVG_AFFECTED_COLUMN: &str = "Avg_Individuals_Affected";

/// Suffix appended to a categorical column name for its integer codes
pub const ENCODED_SUFFIX: &str = "_Encoded";

/// Sentinel written into text cells that were null
pub const UNKNOWN_SENTINEL: &str = "Unknown";

/// Columns parsed into dates by the type coercer
pub const DATE_COLUMNS: [&str; 4] = [
    BREACH_DATE_COLUMN,
    POSTED_DATE_COLUMN,
    BREACH_START_COLUMN,
    BREACH_END_COLUMN,
];

/// Columns cast to categorical by the type coercer
pub const CATEGORICAL_COLUMNS: [&str; 5] = [
    ENTITY_COLUMN,
    STATE_COLUMN,
    BREACH_TYPE_COLUMN,
    LOCATION_COLUMN,
    BUSINESS_ASSOCIATE_COLUMN,
];

/// Columns the pruner removes whenever they exist
pub const DENYLISTED_COLUMNS: [&str; 2] = ["Unnamed: 0", BUSINESS_ASSOCIATE_COLUMN];

/// Which of the well-known columns a frame currently carries.
///
/// Taken as a snapshot: steps that add or drop columns invalidate it, so the
/// pipeline re-detects at the start of each stage that branches on presence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnPresence {
    pub source_id: bool,
    pub id: bool,
    pub year: bool,
    pub breach_date: bool,
    pub breach_start: bool,
    pub breach_type: bool,
    pub individuals_affected: bool,
    /// Date columns present, in [`DATE_COLUMNS`] order
    pub date_columns: Vec<&'static str>,
    /// Categorical candidates present, in [`CATEGORICAL_COLUMNS`] order
    pub categorical_columns: Vec<&'static str>,
}

impl ColumnPresence {
    pub fn detect(df: &DataFrame) -> Self {
        let has = |name: &str| has_column(df, name);

        Self {
            source_id: has(SOURCE_ID_COLUMN),
            id: has(ID_COLUMN),
            year: has(YEAR_COLUMN),
            breach_date: has(BREACH_DATE_COLUMN),
            breach_start: has(BREACH_START_COLUMN),
            breach_type: has(BREACH_TYPE_COLUMN),
            individuals_affected: has(INDIVIDUALS_AFFECTED_COLUMN),
            date_columns: DATE_COLUMNS.iter().copied().filter(|c| has(c)).collect(),
            categorical_columns: CATEGORICAL_COLUMNS
                .iter()
                .copied()
                .filter(|c| has(c))
                .collect(),
        }
    }
}

/// Whether `df` has a column called `name`
pub fn has_column(df: &DataFrame, name: &str) -> bool {
    df.get_column_names().iter().any(|c| c.as_str() == name)
}

pub fn is_integer_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    )
}

pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    is_integer_dtype(dtype) || matches!(dtype, DataType::Float32 | DataType::Float64)
}

/// Text-like columns: plain strings and categoricals
pub fn is_text_dtype(dtype: &DataType) -> bool {
    matches!(dtype, DataType::String | DataType::Categorical(_, _))
}

/// Short human-readable dtype label used in console output and reports
pub fn dtype_label(dtype: &DataType) -> String {
    match dtype {
        DataType::String => "str".to_string(),
        DataType::Categorical(_, _) => "category".to_string(),
        DataType::Date => "date".to_string(),
        DataType::Datetime(_, _) => "datetime".to_string(),
        DataType::Boolean => "bool".to_string(),
        other => other.to_string(),
    }
}
