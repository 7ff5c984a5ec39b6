//! Removal of index artifacts and denylisted columns

use polars::prelude::*;
use tracing::debug;

use super::schema::DENYLISTED_COLUMNS;

/// Whether a column name is an unnamed index artifact (`Unnamed: 0`, or empty)
fn is_index_artifact(name: &str) -> bool {
    name.trim().is_empty() || name.starts_with("Unnamed:")
}

/// Names in `df` that the pruner would remove, in frame order
pub fn columns_to_prune(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|s| s.as_str())
        .filter(|name| DENYLISTED_COLUMNS.contains(name) || is_index_artifact(name))
        .map(str::to_string)
        .collect()
}

/// Drop denylisted columns and index artifacts. Absent columns are ignored.
pub fn prune_columns(df: DataFrame) -> (DataFrame, Vec<String>) {
    let dropped = columns_to_prune(&df);
    if dropped.is_empty() {
        return (df, dropped);
    }

    debug!(?dropped, "pruning columns");
    (df.drop_many(&dropped), dropped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prunes_denylist_and_artifacts() {
        let df = df! {
            "Unnamed: 0" => [0i64, 1],
            "State" => ["TX", "CA"],
            "Business_Associate_Involved" => ["Yes", "No"],
            "Unnamed: 12" => [None::<i64>, None],
        }
        .unwrap();

        let (df, dropped) = prune_columns(df);

        assert_eq!(
            dropped,
            vec!["Unnamed: 0", "Business_Associate_Involved", "Unnamed: 12"]
        );
        assert_eq!(df.get_column_names(), &["State"]);
    }

    #[test]
    fn test_absent_columns_tolerated() {
        let df = df! { "State" => ["TX"] }.unwrap();
        let (df, dropped) = prune_columns(df);
        assert!(dropped.is_empty());
        assert_eq!(df.width(), 1);
    }
}
