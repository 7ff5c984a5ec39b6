//! Dataset profiling: shape, column types, null counts and summary statistics

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Table};
use console::style;
use polars::prelude::*;
use serde::Serialize;

use super::schema::{dtype_label, is_numeric_dtype};

/// Per-column overview
#[derive(Debug, Clone, Serialize)]
pub struct ColumnInfo {
    pub name: String,
    pub dtype: String,
    pub non_null: usize,
    pub null_count: usize,
}

/// Descriptive statistics of one numeric column, computed over non-null values
#[derive(Debug, Clone, Serialize)]
pub struct NumericStats {
    pub name: String,
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub p25: Option<f64>,
    pub median: Option<f64>,
    pub p75: Option<f64>,
    pub max: Option<f64>,
}

/// Diagnostic snapshot of a dataset. Nothing here feeds back into cleaning.
#[derive(Debug, Clone)]
pub struct DatasetProfile {
    pub rows: usize,
    pub columns: Vec<ColumnInfo>,
    pub numeric: Vec<NumericStats>,
    pub head: DataFrame,
}

/// Profile `df`, keeping the first `head_rows` rows for display
pub fn profile_dataset(df: &DataFrame, head_rows: usize) -> Result<DatasetProfile> {
    let mut columns = Vec::with_capacity(df.width());
    let mut numeric = Vec::new();

    for column in df.get_columns() {
        let nulls = column.null_count();
        columns.push(ColumnInfo {
            name: column.name().to_string(),
            dtype: dtype_label(column.dtype()),
            non_null: column.len() - nulls,
            null_count: nulls,
        });

        if is_numeric_dtype(column.dtype()) {
            numeric.push(numeric_stats(column.as_materialized_series())?);
        }
    }

    Ok(DatasetProfile {
        rows: df.height(),
        columns,
        numeric,
        head: df.head(Some(head_rows)),
    })
}

/// Per-column null counts, in frame order
pub fn null_counts(df: &DataFrame) -> Vec<(String, usize)> {
    df.get_columns()
        .iter()
        .map(|c| (c.name().to_string(), c.null_count()))
        .collect()
}

fn numeric_stats(series: &Series) -> Result<NumericStats> {
    let floats = series.cast(&DataType::Float64)?;
    let mut values: Vec<f64> = floats
        .f64()?
        .into_iter()
        .flatten()
        .filter(|v| !v.is_nan())
        .collect();
    values.sort_by(f64::total_cmp);

    let count = values.len();
    let mean = (count > 0).then(|| values.iter().sum::<f64>() / count as f64);
    let std = match mean {
        Some(m) if count > 1 => {
            let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
            Some((ss / (count - 1) as f64).sqrt())
        }
        _ => None,
    };

    Ok(NumericStats {
        name: series.name().to_string(),
        count,
        mean,
        std,
        min: values.first().copied(),
        p25: quantile(&values, 0.25),
        median: quantile(&values, 0.5),
        p75: quantile(&values, 0.75),
        max: values.last().copied(),
    })
}

/// Linearly interpolated quantile of already-sorted values
fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

fn fmt_stat(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.2}", v))
}

impl DatasetProfile {
    pub fn display(&self) {
        println!(
            "\n    {} {} rows × {} columns",
            style("✧").cyan(),
            style(self.rows).yellow(),
            style(self.columns.len()).yellow()
        );

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Column").add_attribute(Attribute::Bold),
            Cell::new("Type").add_attribute(Attribute::Bold),
            Cell::new("Non-Null").add_attribute(Attribute::Bold),
            Cell::new("Null").add_attribute(Attribute::Bold),
        ]);
        for info in &self.columns {
            table.add_row(vec![
                Cell::new(&info.name),
                Cell::new(&info.dtype),
                Cell::new(info.non_null).set_alignment(CellAlignment::Right),
                Cell::new(info.null_count).set_alignment(CellAlignment::Right),
            ]);
        }
        for line in table.to_string().lines() {
            println!("    {}", line);
        }

        if !self.numeric.is_empty() {
            println!();
            println!("    {}", style("Summary statistics").white().bold());

            let mut stats = Table::new();
            stats.load_preset(UTF8_FULL_CONDENSED);
            stats.set_header(
                ["Column", "count", "mean", "std", "min", "25%", "50%", "75%", "max"]
                    .iter()
                    .map(|h| Cell::new(h).add_attribute(Attribute::Bold))
                    .collect::<Vec<_>>(),
            );
            for s in &self.numeric {
                stats.add_row(vec![
                    Cell::new(&s.name),
                    Cell::new(s.count),
                    Cell::new(fmt_stat(s.mean)),
                    Cell::new(fmt_stat(s.std)),
                    Cell::new(fmt_stat(s.min)),
                    Cell::new(fmt_stat(s.p25)),
                    Cell::new(fmt_stat(s.median)),
                    Cell::new(fmt_stat(s.p75)),
                    Cell::new(fmt_stat(s.max)),
                ]);
            }
            for line in stats.to_string().lines() {
                println!("    {}", line);
            }
        }

        println!();
        println!("    {}", style("First rows").white().bold());
        for line in self.head.to_string().lines() {
            println!("    {}", line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_counts_nulls_and_types() {
        let df = df! {
            "State" => [Some("TX"), None, Some("CA")],
            "Individuals_Affected" => [Some(10i64), Some(20), None],
        }
        .unwrap();

        let profile = profile_dataset(&df, 2).unwrap();

        assert_eq!(profile.rows, 3);
        assert_eq!(profile.head.height(), 2);
        assert_eq!(profile.columns[0].dtype, "str");
        assert_eq!(profile.columns[0].null_count, 1);
        assert_eq!(profile.columns[1].non_null, 2);
        assert_eq!(profile.numeric.len(), 1);
        assert_eq!(profile.numeric[0].count, 2);
        assert_eq!(profile.numeric[0].mean, Some(15.0));
    }

    #[test]
    fn test_quartiles_interpolate_linearly() {
        let df = df! { "x" => [1.0f64, 2.0, 3.0, 4.0] }.unwrap();
        let profile = profile_dataset(&df, 10).unwrap();
        let stats = &profile.numeric[0];

        assert_eq!(stats.min, Some(1.0));
        assert_eq!(stats.p25, Some(1.75));
        assert_eq!(stats.median, Some(2.5));
        assert_eq!(stats.p75, Some(3.25));
        assert_eq!(stats.max, Some(4.0));
        let std = stats.std.unwrap();
        assert!((std - 1.290_994).abs() < 1e-5);
    }

    #[test]
    fn test_null_counts_in_frame_order() {
        let df = df! {
            "b" => [None::<f64>, None],
            "a" => [Some(1.0f64), None],
        }
        .unwrap();

        assert_eq!(
            null_counts(&df),
            vec![("b".to_string(), 2), ("a".to_string(), 1)]
        );
    }
}
