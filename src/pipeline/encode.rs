//! Integer encoding of categorical columns

use anyhow::{Context, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

use super::error::CleanError;
use super::schema::ENCODED_SUFFIX;

/// How codes are assigned to distinct values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum EncodingOrder {
    /// Codes follow the order in which values first appear
    #[default]
    FirstSeen,
    /// Codes follow the sorted order of the distinct values
    Lexical,
}

/// Label encoder over the string form of a column's values.
///
/// Nulls get a code of their own.
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryEncoder {
    order: EncodingOrder,
}

impl CategoryEncoder {
    pub fn new(order: EncodingOrder) -> Self {
        Self { order }
    }

    pub fn order(&self) -> EncodingOrder {
        self.order
    }

    /// Code for every row of `values`
    pub fn fit_transform(&self, values: &[Option<&str>]) -> Vec<u32> {
        let codes: HashMap<Option<&str>, u32> = match self.order {
            EncodingOrder::FirstSeen => {
                let mut codes = HashMap::new();
                for v in values {
                    let next = codes.len() as u32;
                    codes.entry(*v).or_insert(next);
                }
                codes
            }
            // None sorts before every string
            EncodingOrder::Lexical => values
                .iter()
                .copied()
                .collect::<BTreeSet<_>>()
                .into_iter()
                .enumerate()
                .map(|(i, v)| (v, i as u32))
                .collect(),
        };

        values.iter().map(|v| codes[v]).collect()
    }

    /// Append `<name>_Encoded` holding the codes of column `name`
    pub fn encode_column(&self, df: &mut DataFrame, name: &str) -> Result<String> {
        let series = df
            .column(name)
            .map_err(|_| CleanError::ColumnNotFound(name.to_string()))?
            .as_materialized_series()
            .cast(&DataType::String)?;
        let values: Vec<Option<&str>> = series.str()?.into_iter().collect();
        let codes = self.fit_transform(&values);

        let encoded_name = format!("{}{}", name, ENCODED_SUFFIX);
        df.with_column(Series::new(encoded_name.as_str().into(), codes))
            .with_context(|| format!("Failed to add '{}'", encoded_name))?;
        Ok(encoded_name)
    }

    /// Encode every `Categorical` column, keeping the originals.
    ///
    /// Returns the names of the added columns.
    pub fn encode_categoricals(&self, df: &mut DataFrame) -> Result<Vec<String>> {
        let categorical: Vec<String> = df
            .get_columns()
            .iter()
            .filter(|c| matches!(c.dtype(), DataType::Categorical(_, _)))
            .map(|c| c.name().to_string())
            .collect();

        let mut added = Vec::with_capacity(categorical.len());
        for name in &categorical {
            added.push(self.encode_column(df, name)?);
        }

        debug!(?added, order = ?self.order, "encoded categorical columns");
        Ok(added)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_seen_order() {
        let encoder = CategoryEncoder::new(EncodingOrder::FirstSeen);
        let codes = encoder.fit_transform(&[Some("b"), Some("a"), Some("b"), None, Some("c")]);
        assert_eq!(codes, vec![0, 1, 0, 2, 3]);
    }

    #[test]
    fn test_lexical_order() {
        let encoder = CategoryEncoder::new(EncodingOrder::Lexical);
        let codes = encoder.fit_transform(&[Some("b"), Some("a"), Some("b"), Some("c")]);
        assert_eq!(codes, vec![1, 0, 1, 2]);
    }

    #[test]
    fn test_missing_column_is_reported() {
        let mut df = df! { "a" => [1i32] }.unwrap();
        let err = CategoryEncoder::default()
            .encode_column(&mut df, "State")
            .unwrap_err();
        assert!(err.to_string().contains("Column 'State' not found"));
    }
}
