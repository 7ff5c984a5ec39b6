//! Exact-duplicate row removal

use anyhow::{Context, Result};
use polars::prelude::*;
use tracing::debug;

/// Count rows that repeat an earlier row across every column
pub fn count_duplicate_rows(df: &DataFrame) -> Result<usize> {
    if df.width() == 0 {
        return Ok(0);
    }
    let unique = df
        .unique_stable(None, UniqueKeepStrategy::First, None)
        .context("Failed to compute unique rows")?;
    Ok(df.height() - unique.height())
}

/// Remove exact-duplicate rows, keeping the first occurrence in original order.
///
/// Returns the deduplicated frame and the number of rows removed.
pub fn remove_duplicates(df: DataFrame) -> Result<(DataFrame, usize)> {
    if df.width() == 0 {
        return Ok((df, 0));
    }

    let before = df.height();
    let unique = df
        .unique_stable(None, UniqueKeepStrategy::First, None)
        .context("Failed to remove duplicate rows")?;
    let removed = before - unique.height();

    debug!(removed, "deduplicated rows");
    Ok((unique, removed))
}
