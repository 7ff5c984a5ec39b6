//! Cleaning run summary: console table and JSON export

use anyhow::{Context, Result};
use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;
use serde::Serialize;
use std::path::Path;

use crate::pipeline::{
    BreachTypeSummary, CoercionReport, DateFallback, FallbackReport, FeatureReport, MissingReport,
};

/// Summary of everything one cleaning run did to the dataset
#[derive(Debug, Clone, Default, Serialize)]
pub struct CleaningSummary {
    pub initial_rows: usize,
    pub initial_columns: usize,
    pub final_rows: usize,
    pub final_columns: usize,
    pub renamed_id: bool,
    pub missing: MissingReport,
    pub duplicates_removed: usize,
    pub coercion: CoercionReport,
    pub pruned_columns: Vec<String>,
    pub date_fallback: FallbackReport,
    pub features: FeatureReport,
    pub encoded_columns: Vec<String>,
    pub breach_summary: Option<Vec<BreachTypeSummary>>,
}

impl CleaningSummary {
    pub fn new(initial_rows: usize, initial_columns: usize) -> Self {
        Self {
            initial_rows,
            initial_columns,
            final_rows: initial_rows,
            final_columns: initial_columns,
            ..Default::default()
        }
    }

    pub fn set_missing(&mut self, report: MissingReport) {
        self.missing = report;
    }

    pub fn set_duplicates_removed(&mut self, removed: usize) {
        self.duplicates_removed = removed;
    }

    pub fn set_coercion(&mut self, report: CoercionReport) {
        self.coercion = report;
    }

    pub fn set_pruned(&mut self, columns: Vec<String>) {
        self.pruned_columns = columns;
    }

    pub fn set_date_fallback(&mut self, report: FallbackReport) {
        self.date_fallback = report;
    }

    pub fn set_features(&mut self, report: FeatureReport) {
        self.features = report;
    }

    pub fn set_encoded(&mut self, columns: Vec<String>) {
        self.encoded_columns = columns;
    }

    pub fn set_breach_summary(&mut self, summary: Option<Vec<BreachTypeSummary>>) {
        self.breach_summary = summary;
    }

    pub fn set_final_shape(&mut self, rows: usize, columns: usize) {
        self.final_rows = rows;
        self.final_columns = columns;
    }

    /// Write the summary as pretty-printed JSON
    pub fn export_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize run summary")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write report: {}", path.display()))?;
        Ok(())
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("CLEANING SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![
            Cell::new("📁 Initial Shape"),
            Cell::new(format!("{} × {}", self.initial_rows, self.initial_columns)),
        ]);
        table.add_row(vec![
            Cell::new("🗑️  Dropped (Missing)"),
            count_cell(self.missing.dropped_columns.len()),
        ]);
        table.add_row(vec![
            Cell::new("🩹 Columns Imputed"),
            Cell::new(self.missing.imputations.len()),
        ]);
        table.add_row(vec![
            Cell::new("♊ Duplicates Removed"),
            count_cell(self.duplicates_removed),
        ]);
        table.add_row(vec![
            Cell::new("📅 Date Columns"),
            Cell::new(self.coercion.dates.len()),
        ]);
        table.add_row(vec![
            Cell::new("🏷️  Categorical Columns"),
            Cell::new(self.coercion.categoricals.len()),
        ]);
        table.add_row(vec![
            Cell::new("✂️  Pruned Columns"),
            count_cell(self.pruned_columns.len()),
        ]);

        let fallback = match self.date_fallback.source {
            DateFallback::None => "none".to_string(),
            source => format!("{} ({} filled)", source, self.date_fallback.filled),
        };
        table.add_row(vec![Cell::new("🔁 Date Fallback"), Cell::new(fallback)]);
        table.add_row(vec![
            Cell::new("🧮 Features Derived"),
            Cell::new(self.features.derived.len()),
        ]);
        table.add_row(vec![
            Cell::new("🔢 Columns Encoded"),
            Cell::new(self.encoded_columns.len()),
        ]);
        table.add_row(vec![
            Cell::new("✅ Final Shape"),
            Cell::new(format!("{} × {}", self.final_rows, self.final_columns))
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);

        for line in table.to_string().lines() {
            println!("    {}", line);
        }

        if !self.missing.dropped_columns.is_empty() || !self.pruned_columns.is_empty() {
            println!();
            println!(
                "    {} {}",
                style("📝").cyan(),
                style("DROPPED COLUMNS").white().bold()
            );
            println!("    {}", style("─".repeat(50)).dim());

            print_column_list("High Missing Values", &self.missing.dropped_columns);
            print_column_list("Pruned", &self.pruned_columns);
        }
    }
}

fn count_cell(count: usize) -> Cell {
    Cell::new(count).fg(if count == 0 { Color::White } else { Color::Red })
}

fn print_column_list(title: &str, columns: &[String]) {
    if columns.is_empty() {
        return;
    }
    println!();
    println!(
        "      {} {}:",
        style(title).yellow(),
        style(format!("({})", columns.len())).dim()
    );
    for column in columns {
        println!("        {} {}", style("•").dim(), column);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_starts_with_unchanged_shape() {
        let summary = CleaningSummary::new(100, 12);
        assert_eq!(summary.final_rows, 100);
        assert_eq!(summary.final_columns, 12);
        assert_eq!(summary.duplicates_removed, 0);
    }

    #[test]
    fn test_export_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("report.json");

        let mut summary = CleaningSummary::new(10, 3);
        summary.set_duplicates_removed(2);
        summary.set_pruned(vec!["Unnamed: 0".to_string()]);
        summary.export_json(&path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["duplicates_removed"], 2);
        assert_eq!(value["pruned_columns"][0], "Unnamed: 0");
        assert_eq!(value["date_fallback"]["source"], "None");
    }
}
