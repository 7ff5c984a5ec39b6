//! breachclean: Breach-Notification Cleaning CLI Tool
//!
//! Runs the cleaning pipeline step by step with console progress, then writes
//! the cleaned dataset and an optional JSON run report.

use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use console::style;
use tracing_subscriber::EnvFilter;

use breachclean::cli::{confirm_overwrite, Cli};
use breachclean::pipeline::{
    breach_summary_table, load_dataset_with_progress, profile_dataset, save_dataset,
    CleaningPipeline, DateFallback, PipelineConfig, PipelineStep,
};
use breachclean::report::CleaningSummary;
use breachclean::utils::{
    create_spinner, finish_with_success, finish_with_warning, print_banner, print_columns,
    print_completion, print_config, print_count, print_info, print_null_counts, print_step_header,
    print_step_time, print_success,
};

/// Console step number of each pipeline step; the id rename is reported under the profile
fn step_number(step: PipelineStep) -> Option<u8> {
    match step {
        PipelineStep::RenameId => None,
        PipelineStep::MissingValues => Some(3),
        PipelineStep::Duplicates => Some(4),
        PipelineStep::TypeCoercion => Some(5),
        PipelineStep::Pruning => Some(6),
        PipelineStep::DateFallback => Some(7),
        PipelineStep::CalendarFeatures => Some(8),
        PipelineStep::Encoding => Some(9),
        PipelineStep::BreachSummary => Some(10),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.pipeline_config();
    let pipeline = CleaningPipeline::new(config)?;

    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(&cli.input, &cli.output, &config);

    if !cli.no_confirm && !confirm_overwrite(&cli.output)? {
        println!("Cancelled by user.");
        return Ok(());
    }

    // Step 1: Load dataset
    print_step_header(1, "Load Dataset");
    let step_start = Instant::now();
    let spinner = create_spinner("Reading input file...");
    let (df, rows, cols, memory_mb) =
        load_dataset_with_progress(&cli.input, cli.infer_schema_length)?;
    finish_with_success(&spinner, "Dataset loaded");

    println!("\n    {} Dataset Statistics:", style("✧").cyan());
    println!("      Rows: {}", rows);
    println!("      Columns: {}", cols);
    println!("      Estimated memory: {:.2} MB", memory_mb);
    print_step_time(step_start.elapsed());

    // Step 2: Profile
    print_step_header(2, "Profile");
    let profile = profile_dataset(&df, cli.head_rows)?;
    profile.display();

    // Steps 3-10: cleaning
    let outcome = pipeline.run_with(df, |step, summary, elapsed| {
        if let Some(number) = step_number(step) {
            print_step_header(number, step.title());
        }
        report_step(step, summary, pipeline.config());
        if step_number(step).is_some() {
            print_step_time(elapsed);
        }
    })?;
    let mut df = outcome.df;
    let summary = outcome.summary;

    // Step 11: Save output
    print_step_header(11, "Save Results");
    let step_start = Instant::now();
    let final_profile = profile_dataset(&df, 5)?;
    final_profile.display();

    let spinner = create_spinner("Writing output file...");
    save_dataset(&mut df, &cli.output)?;
    finish_with_success(&spinner, &format!("Saved to {}", cli.output.display()));
    print_step_time(step_start.elapsed());

    if let Some(report_path) = &cli.report {
        let spinner = create_spinner("Writing run report...");
        match summary.export_json(report_path) {
            Ok(()) => finish_with_success(
                &spinner,
                &format!("Report saved to {}", report_path.display()),
            ),
            Err(e) => {
                finish_with_warning(&spinner, &format!("Report not written: {:#}", e));
            }
        }
    }

    summary.display();
    print_completion();

    Ok(())
}

/// Print what a finished step did, read from the run summary
fn report_step(step: PipelineStep, summary: &CleaningSummary, config: &PipelineConfig) {
    match step {
        PipelineStep::RenameId => {
            if summary.renamed_id {
                print_info("Renamed 'Number' to 'ID'");
            }
        }
        PipelineStep::MissingValues => {
            let missing = &summary.missing;
            print_null_counts("Missing values before cleaning", &missing.nulls_before);
            if missing.dropped_columns.is_empty() {
                print_info("No columns exceed the missing value threshold");
            } else {
                print_count(
                    "column(s) with high missing values",
                    missing.dropped_columns.len(),
                    Some(&format!("(>{:.1}%)", config.missing_threshold * 100.0)),
                );
                print_columns(&missing.dropped_columns);
                print_success("Dropped columns with high missing values");
            }
            print_null_counts("Missing values after cleaning", &missing.nulls_after);
        }
        PipelineStep::Duplicates => {
            print_count("duplicate row(s) before cleaning", summary.duplicates_removed, None);
            print_success("Duplicates removed");
        }
        PipelineStep::TypeCoercion => {
            let coercion = &summary.coercion;
            for (column, failed) in &coercion.dates {
                if *failed > 0 {
                    println!(
                        "      {} → date ({} unparseable value(s) set to null)",
                        column,
                        style(failed).yellow()
                    );
                } else {
                    println!("      {} → date", column);
                }
            }
            for column in &coercion.categoricals {
                println!("      {} → category", column);
            }
            if coercion.dates.is_empty() && coercion.categoricals.is_empty() {
                print_info("No known date or categorical columns present");
            }
        }
        PipelineStep::Pruning => {
            if summary.pruned_columns.is_empty() {
                print_info("No denylisted columns present");
            } else {
                print_count("column(s) pruned", summary.pruned_columns.len(), None);
                print_columns(&summary.pruned_columns);
            }
        }
        PipelineStep::DateFallback => match summary.date_fallback.source {
            DateFallback::None => print_info("No fallback source for breach dates"),
            source => print_success(&format!(
                "Filled {} breach date(s) from {}",
                summary.date_fallback.filled, source
            )),
        },
        PipelineStep::CalendarFeatures => {
            let features = &summary.features;
            if features.derived.is_empty() {
                print_info("No breach date column, skipping calendar features");
            } else {
                print_success(&format!("Derived {}", features.derived.join(", ")));
                if features.filled > 0 {
                    println!(
                        "      {} row(s) without a date took month {}",
                        style(features.filled).yellow(),
                        features.month_mode.unwrap_or_default()
                    );
                }
            }
        }
        PipelineStep::Encoding => {
            if summary.encoded_columns.is_empty() {
                print_info("No categorical columns to encode");
            } else {
                print_count(
                    "categorical column(s) encoded",
                    summary.encoded_columns.len(),
                    None,
                );
                print_columns(&summary.encoded_columns);
            }
        }
        PipelineStep::BreachSummary => match &summary.breach_summary {
            Some(rows) => println!("{}", breach_summary_table(rows)),
            None => print_info("Breach type or individuals affected column missing, skipping"),
        },
    }
}

/// Route `tracing` output to stderr; `RUST_LOG` overrides the default level
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "breachclean=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
