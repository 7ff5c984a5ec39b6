//! Benchmark of the cleaning pipeline and its heavier steps on synthetic breach data
//!
//! Run with: cargo bench --bench pipeline_benchmark

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use polars::prelude::*;
use rand::prelude::*;
use rand::SeedableRng;

use breachclean::pipeline::{
    coerce_types, handle_missing_values, CategoryEncoder, CleaningPipeline, ColumnPresence,
    EncodingOrder, PipelineConfig,
};

const STATES: [&str; 8] = ["TX", "CA", "NY", "FL", "WA", "OR", "IL", "PA"];
const BREACH_TYPES: [&str; 4] = [
    "Theft",
    "Loss",
    "Hacking/IT Incident",
    "Unauthorized Access/Disclosure",
];

/// Generate a breach table with nulls, duplicates and mixed date formats
fn generate_breach_dataframe(n_rows: usize, seed: u64) -> DataFrame {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);

    let mut numbers = Vec::with_capacity(n_rows);
    let mut entities = Vec::with_capacity(n_rows);
    let mut states = Vec::with_capacity(n_rows);
    let mut types = Vec::with_capacity(n_rows);
    let mut affected = Vec::with_capacity(n_rows);
    let mut dates = Vec::with_capacity(n_rows);
    let mut starts = Vec::with_capacity(n_rows);
    let mut notes = Vec::with_capacity(n_rows);

    for i in 0..n_rows {
        // Roughly one row in twenty repeats the previous id
        let id = if i > 0 && rng.gen::<f64>() < 0.05 { i - 1 } else { i };
        numbers.push(id as i64);

        entities.push(
            (rng.gen::<f64>() > 0.02).then(|| format!("Entity {}", rng.gen_range(0..500))),
        );
        states.push(STATES[rng.gen_range(0..STATES.len())].to_string());
        types.push(BREACH_TYPES[rng.gen_range(0..BREACH_TYPES.len())].to_string());
        affected.push((rng.gen::<f64>() > 0.05).then(|| rng.gen_range(500..100_000i64)));

        let year = rng.gen_range(2009..2016);
        let month = rng.gen_range(1..=12);
        let day = rng.gen_range(1..=28);
        dates.push(match rng.gen_range(0..10) {
            0 => None,
            1 => Some(format!("{:02}/{:02}/{} - {:02}/{:02}/{}", month, day, year, month, day, year)),
            _ => Some(format!("{:02}/{:02}/{}", month, day, year)),
        });
        starts.push(Some(format!("{}-{:02}-{:02}", year, month, day)));
        notes.push((rng.gen::<f64>() < 0.1).then(|| "free text".to_string()));
    }

    df! {
        "Number" => numbers,
        "Name_of_Covered_Entity" => entities,
        "State" => states,
        "Type_of_Breach" => types,
        "Individuals_Affected" => affected,
        "Date_of_Breach" => dates,
        "breach_start" => starts,
        "Notes" => notes,
    }
    .expect("Failed to create DataFrame")
}

/// Benchmark the full pipeline for varying dataset sizes
fn benchmark_full_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("cleaning_pipeline");
    let pipeline = CleaningPipeline::new(PipelineConfig::default()).expect("valid config");

    for n_rows in [1_000, 10_000, 50_000] {
        let df = generate_breach_dataframe(n_rows, 42);
        group.throughput(Throughput::Elements(n_rows as u64));

        group.bench_with_input(BenchmarkId::new("run", n_rows), &df, |b, df| {
            b.iter(|| {
                let _ = pipeline.run(black_box(df.clone()));
            });
        });
    }

    group.finish();
}

/// Benchmark the steps that touch every cell
fn benchmark_steps(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline_steps");
    let df = generate_breach_dataframe(10_000, 7);

    group.bench_function("missing_values", |b| {
        b.iter(|| {
            let _ = handle_missing_values(black_box(df.clone()), 0.8);
        });
    });

    group.bench_function("coerce_types", |b| {
        let presence = ColumnPresence::detect(&df);
        b.iter(|| {
            let mut df = df.clone();
            let _ = coerce_types(black_box(&mut df), &presence);
        });
    });

    let (mut coerced, _) = handle_missing_values(df.clone(), 0.8).expect("missing values");
    let presence = ColumnPresence::detect(&coerced);
    coerce_types(&mut coerced, &presence).expect("coercion");

    for order in [EncodingOrder::FirstSeen, EncodingOrder::Lexical] {
        let encoder = CategoryEncoder::new(order);
        group.bench_with_input(
            BenchmarkId::new("encode", format!("{:?}", order)),
            &coerced,
            |b, df| {
                b.iter(|| {
                    let mut df = df.clone();
                    let _ = encoder.encode_categoricals(black_box(&mut df));
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, benchmark_full_pipeline, benchmark_steps);
criterion_main!(benches);
