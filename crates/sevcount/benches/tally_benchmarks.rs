//! Tally pipeline benchmarks.
//!
//! Measures parsing, annotation and batch counting on generated survey data.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sevcount::{annotate, count_all, Parser, SeveritySpec, Table};

/// Generate survey-style CSV: a few categorical columns and a score.
fn generate_survey_data(rows: usize) -> String {
    let mut data = String::from("site,sex,age_group,visit,score\n");

    let sites = ["north", "south", "east", "west"];
    let sexes = ["F", "M"];
    let ages = ["18-29", "30-44", "45-64", "65+"];

    for row in 0..rows {
        data.push_str(&format!(
            "{},{},{},{},{}\n",
            sites[row % sites.len()],
            sexes[row % sexes.len()],
            ages[(row / 3) % ages.len()],
            row % 12,
            (row * 7) % 30
        ));
    }

    data
}

fn phq9() -> SeveritySpec {
    SeveritySpec::new()
        .with_label("Minimal", 0, 4)
        .with_label("Mild", 5, 9)
        .with_label("Moderate", 10, 14)
        .with_label("Moderately severe", 15, 19)
        .with_label("Severe", 20, 27)
}

fn parsed(rows: usize) -> Table {
    Parser::new()
        .parse_str(&generate_survey_data(rows))
        .expect("generated data parses")
}

fn bench_annotate(c: &mut Criterion) {
    let mut group = c.benchmark_group("annotate");
    let spec = phq9();

    for rows in [100, 1_000, 10_000] {
        let table = parsed(rows);
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &table, |b, table| {
            b.iter(|| {
                let mut table = table.clone();
                annotate(black_box(&spec), "score", &mut table).unwrap();
                table
            })
        });
    }

    group.finish();
}

fn bench_count_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("count_all");
    let spec = phq9();

    for rows in [100, 1_000, 10_000] {
        let mut table = parsed(rows);
        annotate(&spec, "score", &mut table).unwrap();
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &table, |b, table| {
            b.iter(|| count_all(black_box(table)))
        });
    }

    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    let data = generate_survey_data(10_000);

    group.throughput(Throughput::Bytes(data.len() as u64));
    group.bench_function("survey_10k_rows", |b| {
        b.iter(|| Parser::new().parse_str(black_box(&data)).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_annotate, bench_count_all, bench_parse);
criterion_main!(benches);
