//! Benchmark for report parsing and correlation.
//!
//! Run: cargo bench --bench compare

use criterion::{Criterion, criterion_group, criterion_main};
use std::fmt::Write;
use std::hint::black_box;

/// Builds a report with `n` sub-benchmarks per run.
fn generate_report(n: usize) -> String {
    let mut report = String::from("goos: linux\ngoarch: amd64\n");
    for run in ["Old", "New"] {
        for i in 0..n {
            writeln!(
                report,
                "Benchmark{run}/case{i:04} \t  100000\t      {} ns/op\t  {}.50 MB/s\t     {} B/op\t       {} allocs/op",
                1000 + i * 7,
                40 + i % 60,
                128 + i,
                3 + i % 5
            )
            .unwrap();
        }
    }
    report.push_str("PASS\n");
    report
}

fn bench_parse(c: &mut Criterion) {
    let report = generate_report(500);

    c.bench_function("parse_1000_records", |b| {
        b.iter(|| benchdiff::parse(black_box(report.as_bytes())).unwrap());
    });
}

fn bench_correlate(c: &mut Criterion) {
    let report = generate_report(500);
    let records = benchdiff::parse(report.as_bytes()).unwrap();

    c.bench_function("correlate_500_pairs", |b| {
        b.iter(|| benchdiff::correlate(black_box(&records), "Old/", "New/").unwrap());
    });
}

criterion_group!(benches, bench_parse, bench_correlate);
criterion_main!(benches);
