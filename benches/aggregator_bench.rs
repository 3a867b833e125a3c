//! Criterion benchmarks for CSV parsing and per-year aggregation

use airdash::parsers::FlightCsvParser;
use airdash::services::Aggregator;
use airdash::types::FlightRecord;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::fmt::Write;
use std::hint::black_box;

const STATES: [(&str, &str); 6] = [
    ("CA", "California"),
    ("TX", "Texas"),
    ("NY", "New York"),
    ("FL", "Florida"),
    ("IL", "Illinois"),
    ("WA", "Washington"),
];
const AIRLINES: [&str; 8] = ["AA", "UA", "DL", "WN", "AS", "B6", "NK", "F9"];

/// Deterministic synthetic rows spread over 2005-2014
fn synthetic_records(rows: usize) -> Vec<FlightRecord> {
    (0..rows)
        .map(|i| {
            let (state, name) = STATES[i % STATES.len()];
            FlightRecord {
                year: 2005 + (i % 10) as i32,
                month: (i % 12) as u8 + 1,
                // Every 17th row has no delay recorded
                arr_delay: (i % 17 != 0).then(|| (i % 90) as f64 - 20.0),
                distance_group: Some((i % 11) as u8 + 1),
                dest_state: Some(state.to_string()),
                dest_state_name: Some(name.to_string()),
                reporting_airline: Some(AIRLINES[i % AIRLINES.len()].to_string()),
                flights: Some(1.0),
            }
        })
        .collect()
}

fn synthetic_csv(rows: usize) -> String {
    let mut csv = String::from(
        ",Year,Month,Reporting_Airline,DestState,DestStateName,ArrDelay,DistanceGroup,Flights\n",
    );
    for (i, r) in synthetic_records(rows).iter().enumerate() {
        let _ = writeln!(
            csv,
            "{},{},{},{},{},{},{},{},1.0",
            i,
            r.year,
            r.month,
            r.reporting_airline.as_deref().unwrap_or_default(),
            r.dest_state.as_deref().unwrap_or_default(),
            r.dest_state_name.as_deref().unwrap_or_default(),
            r.arr_delay.map(|d| d.to_string()).unwrap_or_default(),
            r.distance_group.unwrap_or_default(),
        );
    }
    csv
}

fn bench_summarize(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregator");

    for rows in [10_000usize, 100_000] {
        let records = synthetic_records(rows);
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(
            BenchmarkId::new("summarize", format!("{} rows", rows)),
            &records,
            |b, records| {
                b.iter(|| Aggregator::summarize(black_box(records), black_box(2010)));
            },
        );
    }

    group.finish();
}

fn bench_parse_csv(c: &mut Criterion) {
    let csv = synthetic_csv(50_000);

    let mut group = c.benchmark_group("parser");
    group.throughput(Throughput::Bytes(csv.len() as u64));
    group.sample_size(20);

    group.bench_function("parse_bytes", |b| {
        b.iter(|| FlightCsvParser::parse_bytes(black_box(csv.as_bytes())));
    });

    group.finish();
}

criterion_group!(benches, bench_summarize, bench_parse_csv);
criterion_main!(benches);
