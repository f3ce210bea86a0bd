//! Benchmarks for request preparation and response mapping
//!
//! This benchmark measures:
//! - Validation plus JSON body encoding for POST operations
//! - Named parameter parsing
//! - Mapping of large deep/history payloads

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use chrono::NaiveDate;
use serppro_client::client::{mapping, validation};
use serppro_client::{
    DateRange, DeepRequest, FrequencyRequest, HistoryRequest, Operation, OperationParams,
};

fn bench_prepare(c: &mut Criterion) {
    let frequency = FrequencyRequest::new("Король и Шут").region("225,213");
    let history = HistoryRequest::new("Король и Шут").dates(DateRange::new(
        NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
        NaiveDate::from_ymd_opt(2025, 9, 30).unwrap(),
    ));

    let mut group = c.benchmark_group("prepare");
    group.bench_function("frequency", |b| {
        b.iter(|| validation::prepare_frequency(black_box(&frequency)).unwrap())
    });
    group.bench_function("history", |b| {
        b.iter(|| validation::prepare_history(black_box(&history)).unwrap())
    });
    group.finish();
}

fn bench_parse_params(c: &mut Criterion) {
    let params = OperationParams::new()
        .with("--query", "Король и Шут")
        .with("--region", "225")
        .with("--grouping", "week")
        .with("--start-date", "2025-07-01")
        .with("--end-date", "2025-09-30");

    c.bench_function("parse_params/history", |b| {
        b.iter(|| {
            validation::parse_params(Operation::WordstatHistory, black_box(&params)).unwrap()
        })
    });
}

fn deep_payload(n: usize) -> serde_json::Value {
    let items: Vec<serde_json::Value> = (0..n)
        .map(|i| serde_json::json!({ "phrase": format!("киш {}", i), "frequency": (i * 7).to_string() }))
        .collect();
    serde_json::json!({ "associations": items, "popular": items })
}

fn bench_mapping(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_deep");
    for n in [10usize, 100, 1000] {
        let payload = deep_payload(n);
        let request = DeepRequest::new("КиШ");
        group.throughput(Throughput::Elements((n * 2) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &payload, |b, payload| {
            b.iter(|| mapping::deep(request.clone(), black_box(payload)).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_prepare, bench_parse_params, bench_mapping);
criterion_main!(benches);
