//! Performance benchmarks for the Production Incentive Engine.
//!
//! This benchmark suite verifies that the calculation engine meets
//! performance targets:
//! - Single incentive evaluation: < 10μs mean
//! - Entry with 1 worker through the API: < 1ms mean
//! - Entry with 30 workers: < 5ms mean
//! - Batch of 100 entries: < 100ms mean
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;
use std::str::FromStr;

use incentive_engine::api::{AppState, EntryRequest, create_router};
use incentive_engine::calculation::{IncentiveInput, calculate_incentive};
use incentive_engine::config::ConfigLoader;

use axum::{body::Body, http::Request};
use tower::ServiceExt;

/// Creates a test state with loaded configuration.
fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/site_alpha").expect("Failed to load config");
    AppState::new(config)
}

/// Creates a calculation request with a specified number of workers.
fn create_request_with_workers(worker_count: usize) -> EntryRequest {
    let workers: Vec<serde_json::Value> = (0..worker_count)
        .map(|i| {
            serde_json::json!({
                "emp_code": format!("EMP-{:04}", i + 1),
                "name": format!("Worker {:04}", i + 1),
                "produced_qty": "55",
                "worked_hrs": "8"
            })
        })
        .collect();

    let request_json = serde_json::json!({
        "building": "unit_b",
        "nature": "stitching_line_2",
        "shift": "general",
        "workers": workers
    });

    serde_json::from_value(request_json).expect("Failed to create request")
}

/// Benchmark: raw incentive calculation for one worker.
///
/// Target: < 10μs mean
fn bench_raw_calculation(c: &mut Criterion) {
    let config = ConfigLoader::load("./config/site_alpha").expect("Failed to load config");
    let nature = config.get_nature("stitching_line_2").unwrap().clone();
    let target = Decimal::from_str("40").unwrap();
    let produced = Decimal::from_str("55").unwrap();
    let worked = Decimal::from_str("8").unwrap();

    c.bench_function("raw_calculation", |b| {
        b.iter(|| {
            let result = calculate_incentive(
                &IncentiveInput {
                    nature: &nature,
                    target,
                    produced_qty: produced,
                    worked_hrs: worked,
                    group: None,
                },
                1,
            );
            black_box(result)
        })
    });
}

/// Benchmark: single-worker entry through the API.
///
/// Target: < 1ms mean
fn bench_single_worker_entry(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let state = create_test_state();
    let router = create_router(state);
    let request = create_request_with_workers(1);
    let body = serde_json::to_string(&request).unwrap();

    c.bench_function("single_worker_entry", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/calculate")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

/// Benchmark: entries with growing rosters.
///
/// Target: < 5ms mean at 30 workers
fn bench_roster_sizes(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let state = create_test_state();
    let router = create_router(state);

    let mut group = c.benchmark_group("roster_sizes");
    for worker_count in [5usize, 15, 30] {
        let request = create_request_with_workers(worker_count);
        let body = serde_json::to_string(&request).unwrap();

        group.throughput(Throughput::Elements(worker_count as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(worker_count),
            &body,
            |b, body| {
                b.to_async(&rt).iter(|| async {
                    let router = router.clone();
                    let response = router
                        .oneshot(
                            Request::builder()
                                .method("POST")
                                .uri("/calculate")
                                .header("Content-Type", "application/json")
                                .body(Body::from(body.clone()))
                                .unwrap(),
                        )
                        .await
                        .unwrap();
                    black_box(response)
                })
            },
        );
    }
    group.finish();
}

/// Benchmark: batch of 100 single-worker entries.
///
/// Target: < 100ms mean
fn bench_batch_100(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let state = create_test_state();
    let router = create_router(state);
    let request = create_request_with_workers(1);
    let body = serde_json::to_string(&request).unwrap();

    let mut group = c.benchmark_group("batch");
    group.throughput(Throughput::Elements(100));
    group.sample_size(10);
    group.bench_function("entries_100", |b| {
        b.to_async(&rt).iter(|| async {
            for _ in 0..100 {
                let router = router.clone();
                let response = router
                    .oneshot(
                        Request::builder()
                            .method("POST")
                            .uri("/calculate")
                            .header("Content-Type", "application/json")
                            .body(Body::from(body.clone()))
                            .unwrap(),
                    )
                    .await
                    .unwrap();
                black_box(response);
            }
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_raw_calculation,
    bench_single_worker_entry,
    bench_roster_sizes,
    bench_batch_100
);
criterion_main!(benches);
