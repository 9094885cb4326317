//! Performance benchmarks for the timeclock engine.
//!
//! This benchmark suite tracks the hot paths:
//! - Worked-hours computation for a single session
//! - Monthly wage aggregation over growing record sets
//! - The wage endpoint end to end
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use chrono::{Days, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use timeclock::api::{create_router, AllowAll, AppState};
use timeclock::calculation::{compute_hours_worked, compute_wage};
use timeclock::config::{BreakPolicy, Settings};
use timeclock::engine::TimeclockEngine;
use timeclock::models::{AttendanceRecord, ClockAction};
use timeclock::store::MemoryStore;

use axum::{body::Body, http::Request};
use tower::ServiceExt;

fn datetime(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
}

/// Builds a closed 8-hour record on the given date.
fn closed_record(date: NaiveDate) -> AttendanceRecord {
    let clock_in = date.and_hms_opt(9, 0, 0).unwrap();
    let clock_out = date.and_hms_opt(17, 30, 0).unwrap();
    AttendanceRecord {
        id: Uuid::new_v4(),
        date,
        clock_in,
        clock_out: Some(clock_out),
        break_start: date.and_hms_opt(12, 0, 0),
        break_end: date.and_hms_opt(12, 30, 0),
        hours_worked: Some(Decimal::new(800, 2)),
        note: None,
        created_at: clock_in,
        updated_at: clock_out,
        version: 2,
    }
}

/// Builds `count` closed records spread over consecutive days.
fn record_set(count: usize) -> Vec<AttendanceRecord> {
    let base = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
    (0..count)
        .map(|i| closed_record(base.checked_add_days(Days::new(i as u64)).unwrap()))
        .collect()
}

/// Benchmark: worked-hours computation for one session.
fn bench_compute_hours(c: &mut Criterion) {
    let clock_in = datetime("2026-01-15 09:00:00");
    let clock_out = datetime("2026-01-15 18:00:00");
    let break_start = Some(datetime("2026-01-15 12:00:00"));
    let break_end = Some(datetime("2026-01-15 12:30:00"));

    c.bench_function("compute_hours_worked", |b| {
        b.iter(|| {
            let hours = compute_hours_worked(
                black_box(clock_in),
                black_box(clock_out),
                black_box(break_start),
                black_box(break_end),
                BreakPolicy::Ignore,
            )
            .unwrap();
            black_box(hours)
        })
    });
}

/// Benchmark: wage aggregation over growing record sets.
fn bench_compute_wage(c: &mut Criterion) {
    let rate = Decimal::ONE_THOUSAND;

    let mut group = c.benchmark_group("compute_wage");
    for count in [1usize, 31, 365].iter() {
        let records = record_set(*count);
        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::new("records", count), count, |b, _| {
            b.iter(|| black_box(compute_wage(black_box(&records), |_| rate)))
        });
    }
    group.finish();
}

/// Benchmark: the wage endpoint end to end over a full month.
fn bench_wage_endpoint(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    let store = Arc::new(MemoryStore::new());
    let engine = Arc::new(TimeclockEngine::new(
        store.clone(),
        store,
        Settings::default(),
    ));

    // Seed one closed session per day of January.
    rt.block_on(async {
        let base = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        for i in 0..31u64 {
            let day = base.checked_add_days(Days::new(i)).unwrap();
            engine
                .record_action(ClockAction::ClockIn, day.and_hms_opt(9, 0, 0).unwrap())
                .await
                .unwrap();
            engine
                .record_action(ClockAction::ClockOut, day.and_hms_opt(17, 0, 0).unwrap())
                .await
                .unwrap();
        }
    });

    let router = create_router(AppState::new(engine, Arc::new(AllowAll)));

    c.bench_function("wage_endpoint_full_month", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("GET")
                        .uri("/attendance/wage?month=2026-01")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

criterion_group!(
    benches,
    bench_compute_hours,
    bench_compute_wage,
    bench_wage_endpoint,
);
criterion_main!(benches);
