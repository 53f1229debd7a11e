use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use meetbook_availability::logic::{AvailabilityEngine, AvailabilityPolicy};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn benchmark_generate_available_dates(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_available_dates");
    let engine = AvailabilityEngine::new(AvailabilityPolicy::default());
    let today = NaiveDate::from_ymd_opt(2025, 5, 5).unwrap();

    // Default two-week window
    group.bench_function("two_weeks", |b| {
        let mut rng = StdRng::seed_from_u64(1);
        b.iter(|| engine.generate_available_dates(black_box(today), black_box(14), &mut rng))
    });

    // Largest window the API allows
    group.bench_function("ninety_days", |b| {
        let mut rng = StdRng::seed_from_u64(1);
        b.iter(|| engine.generate_available_dates(black_box(today), black_box(90), &mut rng))
    });

    group.finish();
}

fn benchmark_generate_time_slots(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_time_slots");
    let engine = AvailabilityEngine::new(AvailabilityPolicy::default());
    let monday = NaiveDate::from_ymd_opt(2025, 5, 5).unwrap();
    let saturday = NaiveDate::from_ymd_opt(2025, 5, 10).unwrap();

    group.bench_function("weekday", |b| {
        let mut rng = StdRng::seed_from_u64(1);
        b.iter(|| engine.generate_time_slots(black_box(monday), &mut rng))
    });

    group.bench_function("weekend", |b| {
        let mut rng = StdRng::seed_from_u64(1);
        b.iter(|| engine.generate_time_slots(black_box(saturday), &mut rng))
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_generate_available_dates,
    benchmark_generate_time_slots
);
criterion_main!(benches);
