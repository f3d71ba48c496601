use chrono::{Duration, NaiveDate};
use criterion::{criterion_group, criterion_main, Criterion};
use exercise_tracker::models::{Exercise, ExerciseQuery};
use std::hint::black_box;

/// Build a year of daily exercises for one user, interleaved with another user's.
fn fixture() -> Vec<Exercise> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    (0..730)
        .map(|i| Exercise {
            id: format!("{:024x}", i),
            user_id: if i % 2 == 0 { "alice" } else { "bob" }.to_string(),
            description: format!("session {}", i),
            duration: (i % 90) as f64,
            date: start + Duration::days(i / 2),
            created_at: format!("2024-01-01T00:00:00.{:09}Z", i),
        })
        .collect()
}

fn benchmark_log_query(c: &mut Criterion) {
    let exercises = fixture();

    let january = ExerciseQuery {
        from: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        to: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        limit: None,
    };
    let whole_year_limited = ExerciseQuery {
        from: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        to: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
        limit: Some(10),
    };

    let mut group = c.benchmark_group("log_query");

    group.bench_function("one_month", |b| {
        b.iter(|| black_box(&january).apply("alice", black_box(&exercises)))
    });

    group.bench_function("whole_year_limit_10", |b| {
        b.iter(|| black_box(&whole_year_limited).apply("alice", black_box(&exercises)))
    });

    group.finish();
}

criterion_group!(benches, benchmark_log_query);
criterion_main!(benches);
