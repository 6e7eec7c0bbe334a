use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::sync::Arc;
use std::thread::{spawn, JoinHandle};

use gapfree::{GapFreeTracker, LockFreeTracker, LockedTracker};

#[inline(always)]
fn complete_n<T: GapFreeTracker + 'static>(
    tracker: Arc<T>,
    num: i64,
    writers: i64,
    offset: i64,
) -> JoinHandle<()> {
    spawn(move || {
        let mut id = offset + 1;
        while id <= num {
            tracker.record_completion(id).expect("id in range");
            id += writers;
        }
    })
}

#[inline(always)]
fn test<T: GapFreeTracker + 'static>(tracker: T, num: i64, num_writers: i64) {
    let tracker = Arc::new(tracker);
    let writers: Vec<JoinHandle<()>> = (0..num_writers)
        .map(|offset| complete_n(tracker.clone(), num, num_writers, offset))
        .collect();
    for writer in writers {
        writer.join().expect("writer panicked");
    }
    assert_eq!(tracker.current_watermark(), num);
}

fn locked(num: i64, writers: i64) {
    test(LockedTracker::new(num as usize + 1), num, writers);
}

fn lock_free(num: i64, writers: i64) {
    test(LockFreeTracker::new(num as usize + 1), num, writers);
}

fn throughput(c: &mut Criterion) {
    let num = 100_000;
    let max_writers = 8;

    let mut group = c.benchmark_group("locked");
    group.throughput(Throughput::Elements(num as u64));
    for writers in 1..=max_writers {
        group.bench_with_input(BenchmarkId::from_parameter(writers), &writers, |b, &writers| {
            b.iter(|| locked(black_box(num), black_box(writers)));
        });
    }
    group.finish();

    let mut group = c.benchmark_group("lock_free");
    group.throughput(Throughput::Elements(num as u64));
    for writers in 1..=max_writers {
        group.bench_with_input(BenchmarkId::from_parameter(writers), &writers, |b, &writers| {
            b.iter(|| lock_free(black_box(num), black_box(writers)));
        });
    }
    group.finish();
}

criterion_group!(benches, throughput);
criterion_main!(benches);
