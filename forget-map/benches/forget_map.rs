//! 遗忘映射性能基准测试
//!
//! 测量查找、满容量插入（含淘汰扫描）以及并发查找的开销

use criterion::{Bencher, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use forget_map::{ForgetMap, NoopObserver};
use std::sync::Arc;
use std::thread;

fn quiet_map(capacity: usize) -> ForgetMap<u64, u64> {
    ForgetMap::with_observer(capacity, Arc::new(NoopObserver)).expect("capacity must be positive")
}

/// 基准测试：命中查找
fn bench_lookup_hit(c: &mut Criterion) {
    let map = quiet_map(1024);
    for i in 0..1024 {
        map.insert(i, i);
    }

    c.bench_function("lookup_hit", |b: &mut Bencher| {
        b.iter(|| {
            for i in 0..1024 {
                let _ = map.lookup(&black_box(i));
            }
        })
    });
}

/// 基准测试：满容量插入，不同容量下的淘汰扫描开销
fn bench_insert_with_eviction(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_with_eviction");

    for &capacity in &[16usize, 128, 1024] {
        group.bench_with_input(
            BenchmarkId::from_parameter(capacity),
            &capacity,
            |b: &mut Bencher, &capacity| {
                let map = quiet_map(capacity);
                for i in 0..capacity as u64 {
                    map.insert(i, i);
                }
                let mut next = capacity as u64;
                b.iter(|| {
                    map.insert(black_box(next), next);
                    next += 1;
                })
            },
        );
    }

    group.finish();
}

/// 基准测试：并发查找同一个键
fn bench_concurrent_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_lookup");

    for &thread_count in &[1usize, 2, 4, 8] {
        group.bench_with_input(
            BenchmarkId::new("same_key", thread_count),
            &thread_count,
            |b: &mut Bencher, &thread_count| {
                let map = Arc::new(quiet_map(64));
                map.insert(0, 0);

                b.iter(|| {
                    let handles: Vec<_> = (0..thread_count)
                        .map(|_| {
                            let map = Arc::clone(&map);
                            thread::spawn(move || {
                                for _ in 0..1000 {
                                    let _ = map.lookup(&black_box(0));
                                }
                            })
                        })
                        .collect();

                    for handle in handles {
                        handle.join().expect("lookup thread panicked");
                    }
                })
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_lookup_hit,
    bench_insert_with_eviction,
    bench_concurrent_lookup
);
criterion_main!(benches);
