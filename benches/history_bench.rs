use std::hint::black_box;
use std::path::PathBuf;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use hostwatch::system::history::HistoryStore;
use hostwatch::system::snapshot::{DiskUsage, MemoryUsage, Snapshot};

fn make_snapshot(total: u64) -> Snapshot {
    Snapshot {
        cpu_percent: 42.0,
        memory: MemoryUsage {
            total,
            used: total / 2,
            used_percent: 50.0,
        },
        disk: vec![
            DiskUsage {
                path: PathBuf::from("/"),
                total: 500_000_000_000,
                used: 250_000_000_000,
                used_percent: 50.0,
            },
            DiskUsage {
                path: PathBuf::from("/var"),
                total: 100_000_000_000,
                used: 10_000_000_000,
                used_percent: 10.0,
            },
        ],
        ..Snapshot::default()
    }
}

fn bench_append(c: &mut Criterion) {
    let store = HistoryStore::new(1_440);
    c.bench_function("ring_append", |b| {
        let mut i = 0u64;
        b.iter(|| {
            i += 1;
            store.append(black_box(make_snapshot(i)));
        });
    });
}

fn bench_query(c: &mut Criterion) {
    let store = HistoryStore::new(1_440);
    for i in 1..=1_440u64 {
        store.append(make_snapshot(i));
    }

    let mut group = c.benchmark_group("ring_query_hours");
    for hours in [1usize, 6, 24] {
        group.bench_with_input(BenchmarkId::from_parameter(hours), &hours, |b, &hours| {
            b.iter(|| black_box(store.query(hours * 60)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_append, bench_query);
criterion_main!(benches);
