use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use loop_core::{LoopConfig, SimulationStore};

fn store() -> SimulationStore {
    SimulationStore::new(LoopConfig::new().with_seed(7))
}

fn bench_activation(c: &mut Criterion) {
    for trigger in ["log-101", "log-103", "log-104"] {
        c.bench_function(&format!("store.activate.{trigger}"), |b| {
            b.iter_batched(
                store,
                |mut store| black_box(store.activate(trigger)),
                BatchSize::SmallInput,
            );
        });
    }

    c.bench_function("store.activate.unknown", |b| {
        let mut store = store();
        b.iter(|| black_box(store.activate("log-999")));
    });
}

fn bench_reset(c: &mut Criterion) {
    c.bench_function("store.reset.full", |b| {
        b.iter_batched(
            || {
                let mut store = store();
                let _ = store.activate("log-104");
                store
            },
            |mut store| {
                store.reset();
                store
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_read(c: &mut Criterion) {
    let store = store();
    c.bench_function("state.stats", |b| b.iter(|| black_box(store.state().stats())));
    c.bench_function("state.snapshot", |b| b.iter(|| black_box(store.snapshot())));
}

criterion_group!(benches, bench_activation, bench_reset, bench_read);
criterion_main!(benches);
