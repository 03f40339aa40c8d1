//! Benchmarks for the Ballotbox vote store
//!
//! Run with: cargo bench

use ballotbox::store::{ElectionConfig, MemoryBackend, VoteStore, VotingItem, VotingOption};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

fn create_test_config(items: usize, options: usize) -> ElectionConfig {
    ElectionConfig {
        title: "Benchmark election".to_string(),
        description: String::new(),
        logo_url: None,
        voting_items: (0..items)
            .map(|i| VotingItem {
                id: format!("item-{}", i),
                question: format!("Question {}", i),
                options: (0..options)
                    .map(|o| VotingOption {
                        id: format!("item-{}-opt-{}", i, o),
                        label: format!("Option {}", o),
                        count: 0,
                    })
                    .collect(),
            })
            .collect(),
    }
}

fn bench_save_vote(c: &mut Criterion) {
    let mut group = c.benchmark_group("save_vote");

    for (items, options) in [(1, 3), (10, 5), (100, 10)] {
        let store = VoteStore::open(MemoryBackend::new());
        store.save_config(create_test_config(items, options));

        // Vote for the last option of the last item: worst case for the
        // linear id lookups and the full tally-map serialization.
        let item_id = format!("item-{}", items - 1);
        let option_id = format!("item-{}-opt-{}", items - 1, options - 1);

        group.throughput(Throughput::Elements(1));
        group.bench_function(format!("items_{}_options_{}", items, options), |b| {
            b.iter(|| store.save_vote(black_box(&item_id), black_box(&option_id)))
        });
    }

    group.finish();
}

fn bench_hydrate(c: &mut Criterion) {
    let mut group = c.benchmark_group("hydrate");

    for (items, options) in [(1, 3), (100, 10)] {
        let backend = MemoryBackend::new();
        {
            let store = VoteStore::open(backend.clone());
            store.save_config(create_test_config(items, options));
            store.save_vote("item-0", "item-0-opt-0");
        }

        group.bench_function(format!("items_{}_options_{}", items, options), |b| {
            b.iter(|| {
                let store = VoteStore::open(black_box(backend.clone()));
                black_box(store.current_config())
            })
        });
    }

    group.finish();
}

fn bench_results(c: &mut Criterion) {
    let mut group = c.benchmark_group("results");

    let config = create_test_config(100, 10);
    group.bench_function("derive_100_items", |b| {
        b.iter(|| ballotbox::results::election_results(black_box(&config)))
    });

    group.finish();
}

criterion_group!(benches, bench_save_vote, bench_hydrate, bench_results);
criterion_main!(benches);
