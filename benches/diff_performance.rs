use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::{json, Value};
use shopwatch::listing::normalize;
use shopwatch::store::diff::compute_delta;
use shopwatch::store::SnapshotStore;
use tempfile::TempDir;

/// Raw api results with ids `start..start + count`, shaped like real listings
fn raw_listings(start: u64, count: u64) -> Vec<Value> {
    (start..start + count)
        .map(|id| {
            json!({
                "listing_id": id,
                "title": format!("Handmade item {id}"),
                "price": "24.00",
                "currency_code": "USD",
                "quantity": 3,
                "tags": ["ceramic", "handmade", "gift"],
            })
        })
        .collect()
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    for size in [100u64, 1_000, 10_000] {
        let raw = raw_listings(0, size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &raw, |b, raw| {
            b.iter(|| normalize(black_box(raw)).unwrap());
        });
    }

    group.finish();
}

fn bench_compute_delta(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_delta");

    for size in [100u64, 1_000, 10_000] {
        // 10% churn: the new snapshot drops the first tenth and adds as many new ids
        let churn = size / 10;
        let old = normalize(&raw_listings(0, size)).unwrap();
        let new = normalize(&raw_listings(churn, size)).unwrap();

        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            &(old, new),
            |b, (old, new)| b.iter(|| compute_delta(black_box(old), black_box(new))),
        );
    }

    group.finish();
}

fn bench_store_round_trip(c: &mut Criterion) {
    let dir = TempDir::new().expect("failed to create temp dir");
    let store = SnapshotStore::new(dir.path());
    let snapshot = normalize(&raw_listings(0, 1_000)).unwrap();

    c.bench_function("store_save_load_1000", |b| {
        b.iter(|| {
            store.save("bench", black_box(&snapshot)).unwrap();
            store.load("bench").unwrap()
        });
    });
}

criterion_group!(benches, bench_normalize, bench_compute_delta, bench_store_round_trip);
criterion_main!(benches);
