use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use probing_hashtable::ProbingHashTable;
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

fn filled(seed: u64, n: usize) -> (ProbingHashTable<String, u64>, Vec<String>) {
    let mut t = ProbingHashTable::new();
    let keys: Vec<_> = lcg(seed).take(n).map(key).collect();
    for (i, k) in keys.iter().enumerate() {
        t.put(k.clone(), i as u64);
    }
    (t, keys)
}

// Starts at the default capacity, so this includes several resizes.
fn bench_put(c: &mut Criterion) {
    c.bench_function("probing_put_10k", |b| {
        b.iter_batched(
            || lcg(1).take(10_000).map(key).collect::<Vec<_>>(),
            |keys| {
                let mut t = ProbingHashTable::new();
                for (i, k) in keys.into_iter().enumerate() {
                    t.put(k, i as u64);
                }
                black_box(t)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_get_hit(c: &mut Criterion) {
    c.bench_function("probing_get_hit", |b| {
        let (t, keys) = filled(7, 20_000);
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            black_box(t.get(k.as_str()));
        })
    });
}

fn bench_get_miss(c: &mut Criterion) {
    c.bench_function("probing_get_miss", |b| {
        let (t, _) = filled(11, 10_000);
        let mut miss = lcg(0xdead_beef);
        b.iter(|| {
            let k = key(miss.next().unwrap());
            black_box(t.get(k.as_str()));
        })
    });
}

// Remove and re-put the same keys: exercises tombstone skipping and reuse
// without triggering growth.
fn bench_remove_reinsert_churn(c: &mut Criterion) {
    c.bench_function("probing_remove_reinsert_churn", |b| {
        let (mut t, keys) = filled(23, 5_000);
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            let v = t.remove(k.as_str()).unwrap();
            black_box(t.put(k.clone(), v));
        })
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(50)
        .measurement_time(Duration::from_secs(8))
        .warm_up_time(Duration::from_secs(2))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_put, bench_get_hit, bench_get_miss, bench_remove_reinsert_churn
}
criterion_main!(benches);
