use bloomnames_core::{BloomNames, FilterParams};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn names(count: usize) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(1);
    (0..count)
        .map(|_| (0..40).map(|_| (b'a' + rng.random_range(0..6u8)) as char).collect())
        .collect()
}

fn bench_membership(c: &mut Criterion) {
    let members = names(3000);
    let mut full = BloomNames::default();
    full.extend(members.iter());

    c.bench_function("add_3000", |b| {
        b.iter(|| {
            let mut bloom = BloomNames::default();
            bloom.extend(members.iter());
            black_box(bloom)
        })
    });
    c.bench_function("contains_hit", |b| b.iter(|| black_box(full.contains(&members[17]))));
    c.bench_function("contains_miss", |b| b.iter(|| black_box(full.contains("not-a-member"))));

    let wide = FilterParams::new(100_000, 1e-6).unwrap();
    let bloom = BloomNames::with_params(wide);
    c.bench_function("positions_multi_digest", |b| {
        b.iter(|| black_box(bloom.hash_positions(&members[0])))
    });
    c.bench_function("raw_value", |b| b.iter(|| black_box(full.raw_value())));
}

criterion_group!(benches, bench_membership);
criterion_main!(benches);
