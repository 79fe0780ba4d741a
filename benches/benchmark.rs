use criterion::{Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;
use treevec::neighbor::{neighborhood, random_vector};
use treevec::{to_tree, to_vector};

const LEAF_COUNTS: &[usize] = &[10, 100, 1_000];

const BENCH_SEED: u64 = 0xC0FFEE;

fn codec_encode(c: &mut Criterion) {
    for &n in LEAF_COUNTS {
        let mut rng = StdRng::seed_from_u64(BENCH_SEED);
        let (tree, labels) = to_tree(&random_vector(n, &mut rng)).unwrap();
        c.bench_function(&format!("encode_{n}"), |b| {
            b.iter(|| to_vector(&tree, &labels).unwrap());
        });
    }
}

fn codec_decode(c: &mut Criterion) {
    for &n in LEAF_COUNTS {
        let mut rng = StdRng::seed_from_u64(BENCH_SEED);
        let vector = random_vector(n, &mut rng);
        c.bench_function(&format!("decode_{n}"), |b| {
            b.iter(|| to_tree(&vector).unwrap());
        });
    }
}

fn codec_round_trip(c: &mut Criterion) {
    for &n in LEAF_COUNTS {
        let mut rng = StdRng::seed_from_u64(BENCH_SEED);
        let vector = random_vector(n, &mut rng);
        c.bench_function(&format!("round_trip_{n}"), |b| {
            b.iter(|| {
                let (tree, labels) = to_tree(&vector).unwrap();
                to_vector(&tree, &labels).unwrap()
            });
        });
    }
}

fn neighborhood_walk(c: &mut Criterion) {
    for &n in LEAF_COUNTS {
        let mut rng = StdRng::seed_from_u64(BENCH_SEED);
        let vector = random_vector(n, &mut rng);
        c.bench_function(&format!("neighborhood_{n}"), |b| {
            b.iter(|| neighborhood(&vector).count());
        });
    }
}

criterion_group!(codec, codec_encode, codec_decode, codec_round_trip);
criterion_group! {
    name = neighbors;
    config = Criterion::default().sample_size(20);
    targets = neighborhood_walk
}
criterion_main!(codec, neighbors);
