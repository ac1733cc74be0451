use criterion::{criterion_group, criterion_main, Criterion};

use helpers::{candidates::random_candidates, dataset::TestDataset};
use knn_heap::{knn::KnnHeap, options::KnnOptions, search::linear_scan};
use rand::{rngs::StdRng, SeedableRng};

fn criterion_benchmark(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);

    const NUM_CANDIDATES: usize = 100_000;
    let candidates = random_candidates(NUM_CANDIDATES, 0.1, &mut rng);

    for k in [10, 100] {
        c.bench_function(&format!("heap k={}", k), |b| {
            b.iter(|| {
                let mut heap = KnnHeap::new(k).expect("Could not create the heap");
                for &(d, id) in candidates.iter() {
                    heap.add(d, id).expect("Error while adding a candidate");
                }
                heap.finalize()
            })
        });
    }

    let data = TestDataset::new(10_000, 32, Some(0));
    let options = KnnOptions::default();
    let query = data.vectors[0].view();
    c.bench_function("linear scan", |b| {
        b.iter(|| linear_scan(&data.dataset, query, &options))
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().significance_level(0.1).sample_size(50);
    targets = criterion_benchmark
}
criterion_main!(benches);
