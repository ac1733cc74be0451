use helpers::candidates::{random_candidates, reference_top_k, smallest_distances};
use knn_heap::{
    base::{DbId, Distance},
    knn::{DistancePair, KnnHeap, KnnList},
    KnnError,
};
use log::debug;
use ntest::timeout;
use rand::{rngs::StdRng, SeedableRng};
use rstest::rstest;

/// Initialize the logger
fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn as_pairs(list: &KnnList) -> Vec<(Distance, DbId)> {
    list.iter().map(|p| (p.distance(), p.id())).collect()
}

fn check_sorted_prefix(heap: &KnnHeap) {
    let n = heap.len().min(heap.k());
    for i in 1..n {
        let previous = heap.get(i - 1).unwrap().distance();
        let current = heap.get(i).unwrap().distance();
        assert!(
            previous <= current,
            "Entries {} and {} are not sorted: {} > {}",
            i - 1,
            i,
            previous,
            current
        );
    }
}

#[test]
fn test_scenario_k3() {
    // a=0, b=1, c=2, d=3, e=4
    let mut heap = KnnHeap::new(3).unwrap();
    for (d, id) in [(5., 0), (1., 1), (4., 2), (2., 3), (1., 4)] {
        heap.add(d, id).unwrap();
    }
    assert_eq!(heap.boundary_distance(), 2.);

    let list = heap.finalize();
    assert_eq!(as_pairs(&list), vec![(1., 1), (1., 4), (2., 3)]);
    assert!(!list.contains(0));
    assert!(!list.contains(2));
    assert_eq!(list.to_string(), "kNNList[1:1,1:4,2:3]");
}

#[test]
fn test_scenario_k2_ties() {
    let mut heap = KnnHeap::new(2).unwrap();
    heap.add(3., 24).unwrap();
    heap.add(3., 25).unwrap();
    assert_eq!(heap.boundary_distance(), 3.);
    assert_eq!(as_pairs(&heap.finalize()), vec![(3., 24), (3., 25)]);
}

#[test]
fn test_empty_heap() {
    let mut heap = KnnHeap::new(5).unwrap();
    assert!(matches!(heap.poll(), Err(KnnError::Empty)));
    assert!(matches!(heap.peek(), Err(KnnError::Empty)));
    assert!(heap.is_empty());
    assert_eq!(heap.boundary_distance(), Distance::INFINITY);

    let list = heap.finalize();
    assert!(list.is_empty());
    assert!(!list.iter().valid());
}

#[test]
fn test_add_after_finalize() {
    let mut heap = KnnHeap::new(2).unwrap();
    heap.add(0.5, 1).unwrap();
    heap.add(0.25, 2).unwrap();
    let list = heap.finalize();

    assert!(matches!(heap.add(0.1, 3), Err(KnnError::InvalidState(_))));
    assert!(matches!(
        heap.add_pair(DistancePair::new(0.1, 3).unwrap()),
        Err(KnnError::InvalidState(_))
    ));
    assert_eq!(as_pairs(&list), vec![(0.25, 2), (0.5, 1)]);
    assert_eq!(as_pairs(&heap.finalize()), vec![(0.25, 2), (0.5, 1)]);
}

#[test]
fn test_boundary_distance() {
    let mut heap = KnnHeap::new(4).unwrap();
    let mut rng = StdRng::seed_from_u64(7);
    for (d, id) in random_candidates(100, 0.2, &mut rng) {
        let boundary = heap.add(d, id).unwrap();
        assert_eq!(boundary, heap.boundary_distance());
        if heap.len() < heap.k() {
            assert_eq!(boundary, Distance::INFINITY);
        } else {
            assert_eq!(boundary, heap.get(heap.k() - 1).unwrap().distance());
        }
    }
}

#[test]
#[timeout(10000)]
fn test_growth() {
    init_logger();
    let k = 3;
    let mut heap = KnnHeap::with_slack(k, 5).unwrap();
    let initial = heap.capacity();

    // Ties with the k-th distance are all retained, and force a growth
    let mut candidates = Vec::new();
    for id in 0..(k + 50) {
        let d = if id < 30 { 2. } else { 1. + (id % 2) as f64 };
        candidates.push((d, id as DbId));
        heap.add(d, id as DbId).unwrap();
        check_sorted_prefix(&heap);
    }
    assert!(
        heap.capacity() > initial,
        "Expected growth beyond {}",
        initial
    );

    let list = heap.finalize();
    assert_eq!(
        as_pairs(&list)[..k].to_vec(),
        reference_top_k(&candidates, k)
    );
}

#[rstest]
#[case(1, 10, 0.)]
#[case(3, 2, 0.)]
#[case(3, 3, 0.5)]
#[case(10, 1000, 0.)]
#[case(10, 1000, 0.3)]
#[case(50, 5000, 0.6)]
#[case(100, 200, 0.9)]
fn test_top_k(#[case] k: usize, #[case] count: usize, #[case] duplicate_ratio: f64) {
    init_logger();

    for seed in 0..5 {
        let mut rng = StdRng::seed_from_u64(seed);
        let candidates = random_candidates(count, duplicate_ratio, &mut rng);

        let mut heap = KnnHeap::new(k).unwrap();
        for &(d, id) in candidates.iter() {
            heap.add(d, id).unwrap();
            check_sorted_prefix(&heap);
        }
        let list = heap.finalize();
        debug!("Seed {}: {}", seed, list);

        let retained = list.len().min(k);
        assert_eq!(retained, count.min(k));

        // Same multiset of distances
        let observed: Vec<Distance> = list.distances()[..retained].to_vec();
        assert_eq!(observed, smallest_distances(&candidates, k));

        // Ties keep the arrival order
        assert_eq!(
            as_pairs(&list)[..retained].to_vec(),
            reference_top_k(&candidates, k)
        );

        // Entries beyond k tie with the k-th one
        for extra in list.as_slice().iter().skip(k) {
            assert_eq!(extra.distance(), list.knn_distance());
        }
    }
}

#[test]
fn test_poll_order() {
    let mut heap = KnnHeap::new(4).unwrap();
    for (d, id) in [(0.4, 1), (0.1, 2), (0.3, 3), (0.2, 4)] {
        heap.add(d, id).unwrap();
    }

    let mut polled = Vec::new();
    while let Ok(pair) = heap.poll() {
        polled.push(pair.id());
    }
    assert_eq!(polled, vec![1, 3, 4, 2]);
    assert!(heap.is_empty());

    // The heap is usable again
    heap.add(1., 5).unwrap();
    assert_eq!(heap.peek().unwrap().id(), 5);
}

#[test]
fn test_cursor() {
    let mut heap = KnnHeap::new(3).unwrap();
    for (d, id) in [(0.3, 1), (0.1, 2), (0.2, 3)] {
        heap.add(d, id).unwrap();
    }
    let list = heap.finalize();

    let mut it = list.iter();
    it.advance_by(2).unwrap();
    assert_eq!(it.id().unwrap(), 1);
    it.retract().unwrap();
    assert_eq!(it.current().unwrap().distance(), 0.2);
    assert!(matches!(
        it.seek(4),
        Err(KnnError::IndexOutOfRange { index: 4, len: 3 })
    ));
    it.seek(0).unwrap();
    assert!(matches!(it.retract(), Err(KnnError::BeforeStart)));
    assert_eq!(it.offset(), 0);
    assert_eq!(it.map(|p| p.id()).collect::<Vec<_>>(), vec![2, 3, 1]);

    // Cursors on a shared list stay valid
    let shared = list.clone();
    drop(list);
    let ids: Vec<DbId> = (&shared).into_iter().map(|p| p.id()).collect();
    assert_eq!(ids, vec![2, 3, 1]);
    assert_eq!(shared[1].id(), 3);
}
