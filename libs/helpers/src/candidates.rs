use rand::{Rng, RngCore};
use rand_distr::{Distribution, LogNormal};

use knn_heap::base::{DbId, Distance};

/// Random candidates, with a controlled share of duplicated distances
/// and identifiers
pub fn random_candidates(
    count: usize,
    duplicate_ratio: f64,
    rng: &mut dyn RngCore,
) -> Vec<(Distance, DbId)> {
    let log_normal = LogNormal::new(0., 1.).unwrap();
    let mut candidates: Vec<(Distance, DbId)> = Vec::with_capacity(count);

    for ix in 0..count {
        if !candidates.is_empty() && rng.gen_bool(duplicate_ratio) {
            let (distance, id) = candidates[rng.gen_range(0..candidates.len())];
            // Either the same distance or the same identifier
            if rng.gen_bool(0.5) {
                candidates.push((distance, ix as DbId));
            } else {
                candidates.push((log_normal.sample(rng), id));
            }
        } else {
            candidates.push((log_normal.sample(rng), ix as DbId));
        }
    }

    candidates
}

/// The k smallest distances (sorted) of a set of candidates
pub fn smallest_distances(candidates: &[(Distance, DbId)], k: usize) -> Vec<Distance> {
    let mut distances: Vec<Distance> = candidates.iter().map(|c| c.0).collect();
    distances.sort_by(|a, b| a.total_cmp(b));
    distances.truncate(k);
    distances
}

/// Reference top-k: stable sort on the distance, then truncation
pub fn reference_top_k(candidates: &[(Distance, DbId)], k: usize) -> Vec<(Distance, DbId)> {
    let mut sorted = candidates.to_vec();
    sorted.sort_by(|a, b| a.0.total_cmp(&b.0));
    sorted.truncate(k);
    sorted
}
