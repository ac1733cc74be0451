//! Brute-force kNN queries over a labeled dataset

pub mod merge;

use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use ndarray::ArrayView1;

use crate::{
    base::DbId,
    data::LabeledDataset,
    distance::DistanceFunction,
    error::{KnnError, Result},
    knn::{KnnHeap, KnnList},
    options::KnnOptions,
};

const DEFAULT_PROGRESS_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})";

fn pb_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template(DEFAULT_PROGRESS_TEMPLATE)
        .progress_chars("=> ")
}

/// Computes the k nearest neighbors of `query` by scanning all objects
///
/// `exclude` is skipped (used to leave out the query object itself).
/// A NaN or infinite distance (overflow on huge attributes, NaN in the
/// query) fails with [`KnnError::NonFiniteDistance`] naming the object.
fn scan(
    dataset: &LabeledDataset,
    query: ArrayView1<f64>,
    distance: &dyn DistanceFunction,
    options: &KnnOptions,
    exclude: Option<DbId>,
) -> Result<KnnList> {
    if let Some(dimensionality) = dataset.dimensionality() {
        if dimensionality != query.len() {
            return Err(KnnError::QueryDimension {
                expected: dimensionality,
                actual: query.len(),
            });
        }
    }

    let mut heap = KnnHeap::with_slack(options.k, options.slack)?;
    let mut boundary = heap.boundary_distance();
    let mut pruned = 0usize;

    for (id, vector) in dataset.iter() {
        if Some(id) == exclude {
            continue;
        }
        let d = distance.distance(query, vector);
        if !d.is_finite() {
            return Err(KnnError::NonFiniteDistance { id, distance: d });
        }
        if d > boundary {
            pruned += 1;
            continue;
        }
        boundary = heap.add(d, id)?;
    }

    debug!(
        "Scanned {} objects with {} ({} pruned, kNN distance {})",
        dataset.len(),
        distance.name(),
        pruned,
        boundary
    );
    Ok(heap.into_list())
}

/// k nearest neighbors of an arbitrary query vector
///
/// Fails with [`KnnError::NonFiniteDistance`] when a distance cannot be
/// represented as a finite number.
pub fn linear_scan(
    dataset: &LabeledDataset,
    query: ArrayView1<f64>,
    options: &KnnOptions,
) -> Result<KnnList> {
    options.validate()?;
    let distance = options.distance.create();
    scan(dataset, query, distance.as_ref(), options, None)
}

/// k nearest neighbors of an object of the dataset
pub fn knn_for_id(dataset: &LabeledDataset, id: DbId, options: &KnnOptions) -> Result<KnnList> {
    options.validate()?;
    let distance = options.distance.create();
    let exclude = options.exclude_query.then_some(id);
    scan(
        dataset,
        dataset.vector(id)?,
        distance.as_ref(),
        options,
        exclude,
    )
}

/// k nearest neighbors of every object of the dataset
pub fn all_knn(dataset: &LabeledDataset, options: &KnnOptions) -> Result<Vec<KnnList>> {
    options.validate()?;
    let distance = options.distance.create();

    let progress = if options.show_progress {
        let progress = ProgressBar::new(dataset.len() as u64);
        progress.set_style(pb_style());
        progress
    } else {
        ProgressBar::hidden()
    };

    let mut results = Vec::with_capacity(dataset.len());
    for (id, vector) in dataset.iter() {
        let exclude = options.exclude_query.then_some(id);
        results.push(scan(dataset, vector, distance.as_ref(), options, exclude)?);
        progress.inc(1);
    }
    progress.finish();

    info!(
        "Computed the {}-NN of {} objects ({} distance)",
        options.k,
        dataset.len(),
        options.distance
    );
    Ok(results)
}
