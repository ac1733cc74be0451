use std::io::Write;

use ndarray::{Array1, ArrayView1};
use rand::{rngs::StdRng, SeedableRng};
use rand_distr::{Distribution, Normal};
use temp_dir::TempDir;

use knn_heap::{
    base::{DbId, Distance},
    data::LabeledDataset,
    distance::DistanceFunction,
};

pub struct TestDataset {
    pub dataset: LabeledDataset,
    pub vectors: Vec<Array1<f64>>,
}

impl TestDataset {
    /// Gaussian vectors, labeled by their index
    pub fn new(count: usize, dimension: usize, seed: Option<u64>) -> Self {
        let mut rng = if let Some(seed) = seed {
            StdRng::seed_from_u64(seed)
        } else {
            StdRng::from_entropy()
        };
        let normal = Normal::<f64>::new(0., 1.).unwrap();

        let mut dataset = LabeledDataset::new();
        let mut vectors = Vec::with_capacity(count);
        for ix in 0..count {
            let vector = Array1::from_iter((0..dimension).map(|_| normal.sample(&mut rng)));
            dataset
                .push(vector.clone(), format!("object-{}", ix))
                .expect("Error while adding an object");
            vectors.push(vector);
        }

        Self { dataset, vectors }
    }

    /// Brute-force neighbors: all distances, stable sort, truncation
    pub fn brute_force(
        &self,
        query: ArrayView1<f64>,
        distance: &dyn DistanceFunction,
        k: usize,
        exclude: Option<DbId>,
    ) -> Vec<(Distance, DbId)> {
        let mut all: Vec<(Distance, DbId)> = self
            .vectors
            .iter()
            .enumerate()
            .filter(|(ix, _)| Some(*ix as DbId) != exclude)
            .map(|(ix, v)| (distance.distance(query, v.view()), ix as DbId))
            .collect();
        all.sort_by(|a, b| a.0.total_cmp(&b.0));
        all.truncate(k);
        all
    }

    /// Writes the dataset in the labeled vector format
    pub fn write(&self, dir: &TempDir, name: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).expect("Could not create the data file");
        writeln!(file, "# {} objects", self.vectors.len()).unwrap();
        for (ix, v) in self.vectors.iter().enumerate() {
            let values: Vec<String> = v.iter().map(|x| format!("{:?}", x)).collect();
            writeln!(file, "{} object-{}", values.join(" "), ix).unwrap();
        }
        path
    }
}
