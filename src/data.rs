use ndarray::{Array1, ArrayView1};

use crate::base::DbId;
use crate::error::{KnnError, Result};

/// Feature vectors with their labels; the identifier of an object is its index
#[derive(Default, Debug, Clone)]
pub struct LabeledDataset {
    vectors: Vec<Array1<f64>>,
    labels: Vec<String>,
    dimensionality: Option<usize>,
}

impl LabeledDataset {
    pub fn new() -> Self {
        Default::default()
    }

    /// Adds an object and returns its identifier
    ///
    /// The vector must have the dimensionality of the first object, and
    /// only finite attributes. Errors report the 1-based object number as
    /// the line.
    pub fn push(&mut self, vector: Array1<f64>, label: String) -> Result<DbId> {
        if let Some(value) = vector.iter().find(|x| !x.is_finite()) {
            return Err(KnnError::InvalidAttribute {
                line: self.vectors.len() + 1,
                value: *value,
            });
        }
        match self.dimensionality {
            Some(expected) if expected != vector.len() => {
                return Err(KnnError::DimensionMismatch {
                    line: self.vectors.len() + 1,
                    expected,
                    actual: vector.len(),
                });
            }
            Some(_) => {}
            None => self.dimensionality = Some(vector.len()),
        }

        let id = DbId::try_from(self.vectors.len()).map_err(|_| {
            KnnError::Config("too many objects for a 32 bits identifier".to_string())
        })?;
        self.vectors.push(vector);
        self.labels.push(label);
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Dimensionality of the vectors (None if the dataset is empty)
    pub fn dimensionality(&self) -> Option<usize> {
        self.dimensionality
    }

    pub fn vector(&self, id: DbId) -> Result<ArrayView1<'_, f64>> {
        self.vectors
            .get(id as usize)
            .map(|v| v.view())
            .ok_or(KnnError::IndexOutOfRange {
                index: id as usize,
                len: self.vectors.len(),
            })
    }

    pub fn label(&self, id: DbId) -> Result<&str> {
        self.labels
            .get(id as usize)
            .map(|l| l.as_str())
            .ok_or(KnnError::IndexOutOfRange {
                index: id as usize,
                len: self.labels.len(),
            })
    }

    /// Iterates over (identifier, vector) pairs
    pub fn iter(&self) -> impl Iterator<Item = (DbId, ArrayView1<'_, f64>)> {
        self.vectors
            .iter()
            .enumerate()
            .map(|(ix, v)| (ix as DbId, v.view()))
    }
}
