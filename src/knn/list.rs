use std::{fmt, ops::Index, sync::Arc};

use serde::Serialize;

use crate::base::{DbId, Distance};
use crate::error::{KnnError, Result};

use super::{DistancePair, KnnListIter};

/// Finalized kNN result: read-only, ordered by increasing distance.
///
/// Cloning is cheap, all clones share the same entries. The list may hold
/// more than k entries when candidates tie with the k-th distance.
#[derive(Clone, Debug, Serialize)]
pub struct KnnList {
    k: usize,
    entries: Arc<[DistancePair]>,
}

impl KnnList {
    pub(crate) fn new(k: usize, entries: Arc<[DistancePair]>) -> Self {
        Self { k, entries }
    }

    /// The value of k this list was computed for
    pub fn k(&self) -> usize {
        self.k
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&DistancePair> {
        self.entries.get(index).ok_or(KnnError::IndexOutOfRange {
            index,
            len: self.entries.len(),
        })
    }

    pub fn iter(&self) -> KnnListIter<'_> {
        KnnListIter::new(&self.entries)
    }

    pub fn as_slice(&self) -> &[DistancePair] {
        &self.entries
    }

    pub fn contains(&self, id: DbId) -> bool {
        self.entries.iter().any(|p| p.id() == id)
    }

    /// Distance of the k-th neighbor (+inf if fewer than k were found)
    pub fn knn_distance(&self) -> Distance {
        if self.entries.len() < self.k {
            Distance::INFINITY
        } else {
            self.entries[self.k - 1].distance()
        }
    }

    pub fn ids(&self) -> Vec<DbId> {
        self.entries.iter().map(|p| p.id()).collect()
    }

    pub fn distances(&self) -> Vec<Distance> {
        self.entries.iter().map(|p| p.distance()).collect()
    }
}

impl Index<usize> for KnnList {
    type Output = DistancePair;

    fn index(&self, index: usize) -> &Self::Output {
        &self.entries[index]
    }
}

impl<'a> IntoIterator for &'a KnnList {
    type Item = &'a DistancePair;
    type IntoIter = KnnListIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for KnnList {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "kNNList[")?;
        for (ix, pair) in self.entries.iter().enumerate() {
            if ix > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", pair)?;
        }
        write!(f, "]")
    }
}
