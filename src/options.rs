use std::{fs::File, io::Read, path::Path};

use derivative::Derivative;
use serde::{Deserialize, Serialize};

use crate::base::DEFAULT_SLACK;
use crate::distance::DistanceKind;
use crate::error::{KnnError, Result};

/// Options of a kNN query
#[derive(Derivative, Serialize, Deserialize, Clone, Debug)]
#[derivative(Default)]
#[serde(default)]
pub struct KnnOptions {
    /// Number of neighbors
    #[derivative(Default(value = "10"))]
    pub k: usize,

    /// Extra slots allocated by the collector before its first growth
    #[derivative(Default(value = "DEFAULT_SLACK"))]
    pub slack: usize,

    pub distance: DistanceKind,

    /// When querying by object, do not report the object itself
    pub exclude_query: bool,

    /// Display a progress bar for all-kNN queries
    pub show_progress: bool,
}

impl KnnOptions {
    pub fn new(k: usize, distance: DistanceKind) -> Self {
        Self {
            k,
            distance,
            ..Default::default()
        }
    }

    /// Reads (and validates) options from JSON
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let options: KnnOptions =
            serde_json::from_reader(reader).map_err(|e| KnnError::Config(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::options().read(true).open(path)?;
        Self::from_reader(file)
    }

    pub fn validate(&self) -> Result<()> {
        if self.k == 0 {
            return Err(KnnError::Config("k must be at least 1".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = KnnOptions::default();
        assert_eq!(options.k, 10);
        assert_eq!(options.slack, DEFAULT_SLACK);
        assert_eq!(options.distance, DistanceKind::Euclidean);
        assert!(!options.exclude_query);
    }

    #[test]
    fn test_from_json() {
        let options =
            KnnOptions::from_reader(r#"{"k": 3, "distance": "manhattan"}"#.as_bytes()).unwrap();
        assert_eq!(options.k, 3);
        assert_eq!(options.slack, DEFAULT_SLACK);
        assert_eq!(options.distance, DistanceKind::Manhattan);

        assert!(matches!(
            KnnOptions::from_reader(r#"{"k": 0}"#.as_bytes()),
            Err(KnnError::Config(_))
        ));
        assert!(matches!(
            KnnOptions::from_reader(r#"{"distance": "hamming"}"#.as_bytes()),
            Err(KnnError::Config(_))
        ));
    }
}
