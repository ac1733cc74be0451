//! Distance functions between feature vectors

use std::{fmt, str::FromStr};

use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

use crate::base::Distance;
use crate::error::KnnError;

/// A distance function between two vectors of the same dimension
pub trait DistanceFunction: Send + Sync {
    fn distance(&self, a: ArrayView1<f64>, b: ArrayView1<f64>) -> Distance;

    /// Name of the function in the registry
    fn name(&self) -> &'static str;
}

pub struct Euclidean;

impl DistanceFunction for Euclidean {
    fn distance(&self, a: ArrayView1<f64>, b: ArrayView1<f64>) -> Distance {
        SquaredEuclidean.distance(a, b).sqrt()
    }

    fn name(&self) -> &'static str {
        DistanceKind::Euclidean.name()
    }
}

pub struct SquaredEuclidean;

impl DistanceFunction for SquaredEuclidean {
    fn distance(&self, a: ArrayView1<f64>, b: ArrayView1<f64>) -> Distance {
        a.iter()
            .zip(b.iter())
            .map(|(x, y)| (x - y) * (x - y))
            .sum()
    }

    fn name(&self) -> &'static str {
        DistanceKind::SquaredEuclidean.name()
    }
}

pub struct Manhattan;

impl DistanceFunction for Manhattan {
    fn distance(&self, a: ArrayView1<f64>, b: ArrayView1<f64>) -> Distance {
        a.iter().zip(b.iter()).map(|(x, y)| (x - y).abs()).sum()
    }

    fn name(&self) -> &'static str {
        DistanceKind::Manhattan.name()
    }
}

/// Chebyshev (L-infinity) distance
pub struct Maximum;

impl DistanceFunction for Maximum {
    fn distance(&self, a: ArrayView1<f64>, b: ArrayView1<f64>) -> Distance {
        a.iter()
            .zip(b.iter())
            .map(|(x, y)| (x - y).abs())
            .fold(0., f64::max)
    }

    fn name(&self) -> &'static str {
        DistanceKind::Maximum.name()
    }
}

/// 1 - cosine similarity; 1 when one of the vectors is null
pub struct Cosine;

impl DistanceFunction for Cosine {
    fn distance(&self, a: ArrayView1<f64>, b: ArrayView1<f64>) -> Distance {
        let norms = a.dot(&a).sqrt() * b.dot(&b).sqrt();
        if norms == 0. {
            return 1.;
        }
        // Rounding can push the similarity slightly above 1
        (1. - a.dot(&b) / norms).max(0.)
    }

    fn name(&self) -> &'static str {
        DistanceKind::Cosine.name()
    }
}

/// Registry of the available distance functions
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DistanceKind {
    #[default]
    Euclidean,
    SquaredEuclidean,
    Manhattan,
    Maximum,
    Cosine,
}

impl DistanceKind {
    pub const ALL: [DistanceKind; 5] = [
        DistanceKind::Euclidean,
        DistanceKind::SquaredEuclidean,
        DistanceKind::Manhattan,
        DistanceKind::Maximum,
        DistanceKind::Cosine,
    ];

    /// Creates the distance function
    pub fn create(&self) -> Box<dyn DistanceFunction> {
        match self {
            DistanceKind::Euclidean => Box::new(Euclidean),
            DistanceKind::SquaredEuclidean => Box::new(SquaredEuclidean),
            DistanceKind::Manhattan => Box::new(Manhattan),
            DistanceKind::Maximum => Box::new(Maximum),
            DistanceKind::Cosine => Box::new(Cosine),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DistanceKind::Euclidean => "euclidean",
            DistanceKind::SquaredEuclidean => "squared-euclidean",
            DistanceKind::Manhattan => "manhattan",
            DistanceKind::Maximum => "maximum",
            DistanceKind::Cosine => "cosine",
        }
    }
}

impl FromStr for DistanceKind {
    type Err = KnnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DistanceKind::ALL
            .iter()
            .find(|kind| kind.name() == s)
            .copied()
            .ok_or_else(|| KnnError::UnknownDistance(s.to_string()))
    }
}

impl fmt::Display for DistanceKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
