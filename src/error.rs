//! Error types for the kNN collector and the layers built around it.

use thiserror::Error;

use crate::base::{DbId, Distance};

/// Errors raised by the collector, its cursors, the parser and the options
#[derive(Debug, Error)]
pub enum KnnError {
    /// A distance that is NaN, infinite or negative was offered
    #[error("invalid distance {0}: distances must be finite and non-negative")]
    InvalidDistance(Distance),

    /// No valid entry (empty collector or exhausted cursor)
    #[error("no entry available")]
    Empty,

    /// A mutating operation was called on a finalized collector
    #[error("invalid state: {0}")]
    InvalidState(&'static str),

    /// Position outside of the valid range
    #[error("index {index} out of range (length {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// A cursor was moved before its first entry
    #[error("cannot move a cursor before the first entry")]
    BeforeStart,

    /// k must be at least 1
    #[error("invalid number of neighbors k={0} (must be >= 1)")]
    InvalidK(usize),

    /// An object does not have the dimensionality of the first object
    #[error("differing dimensionality at line {line}: expected {expected}, got {actual}")]
    DimensionMismatch {
        line: usize,
        expected: usize,
        actual: usize,
    },

    /// An attribute is NaN or infinite
    #[error("non-finite attribute {value} at line {line}")]
    InvalidAttribute { line: usize, value: f64 },

    /// The distance computed for an object is NaN or infinite
    #[error("non-finite distance {distance} for object {id}")]
    NonFiniteDistance { id: DbId, distance: Distance },

    /// The query vector does not have the dimensionality of the dataset
    #[error("query of dimension {actual}, expected {expected}")]
    QueryDimension { expected: usize, actual: usize },

    /// Distance function name not in the registry
    #[error("unknown distance function {0}")]
    UnknownDistance(String),

    /// Invalid configuration
    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, KnnError>;
