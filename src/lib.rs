//! Bounded k nearest neighbors collection.
//!
//! A [`knn::KnnHeap`] is fed with `(distance, identifier)` candidates during
//! a scan and keeps the k closest ones; it is then finalized into a
//! read-only [`knn::KnnList`].
//!
//! ```
//! use knn_heap::knn::KnnHeap;
//!
//! let mut heap = KnnHeap::new(2).unwrap();
//! for (distance, id) in [(0.5, 1), (0.1, 2), (0.9, 3)] {
//!     heap.add(distance, id).unwrap();
//! }
//! let list = heap.finalize();
//! assert_eq!(list.ids(), vec![2, 1]);
//! ```

pub mod base;
pub mod data;
pub mod distance;
pub mod error;
pub mod knn;
pub mod options;
pub mod parser;
pub mod search;

#[cfg(feature = "python")]
mod py;

pub use error::{KnnError, Result};
