//! k nearest neighbors collection
//!
//! - [`KnnHeap`]: bounded collector, fed during a scan
//! - [`KnnList`]: the finalized, read-only result
//! - [`KnnListIter`]: positional cursor over either of them

mod cursor;
mod heap;
mod list;
mod pair;

pub use cursor::KnnListIter;
pub use heap::KnnHeap;
pub use list::KnnList;
pub use pair::DistancePair;
