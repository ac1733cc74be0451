//! Merging of kNN lists computed on disjoint partitions

use std::{
    cmp::{Ordering, Reverse},
    collections::BinaryHeap,
};

use crate::{
    base::Distance,
    error::Result,
    knn::{KnnHeap, KnnList},
};

/// Next unread entry of a list
struct ListHead {
    distance: Distance,
    list: usize,
    pos: usize,
}

impl PartialEq for ListHead {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ListHead {}

impl PartialOrd for ListHead {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Ties are broken by list, then by position
impl Ord for ListHead {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then(self.list.cmp(&other.list))
            .then(self.pos.cmp(&other.pos))
    }
}

/// Merges finalized lists into the k nearest neighbors overall
///
/// Entries with the same distance are ordered by list, then by their
/// position in the list.
pub fn merge_lists(lists: &[KnnList], k: usize) -> Result<KnnList> {
    let mut result = KnnHeap::new(k)?;
    let mut heads = BinaryHeap::with_capacity(lists.len());
    for (ix, list) in lists.iter().enumerate() {
        if let Some(first) = list.as_slice().first() {
            heads.push(Reverse(ListHead {
                distance: first.distance(),
                list: ix,
                pos: 0,
            }));
        }
    }

    let mut boundary = result.boundary_distance();
    while let Some(Reverse(head)) = heads.pop() {
        // Lists are sorted, nothing else can enter
        if head.distance > boundary {
            break;
        }

        let list = lists[head.list].as_slice();
        boundary = result.add_pair(list[head.pos])?;

        if let Some(next) = list.get(head.pos + 1) {
            heads.push(Reverse(ListHead {
                distance: next.distance(),
                list: head.list,
                pos: head.pos + 1,
            }));
        }
    }

    Ok(result.into_list())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(k: usize, pairs: &[(Distance, u32)]) -> KnnList {
        let mut heap = KnnHeap::new(k).unwrap();
        for &(d, id) in pairs {
            heap.add(d, id).unwrap();
        }
        heap.into_list()
    }

    #[test]
    fn test_merge() {
        let a = list(3, &[(0.1, 1), (0.4, 2), (0.5, 3)]);
        let b = list(3, &[(0.2, 10), (0.4, 11), (0.9, 12)]);
        let merged = merge_lists(&[a, b], 4).unwrap();
        assert_eq!(merged.ids(), vec![1, 10, 2, 11]);
        assert_eq!(merged.knn_distance(), 0.4);
    }

    #[test]
    fn test_merge_empty() {
        let merged = merge_lists(&[list(2, &[]), list(2, &[(1., 3)])], 2).unwrap();
        assert_eq!(merged.ids(), vec![3]);
        assert!(merge_lists(&[], 2).unwrap().is_empty());
    }
}
