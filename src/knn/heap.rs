//! Bounded collector for the k nearest neighbors of a query.
//!
//! Entries are kept sorted by `(distance, arrival)`, so candidates with the
//! same distance stay in the order they were added. Candidates tying with
//! the k-th distance are retained beyond k until a strictly smaller
//! candidate pushes the k-th distance below them.

use std::{cmp::Ordering, sync::Arc};

use log::debug;

use crate::base::{DbId, Distance, DEFAULT_SLACK};
use crate::error::{KnnError, Result};

use super::{DistancePair, KnnList, KnnListIter};

#[derive(Debug)]
enum Phase {
    Accumulating,
    Finalized(KnnList),
}

/// Collects the k candidates with the smallest distance
#[derive(Debug)]
pub struct KnnHeap {
    k: usize,
    /// Sorted entries (only used while accumulating)
    entries: Vec<DistancePair>,
    /// Arrival number of each entry, parallel to `entries`
    arrivals: Vec<u64>,
    next_arrival: u64,
    phase: Phase,
}

impl KnnHeap {
    /// Creates a new collector for `k` neighbors
    pub fn new(k: usize) -> Result<Self> {
        Self::with_slack(k, DEFAULT_SLACK)
    }

    /// Creates a new collector whose initial storage holds `k + slack` entries
    pub fn with_slack(k: usize, slack: usize) -> Result<Self> {
        if k == 0 {
            return Err(KnnError::InvalidK(k));
        }
        let capacity = k.saturating_add(slack);
        Ok(Self {
            k,
            entries: Vec::with_capacity(capacity),
            arrivals: Vec::with_capacity(capacity),
            next_arrival: 0,
            phase: Phase::Accumulating,
        })
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// Adds a candidate, and returns the new boundary distance
    ///
    /// Once k candidates are held, candidates farther than the boundary
    /// are discarded without modifying the collector.
    pub fn add(&mut self, distance: Distance, id: DbId) -> Result<Distance> {
        self.add_pair(DistancePair::new(distance, id)?)
    }

    /// Same as [`KnnHeap::add`] with an already validated pair
    pub fn add_pair(&mut self, pair: DistancePair) -> Result<Distance> {
        self.check_accumulating("add on a finalized kNN heap")?;

        if self.entries.len() >= self.k {
            let boundary = self.entries[self.k - 1].distance();
            if pair.distance() > boundary {
                return Ok(boundary);
            }
        }

        self.insert(pair);
        Ok(self.boundary_distance())
    }

    fn insert(&mut self, pair: DistancePair) {
        if self.entries.len() == self.entries.capacity() {
            self.grow();
        }

        let arrival = self.next_arrival;
        self.next_arrival += 1;

        // Insertion sort from the end
        let mut pos = self.entries.len();
        while pos > 0 && self.compare_at(pos - 1, &pair, arrival) == Ordering::Greater {
            pos -= 1;
        }
        self.entries.insert(pos, pair);
        self.arrivals.insert(pos, arrival);

        // Truncate unless the entries after k tie with the k-th one
        let k = self.k;
        if self.entries.len() > k && self.entries[k].distance() > self.entries[k - 1].distance() {
            debug!(
                "Dropping {} candidates beyond distance {}",
                self.entries.len() - k,
                self.entries[k - 1].distance()
            );
            self.entries.truncate(k);
            self.arrivals.truncate(k);
        }
    }

    /// Compares the entry at `pos` with a new candidate
    #[inline]
    fn compare_at(&self, pos: usize, pair: &DistancePair, arrival: u64) -> Ordering {
        self.entries[pos]
            .distance()
            .total_cmp(&pair.distance())
            .then(self.arrivals[pos].cmp(&arrival))
    }

    /// Grows the storage by half its size
    fn grow(&mut self) {
        let capacity = self.entries.capacity();
        let additional = (capacity >> 1).max(1);
        self.entries.reserve_exact(additional);
        self.arrivals.reserve_exact(additional);
        debug!(
            "Growing kNN heap storage from {} to {} (k={})",
            capacity,
            self.entries.capacity(),
            self.k
        );
    }

    /// Distance a candidate must not exceed to enter the top-k
    ///
    /// Returns +inf as long as fewer than k candidates are held.
    pub fn boundary_distance(&self) -> Distance {
        let entries = self.entries();
        if entries.len() < self.k {
            Distance::INFINITY
        } else {
            entries[self.k - 1].distance()
        }
    }

    /// Removes and returns the farthest candidate
    pub fn poll(&mut self) -> Result<DistancePair> {
        self.check_accumulating("poll on a finalized kNN heap")?;
        let pair = self.entries.pop().ok_or(KnnError::Empty)?;
        self.arrivals.pop();
        Ok(pair)
    }

    /// Returns the farthest candidate
    pub fn peek(&self) -> Result<&DistancePair> {
        self.entries().last().ok_or(KnnError::Empty)
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Number of entries the storage can hold before growing
    pub fn capacity(&self) -> usize {
        match &self.phase {
            Phase::Accumulating => self.entries.capacity(),
            Phase::Finalized(list) => list.len(),
        }
    }

    pub fn contains(&self, id: DbId) -> bool {
        self.entries().iter().any(|p| p.id() == id)
    }

    pub fn get(&self, index: usize) -> Result<&DistancePair> {
        let entries = self.entries();
        entries.get(index).ok_or(KnnError::IndexOutOfRange {
            index,
            len: entries.len(),
        })
    }

    pub fn iter(&self) -> KnnListIter<'_> {
        KnnListIter::new(self.entries())
    }

    /// Removes all candidates (the storage is kept)
    pub fn clear(&mut self) -> Result<()> {
        self.check_accumulating("clear on a finalized kNN heap")?;
        self.entries.clear();
        self.arrivals.clear();
        self.next_arrival = 0;
        Ok(())
    }

    pub fn is_finalized(&self) -> bool {
        matches!(self.phase, Phase::Finalized(_))
    }

    /// Freezes the collector and returns the sorted list of neighbors
    ///
    /// The heap cannot be modified afterwards; calling this method again
    /// returns the same list.
    pub fn finalize(&mut self) -> KnnList {
        if let Phase::Finalized(list) = &self.phase {
            return list.clone();
        }

        let entries: Arc<[DistancePair]> = Arc::from(std::mem::take(&mut self.entries));
        self.arrivals = Vec::new();
        let list = KnnList::new(self.k, entries);
        debug!(
            "Finalized kNN heap with {} entries (k={})",
            list.len(),
            self.k
        );
        self.phase = Phase::Finalized(list.clone());
        list
    }

    /// Consumes the collector and returns the sorted list of neighbors
    pub fn into_list(self) -> KnnList {
        match self.phase {
            Phase::Finalized(list) => list,
            Phase::Accumulating => KnnList::new(self.k, Arc::from(self.entries)),
        }
    }

    fn entries(&self) -> &[DistancePair] {
        match &self.phase {
            Phase::Accumulating => &self.entries,
            Phase::Finalized(list) => list.as_slice(),
        }
    }

    #[inline]
    fn check_accumulating(&self, message: &'static str) -> Result<()> {
        match self.phase {
            Phase::Accumulating => Ok(()),
            Phase::Finalized(_) => Err(KnnError::InvalidState(message)),
        }
    }
}
