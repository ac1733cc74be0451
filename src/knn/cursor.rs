//! Positional cursor over the entries of a collector or a finalized list

use crate::base::{DbId, Distance};
use crate::error::{KnnError, Result};

use super::DistancePair;

/// A cursor that can move forward and backward over kNN entries.
///
/// The cursor borrows the entries, so the collector it was created from
/// cannot be modified while the cursor is alive.
#[derive(Clone)]
pub struct KnnListIter<'a> {
    entries: &'a [DistancePair],
    pos: usize,
}

impl<'a> KnnListIter<'a> {
    pub(crate) fn new(entries: &'a [DistancePair]) -> Self {
        Self { entries, pos: 0 }
    }

    /// True while the cursor points to an entry
    #[inline]
    pub fn valid(&self) -> bool {
        self.pos < self.entries.len()
    }

    /// Moves to the next entry (stays past the end once reached)
    #[inline]
    pub fn advance(&mut self) {
        if self.pos < self.entries.len() {
            self.pos += 1;
        }
    }

    /// Moves `count` entries forward
    pub fn advance_by(&mut self, count: usize) -> Result<()> {
        self.seek(self.pos.saturating_add(count))
    }

    /// Moves to the previous entry
    pub fn retract(&mut self) -> Result<()> {
        if self.pos == 0 {
            return Err(KnnError::BeforeStart);
        }
        self.pos -= 1;
        Ok(())
    }

    /// Moves to an absolute position in `[0, len]`
    pub fn seek(&mut self, offset: usize) -> Result<()> {
        if offset > self.entries.len() {
            return Err(KnnError::IndexOutOfRange {
                index: offset,
                len: self.entries.len(),
            });
        }
        self.pos = offset;
        Ok(())
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// Returns the entry under the cursor
    pub fn current(&self) -> Result<&'a DistancePair> {
        self.entries.get(self.pos).ok_or(KnnError::Empty)
    }

    pub fn distance(&self) -> Result<Distance> {
        self.current().map(|p| p.distance())
    }

    pub fn id(&self) -> Result<DbId> {
        self.current().map(|p| p.id())
    }
}

impl<'a> Iterator for KnnListIter<'a> {
    type Item = &'a DistancePair;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.entries.get(self.pos)?;
        self.pos += 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.entries.len() - self.pos;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for KnnListIter<'_> {}
