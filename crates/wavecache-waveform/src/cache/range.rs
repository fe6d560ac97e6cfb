//! Borrowed views over lookup results

use std::iter::{Enumerate, FusedIterator};
use std::slice;

use super::{CacheKey, CacheSlot};

/// Consecutive elements returned by a range lookup, left to right
///
/// Borrows the cache, so it cannot outlive the next mutating call. The
/// first element may start before the requested range and the last one may
/// end after it; the trims say by how many pixel columns.
#[derive(Debug)]
pub struct LookupRange<'a, E> {
    table: &'a [CacheSlot<E>],
    indices: &'a [usize],
    left_trim: usize,
    right_trim: usize,
}

impl<'a, E> LookupRange<'a, E> {
    /// `indices` point into `table`, one per element in timeline order
    pub(crate) fn new(table: &'a [CacheSlot<E>], indices: &'a [usize], left_trim: usize, right_trim: usize) -> Self {
        Self {
            table,
            indices,
            left_trim,
            right_trim,
        }
    }

    pub(crate) fn empty() -> Self {
        Self::new(&[], &[], 0, 0)
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Columns to skip at the start of the first element
    pub fn left_trim(&self) -> usize {
        self.left_trim
    }

    /// Columns to skip at the end of the last element
    pub fn right_trim(&self) -> usize {
        self.right_trim
    }

    pub fn iter(&self) -> LookupIter<'a, E> {
        LookupIter {
            table: self.table,
            inner: self.indices.iter().enumerate(),
            count: self.indices.len(),
            left_trim: self.left_trim,
            right_trim: self.right_trim,
        }
    }
}

impl<'a, E> IntoIterator for LookupRange<'a, E> {
    type Item = LookupItem<'a, E>;
    type IntoIter = LookupIter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, E> IntoIterator for &LookupRange<'a, E> {
    type Item = LookupItem<'a, E>;
    type IntoIter = LookupIter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// One element of a [`LookupRange`]
#[derive(Debug)]
pub struct LookupItem<'a, E> {
    pub key: CacheKey,
    pub element: &'a E,
    /// Columns hidden at the left edge (non-zero only for the first item)
    pub left_offset: usize,
    /// Columns hidden at the right edge (non-zero only for the last item)
    pub right_offset: usize,
}

pub struct LookupIter<'a, E> {
    table: &'a [CacheSlot<E>],
    inner: Enumerate<slice::Iter<'a, usize>>,
    count: usize,
    left_trim: usize,
    right_trim: usize,
}

impl<'a, E> Iterator for LookupIter<'a, E> {
    type Item = LookupItem<'a, E>;

    fn next(&mut self) -> Option<Self::Item> {
        let (index, &slot_index) = self.inner.next()?;
        let slot = self.table.get(slot_index)?;

        Some(LookupItem {
            key: slot.key,
            element: slot.element(),
            left_offset: if index == 0 { self.left_trim } else { 0 },
            right_offset: if index + 1 == self.count {
                self.right_trim
            } else {
                0
            },
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<E> ExactSizeIterator for LookupIter<'_, E> {}

impl<E> FusedIterator for LookupIter<'_, E> {}
