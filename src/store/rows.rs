//! Occupied-row iterator
//!
//! Lazy walk over the store's slots, yielding only occupied records.

use std::iter::FusedIterator;
use std::slice;

use crate::record::Record;

/// Iterator over occupied records in ascending slot order.
///
/// Cloning restarts nothing; it forks the walk at the current position.
/// Call `Store::rows()` again to start from slot 0.
#[derive(Debug, Clone)]
pub struct Rows<'a> {
    slots: slice::Iter<'a, Record>,
}

impl<'a> Rows<'a> {
    pub(super) fn new(slots: &'a [Record]) -> Self {
        Self {
            slots: slots.iter(),
        }
    }
}

impl<'a> Iterator for Rows<'a> {
    type Item = &'a Record;

    fn next(&mut self) -> Option<Self::Item> {
        self.slots.find(|record| record.is_occupied())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.slots.len()))
    }
}

impl FusedIterator for Rows<'_> {}
