//! Store Module
//!
//! Fixed-capacity ordered collection of records, addressed by slot index.
//!
//! ## Invariants
//! - Exactly `max_rows` slots for the whole lifetime of the store
//! - Slot `i` always holds a record whose identifier is `i`
//! - Free slots are still well-formed records (`occupied == false`)

mod rows;

pub use rows::Rows;

use crate::error::{Result, SlotError};
use crate::record::Record;

/// The whole database, held in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Store {
    rows: Vec<Record>,
}

impl Store {
    /// Allocate a store of `max_rows` free slots.
    ///
    /// Memory is reserved fallibly so an oversized configuration surfaces as
    /// `SlotError::Allocation` instead of aborting the process.
    pub fn new(max_rows: usize) -> Result<Self> {
        let mut rows = Vec::new();
        rows.try_reserve_exact(max_rows).map_err(|e| {
            SlotError::Allocation(format!("cannot reserve {} slots: {}", max_rows, e))
        })?;
        rows.extend((0..max_rows).map(Record::empty));

        Ok(Self { rows })
    }

    /// Build from decoded rows. Row `i` must carry identifier `i`.
    pub(crate) fn from_rows(rows: Vec<Record>) -> Self {
        debug_assert!(rows.iter().enumerate().all(|(i, r)| r.id() == i));
        Self { rows }
    }

    /// Reset every slot to `{ id: slot, occupied: false }`
    pub fn initialize(&mut self) {
        for (id, slot) in self.rows.iter_mut().enumerate() {
            *slot = Record::empty(id);
        }
    }

    /// Record at position `id`, or `None` past the last slot
    pub fn slot(&self, id: usize) -> Option<&Record> {
        self.rows.get(id)
    }

    pub(crate) fn slot_mut(&mut self, id: usize) -> Option<&mut Record> {
        self.rows.get_mut(id)
    }

    /// Number of slots (occupied or not). Never changes.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True only for a zero-slot store, which configuration forbids
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of occupied slots
    pub fn occupied_count(&self) -> usize {
        self.rows().count()
    }

    /// Occupied records in ascending slot order
    pub fn rows(&self) -> Rows<'_> {
        Rows::new(&self.rows)
    }

    /// Every slot, free ones included (for encoding)
    pub fn slots(&self) -> std::slice::Iter<'_, Record> {
        self.rows.iter()
    }
}
