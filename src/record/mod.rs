//! Record Module
//!
//! A single fixed-layout entry of the store.
//!
//! ## Responsibilities
//! - Carry the slot identifier, fixed at construction
//! - Track occupancy (caller data vs. free slot)
//! - Hold the two bounded text fields
//!
//! Text is kept as owned `String`s in memory; the fixed-capacity byte blocks
//! only exist in the on-disk image (see `image::codec`). Every stored string is
//! already bounded to `field_capacity - 1` bytes by [`text::bound`].

pub mod text;

/// One slot's worth of data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Slot position, never changes once the store assigns it
    id: usize,

    /// Whether the slot holds caller data
    occupied: bool,

    name: String,
    email: String,
}

impl Record {
    /// A free slot at position `id`
    pub fn empty(id: usize) -> Self {
        Self {
            id,
            occupied: false,
            name: String::new(),
            email: String::new(),
        }
    }

    /// An occupied slot; text must already be bounded
    pub(crate) fn filled(id: usize, name: String, email: String) -> Self {
        Self {
            id,
            occupied: true,
            name,
            email,
        }
    }

    /// Slot identifier
    pub fn id(&self) -> usize {
        self.id
    }

    /// True if the slot holds caller data
    pub fn is_occupied(&self) -> bool {
        self.occupied
    }

    /// Name field. Empty for a free slot.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Email field. Empty for a free slot.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Store caller data and mark the slot occupied
    pub(crate) fn fill(&mut self, name: String, email: String) {
        self.name = name;
        self.email = email;
        self.occupied = true;
    }

    /// Reset to a free slot, keeping the identifier
    pub(crate) fn clear(&mut self) {
        *self = Self::empty(self.id);
    }
}
