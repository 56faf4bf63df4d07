//! Operations Module
//!
//! The create/get/set/delete/list verbs, expressed against a `Connection`.
//!
//! Every verb acts on the in-memory store only. Making a change durable is a
//! separate `Connection::persist` call the caller controls.
//!
//! A failed verb leaves the store exactly as it was: all checks (range,
//! occupancy, text bounds) run before the first mutation.

mod command;

pub use command::{execute, Command, Output};

use crate::connection::Connection;
use crate::error::{Result, SlotError};
use crate::record::text;
use crate::record::Record;
use crate::store::Rows;

/// Turn a caller-supplied signed id into a slot index.
///
/// Rejects anything outside `0..max_rows` with `SlotError::InvalidId`.
pub fn validate_id(id: i64, max_rows: usize) -> Result<usize> {
    match usize::try_from(id) {
        Ok(slot) if slot < max_rows => Ok(slot),
        _ => Err(SlotError::InvalidId { id, max: max_rows }),
    }
}

fn invalid_id(id: usize, max_rows: usize) -> SlotError {
    SlotError::InvalidId {
        id: i64::try_from(id).unwrap_or(i64::MAX),
        max: max_rows,
    }
}

/// Reset every slot to free.
///
/// `open` in create mode already hands out an all-free store, so right after
/// such an open this changes nothing. On an edit-mode connection it wipes the
/// loaded data.
pub fn create(conn: &mut Connection) {
    tracing::debug!(path = %conn.path().display(), mode = ?conn.mode(), "initializing store");
    conn.store_mut().initialize();
}

/// The record in slot `id`.
///
/// A free slot and an id past the last slot are both `SlotError::NotFound`.
pub fn get(conn: &Connection, id: usize) -> Result<&Record> {
    conn.store()
        .slot(id)
        .filter(|record| record.is_occupied())
        .ok_or(SlotError::NotFound(id))
}

/// Fill the free slot `id` with `name` and `email`.
///
/// Text longer than a field can hold is handled per `Config::text_policy`.
pub fn set(conn: &mut Connection, id: usize, name: &str, email: &str) -> Result<()> {
    let capacity = conn.config().field_capacity;
    let policy = conn.config().text_policy;
    let max_rows = conn.config().max_rows;

    let slot = conn
        .store()
        .slot(id)
        .ok_or_else(|| invalid_id(id, max_rows))?;
    if slot.is_occupied() {
        return Err(SlotError::AlreadySet(id));
    }

    let name = text::bound("name", name, capacity, policy)?;
    let email = text::bound("email", email, capacity, policy)?;

    let slot = conn
        .store_mut()
        .slot_mut(id)
        .ok_or_else(|| invalid_id(id, max_rows))?;
    slot.fill(name, email);

    tracing::debug!(id, "slot set");
    Ok(())
}

/// Free slot `id`. Deleting a free slot is a no-op.
pub fn delete(conn: &mut Connection, id: usize) -> Result<()> {
    let max_rows = conn.config().max_rows;

    let slot = conn
        .store_mut()
        .slot_mut(id)
        .ok_or_else(|| invalid_id(id, max_rows))?;
    slot.clear();

    tracing::debug!(id, "slot deleted");
    Ok(())
}

/// Occupied records in ascending id order
pub fn list(conn: &Connection) -> Rows<'_> {
    conn.store().rows()
}
