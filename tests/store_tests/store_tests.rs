//! Tests for Store
//!
//! These tests verify:
//! - Fresh stores are fully free with identifiers equal to slot positions
//! - Slot addressing and bounds
//! - The occupied-row iterator

use slotdb::Store;

#[test]
fn test_new_store_all_free() {
    let store = Store::new(100).unwrap();

    assert_eq!(store.len(), 100);
    assert!(!store.is_empty());
    assert_eq!(store.occupied_count(), 0);

    for (i, record) in store.slots().enumerate() {
        assert_eq!(record.id(), i);
        assert!(!record.is_occupied());
    }
}

#[test]
fn test_slot_bounds() {
    let store = Store::new(10).unwrap();

    assert_eq!(store.slot(0).unwrap().id(), 0);
    assert_eq!(store.slot(9).unwrap().id(), 9);
    assert!(store.slot(10).is_none());
    assert!(store.slot(usize::MAX).is_none());
}

#[test]
fn test_rows_empty_store() {
    let store = Store::new(5).unwrap();
    assert_eq!(store.rows().count(), 0);
}

#[test]
fn test_initialize_keeps_capacity() {
    let mut store = Store::new(3).unwrap();
    store.initialize();
    store.initialize();

    assert_eq!(store.len(), 3);
    assert_eq!(store.slot(2).unwrap().id(), 2);
}

#[test]
fn test_huge_store_is_allocation_error() {
    let result = Store::new(usize::MAX);
    assert!(matches!(result, Err(slotdb::SlotError::Allocation(_))));
}
