//! Tests for the image codec
//!
//! These tests verify:
//! - Image sizes for both formats
//! - Byte layout of the raw format
//! - Header, length and checksum validation on decode
//! - Handling of unterminated text blocks

use slotdb::image::{self, HEADER_SIZE, MAGIC};
use slotdb::{ops, Config, Connection, ImageFormat, OpenMode, SlotError, Store};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn raw_config() -> Config {
    Config::builder().format(ImageFormat::Raw).build()
}

fn small_config(format: ImageFormat) -> Config {
    Config::builder()
        .max_rows(4)
        .field_capacity(8)
        .format(format)
        .build()
}

/// Store with slot 3 set, built through a real connection
fn sample_store(config: &Config) -> (TempDir, Store) {
    let temp_dir = TempDir::new().unwrap();
    let mut conn =
        Connection::open(temp_dir.path().join("db"), OpenMode::Create, config.clone()).unwrap();
    ops::set(&mut conn, 3, "Joe Alex", "joe@example.com").unwrap();
    let store = conn.store().clone();
    conn.close();
    (temp_dir, store)
}

// =============================================================================
// Sizing
// =============================================================================

#[test]
fn test_reference_sizing() {
    let config = raw_config();

    assert_eq!(image::record_len(&config), 1032);
    assert_eq!(image::image_len(&config), 100 * (4 + 4 + 512 + 512));
}

#[test]
fn test_framed_adds_header_and_footer() {
    let config = Config::default();
    assert_eq!(image::image_len(&config), 14 + 103_200 + 4);
}

// =============================================================================
// Encoding
// =============================================================================

#[test]
fn test_raw_layout() {
    let config = raw_config();
    let (_temp, store) = sample_store(&config);

    let bytes = image::encode(&store, &config).unwrap();
    assert_eq!(bytes.len(), 103_200);

    // Slot 0: id 0, free, zeroed text
    assert_eq!(&bytes[0..4], &0i32.to_le_bytes());
    assert_eq!(&bytes[4..8], &0i32.to_le_bytes());
    assert!(bytes[8..1032].iter().all(|&b| b == 0));

    // Slot 3: id 3, occupied, name then email blocks
    let rec = &bytes[3 * 1032..4 * 1032];
    assert_eq!(&rec[0..4], &3i32.to_le_bytes());
    assert_eq!(&rec[4..8], &1i32.to_le_bytes());
    assert_eq!(&rec[8..16], b"Joe Alex");
    assert_eq!(rec[16], 0);
    assert_eq!(&rec[520..535], b"joe@example.com");
    assert_eq!(rec[535], 0);
}

#[test]
fn test_framed_header() {
    let config = Config::default();
    let (_temp, store) = sample_store(&config);

    let bytes = image::encode(&store, &config).unwrap();

    assert_eq!(&bytes[0..4], &MAGIC);
    assert_eq!(&bytes[4..6], &1u16.to_le_bytes());
    assert_eq!(&bytes[6..10], &100u32.to_le_bytes());
    assert_eq!(&bytes[10..14], &512u32.to_le_bytes());
}

#[test]
fn test_decode_restores_store() {
    for format in [ImageFormat::Raw, ImageFormat::Framed] {
        let config = Config::builder().format(format).build();
        let (_temp, store) = sample_store(&config);

        let bytes = image::encode(&store, &config).unwrap();
        let decoded = image::decode(&bytes, &config).unwrap();

        assert_eq!(decoded, store);
        let record = decoded.slot(3).unwrap();
        assert_eq!(record.name(), "Joe Alex");
        assert_eq!(record.email(), "joe@example.com");
    }
}

// =============================================================================
// Decoding Failures
// =============================================================================

#[test]
fn test_decode_empty_fails() {
    let result = image::decode(&[], &Config::default());
    assert!(matches!(result, Err(SlotError::Corruption(_))));
}

#[test]
fn test_decode_wrong_size_fails() {
    let config = raw_config();
    let (_temp, store) = sample_store(&config);
    let bytes = image::encode(&store, &config).unwrap();

    let short = image::decode(&bytes[..bytes.len() - 1], &config);
    assert!(matches!(short, Err(SlotError::Corruption(_))));

    let mut long = bytes.to_vec();
    long.push(0);
    let long = image::decode(&long, &config);
    assert!(matches!(long, Err(SlotError::Corruption(_))));
}

#[test]
fn test_decode_bad_magic_fails() {
    let config = Config::default();
    let (_temp, store) = sample_store(&config);
    let mut bytes = image::encode(&store, &config).unwrap().to_vec();
    bytes[0] = b'X';

    let result = image::decode(&bytes, &config);
    assert!(matches!(result, Err(SlotError::Corruption(_))));
}

#[test]
fn test_decode_sizing_mismatch_fails() {
    let written = small_config(ImageFormat::Framed);
    let (_temp, store) = sample_store(&written);
    let bytes = image::encode(&store, &written).unwrap();

    let reader = Config::builder()
        .max_rows(5)
        .field_capacity(8)
        .build();
    let result = image::decode(&bytes, &reader);

    match result {
        Err(SlotError::Corruption(msg)) => assert!(msg.contains("4 rows")),
        other => panic!("Expected Corruption, got {:?}", other),
    }
}

#[test]
fn test_decode_checksum_mismatch_fails() {
    let config = small_config(ImageFormat::Framed);
    let (_temp, store) = sample_store(&config);
    let mut bytes = image::encode(&store, &config).unwrap().to_vec();

    // Flip a byte inside the body
    bytes[HEADER_SIZE + 10] ^= 0xFF;

    match image::decode(&bytes, &config) {
        Err(SlotError::Corruption(msg)) => assert!(msg.contains("checksum")),
        other => panic!("Expected Corruption, got {:?}", other),
    }
}

#[test]
fn test_decode_wrong_identifier_fails() {
    let config = small_config(ImageFormat::Raw);
    let (_temp, store) = sample_store(&config);
    let mut bytes = image::encode(&store, &config).unwrap().to_vec();

    // Slot 1 claims id 7
    let rec_len = image::record_len(&config);
    bytes[rec_len..rec_len + 4].copy_from_slice(&7i32.to_le_bytes());

    let result = image::decode(&bytes, &config);
    assert!(matches!(result, Err(SlotError::Corruption(_))));
}

#[test]
fn test_decode_bad_occupancy_flag_fails() {
    let config = small_config(ImageFormat::Raw);
    let (_temp, store) = sample_store(&config);
    let mut bytes = image::encode(&store, &config).unwrap().to_vec();

    bytes[4..8].copy_from_slice(&2i32.to_le_bytes());

    let result = image::decode(&bytes, &config);
    assert!(matches!(result, Err(SlotError::Corruption(_))));
}

#[test]
fn test_decode_unterminated_text_is_truncated() {
    let config = small_config(ImageFormat::Raw);
    let (_temp, store) = sample_store(&config);
    let mut bytes = image::encode(&store, &config).unwrap().to_vec();

    // Slot 0: occupied, name block filled to capacity with no terminator
    bytes[4..8].copy_from_slice(&1i32.to_le_bytes());
    bytes[8..16].copy_from_slice(b"ABCDEFGH");

    let decoded = image::decode(&bytes, &config).unwrap();
    let record = decoded.slot(0).unwrap();

    assert!(record.is_occupied());
    assert_eq!(record.name(), "ABCDEFG");
    assert_eq!(record.email(), "");
}

#[test]
fn test_decode_non_utf8_text_is_replaced() {
    let config = small_config(ImageFormat::Raw);
    let (_temp, store) = sample_store(&config);
    let mut bytes = image::encode(&store, &config).unwrap().to_vec();

    // Slot 0: occupied, Latin-1 "José" in the name block
    bytes[4..8].copy_from_slice(&1i32.to_le_bytes());
    bytes[8..12].copy_from_slice(b"Jos\xe9");

    let decoded = image::decode(&bytes, &config).unwrap();

    assert_eq!(decoded.slot(0).unwrap().name(), "Jos\u{FFFD}");
    // The rest of the store is intact
    assert_eq!(decoded.slot(3).unwrap(), store.slot(3).unwrap());
}

#[test]
fn test_decode_replacement_stays_within_capacity() {
    let config = small_config(ImageFormat::Raw);
    let (_temp, store) = sample_store(&config);
    let mut bytes = image::encode(&store, &config).unwrap().to_vec();

    // Seven invalid bytes expand to 21 bytes of U+FFFD
    bytes[4..8].copy_from_slice(&1i32.to_le_bytes());
    bytes[8..15].copy_from_slice(&[0xFF; 7]);

    let decoded = image::decode(&bytes, &config).unwrap();
    let name = decoded.slot(0).unwrap().name();

    assert!(name.len() <= config.max_text_len());
    assert!(name.chars().all(|c| c == '\u{FFFD}'));
}
