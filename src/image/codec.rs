//! Image codec
//!
//! Field-by-field encode/decode of the whole-store image. The in-memory
//! `Store` never doubles as the on-disk layout.

use std::borrow::Cow;

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::config::{Config, ImageFormat};
use crate::error::{Result, SlotError};
use crate::record::text::truncate_to;
use crate::record::Record;
use crate::store::Store;

use super::{body_len, image_len, record_len, ImageHeader, FOOTER_SIZE, HEADER_SIZE, MAGIC, VERSION};

// =============================================================================
// Encoding
// =============================================================================

/// Encode the whole store in the configured format
pub fn encode(store: &Store, config: &Config) -> Result<Bytes> {
    if store.len() != config.max_rows {
        return Err(SlotError::Serialization(format!(
            "store has {} slots, config expects {}",
            store.len(),
            config.max_rows
        )));
    }

    let mut buf = BytesMut::with_capacity(image_len(config));

    match config.format {
        ImageFormat::Raw => encode_body(store, config.field_capacity, &mut buf),
        ImageFormat::Framed => {
            let header = bincode::serialize(&ImageHeader::for_config(config))
                .map_err(|e| SlotError::Serialization(format!("image header: {}", e)))?;
            debug_assert_eq!(header.len(), HEADER_SIZE);
            buf.put_slice(&header);

            encode_body(store, config.field_capacity, &mut buf);

            let crc = crc32fast::hash(&buf[HEADER_SIZE..]);
            buf.put_u32_le(crc);
        }
    }

    debug_assert_eq!(buf.len(), image_len(config));
    Ok(buf.freeze())
}

/// Write every slot: [id][occupied][name block][email block]
fn encode_body(store: &Store, capacity: usize, buf: &mut BytesMut) {
    for record in store.slots() {
        buf.put_i32_le(record.id() as i32);
        buf.put_i32_le(i32::from(record.is_occupied()));
        put_text(buf, record.name(), capacity);
        put_text(buf, record.email(), capacity);
    }
}

/// Text, then zeros up to `capacity`. At least one zero is always written.
fn put_text(buf: &mut BytesMut, text: &str, capacity: usize) {
    let text = truncate_to(text, capacity - 1);
    buf.put_slice(text.as_bytes());
    buf.put_bytes(0, capacity - text.len());
}

// =============================================================================
// Decoding
// =============================================================================

/// Decode a whole image.
///
/// `bytes` must be exactly one image: anything shorter or longer, any header
/// or checksum mismatch, and any malformed record is a `SlotError::Corruption`.
pub fn decode(bytes: &[u8], config: &Config) -> Result<Store> {
    let expected = image_len(config);
    if bytes.is_empty() {
        return Err(SlotError::Corruption(format!(
            "file is empty, expected {} bytes",
            expected
        )));
    }

    match config.format {
        ImageFormat::Raw => {
            check_len(bytes.len(), expected)?;
            decode_body(bytes, config)
        }
        ImageFormat::Framed => {
            if bytes.len() < HEADER_SIZE {
                return Err(SlotError::Corruption(format!(
                    "incomplete header: expected {} bytes, got {}",
                    HEADER_SIZE,
                    bytes.len()
                )));
            }
            check_header(&bytes[..HEADER_SIZE], config)?;
            check_len(bytes.len(), expected)?;

            let body_end = HEADER_SIZE + body_len(config);
            let body = &bytes[HEADER_SIZE..body_end];
            let mut footer = &bytes[body_end..body_end + FOOTER_SIZE];

            let stored_crc = footer.get_u32_le();
            let actual_crc = crc32fast::hash(body);
            if stored_crc != actual_crc {
                return Err(SlotError::Corruption(format!(
                    "checksum mismatch: stored {:08x}, computed {:08x}",
                    stored_crc, actual_crc
                )));
            }

            decode_body(body, config)
        }
    }
}

fn check_len(actual: usize, expected: usize) -> Result<()> {
    if actual != expected {
        return Err(SlotError::Corruption(format!(
            "expected {} bytes, found {}",
            expected, actual
        )));
    }
    Ok(())
}

fn check_header(bytes: &[u8], config: &Config) -> Result<()> {
    let header: ImageHeader = bincode::deserialize(bytes)
        .map_err(|e| SlotError::Corruption(format!("unreadable header: {}", e)))?;

    if header.magic != MAGIC {
        return Err(SlotError::Corruption(format!(
            "invalid magic: expected {:?}, got {:?}",
            MAGIC, header.magic
        )));
    }
    if header.version != VERSION {
        return Err(SlotError::Corruption(format!(
            "unsupported image version: {}",
            header.version
        )));
    }

    let expected = ImageHeader::for_config(config);
    if header.max_rows != expected.max_rows || header.field_capacity != expected.field_capacity {
        return Err(SlotError::Corruption(format!(
            "image holds {} rows of {}-byte fields, configured for {} rows of {}-byte fields",
            header.max_rows, header.field_capacity, expected.max_rows, expected.field_capacity
        )));
    }

    Ok(())
}

fn decode_body(body: &[u8], config: &Config) -> Result<Store> {
    let capacity = config.field_capacity;

    let mut rows = Vec::new();
    rows.try_reserve_exact(config.max_rows).map_err(|e| {
        SlotError::Allocation(format!("cannot reserve {} slots: {}", config.max_rows, e))
    })?;

    for (slot, mut chunk) in body.chunks_exact(record_len(config)).enumerate() {
        let id = chunk.get_i32_le();
        let flag = chunk.get_i32_le();

        if usize::try_from(id).ok() != Some(slot) {
            return Err(SlotError::Corruption(format!(
                "slot {} holds identifier {}",
                slot, id
            )));
        }

        let record = match flag {
            0 => Record::empty(slot),
            1 => {
                let name = get_text("name", slot, &chunk[..capacity]);
                let email = get_text("email", slot, &chunk[capacity..2 * capacity]);
                Record::filled(slot, name, email)
            }
            other => {
                return Err(SlotError::Corruption(format!(
                    "slot {} has occupancy flag {}",
                    slot, other
                )))
            }
        };

        rows.push(record);
    }

    Ok(Store::from_rows(rows))
}

/// Text up to the first NUL.
///
/// Blocks are raw bytes on disk, so a block that is not UTF-8 (e.g. Latin-1
/// written by the reference) still loads: invalid bytes become U+FFFD and a
/// `warn!` names the slot. A block without a terminator (written by the
/// reference's unterminated copy) drops a trailing partial character. Either
/// way the result is bounded to `capacity - 1` bytes like any other stored text.
fn get_text(field: &'static str, slot: usize, block: &[u8]) -> String {
    let terminator = block.iter().position(|&b| b == 0);
    let bytes = match terminator {
        Some(end) => &block[..end],
        None => match std::str::from_utf8(block) {
            // Cut mid-character at the end of the block
            Err(e) if e.error_len().is_none() => &block[..e.valid_up_to()],
            _ => block,
        },
    };

    let text = String::from_utf8_lossy(bytes);
    if let Cow::Owned(_) = text {
        tracing::warn!(slot, field, "text block is not valid UTF-8, invalid bytes replaced on load");
    }

    let kept = truncate_to(&text, block.len() - 1);
    if terminator.is_none() || kept.len() < text.len() {
        tracing::warn!(
            slot,
            field,
            kept = kept.len(),
            "text block does not fit with a terminator, truncated on load"
        );
    }
    kept.to_string()
}
