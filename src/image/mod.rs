//! Image Module
//!
//! The whole-store binary image used by both load and persist. There is no
//! incremental format: every persist rewrites the full image.
//!
//! ## Record Layout (both formats)
//! ```text
//! ┌──────────┬──────────────┬──────────────────┬──────────────────┐
//! │ Id (i32) │ Occupied(i32)│ Name (capacity)  │ Email (capacity) │
//! └──────────┴──────────────┴──────────────────┴──────────────────┘
//! ```
//! All integers little-endian. Text blocks are NUL-terminated and zero-padded.
//! With the default sizing a record is 4 + 4 + 512 + 512 = 1032 bytes.
//!
//! ## Raw Format
//! `max_rows` records back to back. No header, no checksum. Readable by the
//! headerless reference layout.
//!
//! ## Framed Format
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │ Header (14 bytes)                                              │
//! │   Magic: "SLDB" (4) | Version: u16 (2) | Rows: u32 (4)         │
//! │   FieldCapacity: u32 (4)                                       │
//! ├────────────────────────────────────────────────────────────────┤
//! │ Records (max_rows * record_len)                                │
//! ├────────────────────────────────────────────────────────────────┤
//! │ Footer (4 bytes)                                               │
//! │   BodyCRC: u32                                                 │
//! └────────────────────────────────────────────────────────────────┘
//! ```

pub mod codec;

use serde::{Deserialize, Serialize};

use crate::config::{Config, ImageFormat};

pub use codec::{decode, encode};

// =============================================================================
// Shared Constants
// =============================================================================

/// Magic bytes identifying a framed SlotDB image
pub const MAGIC: [u8; 4] = *b"SLDB";

/// Current framed image version
pub const VERSION: u16 = 1;

/// Header size: Magic (4) + Version (2) + Rows (4) + FieldCapacity (4) = 14 bytes
pub const HEADER_SIZE: usize = 14;

/// Footer size: BodyCRC (4)
pub const FOOTER_SIZE: usize = 4;

/// Id (4) + Occupied (4)
pub(crate) const RECORD_PREFIX_SIZE: usize = 8;

// =============================================================================
// Header
// =============================================================================

/// Framed image header, serialized with bincode's fixed-width encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageHeader {
    pub magic: [u8; 4],
    pub version: u16,
    pub max_rows: u32,
    pub field_capacity: u32,
}

impl ImageHeader {
    /// Header describing `config`'s sizing. Config must be validated.
    pub fn for_config(config: &Config) -> Self {
        Self {
            magic: MAGIC,
            version: VERSION,
            max_rows: config.max_rows as u32,
            field_capacity: config.field_capacity as u32,
        }
    }
}

// =============================================================================
// Sizing
// =============================================================================

/// Encoded size of one record
pub fn record_len(config: &Config) -> usize {
    RECORD_PREFIX_SIZE + 2 * config.field_capacity
}

/// Encoded size of all records
pub fn body_len(config: &Config) -> usize {
    config.max_rows * record_len(config)
}

/// Encoded size of a whole image in the configured format.
/// `Config::validate` guarantees this does not overflow.
pub fn image_len(config: &Config) -> usize {
    match config.format {
        ImageFormat::Raw => body_len(config),
        ImageFormat::Framed => HEADER_SIZE + body_len(config) + FOOTER_SIZE,
    }
}
