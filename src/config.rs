//! Configuration for SlotDB
//!
//! Centralized configuration with defaults matching the reference sizing
//! (100 rows, 512-byte text fields).

use crate::error::{Result, SlotError};
use crate::image::{FOOTER_SIZE, HEADER_SIZE, RECORD_PREFIX_SIZE};

/// Main configuration for a SlotDB connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Sizing
    // -------------------------------------------------------------------------
    /// Number of slots in the store. Fixed for the store's lifetime.
    pub max_rows: usize,

    /// Byte capacity of each text block (`name`, `email`), terminator included.
    pub field_capacity: usize,

    // -------------------------------------------------------------------------
    // Persistence
    // -------------------------------------------------------------------------
    /// On-disk layout of the whole-store image
    pub format: ImageFormat,

    /// fsync the backing file after every persist
    pub sync_on_persist: bool,

    // -------------------------------------------------------------------------
    // Input Handling
    // -------------------------------------------------------------------------
    /// What `set` does with text longer than a field can hold
    pub text_policy: TextPolicy,
}

/// Layout of the whole-store image on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageFormat {
    /// Header (magic, version, sizing) + records + CRC32 footer
    #[default]
    Framed,

    /// Records only, bit-compatible with the headerless reference layout
    Raw,
}

/// Handling of text that exceeds a field's capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextPolicy {
    /// Cut at the last UTF-8 boundary that still leaves room for the terminator
    #[default]
    Truncate,

    /// Fail the write with `SlotError::FieldTooLong`
    Reject,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_rows: 100,
            field_capacity: 512,
            format: ImageFormat::Framed,
            sync_on_persist: true,
            text_policy: TextPolicy::Truncate,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check the sizing before any file is touched.
    ///
    /// Identifiers are stored as `i32` on disk, so the row count must fit one.
    /// A text block needs at least one byte of content plus the terminator.
    /// The whole image, plus the one byte `load` reads past it, must be
    /// addressable.
    pub fn validate(&self) -> Result<()> {
        if self.max_rows == 0 {
            return Err(SlotError::Config("max_rows must be at least 1".to_string()));
        }
        if self.max_rows > i32::MAX as usize {
            return Err(SlotError::Config(format!(
                "max_rows {} does not fit a 32-bit identifier",
                self.max_rows
            )));
        }
        if self.field_capacity < 2 {
            return Err(SlotError::Config(format!(
                "field_capacity {} leaves no room for text and terminator",
                self.field_capacity
            )));
        }
        if self.field_capacity > u32::MAX as usize {
            return Err(SlotError::Config(format!(
                "field_capacity {} does not fit the image header",
                self.field_capacity
            )));
        }

        let image_len = self
            .field_capacity
            .checked_mul(2)
            .and_then(|blocks| blocks.checked_add(RECORD_PREFIX_SIZE))
            .and_then(|record| record.checked_mul(self.max_rows))
            .and_then(|body| body.checked_add(HEADER_SIZE + FOOTER_SIZE + 1));
        if image_len.is_none() {
            return Err(SlotError::Config(format!(
                "{} rows of {}-byte fields overflow the image size",
                self.max_rows, self.field_capacity
            )));
        }

        Ok(())
    }

    /// Longest text, in bytes, a field keeps
    pub fn max_text_len(&self) -> usize {
        self.field_capacity.saturating_sub(1)
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the number of slots
    pub fn max_rows(mut self, rows: usize) -> Self {
        self.config.max_rows = rows;
        self
    }

    /// Set the byte capacity of each text field
    pub fn field_capacity(mut self, bytes: usize) -> Self {
        self.config.field_capacity = bytes;
        self
    }

    /// Set the image format
    pub fn format(mut self, format: ImageFormat) -> Self {
        self.config.format = format;
        self
    }

    /// Enable or disable fsync on persist
    pub fn sync_on_persist(mut self, sync: bool) -> Self {
        self.config.sync_on_persist = sync;
        self
    }

    /// Set the oversized-text policy
    pub fn text_policy(mut self, policy: TextPolicy) -> Self {
        self.config.text_policy = policy;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
