//! Error types for SlotDB
//!
//! Provides a unified error type for all operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using SlotError
pub type Result<T> = std::result::Result<T, SlotError>;

/// Unified error type for SlotDB operations
#[derive(Debug, Error)]
pub enum SlotError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to open the file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write database: {0}")]
    Write(#[source] std::io::Error),

    #[error("Cannot flush database: {0}")]
    Flush(#[source] std::io::Error),

    // -------------------------------------------------------------------------
    // Image Errors
    // -------------------------------------------------------------------------
    #[error("Failed to load database: {0}")]
    Corruption(String),

    #[error("Memory error: {0}")]
    Allocation(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    // -------------------------------------------------------------------------
    // Operation Errors
    // -------------------------------------------------------------------------
    #[error("There's not that many records: id {id} is outside 0..{max}")]
    InvalidId { id: i64, max: usize },

    #[error("ID {0} is not set")]
    NotFound(usize),

    #[error("ID {0} is already set, delete it first")]
    AlreadySet(usize),

    #[error("{field} is {len} bytes, at most {max} fit")]
    FieldTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}
