//! # SlotDB
//!
//! A single-file, fixed-capacity record store:
//! - A bounded number of fixed-size records, addressed by slot index
//! - Create, get, set (fill a free slot), delete and list
//! - Whole-file binary snapshots, optionally framed with a header and CRC32
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 External caller (CLI, service)               │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                      Operations (ops)                        │
//! │            create / get / set / delete / list               │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                       Connection                             │
//! │              open / load / persist / close                  │
//! └──────────┬──────────────────────────────────┬───────────────┘
//!            │                                  │
//!            ▼                                  ▼
//!   ┌─────────────────┐                ┌─────────────────┐
//!   │      Store      │                │      Image      │
//!   │ (Vec<Record>)   │ ◄── decode ──  │  (backing file) │
//!   │                 │  ── encode ──► │                 │
//!   └─────────────────┘                └─────────────────┘
//! ```
//!
//! ## Quick Start
//! ```no_run
//! use slotdb::{ops, Config, Connection, OpenMode};
//!
//! let mut conn = Connection::open("people.db", OpenMode::Create, Config::default()).unwrap();
//! ops::set(&mut conn, 3, "Joe Alex", "joe@example.com").unwrap();
//! conn.persist().unwrap();
//! conn.close();
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod record;
pub mod store;
pub mod image;
pub mod connection;
pub mod ops;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{SlotError, Result};
pub use config::{Config, ImageFormat, TextPolicy};
pub use connection::{Connection, OpenMode};
pub use record::Record;
pub use store::Store;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of SlotDB
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
