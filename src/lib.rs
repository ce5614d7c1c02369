//! # Reverse-chronological row keys
//!
//! Composite row keys for ordered key-value stores, laid out so that a plain
//! ascending scan returns one partition's records newest first.
//!
//! ## Core idea
//! Ordered stores only scan forward over `[start, stop)`. Store
//! `max - timestamp` instead of the timestamp, at a fixed width, and the
//! ascending scan runs backwards in time. [`KeyCodec`] does the encoding and
//! [`KeyCodec::build_range`] turns an inclusive time interval into the scan
//! bounds, taking care of the flipped endpoints and the exclusive stop.
//!
//! [`Table`] is an in-memory ordered table with the same scan contract, used
//! to exercise keys and bounds end to end.

pub mod calendar;
pub mod codec;
pub mod error;
pub mod iterator;
pub mod memtable;
pub mod range;
pub mod table;
pub mod types;

// Public re-exports for the top-level API
pub use codec::{CodecOptions, Framing, KeyCodec, Rendering};
pub use error::{Error, Result};
pub use range::ScanBounds;
pub use table::{CompareOp, Filter, Row, Scan, Table};
pub use types::{DecodedKey, EncodedKey, Resolution, Timestamp};
