//! Utility modules for wikidatum.

pub mod timestamp;

pub use timestamp::{format_timestamp, parse_timestamp, Timestamp, TimestampParseError};
