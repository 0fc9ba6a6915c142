//! wikidatum: typed object model for Wikidata entities.
//!
//! This crate turns Wikibase REST API JSON into strongly-typed items,
//! statements, qualifiers, references and data values, and serializes them
//! back to a normalized "hash form".
//!
//! # Overview
//!
//! - **Closed value set**: every data value is one [`DataValue`] variant,
//!   chosen by the property's [`DataType`]
//! - **Fail-fast parsing**: malformed input is rejected with a categorized
//!   [`ParseError`], never coerced
//! - **Immutable values**: statements change by building new ones
//!
//! # Quick Start
//!
//! ```rust
//! use wikidatum::codec::{decode_statement, decode_statement_hash};
//! use wikidatum::{DataType, DataValueKind, Rank};
//! use serde_json::json;
//!
//! let statement = decode_statement(&json!({
//!     "id": "Q42$F078E5B3-F9A8-480E-B7AC-D97778CBBEF9",
//!     "property": { "id": "P31", "data-type": "wikibase-item" },
//!     "value": { "type": "value", "content": "Q5" }
//! }))
//! .unwrap();
//!
//! assert_eq!(statement.data_type(), DataType::WikibaseItem);
//! assert_eq!(statement.data_value().kind(), DataValueKind::WikibaseEntityId);
//! assert_eq!(statement.rank(), Rank::Normal);
//!
//! // Hash form round-trips
//! let hash = statement.to_hash().unwrap();
//! assert_eq!(decode_statement_hash(&hash).unwrap(), statement);
//! ```
//!
//! # Modules
//!
//! - [`model`]: Core data types (ids, data values, statements, items)
//! - [`codec`]: REST API decoding and hash-form encoding
//! - [`validate`]: Invariant checks for directly-built values
//! - [`client`]: Caller-side request configuration
//! - [`error`]: Error types
//! - [`util`]: Wikibase timestamp parsing
//!
//! # Logging
//!
//! Decoders emit `tracing` events (`trace` per statement, `debug` per item).
//! Install a subscriber in the host application to see them.

pub mod client;
pub mod codec;
pub mod error;
pub mod model;
pub mod util;
pub mod validate;

// Re-export commonly used types at crate root
pub use client::Client;
pub use codec::{
    decode_data_value, decode_item, decode_statement, decode_statement_hash, encode_statement,
};
pub use error::{EncodeError, ErrorKind, ParseError, ValidationError};
pub use model::term::codes;
pub use model::{
    Code, DataType, DataValue, DataValueKind, EntityId, EntityType, GlobeCoordinate, Item,
    ItemAccess, MonolingualText, PropertyId, Qualifier, Quantity, Rank, Reference, Sitelink,
    Statement, StatementBuilder, StatementId, Term, Time, TimePrecision,
};
pub use util::Timestamp;
pub use validate::{validate_statement, validate_statement_with, validate_value, SchemaContext};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
