//! JSON decoding and hash-form encoding.
//!
//! Decoders read the Wikibase REST API representation. Encoders produce the
//! normalized hash form, which the `*_hash` decoders read back.

pub mod item;
pub mod primitives;
pub mod snak;
pub mod statement;
pub mod value;

pub use item::{decode_item, decode_item_from_str};
pub use primitives::{Layer, ObjectReader};
pub use snak::{
    decode_qualifier, decode_qualifier_hash, decode_qualifiers, decode_reference,
    decode_reference_hash, decode_references, encode_qualifier, encode_reference,
};
pub use statement::{
    decode_statement, decode_statement_from_str, decode_statement_hash, encode_statement,
};
pub use value::{decode_data_value, decode_data_value_hash, encode_data_value};
