//! Statement decoding and hash-form encoding.
//!
//! API shape (one entry of an item's `statements` map):
//!
//! ```text
//! { "id": "Q42$F078E5B3-F9A8-480E-B7AC-D97778CBBEF9",
//!   "rank": "normal",
//!   "property": { "id": "P31", "data-type": "wikibase-item" },
//!   "value": { "type": "value", "content": "Q5" },
//!   "qualifiers": [...],
//!   "references": [{ "hash": "...", "parts": [...] }] }
//! ```

use std::str::FromStr;

use serde_json::{json, Value};
use tracing::trace;

use crate::codec::primitives::{Layer, ObjectReader};
use crate::codec::snak::{
    decode_qualifier_hash, decode_qualifiers, decode_reference_hash, decode_references,
    decode_value_slot, encode_qualifier, encode_reference, read_data_type, read_property_id,
};
use crate::codec::value::{check_value_fits, decode_data_value_hash, encode_data_value};
use crate::error::{EncodeError, ParseError};
use crate::model::{Rank, Statement, StatementId};

/// Reads the optional `rank` field; absent means normal.
fn read_rank(reader: &ObjectReader<'_>) -> Result<Rank, ParseError> {
    let Some(value) = reader.get("rank") else {
        return Ok(Rank::Normal);
    };
    let invalid = || ParseError::InvalidRank {
        rank: value.to_string(),
    };
    let raw = value.as_str().ok_or_else(invalid)?;
    Rank::from_str(raw).map_err(|()| ParseError::InvalidRank {
        rank: raw.to_string(),
    })
}

/// Decodes a statement from the REST API representation.
///
/// Qualifiers and references are flattened into single ordered sequences;
/// an absent or null collection decodes as empty.
pub fn decode_statement(value: &Value) -> Result<Statement, ParseError> {
    let reader = ObjectReader::new(value, Layer::Statement, "statement")?;

    let id = StatementId::new(reader.required_str("id")?);
    let property = reader.required_object("property")?;
    let property_id = read_property_id(&property, "id")?;
    let data_type = read_data_type(&property, "data-type")?;

    let value = reader.required_object("value")?;
    let data_value = decode_value_slot(&value, data_type)?;

    let rank = read_rank(&reader)?;
    let qualifiers = decode_qualifiers(reader.optional_array("qualifiers")?)?;
    let references = decode_references(reader.optional_array("references")?)?;

    trace!(
        statement_id = id.as_str(),
        property = property_id.as_str(),
        data_type = data_type.as_str(),
        qualifiers = qualifiers.len(),
        references = references.len(),
        "decoded statement"
    );

    Ok(Statement::new(
        id,
        property_id,
        data_type,
        data_value,
        qualifiers,
        references,
        rank,
    ))
}

/// Decodes a statement from raw JSON text.
pub fn decode_statement_from_str(text: &str) -> Result<Statement, ParseError> {
    let value: Value = serde_json::from_str(text)?;
    decode_statement(&value)
}

// =============================================================================
// HASH FORM
// =============================================================================

/// Encodes a statement to its flat hash form.
///
/// ```text
/// { "id", "property_id", "data_type", "data_value",
///   "qualifiers": [...], "references": [...], "rank" }
/// ```
pub fn encode_statement(statement: &Statement) -> Result<Value, EncodeError> {
    let qualifiers = statement
        .qualifiers()
        .iter()
        .map(encode_qualifier)
        .collect::<Result<Vec<_>, _>>()?;
    let references = statement
        .references()
        .iter()
        .map(encode_reference)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(json!({
        "id": statement.id().as_str(),
        "property_id": statement.property_id().as_str(),
        "data_type": statement.data_type().as_str(),
        "data_value": encode_data_value(statement.data_value())?,
        "qualifiers": qualifiers,
        "references": references,
        "rank": statement.rank().as_str(),
    }))
}

/// Decodes a statement from the hash form produced by [`encode_statement`].
///
/// The value must fit the declared data type, as it does when decoded
/// from the API form.
pub fn decode_statement_hash(hash: &Value) -> Result<Statement, ParseError> {
    let reader = ObjectReader::new(hash, Layer::Statement, "statement")?;

    let id = StatementId::new(reader.required_str("id")?);
    let property_id = read_property_id(&reader, "property_id")?;
    let data_type = read_data_type(&reader, "data_type")?;
    let data_value = decode_data_value_hash(reader.required("data_value")?)?;
    check_value_fits(data_type, &data_value)?;
    let rank = read_rank(&reader)?;

    let qualifiers = reader
        .optional_array("qualifiers")?
        .iter()
        .enumerate()
        .map(|(i, q)| decode_qualifier_hash(q, i))
        .collect::<Result<Vec<_>, _>>()?;
    let references = reader
        .optional_array("references")?
        .iter()
        .enumerate()
        .map(|(i, r)| decode_reference_hash(r, i))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Statement::new(
        id,
        property_id,
        data_type,
        data_value,
        qualifiers,
        references,
        rank,
    ))
}
