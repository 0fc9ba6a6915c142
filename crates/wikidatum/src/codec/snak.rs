//! Qualifier and reference decoding/encoding.
//!
//! A snak is the REST API's property-value cell:
//!
//! ```text
//! { "property": { "id": "P248", "data-type": "wikibase-item" },
//!   "value": { "type": "value", "content": "Q5375741" } }
//! ```
//!
//! References group several snaks under `parts`; qualifiers may be grouped
//! the same way. Groups are flattened into one ordered sequence.

use serde_json::{json, Value};

use crate::codec::primitives::{Layer, ObjectReader};
use crate::codec::value::{
    decode_data_value, decode_data_value_hash, encode_data_value, NO_VALUE, SOME_VALUE,
};
use crate::error::{EncodeError, ParseError};
use crate::model::{DataType, DataValue, PropertyId, Qualifier, Reference};

/// Discriminator for a snak that carries content.
pub const HAS_VALUE: &str = "value";

/// Wraps a nested failure with the qualifier/reference it happened in.
fn wrap(layer: Layer, err: ParseError) -> ParseError {
    match layer {
        Layer::Qualifier(index) => ParseError::Qualifier {
            index,
            source: Box::new(err),
        },
        Layer::Reference(index) => ParseError::Reference {
            index,
            source: Box::new(err),
        },
        _ => err,
    }
}

/// Reads a property id field, reporting a malformed id on `layer`.
pub(crate) fn read_property_id(
    reader: &ObjectReader<'_>,
    field: &'static str,
) -> Result<PropertyId, ParseError> {
    let raw = reader.required_str(field)?;
    PropertyId::parse(raw).ok_or_else(|| {
        reader
            .layer()
            .invalid(field, format!("{:?} is not a property id", raw))
    })
}

/// Reads a known data type name.
pub(crate) fn read_data_type(
    reader: &ObjectReader<'_>,
    field: &'static str,
) -> Result<DataType, ParseError> {
    let raw = reader.required_str(field)?;
    DataType::from_name(raw).ok_or_else(|| ParseError::UnknownDataType {
        data_type: raw.to_string(),
    })
}

/// Decodes the `value` object of a statement or snak.
///
/// `type` selects the variant: `novalue` and `somevalue` need no content,
/// `value` hands `content` to the registry under `data_type`.
pub(crate) fn decode_value_slot(
    value: &ObjectReader<'_>,
    data_type: DataType,
) -> Result<DataValue, ParseError> {
    match value.required_str("type")? {
        NO_VALUE => decode_data_value(NO_VALUE, None),
        SOME_VALUE => decode_data_value(SOME_VALUE, None),
        HAS_VALUE => decode_data_value(data_type.as_str(), value.get("content")),
        other => Err(ParseError::UnknownValueType {
            value_type: other.to_string(),
        }),
    }
}

/// Decodes one snak into its property and value.
fn decode_snak(snak: &Value, layer: Layer) -> Result<(PropertyId, DataValue), ParseError> {
    let reader = ObjectReader::new(snak, layer, "snak")?;
    let property = reader.required_object("property")?;
    let property_id = read_property_id(&property, "id")?;
    let value = reader.required_object("value")?;

    let data_type = read_data_type(&property, "data-type").map_err(|e| wrap(layer, e))?;
    let data_value = decode_value_slot(&value, data_type).map_err(|e| wrap(layer, e))?;
    Ok((property_id, data_value))
}

/// Decodes an entry that is either a bare snak or a `parts` group of snaks.
fn decode_group<T>(
    entry: &Value,
    layer: Layer,
    make: fn(PropertyId, DataValue) -> T,
) -> Result<Vec<T>, ParseError> {
    let reader = ObjectReader::new(entry, layer, "entry")?;
    if reader.get("parts").is_none() {
        let (property_id, data_value) = decode_snak(entry, layer)?;
        return Ok(vec![make(property_id, data_value)]);
    }

    reader
        .optional_array("parts")?
        .iter()
        .map(|part| decode_snak(part, layer).map(|(p, v)| make(p, v)))
        .collect()
}

/// Decodes one qualifier entry, expanding groups.
pub fn decode_qualifier(entry: &Value, index: usize) -> Result<Vec<Qualifier>, ParseError> {
    decode_group(entry, Layer::Qualifier(index), Qualifier::new)
}

/// Decodes one reference entry, expanding its `parts`.
pub fn decode_reference(entry: &Value, index: usize) -> Result<Vec<Reference>, ParseError> {
    decode_group(entry, Layer::Reference(index), Reference::new)
}

/// Decodes a qualifier collection into one flat sequence.
pub fn decode_qualifiers(entries: &[Value]) -> Result<Vec<Qualifier>, ParseError> {
    let mut qualifiers = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        qualifiers.extend(decode_qualifier(entry, index)?);
    }
    Ok(qualifiers)
}

/// Decodes a reference collection into one flat sequence.
pub fn decode_references(entries: &[Value]) -> Result<Vec<Reference>, ParseError> {
    let mut references = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        references.extend(decode_reference(entry, index)?);
    }
    Ok(references)
}

// =============================================================================
// HASH FORM
// =============================================================================

fn encode_pair(property_id: &PropertyId, data_value: &DataValue) -> Result<Value, EncodeError> {
    Ok(json!({
        "property_id": property_id.as_str(),
        "data_value": encode_data_value(data_value)?,
    }))
}

/// Encodes a qualifier to `{ "property_id", "data_value" }`.
pub fn encode_qualifier(qualifier: &Qualifier) -> Result<Value, EncodeError> {
    encode_pair(&qualifier.property_id, &qualifier.data_value)
}

/// Encodes a reference to `{ "property_id", "data_value" }`.
pub fn encode_reference(reference: &Reference) -> Result<Value, EncodeError> {
    encode_pair(&reference.property_id, &reference.data_value)
}

fn decode_pair(hash: &Value, layer: Layer) -> Result<(PropertyId, DataValue), ParseError> {
    let reader = ObjectReader::new(hash, layer, "entry")?;
    let property_id = read_property_id(&reader, "property_id")?;
    let data_value =
        decode_data_value_hash(reader.required("data_value")?).map_err(|e| wrap(layer, e))?;
    Ok((property_id, data_value))
}

/// Decodes a qualifier from the hash form produced by [`encode_qualifier`].
pub fn decode_qualifier_hash(hash: &Value, index: usize) -> Result<Qualifier, ParseError> {
    let (property_id, data_value) = decode_pair(hash, Layer::Qualifier(index))?;
    Ok(Qualifier::new(property_id, data_value))
}

/// Decodes a reference from the hash form produced by [`encode_reference`].
pub fn decode_reference_hash(hash: &Value, index: usize) -> Result<Reference, ParseError> {
    let (property_id, data_value) = decode_pair(hash, Layer::Reference(index))?;
    Ok(Reference::new(property_id, data_value))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::ErrorKind;

    fn stated_in(item: &str) -> Value {
        json!({
            "property": { "id": "P248", "data-type": "wikibase-item" },
            "value": { "type": "value", "content": item }
        })
    }

    #[test]
    fn test_reference_parts_are_flattened() {
        let entry = json!({
            "hash": "fa278ebfc458360e5aed63d5058cca83c46134f1",
            "parts": [
                stated_in("Q5375741"),
                {
                    "property": { "id": "P813", "data-type": "time" },
                    "value": {
                        "type": "value",
                        "content": {
                            "time": "+2013-12-07T00:00:00Z",
                            "precision": 11,
                            "calendarmodel": "http://www.wikidata.org/entity/Q1985727"
                        }
                    }
                }
            ]
        });

        let second = json!({ "parts": [stated_in("Q36578")] });
        let references = decode_references(&[entry, second]).unwrap();
        assert_eq!(references.len(), 3);
        assert_eq!(references[0].property_id.as_str(), "P248");
        assert_eq!(references[1].property_id.as_str(), "P813");
        assert_eq!(
            references[2].data_value.as_entity_id().unwrap().as_str(),
            "Q36578"
        );
    }

    #[test]
    fn test_bare_snak_entry() {
        let qualifiers = decode_qualifiers(&[stated_in("Q1")]).unwrap();
        assert_eq!(qualifiers.len(), 1);
    }

    #[test]
    fn test_sentinel_snaks() {
        let entry = json!({
            "property": { "id": "P582", "data-type": "time" },
            "value": { "type": "somevalue" }
        });
        let qualifiers = decode_qualifier(&entry, 0).unwrap();
        assert_eq!(qualifiers[0].data_value, DataValue::SomeValue);

        let entry = json!({
            "property": { "id": "P582", "data-type": "time" },
            "value": { "type": "novalue" }
        });
        assert_eq!(decode_qualifier(&entry, 0).unwrap()[0].data_value, DataValue::NoValue);
    }

    #[test]
    fn test_missing_property_id() {
        let entry = json!({
            "property": { "data-type": "string" },
            "value": { "type": "value", "content": "x" }
        });
        assert_eq!(
            decode_qualifier(&entry, 3).unwrap_err(),
            ParseError::MissingQualifierField { index: 3, field: "id" }
        );
        assert_eq!(
            decode_reference(&entry, 1).unwrap_err().kind(),
            ErrorKind::MalformedReference
        );
    }

    #[test]
    fn test_invalid_property_id() {
        let entry = json!({
            "property": { "id": "Q5", "data-type": "string" },
            "value": { "type": "value", "content": "x" }
        });
        assert!(matches!(
            decode_reference(&entry, 0),
            Err(ParseError::InvalidReferenceField { index: 0, field: "id", .. })
        ));
    }

    #[test]
    fn test_bad_value_is_wrapped() {
        let entry = json!({
            "parts": [{
                "property": { "id": "P248", "data-type": "wikibase-item" },
                "value": { "type": "value", "content": 5375741 }
            }]
        });
        let err = decode_references(&[stated_in("Q1"), entry]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedReference);
        assert!(matches!(err, ParseError::Reference { index: 1, .. }));
        assert_eq!(err.root_cause().kind(), ErrorKind::MalformedDataValue);
    }

    #[test]
    fn test_unknown_value_type_is_wrapped() {
        let entry = json!({
            "property": { "id": "P580", "data-type": "time" },
            "value": { "type": "bogus" }
        });
        let err = decode_qualifier(&entry, 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedQualifier);
        assert!(matches!(
            err.root_cause(),
            ParseError::UnknownValueType { .. }
        ));
    }

    #[test]
    fn test_hash_roundtrip() {
        let reference = decode_reference(&stated_in("Q5375741"), 0).unwrap().remove(0);
        let hash = encode_reference(&reference).unwrap();
        assert_eq!(
            hash,
            json!({
                "property_id": "P248",
                "data_value": { "kind": "wikibase_entity_id", "value": { "id": "Q5375741" } }
            })
        );
        assert_eq!(decode_reference_hash(&hash, 0).unwrap(), reference);

        let qualifier = Qualifier::new(PropertyId::parse("P580").unwrap(), DataValue::NoValue);
        let hash = encode_qualifier(&qualifier).unwrap();
        assert_eq!(decode_qualifier_hash(&hash, 0).unwrap(), qualifier);
    }
}
