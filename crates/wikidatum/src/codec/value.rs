//! Data value decoding/encoding.
//!
//! Two JSON shapes are handled:
//! - API content: the `value.content` fragment of a Wikibase REST API snak,
//!   interpreted according to the property's data type.
//! - Hash form: the normalized `{ "kind": ..., "value": ... }` mapping produced
//!   by [`encode_data_value`].
//!
//! Dispatch for API content is a single table lookup from discriminator
//! (`novalue`, `somevalue` or a data type name) to parser.

use lazy_static::lazy_static;
use rustc_hash::FxHashMap;
use serde_json::{json, Value};
use tracing::trace;

use crate::codec::primitives::{finite_number, json_type_name, Layer, ObjectReader};
use crate::error::{EncodeError, ParseError};
use crate::model::{
    DataType, DataValue, DataValueKind, EntityId, GlobeCoordinate, MonolingualText, Quantity,
    Time, TimePrecision,
};
use crate::model::value::is_decimal;
use crate::util::{format_timestamp, parse_timestamp};

/// Discriminator for "the property has no value".
pub const NO_VALUE: &str = "novalue";

/// Discriminator for "the property has an unknown value".
pub const SOME_VALUE: &str = "somevalue";

/// Parses API content for one discriminator.
type ValueParser = fn(Option<DataType>, Option<&Value>) -> Result<DataValue, ParseError>;

lazy_static! {
    /// Discriminator to parser, covering both sentinels and every data type.
    static ref PARSERS: FxHashMap<&'static str, (Option<DataType>, ValueParser)> = {
        let mut parsers: FxHashMap<&'static str, (Option<DataType>, ValueParser)> =
            FxHashMap::default();
        parsers.insert(NO_VALUE, (None, decode_no_value as ValueParser));
        parsers.insert(SOME_VALUE, (None, decode_some_value as ValueParser));
        for data_type in DataType::ALL {
            parsers.insert(data_type.as_str(), (Some(data_type), parser_for(data_type.value_kind())));
        }
        parsers
    };
}

/// Selects the parser for a value kind.
fn parser_for(kind: DataValueKind) -> ValueParser {
    match kind {
        DataValueKind::NoValue => decode_no_value,
        DataValueKind::SomeValue => decode_some_value,
        DataValueKind::String => decode_string,
        DataValueKind::Quantity => decode_quantity,
        DataValueKind::Time => decode_time,
        DataValueKind::GlobeCoordinate => decode_globe_coordinate,
        DataValueKind::MonolingualText => decode_monolingual_text,
        DataValueKind::WikibaseEntityId => decode_entity_id,
    }
}

// =============================================================================
// DECODING (API content)
// =============================================================================

/// Decodes a data value from its discriminator and API content fragment.
///
/// `novalue` and `somevalue` ignore the fragment, which is usually absent.
/// Any other discriminator must be a known data type and its fragment must
/// have that type's shape.
pub fn decode_data_value(
    discriminator: &str,
    content: Option<&Value>,
) -> Result<DataValue, ParseError> {
    let Some((data_type, parser)) = PARSERS.get(discriminator) else {
        return Err(ParseError::UnknownDataType {
            data_type: discriminator.to_string(),
        });
    };
    trace!(discriminator, "decoding data value");
    parser(*data_type, content)
}

fn decode_no_value(_: Option<DataType>, _: Option<&Value>) -> Result<DataValue, ParseError> {
    Ok(DataValue::NoValue)
}

fn decode_some_value(_: Option<DataType>, _: Option<&Value>) -> Result<DataValue, ParseError> {
    Ok(DataValue::SomeValue)
}

/// Returns the content fragment, which every non-sentinel type requires.
fn require_content<'a>(
    context: &'static str,
    content: Option<&'a Value>,
) -> Result<&'a Value, ParseError> {
    match content {
        Some(value) if !value.is_null() => Ok(value),
        _ => Err(ParseError::MissingValueField {
            context,
            field: "content",
        }),
    }
}

fn decode_string(data_type: Option<DataType>, content: Option<&Value>) -> Result<DataValue, ParseError> {
    let context = data_type.map_or("string", |dt| dt.as_str());
    match require_content(context, content)? {
        Value::String(s) => Ok(DataValue::String(s.clone())),
        _ => Err(ParseError::UnexpectedShape {
            context,
            expected: "a string",
        }),
    }
}

fn decode_entity_id(
    data_type: Option<DataType>,
    content: Option<&Value>,
) -> Result<DataValue, ParseError> {
    let context = data_type.map_or("wikibase-entityid", |dt| dt.as_str());
    let Value::String(raw) = require_content(context, content)? else {
        return Err(ParseError::UnexpectedShape {
            context,
            expected: "an entity id string",
        });
    };
    let id = EntityId::parse(raw).ok_or_else(|| ParseError::InvalidValueField {
        context,
        field: "id",
        reason: format!("{:?} is not an entity id", raw),
    })?;

    if let Some(dt) = data_type {
        if let Some(expected) = dt.entity_type() {
            if id.entity_type() != expected {
                return Err(ParseError::WrongEntityType {
                    data_type: dt,
                    expected,
                    found: raw.clone(),
                });
            }
        }
    }
    Ok(DataValue::WikibaseEntityId(id))
}

fn decode_monolingual_text(
    _: Option<DataType>,
    content: Option<&Value>,
) -> Result<DataValue, ParseError> {
    let layer = Layer::DataValue("monolingualtext");
    let reader = ObjectReader::new(require_content("monolingualtext", content)?, layer, "content")?;
    Ok(DataValue::MonolingualText(MonolingualText {
        text: reader.required_str("text")?.to_string(),
        language: reader.required_str("language")?.to_string(),
    }))
}

/// Reads a decimal string field, rejecting anything but a signed decimal.
fn read_decimal(
    reader: &ObjectReader<'_>,
    field: &'static str,
    required: bool,
) -> Result<Option<String>, ParseError> {
    let value = if required {
        Some(reader.required_str(field)?)
    } else {
        reader.optional_str(field)?
    };
    match value {
        Some(s) if !is_decimal(s) => Err(reader
            .layer()
            .invalid(field, format!("{:?} is not a signed decimal", s))),
        other => Ok(other.map(str::to_string)),
    }
}

fn decode_quantity(_: Option<DataType>, content: Option<&Value>) -> Result<DataValue, ParseError> {
    let reader = ObjectReader::new(
        require_content("quantity", content)?,
        Layer::DataValue("quantity"),
        "content",
    )?;
    let Some(amount) = read_decimal(&reader, "amount", true)? else {
        return Err(reader.layer().missing("amount"));
    };
    Ok(DataValue::Quantity(Quantity {
        amount,
        unit: reader.required_str("unit")?.to_string(),
        upper_bound: read_decimal(&reader, "upperBound", false)?,
        lower_bound: read_decimal(&reader, "lowerBound", false)?,
    }))
}

/// Reads the shared time fields; the field names differ between API and hash form.
fn read_time(
    reader: &ObjectReader<'_>,
    calendar_field: &'static str,
) -> Result<Time, ParseError> {
    let raw_time = reader.required_str("time")?;
    let time = parse_timestamp(raw_time).map_err(|e| reader.layer().invalid("time", e.message))?;

    let raw_precision = reader.required_u64("precision")?;
    let precision = u8::try_from(raw_precision)
        .ok()
        .and_then(TimePrecision::from_u8)
        .ok_or_else(|| {
            reader
                .layer()
                .invalid("precision", format!("{} is outside 0..=14", raw_precision))
        })?;

    Ok(Time {
        time,
        precision,
        calendar_model: reader.required_str(calendar_field)?.to_string(),
    })
}

fn decode_time(_: Option<DataType>, content: Option<&Value>) -> Result<DataValue, ParseError> {
    let reader = ObjectReader::new(
        require_content("time", content)?,
        Layer::DataValue("time"),
        "content",
    )?;
    Ok(DataValue::Time(read_time(&reader, "calendarmodel")?))
}

fn read_globe_coordinate(reader: &ObjectReader<'_>) -> Result<GlobeCoordinate, ParseError> {
    Ok(GlobeCoordinate {
        latitude: reader.required_f64("latitude")?,
        longitude: reader.required_f64("longitude")?,
        precision: reader.optional_f64("precision")?,
        globe: reader.required_str("globe")?.to_string(),
    })
}

fn decode_globe_coordinate(
    _: Option<DataType>,
    content: Option<&Value>,
) -> Result<DataValue, ParseError> {
    let reader = ObjectReader::new(
        require_content("globe-coordinate", content)?,
        Layer::DataValue("globe-coordinate"),
        "content",
    )?;
    Ok(DataValue::GlobeCoordinate(read_globe_coordinate(&reader)?))
}

// =============================================================================
// ENCODING (hash form)
// =============================================================================

/// Encodes a data value to its hash form: `{ "kind": ..., "value": ... }`.
///
/// Sentinels carry a null value.
pub fn encode_data_value(value: &DataValue) -> Result<Value, EncodeError> {
    let payload = match value {
        DataValue::NoValue | DataValue::SomeValue => Value::Null,
        DataValue::String(s) => json!({ "string": s }),
        DataValue::WikibaseEntityId(id) => json!({ "id": id.as_str() }),
        DataValue::MonolingualText(m) => json!({
            "text": m.text,
            "language": m.language,
        }),
        DataValue::Quantity(q) => json!({
            "amount": q.amount,
            "unit": q.unit,
            "upper_bound": q.upper_bound,
            "lower_bound": q.lower_bound,
        }),
        DataValue::Time(t) => json!({
            "time": format_timestamp(&t.time),
            "precision": t.precision.as_u8(),
            "calendar_model": t.calendar_model,
        }),
        DataValue::GlobeCoordinate(c) => {
            let precision = match c.precision {
                Some(p) => finite_number(p, "globe_coordinate.precision")?,
                None => Value::Null,
            };
            json!({
                "latitude": finite_number(c.latitude, "globe_coordinate.latitude")?,
                "longitude": finite_number(c.longitude, "globe_coordinate.longitude")?,
                "precision": precision,
                "globe": c.globe,
            })
        }
    };

    Ok(json!({
        "kind": value.kind().as_str(),
        "value": payload,
    }))
}

// =============================================================================
// DECODING (hash form)
// =============================================================================

/// Opens the payload object of a non-sentinel hash value.
fn hash_payload<'a>(
    reader: &ObjectReader<'a>,
    context: &'static str,
) -> Result<ObjectReader<'a>, ParseError> {
    ObjectReader::new(reader.required("value")?, Layer::DataValue(context), "value")
}

/// Returns `value` if the hash carries no payload, as sentinels must.
fn hash_sentinel(reader: &ObjectReader<'_>, value: DataValue) -> Result<DataValue, ParseError> {
    match reader.get("value") {
        None => Ok(value),
        Some(other) => Err(ParseError::InvalidValueField {
            context: value.kind().as_str(),
            field: "value",
            reason: format!("expected null, found {}", json_type_name(other)),
        }),
    }
}

/// Decodes a data value from the hash form produced by [`encode_data_value`].
pub fn decode_data_value_hash(hash: &Value) -> Result<DataValue, ParseError> {
    let reader = ObjectReader::new(hash, Layer::DataValue("data_value"), "data_value")?;
    let raw_kind = reader.required_str("kind")?;
    let kind = DataValueKind::from_name(raw_kind).ok_or_else(|| ParseError::UnknownValueKind {
        kind: raw_kind.to_string(),
    })?;
    let context = kind.as_str();

    let value = match kind {
        DataValueKind::NoValue => hash_sentinel(&reader, DataValue::NoValue)?,
        DataValueKind::SomeValue => hash_sentinel(&reader, DataValue::SomeValue)?,
        DataValueKind::String => {
            let payload = hash_payload(&reader, context)?;
            DataValue::String(payload.required_str("string")?.to_string())
        }
        DataValueKind::WikibaseEntityId => {
            let payload = hash_payload(&reader, context)?;
            let raw = payload.required_str("id")?;
            let id = EntityId::parse(raw).ok_or_else(|| {
                payload
                    .layer()
                    .invalid("id", format!("{:?} is not an entity id", raw))
            })?;
            DataValue::WikibaseEntityId(id)
        }
        DataValueKind::MonolingualText => {
            let payload = hash_payload(&reader, context)?;
            DataValue::MonolingualText(MonolingualText {
                text: payload.required_str("text")?.to_string(),
                language: payload.required_str("language")?.to_string(),
            })
        }
        DataValueKind::Quantity => {
            let payload = hash_payload(&reader, context)?;
            let Some(amount) = read_decimal(&payload, "amount", true)? else {
                return Err(payload.layer().missing("amount"));
            };
            DataValue::Quantity(Quantity {
                amount,
                unit: payload.required_str("unit")?.to_string(),
                upper_bound: read_decimal(&payload, "upper_bound", false)?,
                lower_bound: read_decimal(&payload, "lower_bound", false)?,
            })
        }
        DataValueKind::Time => {
            DataValue::Time(read_time(&hash_payload(&reader, context)?, "calendar_model")?)
        }
        DataValueKind::GlobeCoordinate => {
            DataValue::GlobeCoordinate(read_globe_coordinate(&hash_payload(&reader, context)?)?)
        }
    };
    Ok(value)
}

/// Checks that a separately decoded value fits a property of `data_type`.
///
/// Sentinels fit every type; entity ids must also point at the type's
/// entity kind.
pub fn check_value_fits(data_type: DataType, value: &DataValue) -> Result<(), ParseError> {
    if !data_type.accepts(value) {
        return Err(ParseError::KindMismatch {
            data_type,
            found: value.kind(),
        });
    }
    if let (Some(expected), Some(id)) = (data_type.entity_type(), value.as_entity_id()) {
        if id.entity_type() != expected {
            return Err(ParseError::WrongEntityType {
                data_type,
                expected,
                found: id.as_str().to_string(),
            });
        }
    }
    Ok(())
}
