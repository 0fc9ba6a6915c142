//! Field access over JSON objects.
//!
//! Every decoder reads through an [`ObjectReader`], which knows which layer
//! (data value, statement, snak, item) it is reading so that a missing or
//! mistyped field turns into the matching [`ParseError`] variant.

use serde_json::{Map, Value};

use crate::error::{EncodeError, ParseError};

// =============================================================================
// DECODING
// =============================================================================

/// The layer a field belongs to, which decides the error reported for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    /// A data value fragment; the context names the value (e.g., "quantity").
    DataValue(&'static str),
    Statement,
    Qualifier(usize),
    Reference(usize),
    Item,
}

impl Layer {
    /// Error for a required field that is absent or null.
    pub fn missing(self, field: &'static str) -> ParseError {
        match self {
            Layer::DataValue(context) => ParseError::MissingValueField { context, field },
            Layer::Statement => ParseError::MissingStatementField { field },
            Layer::Qualifier(index) => ParseError::MissingQualifierField { index, field },
            Layer::Reference(index) => ParseError::MissingReferenceField { index, field },
            Layer::Item => ParseError::MissingItemField { field },
        }
    }

    /// Error for a field that is present but unusable.
    pub fn invalid(self, field: &'static str, reason: impl Into<String>) -> ParseError {
        let reason = reason.into();
        match self {
            Layer::DataValue(context) => ParseError::InvalidValueField {
                context,
                field,
                reason,
            },
            Layer::Statement => ParseError::InvalidStatementField { field, reason },
            Layer::Qualifier(index) => ParseError::InvalidQualifierField {
                index,
                field,
                reason,
            },
            Layer::Reference(index) => ParseError::InvalidReferenceField {
                index,
                field,
                reason,
            },
            Layer::Item => ParseError::InvalidItemField { field, reason },
        }
    }

    /// Error for a fragment that is not a JSON object at all.
    fn not_object(self, field: &'static str) -> ParseError {
        match self {
            Layer::DataValue(context) => ParseError::UnexpectedShape {
                context,
                expected: "a JSON object",
            },
            other => other.invalid(field, "expected a JSON object"),
        }
    }
}

/// Returns a short name for a JSON value's type, for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Reader over one JSON object with layer-aware errors.
#[derive(Debug, Clone, Copy)]
pub struct ObjectReader<'a> {
    map: &'a Map<String, Value>,
    layer: Layer,
}

impl<'a> ObjectReader<'a> {
    /// Creates a reader, failing unless `value` is an object.
    ///
    /// `name` is the field name reported when the value isn't an object.
    pub fn new(value: &'a Value, layer: Layer, name: &'static str) -> Result<Self, ParseError> {
        match value {
            Value::Object(map) => Ok(Self { map, layer }),
            _ => Err(layer.not_object(name)),
        }
    }

    /// Returns the layer this reader reports errors for.
    pub fn layer(&self) -> Layer {
        self.layer
    }

    /// Returns the underlying map.
    pub fn map(&self) -> &'a Map<String, Value> {
        self.map
    }

    /// Returns a field, treating null as absent.
    #[inline]
    pub fn get(&self, field: &str) -> Option<&'a Value> {
        self.map.get(field).filter(|v| !v.is_null())
    }

    /// Reads a field that must be present.
    #[inline]
    pub fn required(&self, field: &'static str) -> Result<&'a Value, ParseError> {
        self.get(field).ok_or_else(|| self.layer.missing(field))
    }

    /// Reads a required string field.
    pub fn required_str(&self, field: &'static str) -> Result<&'a str, ParseError> {
        let value = self.required(field)?;
        value
            .as_str()
            .ok_or_else(|| self.wrong_type(field, "a string", value))
    }

    /// Reads an optional string field.
    pub fn optional_str(&self, field: &'static str) -> Result<Option<&'a str>, ParseError> {
        match self.get(field) {
            None => Ok(None),
            Some(value) => value
                .as_str()
                .map(Some)
                .ok_or_else(|| self.wrong_type(field, "a string", value)),
        }
    }

    /// Reads a required number field as f64.
    pub fn required_f64(&self, field: &'static str) -> Result<f64, ParseError> {
        let value = self.required(field)?;
        value
            .as_f64()
            .ok_or_else(|| self.wrong_type(field, "a number", value))
    }

    /// Reads an optional number field as f64.
    pub fn optional_f64(&self, field: &'static str) -> Result<Option<f64>, ParseError> {
        match self.get(field) {
            None => Ok(None),
            Some(value) => value
                .as_f64()
                .map(Some)
                .ok_or_else(|| self.wrong_type(field, "a number", value)),
        }
    }

    /// Reads a required non-negative integer field.
    pub fn required_u64(&self, field: &'static str) -> Result<u64, ParseError> {
        let value = self.required(field)?;
        value
            .as_u64()
            .ok_or_else(|| self.wrong_type(field, "a non-negative integer", value))
    }

    /// Reads a required nested object with the same layer.
    pub fn required_object(&self, field: &'static str) -> Result<ObjectReader<'a>, ParseError> {
        let value = self.required(field)?;
        ObjectReader::new(value, self.layer, field)
    }

    /// Reads an optional array field; absent and null read as empty.
    pub fn optional_array(&self, field: &'static str) -> Result<&'a [Value], ParseError> {
        match self.get(field) {
            None => Ok(&[]),
            Some(Value::Array(items)) => Ok(items),
            Some(value) => Err(self.wrong_type(field, "an array", value)),
        }
    }

    /// Reads an optional object field as a raw map.
    pub fn optional_map(
        &self,
        field: &'static str,
    ) -> Result<Option<&'a Map<String, Value>>, ParseError> {
        match self.get(field) {
            None => Ok(None),
            Some(Value::Object(map)) => Ok(Some(map)),
            Some(value) => Err(self.wrong_type(field, "an object", value)),
        }
    }

    fn wrong_type(&self, field: &'static str, expected: &str, found: &Value) -> ParseError {
        self.layer.invalid(
            field,
            format!("expected {}, found {}", expected, json_type_name(found)),
        )
    }
}

// =============================================================================
// ENCODING
// =============================================================================

/// Converts a float to a JSON number, rejecting NaN and infinities.
pub fn finite_number(value: f64, field: &'static str) -> Result<Value, EncodeError> {
    serde_json::Number::from_f64(value)
        .map(Value::Number)
        .ok_or(EncodeError::NonFiniteFloat { field })
}
