//! Error types for parsing, serializing and validating Wikidata values.

use thiserror::Error;

use crate::model::{DataType, DataValueKind, EntityType, PropertyId};

/// Error categories a [`ParseError`] falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A value fragment doesn't match its discriminator, or the discriminator is unknown.
    MalformedDataValue,
    /// A statement's value type or rank is unrecognized, or a required field is missing.
    MalformedStatement,
    /// A qualifier's property id or value fragment is missing or invalid.
    MalformedQualifier,
    /// A reference's property id or value fragment is missing or invalid.
    MalformedReference,
    /// An item document is missing a field or holds an invalid entry.
    MalformedItem,
    /// The input text is not JSON at all.
    MalformedJson,
}

impl ErrorKind {
    /// Returns the category name (e.g., "MalformedStatement").
    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::MalformedDataValue => "MalformedDataValue",
            ErrorKind::MalformedStatement => "MalformedStatement",
            ErrorKind::MalformedQualifier => "MalformedQualifier",
            ErrorKind::MalformedReference => "MalformedReference",
            ErrorKind::MalformedItem => "MalformedItem",
            ErrorKind::MalformedJson => "MalformedJson",
        }
    }
}

/// Error while turning API JSON (or hash form) into typed values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    // === MalformedDataValue ===
    #[error("[MalformedDataValue] unknown data type: {data_type:?}")]
    UnknownDataType { data_type: String },

    #[error("[MalformedDataValue] unknown data value kind: {kind:?}")]
    UnknownValueKind { kind: String },

    #[error("[MalformedDataValue] {context}: expected {expected}")]
    UnexpectedShape {
        context: &'static str,
        expected: &'static str,
    },

    #[error("[MalformedDataValue] {context}: missing field {field:?}")]
    MissingValueField {
        context: &'static str,
        field: &'static str,
    },

    #[error("[MalformedDataValue] {context}: invalid {field}: {reason}")]
    InvalidValueField {
        context: &'static str,
        field: &'static str,
        reason: String,
    },

    #[error("[MalformedDataValue] {data_type:?} expects a {expected:?} id, found {found:?}")]
    WrongEntityType {
        data_type: DataType,
        expected: EntityType,
        found: String,
    },

    #[error("[MalformedDataValue] {data_type:?} cannot hold a {found:?} value")]
    KindMismatch {
        data_type: DataType,
        found: DataValueKind,
    },

    // === MalformedStatement ===
    #[error("[MalformedStatement] missing field {field:?}")]
    MissingStatementField { field: &'static str },

    #[error("[MalformedStatement] invalid {field}: {reason}")]
    InvalidStatementField { field: &'static str, reason: String },

    #[error("[MalformedStatement] unknown value type: {value_type:?}")]
    UnknownValueType { value_type: String },

    #[error("[MalformedStatement] invalid rank: {rank:?} (expected preferred, normal or deprecated)")]
    InvalidRank { rank: String },

    // === MalformedQualifier ===
    #[error("[MalformedQualifier] qualifier {index}: missing field {field:?}")]
    MissingQualifierField { index: usize, field: &'static str },

    #[error("[MalformedQualifier] qualifier {index}: invalid {field}: {reason}")]
    InvalidQualifierField {
        index: usize,
        field: &'static str,
        reason: String,
    },

    #[error("[MalformedQualifier] qualifier {index}: {source}")]
    Qualifier {
        index: usize,
        #[source]
        source: Box<ParseError>,
    },

    // === MalformedReference ===
    #[error("[MalformedReference] reference {index}: missing field {field:?}")]
    MissingReferenceField { index: usize, field: &'static str },

    #[error("[MalformedReference] reference {index}: invalid {field}: {reason}")]
    InvalidReferenceField {
        index: usize,
        field: &'static str,
        reason: String,
    },

    #[error("[MalformedReference] reference {index}: {source}")]
    Reference {
        index: usize,
        #[source]
        source: Box<ParseError>,
    },

    // === MalformedItem ===
    #[error("[MalformedItem] missing field {field:?}")]
    MissingItemField { field: &'static str },

    #[error("[MalformedItem] invalid {field}: {reason}")]
    InvalidItemField { field: &'static str, reason: String },

    #[error("[MalformedItem] statement {property}[{index}]: {source}")]
    ItemStatement {
        property: String,
        index: usize,
        #[source]
        source: Box<ParseError>,
    },

    // === MalformedJson ===
    #[error("[MalformedJson] {0}")]
    Json(String),
}

impl ParseError {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::UnknownDataType { .. }
            | ParseError::UnknownValueKind { .. }
            | ParseError::UnexpectedShape { .. }
            | ParseError::MissingValueField { .. }
            | ParseError::InvalidValueField { .. }
            | ParseError::WrongEntityType { .. }
            | ParseError::KindMismatch { .. } => ErrorKind::MalformedDataValue,
            ParseError::MissingStatementField { .. }
            | ParseError::InvalidStatementField { .. }
            | ParseError::UnknownValueType { .. }
            | ParseError::InvalidRank { .. } => ErrorKind::MalformedStatement,
            ParseError::MissingQualifierField { .. }
            | ParseError::InvalidQualifierField { .. }
            | ParseError::Qualifier { .. } => ErrorKind::MalformedQualifier,
            ParseError::MissingReferenceField { .. }
            | ParseError::InvalidReferenceField { .. }
            | ParseError::Reference { .. } => ErrorKind::MalformedReference,
            ParseError::MissingItemField { .. }
            | ParseError::InvalidItemField { .. }
            | ParseError::ItemStatement { .. } => ErrorKind::MalformedItem,
            ParseError::Json(_) => ErrorKind::MalformedJson,
        }
    }

    /// Returns the innermost error, following qualifier/reference/item wrapping.
    pub fn root_cause(&self) -> &ParseError {
        match self {
            ParseError::Qualifier { source, .. }
            | ParseError::Reference { source, .. }
            | ParseError::ItemStatement { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        ParseError::Json(err.to_string())
    }
}

/// Error while serializing typed values to hash form.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    #[error("{field} is not a finite number")]
    NonFiniteFloat { field: &'static str },
}

/// Error during invariant validation of directly-built values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("data value kind mismatch for property {property}: {data_type:?} requires {expected:?}, found {found:?}")]
    KindMismatch {
        property: PropertyId,
        data_type: DataType,
        expected: DataValueKind,
        found: DataValueKind,
    },

    #[error("{data_type:?} on property {property} requires a {expected:?} id, found {found:?}")]
    EntityTypeMismatch {
        property: PropertyId,
        data_type: DataType,
        expected: EntityType,
        found: EntityType,
    },

    #[error("property {property} is registered as {expected:?}, statement declares {found:?}")]
    DataTypeMismatch {
        property: PropertyId,
        expected: DataType,
        found: DataType,
    },

    #[error("invalid value for property {property}: {reason}")]
    InvalidValue {
        property: PropertyId,
        reason: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_of_wrapped_errors() {
        let inner = ParseError::UnknownDataType {
            data_type: "bogus".to_string(),
        };
        let wrapped = ParseError::Reference {
            index: 1,
            source: Box::new(inner.clone()),
        };

        assert_eq!(inner.kind(), ErrorKind::MalformedDataValue);
        assert_eq!(wrapped.kind(), ErrorKind::MalformedReference);
        assert_eq!(wrapped.root_cause(), &inner);
    }

    #[test]
    fn test_message_names_field() {
        let err = ParseError::InvalidRank {
            rank: "urgent".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("[MalformedStatement]"));
        assert!(msg.contains("urgent"));
    }
}
