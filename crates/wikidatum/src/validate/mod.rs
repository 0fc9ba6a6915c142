//! Semantic validation for directly-built statements.
//!
//! Parsing already guarantees these invariants; values assembled by hand
//! (through [`Statement::new`] or the builder) are unchecked until they
//! pass through here.
//!
//! **Note:** Qualifiers and references carry no data type of their own.
//! Applications can register expected types in a [`SchemaContext`] to opt
//! in to checking them. This is advisory; unregistered properties pass.

use rustc_hash::FxHashMap;

use crate::error::ValidationError;
use crate::model::{DataType, DataValue, PropertyId, Statement};

/// Property data types known to the caller.
#[derive(Debug, Clone, Default)]
pub struct SchemaContext {
    properties: FxHashMap<PropertyId, DataType>,
}

impl SchemaContext {
    /// Creates a new empty schema context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a property with its data type.
    pub fn add_property(&mut self, id: PropertyId, data_type: DataType) {
        self.properties.insert(id, data_type);
    }

    /// Gets the registered data type for a property.
    pub fn get_property_type(&self, id: &PropertyId) -> Option<DataType> {
        self.properties.get(id).copied()
    }
}

/// Validates a statement's own value and every value it holds.
///
/// Checks that the main value's kind matches the declared data type (or is
/// a sentinel), that entity references point at the right entity type, and
/// that each value satisfies [`DataValue::validate`].
pub fn validate_statement(statement: &Statement) -> Result<(), ValidationError> {
    validate_statement_with(statement, &SchemaContext::default())
}

/// Validates a statement against a schema context.
///
/// On top of [`validate_statement`], a registered property must agree with
/// the statement's declared data type, and qualifier and reference values
/// must fit their property's registered type.
pub fn validate_statement_with(
    statement: &Statement,
    schema: &SchemaContext,
) -> Result<(), ValidationError> {
    let property = statement.property_id();
    if let Some(expected) = schema.get_property_type(property) {
        if expected != statement.data_type() {
            return Err(ValidationError::DataTypeMismatch {
                property: property.clone(),
                expected,
                found: statement.data_type(),
            });
        }
    }
    check_value(property, statement.data_type(), statement.data_value())?;

    let snaks = statement
        .qualifiers()
        .iter()
        .map(|q| (&q.property_id, &q.data_value))
        .chain(
            statement
                .references()
                .iter()
                .map(|r| (&r.property_id, &r.data_value)),
        );
    for (property, value) in snaks {
        match schema.get_property_type(property) {
            Some(data_type) => check_value(property, data_type, value)?,
            None => check_invariants(property, value)?,
        }
    }

    Ok(())
}

/// Validates a single value (independent of property context).
///
/// This checks value-level constraints like:
/// - Decimal amounts and bounds
/// - Coordinate ranges
/// - Time precision against zeroed month/day
pub fn validate_value(value: &DataValue) -> Option<&'static str> {
    value.validate()
}

fn check_value(
    property: &PropertyId,
    data_type: DataType,
    value: &DataValue,
) -> Result<(), ValidationError> {
    if !data_type.accepts(value) {
        return Err(ValidationError::KindMismatch {
            property: property.clone(),
            data_type,
            expected: data_type.value_kind(),
            found: value.kind(),
        });
    }
    if let (Some(expected), Some(id)) = (data_type.entity_type(), value.as_entity_id()) {
        if id.entity_type() != expected {
            return Err(ValidationError::EntityTypeMismatch {
                property: property.clone(),
                data_type,
                expected,
                found: id.entity_type(),
            });
        }
    }
    check_invariants(property, value)
}

fn check_invariants(property: &PropertyId, value: &DataValue) -> Result<(), ValidationError> {
    match value.validate() {
        Some(reason) => Err(ValidationError::InvalidValue {
            property: property.clone(),
            reason,
        }),
        None => Ok(()),
    }
}
