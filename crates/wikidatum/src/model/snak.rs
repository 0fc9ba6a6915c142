//! Qualifiers and references: property-value pairs attached to a statement.

use crate::model::{DataValue, PropertyId};

/// A property-value pair refining the context of a statement (e.g., "start time").
#[derive(Debug, Clone, PartialEq)]
pub struct Qualifier {
    /// The qualifying property.
    pub property_id: PropertyId,
    /// The qualifier's value.
    pub data_value: DataValue,
}

impl Qualifier {
    pub fn new(property_id: PropertyId, data_value: DataValue) -> Self {
        Qualifier {
            property_id,
            data_value,
        }
    }
}

/// A property-value pair citing evidence for a statement (e.g., "stated in").
#[derive(Debug, Clone, PartialEq)]
pub struct Reference {
    /// The citing property.
    pub property_id: PropertyId,
    /// The reference's value.
    pub data_value: DataValue,
}

impl Reference {
    pub fn new(property_id: PropertyId, data_value: DataValue) -> Self {
        Reference {
            property_id,
            data_value,
        }
    }
}
