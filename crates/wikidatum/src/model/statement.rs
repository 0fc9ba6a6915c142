//! Statements: one property-value claim about an entity.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::{DataType, DataValue, PropertyId, Qualifier, Reference, StatementId};

/// Statement rank, ordered `Deprecated < Normal < Preferred`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Rank {
    Deprecated,
    #[default]
    Normal,
    Preferred,
}

impl Rank {
    /// Returns the API name of this rank.
    pub fn as_str(&self) -> &'static str {
        match self {
            Rank::Deprecated => "deprecated",
            Rank::Normal => "normal",
            Rank::Preferred => "preferred",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rank {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "preferred" => Ok(Rank::Preferred),
            "normal" => Ok(Rank::Normal),
            "deprecated" => Ok(Rank::Deprecated),
            _ => Err(()),
        }
    }
}

/// A property-value claim with qualifiers, references and a rank.
///
/// Statements are immutable once built. Use [`Statement::new`], the
/// [`StatementBuilder`](crate::model::StatementBuilder), or the `with_*`
/// methods to derive a changed copy.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    id: StatementId,
    property_id: PropertyId,
    data_type: DataType,
    data_value: DataValue,
    qualifiers: Vec<Qualifier>,
    references: Vec<Reference>,
    rank: Rank,
}

impl Statement {
    /// Creates a statement from already-typed parts.
    ///
    /// No checks are made beyond the types; see
    /// [`validate_statement`](crate::validate::validate_statement).
    pub fn new(
        id: StatementId,
        property_id: PropertyId,
        data_type: DataType,
        data_value: DataValue,
        qualifiers: Vec<Qualifier>,
        references: Vec<Reference>,
        rank: Rank,
    ) -> Self {
        Statement {
            id,
            property_id,
            data_type,
            data_value,
            qualifiers,
            references,
            rank,
        }
    }

    pub fn id(&self) -> &StatementId {
        &self.id
    }

    /// The property this statement is about.
    pub fn property_id(&self) -> &PropertyId {
        &self.property_id
    }

    /// The property's data type, which decides the value kind.
    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    pub fn data_value(&self) -> &DataValue {
        &self.data_value
    }

    pub fn qualifiers(&self) -> &[Qualifier] {
        &self.qualifiers
    }

    pub fn references(&self) -> &[Reference] {
        &self.references
    }

    pub fn rank(&self) -> Rank {
        self.rank
    }

    /// Returns the qualifiers for one property.
    pub fn qualifiers_for<'a>(
        &'a self,
        property: &'a str,
    ) -> impl Iterator<Item = &'a Qualifier> + 'a {
        self.qualifiers
            .iter()
            .filter(move |q| q.property_id.as_str() == property)
    }

    /// Returns a copy with a different id.
    pub fn with_id(self, id: StatementId) -> Self {
        Statement { id, ..self }
    }

    /// Returns a copy with a different value (and data type).
    pub fn with_value(self, data_type: DataType, data_value: DataValue) -> Self {
        Statement {
            data_type,
            data_value,
            ..self
        }
    }

    /// Returns a copy with different qualifiers.
    pub fn with_qualifiers(self, qualifiers: Vec<Qualifier>) -> Self {
        Statement { qualifiers, ..self }
    }

    /// Returns a copy with different references.
    pub fn with_references(self, references: Vec<Reference>) -> Self {
        Statement { references, ..self }
    }

    /// Returns a copy with a different rank.
    pub fn with_rank(self, rank: Rank) -> Self {
        Statement { rank, ..self }
    }

    /// Serializes this statement to its normalized hash form.
    ///
    /// See [`encode_statement`](crate::codec::encode_statement).
    pub fn to_hash(&self) -> Result<serde_json::Value, crate::error::EncodeError> {
        crate::codec::encode_statement(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_statement() -> Statement {
        Statement::new(
            StatementId::new("Q42$1"),
            PropertyId::parse("P31").unwrap(),
            DataType::String,
            DataValue::String("x".to_string()),
            vec![],
            vec![],
            Rank::default(),
        )
    }

    #[test]
    fn test_rank_order_and_names() {
        assert!(Rank::Preferred > Rank::Normal);
        assert!(Rank::Normal > Rank::Deprecated);
        assert_eq!(Rank::default(), Rank::Normal);
        for rank in [Rank::Preferred, Rank::Normal, Rank::Deprecated] {
            assert_eq!(rank.as_str().parse::<Rank>(), Ok(rank));
        }
        assert!("urgent".parse::<Rank>().is_err());
        assert!("Normal".parse::<Rank>().is_err());
    }

    #[test]
    fn test_with_methods_leave_other_fields() {
        let original = make_statement();
        let changed = original.clone().with_rank(Rank::Preferred);

        assert_eq!(changed.rank(), Rank::Preferred);
        assert_eq!(original.rank(), Rank::Normal);
        assert_eq!(changed.id(), original.id());
        assert_eq!(changed.data_value(), original.data_value());
    }

    #[test]
    fn test_qualifiers_for() {
        let p580 = PropertyId::parse("P580").unwrap();
        let p582 = PropertyId::parse("P582").unwrap();
        let statement = make_statement().with_qualifiers(vec![
            Qualifier::new(p580.clone(), DataValue::SomeValue),
            Qualifier::new(p582, DataValue::NoValue),
            Qualifier::new(p580, DataValue::NoValue),
        ]);

        assert_eq!(statement.qualifiers_for("P580").count(), 2);
        assert_eq!(statement.qualifiers_for("P1").count(), 0);
    }
}
