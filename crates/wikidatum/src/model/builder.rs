//! Builder API for ergonomic Statement construction.
//!
//! # Example
//!
//! ```rust
//! use wikidatum::model::builder::StatementBuilder;
//! use wikidatum::{DataType, DataValue, EntityId, PropertyId, Rank};
//!
//! let statement = StatementBuilder::new(
//!     PropertyId::parse("P31").unwrap(),
//!     DataType::WikibaseItem,
//!     DataValue::WikibaseEntityId(EntityId::parse("Q5").unwrap()),
//! )
//! .id_for(&EntityId::parse("Q42").unwrap())
//! .rank(Rank::Preferred)
//! .reference(PropertyId::parse("P248").unwrap(), DataValue::SomeValue)
//! .build();
//!
//! assert_eq!(statement.references().len(), 1);
//! ```

use crate::model::{
    DataType, DataValue, EntityId, PropertyId, Qualifier, Rank, Reference, Statement, StatementId,
};

/// Builder for constructing a Statement.
#[derive(Debug, Clone)]
pub struct StatementBuilder {
    id: Option<StatementId>,
    property_id: PropertyId,
    data_type: DataType,
    data_value: DataValue,
    qualifiers: Vec<Qualifier>,
    references: Vec<Reference>,
    rank: Rank,
}

impl StatementBuilder {
    /// Creates a new StatementBuilder for the given property and value.
    pub fn new(property_id: PropertyId, data_type: DataType, data_value: DataValue) -> Self {
        Self {
            id: None,
            property_id,
            data_type,
            data_value,
            qualifiers: Vec::new(),
            references: Vec::new(),
            rank: Rank::Normal,
        }
    }

    /// Starts from an existing statement.
    pub fn from_statement(statement: &Statement) -> Self {
        Self {
            id: Some(statement.id().clone()),
            property_id: statement.property_id().clone(),
            data_type: statement.data_type(),
            data_value: statement.data_value().clone(),
            qualifiers: statement.qualifiers().to_vec(),
            references: statement.references().to_vec(),
            rank: statement.rank(),
        }
    }

    /// Sets the statement id.
    pub fn id(mut self, id: StatementId) -> Self {
        self.id = Some(id);
        self
    }

    /// Mints a fresh statement id for a statement on `subject`.
    pub fn id_for(mut self, subject: &EntityId) -> Self {
        self.id = Some(StatementId::generate(subject));
        self
    }

    /// Sets the rank.
    pub fn rank(mut self, rank: Rank) -> Self {
        self.rank = rank;
        self
    }

    /// Adds a qualifier.
    pub fn qualifier(mut self, property_id: PropertyId, data_value: DataValue) -> Self {
        self.qualifiers.push(Qualifier::new(property_id, data_value));
        self
    }

    /// Adds multiple qualifiers at once.
    pub fn qualifiers(mut self, qualifiers: impl IntoIterator<Item = Qualifier>) -> Self {
        self.qualifiers.extend(qualifiers);
        self
    }

    /// Adds a reference.
    pub fn reference(mut self, property_id: PropertyId, data_value: DataValue) -> Self {
        self.references.push(Reference::new(property_id, data_value));
        self
    }

    /// Adds multiple references at once.
    pub fn references(mut self, references: impl IntoIterator<Item = Reference>) -> Self {
        self.references.extend(references);
        self
    }

    /// Builds the Statement.
    ///
    /// A statement without an id gets an empty one; new statements get
    /// their id from the server or from [`StatementBuilder::id_for`].
    pub fn build(self) -> Statement {
        Statement::new(
            self.id.unwrap_or_else(|| StatementId::new("")),
            self.property_id,
            self.data_type,
            self.data_value,
            self.qualifiers,
            self.references,
            self.rank,
        )
    }
}
