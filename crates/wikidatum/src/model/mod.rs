//! Data model types for Wikidata entities.
//!
//! This module contains the typed in-memory representation:
//! - Identifiers (properties, entities, statements)
//! - Data values (typed snak payloads)
//! - Qualifiers and references
//! - Statements and their builder
//! - Items, terms and sitelinks

pub mod builder;
pub mod id;
pub mod item;
pub mod snak;
pub mod statement;
pub mod term;
pub mod value;

pub use builder::StatementBuilder;
pub use id::{EntityId, EntityType, PropertyId, StatementId};
pub use item::{Item, ItemAccess};
pub use snak::{Qualifier, Reference};
pub use statement::{Rank, Statement};
pub use term::{normalize_code, Code, Sitelink, Term};
pub use value::{
    DataType, DataValue, DataValueKind, GlobeCoordinate, MonolingualText, Quantity, Time,
    TimePrecision,
};
