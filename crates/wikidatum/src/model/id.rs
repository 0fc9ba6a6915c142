//! Wikibase identifiers.
//!
//! Properties are `P<digits>`, items `Q<digits>`, lexemes `L<digits>` with
//! forms and senses as `L<digits>-F<digits>` / `L<digits>-S<digits>`, and
//! entity schemas `E<digits>`. Statement ids are opaque strings.

use std::fmt;

use uuid::Uuid;

/// Longest numeric part an id may have; every such number fits in a `u64`.
const MAX_ID_DIGITS: usize = 19;

/// Returns true if `s` is a non-empty run of at most [`MAX_ID_DIGITS`] ASCII
/// digits without a leading zero.
fn is_numeric_id(s: &str) -> bool {
    !s.is_empty()
        && s.len() <= MAX_ID_DIGITS
        && !s.starts_with('0')
        && s.bytes().all(|b| b.is_ascii_digit())
}

/// A property identifier such as `P31`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropertyId(String);

impl PropertyId {
    /// Parses a property id, returning None unless it has the form `P<digits>`.
    pub fn parse(s: &str) -> Option<PropertyId> {
        let digits = s.strip_prefix('P')?;
        is_numeric_id(digits).then(|| PropertyId(s.to_string()))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the numeric part of the id.
    pub fn numeric_id(&self) -> u64 {
        // parse() bounds the digits, so this cannot overflow
        self.0[1..].parse().unwrap_or_default()
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PropertyId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The kind of entity an [`EntityId`] points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityType {
    Item,
    Property,
    Lexeme,
    Form,
    Sense,
    EntitySchema,
}

impl EntityType {
    /// Returns the Wikibase name of this entity type.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Item => "item",
            EntityType::Property => "property",
            EntityType::Lexeme => "lexeme",
            EntityType::Form => "form",
            EntityType::Sense => "sense",
            EntityType::EntitySchema => "entity-schema",
        }
    }
}

/// An entity identifier such as `Q42`, `P31` or `L7-F2`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityId {
    entity_type: EntityType,
    id: String,
}

impl EntityId {
    /// Parses an entity id, detecting its type from the prefix.
    ///
    /// Returns None if the string is not a well-formed Wikibase entity id.
    pub fn parse(s: &str) -> Option<EntityId> {
        let entity_type = if let Some(rest) = s.strip_prefix('L') {
            match rest.split_once('-') {
                None if is_numeric_id(rest) => EntityType::Lexeme,
                Some((lexeme, sub)) if is_numeric_id(lexeme) => {
                    if sub.strip_prefix('F').is_some_and(is_numeric_id) {
                        EntityType::Form
                    } else if sub.strip_prefix('S').is_some_and(is_numeric_id) {
                        EntityType::Sense
                    } else {
                        return None;
                    }
                }
                _ => return None,
            }
        } else {
            let (prefix, digits) = s.split_at_checked(1)?;
            if !is_numeric_id(digits) {
                return None;
            }
            match prefix {
                "Q" => EntityType::Item,
                "P" => EntityType::Property,
                "E" => EntityType::EntitySchema,
                _ => return None,
            }
        };

        Some(EntityId {
            entity_type,
            id: s.to_string(),
        })
    }

    /// Returns the type of entity this id refers to.
    pub fn entity_type(&self) -> EntityType {
        self.entity_type
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

impl From<PropertyId> for EntityId {
    fn from(id: PropertyId) -> Self {
        EntityId {
            entity_type: EntityType::Property,
            id: id.0,
        }
    }
}

/// Separator between the subject entity and the GUID in a statement id.
const STATEMENT_ID_SEPARATOR: char = '$';

/// An opaque statement identifier, e.g. `Q42$F078E5B3-F9A8-480E-B7AC-D97778CBBEF9`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StatementId(String);

impl StatementId {
    /// Wraps an existing statement id without checking its shape.
    pub fn new(id: impl Into<String>) -> Self {
        StatementId(id.into())
    }

    /// Mints a fresh statement id for a statement on `subject`.
    ///
    /// ```text
    /// id = subject || "$" || UPPERCASE(uuid_v4)
    /// ```
    pub fn generate(subject: &EntityId) -> Self {
        let guid = Uuid::new_v4().hyphenated().to_string().to_uppercase();
        StatementId(format!("{}{}{}", subject, STATEMENT_ID_SEPARATOR, guid))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the subject entity part of the id, if the id has one.
    pub fn subject(&self) -> Option<EntityId> {
        let (subject, _) = self.0.split_once(STATEMENT_ID_SEPARATOR)?;
        EntityId::parse(subject)
    }
}

impl fmt::Display for StatementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_id_parse() {
        assert_eq!(PropertyId::parse("P31").unwrap().as_str(), "P31");
        assert_eq!(PropertyId::parse("P31").unwrap().numeric_id(), 31);
        assert!(PropertyId::parse("Q31").is_none());
        assert!(PropertyId::parse("P").is_none());
        assert!(PropertyId::parse("P031").is_none());
        assert!(PropertyId::parse("P3a").is_none());
        assert!(PropertyId::parse("p31").is_none());
    }

    #[test]
    fn test_id_digit_bound() {
        let widest = PropertyId::parse("P9999999999999999999").unwrap();
        assert_eq!(widest.numeric_id(), 9_999_999_999_999_999_999);

        assert!(PropertyId::parse("P18446744073709551616").is_none());
        assert!(PropertyId::parse("P10000000000000000000").is_none());
        assert!(EntityId::parse("Q10000000000000000000").is_none());
        assert!(EntityId::parse("L1-F10000000000000000000").is_none());
    }

    #[test]
    fn test_entity_id_types() {
        let cases = [
            ("Q42", EntityType::Item),
            ("P31", EntityType::Property),
            ("L7", EntityType::Lexeme),
            ("L7-F2", EntityType::Form),
            ("L7-S1", EntityType::Sense),
            ("E10", EntityType::EntitySchema),
        ];
        for (s, expected) in cases {
            let id = EntityId::parse(s).unwrap();
            assert_eq!(id.entity_type(), expected, "{}", s);
            assert_eq!(id.as_str(), s);
        }
    }

    #[test]
    fn test_entity_id_rejects_garbage() {
        for s in ["", "Q", "X42", "Q-1", "L7-X1", "L7-F", "Q4 2", "Ω42"] {
            assert!(EntityId::parse(s).is_none(), "{}", s);
        }
    }

    #[test]
    fn test_statement_id_generate() {
        let subject = EntityId::parse("Q42").unwrap();
        let id = StatementId::generate(&subject);

        let (prefix, guid) = id.as_str().split_once('$').unwrap();
        assert_eq!(prefix, "Q42");
        assert_eq!(guid.len(), 36);
        assert_eq!(guid, guid.to_uppercase());
        assert_eq!(id.subject(), Some(subject.clone()));

        // Fresh ids every time
        assert_ne!(id, StatementId::generate(&subject));
    }

    #[test]
    fn test_statement_id_without_subject() {
        assert_eq!(StatementId::new("opaque").subject(), None);
    }
}
