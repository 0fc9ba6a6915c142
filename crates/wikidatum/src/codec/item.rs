//! Item document decoding.
//!
//! Reads the REST API item representation:
//!
//! ```text
//! { "type": "item", "id": "Q42",
//!   "labels": { "en": "Douglas Adams" },
//!   "descriptions": { "en": "English author and humourist" },
//!   "aliases": { "en": ["Douglas Noël Adams", "DNA"] },
//!   "statements": { "P31": [ {statement}, ... ] },
//!   "sitelinks": { "enwiki": { "title": "Douglas Adams", "badges": [], "url": "..." } } }
//! ```
//!
//! Map entries keep document order.

use serde_json::{Map, Value};
use tracing::debug;

use crate::codec::primitives::{json_type_name, Layer, ObjectReader};
use crate::codec::statement::decode_statement;
use crate::error::ParseError;
use crate::model::{EntityId, EntityType, Item, ItemAccess, Sitelink, Statement, Term};

fn expected(field: &'static str, key: &str, what: &str, found: &Value) -> ParseError {
    Layer::Item.invalid(
        field,
        format!("{}: expected {}, found {}", key, what, json_type_name(found)),
    )
}

/// Reads a `{lang: str}` term map.
fn read_terms(reader: &ObjectReader<'_>, field: &'static str) -> Result<Vec<Term>, ParseError> {
    let Some(map) = reader.optional_map(field)? else {
        return Ok(Vec::new());
    };
    map.iter()
        .map(|(lang, value)| match value {
            Value::String(text) => Ok(Term::new(lang.as_str(), text.as_str())),
            other => Err(expected(field, lang, "a string", other)),
        })
        .collect()
}

/// Reads the `{lang: [str]}` alias map, flattened in document order.
fn read_aliases(reader: &ObjectReader<'_>) -> Result<Vec<Term>, ParseError> {
    let Some(map) = reader.optional_map("aliases")? else {
        return Ok(Vec::new());
    };
    let mut aliases = Vec::new();
    for (lang, value) in map {
        let Value::Array(values) = value else {
            return Err(expected("aliases", lang, "an array", value));
        };
        for alias in values {
            let text = alias
                .as_str()
                .ok_or_else(|| expected("aliases", lang, "a string", alias))?;
            aliases.push(Term::new(lang.as_str(), text));
        }
    }
    Ok(aliases)
}

/// Reads the `{pid: [statement]}` map into one sequence.
///
/// Each statement must be about the property it is filed under.
fn read_statements(map: Option<&Map<String, Value>>) -> Result<Vec<Statement>, ParseError> {
    let Some(map) = map else {
        return Ok(Vec::new());
    };
    let mut statements = Vec::new();
    for (property, value) in map {
        let Value::Array(entries) = value else {
            return Err(expected("statements", property, "an array", value));
        };
        for (index, entry) in entries.iter().enumerate() {
            let statement = decode_statement(entry).map_err(|e| ParseError::ItemStatement {
                property: property.clone(),
                index,
                source: Box::new(e),
            })?;
            if statement.property_id().as_str() != property {
                return Err(Layer::Item.invalid(
                    "statements",
                    format!(
                        "{}[{}]: statement is about {}",
                        property,
                        index,
                        statement.property_id()
                    ),
                ));
            }
            statements.push(statement);
        }
    }
    Ok(statements)
}

fn read_sitelink(site: &str, value: &Value) -> Result<Sitelink, ParseError> {
    let reader = ObjectReader::new(value, Layer::Item, "sitelinks")?;
    let mut sitelink = Sitelink::new(site, reader.required_str("title")?);
    for badge in reader.optional_array("badges")? {
        let badge = badge
            .as_str()
            .ok_or_else(|| expected("badges", site, "a string", badge))?;
        sitelink.badges.push(badge.to_string());
    }
    sitelink.url = reader.optional_str("url")?.map(str::to_string);
    Ok(sitelink)
}

/// Decodes an item document.
///
/// Missing term, statement or sitelink maps decode as empty. A failing
/// statement is reported with its property and position.
pub fn decode_item(value: &Value) -> Result<Item, ParseError> {
    let reader = ObjectReader::new(value, Layer::Item, "item")?;

    let raw_id = reader.required_str("id")?;
    let id = EntityId::parse(raw_id)
        .filter(|id| id.entity_type() == EntityType::Item)
        .ok_or_else(|| Layer::Item.invalid("id", format!("{:?} is not an item id", raw_id)))?;

    let labels = read_terms(&reader, "labels")?;
    let descriptions = read_terms(&reader, "descriptions")?;
    let aliases = read_aliases(&reader)?;
    let statements = read_statements(reader.optional_map("statements")?)?;

    let sitelinks = match reader.optional_map("sitelinks")? {
        Some(map) => map
            .iter()
            .map(|(site, value)| read_sitelink(site, value))
            .collect::<Result<Vec<_>, _>>()?,
        None => Vec::new(),
    };

    let item = Item::new(id, statements, labels, descriptions, aliases, sitelinks);
    debug!(
        item = item.id().as_str(),
        statements = item.all_statements().len(),
        labels = item.all_labels().len(),
        sitelinks = item.all_sitelinks().len(),
        "decoded item"
    );
    Ok(item)
}

/// Decodes an item document from raw JSON text.
pub fn decode_item_from_str(text: &str) -> Result<Item, ParseError> {
    let value: Value = serde_json::from_str(text)?;
    decode_item(&value)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::ErrorKind;
    use crate::model::term::codes;
    use crate::model::{Code, DataValue};

    fn douglas_adams() -> Value {
        json!({
            "type": "item",
            "id": "Q42",
            "labels": { "en": "Douglas Adams", "fr": "Douglas Adams" },
            "descriptions": { "en": "English author and humourist" },
            "aliases": { "en": ["Douglas Noël Adams", "DNA"], "fr": ["Douglas Noel Adams"] },
            "statements": {
                "P31": [{
                    "id": "Q42$F078E5B3-F9A8-480E-B7AC-D97778CBBEF9",
                    "rank": "normal",
                    "property": { "id": "P31", "data-type": "wikibase-item" },
                    "value": { "type": "value", "content": "Q5" }
                }],
                "P1559": [{
                    "id": "Q42$A3E6DE13-4D4A-4ABF-9B23-2A1E41D3C0C2",
                    "rank": "preferred",
                    "property": { "id": "P1559", "data-type": "monolingualtext" },
                    "value": {
                        "type": "value",
                        "content": { "text": "Douglas Adams", "language": "en" }
                    }
                }]
            },
            "sitelinks": {
                "enwiki": {
                    "title": "Douglas Adams",
                    "badges": ["Q17437798"],
                    "url": "https://en.wikipedia.org/wiki/Douglas_Adams"
                },
                "eswiki": { "title": "Douglas Adams", "badges": [] }
            }
        })
    }

    #[test]
    fn test_decode_item() {
        let item = decode_item(&douglas_adams()).unwrap();

        assert_eq!(item.id().as_str(), "Q42");
        assert_eq!(item.statements(None).len(), 2);
        assert_eq!(item.statements(Some("P1559")).len(), 1);
        assert_eq!(
            item.statements(Some("P31"))[0].data_value(),
            &DataValue::WikibaseEntityId(EntityId::parse("Q5").unwrap())
        );

        assert_eq!(item.label("en").unwrap().value, "Douglas Adams");
        assert!(item.label("de").is_none());
        assert_eq!(item.aliases(&[codes::EN]).len(), 2);
        assert_eq!(item.all_aliases()[2].lang, "fr");

        let enwiki = item.sitelink(Code::new("enwiki")).unwrap();
        assert_eq!(enwiki.badges, vec!["Q17437798".to_string()]);
        assert_eq!(item.sitelink("enwiki"), Some(enwiki));
        assert!(item.sitelink("eswiki").unwrap().url.is_none());
    }

    #[test]
    fn test_document_order_is_kept() {
        let item = decode_item(&douglas_adams()).unwrap();
        let labels: Vec<_> = item.all_labels().iter().map(|t| t.lang.as_str()).collect();
        assert_eq!(labels, ["en", "fr"]);
        assert_eq!(item.all_statements()[1].property_id().as_str(), "P1559");
    }

    #[test]
    fn test_missing_maps_are_empty() {
        let item = decode_item(&json!({ "id": "Q1" })).unwrap();
        assert!(item.all_statements().is_empty());
        assert!(item.all_labels().is_empty());
        assert!(item.all_sitelinks().is_empty());
    }

    #[test]
    fn test_id_must_be_item() {
        assert_eq!(
            decode_item(&json!({})).unwrap_err(),
            ParseError::MissingItemField { field: "id" }
        );
        assert!(matches!(
            decode_item(&json!({ "id": "P31" })),
            Err(ParseError::InvalidItemField { field: "id", .. })
        ));
    }

    #[test]
    fn test_bad_statement_is_wrapped() {
        let mut json = douglas_adams();
        json["statements"]["P1559"][0]["rank"] = json!("urgent");

        let err = decode_item(&json).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedItem);
        assert!(matches!(
            &err,
            ParseError::ItemStatement { property, index: 0, .. } if property == "P1559"
        ));
        assert_eq!(err.root_cause().kind(), ErrorKind::MalformedStatement);
    }

    #[test]
    fn test_statement_filed_under_wrong_property() {
        let mut json = douglas_adams();
        let misfiled = json["statements"]["P1559"][0].clone();
        json["statements"]["P31"] = json!([misfiled]);

        let err = decode_item(&json).unwrap_err();
        assert!(matches!(
            &err,
            ParseError::InvalidItemField { field: "statements", reason } if reason.contains("P1559")
        ));
        assert_eq!(err.kind(), ErrorKind::MalformedItem);
    }

    #[test]
    fn test_bad_term_shapes() {
        let mut json = douglas_adams();
        json["labels"]["de"] = json!(["Douglas Adams"]);
        assert!(matches!(
            decode_item(&json),
            Err(ParseError::InvalidItemField { field: "labels", .. })
        ));

        let mut json = douglas_adams();
        json["aliases"]["en"] = json!("DNA");
        assert!(matches!(
            decode_item(&json),
            Err(ParseError::InvalidItemField { field: "aliases", .. })
        ));
    }

    #[test]
    fn test_from_str() {
        let item = decode_item_from_str(&douglas_adams().to_string()).unwrap();
        assert_eq!(item, decode_item(&douglas_adams()).unwrap());
        assert_eq!(
            decode_item_from_str("[").unwrap_err().kind(),
            ErrorKind::MalformedJson
        );
    }
}
