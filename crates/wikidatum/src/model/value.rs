//! Data value types for Wikibase statements, qualifiers and references.
//!
//! A data value is the typed payload of a snak. The property's data type
//! decides which [`DataValueKind`] its values take; "no value" and "some value"
//! are sentinels that fit any property.

use serde::{Deserialize, Serialize};

use crate::model::{EntityId, EntityType};
use crate::util::Timestamp;

/// Wikibase property data types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    #[serde(rename = "string")]
    String,
    #[serde(rename = "external-id")]
    ExternalId,
    #[serde(rename = "url")]
    Url,
    #[serde(rename = "commonsMedia")]
    CommonsMedia,
    #[serde(rename = "geo-shape")]
    GeoShape,
    #[serde(rename = "tabular-data")]
    TabularData,
    #[serde(rename = "math")]
    Math,
    #[serde(rename = "musical-notation")]
    MusicalNotation,
    #[serde(rename = "wikibase-item")]
    WikibaseItem,
    #[serde(rename = "wikibase-property")]
    WikibaseProperty,
    #[serde(rename = "wikibase-lexeme")]
    WikibaseLexeme,
    #[serde(rename = "wikibase-form")]
    WikibaseForm,
    #[serde(rename = "wikibase-sense")]
    WikibaseSense,
    #[serde(rename = "entity-schema")]
    EntitySchema,
    #[serde(rename = "quantity")]
    Quantity,
    #[serde(rename = "time")]
    Time,
    #[serde(rename = "globe-coordinate")]
    GlobeCoordinate,
    #[serde(rename = "monolingualtext")]
    MonolingualText,
}

impl DataType {
    /// Every data type, in registry order.
    pub const ALL: [DataType; 18] = [
        DataType::String,
        DataType::ExternalId,
        DataType::Url,
        DataType::CommonsMedia,
        DataType::GeoShape,
        DataType::TabularData,
        DataType::Math,
        DataType::MusicalNotation,
        DataType::WikibaseItem,
        DataType::WikibaseProperty,
        DataType::WikibaseLexeme,
        DataType::WikibaseForm,
        DataType::WikibaseSense,
        DataType::EntitySchema,
        DataType::Quantity,
        DataType::Time,
        DataType::GlobeCoordinate,
        DataType::MonolingualText,
    ];

    /// Returns the API name of this data type (e.g., "wikibase-item").
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::String => "string",
            DataType::ExternalId => "external-id",
            DataType::Url => "url",
            DataType::CommonsMedia => "commonsMedia",
            DataType::GeoShape => "geo-shape",
            DataType::TabularData => "tabular-data",
            DataType::Math => "math",
            DataType::MusicalNotation => "musical-notation",
            DataType::WikibaseItem => "wikibase-item",
            DataType::WikibaseProperty => "wikibase-property",
            DataType::WikibaseLexeme => "wikibase-lexeme",
            DataType::WikibaseForm => "wikibase-form",
            DataType::WikibaseSense => "wikibase-sense",
            DataType::EntitySchema => "entity-schema",
            DataType::Quantity => "quantity",
            DataType::Time => "time",
            DataType::GlobeCoordinate => "globe-coordinate",
            DataType::MonolingualText => "monolingualtext",
        }
    }

    /// Looks up a data type by its API name.
    pub fn from_name(name: &str) -> Option<DataType> {
        DataType::ALL.into_iter().find(|dt| dt.as_str() == name)
    }

    /// Returns the kind of value properties of this type hold.
    pub fn value_kind(&self) -> DataValueKind {
        match self {
            DataType::String
            | DataType::ExternalId
            | DataType::Url
            | DataType::CommonsMedia
            | DataType::GeoShape
            | DataType::TabularData
            | DataType::Math
            | DataType::MusicalNotation => DataValueKind::String,
            DataType::WikibaseItem
            | DataType::WikibaseProperty
            | DataType::WikibaseLexeme
            | DataType::WikibaseForm
            | DataType::WikibaseSense
            | DataType::EntitySchema => DataValueKind::WikibaseEntityId,
            DataType::Quantity => DataValueKind::Quantity,
            DataType::Time => DataValueKind::Time,
            DataType::GlobeCoordinate => DataValueKind::GlobeCoordinate,
            DataType::MonolingualText => DataValueKind::MonolingualText,
        }
    }

    /// Returns the entity type referenced by entity-valued data types.
    pub fn entity_type(&self) -> Option<EntityType> {
        match self {
            DataType::WikibaseItem => Some(EntityType::Item),
            DataType::WikibaseProperty => Some(EntityType::Property),
            DataType::WikibaseLexeme => Some(EntityType::Lexeme),
            DataType::WikibaseForm => Some(EntityType::Form),
            DataType::WikibaseSense => Some(EntityType::Sense),
            DataType::EntitySchema => Some(EntityType::EntitySchema),
            _ => None,
        }
    }

    /// Returns true if `value` may be stored on a property of this type.
    ///
    /// The sentinels are accepted for every data type.
    pub fn accepts(&self, value: &DataValue) -> bool {
        let kind = value.kind();
        kind.is_sentinel() || kind == self.value_kind()
    }
}

/// The closed set of data value variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataValueKind {
    NoValue,
    SomeValue,
    String,
    Quantity,
    Time,
    GlobeCoordinate,
    MonolingualText,
    WikibaseEntityId,
}

impl DataValueKind {
    /// Every kind, in declaration order.
    pub const ALL: [DataValueKind; 8] = [
        DataValueKind::NoValue,
        DataValueKind::SomeValue,
        DataValueKind::String,
        DataValueKind::Quantity,
        DataValueKind::Time,
        DataValueKind::GlobeCoordinate,
        DataValueKind::MonolingualText,
        DataValueKind::WikibaseEntityId,
    ];

    /// Returns the hash-form name of this kind (e.g., "no_value").
    pub fn as_str(&self) -> &'static str {
        match self {
            DataValueKind::NoValue => "no_value",
            DataValueKind::SomeValue => "some_value",
            DataValueKind::String => "string",
            DataValueKind::Quantity => "quantity",
            DataValueKind::Time => "time",
            DataValueKind::GlobeCoordinate => "globe_coordinate",
            DataValueKind::MonolingualText => "monolingual_text",
            DataValueKind::WikibaseEntityId => "wikibase_entity_id",
        }
    }

    /// Looks up a kind by its hash-form name.
    pub fn from_name(name: &str) -> Option<DataValueKind> {
        DataValueKind::ALL.into_iter().find(|k| k.as_str() == name)
    }

    /// Returns true for "no value" and "some value".
    pub fn is_sentinel(&self) -> bool {
        matches!(self, DataValueKind::NoValue | DataValueKind::SomeValue)
    }
}

/// Time precision, from billion years (0) down to seconds (14).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum TimePrecision {
    BillionYears = 0,
    HundredMillionYears = 1,
    TenMillionYears = 2,
    MillionYears = 3,
    HundredThousandYears = 4,
    TenThousandYears = 5,
    Millennium = 6,
    Century = 7,
    Decade = 8,
    Year = 9,
    Month = 10,
    Day = 11,
    Hour = 12,
    Minute = 13,
    Second = 14,
}

impl TimePrecision {
    /// Creates a TimePrecision from its numeric representation.
    pub fn from_u8(v: u8) -> Option<TimePrecision> {
        match v {
            0 => Some(TimePrecision::BillionYears),
            1 => Some(TimePrecision::HundredMillionYears),
            2 => Some(TimePrecision::TenMillionYears),
            3 => Some(TimePrecision::MillionYears),
            4 => Some(TimePrecision::HundredThousandYears),
            5 => Some(TimePrecision::TenThousandYears),
            6 => Some(TimePrecision::Millennium),
            7 => Some(TimePrecision::Century),
            8 => Some(TimePrecision::Decade),
            9 => Some(TimePrecision::Year),
            10 => Some(TimePrecision::Month),
            11 => Some(TimePrecision::Day),
            12 => Some(TimePrecision::Hour),
            13 => Some(TimePrecision::Minute),
            14 => Some(TimePrecision::Second),
            _ => None,
        }
    }

    /// Returns the numeric representation.
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Unit string Wikibase uses for dimensionless quantities.
pub const UNITLESS: &str = "1";

/// Prefix of concept URIs for Wikidata entities.
pub const WIKIDATA_ENTITY_PREFIX: &str = "http://www.wikidata.org/entity/";

/// Proleptic Gregorian calendar model URI.
pub const GREGORIAN_CALENDAR: &str = "http://www.wikidata.org/entity/Q1985727";

/// Proleptic Julian calendar model URI.
pub const JULIAN_CALENDAR: &str = "http://www.wikidata.org/entity/Q1985786";

/// Earth, the default globe for coordinates.
pub const EARTH_GLOBE: &str = "http://www.wikidata.org/entity/Q2";

/// A decimal amount with an optional unit and uncertainty bounds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Quantity {
    /// Signed decimal string, e.g. "+10" or "-0.5".
    pub amount: String,
    /// "1" for unitless quantities, otherwise an entity URI.
    pub unit: String,
    pub upper_bound: Option<String>,
    pub lower_bound: Option<String>,
}

impl Quantity {
    /// Creates a quantity without bounds.
    pub fn new(amount: impl Into<String>, unit: impl Into<String>) -> Self {
        Quantity {
            amount: amount.into(),
            unit: unit.into(),
            upper_bound: None,
            lower_bound: None,
        }
    }

    /// Returns the unit's entity id, or None for unitless quantities.
    pub fn unit_id(&self) -> Option<EntityId> {
        if self.unit == UNITLESS {
            return None;
        }
        let (_, id) = self.unit.rsplit_once('/')?;
        EntityId::parse(id)
    }
}

/// Returns true if `s` is a Wikibase decimal: mandatory sign, digits, optional fraction.
pub fn is_decimal(s: &str) -> bool {
    let Some(unsigned) = s.strip_prefix('+').or_else(|| s.strip_prefix('-')) else {
        return false;
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };
    let all_digits = |p: &str| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit());
    all_digits(int_part) && frac_part.is_none_or(all_digits)
}

/// A point in time with precision and calendar model.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Time {
    pub time: Timestamp,
    pub precision: TimePrecision,
    /// Calendar model entity URI.
    pub calendar_model: String,
}

/// A position on a globe.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobeCoordinate {
    /// Latitude in degrees (-90 to +90).
    pub latitude: f64,
    /// Longitude in degrees (-360 to +360).
    pub longitude: f64,
    /// Precision in degrees, if known.
    pub precision: Option<f64>,
    /// Globe entity URI.
    pub globe: String,
}

/// Text in one language.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MonolingualText {
    pub text: String,
    pub language: String,
}

/// A typed value of a statement, qualifier or reference.
#[derive(Debug, Clone, PartialEq)]
pub enum DataValue {
    /// The property explicitly has no value.
    NoValue,
    /// The property has a value, but it is unknown.
    SomeValue,
    /// String-like data types (string, external-id, url, commonsMedia, ...).
    String(String),
    Quantity(Quantity),
    Time(Time),
    GlobeCoordinate(GlobeCoordinate),
    MonolingualText(MonolingualText),
    /// Reference to another entity (item, property, lexeme, ...).
    WikibaseEntityId(EntityId),
}

impl DataValue {
    /// Returns the kind of this value.
    pub fn kind(&self) -> DataValueKind {
        match self {
            DataValue::NoValue => DataValueKind::NoValue,
            DataValue::SomeValue => DataValueKind::SomeValue,
            DataValue::String(_) => DataValueKind::String,
            DataValue::Quantity(_) => DataValueKind::Quantity,
            DataValue::Time(_) => DataValueKind::Time,
            DataValue::GlobeCoordinate(_) => DataValueKind::GlobeCoordinate,
            DataValue::MonolingualText(_) => DataValueKind::MonolingualText,
            DataValue::WikibaseEntityId(_) => DataValueKind::WikibaseEntityId,
        }
    }

    /// Returns true for "no value" and "some value".
    pub fn is_sentinel(&self) -> bool {
        self.kind().is_sentinel()
    }

    /// Returns the referenced entity for entity-valued data.
    pub fn as_entity_id(&self) -> Option<&EntityId> {
        match self {
            DataValue::WikibaseEntityId(id) => Some(id),
            _ => None,
        }
    }

    /// Returns the string for string-like data.
    pub fn as_string(&self) -> Option<&str> {
        match self {
            DataValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Validates this value according to Wikibase rules.
    ///
    /// Returns an error description if invalid, None if valid.
    pub fn validate(&self) -> Option<&'static str> {
        match self {
            DataValue::Quantity(q) => {
                if !is_decimal(&q.amount) {
                    return Some("quantity amount is not a signed decimal");
                }
                if q.upper_bound.as_deref().is_some_and(|b| !is_decimal(b))
                    || q.lower_bound.as_deref().is_some_and(|b| !is_decimal(b))
                {
                    return Some("quantity bound is not a signed decimal");
                }
                if q.unit.is_empty() {
                    return Some("quantity unit is empty");
                }
            }
            DataValue::GlobeCoordinate(c) => {
                if !c.latitude.is_finite() || !c.longitude.is_finite() {
                    return Some("coordinates must be finite");
                }
                if !(-90.0..=90.0).contains(&c.latitude) {
                    return Some("latitude out of range [-90, +90]");
                }
                if !(-360.0..=360.0).contains(&c.longitude) {
                    return Some("longitude out of range [-360, +360]");
                }
                if let Some(p) = c.precision {
                    if !p.is_finite() || p <= 0.0 {
                        return Some("coordinate precision must be a positive number");
                    }
                }
            }
            DataValue::MonolingualText(m) => {
                if m.language.is_empty() {
                    return Some("monolingual text has no language");
                }
            }
            DataValue::Time(t) => {
                if t.time.month == 0 && t.precision >= TimePrecision::Month {
                    return Some("time precision finer than the timestamp's month");
                }
                if t.time.day == 0 && t.precision >= TimePrecision::Day {
                    return Some("time precision finer than the timestamp's day");
                }
            }
            _ => {}
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_type_names_roundtrip() {
        for dt in DataType::ALL {
            assert_eq!(DataType::from_name(dt.as_str()), Some(dt));
        }
        assert_eq!(DataType::from_name("novalue"), None);
        assert_eq!(DataType::from_name("bogus"), None);
    }

    #[test]
    fn test_data_type_serde_names_match() {
        for dt in DataType::ALL {
            let json = serde_json::to_value(dt).unwrap();
            assert_eq!(json, serde_json::Value::String(dt.as_str().to_string()));
        }
    }

    #[test]
    fn test_every_kind_has_a_data_type_or_is_sentinel() {
        for kind in DataValueKind::ALL {
            let covered = DataType::ALL.iter().any(|dt| dt.value_kind() == kind);
            assert!(covered || kind.is_sentinel(), "{:?}", kind);
        }
    }

    #[test]
    fn test_entity_types_only_on_entity_kinds() {
        for dt in DataType::ALL {
            assert_eq!(
                dt.entity_type().is_some(),
                dt.value_kind() == DataValueKind::WikibaseEntityId,
                "{:?}",
                dt
            );
        }
    }

    #[test]
    fn test_accepts_sentinels() {
        assert!(DataType::Time.accepts(&DataValue::NoValue));
        assert!(DataType::Time.accepts(&DataValue::SomeValue));
        assert!(!DataType::Time.accepts(&DataValue::String("x".to_string())));
        assert!(DataType::Url.accepts(&DataValue::String("https://example.org".to_string())));
    }

    #[test]
    fn test_is_decimal() {
        for ok in ["+10", "-0.5", "+0", "+1234.5678"] {
            assert!(is_decimal(ok), "{}", ok);
        }
        for bad in ["10", "+", "+.5", "+1.", "+1e5", "-1.2.3", ""] {
            assert!(!is_decimal(bad), "{}", bad);
        }
    }

    #[test]
    fn test_quantity_unit_id() {
        let q = Quantity::new("+5", "http://www.wikidata.org/entity/Q11573");
        assert_eq!(q.unit_id().unwrap().as_str(), "Q11573");
        assert!(Quantity::new("+5", UNITLESS).unit_id().is_none());
    }

    #[test]
    fn test_value_validation_coordinates() {
        let coord = |latitude, longitude, precision| {
            DataValue::GlobeCoordinate(GlobeCoordinate {
                latitude,
                longitude,
                precision,
                globe: EARTH_GLOBE.to_string(),
            })
        };
        assert!(coord(52.5, 13.4, Some(0.01)).validate().is_none());
        assert!(coord(52.5, 13.4, None).validate().is_none());
        assert!(coord(91.0, 0.0, None).validate().is_some());
        assert!(coord(0.0, 361.0, None).validate().is_some());
        assert!(coord(f64::NAN, 0.0, None).validate().is_some());
        assert!(coord(0.0, 0.0, Some(0.0)).validate().is_some());
    }

    #[test]
    fn test_value_validation_time_precision() {
        let year_only = DataValue::Time(Time {
            time: Timestamp::from_date(1952, 0, 0),
            precision: TimePrecision::Year,
            calendar_model: GREGORIAN_CALENDAR.to_string(),
        });
        assert!(year_only.validate().is_none());

        let too_precise = DataValue::Time(Time {
            time: Timestamp::from_date(1952, 0, 0),
            precision: TimePrecision::Day,
            calendar_model: GREGORIAN_CALENDAR.to_string(),
        });
        assert!(too_precise.validate().is_some());
    }

    #[test]
    fn test_time_precision_from_u8() {
        for v in 0..=14u8 {
            assert_eq!(TimePrecision::from_u8(v).unwrap().as_u8(), v);
        }
        assert_eq!(TimePrecision::from_u8(15), None);
    }
}
