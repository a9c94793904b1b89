//! The untyped values an input document can carry.

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;
use std::io::Read;

use num_bigint::BigInt;
use serde_json::{Map, Number, Value};

/// A single value taken from an input document.
///
/// The set of kinds is closed: every consumer matches on it exhaustively, so a
/// new kind cannot slip past conversion code unnoticed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RawValue {
    /// A number written without fraction or exponent. Exact at any size.
    Integer(BigInt),
    /// Any other number, as the decimal lexeme serde_json renders for it.
    /// Digits are kept but the exponent is normalized (`1E3` becomes `1e+3`).
    /// Whether it is integral is decided by the consumer.
    Fractional(String),
    Boolean(bool),
    Null,
    String(String),
    Array(Vec<RawValue>),
    Object(BTreeMap<String, RawValue>),
}

/// The kind of a [`RawValue`], used when reporting what was found where
/// something else was expected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Integer,
    Fractional,
    Boolean,
    Null,
    String,
    Array,
    Object,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Integer => "integer",
            ValueKind::Fractional => "fractional number",
            ValueKind::Boolean => "boolean",
            ValueKind::Null => "null",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        };
        f.write_str(name)
    }
}

impl RawValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            RawValue::Integer(_) => ValueKind::Integer,
            RawValue::Fractional(_) => ValueKind::Fractional,
            RawValue::Boolean(_) => ValueKind::Boolean,
            RawValue::Null => ValueKind::Null,
            RawValue::String(_) => ValueKind::String,
            RawValue::Array(_) => ValueKind::Array,
            RawValue::Object(_) => ValueKind::Object,
        }
    }

    /// Returns `true` for arrays and objects.
    pub fn is_nested(&self) -> bool {
        matches!(self, RawValue::Array(_) | RawValue::Object(_))
    }
}

fn number_to_raw(number: Number) -> RawValue {
    // With `arbitrary_precision` the digits survive `Display`; only the
    // exponent marker is rewritten.
    let lexeme = number.to_string();
    if lexeme.contains(['.', 'e', 'E']) {
        return RawValue::Fractional(lexeme);
    }
    match lexeme.parse::<BigInt>() {
        Ok(n) => RawValue::Integer(n),
        Err(_) => RawValue::Fractional(lexeme),
    }
}

fn object_to_raw(map: Map<String, Value>) -> BTreeMap<String, RawValue> {
    map.into_iter()
        .map(|(k, v)| (k, RawValue::from(v)))
        .collect()
}

impl From<Value> for RawValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => RawValue::Null,
            Value::Bool(b) => RawValue::Boolean(b),
            Value::Number(n) => number_to_raw(n),
            Value::String(s) => RawValue::String(s),
            Value::Array(items) => RawValue::Array(items.into_iter().map(RawValue::from).collect()),
            Value::Object(map) => RawValue::Object(object_to_raw(map)),
        }
    }
}

/// The top-level object of an input document: variable name to value.
///
/// A record has no mutating API. Lookups are by name; iteration is in key
/// order, which callers needing a specific order must not rely on.
///
/// A key repeated in the document keeps its last value, so `{"X": 1, "X": 2}`
/// yields `X = 2`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawRecord {
    fields: BTreeMap<String, RawValue>,
}

impl RawRecord {
    /// Parses a JSON object held in memory.
    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        let map: Map<String, Value> = serde_json::from_str(s)?;
        Ok(map.into())
    }

    /// Parses a JSON object from `reader`, consuming it to the end.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, serde_json::Error> {
        let map: Map<String, Value> = serde_json::from_reader(reader)?;
        Ok(map.into())
    }

    pub fn get(&self, name: &str) -> Option<&RawValue> {
        self.fields.get(name)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, RawValue> {
        self.fields.iter()
    }
}

impl From<Map<String, Value>> for RawRecord {
    fn from(map: Map<String, Value>) -> Self {
        RawRecord {
            fields: object_to_raw(map),
        }
    }
}

impl FromIterator<(String, RawValue)> for RawRecord {
    fn from_iter<I: IntoIterator<Item = (String, RawValue)>>(iter: I) -> Self {
        RawRecord {
            fields: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RawRecord {
    type Item = (&'a String, &'a RawValue);
    type IntoIter = btree_map::Iter<'a, String, RawValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
