//! Data values under test.
//!
//! A [`Value`] is the candidate structure checked against a
//! [`Signature`](crate::Signature). Numbers are exact decimals: `1` and
//! `1.0` are the same number.

use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::fmt;

// ──────────────────────────────────────────────
// Kinds
// ──────────────────────────────────────────────

/// The kind tag of a value or signature node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    String,
    Number,
    Bool,
    Null,
    Absent,
    List,
    Map,
    /// Only signatures have this kind.
    Any,
}

impl Kind {
    /// Returns a human-readable kind name for diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Kind::String => "string",
            Kind::Number => "number",
            Kind::Bool => "boolean",
            Kind::Null => "null",
            Kind::Absent => "undefined",
            Kind::List => "list",
            Kind::Map => "map",
            Kind::Any => "any",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ──────────────────────────────────────────────
// Values
// ──────────────────────────────────────────────

/// A data value. `Null` and `Absent` are distinct nullish kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    String(String),
    Number(Decimal),
    Bool(bool),
    Null,
    /// An explicitly undefined value, e.g. a key present with no value.
    Absent,
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Builds a list value from anything convertible into values.
    pub fn list<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    /// Builds a mapping value from key/value pairs. Later duplicates win.
    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn kind(&self) -> Kind {
        match self {
            Value::String(_) => Kind::String,
            Value::Number(_) => Kind::Number,
            Value::Bool(_) => Kind::Bool,
            Value::Null => Kind::Null,
            Value::Absent => Kind::Absent,
            Value::List(_) => Kind::List,
            Value::Map(_) => Kind::Map,
        }
    }

    /// Looks up a key in a mapping value. Returns `None` for other kinds.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Map(entries) => entries.get(key),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(Decimal::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(Decimal::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(Decimal::from(n))
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Number(Decimal::from(n))
    }
}

impl From<Decimal> for Value {
    fn from(d: Decimal) -> Self {
        Value::Number(d)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(entries: BTreeMap<String, Value>) -> Self {
        Value::Map(entries)
    }
}

/// `None` becomes `Null`.
impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{:?}", s),
            Value::Number(d) => write!(f, "{}", d.normalize()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Null => f.write_str("null"),
            Value::Absent => f.write_str("undefined"),
            Value::List(items) => write_list(f, items),
            Value::Map(entries) => write_map(f, entries),
        }
    }
}

pub(crate) fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    f.write_str("[")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    f.write_str("]")
}

pub(crate) fn write_map<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    entries: &BTreeMap<String, T>,
) -> fmt::Result {
    if entries.is_empty() {
        return f.write_str("{}");
    }
    f.write_str("{ ")?;
    for (i, (key, item)) in entries.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{:?}: {}", key, item)?;
    }
    f.write_str(" }")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_compare_by_magnitude() {
        assert_eq!(Value::Number(Decimal::new(10, 1)), Value::from(1));
        assert_ne!(Value::from(1), Value::from(2));
    }

    #[test]
    fn null_and_absent_are_distinct() {
        assert_ne!(Value::Null, Value::Absent);
        assert_ne!(Value::Null.kind(), Value::Absent.kind());
    }

    #[test]
    fn none_becomes_null() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::from("x"));
    }

    #[test]
    fn get_only_reads_mappings() {
        let v = Value::map([("a", 1)]);
        assert_eq!(v.get("a"), Some(&Value::from(1)));
        assert_eq!(v.get("b"), None);
        assert_eq!(Value::list([1]).get("a"), None);
    }

    #[test]
    fn display_is_compact() {
        let v = Value::map([
            ("name", Value::from("test")),
            ("items", Value::list([1, 2])),
            ("gone", Value::Absent),
            ("price", Value::Number(Decimal::new(150, 2))),
        ]);
        assert_eq!(
            v.to_string(),
            r#"{ "gone": undefined, "items": [1, 2], "name": "test", "price": 1.5 }"#
        );
        assert_eq!(Value::map(Vec::<(String, Value)>::new()).to_string(), "{}");
    }
}
