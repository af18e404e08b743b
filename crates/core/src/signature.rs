//! Signatures: the partial shapes values are checked against.

use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::fmt;

use crate::value::{write_list, write_map, Kind, Value};

/// The wildcard: accepts any value, including `Null` and `Absent`.
pub const ANY: Signature = Signature::Any;

/// An expected shape.
///
/// Mappings constrain only the keys they declare. Lists are compared
/// elementwise with exact length. Primitives compare by kind and content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signature {
    /// Wildcard. No [`Value`] converts into this variant.
    Any,
    String(String),
    Number(Decimal),
    Bool(bool),
    Null,
    Absent,
    List(Vec<Signature>),
    Map(BTreeMap<String, Signature>),
}

impl Signature {
    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Signature>,
    {
        Signature::List(items.into_iter().map(Into::into).collect())
    }

    pub fn map<I, K, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, S)>,
        K: Into<String>,
        S: Into<Signature>,
    {
        Signature::Map(
            entries
                .into_iter()
                .map(|(k, s)| (k.into(), s.into()))
                .collect(),
        )
    }

    pub fn kind(&self) -> Kind {
        match self {
            Signature::Any => Kind::Any,
            Signature::String(_) => Kind::String,
            Signature::Number(_) => Kind::Number,
            Signature::Bool(_) => Kind::Bool,
            Signature::Null => Kind::Null,
            Signature::Absent => Kind::Absent,
            Signature::List(_) => Kind::List,
            Signature::Map(_) => Kind::Map,
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Signature::Any)
    }
}

/// Lifts a value into the signature that accepts it exactly
/// (mapping keys still use subset semantics).
impl From<Value> for Signature {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => Signature::String(s),
            Value::Number(d) => Signature::Number(d),
            Value::Bool(b) => Signature::Bool(b),
            Value::Null => Signature::Null,
            Value::Absent => Signature::Absent,
            Value::List(items) => Signature::List(items.into_iter().map(Into::into).collect()),
            Value::Map(entries) => {
                Signature::Map(entries.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

macro_rules! lift_from {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for Signature {
                fn from(v: $t) -> Self {
                    Signature::from(Value::from(v))
                }
            }
        )*
    };
}

lift_from!(&str, String, bool, i32, i64, u32, u64, Decimal);

impl From<Vec<Signature>> for Signature {
    fn from(items: Vec<Signature>) -> Self {
        Signature::List(items)
    }
}

impl From<BTreeMap<String, Signature>> for Signature {
    fn from(entries: BTreeMap<String, Signature>) -> Self {
        Signature::Map(entries)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signature::Any => f.write_str("<any>"),
            Signature::String(s) => write!(f, "{:?}", s),
            Signature::Number(d) => write!(f, "{}", d.normalize()),
            Signature::Bool(b) => write!(f, "{}", b),
            Signature::Null => f.write_str("null"),
            Signature::Absent => f.write_str("undefined"),
            Signature::List(items) => write_list(f, items),
            Signature::Map(entries) => write_map(f, entries),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifting_preserves_structure() {
        let v = Value::map([
            ("a", Value::list([Value::from(1), Value::Null])),
            ("b", Value::Absent),
        ]);
        let expected = Signature::map([
            ("a", Signature::list([Signature::from(1), Signature::Null])),
            ("b", Signature::Absent),
        ]);
        assert_eq!(Signature::from(v), expected);
    }

    #[test]
    fn wildcard_is_never_produced_by_lifting() {
        for v in [Value::Null, Value::Absent, Value::from("any"), Value::list([1])] {
            assert!(!Signature::from(v).is_any());
        }
        assert!(ANY.is_any());
        assert_eq!(ANY.kind(), Kind::Any);
    }

    #[test]
    fn display_marks_wildcard() {
        let sig = Signature::map([("data", ANY), ("n", Signature::from(42))]);
        assert_eq!(sig.to_string(), r#"{ "data": <any>, "n": 42 }"#);
    }
}
