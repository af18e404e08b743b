//! JSON interchange for values and signatures.
//!
//! Plain JSON maps onto values directly. Two object forms are reserved:
//!
//! - A directive, `{"$match": "any"}` or `{"$match": "absent"}`: an object
//!   with exactly one key, the directive key, holding a string.
//! - A literal escape, `{"$literal": <json>}`: its payload is taken at face
//!   value, so an object payload is always a mapping. Its entries are read
//!   with the usual rules.
//!
//! The directive key is configurable through [`DirectiveReader::new`].
//!
//! Numbers keep their decimal text in both directions, so `0.1` and
//! `0.10000000000000000001` stay distinct.

use rust_decimal::Decimal;
use serde_json::{Map, Number};
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::error::ConvertError;
use crate::mismatch::{Path, Step};
use crate::signature::Signature;
use crate::value::Value;

pub const DEFAULT_DIRECTIVE_KEY: &str = "$match";
pub const LITERAL_KEY: &str = "$literal";

const DIRECTIVE_ANY: &str = "any";
const DIRECTIVE_ABSENT: &str = "absent";

/// Reads values and signatures from JSON, and writes values back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveReader {
    key: String,
}

impl Default for DirectiveReader {
    fn default() -> Self {
        DirectiveReader::new(DEFAULT_DIRECTIVE_KEY)
    }
}

/// A JSON node classified by the directive rules.
enum Node<'j> {
    Any,
    Absent,
    Number(Decimal),
    String(String),
    Bool(bool),
    Null,
    Array(&'j [serde_json::Value]),
    Object(&'j Map<String, serde_json::Value>),
}

impl DirectiveReader {
    pub fn new(key: impl Into<String>) -> Self {
        DirectiveReader { key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Reads a data value. The `absent` directive is allowed, `any` is not.
    pub fn read_value(&self, json: &serde_json::Value) -> Result<Value, ConvertError> {
        let mut trail = Vec::new();
        self.value_at(json, &mut trail)
    }

    /// Reads a signature. Both directives are allowed.
    pub fn read_signature(&self, json: &serde_json::Value) -> Result<Signature, ConvertError> {
        let mut trail = Vec::new();
        self.signature_at(json, &mut trail)
    }

    /// Writes a value as JSON. `Absent` becomes the `absent` directive and
    /// mappings that would read back as a directive are wrapped in a literal.
    pub fn write_value(&self, value: &Value) -> serde_json::Value {
        match value {
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Number(d) => write_number(*d),
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Null => serde_json::Value::Null,
            Value::Absent => self.directive(DIRECTIVE_ABSENT),
            Value::List(items) => {
                serde_json::Value::Array(items.iter().map(|v| self.write_value(v)).collect())
            }
            Value::Map(entries) => {
                let obj: Map<String, serde_json::Value> = entries
                    .iter()
                    .map(|(k, v)| (k.clone(), self.write_value(v)))
                    .collect();
                if self.is_reserved(&obj) {
                    let mut wrapper = Map::new();
                    wrapper.insert(LITERAL_KEY.to_string(), serde_json::Value::Object(obj));
                    serde_json::Value::Object(wrapper)
                } else {
                    serde_json::Value::Object(obj)
                }
            }
        }
    }

    fn directive(&self, name: &str) -> serde_json::Value {
        let mut obj = Map::new();
        obj.insert(self.key.clone(), serde_json::Value::String(name.to_string()));
        serde_json::Value::Object(obj)
    }

    fn is_reserved(&self, obj: &Map<String, serde_json::Value>) -> bool {
        obj.len() == 1 && (obj.contains_key(LITERAL_KEY) || self.directive_name(obj).is_some())
    }

    fn directive_name<'j>(&self, obj: &'j Map<String, serde_json::Value>) -> Option<&'j str> {
        if obj.len() != 1 {
            return None;
        }
        obj.get(&self.key).and_then(|v| v.as_str())
    }

    fn classify<'j>(
        &self,
        json: &'j serde_json::Value,
        trail: &[Step<'_>],
    ) -> Result<Node<'j>, ConvertError> {
        let serde_json::Value::Object(obj) = json else {
            return face_value(json, trail);
        };
        if let (1, Some(payload)) = (obj.len(), obj.get(LITERAL_KEY)) {
            return face_value(payload, trail);
        }
        match self.directive_name(obj) {
            None => Ok(Node::Object(obj)),
            Some(DIRECTIVE_ANY) => Ok(Node::Any),
            Some(DIRECTIVE_ABSENT) => Ok(Node::Absent),
            Some(other) => Err(ConvertError::UnknownDirective {
                path: Path::from_steps(trail),
                name: other.to_string(),
            }),
        }
    }

    fn value_at<'j>(
        &self,
        json: &'j serde_json::Value,
        trail: &mut Vec<Step<'j>>,
    ) -> Result<Value, ConvertError> {
        Ok(match self.classify(json, trail)? {
            Node::Any => {
                return Err(ConvertError::WildcardInValue {
                    path: Path::from_steps(trail),
                })
            }
            Node::Absent => Value::Absent,
            Node::Number(d) => Value::Number(d),
            Node::String(s) => Value::String(s),
            Node::Bool(b) => Value::Bool(b),
            Node::Null => Value::Null,
            Node::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    trail.push(Step::Index(i));
                    out.push(self.value_at(item, trail)?);
                    trail.pop();
                }
                Value::List(out)
            }
            Node::Object(obj) => {
                let mut out = BTreeMap::new();
                for (k, item) in obj {
                    trail.push(Step::Key(k));
                    out.insert(k.clone(), self.value_at(item, trail)?);
                    trail.pop();
                }
                Value::Map(out)
            }
        })
    }

    fn signature_at<'j>(
        &self,
        json: &'j serde_json::Value,
        trail: &mut Vec<Step<'j>>,
    ) -> Result<Signature, ConvertError> {
        Ok(match self.classify(json, trail)? {
            Node::Any => Signature::Any,
            Node::Absent => Signature::Absent,
            Node::Number(d) => Signature::Number(d),
            Node::String(s) => Signature::String(s),
            Node::Bool(b) => Signature::Bool(b),
            Node::Null => Signature::Null,
            Node::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    trail.push(Step::Index(i));
                    out.push(self.signature_at(item, trail)?);
                    trail.pop();
                }
                Signature::List(out)
            }
            Node::Object(obj) => {
                let mut out = BTreeMap::new();
                for (k, item) in obj {
                    trail.push(Step::Key(k));
                    out.insert(k.clone(), self.signature_at(item, trail)?);
                    trail.pop();
                }
                Signature::Map(out)
            }
        })
    }
}

/// Classifies a node without looking for directives or literal escapes.
fn face_value<'j>(
    json: &'j serde_json::Value,
    trail: &[Step<'_>],
) -> Result<Node<'j>, ConvertError> {
    Ok(match json {
        serde_json::Value::Null => Node::Null,
        serde_json::Value::Bool(b) => Node::Bool(*b),
        serde_json::Value::String(s) => Node::String(s.clone()),
        serde_json::Value::Number(n) => Node::Number(read_number(n, trail)?),
        serde_json::Value::Array(items) => Node::Array(items),
        serde_json::Value::Object(obj) => Node::Object(obj),
    })
}

fn read_number(n: &Number, trail: &[Step<'_>]) -> Result<Decimal, ConvertError> {
    let text = n.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| ConvertError::InvalidNumber {
            path: Path::from_steps(trail),
            text,
        })
}

fn write_number(d: Decimal) -> serde_json::Value {
    let text = d.normalize().to_string();
    match Number::from_str(&text) {
        Ok(n) => serde_json::Value::Number(n),
        Err(_) => serde_json::Value::String(text),
    }
}

impl Value {
    /// Reads a value from JSON using the default directive key.
    pub fn from_json(json: &serde_json::Value) -> Result<Value, ConvertError> {
        DirectiveReader::default().read_value(json)
    }

    /// Writes this value as JSON using the default directive key.
    pub fn to_json(&self) -> serde_json::Value {
        DirectiveReader::default().write_value(self)
    }
}

impl Signature {
    /// Reads a signature from JSON using the default directive key.
    pub fn from_json(json: &serde_json::Value) -> Result<Signature, ConvertError> {
        DirectiveReader::default().read_signature(json)
    }
}
