//! Typed values for env, `with` and matrix attribute maps

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A scalar or list value as it appears in a workflow document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
}

/// Ordered string-keyed attribute map
pub type ValueMap = IndexMap<String, Value>;

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
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

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::String(s.clone())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Integer(n.into())
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Integer(n.into())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<&Value> for serde_yaml::Value {
    fn from(value: &Value) -> Self {
        match value {
            Value::Bool(b) => serde_yaml::Value::Bool(*b),
            Value::Integer(n) => serde_yaml::Value::Number((*n).into()),
            Value::Float(n) => serde_yaml::Value::Number((*n).into()),
            Value::String(s) => serde_yaml::Value::String(s.clone()),
            Value::List(items) => serde_yaml::Value::Sequence(items.iter().map(Into::into).collect()),
        }
    }
}

/// Build a [`ValueMap`] from key/value pairs, keeping their order
pub fn value_map<K, V, I>(pairs: I) -> ValueMap
where
    K: Into<String>,
    V: Into<Value>,
    I: IntoIterator<Item = (K, V)>,
{
    pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect()
}

/// Render an ordered map into a YAML mapping, preserving order
pub(crate) fn to_mapping(map: &ValueMap) -> serde_yaml::Mapping {
    map.iter()
        .map(|(k, v)| (serde_yaml::Value::String(k.clone()), v.into()))
        .collect()
}
