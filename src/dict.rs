// src/dict.rs
//
// Ordered containers for section output.
//
// - Dict:    field name → FieldValue, insertion-ordered (the nested/JSON view).
// - FlatRow: "<TAG>:<field>" → String, insertion-ordered (the CSV view).
//
// Order matters: the CSV header is taken from the first row's keys.

use serde_json::{Map, Value};

use crate::core::ScalarValue;

#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Null,
    Scalar(ScalarValue),
    List(Vec<Dict>),
    Dict(Dict),
}

impl FieldValue {
    pub fn is_null(&self) -> bool { matches!(self, FieldValue::Null) }

    pub fn as_scalar(&self) -> Option<&ScalarValue> {
        match self { FieldValue::Scalar(v) => Some(v), _ => None }
    }

    /// Stringified JSON: scalars become strings, null stays null.
    pub fn to_string_json(&self) -> Value {
        match self {
            FieldValue::Null => Value::Null,
            FieldValue::Scalar(v) => Value::String(v.to_string()),
            FieldValue::List(items) => Value::Array(items.iter().map(Dict::to_string_json).collect()),
            FieldValue::Dict(d) => d.to_string_json(),
        }
    }
}

impl From<Option<ScalarValue>> for FieldValue {
    fn from(v: Option<ScalarValue>) -> Self {
        v.map_or(FieldValue::Null, FieldValue::Scalar)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dict {
    entries: Vec<(String, FieldValue)>,
}

impl Dict {
    pub fn new() -> Self { Self::default() }

    pub fn with(mut self, key: &str, value: impl Into<FieldValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace, keeping the original position on replace.
    pub fn insert(&mut self, key: &str, value: impl Into<FieldValue>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((s!(key), value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn to_string_json(&self) -> Value {
        let mut m = Map::new();
        for (k, v) in &self.entries {
            m.insert(k.clone(), v.to_string_json());
        }
        Value::Object(m)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FlatRow {
    cells: Vec<(String, String)>,
}

impl FlatRow {
    pub fn new() -> Self { Self::default() }

    pub fn push(&mut self, key: String, value: String) {
        self.cells.push((key, value));
    }

    pub fn extend(&mut self, other: FlatRow) {
        self.cells.extend(other.cells);
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.cells.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize { self.cells.len() }
    pub fn is_empty(&self) -> bool { self.cells.is_empty() }
}
