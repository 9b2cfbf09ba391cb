//! # Tagged value tree
//!
//! Closed set of shapes the diff engine dispatches on:
//!
//! - [`Value::Scalar`]: null, bool, number or string
//! - [`Value::Sequence`]: an anonymous array, compared as a whole
//! - [`Value::List`]: an ordered collection of maps identified by their `id`
//! - [`Value::Map`]: string-keyed map with sorted keys
//!
//! Values serialize as plain JSON. When reading JSON, an array whose elements
//! are all objects with a unique string `id` becomes a keyed list; an empty
//! array is an empty keyed list; every other array is a sequence.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Key that carries an item's identity inside a keyed list
pub const ID_KEY: &str = "id";

#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "serde_json::Value", into = "serde_json::Value")]
pub enum Value {
    Scalar(Scalar),
    Sequence(Vec<Value>),
    List(KeyedList),
    Map(BTreeMap<String, Value>),
}

impl Value {
    pub fn null() -> Self {
        Value::Scalar(Scalar::Null)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Value::Scalar(_) => "scalar",
            Value::Sequence(_) => "sequence",
            Value::List(_) => "keyed list",
            Value::Map(_) => "map",
        }
    }

    /// Child addressed by one path segment: a map key or a keyed-list id
    pub fn get(&self, segment: &str) -> Option<&Value> {
        match self {
            Value::Map(map) => map.get(segment),
            Value::List(list) => list.get(segment),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, segment: &str) -> Option<&mut Value> {
        match self {
            Value::Map(map) => map.get_mut(segment),
            Value::List(list) => list.get_mut(segment),
            _ => None,
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self, Value::Map(_) | Value::List(_))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Scalar(Scalar::String(value.to_string()))
    }
}

/// Ordered collection of identity-bearing items
///
/// Each item is stored with its id; the item value itself still contains the
/// `id` key so it serializes back to the original object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyedList {
    items: Vec<(String, Value)>,
}

impl KeyedList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&str, &Value)> + ExactSizeIterator {
        self.items.iter().map(|(id, value)| (id.as_str(), value))
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|(id, _)| id.as_str())
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|(item_id, _)| item_id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn get(&self, id: &str) -> Option<&Value> {
        self.items
            .iter()
            .find(|(item_id, _)| item_id == id)
            .map(|(_, value)| value)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Value> {
        self.items
            .iter_mut()
            .find(|(item_id, _)| item_id == id)
            .map(|(_, value)| value)
    }

    /// Replace the item in place when the id exists, otherwise insert it at
    /// `index` (clamped to the list length) or append.
    pub fn upsert(&mut self, id: impl Into<String>, value: Value, index: Option<usize>) {
        let id = id.into();
        if let Some(existing) = self.get_mut(&id) {
            *existing = value;
            return;
        }
        let at = index.map_or(self.items.len(), |i| i.min(self.items.len()));
        self.items.insert(at, (id, value));
    }

    pub fn remove(&mut self, id: &str) -> Option<Value> {
        let pos = self.position(id)?;
        Some(self.items.remove(pos).1)
    }

    /// Build a keyed list when every item is an object with a unique string
    /// id; hands the items back untouched otherwise.
    fn try_from_json(items: Vec<serde_json::Value>) -> Result<Self, Vec<serde_json::Value>> {
        let mut seen = HashSet::new();
        let keyed = items.iter().all(|item| {
            item.get(ID_KEY)
                .and_then(serde_json::Value::as_str)
                .map_or(false, |id| seen.insert(id.to_string()))
        });
        if !keyed {
            return Err(items);
        }

        let items = items
            .into_iter()
            .map(|item| {
                let id = item
                    .get(ID_KEY)
                    .and_then(serde_json::Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                (id, Value::from(item))
            })
            .collect();
        Ok(Self { items })
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        use serde_json::Value as Json;

        match json {
            Json::Null => Value::Scalar(Scalar::Null),
            Json::Bool(b) => Value::Scalar(Scalar::Bool(b)),
            Json::Number(n) => Value::Scalar(Scalar::Number(n)),
            Json::String(s) => Value::Scalar(Scalar::String(s)),
            Json::Array(items) => match KeyedList::try_from_json(items) {
                Ok(list) => Value::List(list),
                Err(items) => Value::Sequence(items.into_iter().map(Value::from).collect()),
            },
            Json::Object(map) => {
                Value::Map(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        use serde_json::Value as Json;

        match value {
            Value::Scalar(Scalar::Null) => Json::Null,
            Value::Scalar(Scalar::Bool(b)) => Json::Bool(b),
            Value::Scalar(Scalar::Number(n)) => Json::Number(n),
            Value::Scalar(Scalar::String(s)) => Json::String(s),
            Value::Sequence(items) => Json::Array(items.into_iter().map(Json::from).collect()),
            Value::List(list) => {
                Json::Array(list.items.into_iter().map(|(_, v)| Json::from(v)).collect())
            }
            Value::Map(map) => Json::Object(map.into_iter().map(|(k, v)| (k, Json::from(v))).collect()),
        }
    }
}
