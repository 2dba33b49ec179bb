//! Raw result values as delivered by the brokerage SDK.
//!
//! The SDK hands back plain scalars and collections, but also foreign
//! objects. Those arrive in one of two shapes:
//!
//! | Shape    | Wire form                                                       |
//! |----------|-----------------------------------------------------------------|
//! | Object   | `{"$type": "Order", "$fields": {..}, "$private": [..], "$repr": ".."}` |
//! | Opaque   | `{"$repr": "Order { order_no: \"x1\", .. }"}`                  |
//!
//! `$private` lists the field names that must not be exposed. Field order in
//! `$fields` and in plain maps is the SDK's order and is kept.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ---------------------------------------------------------------------------
// FieldMap
// ---------------------------------------------------------------------------

/// Insertion-ordered string-keyed map of SDK values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldMap(Vec<(String, SdkValue)>);

impl FieldMap {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append an entry; an existing key is replaced in place.
    pub fn insert(&mut self, key: impl Into<String>, value: SdkValue) {
        let key = key.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&SdkValue> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SdkValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, SdkValue)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (K, SdkValue)>>(iter: I) -> Self {
        let mut map = FieldMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl Serialize for FieldMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

struct FieldMapVisitor;

impl<'de> Visitor<'de> for FieldMapVisitor {
    type Value = FieldMap;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of SDK values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<FieldMap, A::Error> {
        let mut map = FieldMap::new();
        while let Some((k, v)) = access.next_entry::<String, SdkValue>()? {
            map.insert(k, v);
        }
        Ok(map)
    }
}

impl<'de> Deserialize<'de> for FieldMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(FieldMapVisitor)
    }
}

// ---------------------------------------------------------------------------
// Foreign objects
// ---------------------------------------------------------------------------

/// A foreign object whose fields are accessible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SdkObject {
    #[serde(rename = "$type")]
    pub type_name: String,

    #[serde(rename = "$fields", default)]
    pub fields: FieldMap,

    /// Field names excluded from normalized output.
    #[serde(rename = "$private", default, skip_serializing_if = "Vec::is_empty")]
    pub private: Vec<String>,

    /// Debug representation, used when `fields` is empty.
    #[serde(rename = "$repr", default, skip_serializing_if = "Option::is_none")]
    pub repr: Option<String>,
}

impl SdkObject {
    pub fn new(type_name: impl Into<String>, fields: FieldMap) -> Self {
        Self { type_name: type_name.into(), fields, private: Vec::new(), repr: None }
    }

    pub fn is_private(&self, name: &str) -> bool {
        self.private.iter().any(|p| p == name)
    }

    /// Public field lookup.
    pub fn field(&self, name: &str) -> Option<&SdkValue> {
        if self.is_private(name) { None } else { self.fields.get(name) }
    }
}

/// A foreign handle that exposes nothing but its debug text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OpaqueHandle {
    #[serde(rename = "$repr")]
    pub repr: String,
}

// ---------------------------------------------------------------------------
// SdkValue
// ---------------------------------------------------------------------------

/// Any value the SDK can return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SdkValue {
    Null,
    Bool(bool),
    Int(i64),
    /// Integers above `i64::MAX`.
    UInt(u64),
    Float(f64),
    Str(String),
    List(Vec<SdkValue>),
    Object(SdkObject),
    Opaque(OpaqueHandle),
    Map(FieldMap),
}

impl SdkValue {
    /// Look up a public member by name on objects and maps.
    pub fn get(&self, name: &str) -> Option<&SdkValue> {
        match self {
            Self::Object(obj) => obj.field(name),
            Self::Map(map) => map.get(name),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[SdkValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Items of the `data` member of a list-bearing result object.
    ///
    /// Empty when the result carries no `data` list.
    pub fn data_items(&self) -> &[SdkValue] {
        self.get("data").and_then(SdkValue::as_list).unwrap_or(&[])
    }
}

impl From<serde_json::Value> for SdkValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => match (n.as_i64(), n.as_u64()) {
                (Some(i), _) => Self::Int(i),
                (None, Some(u)) => Self::UInt(u),
                _ => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => Self::Str(s),
            Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => Self::Map(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect()),
        }
    }
}

impl From<&str> for SdkValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<i64> for SdkValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}
