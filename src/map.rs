//! Single-level key/value documents that are written as `NULL` when they are empty.

use std::collections::BTreeMap;
use std::ops::{Deref, DerefMut};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value as JsonValue;

use crate::error::{Error, Result};
use crate::value::DriverValue;

/// A map persisted as a JSON object, written as `NULL` (database) and `null` (JSON) when it
/// is empty.
///
/// Reading `NULL`, an empty payload or `null` produces an empty map; a `Map` is always
/// usable as-is, there is no separate "unset" state.
///
/// `V` defaults to [`serde_json::Value`], which accepts any JSON value. Narrow it to have
/// values type-checked when the map is read:
///
/// ```rust
/// use zeronull::Map;
///
/// let counts: Map<i64> = zeronull::map::unmarshal_map(br#"{"a":1,"b":2}"#).unwrap();
/// assert_eq!(counts["b"], 2);
///
/// assert!(zeronull::map::unmarshal_map::<i64>(br#"{"a":"one"}"#).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Map<V = JsonValue>(BTreeMap<String, V>);

impl<V> Map<V> {
    pub fn new() -> Self {
        Map(BTreeMap::new())
    }

    pub fn into_inner(self) -> BTreeMap<String, V> {
        self.0
    }
}

impl Map<JsonValue> {
    /// Returns the value for `key`, or `default` if it is missing or `null`.
    pub fn get_or<'a>(&'a self, key: &str, default: &'a JsonValue) -> &'a JsonValue {
        match self.0.get(key) {
            None | Some(JsonValue::Null) => default,
            Some(value) => value,
        }
    }

    /// Returns the string value for `key`, or `default` if it is missing or not a string.
    pub fn get_str_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.0
            .get(key)
            .and_then(JsonValue::as_str)
            .unwrap_or(default)
    }
}

impl<V> Default for Map<V> {
    fn default() -> Self {
        Map::new()
    }
}

impl<V> Deref for Map<V> {
    type Target = BTreeMap<String, V>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<V> DerefMut for Map<V> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<V> From<BTreeMap<String, V>> for Map<V> {
    fn from(map: BTreeMap<String, V>) -> Self {
        Map(map)
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for Map<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Map(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl<V> IntoIterator for Map<V> {
    type Item = (String, V);
    type IntoIter = std::collections::btree_map::IntoIter<String, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

fn parse<V: DeserializeOwned>(raw: &[u8]) -> Result<Map<V>> {
    let map: Option<BTreeMap<String, V>> = serde_json::from_slice(raw)?;

    Ok(Map(map.unwrap_or_default()))
}

/// Reads a map from a driver value holding a JSON object.
///
/// `NULL`, empty text or bytes, and the document `null` all produce an empty map.
pub fn scan_map<V: DeserializeOwned>(value: DriverValue<'_>) -> Result<Map<V>> {
    let raw = match &value {
        DriverValue::Null => return Ok(Map::new()),
        DriverValue::Text(_) | DriverValue::Bytes(_) => value.as_bytes().unwrap_or_default(),
        other => return Err(Error::mismatch(other.kind(), "map")),
    };

    if raw.is_empty() {
        tracing::trace!("scanned empty payload as empty map");
        return Ok(Map::new());
    }

    parse(raw)
}

/// Converts a map to a driver value: `NULL` if it is empty, otherwise its JSON encoding.
pub fn map_value<V: Serialize>(value: &Map<V>) -> Result<DriverValue<'static>> {
    if value.is_empty() {
        return Ok(DriverValue::Null);
    }

    Ok(DriverValue::from(serde_json::to_vec(&value.0)?))
}

/// Decodes a map from a JSON object; `null` and empty input produce an empty map.
pub fn unmarshal_map<V: DeserializeOwned>(bytes: &[u8]) -> Result<Map<V>> {
    if bytes.is_empty() {
        tracing::trace!("unmarshalled empty payload as empty map");
        return Ok(Map::new());
    }

    parse(bytes)
}

/// Encodes a map as a JSON object, or `null` if it is empty.
pub fn marshal_map<V: Serialize>(value: &Map<V>) -> Result<Vec<u8>> {
    if value.is_empty() {
        return Ok(b"null".to_vec());
    }

    Ok(serde_json::to_vec(&value.0)?)
}

impl<V: Serialize> Serialize for Map<V> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if self.0.is_empty() {
            serializer.serialize_none()
        } else {
            self.0.serialize(serializer)
        }
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for Map<V> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let map = Option::<BTreeMap<String, V>>::deserialize(deserializer)?;

        Ok(Map(map.unwrap_or_default()))
    }
}
