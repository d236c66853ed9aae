//! Pre-serialized JSON that is written as `NULL` when it is empty or `null`.
//!
//! Unlike [`Map`](crate::Map), a [`Json`] is never decoded into a structure: it holds the
//! document exactly as it was read, which makes it suitable for arrays, scalars or objects of
//! any depth that the application only passes along.

use std::borrow::Cow;
use std::fmt;

use serde::de::{DeserializeOwned, IgnoredAny};
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::value::RawValue;

use crate::error::{Error, Result};
use crate::value::DriverValue;

const NULL: &[u8] = b"null";

/// A raw JSON document that is written as `NULL` (database) and `null` (JSON) when it is empty
/// or holds the literal `null`.
///
/// Anything read back from the database or from JSON is never empty: the absence of a value
/// is always represented by the canonical `null` document.
#[derive(Default, Clone, PartialEq, Eq, Hash)]
pub struct Json(Vec<u8>);

impl Json {
    /// The canonical null document, `null`.
    pub fn null() -> Self {
        Json(NULL.to_vec())
    }

    /// Serializes `value` into a new document.
    pub fn from_value<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        Ok(Json(serde_json::to_vec(value)?))
    }

    /// Whether this document is empty or exactly `null`.
    pub fn is_null(&self) -> bool {
        is_null(&self.0)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Parses the document as `T`; a null document is parsed as JSON `null`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        if self.0.is_empty() {
            return Ok(serde_json::from_slice(NULL)?);
        }

        Ok(serde_json::from_slice(&self.0)?)
    }
}

impl fmt::Debug for Json {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Json")
            .field(&String::from_utf8_lossy(&self.0))
            .finish()
    }
}

impl AsRef<[u8]> for Json {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for Json {
    fn from(bytes: Vec<u8>) -> Self {
        Json(bytes)
    }
}

impl From<&[u8]> for Json {
    fn from(bytes: &[u8]) -> Self {
        Json(bytes.to_vec())
    }
}

impl From<String> for Json {
    fn from(text: String) -> Self {
        Json(text.into_bytes())
    }
}

impl From<&str> for Json {
    fn from(text: &str) -> Self {
        Json(text.as_bytes().to_vec())
    }
}

impl From<serde_json::Value> for Json {
    fn from(value: serde_json::Value) -> Self {
        // `Value` always renders; its keys are strings.
        Json(value.to_string().into_bytes())
    }
}

/// Whether `bytes` is empty or exactly `null`.
pub fn is_null(bytes: &[u8]) -> bool {
    bytes.is_empty() || bytes == NULL
}

/// Reads a JSON document from a driver value.
///
/// `NULL` and empty text or bytes become the canonical `null` document; anything else must be
/// valid JSON.
pub fn scan_json(value: DriverValue<'_>) -> Result<Json> {
    let raw = match value {
        DriverValue::Null => return Ok(Json::null()),
        DriverValue::Text(text) => match text {
            Cow::Borrowed(text) => Cow::Borrowed(text.as_bytes()),
            Cow::Owned(text) => Cow::Owned(text.into_bytes()),
        },
        DriverValue::Bytes(bytes) => bytes,
        other => return Err(Error::mismatch(other.kind(), "JSON")),
    };

    if raw.is_empty() {
        tracing::trace!("scanned empty payload as null JSON");
        return Ok(Json::null());
    }

    validate(&raw)?;

    Ok(Json(raw.into_owned()))
}

fn validate(raw: &[u8]) -> Result<()> {
    serde_json::from_slice::<IgnoredAny>(raw)
        .map(drop)
        .map_err(|err| {
            tracing::debug!(error = %err, "rejecting scanned JSON");
            Error::InvalidJson(err)
        })
}

/// Converts a JSON document to a driver value: `NULL` if it [is null](is_null), otherwise the
/// raw bytes, unchanged.
pub fn json_value(value: &Json) -> DriverValue<'_> {
    if value.is_null() {
        DriverValue::Null
    } else {
        DriverValue::Bytes(Cow::Borrowed(&value.0))
    }
}

/// Captures a JSON document as-is. The input must be valid JSON; `null` is kept as `null`.
pub fn unmarshal_json(bytes: &[u8]) -> Result<Json> {
    let raw: Box<RawValue> = serde_json::from_slice(bytes)?;

    Ok(Json::from(raw.get()))
}

/// Returns the raw document, or `null` if it is empty.
pub fn marshal_json(value: &Json) -> Result<Vec<u8>> {
    if value.0.is_empty() {
        return Ok(NULL.to_vec());
    }

    Ok(value.0.clone())
}

impl Serialize for Json {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if self.0.is_empty() {
            return serializer.serialize_none();
        }

        let raw: &RawValue = serde_json::from_slice(&self.0).map_err(S::Error::custom)?;

        raw.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Json {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Box::<RawValue>::deserialize(deserializer)?;

        Ok(Json::from(raw.get()))
    }
}
