//! Strings that are written as `NULL` when they are empty.
//!
//! The functions here are generic over [`StringLike`] so they can back any string newtype;
//! see [`impl_null_string!`](crate::impl_null_string).

use std::borrow::Cow;
use std::str;

use serde::{Deserialize, Deserializer, Serializer};

use crate::error::{Error, Result};
use crate::value::DriverValue;

/// A string, or a newtype around one, that can carry the empty-means-null convention.
pub trait StringLike: Sized {
    fn from_string(value: String) -> Self;

    fn as_str(&self) -> &str;

    fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }
}

impl StringLike for String {
    fn from_string(value: String) -> Self {
        value
    }

    fn as_str(&self) -> &str {
        self
    }
}

/// A `String` that is written as `NULL` (database) and `null` (JSON) when it is empty.
///
/// `NULL` and `null` are read back as `""`.
#[derive(Debug, Default, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Str(pub String);

impl_null_string!(Str);

impl Str {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Str {
    fn from(value: String) -> Self {
        Str(value)
    }
}

impl From<&str> for Str {
    fn from(value: &str) -> Self {
        Str(value.to_owned())
    }
}

impl From<Str> for String {
    fn from(value: Str) -> Self {
        value.0
    }
}

impl std::fmt::Display for Str {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reads a string from a driver value, using `""` for `NULL`.
///
/// Numbers are rendered in decimal, the way a driver reads a number out as text.
pub fn scan_string<T: StringLike>(value: DriverValue<'_>) -> Result<T> {
    let value = match value {
        DriverValue::Null => String::new(),
        DriverValue::Text(text) => text.into_owned(),
        DriverValue::Bytes(Cow::Owned(bytes)) => {
            String::from_utf8(bytes).map_err(|err| Error::Utf8(err.utf8_error()))?
        }
        DriverValue::Bytes(Cow::Borrowed(bytes)) => str::from_utf8(bytes)?.to_owned(),
        DriverValue::Int(value) => value.to_string(),
        DriverValue::Float(value) => value.to_string(),
    };

    Ok(T::from_string(value))
}

/// Converts a string to a driver value, using `NULL` for `""`.
pub fn string_value<T: StringLike>(value: &T) -> DriverValue<'_> {
    if value.is_empty() {
        DriverValue::Null
    } else {
        DriverValue::Text(Cow::Borrowed(value.as_str()))
    }
}

/// Decodes a string from JSON, using `""` for `null`.
///
/// A JSON `""` also decodes to `""`; it will be encoded as `null` again.
pub fn unmarshal_string<T: StringLike>(bytes: &[u8]) -> Result<T> {
    let value: Option<String> = serde_json::from_slice(bytes)?;

    Ok(T::from_string(value.unwrap_or_default()))
}

/// Encodes a string as JSON, using `null` for `""`.
pub fn marshal_string<T: StringLike>(value: &T) -> Result<Vec<u8>> {
    if value.is_empty() {
        return Ok(b"null".to_vec());
    }

    Ok(serde_json::to_vec(value.as_str())?)
}

/// Serializes a string, writing `""` as `null`.
///
/// For use with `#[serde(with = "zeronull::string")]`.
pub fn serialize<T, S>(value: &T, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    T: StringLike,
    S: Serializer,
{
    if value.is_empty() {
        serializer.serialize_none()
    } else {
        serializer.serialize_str(value.as_str())
    }
}

/// Deserializes a string, reading `null` as `""`.
pub fn deserialize<'de, T, D>(deserializer: D) -> std::result::Result<T, D::Error>
where
    T: StringLike,
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;

    Ok(T::from_string(value.unwrap_or_default()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_scans_null_as_empty() {
        assert_eq!(scan_string::<Str>(DriverValue::Null).unwrap(), Str::NULL);
        assert_eq!(scan_string::<String>(DriverValue::Null).unwrap(), "");
    }

    #[test]
    fn it_scans_text_and_bytes() {
        let text = DriverValue::Text(Cow::Borrowed("foo"));
        assert_eq!(scan_string::<Str>(text).unwrap(), Str::from("foo"));

        let bytes = DriverValue::Bytes(Cow::Borrowed(b"bar"));
        assert_eq!(scan_string::<Str>(bytes).unwrap(), Str::from("bar"));

        let owned = DriverValue::Bytes(Cow::Owned(b"baz".to_vec()));
        assert_eq!(scan_string::<Str>(owned).unwrap(), Str::from("baz"));
    }

    #[test]
    fn it_scans_numbers_as_text() {
        assert_eq!(scan_string::<Str>(DriverValue::Int(123)).unwrap(), Str::from("123"));
        assert_eq!(scan_string::<Str>(DriverValue::Float(1.5)).unwrap(), Str::from("1.5"));
    }

    #[test]
    fn it_rejects_invalid_utf8() {
        let err = scan_string::<Str>(DriverValue::Bytes(Cow::Borrowed(&[0xff, 0xfe]))).unwrap_err();
        assert!(matches!(err, Error::Utf8(_)), "{err:?}");

        let err = scan_string::<Str>(DriverValue::Bytes(Cow::Owned(vec![0xc3]))).unwrap_err();
        assert!(matches!(err, Error::Utf8(_)), "{err:?}");
    }

    #[test]
    fn it_writes_empty_as_null() {
        assert_eq!(string_value(&Str::NULL), DriverValue::Null);
        assert_eq!(string_value(&Str::from("foo")), DriverValue::from("foo"));
        assert_eq!(string_value(&String::new()), DriverValue::Null);
    }

    #[test]
    fn it_round_trips_through_the_driver() {
        for s in ["a", " ", "hello world", "😎"] {
            let value = Str::from(s);
            assert_eq!(scan_string::<Str>(string_value(&value)).unwrap(), value);
        }

        assert_eq!(scan_string::<Str>(string_value(&Str::NULL)).unwrap(), Str::NULL);
    }

    #[test]
    fn it_marshals() {
        assert_eq!(marshal_string(&Str::from("foo")).unwrap(), br#""foo""#);
        assert_eq!(marshal_string(&Str::from("a\"b")).unwrap(), br#""a\"b""#);
        assert_eq!(marshal_string(&Str::NULL).unwrap(), b"null");
    }

    #[test]
    fn it_unmarshals() {
        assert_eq!(unmarshal_string::<Str>(br#""foo""#).unwrap(), Str::from("foo"));
        assert_eq!(unmarshal_string::<Str>(b"null").unwrap(), Str::NULL);
        assert_eq!(unmarshal_string::<Str>(br#""""#).unwrap(), Str::NULL);
    }

    #[test]
    fn it_does_not_emit_empty_string_literals() {
        let value = unmarshal_string::<Str>(br#""""#).unwrap();
        assert_eq!(marshal_string(&value).unwrap(), b"null");
    }

    #[test]
    fn it_propagates_unmarshal_errors() {
        assert!(unmarshal_string::<Str>(b"123").is_err());
        assert!(unmarshal_string::<Str>(b"{}").is_err());
        assert!(unmarshal_string::<Str>(b"\"unterminated").is_err());
    }

    #[test]
    fn it_works_with_serde() {
        #[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
        struct Contact {
            name: Str,
            #[serde(with = "crate::string")]
            language: String,
        }

        let contact = Contact {
            name: Str::from("Bob"),
            language: String::new(),
        };

        let json = serde_json::to_string(&contact).unwrap();
        assert_eq!(json, r#"{"name":"Bob","language":null}"#);
        assert_eq!(serde_json::from_str::<Contact>(&json).unwrap(), contact);

        let json = r#"{"name":null,"language":"eng"}"#;
        let contact = serde_json::from_str::<Contact>(json).unwrap();
        assert_eq!(contact.name, Str::NULL);
        assert_eq!(contact.language, "eng");
    }
}
