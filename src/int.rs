//! Integers that are written as `NULL` when they are zero.
//!
//! The functions in this module are generic over [`Signed`], so they can back any integer
//! newtype; [`impl_null_int!`](crate::impl_null_int) wires them up for you. They can also be
//! used directly on plain integer fields:
//!
//! ```rust
//! #[derive(serde::Serialize, serde::Deserialize)]
//! struct Message {
//!     #[serde(with = "zeronull::int")]
//!     broadcast_id: i64,
//! }
//!
//! let json = serde_json::to_string(&Message { broadcast_id: 0 }).unwrap();
//! assert_eq!(json, r#"{"broadcast_id":null}"#);
//! ```

use std::any::type_name;
use std::str;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serializer};

use crate::error::{Error, Result};
use crate::value::DriverValue;

/// A signed integer, or a newtype around one, that can carry the zero-means-null convention.
///
/// Values cross every boundary as `i64`; narrower types are range-checked on the way in.
pub trait Signed: Copy {
    fn from_i64(value: i64) -> Result<Self>;

    fn into_i64(self) -> i64;

    fn is_zero(self) -> bool {
        self.into_i64() == 0
    }
}

macro_rules! impl_signed_for_primitive {
    ($($ty:ty),*) => {
        $(
            impl Signed for $ty {
                fn from_i64(value: i64) -> Result<Self> {
                    <$ty>::try_from(value).map_err(|_| Error::OutOfRange {
                        value,
                        target: type_name::<$ty>(),
                    })
                }

                fn into_i64(self) -> i64 {
                    i64::from(self)
                }
            }
        )*
    };
}

impl_signed_for_primitive!(i8, i16, i32, i64);

/// An `i32` that is written as `NULL` (database) and `null` (JSON) when it is zero.
///
/// `NULL` and `null` are read back as zero.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Int(pub i32);

impl_null_int!(Int(i32));

/// An `i64` that is written as `NULL` (database) and `null` (JSON) when it is zero.
///
/// `NULL` and `null` are read back as zero.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Int64(pub i64);

impl_null_int!(Int64(i64));

fn from_nullable<T: Signed>(value: Option<i64>) -> Result<T> {
    T::from_i64(value.unwrap_or(0))
}

/// Reads an integer from a driver value, using zero for `NULL`.
///
/// Text and bytes holding a decimal integer are parsed, the way a driver reads an integer out
/// of a text column. Surrounding whitespace is rejected.
pub fn scan_int<T: Signed>(value: DriverValue<'_>) -> Result<T> {
    let value = match value {
        DriverValue::Null => None,
        DriverValue::Int(value) => Some(value),
        DriverValue::Text(text) => Some(parse(&text)?),
        DriverValue::Bytes(bytes) => Some(parse(str::from_utf8(&bytes)?)?),
        other => return Err(Error::mismatch(other.kind(), type_name::<T>())),
    };

    from_nullable(value)
}

fn parse(text: &str) -> Result<i64> {
    text.parse().map_err(|source| Error::ParseInt {
        input: text.to_owned(),
        source,
    })
}

/// Converts an integer to a driver value, using `NULL` for zero.
pub fn int_value<T: Signed>(value: T) -> DriverValue<'static> {
    if value.is_zero() {
        DriverValue::Null
    } else {
        DriverValue::Int(value.into_i64())
    }
}

/// Decodes an integer from JSON, using zero for `null`.
pub fn unmarshal_int<T: Signed>(bytes: &[u8]) -> Result<T> {
    from_nullable(serde_json::from_slice(bytes)?)
}

/// Encodes an integer as JSON, using `null` for zero.
pub fn marshal_int<T: Signed>(value: T) -> Result<Vec<u8>> {
    if value.is_zero() {
        return Ok(b"null".to_vec());
    }

    Ok(serde_json::to_vec(&value.into_i64())?)
}

/// Serializes an integer, writing zero as `null`.
///
/// For use with `#[serde(serialize_with = "...")]` or `#[serde(with = "zeronull::int")]`.
pub fn serialize<T, S>(value: &T, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    T: Signed,
    S: Serializer,
{
    if value.is_zero() {
        serializer.serialize_none()
    } else {
        serializer.serialize_i64(value.into_i64())
    }
}

/// Deserializes an integer, reading `null` as zero.
pub fn deserialize<'de, T, D>(deserializer: D) -> std::result::Result<T, D::Error>
where
    T: Signed,
    D: Deserializer<'de>,
{
    let value = Option::<i64>::deserialize(deserializer)?;

    from_nullable(value).map_err(D::Error::custom)
}
