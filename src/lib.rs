//! Scalar and container types where the zero value *is* `NULL`.
//!
//! Many schemas and APIs use the zero value of a type (`0`, `""`, an empty object) to mean
//! "no value". The types in this crate make that convention explicit so application code can
//! work with plain values while still writing `NULL` to the database and `null` to JSON:
//!
//! | Type | In memory | Database | JSON |
//! |---|---|---|---|
//! | [`Int`], [`Int64`] | `0` | `NULL` | `null` |
//! | [`Str`] | `""` | `NULL` | `null` |
//! | [`Json`] | empty or `null` | `NULL` | `null` |
//! | [`Map`] | empty map | `NULL` | `null` |
//!
//! Reading goes the other way: a `NULL` column or a JSON `null` decodes to the zero value,
//! never to an error and never to an `Option`.
//!
//! Each kind exposes its conversion rules as free functions (`scan_*`, `*_value`,
//! `unmarshal_*`, `marshal_*`) so the same rules can back your own domain types. For integers
//! and strings, [`impl_null_int!`] and [`impl_null_string!`] generate everything a newtype
//! needs:
//!
//! ```rust
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub struct ContactId(i64);
//!
//! zeronull::impl_null_int!(ContactId(i64));
//!
//! assert_eq!(zeronull::int::marshal_int(ContactId::NULL).unwrap(), b"null");
//! assert_eq!(serde_json::from_str::<ContactId>("42").unwrap(), ContactId(42));
//! ```
//!
//! # Databases
//!
//! [`Int`], [`Int64`] and [`Str`] implement SQLx's `Type`, `Encode` and `Decode` for every
//! database whose driver supports the inner primitive. [`Json`] and [`Map`] are implemented per
//! driver, behind the `sqlite` (default) and `postgres` features.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(future_incompatible, rust_2018_idioms)]

#[macro_use]
mod macros;

pub mod error;
pub mod int;
pub mod json;
pub mod map;
pub mod string;
pub mod value;

#[doc(hidden)]
pub mod driver;

#[cfg(feature = "postgres")]
#[cfg_attr(docsrs, doc(cfg(feature = "postgres")))]
mod postgres;

#[cfg(feature = "sqlite")]
#[cfg_attr(docsrs, doc(cfg(feature = "sqlite")))]
mod sqlite;

#[doc(inline)]
pub use self::{
    error::{Error, Result},
    int::{Int, Int64},
    json::Json,
    map::Map,
    string::Str,
    value::DriverValue,
};

// Paths used by the code generated from `impl_null_int!` and `impl_null_string!`.
#[doc(hidden)]
pub mod __private {
    pub use serde;
    pub use sqlx_core;
}
