//! Glue between the conversions in this crate and SQLx's `Encode` / `Decode`.
//!
//! These are generic over the database: the wrapper borrows the inner primitive's type
//! information and encoding, and only decides whether to write `NULL`.

use sqlx_core::database::Database;
use sqlx_core::decode::Decode;
use sqlx_core::encode::{Encode, IsNull};
use sqlx_core::error::BoxDynError;
use sqlx_core::types::Type;
use sqlx_core::value::ValueRef;

use crate::int::{self, Signed};
use crate::string::{self, StringLike};
use crate::value::DriverValue;

pub fn encode_int<'q, DB, I, T>(
    value: &T,
    buf: &mut <DB as Database>::ArgumentBuffer<'q>,
) -> Result<IsNull, BoxDynError>
where
    DB: Database,
    I: Signed + Encode<'q, DB> + Type<DB>,
    T: Signed,
{
    match int::int_value(*value) {
        DriverValue::Int(value) => I::from_i64(value)?.encode(buf),
        _ => Ok(IsNull::Yes),
    }
}

pub fn decode_int<'r, DB, I, T>(value: <DB as Database>::ValueRef<'r>) -> Result<T, BoxDynError>
where
    DB: Database,
    I: Signed + Decode<'r, DB>,
    T: Signed,
{
    let value = if value.is_null() {
        DriverValue::Null
    } else {
        DriverValue::Int(I::decode(value)?.into_i64())
    };

    Ok(int::scan_int(value)?)
}

pub fn encode_string<'q, DB, I, T>(
    value: &T,
    buf: &mut <DB as Database>::ArgumentBuffer<'q>,
) -> Result<IsNull, BoxDynError>
where
    DB: Database,
    I: From<String> + Encode<'q, DB> + Type<DB>,
    T: StringLike,
{
    match string::string_value(value) {
        DriverValue::Text(text) => I::from(text.into_owned()).encode(buf),
        _ => Ok(IsNull::Yes),
    }
}

pub fn decode_string<'r, DB, I, T>(value: <DB as Database>::ValueRef<'r>) -> Result<T, BoxDynError>
where
    DB: Database,
    I: Into<String> + Decode<'r, DB>,
    T: StringLike,
{
    let value = if value.is_null() {
        DriverValue::Null
    } else {
        let text: String = I::decode(value)?.into();
        DriverValue::from(text)
    };

    Ok(string::scan_string(value)?)
}
