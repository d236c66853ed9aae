use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::value::RawValue;
use sqlx_core::database::Database;
use sqlx_core::decode::Decode;
use sqlx_core::encode::{Encode, IsNull};
use sqlx_core::error::BoxDynError;
use sqlx_core::type_info::TypeInfo;
use sqlx_core::types::{Json as SqlxJson, Type};
use sqlx_core::value::ValueRef;
use sqlx_postgres::{PgArgumentBuffer, PgTypeInfo, PgValueFormat, PgValueRef, Postgres};

use crate::json::{self, Json};
use crate::map::{self, Map};
use crate::value::DriverValue;

// Documents are bound as JSONB and can be read back from JSON, JSONB or any text column.

fn compatible(ty: &PgTypeInfo) -> bool {
    <SqlxJson<()> as Type<Postgres>>::compatible(ty) || <&str as Type<Postgres>>::compatible(ty)
}

fn driver_value(value: PgValueRef<'_>) -> Result<DriverValue<'_>, BoxDynError> {
    if value.is_null() {
        return Ok(DriverValue::Null);
    }

    let jsonb = value.format() == PgValueFormat::Binary && value.type_info().name() == "JSONB";
    let mut buf = value.as_bytes()?;

    if jsonb {
        // binary JSONB is prefixed with a format version
        match buf.split_first() {
            Some((1, rest)) => buf = rest,
            Some((version, _)) => {
                return Err(format!("unsupported JSONB format version {version}").into())
            }
            None => {}
        }
    }

    Ok(DriverValue::from(buf))
}

fn encode_document(value: DriverValue<'_>, buf: &mut PgArgumentBuffer) -> Result<IsNull, BoxDynError> {
    let text = match value {
        DriverValue::Null => return Ok(IsNull::Yes),
        DriverValue::Bytes(bytes) => String::from_utf8(bytes.into_owned())?,
        DriverValue::Text(text) => text.into_owned(),
        other => return Err(format!("cannot bind {} as a JSON document", other.kind()).into()),
    };

    tracing::trace!(db = Postgres::NAME, len = text.len(), "binding JSON document");

    let raw = RawValue::from_string(text)?;

    <SqlxJson<Box<RawValue>> as Encode<'_, Postgres>>::encode(SqlxJson(raw), buf)
}

impl Type<Postgres> for Json {
    fn type_info() -> PgTypeInfo {
        <SqlxJson<()> as Type<Postgres>>::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        compatible(ty)
    }
}

impl Encode<'_, Postgres> for Json {
    fn encode_by_ref(&self, buf: &mut PgArgumentBuffer) -> Result<IsNull, BoxDynError> {
        encode_document(json::json_value(self), buf)
    }
}

impl<'r> Decode<'r, Postgres> for Json {
    fn decode(value: PgValueRef<'r>) -> Result<Self, BoxDynError> {
        Ok(json::scan_json(driver_value(value)?)?)
    }
}

impl<V> Type<Postgres> for Map<V> {
    fn type_info() -> PgTypeInfo {
        <SqlxJson<()> as Type<Postgres>>::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        compatible(ty)
    }
}

impl<V: Serialize> Encode<'_, Postgres> for Map<V> {
    fn encode_by_ref(&self, buf: &mut PgArgumentBuffer) -> Result<IsNull, BoxDynError> {
        encode_document(map::map_value(self)?, buf)
    }
}

impl<'r, V: DeserializeOwned> Decode<'r, Postgres> for Map<V> {
    fn decode(value: PgValueRef<'r>) -> Result<Self, BoxDynError> {
        Ok(map::scan_map(driver_value(value)?)?)
    }
}
