use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx_core::database::Database;
use sqlx_core::decode::Decode;
use sqlx_core::encode::{Encode, IsNull};
use sqlx_core::error::BoxDynError;
use sqlx_core::type_info::TypeInfo;
use sqlx_core::types::Type;
use sqlx_core::value::ValueRef;
use sqlx_sqlite::{Sqlite, SqliteTypeInfo, SqliteValueRef};

use crate::json::{self, Json};
use crate::map::{self, Map};
use crate::value::DriverValue;

// SQLite has no JSON type; documents are stored as TEXT and may be read back from TEXT or BLOB.

fn compatible(ty: &SqliteTypeInfo) -> bool {
    <&str as Type<Sqlite>>::compatible(ty) || <&[u8] as Type<Sqlite>>::compatible(ty)
}

// Translates a value by its storage class, which for SQLite is decided per value rather than
// per column.
fn driver_value(value: SqliteValueRef<'_>) -> Result<DriverValue<'_>, BoxDynError> {
    if value.is_null() {
        return Ok(DriverValue::Null);
    }

    let ty = value.type_info().into_owned();

    Ok(match ty.name() {
        "TEXT" => DriverValue::from(<&str as Decode<'_, Sqlite>>::decode(value)?),
        "BLOB" => DriverValue::from(<&[u8] as Decode<'_, Sqlite>>::decode(value)?),
        "REAL" => DriverValue::from(<f64 as Decode<'_, Sqlite>>::decode(value)?),
        _ => DriverValue::from(<i64 as Decode<'_, Sqlite>>::decode(value)?),
    })
}

fn encode_document<'q>(
    value: DriverValue<'_>,
    buf: &mut <Sqlite as Database>::ArgumentBuffer<'q>,
) -> Result<IsNull, BoxDynError> {
    let text = match value {
        DriverValue::Null => return Ok(IsNull::Yes),
        DriverValue::Bytes(bytes) => String::from_utf8(bytes.into_owned())?,
        DriverValue::Text(text) => text.into_owned(),
        other => return Err(format!("cannot bind {} as a JSON document", other.kind()).into()),
    };

    tracing::trace!(db = Sqlite::NAME, len = text.len(), "binding JSON document");

    <String as Encode<'q, Sqlite>>::encode(text, buf)
}

impl Type<Sqlite> for Json {
    fn type_info() -> SqliteTypeInfo {
        <str as Type<Sqlite>>::type_info()
    }

    fn compatible(ty: &SqliteTypeInfo) -> bool {
        compatible(ty)
    }
}

impl<'q> Encode<'q, Sqlite> for Json {
    fn encode_by_ref(
        &self,
        buf: &mut <Sqlite as Database>::ArgumentBuffer<'q>,
    ) -> Result<IsNull, BoxDynError> {
        encode_document(json::json_value(self), buf)
    }
}

impl<'r> Decode<'r, Sqlite> for Json {
    fn decode(value: SqliteValueRef<'r>) -> Result<Self, BoxDynError> {
        Ok(json::scan_json(driver_value(value)?)?)
    }
}

impl<V> Type<Sqlite> for Map<V> {
    fn type_info() -> SqliteTypeInfo {
        <str as Type<Sqlite>>::type_info()
    }

    fn compatible(ty: &SqliteTypeInfo) -> bool {
        compatible(ty)
    }
}

impl<'q, V: Serialize> Encode<'q, Sqlite> for Map<V> {
    fn encode_by_ref(
        &self,
        buf: &mut <Sqlite as Database>::ArgumentBuffer<'q>,
    ) -> Result<IsNull, BoxDynError> {
        encode_document(map::map_value(self)?, buf)
    }
}

impl<'r, V: DeserializeOwned> Decode<'r, Sqlite> for Map<V> {
    fn decode(value: SqliteValueRef<'r>) -> Result<Self, BoxDynError> {
        Ok(map::scan_map(driver_value(value)?)?)
    }
}
