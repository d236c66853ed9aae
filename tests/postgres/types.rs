use serde_json::{json, Value as JsonValue};
use sqlx::postgres::Postgres;
use sqlx::Row;
use zeronull::{Int, Int64, Json, Map, Str};
use zeronull_test::{new, test_decode_type, test_type};

test_type!(int<Int>(Postgres,
    "NULL::int4" == Int::NULL,
    "42::int4" == Int(42),
    "(-2147483648)::int4" == Int(i32::MIN),
));

test_decode_type!(int_zero<Int>(Postgres,
    "0::int4" == Int::NULL,
));

test_type!(int64<Int64>(Postgres,
    "NULL::int8" == Int64::NULL,
    "8589934592::int8" == Int64(8_589_934_592),
));

test_decode_type!(int64_zero<Int64>(Postgres,
    "0::int8" == Int64::NULL,
));

test_type!(str<Str>(Postgres,
    "NULL::text" == Str::NULL,
    "'foo'::text" == Str::from("foo"),
    "'😎'::text" == Str::from("😎"),
));

test_decode_type!(str_empty<Str>(Postgres,
    "''::text" == Str::NULL,
    "''::varchar" == Str::NULL,
));

// documents are compared as returned by JSONB, which normalizes whitespace
test_type!(json<Json>(Postgres,
    "NULL::jsonb" == Json::null(),
    r#"'{"foo": "bar"}'::jsonb"# == Json::from(r#"{"foo": "bar"}"#),
    "'[1, 2, 3]'::jsonb" == Json::from("[1, 2, 3]"),
));

test_decode_type!(json_other_columns<Json>(Postgres,
    r#"'{"foo":"bar"}'::json"# == Json::from(r#"{"foo":"bar"}"#),
    r#"'{"foo":"bar"}'::text"# == Json::from(r#"{"foo":"bar"}"#),
    "''::text" == Json::null(),
    "'null'::jsonb" == Json::null(),
));

test_type!(map<Map>(Postgres,
    "NULL::jsonb" == Map::<JsonValue>::new(),
    r#"'{"foo": "bar"}'::jsonb"# == Map::from_iter([("foo", json!("bar"))]),
    r#"'{"a": 1, "b": {"c": [true]}}'::jsonb"# == Map::from_iter([("a", json!(1)), ("b", json!({"c": [true]}))]),
));

test_decode_type!(map_other_columns<Map>(Postgres,
    r#"'{"foo":"bar"}'::json"# == Map::from_iter([("foo", json!("bar"))]),
    "'{}'::jsonb" == Map::<JsonValue>::new(),
    "'null'::jsonb" == Map::<JsonValue>::new(),
    "''::text" == Map::<JsonValue>::new(),
));

#[tokio::test]
async fn it_binds_zero_values_as_null() -> anyhow::Result<()> {
    let Some(mut conn) = new::<Postgres>().await? else {
        return Ok(());
    };

    let row = sqlx::query(
        "SELECT $1::int4 IS NULL, $2::int8 IS NULL, $3::text IS NULL, $4::jsonb IS NULL, $5::jsonb IS NULL",
    )
    .bind(Int::NULL)
    .bind(Int64::NULL)
    .bind(Str::NULL)
    .bind(Json::default())
    .bind(Map::<JsonValue>::new())
    .fetch_one(&mut conn)
    .await?;

    for i in 0..5 {
        assert!(row.try_get::<bool, _>(i)?, "column {i} was not NULL");
    }

    Ok(())
}

#[tokio::test]
async fn it_fails_on_invalid_documents() -> anyhow::Result<()> {
    let Some(mut conn) = new::<Postgres>().await? else {
        return Ok(());
    };

    let row = sqlx::query("SELECT '{invalid'::text, '[1, 2]'::jsonb")
        .fetch_one(&mut conn)
        .await?;

    let err = row.try_get::<Json, _>(0).unwrap_err();
    assert!(err.to_string().contains("scanned JSON isn't valid"), "{err}");

    assert!(row.try_get::<Map, _>(1).is_err());

    Ok(())
}
