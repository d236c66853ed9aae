use serde_json::{json, Value as JsonValue};
use sqlx::{Row, Sqlite};
use zeronull::{Int, Int64, Json, Map, Str};
use zeronull_test::{new, test_decode_type, test_type};

fn foo_bar() -> Map {
    Map::from_iter([("foo", json!("bar"))])
}

test_type!(int<Int>(Sqlite,
    "NULL" == Int::NULL,
    "42" == Int(42),
    "-2147483648" == Int(i32::MIN),
));

test_decode_type!(int_zero<Int>(Sqlite,
    "0" == Int::NULL,
));

test_type!(int64<Int64>(Sqlite,
    "NULL" == Int64::NULL,
    "8589934592" == Int64(8_589_934_592),
    "9223372036854775807" == Int64(i64::MAX),
));

test_decode_type!(int64_zero<Int64>(Sqlite,
    "0" == Int64::NULL,
));

test_type!(str<Str>(Sqlite,
    "NULL" == Str::NULL,
    "'foo'" == Str::from("foo"),
    "'hello world'" == Str::from("hello world"),
    "'😎'" == Str::from("😎"),
));

test_decode_type!(str_empty<Str>(Sqlite,
    "''" == Str::NULL,
));

test_type!(json<Json>(Sqlite,
    "NULL" == Json::null(),
    r#"'{"foo":"bar"}'"# == Json::from(r#"{"foo":"bar"}"#),
    "'[1, 2, 3]'" == Json::from("[1, 2, 3]"),
    "'0'" == Json::from("0"),
));

test_decode_type!(json_empty<Json>(Sqlite,
    "''" == Json::null(),
    "'null'" == Json::null(),
    "X'7B7D'" == Json::from("{}"),
));

test_type!(map<Map>(Sqlite,
    "NULL" == Map::<JsonValue>::new(),
    r#"'{"foo":"bar"}'"# == foo_bar(),
    r#"'{"a":1,"b":[true,null]}'"# == Map::from_iter([("a", json!(1)), ("b", json!([true, null]))]),
));

test_decode_type!(map_empty<Map>(Sqlite,
    "''" == Map::<JsonValue>::new(),
    "'null'" == Map::<JsonValue>::new(),
    "'{}'" == Map::<JsonValue>::new(),
));

test_decode_type!(map_typed<Map<i64>>(Sqlite,
    r#"'{"x":1,"y":2}'"# == Map::from_iter([("x", 1_i64), ("y", 2)]),
));

#[tokio::test]
async fn it_binds_zero_values_as_null() -> anyhow::Result<()> {
    let Some(mut conn) = new::<Sqlite>().await? else {
        return Ok(());
    };

    let row = sqlx::query("SELECT ? IS NULL, ? IS NULL, ? IS NULL, ? IS NULL, ? IS NULL")
        .bind(Int(0))
        .bind(Int64(0))
        .bind(Str::from(""))
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
async fn it_stores_and_loads_a_row() -> anyhow::Result<()> {
    let Some(mut conn) = new::<Sqlite>().await? else {
        return Ok(());
    };

    sqlx::query(
        "CREATE TEMPORARY TABLE contacts (id INTEGER PRIMARY KEY, org_id INTEGER, \
         name TEXT, fields TEXT, metadata TEXT)",
    )
    .execute(&mut conn)
    .await?;

    for (id, org_id, name) in [(1, Int64(7), Str::from("Bob")), (2, Int64::NULL, Str::NULL)] {
        sqlx::query("INSERT INTO contacts VALUES (?, ?, ?, ?, ?)")
            .bind(id)
            .bind(org_id)
            .bind(name)
            .bind(if id == 1 { foo_bar() } else { Map::new() })
            .bind(if id == 1 { Json::from("[1]") } else { Json::null() })
            .execute(&mut conn)
            .await?;
    }

    let nulls: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM contacts WHERE org_id IS NULL AND name IS NULL \
         AND fields IS NULL AND metadata IS NULL",
    )
    .fetch_one(&mut conn)
    .await?;
    assert_eq!(nulls, 1);

    let rows = sqlx::query("SELECT org_id, name, fields, metadata FROM contacts ORDER BY id")
        .fetch_all(&mut conn)
        .await?;

    assert_eq!(rows[0].try_get::<Int64, _>(0)?, Int64(7));
    assert_eq!(rows[0].try_get::<Str, _>(1)?, Str::from("Bob"));
    assert_eq!(rows[0].try_get::<Map, _>(2)?, foo_bar());
    assert_eq!(rows[0].try_get::<Json, _>(3)?, Json::from("[1]"));

    assert_eq!(rows[1].try_get::<Int64, _>(0)?, Int64::NULL);
    assert_eq!(rows[1].try_get::<Str, _>(1)?, Str::NULL);
    assert!(rows[1].try_get::<Map, _>(2)?.is_empty());
    assert!(rows[1].try_get::<Json, _>(3)?.is_null());

    Ok(())
}

#[tokio::test]
async fn it_fails_on_invalid_documents() -> anyhow::Result<()> {
    let Some(mut conn) = new::<Sqlite>().await? else {
        return Ok(());
    };

    let row = sqlx::query("SELECT '{invalid', '[1, 2]', 2147483648")
        .fetch_one(&mut conn)
        .await?;

    let err = row.try_get::<Json, _>(0).unwrap_err();
    assert!(err.to_string().contains("scanned JSON isn't valid"), "{err}");

    assert!(row.try_get::<Map, _>(0).is_err());
    assert!(row.try_get::<Map, _>(1).is_err());

    let err = row.try_get::<Int, _>(2).unwrap_err();
    assert!(err.to_string().contains("out of range"), "{err}");

    Ok(())
}
