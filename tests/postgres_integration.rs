//! Integration tests against a live PostgreSQL
//!
//! Run with `DATABASE_URL` pointing at a scratch database; every test
//! creates its own uniquely named tables and drops them afterwards.
//! Without `DATABASE_URL` the tests return early.

use pgaccess::prelude::*;
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize, PartialEq)]
struct Widget {
    id: i32,
    name: String,
    qty: i32,
}

#[derive(Debug, Deserialize)]
struct Member {
    m_name: String,
    email: String,
}

#[derive(Debug, Deserialize)]
struct Slot {
    owner: String,
    m_status: i32,
}

async fn connect(tables: TableNameConfig) -> Option<PgAccess> {
    let url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("DATABASE_URL not set, skipping");
            return None;
        }
    };
    let pool = PgPool::connect(&url)
        .await
        .expect("Failed to connect to database");
    Some(PgAccess::from_pool(pool, false, tables))
}

fn unique(prefix: &str) -> String {
    format!("{}_{}", prefix, Uuid::new_v4().simple())
}

async fn exec(access: &PgAccess, sql: &str) {
    sqlx::query(sql)
        .execute(access.pool())
        .await
        .unwrap_or_else(|e| panic!("{sql}: {e}"));
}

async fn create_widgets(access: &PgAccess) -> String {
    let table = unique("widgets");
    exec(
        access,
        &format!(
            "CREATE TABLE {table} (id SERIAL PRIMARY KEY, name TEXT NOT NULL UNIQUE, qty INTEGER NOT NULL)"
        ),
    )
    .await;
    table
}

async fn drop_tables(access: &PgAccess, tables: &[&str]) {
    for table in tables {
        exec(access, &format!("DROP TABLE IF EXISTS {table}")).await;
    }
}

#[tokio::test]
async fn test_crud_round() {
    let Some(access) = connect(TableNameConfig::default()).await else {
        return;
    };
    let executor = access.executor();
    let table = create_widgets(&access).await;

    let inserted = executor
        .insert_many(
            &InsertMany::new(&table, ["name", "qty"])
                .row(vec![json!("a"), json!(1)])
                .row(vec![json!("b"), json!(2)])
                .row(vec![json!("c"), json!(3)]),
            None,
        )
        .await
        .unwrap();
    assert_eq!(inserted.ids().len(), 3);

    let all: Vec<Widget> = executor
        .select_many(&Select::table(&table), None)
        .await
        .unwrap();
    assert_eq!(all.len(), 3);

    let either: Vec<Widget> = executor
        .select_many(
            &Select::table(&table)
                .filter(FieldMap::new().set("name", "a").set("qty", 3))
                .operator(LogicalOperator::Or),
            None,
        )
        .await
        .unwrap();
    assert_eq!(either.len(), 2);

    executor
        .update_one_or_fail(
            &Update::table(&table)
                .set(FieldMap::new().set("qty", 10))
                .filter(FieldMap::new().set("name", "b")),
            None,
        )
        .await
        .unwrap();
    let b: Widget = executor
        .select_one_or_fail(
            &Select::table(&table).filter(FieldMap::new().set("name", "b")),
            None,
        )
        .await
        .unwrap();
    assert_eq!(b.qty, 10);

    let missing = executor
        .update_one_or_fail(
            &Update::table(&table)
                .set(FieldMap::new().set("qty", 1))
                .filter(FieldMap::new().set("name", "zzz")),
            None,
        )
        .await
        .unwrap_err();
    assert_eq!(missing.code(), 1002);

    let duplicate = executor
        .insert_many(
            &InsertMany::new(&table, ["name", "qty"]).row(vec![json!("a"), json!(9)]),
            None,
        )
        .await
        .unwrap_err();
    assert_eq!(duplicate.kind(), ErrorKind::Conflict);

    let delete = Delete::table(&table).filter(FieldMap::new().set("name", "c"));
    assert_eq!(executor.delete_or_fail(&delete, None).await.unwrap().ids().len(), 1);
    assert_eq!(executor.delete_or_fail(&delete, None).await.unwrap_err().code(), 1039);

    let none: Option<Widget> = executor
        .select_one_optional(
            &Select::table(&table).filter(FieldMap::new().set("name", "c")),
            None,
        )
        .await
        .unwrap();
    assert!(none.is_none());

    drop_tables(&access, &[&table]).await;
}

#[tokio::test]
async fn test_upsert_is_idempotent() {
    let Some(access) = connect(TableNameConfig::default()).await else {
        return;
    };
    let executor = access.executor();
    let table = create_widgets(&access).await;

    for qty in [1, 2] {
        let request = Upsert::new(&table, FieldMap::new().set("name", "a").set("qty", qty))
            .on_conflict(["name"])
            .update(["qty"]);
        let output = executor.upsert_on_conflict(&request, None).await.unwrap();
        assert_eq!(output.rows_affected, 1);
    }

    let rows: Vec<Widget> = executor
        .select_many(&Select::table(&table), None)
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].qty, 2);

    drop_tables(&access, &[&table]).await;
}

#[tokio::test]
async fn test_transactions_own_their_connection() {
    let Some(access) = connect(TableNameConfig::default()).await else {
        return;
    };
    let executor = access.executor();
    let table = create_widgets(&access).await;
    let row = |name: &str| InsertOne::new(&table, FieldMap::new().set("name", name).set("qty", 1));

    let mut tx = executor.begin_transaction().await.unwrap();
    executor.insert_one(&row("kept"), tx.conn()).await.unwrap();
    tx.commit(None).await.unwrap();

    let mut tx = executor.begin_transaction().await.unwrap();
    executor.insert_one(&row("rolled"), tx.conn()).await.unwrap();
    tx.rollback(None).await.unwrap();

    {
        let mut tx = executor.begin_transaction().await.unwrap();
        executor.insert_one(&row("dropped"), tx.conn()).await.unwrap();
    }

    let rows: Vec<Widget> = executor
        .select_many(&Select::table(&table), None)
        .await
        .unwrap();
    let names: Vec<&str> = rows.iter().map(|w| w.name.as_str()).collect();
    assert_eq!(names, vec!["kept"]);

    drop_tables(&access, &[&table]).await;
}

#[tokio::test]
async fn test_replace_if_expired() {
    let Some(access) = connect(TableNameConfig::default()).await else {
        return;
    };
    let executor = access.executor();
    let table = unique("slots");
    exec(
        &access,
        &format!(
            "CREATE TABLE {table} (id SERIAL PRIMARY KEY, m_name TEXT NOT NULL UNIQUE, \
             owner TEXT NOT NULL, m_status INTEGER NOT NULL, created_at TIMESTAMPTZ NOT NULL DEFAULT NOW())"
        ),
    )
    .await;
    let claim = |owner: &str| {
        ReplaceIfExpired::new(
            &table,
            FieldMap::new()
                .set("m_name", "slot-1")
                .set("owner", owner)
                .set("m_status", 1),
            3600,
        )
    };

    let mut handle = executor.source().acquire().await.unwrap();

    executor.replace_if_expired(&claim("alice"), &mut handle).await.unwrap();

    // active and fresh
    let err = executor
        .replace_if_expired(&claim("bob"), &mut handle)
        .await
        .unwrap_err();
    assert_eq!(err.code(), 1041);

    // active but past the deadline
    exec(
        &access,
        &format!("UPDATE {table} SET created_at = NOW() - interval '2 hours'"),
    )
    .await;
    let err = executor
        .replace_if_expired(&claim("bob"), &mut handle)
        .await
        .unwrap_err();
    assert_eq!(err.code(), 1041);
    let slot: Slot = executor
        .select_one_or_fail(&Select::table(&table), None)
        .await
        .unwrap();
    assert_eq!(slot.owner, "alice");

    // inactive but fresh
    exec(&access, &format!("UPDATE {table} SET m_status = 0, created_at = NOW()")).await;
    let err = executor
        .replace_if_expired(&claim("bob"), &mut handle)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);

    // inactive and past the deadline
    exec(
        &access,
        &format!("UPDATE {table} SET created_at = NOW() - interval '2 hours'"),
    )
    .await;
    executor.replace_if_expired(&claim("bob"), &mut handle).await.unwrap();

    executor.source().release(handle, false).await;

    let slot: Slot = executor
        .select_one_or_fail(&Select::table(&table), None)
        .await
        .unwrap();
    assert_eq!(slot.owner, "bob");
    assert_eq!(slot.m_status, 1);

    drop_tables(&access, &[&table]).await;
}

#[tokio::test]
async fn test_session_lookup() {
    let tables = TableNameConfig::new(unique("members"), unique("sessions"));
    let Some(access) = connect(tables.clone()).await else {
        return;
    };
    let executor = access.executor();
    let (members, sessions) = (tables.members.as_str(), tables.sessions.as_str());
    exec(
        &access,
        &format!(
            "CREATE TABLE {members} (id SERIAL PRIMARY KEY, m_name TEXT NOT NULL UNIQUE, email TEXT NOT NULL)"
        ),
    )
    .await;
    exec(
        &access,
        &format!(
            "CREATE TABLE {sessions} (id SERIAL PRIMARY KEY, m_name TEXT NOT NULL, token TEXT NOT NULL, \
             m_device TEXT NOT NULL, m_ip TEXT NOT NULL, created_time TIMESTAMPTZ NOT NULL DEFAULT NOW(), \
             UNIQUE (m_name, m_device, m_ip))"
        ),
    )
    .await;

    executor
        .insert_many(
            &InsertMany::new(members, ["m_name", "email"])
                .row(vec![json!("alice"), json!("alice@example.com")]),
            None,
        )
        .await
        .unwrap();

    let token = Uuid::new_v4().to_string();
    for _ in 0..2 {
        let session = Upsert::new(
            sessions,
            FieldMap::new()
                .set("m_name", "alice")
                .set("token", token.as_str())
                .set("m_device", "phone")
                .set("m_ip", "10.0.0.1"),
        )
        .on_conflict(["m_name", "m_device", "m_ip"])
        .update(["token"]);
        executor.upsert_session_record(&session, None).await.unwrap();
    }

    let lookup = SessionLookup::new(token.as_str(), 3600, "phone", "10.0.0.1")
        .columns(Columns::list(["members.m_name", "members.email"]));
    let member: Member = executor.lookup_member_by_session(&lookup, None).await.unwrap();
    assert_eq!(member.m_name, "alice");
    assert_eq!(member.email, "alice@example.com");

    let wrong_device = SessionLookup::new(token.as_str(), 3600, "laptop", "10.0.0.1");
    let err = executor
        .lookup_member_by_session::<Row>(&wrong_device, None)
        .await
        .unwrap_err();
    assert_eq!(err.code(), 1050);

    exec(
        &access,
        &format!("UPDATE {sessions} SET created_time = NOW() - interval '2 hours'"),
    )
    .await;
    let expired = SessionLookup::new(token.as_str(), 3600, "phone", "10.0.0.1");
    let err = executor
        .lookup_member_by_session::<Row>(&expired, None)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthorized);

    access.truncate_all(&[sessions, members]).await;
    drop_tables(&access, &[sessions, members]).await;
}

#[tokio::test]
async fn test_uuid_and_timestamp_shaped_text_keys() {
    let Some(access) = connect(TableNameConfig::default()).await else {
        return;
    };
    let executor = access.executor();
    let table = unique("tokens");
    exec(
        &access,
        &format!(
            "CREATE TABLE {table} (id SERIAL PRIMARY KEY, token TEXT NOT NULL UNIQUE, \
             label TEXT NOT NULL, stamp TEXT NOT NULL)"
        ),
    )
    .await;

    let token = Uuid::new_v4().to_string();
    let stamp = "2024-05-01T10:00:00Z";
    let mut handle = executor.source().acquire().await.unwrap();
    executor
        .insert_one(
            &InsertOne::new(
                &table,
                FieldMap::new()
                    .set("token", token.as_str())
                    .set("label", "first")
                    .set("stamp", stamp),
            ),
            &mut handle,
        )
        .await
        .unwrap();
    executor.source().release(handle, false).await;

    let by_token = || FieldMap::new().set("token", token.as_str());
    let found: Row = executor
        .select_one_or_fail(&Select::table(&table).filter(by_token()), None)
        .await
        .unwrap();
    assert_eq!(found["token"], json!(token));

    executor
        .update_one_or_fail(
            &Update::table(&table)
                .set(FieldMap::new().set("label", "second"))
                .filter(by_token()),
            None,
        )
        .await
        .unwrap();

    let by_stamp: Row = executor
        .select_one_or_fail(
            &Select::table(&table).filter(FieldMap::new().set("stamp", stamp)),
            None,
        )
        .await
        .unwrap();
    assert_eq!(by_stamp["label"], json!("second"));

    let delete = Delete::table(&table).filter(by_token());
    assert_eq!(executor.delete_or_fail(&delete, None).await.unwrap().ids().len(), 1);

    drop_tables(&access, &[&table]).await;
}

#[tokio::test]
async fn test_decodes_numeric_bytea_and_network_columns() {
    let Some(access) = connect(TableNameConfig::default()).await else {
        return;
    };
    let executor = access.executor();
    let table = unique("ledger");
    exec(
        &access,
        &format!(
            "CREATE TABLE {table} (id SERIAL PRIMARY KEY, amount NUMERIC(10,2) NOT NULL, \
             data BYTEA NOT NULL, ip INET NOT NULL, net CIDR NOT NULL, opened TIME NOT NULL, note NUMERIC)"
        ),
    )
    .await;
    exec(
        &access,
        &format!(
            "INSERT INTO {table} (amount, data, ip, net, opened) \
             VALUES (12.5, '\\x0102ff', '10.0.0.1', '192.168.0.0/24', '08:30:00')"
        ),
    )
    .await;

    let row: Row = executor
        .select_one_or_fail(&Select::table(&table), None)
        .await
        .unwrap();
    assert_eq!(row["amount"], json!("12.50"));
    assert_eq!(row["data"], json!("\\x0102ff"));
    assert!(row["ip"].as_str().unwrap().starts_with("10.0.0.1"));
    assert_eq!(row["net"], json!("192.168.0.0/24"));
    assert_eq!(row["opened"], json!("08:30:00"));
    assert_eq!(row["note"], Value::Null);

    drop_tables(&access, &[&table]).await;
}

#[tokio::test]
async fn test_health_check() {
    let Some(access) = connect(TableNameConfig::default()).await else {
        return;
    };
    access.health_check().await.unwrap();
    access.shutdown().await;
    assert!(access.pool().is_closed());
}
