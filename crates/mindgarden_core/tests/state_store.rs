use mindgarden_core::db::migrations::latest_version;
use mindgarden_core::db::state::{
    ensure_state_ready, read_doc, unpack_or_default, write_doc, StateError, VersionedDoc,
};
use mindgarden_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "app_state");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mindgarden.db");

    let conn_first = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_first), latest_version());
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    assert_table_exists(&conn_second, "app_state");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn write_then_read_roundtrip_preserves_value_and_version() {
    let conn = open_db_in_memory().unwrap();

    let version = write_doc(&conn, "probe", &vec!["a".to_string(), "b".to_string()], 0).unwrap();
    assert_eq!(version, 1);

    let doc: VersionedDoc<Vec<String>> = read_doc(&conn, "probe").unwrap().unwrap();
    assert_eq!(doc.value, vec!["a".to_string(), "b".to_string()]);
    assert_eq!(doc.version, 1);
}

#[test]
fn absent_key_reads_as_none_and_unpacks_to_default() {
    let conn = open_db_in_memory().unwrap();

    let doc = read_doc::<Vec<String>>(&conn, "probe").unwrap();
    assert!(doc.is_none());

    let (value, version) = unpack_or_default(doc);
    assert!(value.is_empty());
    assert_eq!(version, 0);
}

#[test]
fn each_write_increments_version_by_one() {
    let conn = open_db_in_memory().unwrap();

    let v1 = write_doc(&conn, "probe", &1_u32, 0).unwrap();
    let v2 = write_doc(&conn, "probe", &2_u32, v1).unwrap();
    let v3 = write_doc(&conn, "probe", &3_u32, v2).unwrap();
    assert_eq!((v1, v2, v3), (1, 2, 3));

    let stored: i64 = conn
        .query_row(
            "SELECT version FROM app_state WHERE key = 'probe';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(stored, 3);
}

#[test]
fn insert_racing_an_existing_row_returns_conflict() {
    let conn = open_db_in_memory().unwrap();
    write_doc(&conn, "probe", &"first", 0).unwrap();

    let err = write_doc(&conn, "probe", &"second", 0).unwrap_err();
    match err {
        StateError::Conflict {
            key,
            expected,
            actual,
        } => {
            assert_eq!(key, "probe");
            assert_eq!(expected, 0);
            assert_eq!(actual, 1);
        }
        other => panic!("unexpected error: {other}"),
    }

    let doc: VersionedDoc<String> = read_doc(&conn, "probe").unwrap().unwrap();
    assert_eq!(doc.value, "first");
}

#[test]
fn update_guarded_by_stale_version_changes_nothing() {
    let conn = open_db_in_memory().unwrap();
    write_doc(&conn, "probe", &"v1", 0).unwrap();
    write_doc(&conn, "probe", &"v2", 1).unwrap();

    let err = write_doc(&conn, "probe", &"late", 1).unwrap_err();
    assert!(matches!(
        err,
        StateError::Conflict {
            key: "probe",
            expected: 1,
            actual: 2
        }
    ));

    let doc: VersionedDoc<String> = read_doc(&conn, "probe").unwrap().unwrap();
    assert_eq!(doc.value, "v2");
    assert_eq!(doc.version, 2);
}

#[test]
fn undecodable_document_reads_as_corrupt() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO app_state (key, value, version, updated_at)
         VALUES ('probe', 'not json', 1, 0);",
        [],
    )
    .unwrap();

    let err = read_doc::<Vec<String>>(&conn, "probe").unwrap_err();
    assert!(matches!(err, StateError::Corrupt { key: "probe", .. }));
}

#[test]
fn readiness_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let result = ensure_state_ready(&conn);
    match result {
        Err(StateError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(()) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn readiness_rejects_connection_without_state_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = ensure_state_ready(&conn);
    assert!(matches!(
        result,
        Err(StateError::MissingRequiredTable("app_state"))
    ));
}

#[test]
fn readiness_rejects_state_table_missing_required_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE app_state (
            key TEXT PRIMARY KEY NOT NULL,
            value TEXT NOT NULL
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = ensure_state_ready(&conn);
    assert!(matches!(
        result,
        Err(StateError::MissingRequiredColumn {
            table: "app_state",
            column: "version"
        })
    ));
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
