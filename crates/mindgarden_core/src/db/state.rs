//! Versioned state documents over the `app_state` table.
//!
//! # Responsibility
//! - Read and write whole JSON state documents by storage key.
//! - Detect lost read-modify-write races via per-key version stamps.
//! - Verify connection readiness for repositories built on this layer.
//!
//! # Invariants
//! - Every successful write increments the key's version by exactly one.
//! - A write guarded by a stale version changes nothing and fails with
//!   `StateError::Conflict`.
//! - An absent key reads as `None` and is written with expected version 0.
//!
//! # See also
//! - docs/architecture/data-model.md

use crate::db::{migrations, DbError};
use chrono::Utc;
use log::warn;
use rusqlite::{params, Connection};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

const STATE_TABLE: &str = "app_state";

/// Storage key holding the ordered stress entry array.
pub const STRESS_ITEMS_KEY: &str = "stressItems";
/// Storage key holding the calendar-date to mood map.
pub const MOOD_HISTORY_KEY: &str = "moodHistory";
/// Storage key holding the practice reminder switch.
pub const REMINDER_ENABLED_KEY: &str = "reminderEnabled";
/// Storage key holding the practice reminder time.
pub const REMINDER_TIME_KEY: &str = "reminderTime";
/// Storage key holding the last completed practice instant.
pub const LAST_EXERCISE_TIME_KEY: &str = "lastExerciseTime";

pub type StateResult<T> = Result<T, StateError>;

/// Error taxonomy for the versioned state layer.
#[derive(Debug)]
pub enum StateError {
    Db(DbError),
    /// Connection has not been migrated to the version this binary expects.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// Write guarded by a version stamp that is no longer current.
    Conflict {
        key: &'static str,
        expected: i64,
        actual: i64,
    },
    /// Persisted document cannot be decoded.
    Corrupt {
        key: &'static str,
        details: String,
    },
    /// Value cannot be encoded for persistence.
    Encode {
        key: &'static str,
        details: String,
    },
}

impl Display for StateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection is not migrated: expected schema version {expected_version}, found {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table is missing: {table}")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column is missing: {table}.{column}")
            }
            Self::Conflict {
                key,
                expected,
                actual,
            } => write!(
                f,
                "state write conflict on `{key}`: expected version {expected}, found {actual}"
            ),
            Self::Corrupt { key, details } => {
                write!(f, "corrupt state document `{key}`: {details}")
            }
            Self::Encode { key, details } => {
                write!(f, "failed to encode state document `{key}`: {details}")
            }
        }
    }
}

impl Error for StateError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for StateError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StateError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// One decoded state document together with its concurrency version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionedDoc<T> {
    pub value: T,
    pub version: i64,
}

/// Splits an optional document into `(value, expected_version)`.
///
/// An absent document defaults to `(T::default(), 0)`, so the follow-up
/// write targets version 0 and inserts the row.
pub fn unpack_or_default<T: Default>(doc: Option<VersionedDoc<T>>) -> (T, i64) {
    match doc {
        Some(doc) => (doc.value, doc.version),
        None => (T::default(), 0),
    }
}

/// Reads and decodes the document stored under `key`.
pub fn read_doc<T: DeserializeOwned>(
    conn: &Connection,
    key: &'static str,
) -> StateResult<Option<VersionedDoc<T>>> {
    let mut stmt = conn.prepare("SELECT value, version FROM app_state WHERE key = ?1;")?;
    let mut rows = stmt.query([key])?;

    if let Some(row) = rows.next()? {
        let raw: String = row.get("value")?;
        let version: i64 = row.get("version")?;
        let value = serde_json::from_str(&raw).map_err(|err| StateError::Corrupt {
            key,
            details: err.to_string(),
        })?;
        return Ok(Some(VersionedDoc { value, version }));
    }

    Ok(None)
}

/// Writes the document under `key`, guarded by the version the caller read.
///
/// # Contract
/// - `expected_version == 0` inserts; any existing row is a conflict.
/// - `expected_version > 0` updates only the row still at that version.
/// - Returns the new version on success.
pub fn write_doc<T: Serialize>(
    conn: &Connection,
    key: &'static str,
    value: &T,
    expected_version: i64,
) -> StateResult<i64> {
    let raw = serde_json::to_string(value).map_err(|err| StateError::Encode {
        key,
        details: err.to_string(),
    })?;
    let now_ms = Utc::now().timestamp_millis();

    let changed = if expected_version == 0 {
        conn.execute(
            "INSERT OR IGNORE INTO app_state (key, value, version, updated_at)
             VALUES (?1, ?2, 1, ?3);",
            params![key, raw, now_ms],
        )?
    } else {
        conn.execute(
            "UPDATE app_state
             SET
                value = ?2,
                version = version + 1,
                updated_at = ?3
             WHERE key = ?1
               AND version = ?4;",
            params![key, raw, now_ms, expected_version],
        )?
    };

    if changed == 0 {
        let actual = current_version(conn, key)?;
        warn!(
            "event=state_write module=db status=conflict key={key} expected={expected_version} actual={actual}"
        );
        return Err(StateError::Conflict {
            key,
            expected: expected_version,
            actual,
        });
    }

    Ok(expected_version + 1)
}

/// Verifies the connection is migrated and the state table is usable.
///
/// Repositories call this once at construction so later operations can
/// assume a well-formed `app_state` table.
pub fn ensure_state_ready(conn: &Connection) -> StateResult<()> {
    let expected_version = migrations::latest_version();
    let actual_version = migrations::current_user_version(conn)?;
    if actual_version != expected_version {
        return Err(StateError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, STATE_TABLE)? {
        return Err(StateError::MissingRequiredTable(STATE_TABLE));
    }

    for column in ["key", "value", "version", "updated_at"] {
        if !table_has_column(conn, STATE_TABLE, column)? {
            return Err(StateError::MissingRequiredColumn {
                table: STATE_TABLE,
                column,
            });
        }
    }

    Ok(())
}

fn current_version(conn: &Connection, key: &str) -> StateResult<i64> {
    let mut stmt = conn.prepare("SELECT version FROM app_state WHERE key = ?1;")?;
    let mut rows = stmt.query([key])?;
    if let Some(row) = rows.next()? {
        return Ok(row.get(0)?);
    }
    Ok(0)
}

fn table_exists(conn: &Connection, table: &str) -> StateResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> StateResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
