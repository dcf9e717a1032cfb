//! Settings repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist the practice reminder switch, its configured time, and the
//!   last completed practice instant as scalar state documents.
//!
//! # Invariants
//! - Disabling the reminder keeps the configured time, so re-enabling
//!   restores the user's choice.
//! - Absent keys read as disabled/never-practiced rather than as errors.
//!
//! # See also
//! - docs/architecture/reminders.md

use crate::db::state::{
    ensure_state_ready, read_doc, unpack_or_default, write_doc, LAST_EXERCISE_TIME_KEY,
    REMINDER_ENABLED_KEY, REMINDER_TIME_KEY,
};
use crate::repo::stress_log::RepoResult;
use chrono::{DateTime, Utc};
use rusqlite::Connection;

/// Repository interface for app-level settings state.
pub trait SettingsRepository {
    /// Persists the practice reminder switch.
    fn set_practice_reminder_enabled(&self, enabled: bool) -> RepoResult<()>;
    /// Returns the practice reminder switch. Absent reads as disabled.
    fn practice_reminder_enabled(&self) -> RepoResult<bool>;
    /// Persists the practice reminder time.
    fn set_practice_reminder_time(&self, time: DateTime<Utc>) -> RepoResult<()>;
    /// Returns the configured practice reminder time.
    fn practice_reminder_time(&self) -> RepoResult<Option<DateTime<Utc>>>;
    /// Records the completion instant of a practice session.
    fn set_last_practice(&self, at: DateTime<Utc>) -> RepoResult<()>;
    /// Returns the last recorded practice completion instant.
    fn last_practice(&self) -> RepoResult<Option<DateTime<Utc>>>;
}

/// SQLite-backed settings store over scalar state documents.
pub struct SqliteSettings<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSettings<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_state_ready(conn)?;
        Ok(Self { conn })
    }

    fn write_instant(&self, key: &'static str, at: DateTime<Utc>) -> RepoResult<()> {
        let doc = read_doc::<DateTime<Utc>>(self.conn, key)?;
        let version = doc.map_or(0, |doc| doc.version);
        write_doc(self.conn, key, &at, version)?;
        Ok(())
    }

    fn read_instant(&self, key: &'static str) -> RepoResult<Option<DateTime<Utc>>> {
        let doc = read_doc::<DateTime<Utc>>(self.conn, key)?;
        Ok(doc.map(|doc| doc.value))
    }
}

impl SettingsRepository for SqliteSettings<'_> {
    fn set_practice_reminder_enabled(&self, enabled: bool) -> RepoResult<()> {
        let doc = read_doc::<bool>(self.conn, REMINDER_ENABLED_KEY)?;
        let (_, version) = unpack_or_default(doc);
        write_doc(self.conn, REMINDER_ENABLED_KEY, &enabled, version)?;
        Ok(())
    }

    fn practice_reminder_enabled(&self) -> RepoResult<bool> {
        let doc = read_doc::<bool>(self.conn, REMINDER_ENABLED_KEY)?;
        let (enabled, _) = unpack_or_default(doc);
        Ok(enabled)
    }

    fn set_practice_reminder_time(&self, time: DateTime<Utc>) -> RepoResult<()> {
        self.write_instant(REMINDER_TIME_KEY, time)
    }

    fn practice_reminder_time(&self) -> RepoResult<Option<DateTime<Utc>>> {
        self.read_instant(REMINDER_TIME_KEY)
    }

    fn set_last_practice(&self, at: DateTime<Utc>) -> RepoResult<()> {
        self.write_instant(LAST_EXERCISE_TIME_KEY, at)
    }

    fn last_practice(&self) -> RepoResult<Option<DateTime<Utc>>> {
        self.read_instant(LAST_EXERCISE_TIME_KEY)
    }
}
