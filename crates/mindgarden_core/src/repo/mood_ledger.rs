//! Mood ledger repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist one mood per calendar date in the `moodHistory` state document.
//!
//! # Invariants
//! - Date keys serialize as `YYYY-MM-DD` strings.
//! - Recording a date that already holds a mood overwrites it; no history
//!   of replaced values is kept.
//!
//! # See also
//! - docs/architecture/data-model.md

use crate::db::state::{
    ensure_state_ready, read_doc, unpack_or_default, write_doc, MOOD_HISTORY_KEY,
};
use crate::model::mood::Mood;
use crate::repo::stress_log::RepoResult;
use chrono::NaiveDate;
use rusqlite::Connection;
use std::collections::BTreeMap;

/// Repository interface for the daily mood ledger.
pub trait MoodRepository {
    /// Records the mood for one calendar date, overwriting any prior value.
    fn record(&self, date: NaiveDate, mood: Mood) -> RepoResult<()>;
    /// Returns the mood recorded for one calendar date.
    fn get(&self, date: NaiveDate) -> RepoResult<Option<Mood>>;
    /// Returns the full date-to-mood map.
    fn history(&self) -> RepoResult<BTreeMap<NaiveDate, Mood>>;
}

/// SQLite-backed mood ledger over the `moodHistory` document.
pub struct SqliteMoodLedger<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteMoodLedger<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_state_ready(conn)?;
        Ok(Self { conn })
    }
}

impl MoodRepository for SqliteMoodLedger<'_> {
    fn record(&self, date: NaiveDate, mood: Mood) -> RepoResult<()> {
        let doc = read_doc::<BTreeMap<NaiveDate, Mood>>(self.conn, MOOD_HISTORY_KEY)?;
        let (mut history, version) = unpack_or_default(doc);

        history.insert(date, mood);
        write_doc(self.conn, MOOD_HISTORY_KEY, &history, version)?;
        Ok(())
    }

    fn get(&self, date: NaiveDate) -> RepoResult<Option<Mood>> {
        let doc = read_doc::<BTreeMap<NaiveDate, Mood>>(self.conn, MOOD_HISTORY_KEY)?;
        let (history, _) = unpack_or_default(doc);
        Ok(history.get(&date).copied())
    }

    fn history(&self) -> RepoResult<BTreeMap<NaiveDate, Mood>> {
        let doc = read_doc::<BTreeMap<NaiveDate, Mood>>(self.conn, MOOD_HISTORY_KEY)?;
        let (history, _) = unpack_or_default(doc);
        Ok(history)
    }
}
