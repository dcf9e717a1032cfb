//! Stress log repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the `stressItems` state document.
//! - Assign collision-free entry ids derived from the creation instant.
//!
//! # Invariants
//! - Write paths must validate entries before persistence.
//! - Entry order is insertion order; mutation never reorders.
//! - `delete` of an absent id is a silent no-op and skips the write-back,
//!   so a vacuous delete cannot raise a version conflict.
//!
//! # See also
//! - docs/architecture/data-model.md

use crate::db::state::{
    ensure_state_ready, read_doc, unpack_or_default, write_doc, StateError, STRESS_ITEMS_KEY,
};
use crate::model::stress::{normalize_field, EntryId, StressDraft, StressEntry, StressValidationError};
use chrono::{DateTime, Utc};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error shared by the state-document repositories.
#[derive(Debug)]
pub enum RepoError {
    Validation(StressValidationError),
    State(StateError),
    NotFound(EntryId),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::State(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "stress entry not found: {id}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::State(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

impl From<StressValidationError> for RepoError {
    fn from(value: StressValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StateError> for RepoError {
    fn from(value: StateError) -> Self {
        Self::State(value)
    }
}

/// Repository interface for stress log operations.
pub trait StressLogRepository {
    /// Appends a new entry, assigning its id and creation instant, and
    /// returns the entry as stored.
    fn add(&self, draft: &StressDraft) -> RepoResult<StressEntry>;
    /// Replaces the entry with the matching id in place and returns it as
    /// stored.
    fn update(&self, entry: &StressEntry) -> RepoResult<StressEntry>;
    /// Removes the entry with the given id. Removing an absent id is a
    /// silent no-op.
    fn delete(&self, id: &str) -> RepoResult<()>;
    /// Flips the entry's solved flag and returns the updated entry.
    fn toggle_solved(&self, id: &str) -> RepoResult<StressEntry>;
    /// Returns the full entry list in insertion order.
    fn list(&self) -> RepoResult<Vec<StressEntry>>;
}

/// SQLite-backed stress log over the `stressItems` document.
pub struct SqliteStressLog<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStressLog<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_state_ready(conn)?;
        Ok(Self { conn })
    }
}

impl StressLogRepository for SqliteStressLog<'_> {
    fn add(&self, draft: &StressDraft) -> RepoResult<StressEntry> {
        draft.validate()?;

        let doc = read_doc::<Vec<StressEntry>>(self.conn, STRESS_ITEMS_KEY)?;
        let (mut items, version) = unpack_or_default(doc);

        let now = Utc::now();
        let entry = StressEntry {
            id: next_entry_id(now, &items),
            description: normalize_field(&draft.description),
            category: draft.category,
            solution: normalize_field(&draft.solution),
            solved: false,
            created_at: now,
            reminder_time: draft.reminder_time,
        };

        items.push(entry.clone());
        write_doc(self.conn, STRESS_ITEMS_KEY, &items, version)?;
        Ok(entry)
    }

    fn update(&self, entry: &StressEntry) -> RepoResult<StressEntry> {
        entry.validate()?;

        let doc = read_doc::<Vec<StressEntry>>(self.conn, STRESS_ITEMS_KEY)?;
        let (mut items, version) = unpack_or_default(doc);

        let slot = items
            .iter_mut()
            .find(|item| item.id == entry.id)
            .ok_or_else(|| RepoError::NotFound(entry.id.clone()))?;

        *slot = StressEntry {
            description: normalize_field(&entry.description),
            solution: normalize_field(&entry.solution),
            ..entry.clone()
        };
        let stored = slot.clone();

        write_doc(self.conn, STRESS_ITEMS_KEY, &items, version)?;
        Ok(stored)
    }

    fn delete(&self, id: &str) -> RepoResult<()> {
        let doc = read_doc::<Vec<StressEntry>>(self.conn, STRESS_ITEMS_KEY)?;
        let (mut items, version) = unpack_or_default(doc);

        let before = items.len();
        items.retain(|item| item.id != id);
        if items.len() == before {
            return Ok(());
        }

        write_doc(self.conn, STRESS_ITEMS_KEY, &items, version)?;
        Ok(())
    }

    fn toggle_solved(&self, id: &str) -> RepoResult<StressEntry> {
        let doc = read_doc::<Vec<StressEntry>>(self.conn, STRESS_ITEMS_KEY)?;
        let (mut items, version) = unpack_or_default(doc);

        let slot = items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| RepoError::NotFound(id.to_string()))?;
        slot.solved = !slot.solved;
        let stored = slot.clone();

        write_doc(self.conn, STRESS_ITEMS_KEY, &items, version)?;
        Ok(stored)
    }

    fn list(&self) -> RepoResult<Vec<StressEntry>> {
        let doc = read_doc::<Vec<StressEntry>>(self.conn, STRESS_ITEMS_KEY)?;
        let (items, _) = unpack_or_default(doc);
        Ok(items)
    }
}

/// Derives the next entry id from the creation instant.
///
/// Ids are epoch-millisecond strings. When two entries land inside the same
/// millisecond, the candidate is bumped until it is unique within the stored
/// collection.
fn next_entry_id(now: DateTime<Utc>, items: &[StressEntry]) -> EntryId {
    let mut candidate = now.timestamp_millis();
    loop {
        let id = candidate.to_string();
        if !items.iter().any(|item| item.id == id) {
            return id;
        }
        candidate += 1;
    }
}
