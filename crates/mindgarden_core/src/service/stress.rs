//! Stress log use-case service.
//!
//! # Responsibility
//! - Provide stable CRUD entry points for stress log callers.
//!
//! # Invariants
//! - Service APIs never bypass repository validation contracts.
//! - List order is insertion order; the service never re-sorts entries.

use crate::model::stress::{StressDraft, StressEntry};
use crate::repo::stress_log::{RepoResult, StressLogRepository};
use log::info;

/// Use-case service wrapper for stress log operations.
pub struct StressLogService<R: StressLogRepository> {
    repo: R,
}

impl<R: StressLogRepository> StressLogService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Adds one entry from draft input and returns it as stored.
    pub fn add_entry(&self, draft: &StressDraft) -> RepoResult<StressEntry> {
        let entry = self.repo.add(draft)?;
        info!(
            "event=stress_add module=service status=ok entry_id={} category={}",
            entry.id,
            entry.category.as_str()
        );
        Ok(entry)
    }

    /// Replaces an existing entry and returns it as stored.
    pub fn update_entry(&self, entry: &StressEntry) -> RepoResult<StressEntry> {
        let stored = self.repo.update(entry)?;
        info!(
            "event=stress_update module=service status=ok entry_id={}",
            stored.id
        );
        Ok(stored)
    }

    /// Deletes one entry by id. Deleting an absent id is a silent no-op.
    pub fn delete_entry(&self, id: &str) -> RepoResult<()> {
        self.repo.delete(id)?;
        info!("event=stress_delete module=service status=ok entry_id={id}");
        Ok(())
    }

    /// Flips one entry's solved flag and returns the updated entry.
    pub fn toggle_solved(&self, id: &str) -> RepoResult<StressEntry> {
        let entry = self.repo.toggle_solved(id)?;
        info!(
            "event=stress_toggle module=service status=ok entry_id={} solved={}",
            entry.id, entry.solved
        );
        Ok(entry)
    }

    /// Returns the full entry list in insertion order.
    pub fn entries(&self) -> RepoResult<Vec<StressEntry>> {
        self.repo.list()
    }
}
