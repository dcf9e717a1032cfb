//! Mood ledger use-case service.
//!
//! # Responsibility
//! - Record daily moods against device-local calendar dates.
//! - Build month grids for calendar rendering.
//!
//! # Invariants
//! - `record_today` keys strictly by the local calendar date, so a late
//!   evening check-in lands on the local date, not the UTC one.
//! - One mood per date; re-recording replaces the previous value.

use crate::calendar::MonthGrid;
use crate::model::mood::Mood;
use crate::repo::mood_ledger::MoodRepository;
use crate::repo::stress_log::RepoResult;
use chrono::{Local, NaiveDate};
use log::info;

/// Use-case service wrapper for the daily mood ledger.
pub struct MoodLedgerService<R: MoodRepository> {
    repo: R,
}

impl<R: MoodRepository> MoodLedgerService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Records today's mood and returns the local date it was filed under.
    pub fn record_today(&self, mood: Mood) -> RepoResult<NaiveDate> {
        let today = Local::now().date_naive();
        self.record_on(today, mood)?;
        Ok(today)
    }

    /// Records the mood for one specific date.
    ///
    /// Deterministic sibling of `record_today`, also used for backfill.
    pub fn record_on(&self, date: NaiveDate, mood: Mood) -> RepoResult<()> {
        self.repo.record(date, mood)?;
        info!(
            "event=mood_record module=service status=ok date={date} mood={}",
            mood.as_str()
        );
        Ok(())
    }

    /// Returns the mood recorded for one date.
    pub fn mood_on(&self, date: NaiveDate) -> RepoResult<Option<Mood>> {
        self.repo.get(date)
    }

    /// Builds the month grid for one month of recorded moods.
    ///
    /// Returns `Ok(None)` when `month` is outside `1..=12`.
    pub fn month_view(&self, year: i32, month: u32) -> RepoResult<Option<MonthGrid>> {
        let history = self.repo.history()?;
        Ok(MonthGrid::build(year, month, &history))
    }
}
