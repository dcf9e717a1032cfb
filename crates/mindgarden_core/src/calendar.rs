//! Month grid derivation for the mood calendar.
//!
//! # Responsibility
//! - Compute month length and leading weekday offset for a Monday-start grid.
//! - Pair day numbers with recorded moods for rendering.
//!
//! # Invariants
//! - Day numbering is 1-based and covers every day of the month exactly once.
//! - `leading_blanks` counts empty cells before day 1 in a Monday-start week.
//! - Month boundaries follow the proleptic Gregorian calendar.

use crate::model::mood::Mood;
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

/// Header labels for a Monday-start week row.
pub const WEEKDAY_HEADERS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// One month of the mood calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    year: i32,
    month: u32,
    days_in_month: u32,
    leading_blanks: u32,
    moods: BTreeMap<u32, Mood>,
}

impl MonthGrid {
    /// Builds the grid for one month, pairing day numbers with recorded moods.
    ///
    /// Returns `None` when `month` is outside `1..=12`.
    pub fn build(year: i32, month: u32, history: &BTreeMap<NaiveDate, Mood>) -> Option<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let days_in_month = days_in_month(year, month)?;
        let leading_blanks = first.weekday().num_days_from_monday();

        let mut moods = BTreeMap::new();
        for (date, mood) in history {
            if date.year() == year && date.month() == month {
                moods.insert(date.day(), *mood);
            }
        }

        Some(Self {
            year,
            month,
            days_in_month,
            leading_blanks,
            moods,
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Number of days in this month.
    pub fn days_in_month(&self) -> u32 {
        self.days_in_month
    }

    /// Empty cells before day 1 in a Monday-start week (`0..=6`).
    pub fn leading_blanks(&self) -> u32 {
        self.leading_blanks
    }

    /// Mood recorded for one day of this month.
    pub fn mood_on(&self, day: u32) -> Option<Mood> {
        self.moods.get(&day).copied()
    }

    /// Iterates `(day, recorded mood)` over every day of the month.
    ///
    /// Each call returns a fresh iterator, so rendering passes can restart.
    pub fn days(&self) -> impl Iterator<Item = (u32, Option<Mood>)> + '_ {
        (1..=self.days_in_month).map(move |day| (day, self.moods.get(&day).copied()))
    }
}

fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    u32::try_from(next_first.signed_duration_since(first).num_days()).ok()
}

#[cfg(test)]
mod tests {
    use super::{MonthGrid, WEEKDAY_HEADERS};
    use crate::model::mood::Mood;
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn leap_year_february_has_29_days() {
        let grid = MonthGrid::build(2024, 2, &BTreeMap::new()).unwrap();
        assert_eq!(grid.days_in_month(), 29);

        let grid = MonthGrid::build(2025, 2, &BTreeMap::new()).unwrap();
        assert_eq!(grid.days_in_month(), 28);
    }

    #[test]
    fn century_leap_rule_is_honored() {
        assert_eq!(
            MonthGrid::build(2000, 2, &BTreeMap::new()).unwrap().days_in_month(),
            29
        );
        assert_eq!(
            MonthGrid::build(1900, 2, &BTreeMap::new()).unwrap().days_in_month(),
            28
        );
    }

    #[test]
    fn leading_blanks_use_monday_start() {
        // 2024-01-01 was a Monday, 2024-09-01 a Sunday.
        let january = MonthGrid::build(2024, 1, &BTreeMap::new()).unwrap();
        assert_eq!(january.leading_blanks(), 0);

        let september = MonthGrid::build(2024, 9, &BTreeMap::new()).unwrap();
        assert_eq!(september.leading_blanks(), 6);

        assert_eq!(WEEKDAY_HEADERS[0], "Mon");
        assert_eq!(WEEKDAY_HEADERS[6], "Sun");
    }

    #[test]
    fn invalid_month_yields_no_grid() {
        assert!(MonthGrid::build(2024, 0, &BTreeMap::new()).is_none());
        assert!(MonthGrid::build(2024, 13, &BTreeMap::new()).is_none());
    }

    #[test]
    fn days_pairs_recorded_moods_and_restarts() {
        let mut history = BTreeMap::new();
        history.insert(date(2024, 2, 1), Mood::Good);
        history.insert(date(2024, 2, 29), Mood::Okay);
        // A neighboring month must not leak into the grid.
        history.insert(date(2024, 3, 1), Mood::Terrible);

        let grid = MonthGrid::build(2024, 2, &history).unwrap();
        assert_eq!(grid.mood_on(1), Some(Mood::Good));
        assert_eq!(grid.mood_on(29), Some(Mood::Okay));
        assert_eq!(grid.mood_on(2), None);

        let first_pass: Vec<_> = grid.days().collect();
        let second_pass: Vec<_> = grid.days().collect();
        assert_eq!(first_pass.len(), 29);
        assert_eq!(first_pass, second_pass);
        assert_eq!(first_pass[0], (1, Some(Mood::Good)));
        assert_eq!(first_pass[28], (29, Some(Mood::Okay)));
    }
}
