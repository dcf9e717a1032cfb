//! Core domain logic for MindGarden.
//! This crate is the single source of truth for business invariants.

pub mod breathing;
pub mod calendar;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod notify;
pub mod repo;
pub mod schedule;
pub mod service;

pub use breathing::{cycle_len, phase_at, BreathPhase, CYCLE};
pub use calendar::{MonthGrid, WEEKDAY_HEADERS};
pub use config::CoreConfig;
pub use logging::{default_log_level, init_from_config, init_logging, logging_status};
pub use model::mood::{parse_mood, Mood, ALL_MOODS};
pub use model::stress::{
    parse_stress_category, EntryId, StressCategory, StressDraft, StressEntry,
    StressValidationError, ALL_CATEGORIES,
};
pub use notify::gateway::{
    GatewayError, GatewayResult, NotificationGateway, NotificationRequest, PermissionStatus,
    Trigger,
};
pub use notify::memory::InMemoryNotificationCenter;
pub use repo::mood_ledger::{MoodRepository, SqliteMoodLedger};
pub use repo::settings::{SettingsRepository, SqliteSettings};
pub use repo::stress_log::{RepoError, RepoResult, SqliteStressLog, StressLogRepository};
pub use schedule::scheduler::{ReminderScheduler, ScheduleError, ScheduleResult};
pub use service::capture::{
    delete_entry_with_reminder, save_entry_with_reminder, update_entry_with_reminder,
    CaptureError, CaptureOutcome, ReminderDisposition,
};
pub use service::mood::MoodLedgerService;
pub use service::practice::{
    GardenVitality, PracticeError, PracticeService, ReminderStatus, PRACTICE_REMINDER_ID,
};
pub use service::stress::StressLogService;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
