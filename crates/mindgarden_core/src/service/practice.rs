//! Daily practice service.
//!
//! # Responsibility
//! - Manage the repeating practice reminder and its persisted settings.
//! - Track practice completion recency for the garden view.
//!
//! # Invariants
//! - The practice reminder owns exactly one registration identifier, and
//!   enable/disable never touches registrations owned by stress entries.
//! - Permission is checked before any settings write.
//! - Disabling keeps the configured time, so re-enabling restores it.
//!
//! # See also
//! - docs/architecture/reminders.md

use crate::notify::gateway::{
    GatewayError, NotificationGateway, NotificationRequest, PermissionStatus, Trigger,
};
use crate::repo::settings::SettingsRepository;
use crate::repo::stress_log::RepoError;
use chrono::{DateTime, Duration, Local, Timelike, Utc};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Registration identifier owned by the daily practice reminder.
pub const PRACTICE_REMINDER_ID: &str = "practice-reminder";

const PRACTICE_REMINDER_TITLE: &str = "Time for your practice! 🧘";
const PRACTICE_REMINDER_BODY: &str = "A few moments of calm can make a big difference.";

/// Practice recency window for a flourishing garden.
const VITALITY_WINDOW_HOURS: i64 = 24;

pub type PracticeResult<T> = Result<T, PracticeError>;

/// Practice service error taxonomy.
#[derive(Debug)]
pub enum PracticeError {
    /// Notification permission capability is absent.
    PermissionDenied,
    Gateway(GatewayError),
    Repo(RepoError),
}

impl Display for PracticeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PermissionDenied => write!(f, "notification permission is not granted"),
            Self::Gateway(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PracticeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::PermissionDenied => None,
            Self::Gateway(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<GatewayError> for PracticeError {
    fn from(value: GatewayError) -> Self {
        Self::Gateway(value)
    }
}

impl From<RepoError> for PracticeError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Persisted practice reminder state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderStatus {
    pub enabled: bool,
    /// Configured time; survives disable so re-enabling restores it.
    pub time: Option<DateTime<Utc>>,
}

/// Garden health derived from practice recency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GardenVitality {
    Flourishing,
    NeedsAttention,
}

/// Practice reminder and recency facade over settings storage and the
/// notification gateway.
pub struct PracticeService<R: SettingsRepository, G: NotificationGateway> {
    repo: R,
    gateway: G,
}

impl<R: SettingsRepository, G: NotificationGateway> PracticeService<R, G> {
    /// Creates a service over the provided settings store and gateway.
    pub fn new(repo: R, gateway: G) -> Self {
        Self { repo, gateway }
    }

    /// Enables the daily practice reminder at the given local wall-clock
    /// time.
    ///
    /// # Contract
    /// - Fails with `PermissionDenied` before any settings write.
    /// - Persists the configured time and switch, then registers one
    ///   repeat-daily trigger under `PRACTICE_REMINDER_ID`, replacing only
    ///   that registration.
    pub fn enable_reminder(&self, time: DateTime<Local>) -> PracticeResult<()> {
        if self.gateway.permission_status()? != PermissionStatus::Granted {
            return Err(PracticeError::PermissionDenied);
        }

        self.repo
            .set_practice_reminder_time(time.with_timezone(&Utc))?;
        self.repo.set_practice_reminder_enabled(true)?;

        self.gateway.register(NotificationRequest {
            identifier: PRACTICE_REMINDER_ID.to_string(),
            title: PRACTICE_REMINDER_TITLE.to_string(),
            body: PRACTICE_REMINDER_BODY.to_string(),
            trigger: Trigger::RepeatDaily {
                hour: time.hour(),
                minute: time.minute(),
            },
        })?;

        info!(
            "event=practice_reminder_enable module=service status=ok hour={} minute={}",
            time.hour(),
            time.minute()
        );
        Ok(())
    }

    /// Disables the daily practice reminder, cancelling only its own
    /// registration.
    pub fn disable_reminder(&self) -> PracticeResult<()> {
        self.repo.set_practice_reminder_enabled(false)?;
        self.gateway.cancel(PRACTICE_REMINDER_ID)?;
        info!("event=practice_reminder_disable module=service status=ok");
        Ok(())
    }

    /// Returns the persisted reminder switch and configured time.
    pub fn reminder_status(&self) -> PracticeResult<ReminderStatus> {
        Ok(ReminderStatus {
            enabled: self.repo.practice_reminder_enabled()?,
            time: self.repo.practice_reminder_time()?,
        })
    }

    /// Records a completed practice session.
    pub fn record_practice(&self, at: DateTime<Utc>) -> PracticeResult<()> {
        self.repo.set_last_practice(at)?;
        info!("event=practice_complete module=service status=ok");
        Ok(())
    }

    /// Returns the garden vitality derived from practice recency.
    ///
    /// A garden with no recorded practice yet reads as flourishing,
    /// matching the first-run experience.
    pub fn vitality(&self, now: DateTime<Utc>) -> PracticeResult<GardenVitality> {
        let within_window = |at: DateTime<Utc>| {
            now.signed_duration_since(at) <= Duration::hours(VITALITY_WINDOW_HOURS)
        };

        Ok(match self.repo.last_practice()? {
            None => GardenVitality::Flourishing,
            Some(at) if within_window(at) => GardenVitality::Flourishing,
            Some(_) => GardenVitality::NeedsAttention,
        })
    }
}
