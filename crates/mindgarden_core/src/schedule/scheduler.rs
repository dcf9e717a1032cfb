//! Per-entry reminder scheduler.
//!
//! # Responsibility
//! - Gate reminder registration behind time validation and permission state.
//! - Keep registration identity tied to stress entry ids.
//!
//! # Invariants
//! - `schedule` performs no registration when any check fails.
//! - Re-scheduling an entry supersedes only that entry's registration.
//! - Gateway failures are reported as-is and never retried.
//!
//! # See also
//! - docs/architecture/reminders.md

use crate::model::stress::StressEntry;
use crate::notify::gateway::{
    GatewayError, NotificationGateway, NotificationRequest, PermissionStatus, Trigger,
};
use chrono::{DateTime, Utc};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

const ENTRY_REMINDER_TITLE: &str = "Time to work on your solution! 💡";

pub type ScheduleResult<T> = Result<T, ScheduleError>;

/// Scheduling error taxonomy.
#[derive(Debug)]
pub enum ScheduleError {
    /// Requested instant is not strictly in the future.
    TimeNotInFuture {
        requested: DateTime<Utc>,
        now: DateTime<Utc>,
    },
    /// Notification permission capability is absent.
    PermissionDenied,
    /// Platform gateway failure.
    Gateway(GatewayError),
}

impl Display for ScheduleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TimeNotInFuture { requested, now } => write!(
                f,
                "reminder time {} is not after {}",
                requested.to_rfc3339(),
                now.to_rfc3339()
            ),
            Self::PermissionDenied => write!(f, "notification permission is not granted"),
            Self::Gateway(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ScheduleError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Gateway(err) => Some(err),
            _ => None,
        }
    }
}

impl From<GatewayError> for ScheduleError {
    fn from(value: GatewayError) -> Self {
        Self::Gateway(value)
    }
}

/// Scheduler placing one-shot entry reminders on a notification gateway.
pub struct ReminderScheduler<G: NotificationGateway> {
    gateway: G,
}

impl<G: NotificationGateway> ReminderScheduler<G> {
    /// Creates a scheduler over the provided gateway.
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    /// Returns the wrapped gateway.
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Schedules the entry's reminder at the given instant.
    ///
    /// # Contract
    /// - Fails with `TimeNotInFuture` unless `when` is strictly after now;
    ///   no registration is performed.
    /// - Fails with `PermissionDenied` when the permission capability is
    ///   absent; no registration is performed.
    /// - Success leaves exactly one pending registration for this entry,
    ///   superseding any earlier one, and touches no other identifier.
    pub fn schedule(&self, entry: &StressEntry, when: DateTime<Utc>) -> ScheduleResult<()> {
        let now = Utc::now();
        if when <= now {
            return Err(ScheduleError::TimeNotInFuture {
                requested: when,
                now,
            });
        }

        if self.gateway.permission_status()? != PermissionStatus::Granted {
            return Err(ScheduleError::PermissionDenied);
        }

        self.gateway.register(NotificationRequest {
            identifier: entry.id.clone(),
            title: ENTRY_REMINDER_TITLE.to_string(),
            body: format!("Solution: {}", entry.solution),
            trigger: Trigger::Once(when),
        })?;

        info!(
            "event=reminder_schedule module=schedule status=ok entry_id={} fire_at={}",
            entry.id,
            when.to_rfc3339()
        );
        Ok(())
    }

    /// Cancels the entry's pending reminder. Cancelling an entry without a
    /// registration is a no-op.
    pub fn cancel(&self, entry_id: &str) -> ScheduleResult<()> {
        self.gateway.cancel(entry_id)?;
        info!("event=reminder_cancel module=schedule status=ok entry_id={entry_id}");
        Ok(())
    }
}
