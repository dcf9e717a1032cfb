//! Entry capture flows.
//!
//! # Responsibility
//! - Compose stress persistence and reminder scheduling the way the entry
//!   form and list screens use them.
//!
//! # Invariants
//! - Validation and reminder-time checks run before any mutation; a
//!   rejected save leaves both the store and the gateway untouched.
//! - Permission denial after the save never discards the entry; the entry
//!   is kept with its reminder stamp cleared.
//! - Each flow touches only the registration owned by its entry id.

use crate::model::stress::{StressDraft, StressEntry};
use crate::notify::gateway::{GatewayError, NotificationGateway};
use crate::repo::stress_log::{RepoError, StressLogRepository};
use crate::schedule::scheduler::{ReminderScheduler, ScheduleError};
use crate::service::stress::StressLogService;
use chrono::{DateTime, Utc};
use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Outcome of a capture save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureOutcome {
    /// Entry as persisted.
    pub entry: StressEntry,
    /// What happened to the requested reminder.
    pub reminder: ReminderDisposition,
}

/// Reminder result attached to a capture save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReminderDisposition {
    /// No reminder was requested.
    NotRequested,
    /// Reminder registered for the saved entry.
    Scheduled(DateTime<Utc>),
    /// Permission capability absent; entry saved without a reminder.
    PermissionDenied,
    /// Registration failed after the entry was saved; entry kept without a
    /// reminder.
    Failed { reason: String },
}

/// Capture flow rejection. Nothing was persisted or deleted.
#[derive(Debug)]
pub enum CaptureError {
    /// Requested reminder instant is not strictly in the future.
    TimeNotInFuture {
        requested: DateTime<Utc>,
        now: DateTime<Utc>,
    },
    /// Store rejection (validation, missing entry, persistence).
    Store(RepoError),
    /// Gateway rejection while cancelling ahead of a delete.
    Gateway(GatewayError),
}

impl Display for CaptureError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TimeNotInFuture { requested, now } => write!(
                f,
                "reminder time {} is not after {}",
                requested.to_rfc3339(),
                now.to_rfc3339()
            ),
            Self::Store(err) => write!(f, "{err}"),
            Self::Gateway(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CaptureError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::TimeNotInFuture { .. } => None,
            Self::Store(err) => Some(err),
            Self::Gateway(err) => Some(err),
        }
    }
}

impl From<RepoError> for CaptureError {
    fn from(value: RepoError) -> Self {
        Self::Store(value)
    }
}

impl From<GatewayError> for CaptureError {
    fn from(value: GatewayError) -> Self {
        Self::Gateway(value)
    }
}

/// Saves a new entry and, when requested, schedules its reminder.
///
/// # Contract
/// - Invalid text or a non-future reminder time rejects the whole save;
///   nothing is persisted.
/// - A reminder blocked at scheduling time (permission, gateway) keeps the
///   saved entry, clears its reminder stamp, and reports the disposition.
pub fn save_entry_with_reminder<R, G>(
    stress: &StressLogService<R>,
    scheduler: &ReminderScheduler<G>,
    draft: &StressDraft,
) -> Result<CaptureOutcome, CaptureError>
where
    R: StressLogRepository,
    G: NotificationGateway,
{
    draft.validate().map_err(RepoError::Validation)?;
    reject_past_reminder(draft.reminder_time)?;

    let entry = stress.add_entry(draft)?;
    finish_with_reminder(stress, scheduler, entry)
}

/// Replaces an existing entry and reconciles its reminder registration.
///
/// Callers pass the freshly captured reminder choice: a set time supersedes
/// only this entry's registration, and a cleared time cancels only it.
pub fn update_entry_with_reminder<R, G>(
    stress: &StressLogService<R>,
    scheduler: &ReminderScheduler<G>,
    entry: &StressEntry,
) -> Result<CaptureOutcome, CaptureError>
where
    R: StressLogRepository,
    G: NotificationGateway,
{
    entry.validate().map_err(RepoError::Validation)?;
    reject_past_reminder(entry.reminder_time)?;

    let stored = stress.update_entry(entry)?;
    if stored.reminder_time.is_none() {
        scheduler
            .cancel(&stored.id)
            .map_err(|err| map_cancel_error(&stored.id, err))?;
        return Ok(CaptureOutcome {
            entry: stored,
            reminder: ReminderDisposition::NotRequested,
        });
    }

    finish_with_reminder(stress, scheduler, stored)
}

/// Deletes one entry together with its reminder registration.
///
/// The registration is cancelled first, so a gateway failure leaves the
/// entry in place. Both halves tolerate absence.
pub fn delete_entry_with_reminder<R, G>(
    stress: &StressLogService<R>,
    scheduler: &ReminderScheduler<G>,
    id: &str,
) -> Result<(), CaptureError>
where
    R: StressLogRepository,
    G: NotificationGateway,
{
    scheduler.cancel(id).map_err(|err| map_cancel_error(id, err))?;
    stress.delete_entry(id)?;
    Ok(())
}

fn finish_with_reminder<R, G>(
    stress: &StressLogService<R>,
    scheduler: &ReminderScheduler<G>,
    entry: StressEntry,
) -> Result<CaptureOutcome, CaptureError>
where
    R: StressLogRepository,
    G: NotificationGateway,
{
    let Some(when) = entry.reminder_time else {
        return Ok(CaptureOutcome {
            entry,
            reminder: ReminderDisposition::NotRequested,
        });
    };

    match scheduler.schedule(&entry, when) {
        Ok(()) => Ok(CaptureOutcome {
            entry,
            reminder: ReminderDisposition::Scheduled(when),
        }),
        Err(ScheduleError::PermissionDenied) => {
            let entry = strip_reminder(stress, entry)?;
            warn!(
                "event=capture_save module=service status=degraded reason=permission_denied entry_id={}",
                entry.id
            );
            Ok(CaptureOutcome {
                entry,
                reminder: ReminderDisposition::PermissionDenied,
            })
        }
        Err(err) => {
            // Covers gateway failures and the narrow race where the instant
            // slipped into the past between validation and registration.
            let reason = err.to_string();
            let entry = strip_reminder(stress, entry)?;
            warn!(
                "event=capture_save module=service status=degraded reason=schedule_failed entry_id={} error={reason}",
                entry.id
            );
            Ok(CaptureOutcome {
                entry,
                reminder: ReminderDisposition::Failed { reason },
            })
        }
    }
}

fn reject_past_reminder(requested: Option<DateTime<Utc>>) -> Result<(), CaptureError> {
    if let Some(when) = requested {
        let now = Utc::now();
        if when <= now {
            return Err(CaptureError::TimeNotInFuture {
                requested: when,
                now,
            });
        }
    }
    Ok(())
}

/// Clears the reminder stamp so stored state matches the absent
/// registration.
fn strip_reminder<R: StressLogRepository>(
    stress: &StressLogService<R>,
    entry: StressEntry,
) -> Result<StressEntry, CaptureError> {
    let stripped = StressEntry {
        reminder_time: None,
        ..entry
    };
    Ok(stress.update_entry(&stripped)?)
}

fn map_cancel_error(id: &str, err: ScheduleError) -> CaptureError {
    match err {
        ScheduleError::Gateway(err) => CaptureError::Gateway(err),
        // Cancel performs no time or permission checks; other variants
        // cannot reach here.
        other => CaptureError::Gateway(GatewayError::Unavailable(format!(
            "cancel failed for `{id}`: {other}"
        ))),
    }
}
