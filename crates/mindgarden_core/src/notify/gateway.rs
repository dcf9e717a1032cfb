//! Notification gateway contract.
//!
//! # Responsibility
//! - Define the platform-neutral notification surface used by schedulers.
//! - Carry permission state so callers can gate registrations.
//!
//! # Invariants
//! - Registrations are keyed by caller-supplied identifier.
//! - Registering an identifier that is already pending replaces that
//!   registration and touches no other.
//! - Cancelling an unknown identifier is a no-op.
//!
//! # See also
//! - docs/architecture/reminders.md

use chrono::{DateTime, Utc};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Platform notification permission state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
    /// The user has not answered the permission prompt yet.
    Undetermined,
}

/// Delivery schedule for one notification registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Fires once at the given instant.
    Once(DateTime<Utc>),
    /// Fires every day at the given local wall-clock time.
    RepeatDaily { hour: u32, minute: u32 },
}

/// One pending notification registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    /// Caller-chosen stable identifier; re-registering replaces the holder.
    pub identifier: String,
    pub title: String,
    pub body: String,
    pub trigger: Trigger,
}

/// Gateway error for platform notification facilities.
#[derive(Debug)]
pub enum GatewayError {
    /// The platform notification center rejected or dropped the call.
    Unavailable(String),
}

impl Display for GatewayError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(details) => {
                write!(f, "notification center unavailable: {details}")
            }
        }
    }
}

impl Error for GatewayError {}

/// Platform-neutral notification surface.
///
/// Implementations wrap the device notification center. Failed calls are
/// reported as-is; callers never retry.
pub trait NotificationGateway {
    /// Returns the current notification permission state.
    fn permission_status(&self) -> GatewayResult<PermissionStatus>;
    /// Registers one notification, replacing any pending registration that
    /// holds the same identifier.
    fn register(&self, request: NotificationRequest) -> GatewayResult<()>;
    /// Removes the pending registration with the given identifier, if any.
    fn cancel(&self, identifier: &str) -> GatewayResult<()>;
    /// Returns a snapshot of pending registrations.
    fn pending(&self) -> GatewayResult<Vec<NotificationRequest>>;
}

impl<G: NotificationGateway + ?Sized> NotificationGateway for &G {
    fn permission_status(&self) -> GatewayResult<PermissionStatus> {
        (**self).permission_status()
    }

    fn register(&self, request: NotificationRequest) -> GatewayResult<()> {
        (**self).register(request)
    }

    fn cancel(&self, identifier: &str) -> GatewayResult<()> {
        (**self).cancel(identifier)
    }

    fn pending(&self) -> GatewayResult<Vec<NotificationRequest>> {
        (**self).pending()
    }
}
