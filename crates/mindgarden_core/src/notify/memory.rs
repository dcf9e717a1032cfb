//! In-memory notification center.
//!
//! # Responsibility
//! - Provide a process-local `NotificationGateway` for tests and CLI probes.
//! - Model permission state and identifier replacement without a device.
//!
//! # Invariants
//! - Pending order is registration order; replacement re-appends.

use crate::notify::gateway::{
    GatewayError, GatewayResult, NotificationGateway, NotificationRequest, PermissionStatus,
};
use std::sync::{Mutex, MutexGuard};

/// Process-local notification center holding registrations in memory.
pub struct InMemoryNotificationCenter {
    permission: Mutex<PermissionStatus>,
    pending: Mutex<Vec<NotificationRequest>>,
}

impl InMemoryNotificationCenter {
    /// Creates a center reporting the given permission state.
    pub fn new(permission: PermissionStatus) -> Self {
        Self {
            permission: Mutex::new(permission),
            pending: Mutex::new(Vec::new()),
        }
    }

    /// Creates a center that reports granted permission.
    pub fn granted() -> Self {
        Self::new(PermissionStatus::Granted)
    }

    /// Replaces the simulated permission state.
    pub fn set_permission(&self, status: PermissionStatus) -> GatewayResult<()> {
        *lock(&self.permission, "permission")? = status;
        Ok(())
    }

    fn lock_pending(&self) -> GatewayResult<MutexGuard<'_, Vec<NotificationRequest>>> {
        lock(&self.pending, "pending registrations")
    }
}

impl NotificationGateway for InMemoryNotificationCenter {
    fn permission_status(&self) -> GatewayResult<PermissionStatus> {
        Ok(*lock(&self.permission, "permission")?)
    }

    fn register(&self, request: NotificationRequest) -> GatewayResult<()> {
        let mut pending = self.lock_pending()?;
        pending.retain(|held| held.identifier != request.identifier);
        pending.push(request);
        Ok(())
    }

    fn cancel(&self, identifier: &str) -> GatewayResult<()> {
        let mut pending = self.lock_pending()?;
        pending.retain(|held| held.identifier != identifier);
        Ok(())
    }

    fn pending(&self) -> GatewayResult<Vec<NotificationRequest>> {
        Ok(self.lock_pending()?.clone())
    }
}

fn lock<'mutex, T>(
    mutex: &'mutex Mutex<T>,
    what: &str,
) -> GatewayResult<MutexGuard<'mutex, T>> {
    mutex
        .lock()
        .map_err(|_| GatewayError::Unavailable(format!("{what} lock poisoned")))
}
