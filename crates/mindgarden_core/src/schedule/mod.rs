//! Reminder scheduling layer.
//!
//! # Responsibility
//! - Validate and place per-entry reminder registrations on the gateway.
//!
//! # Invariants
//! - At most one pending registration exists per stress entry.
//! - Scheduling never touches registrations owned by other identifiers.
//!
//! # See also
//! - docs/architecture/reminders.md

pub mod scheduler;
