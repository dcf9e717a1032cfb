//! Notification gateway layer.
//!
//! # Responsibility
//! - Define the platform-neutral notification contract used by schedulers.
//! - Ship the in-memory center used by tests and embedder smoke checks.
//!
//! # See also
//! - docs/architecture/reminders.md

pub mod gateway;
pub mod memory;
