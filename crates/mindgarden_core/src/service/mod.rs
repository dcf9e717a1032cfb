//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository, calendar and gateway calls into use-case APIs.
//! - Keep UI shells decoupled from storage and platform details.
//!
//! # See also
//! - docs/architecture/reminders.md

pub mod capture;
pub mod mood;
pub mod practice;
pub mod stress;
