//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts over `app_state` rows.
//! - Isolate SQLite and JSON-document details from service orchestration.
//!
//! # Invariants
//! - Every mutation is a read-whole / modify / versioned-write-whole cycle.
//! - Repository APIs return semantic errors (`NotFound`) in addition to
//!   storage transport errors.
//!
//! # See also
//! - docs/architecture/data-model.md

pub mod mood_ledger;
pub mod settings;
pub mod stress_log;
