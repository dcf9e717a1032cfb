//! Domain model for the stress log and mood ledger.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep serialized layouts identical to the app's existing data documents.
//!
//! # Invariants
//! - Every stress entry is identified by a stable `EntryId`.
//! - Enum wire strings are part of the storage contract and never change.
//!
//! # See also
//! - docs/architecture/data-model.md

pub mod mood;
pub mod stress;
