//! Stress log domain model.
//!
//! # Responsibility
//! - Define the stored stress entry shape and its wire-compatible layout.
//! - Enforce field-level limits shared by all write paths.
//!
//! # Invariants
//! - `id` is stable and never reused for another entry.
//! - `description` and `solution` hold 1..=200 characters after trimming.
//! - Serialized field names stay camelCase so existing `stressItems`
//!   documents decode unchanged.
//!
//! # See also
//! - docs/architecture/data-model.md

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier for a stress entry.
///
/// Derived from the creation instant's epoch milliseconds; kept as a type
/// alias to make semantic intent explicit in signatures.
pub type EntryId = String;

pub const TEXT_FIELD_MIN_CHARS: usize = 1;
pub const TEXT_FIELD_MAX_CHARS: usize = 200;

/// Life area a stress entry is filed under.
///
/// Wire strings are the PascalCase variant names already present in stored
/// documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StressCategory {
    Work,
    Study,
    Relationship,
    Financial,
    Health,
    Family,
    Other,
}

/// Category pick-list order shown by entry forms.
pub const ALL_CATEGORIES: [StressCategory; 7] = [
    StressCategory::Work,
    StressCategory::Study,
    StressCategory::Relationship,
    StressCategory::Financial,
    StressCategory::Health,
    StressCategory::Family,
    StressCategory::Other,
];

impl StressCategory {
    /// Stable string form, identical to the serialized value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Work => "Work",
            Self::Study => "Study",
            Self::Relationship => "Relationship",
            Self::Financial => "Financial",
            Self::Health => "Health",
            Self::Family => "Family",
            Self::Other => "Other",
        }
    }
}

/// Parses one category from its stable string form.
pub fn parse_stress_category(value: &str) -> Option<StressCategory> {
    match value {
        "Work" => Some(StressCategory::Work),
        "Study" => Some(StressCategory::Study),
        "Relationship" => Some(StressCategory::Relationship),
        "Financial" => Some(StressCategory::Financial),
        "Health" => Some(StressCategory::Health),
        "Family" => Some(StressCategory::Family),
        "Other" => Some(StressCategory::Other),
        _ => None,
    }
}

/// Stored stress log entry, serialized into the `stressItems` document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StressEntry {
    /// Stable entry id. Assigned by the store at add time.
    pub id: EntryId,
    /// What is causing stress.
    pub description: String,
    pub category: StressCategory,
    /// The user's plan for working through it.
    pub solution: String,
    /// Whether the user marked the entry as worked through.
    pub solved: bool,
    /// Creation instant. Set once, never updated.
    pub created_at: DateTime<Utc>,
    /// Active per-entry reminder instant; `None` when no reminder is set.
    #[serde(default)]
    pub reminder_time: Option<DateTime<Utc>>,
}

/// Input for adding a new entry.
///
/// Carries no id and no solved flag, so the "store assigns identity and
/// entries start unsolved" contract cannot be bypassed by callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StressDraft {
    pub description: String,
    pub category: StressCategory,
    pub solution: String,
    /// Reminder instant captured by the form; registration is a separate
    /// scheduling step.
    pub reminder_time: Option<DateTime<Utc>>,
}

impl StressDraft {
    /// Validates text-field limits on the trimmed values.
    pub fn validate(&self) -> Result<(), StressValidationError> {
        validate_description(&self.description)?;
        validate_solution(&self.solution)?;
        Ok(())
    }
}

impl StressEntry {
    /// Validates text-field limits on the trimmed values.
    pub fn validate(&self) -> Result<(), StressValidationError> {
        validate_description(&self.description)?;
        validate_solution(&self.solution)?;
        Ok(())
    }
}

/// Field-level validation failures for stress entry text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StressValidationError {
    DescriptionLength { chars: usize },
    SolutionLength { chars: usize },
}

impl Display for StressValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DescriptionLength { chars } => write!(
                f,
                "description must hold {TEXT_FIELD_MIN_CHARS}..={TEXT_FIELD_MAX_CHARS} characters after trimming, got {chars}"
            ),
            Self::SolutionLength { chars } => write!(
                f,
                "solution must hold {TEXT_FIELD_MIN_CHARS}..={TEXT_FIELD_MAX_CHARS} characters after trimming, got {chars}"
            ),
        }
    }
}

impl Error for StressValidationError {}

/// Normalizes one text field for persistence.
pub fn normalize_field(value: &str) -> String {
    value.trim().to_string()
}

fn validate_description(value: &str) -> Result<(), StressValidationError> {
    let chars = trimmed_chars(value);
    if !(TEXT_FIELD_MIN_CHARS..=TEXT_FIELD_MAX_CHARS).contains(&chars) {
        return Err(StressValidationError::DescriptionLength { chars });
    }
    Ok(())
}

fn validate_solution(value: &str) -> Result<(), StressValidationError> {
    let chars = trimmed_chars(value);
    if !(TEXT_FIELD_MIN_CHARS..=TEXT_FIELD_MAX_CHARS).contains(&chars) {
        return Err(StressValidationError::SolutionLength { chars });
    }
    Ok(())
}

fn trimmed_chars(value: &str) -> usize {
    value.trim().chars().count()
}
