//! Mood ledger domain model.
//!
//! # Responsibility
//! - Define the closed set of daily mood tags.
//!
//! # Invariants
//! - Wire strings are the lowercase variant names already present in stored
//!   `moodHistory` documents.

use serde::{Deserialize, Serialize};

/// Daily mood tag recorded in the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Terrible,
    Bad,
    Okay,
    Good,
    Excellent,
}

/// Mood pick-list order shown by the check-in screen, worst to best.
pub const ALL_MOODS: [Mood; 5] = [
    Mood::Terrible,
    Mood::Bad,
    Mood::Okay,
    Mood::Good,
    Mood::Excellent,
];

impl Mood {
    /// Stable string form, identical to the serialized value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Terrible => "terrible",
            Self::Bad => "bad",
            Self::Okay => "okay",
            Self::Good => "good",
            Self::Excellent => "excellent",
        }
    }
}

/// Parses one mood from its stable string form.
pub fn parse_mood(value: &str) -> Option<Mood> {
    match value {
        "terrible" => Some(Mood::Terrible),
        "bad" => Some(Mood::Bad),
        "okay" => Some(Mood::Okay),
        "good" => Some(Mood::Good),
        "excellent" => Some(Mood::Excellent),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_mood, Mood, ALL_MOODS};

    #[test]
    fn mood_strings_round_trip() {
        for mood in ALL_MOODS {
            assert_eq!(parse_mood(mood.as_str()), Some(mood));
        }
        assert_eq!(parse_mood("Good"), None);
        assert_eq!(parse_mood(""), None);
    }

    #[test]
    fn mood_serializes_lowercase() {
        let value = serde_json::to_value(Mood::Excellent).unwrap();
        assert_eq!(value, "excellent");

        let parsed: Mood = serde_json::from_str("\"terrible\"").unwrap();
        assert_eq!(parsed, Mood::Terrible);
    }
}
