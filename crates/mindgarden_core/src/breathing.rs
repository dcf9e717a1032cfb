//! Guided breathing cycle timing.
//!
//! # Responsibility
//! - Define the fixed inhale/hold/exhale cadence of the breathing exercise.
//! - Resolve the active phase for any elapsed session time.
//!
//! # Invariants
//! - Phase durations are fixed and sum to the cycle length.
//! - `phase_at` wraps whole cycles, so every non-negative elapsed time
//!   resolves to a phase.

use std::time::Duration;

/// One step of the breathing cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreathPhase {
    Inhale,
    HoldIn,
    Exhale,
    HoldOut,
}

impl BreathPhase {
    /// On-screen instruction for this phase.
    pub fn instruction(self) -> &'static str {
        match self {
            Self::Inhale => "Breathe In",
            Self::HoldIn => "Hold",
            Self::Exhale => "Breathe Out",
            Self::HoldOut => "Hold",
        }
    }

    /// Fixed duration of this phase.
    pub fn duration(self) -> Duration {
        match self {
            Self::Inhale => Duration::from_secs(4),
            Self::HoldIn => Duration::from_secs(1),
            Self::Exhale => Duration::from_secs(6),
            Self::HoldOut => Duration::from_secs(1),
        }
    }
}

/// Cadence order of one full cycle.
pub const CYCLE: [BreathPhase; 4] = [
    BreathPhase::Inhale,
    BreathPhase::HoldIn,
    BreathPhase::Exhale,
    BreathPhase::HoldOut,
];

/// Full cycle length.
pub fn cycle_len() -> Duration {
    CYCLE.iter().map(|phase| phase.duration()).sum()
}

/// Returns the active phase and the time spent inside it for an elapsed
/// session time, wrapping whole cycles.
pub fn phase_at(elapsed: Duration) -> (BreathPhase, Duration) {
    let cycle_nanos = cycle_len().as_nanos();
    // Cycle length fits u64 nanoseconds comfortably; the remainder is smaller.
    let mut into_cycle = Duration::from_nanos((elapsed.as_nanos() % cycle_nanos) as u64);

    for phase in CYCLE {
        if into_cycle < phase.duration() {
            return (phase, into_cycle);
        }
        into_cycle -= phase.duration();
    }

    // Unreachable: the remainder is strictly less than one full cycle.
    (BreathPhase::Inhale, Duration::ZERO)
}

#[cfg(test)]
mod tests {
    use super::{cycle_len, phase_at, BreathPhase, CYCLE};
    use std::time::Duration;

    #[test]
    fn cycle_sums_to_twelve_seconds() {
        assert_eq!(cycle_len(), Duration::from_secs(12));
        assert_eq!(CYCLE.len(), 4);
    }

    #[test]
    fn phase_boundaries_resolve_in_cadence_order() {
        assert_eq!(phase_at(Duration::ZERO).0, BreathPhase::Inhale);
        assert_eq!(phase_at(Duration::from_millis(3_999)).0, BreathPhase::Inhale);
        assert_eq!(phase_at(Duration::from_secs(4)).0, BreathPhase::HoldIn);
        assert_eq!(phase_at(Duration::from_secs(5)).0, BreathPhase::Exhale);
        assert_eq!(phase_at(Duration::from_millis(10_999)).0, BreathPhase::Exhale);
        assert_eq!(phase_at(Duration::from_secs(11)).0, BreathPhase::HoldOut);
    }

    #[test]
    fn elapsed_time_wraps_whole_cycles() {
        let (phase, into) = phase_at(Duration::from_secs(12));
        assert_eq!(phase, BreathPhase::Inhale);
        assert_eq!(into, Duration::ZERO);

        let (phase, into) = phase_at(Duration::from_secs(29));
        assert_eq!(phase, BreathPhase::Exhale);
        assert_eq!(into, Duration::ZERO);
    }

    #[test]
    fn phase_progress_is_reported() {
        let (phase, into) = phase_at(Duration::from_millis(6_500));
        assert_eq!(phase, BreathPhase::Exhale);
        assert_eq!(into, Duration::from_millis(1_500));
    }
}
