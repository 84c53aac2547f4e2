//! Reason codes explaining what a single step did

use serde::{Deserialize, Serialize};

/// Reason codes for every step outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum ReasonCode {
    // =========================================================================
    // S000: Status
    // =========================================================================
    /// No step taken, status read only
    S000_IDLE,

    // =========================================================================
    // S001: Parameter moves
    // =========================================================================
    /// First correct answer of a pair, parameter unchanged
    S001_HOLD,
    /// Second correct answer in a row, parameter stepped down
    S001_STEP_DOWN,
    /// Incorrect answer, parameter stepped up
    S001_STEP_UP,

    // =========================================================================
    // S002: Reversals
    // =========================================================================
    /// Correct answer after a miss, reversal recorded
    S002_TURNAROUND_TO_DESCENDING,
    /// Miss after a correct answer, reversal recorded
    S002_TURNAROUND_TO_ASCENDING,

    // =========================================================================
    // S003: Termination
    // =========================================================================
    /// Target reversal count reached, run finished
    S003_TARGET_REACHED,
}

impl ReasonCode {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::S000_IDLE => "S000_IDLE",
            Self::S001_HOLD => "S001_HOLD",
            Self::S001_STEP_DOWN => "S001_STEP_DOWN",
            Self::S001_STEP_UP => "S001_STEP_UP",
            Self::S002_TURNAROUND_TO_DESCENDING => "S002_TURNAROUND_TO_DESCENDING",
            Self::S002_TURNAROUND_TO_ASCENDING => "S002_TURNAROUND_TO_ASCENDING",
            Self::S003_TARGET_REACHED => "S003_TARGET_REACHED",
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::S000_IDLE => "No step taken",
            Self::S001_HOLD => "Holding, one more correct answer steps down",
            Self::S001_STEP_DOWN => "Two correct in a row, stepping down",
            Self::S001_STEP_UP => "Incorrect answer, stepping up",
            Self::S002_TURNAROUND_TO_DESCENDING => "Reversal: ascending to descending",
            Self::S002_TURNAROUND_TO_ASCENDING => "Reversal: descending to ascending",
            Self::S003_TARGET_REACHED => "Target reversal count reached",
        }
    }

    /// True for the two reversal codes
    pub fn is_turnaround(&self) -> bool {
        matches!(
            self,
            Self::S002_TURNAROUND_TO_DESCENDING | Self::S002_TURNAROUND_TO_ASCENDING
        )
    }
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}
