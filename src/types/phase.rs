//! Staircase phase definitions

use serde::{Deserialize, Serialize};

/// Which leg of the staircase a run is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    /// Last answer was correct; pairs of correct answers step down
    Descending,
    /// Last answer was incorrect; each miss steps up
    Ascending,
    /// Target reversal count reached, only reset leaves this phase
    Finished,
}

impl Phase {
    /// Phase implied by the previous answer
    pub fn from_previous(was_previous_correct: bool) -> Self {
        if was_previous_correct {
            Phase::Descending
        } else {
            Phase::Ascending
        }
    }

    /// Get ANSI color code for terminal display
    pub fn color_code(&self) -> &'static str {
        match self {
            Phase::Descending => "\x1b[36m", // Cyan
            Phase::Ascending => "\x1b[33m",  // Yellow
            Phase::Finished => "\x1b[32m",   // Green
        }
    }

    /// Reset ANSI color
    pub fn color_reset() -> &'static str {
        "\x1b[0m"
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Descending => "DESCENDING",
            Phase::Ascending => "ASCENDING",
            Phase::Finished => "FINISHED",
        };
        write!(f, "{}", name)
    }
}
