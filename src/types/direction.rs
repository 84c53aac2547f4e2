//! Step directions passed to the step function

use serde::{Deserialize, Serialize};

/// Which way the parameter should move on a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Make the task easier (after an incorrect answer)
    Up,
    /// Make the task harder (after two correct answers)
    Down,
    /// Leave the parameter as is. Never issued by the procedure itself.
    Keep,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Keep => "keep",
        }
    }

    /// Arrow glyph for terminal display
    pub fn arrow(&self) -> &'static str {
        match self {
            Direction::Up => "↑",
            Direction::Down => "↓",
            Direction::Keep => "·",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Direction::Up).unwrap(), "\"up\"");
        assert_eq!(serde_json::to_string(&Direction::Keep).unwrap(), "\"keep\"");
        let d: Direction = serde_json::from_str("\"down\"").unwrap();
        assert_eq!(d, Direction::Down);
    }

    #[test]
    fn test_display_matches_tag() {
        assert_eq!(Direction::Down.to_string(), "down");
    }
}
