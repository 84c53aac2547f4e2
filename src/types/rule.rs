//! Built-in step rules
//!
//! A rule is plain data; the arithmetic lives in `core::rules` where it
//! implements `StepFn`.

use serde::{Deserialize, Serialize};
use crate::types::{Result, StaircaseError};
use crate::DEFAULT_STEP_FACTOR;

/// Parameter update rule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StepRule {
    /// up: `param * factor`, down: `param / factor`
    Geometric { factor: f64 },
    /// up: `param + delta`, down: `param - delta`
    Linear { delta: f64 },
}

impl Default for StepRule {
    fn default() -> Self {
        Self::halving_doubling()
    }
}

impl StepRule {
    /// Double on a miss, halve after two hits
    pub fn halving_doubling() -> Self {
        StepRule::Geometric { factor: DEFAULT_STEP_FACTOR }
    }

    pub fn validate(&self) -> Result<()> {
        match *self {
            StepRule::Geometric { factor } => {
                if !factor.is_finite() || factor <= 1.0 {
                    return Err(StaircaseError::InvalidConfiguration(format!(
                        "geometric factor must be finite and > 1, got {}",
                        factor
                    )));
                }
            }
            StepRule::Linear { delta } => {
                if !delta.is_finite() || delta <= 0.0 {
                    return Err(StaircaseError::InvalidConfiguration(format!(
                        "linear delta must be finite and > 0, got {}",
                        delta
                    )));
                }
            }
        }
        Ok(())
    }
}

impl std::fmt::Display for StepRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StepRule::Geometric { factor } => write!(f, "geometric(x{})", factor),
            StepRule::Linear { delta } => write!(f, "linear(±{})", delta),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_halving_doubling() {
        assert_eq!(StepRule::default(), StepRule::Geometric { factor: 2.0 });
    }

    #[test]
    fn test_validate_rejects_degenerate_rules() {
        assert!(StepRule::Geometric { factor: 1.0 }.validate().is_err());
        assert!(StepRule::Geometric { factor: f64::NAN }.validate().is_err());
        assert!(StepRule::Linear { delta: 0.0 }.validate().is_err());
        assert!(StepRule::Linear { delta: -1.0 }.validate().is_err());
        assert!(StepRule::Linear { delta: 0.5 }.validate().is_ok());
    }

    #[test]
    fn test_tagged_json() {
        let rule: StepRule = serde_json::from_str(r#"{"kind":"linear","delta":1.5}"#).unwrap();
        assert_eq!(rule, StepRule::Linear { delta: 1.5 });

        let json = serde_json::to_string(&StepRule::halving_doubling()).unwrap();
        assert!(json.contains("\"kind\":\"geometric\""));
    }
}
