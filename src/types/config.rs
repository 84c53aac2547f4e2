//! Run configuration

use std::path::Path;

use serde::{Deserialize, Serialize};
use crate::types::{Result, StaircaseError, StepRule};
use crate::{DEFAULT_INITIAL_PARAM, DEFAULT_TARGET_TURNAROUNDS};

/// Immutable settings of one staircase run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaircaseConfig {
    /// Starting parameter value
    pub initial_param: f64,
    /// Reversals that end the run (>= 1)
    pub target_turnarounds: usize,
    /// How the parameter moves
    pub rule: StepRule,
}

impl Default for StaircaseConfig {
    fn default() -> Self {
        Self {
            initial_param: DEFAULT_INITIAL_PARAM,
            target_turnarounds: DEFAULT_TARGET_TURNAROUNDS,
            rule: StepRule::default(),
        }
    }
}

impl StaircaseConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.initial_param.is_finite() {
            return Err(StaircaseError::InvalidConfiguration(format!(
                "initial_param must be finite, got {}",
                self.initial_param
            )));
        }
        if self.target_turnarounds == 0 {
            return Err(StaircaseError::InvalidConfiguration(
                "target_turnarounds must be at least 1".to_string(),
            ));
        }
        self.rule.validate()
    }

    /// Load and validate a JSON config file. Missing fields take defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }
}
