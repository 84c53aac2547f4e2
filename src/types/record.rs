//! Run records: a finished (or abandoned) run in serializable form

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::types::StaircaseConfig;

/// Everything needed to audit or replay a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    /// `run_<timestamp>`, also the file stem on disk
    pub id: String,
    /// When the record was taken
    pub created_at: DateTime<Utc>,
    /// Settings the run used
    pub config: StaircaseConfig,
    /// Every accepted answer, in order
    pub answers: Vec<bool>,
    /// Parameter trajectory (seeded with the initial value)
    pub params: Vec<f64>,
    /// Reversal values
    pub turnarounds: Vec<f64>,
    /// Mean of turnarounds, absent when none were recorded
    pub threshold: Option<f64>,
    /// Whether the target reversal count was reached
    pub completed: bool,
}

impl RunRecord {
    /// Number of answers given
    pub fn trial_count(&self) -> usize {
        self.answers.len()
    }

    /// Fraction of correct answers, `None` for an empty run
    pub fn hit_rate(&self) -> Option<f64> {
        if self.answers.is_empty() {
            return None;
        }
        let hits = self.answers.iter().filter(|a| **a).count();
        Some(hits as f64 / self.answers.len() as f64)
    }
}
