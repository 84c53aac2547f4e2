//! Output structures for terminal display

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::types::{Direction, Phase, ReasonCode};

/// Output structure for each step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepOutput {
    /// Timestamp
    pub timestamp: DateTime<Utc>,
    /// 1-based trial number (0 before the first answer)
    pub trial: usize,
    /// Answer that produced this output, if any
    pub answer: Option<bool>,
    /// Parameter after the step
    pub param: f64,
    /// Whether the run wants more answers
    pub continuing: bool,
    /// Direction handed to the step function, if it was called
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    /// Value recorded as a reversal on this step
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turnaround: Option<f64>,
    /// Reversals recorded so far
    pub turnaround_count: usize,
    /// Reversals that end the run
    pub target_turnarounds: usize,
    /// Phase after the step
    pub phase: Phase,
    /// What the step did
    pub reason: ReasonCode,
}

impl StepOutput {
    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let color = self.phase.color_code();
        let reset = Phase::color_reset();
        let arrow = self.direction.map(|d| d.arrow()).unwrap_or(" ");

        format!(
            "{}#{:<3} {} {} param={:.4} | turnarounds={}/{} | {}{}",
            color,
            self.trial,
            answer_mark(self.answer),
            arrow,
            self.param,
            self.turnaround_count,
            self.target_turnarounds,
            self.phase,
            reset
        )
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "trial={} | answer={} | param={} | continuing={} | turnarounds={}/{} | phase={} | reason={}",
            self.trial,
            answer_mark(self.answer),
            self.param,
            self.continuing,
            self.turnaround_count,
            self.target_turnarounds,
            self.phase,
            self.reason.code()
        )
    }
}

fn answer_mark(answer: Option<bool>) -> &'static str {
    match answer {
        Some(true) => "T",
        Some(false) => "F",
        None => "-",
    }
}
