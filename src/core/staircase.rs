//! Staircase procedure: 2-down/1-up state machine with reversal tracking
//!
//! Phases:
//! - DESCENDING: previous answer correct, every second correct answer steps down
//! - ASCENDING: previous answer incorrect, every incorrect answer steps up
//! - FINISHED: target reversal count reached
//!
//! A reversal (turnaround) is recorded whenever the phase flips. On the flip
//! to DESCENDING the value is taken after any down-step of the same answer;
//! on the flip to ASCENDING it is taken before the up-step.

use serde::Serialize;
use crate::core::rules::StepFn;
use crate::types::{
    Direction, Phase, ReasonCode, Result, StaircaseConfig, StaircaseError, StepOutput, StepRule,
};
use crate::CORRECT_RUN_FOR_DOWN_STEP;

/// Mutable state of one run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunState {
    /// Every accepted answer
    pub answers: Vec<bool>,
    /// Parameter before each continuing step, seeded with the initial value
    pub params: Vec<f64>,
    /// Values recorded at each reversal
    pub turnarounds: Vec<f64>,
    /// Correct answers since the last miss or down-step (0 or 1 between steps)
    pub consecutive_correct: u32,
    /// Whether the previous answer was correct
    pub was_previous_correct: bool,
    /// Live parameter value
    pub current_param: f64,
}

impl RunState {
    fn new(initial_param: f64) -> Self {
        Self {
            answers: Vec::new(),
            params: vec![initial_param],
            turnarounds: Vec::new(),
            consecutive_correct: 0,
            was_previous_correct: true,
            current_param: initial_param,
        }
    }
}

/// What a single step did, before it is dressed up as a `StepOutput`
#[derive(Debug, Clone, Copy)]
struct StepTrace {
    continuing: bool,
    param: f64,
    direction: Option<Direction>,
    turnaround: Option<f64>,
}

/// Staircase procedure driving one run
#[derive(Clone)]
pub struct StaircaseProcedure<F> {
    initial_param: f64,
    step_fn: F,
    target_turnarounds: usize,
    state: RunState,
}

impl<F> std::fmt::Debug for StaircaseProcedure<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaircaseProcedure")
            .field("initial_param", &self.initial_param)
            .field("target_turnarounds", &self.target_turnarounds)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<F: StepFn> StaircaseProcedure<F> {
    /// Create a procedure. `target_turnarounds` must be at least 1.
    pub fn new(initial_param: f64, step_fn: F, target_turnarounds: usize) -> Result<Self> {
        if target_turnarounds == 0 {
            return Err(StaircaseError::InvalidConfiguration(
                "target_turnarounds must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            initial_param,
            step_fn,
            target_turnarounds,
            state: RunState::new(initial_param),
        })
    }

    /// Restore the freshly constructed state, keeping the configuration
    pub fn reset(&mut self) {
        self.state = RunState::new(self.initial_param);
    }

    /// Feed one answer. Returns `(continuing, param)`.
    ///
    /// `continuing` is false on the call that records the final reversal;
    /// that last value is not appended to `params`. Any further call fails
    /// with `StaircaseError::RunTerminal` until `reset`.
    pub fn step(&mut self, answer: bool) -> Result<(bool, f64)> {
        let trace = self.advance(answer)?;
        Ok((trace.continuing, trace.param))
    }

    /// Feed one answer and describe what happened
    pub fn observe(&mut self, answer: bool) -> Result<StepOutput> {
        let trace = self.advance(answer)?;

        let reason = if !trace.continuing {
            ReasonCode::S003_TARGET_REACHED
        } else if trace.turnaround.is_some() {
            if answer {
                ReasonCode::S002_TURNAROUND_TO_DESCENDING
            } else {
                ReasonCode::S002_TURNAROUND_TO_ASCENDING
            }
        } else {
            match trace.direction {
                Some(Direction::Down) => ReasonCode::S001_STEP_DOWN,
                Some(Direction::Up) => ReasonCode::S001_STEP_UP,
                _ => ReasonCode::S001_HOLD,
            }
        };

        Ok(StepOutput {
            timestamp: chrono::Utc::now(),
            trial: self.trial_count(),
            answer: Some(answer),
            param: trace.param,
            continuing: trace.continuing,
            direction: trace.direction,
            turnaround: trace.turnaround,
            turnaround_count: self.state.turnarounds.len(),
            target_turnarounds: self.target_turnarounds,
            phase: self.phase(),
            reason,
        })
    }

    fn advance(&mut self, answer: bool) -> Result<StepTrace> {
        if self.is_terminal() {
            tracing::warn!(
                turnarounds = self.state.turnarounds.len(),
                "step rejected, run already terminal"
            );
            return Err(StaircaseError::RunTerminal {
                turnarounds: self.state.turnarounds.len(),
            });
        }

        let state = &mut self.state;
        state.answers.push(answer);

        let mut direction = None;
        let mut turnaround = None;

        if answer {
            state.consecutive_correct += 1;
            if state.consecutive_correct == CORRECT_RUN_FOR_DOWN_STEP {
                state.consecutive_correct = 0;
                state.current_param = self.step_fn.next(state.current_param, Direction::Down);
                direction = Some(Direction::Down);
            }
            // Reversal value includes the down-step just applied
            if !state.was_previous_correct {
                state.turnarounds.push(state.current_param);
                turnaround = Some(state.current_param);
            }
            state.was_previous_correct = true;
        } else {
            state.consecutive_correct = 0;
            // Reversal value is taken before the up-step
            if state.was_previous_correct {
                state.turnarounds.push(state.current_param);
                turnaround = Some(state.current_param);
            }
            state.current_param = self.step_fn.next(state.current_param, Direction::Up);
            direction = Some(Direction::Up);
            state.was_previous_correct = false;
        }

        if let Some(value) = turnaround {
            tracing::debug!(
                value,
                count = state.turnarounds.len(),
                target = self.target_turnarounds,
                "turnaround recorded"
            );
        }

        let trial = state.answers.len();
        let param = state.current_param;

        if state.turnarounds.len() == self.target_turnarounds {
            tracing::info!(trial, param, "target turnaround count reached");
            return Ok(StepTrace { continuing: false, param, direction, turnaround });
        }

        state.params.push(param);
        tracing::debug!(trial, answer, param, "step");
        Ok(StepTrace { continuing: true, param, direction, turnaround })
    }

    /// Mean of the recorded turnaround values
    pub fn result(&self) -> Result<f64> {
        let turnarounds = &self.state.turnarounds;
        if turnarounds.is_empty() {
            return Err(StaircaseError::InsufficientData);
        }
        Ok(turnarounds.iter().sum::<f64>() / turnarounds.len() as f64)
    }

    /// Current status without stepping
    pub fn current_output(&self) -> StepOutput {
        StepOutput {
            timestamp: chrono::Utc::now(),
            trial: self.trial_count(),
            answer: self.state.answers.last().copied(),
            param: self.state.current_param,
            continuing: !self.is_terminal(),
            direction: None,
            turnaround: None,
            turnaround_count: self.state.turnarounds.len(),
            target_turnarounds: self.target_turnarounds,
            phase: self.phase(),
            reason: ReasonCode::S000_IDLE,
        }
    }
}

impl<F> StaircaseProcedure<F> {
    pub fn initial_param(&self) -> f64 {
        self.initial_param
    }

    pub fn target_turnarounds(&self) -> usize {
        self.target_turnarounds
    }

    /// Whole mutable state, read-only
    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn current_param(&self) -> f64 {
        self.state.current_param
    }

    pub fn answers(&self) -> &[bool] {
        &self.state.answers
    }

    pub fn params(&self) -> &[f64] {
        &self.state.params
    }

    pub fn turnarounds(&self) -> &[f64] {
        &self.state.turnarounds
    }

    pub fn consecutive_correct(&self) -> u32 {
        self.state.consecutive_correct
    }

    pub fn was_previous_correct(&self) -> bool {
        self.state.was_previous_correct
    }

    /// Number of accepted answers
    pub fn trial_count(&self) -> usize {
        self.state.answers.len()
    }

    /// Target reversal count reached?
    pub fn is_terminal(&self) -> bool {
        self.state.turnarounds.len() >= self.target_turnarounds
    }

    pub fn phase(&self) -> Phase {
        if self.is_terminal() {
            Phase::Finished
        } else {
            Phase::from_previous(self.state.was_previous_correct)
        }
    }
}

impl StaircaseProcedure<StepRule> {
    /// Build from a validated config
    pub fn from_config(config: &StaircaseConfig) -> Result<Self> {
        config.validate()?;
        Self::new(config.initial_param, config.rule, config.target_turnarounds)
    }

    /// Configuration this run was built with
    pub fn config(&self) -> StaircaseConfig {
        StaircaseConfig {
            initial_param: self.initial_param,
            target_turnarounds: self.target_turnarounds,
            rule: self.step_fn,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
