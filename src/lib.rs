//! Staircase: adaptive 2-down/1-up parameter control
//!
//! Feeds binary responses into a `StaircaseProcedure`, which moves a
//! parameter down after two consecutive correct answers and up after any
//! incorrect one, records reversals, and estimates the threshold as the
//! mean of the reversal values.

pub mod core;
pub mod logging;
pub mod types;

// =============================================================================
// DEFAULTS - reference run
// =============================================================================

/// Starting parameter value
pub const DEFAULT_INITIAL_PARAM: f64 = 20.0;

/// Number of reversals that ends a run
pub const DEFAULT_TARGET_TURNAROUNDS: usize = 6;

/// Geometric step factor (halving / doubling)
pub const DEFAULT_STEP_FACTOR: f64 = 2.0;

/// Correct answers in a row needed for one downward step
pub const CORRECT_RUN_FOR_DOWN_STEP: u32 = 2;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
