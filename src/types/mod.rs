//! Core types for Staircase

mod direction;
mod phase;
mod reason;
mod output;
mod error;
mod rule;
mod config;
mod record;

pub use direction::Direction;
pub use phase::Phase;
pub use reason::ReasonCode;
pub use output::StepOutput;
pub use error::{StaircaseError, Result};
pub use rule::StepRule;
pub use config::StaircaseConfig;
pub use record::RunRecord;
