//! Core modules for Staircase

pub mod rules;
pub mod staircase;
pub mod record;
pub mod answers;

pub use rules::StepFn;
pub use staircase::{StaircaseProcedure, RunState};
pub use record::{capture_record, save_record, load_record, load_and_validate_record};
pub use answers::{parse_answer, parse_answers, parse_answer_line, REFERENCE_SEQUENCE};
