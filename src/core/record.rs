//! Run record capture and JSON storage
//!
//! Records are written as pretty JSON to `<dir>/<id>.json`.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::core::StaircaseProcedure;
use crate::types::{Result, RunRecord, StaircaseError, StepRule};

/// Per-process sequence appended to record ids
static RECORD_SEQ: AtomicU64 = AtomicU64::new(0);

/// Capture a run, finished or not
pub fn capture_record(procedure: &StaircaseProcedure<StepRule>) -> RunRecord {
    let now = chrono::Utc::now();
    let seq = RECORD_SEQ.fetch_add(1, Ordering::Relaxed);
    RunRecord {
        id: format!("run_{}_{:04}", now.format("%Y%m%d_%H%M%S_%6f"), seq),
        created_at: now,
        config: procedure.config(),
        answers: procedure.answers().to_vec(),
        params: procedure.params().to_vec(),
        turnarounds: procedure.turnarounds().to_vec(),
        threshold: procedure.result().ok(),
        completed: procedure.is_terminal(),
    }
}

/// Save record to `<dir>/<id>.json`, creating `dir` if needed.
///
/// Never overwrites: an existing file with the same id is a `Storage` error.
/// Non-finite values are rejected since JSON cannot carry them.
pub fn save_record(record: &RunRecord, dir: impl AsRef<Path>) -> Result<PathBuf> {
    check_finite(record)?;

    let dir = dir.as_ref();
    let path = dir.join(format!("{}.json", record.id));

    let json = serde_json::to_string_pretty(record)?;
    std::fs::create_dir_all(dir)?;
    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)?;
    file.write_all(json.as_bytes())?;

    tracing::debug!(path = %path.display(), "run record saved");
    Ok(path)
}

/// Load record from a JSON file
pub fn load_record(path: impl AsRef<Path>) -> Result<RunRecord> {
    let json = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

/// Load a record and check it is internally consistent
pub fn load_and_validate_record(path: impl AsRef<Path>) -> Result<RunRecord> {
    let record = load_record(path)?;
    record.config.validate()?;

    if record.params.first() != Some(&record.config.initial_param) {
        return Err(invalid("params must start with initial_param"));
    }
    if record.turnarounds.len() > record.config.target_turnarounds {
        return Err(invalid("more turnarounds than target_turnarounds"));
    }
    if record.completed != (record.turnarounds.len() == record.config.target_turnarounds) {
        return Err(invalid("completed flag disagrees with turnaround count"));
    }

    // Seed plus one entry per continuing step; the terminal step appends nothing
    let expected_params = if record.completed {
        record.answers.len()
    } else {
        record.answers.len() + 1
    };
    if record.params.len() != expected_params {
        return Err(invalid("params length does not match answers"));
    }
    if record.turnarounds.len() > record.answers.len() {
        return Err(invalid("more turnarounds than answers"));
    }

    Ok(record)
}

fn check_finite(record: &RunRecord) -> Result<()> {
    let all_finite = record.config.initial_param.is_finite()
        && record.params.iter().all(|p| p.is_finite())
        && record.turnarounds.iter().all(|t| t.is_finite())
        && record.threshold.map_or(true, f64::is_finite);
    if !all_finite {
        return Err(StaircaseError::InvalidConfiguration(format!(
            "run record {} holds non-finite values, JSON cannot store them",
            record.id
        )));
    }
    Ok(())
}

fn invalid(msg: &str) -> StaircaseError {
    StaircaseError::InvalidConfiguration(format!("inconsistent run record: {}", msg))
}

// =============================================================================
// TESTS
// =============================================================================
