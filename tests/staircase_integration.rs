//! Integration tests for the staircase procedure
//!
//! Covers the reference halving/doubling run and the invariants that must
//! hold for any answer sequence.

use pretty_assertions::assert_eq;
use staircase::core::{parse_answers, StaircaseProcedure, REFERENCE_SEQUENCE};
use staircase::types::{Direction, StaircaseConfig, StaircaseError, StepRule};

fn halving_doubling(param: f64, direction: Direction) -> f64 {
    match direction {
        Direction::Down => param / 2.0,
        Direction::Up => param * 2.0,
        Direction::Keep => param,
    }
}

fn reference_answers() -> Vec<bool> {
    let mut answers = vec![true; 10];
    answers.extend([false, false, true, true, false, true, true, true, false, true]);
    answers
}

/// Expected `(continuing, param)` for each reference answer
const REFERENCE_STEPS: [(bool, f64); 20] = [
    (true, 20.0),
    (true, 10.0),
    (true, 10.0),
    (true, 5.0),
    (true, 5.0),
    (true, 2.5),
    (true, 2.5),
    (true, 1.25),
    (true, 1.25),
    (true, 0.625),
    (true, 1.25),
    (true, 2.5),
    (true, 2.5),
    (true, 1.25),
    (true, 2.5),
    (true, 2.5),
    (true, 1.25),
    (true, 1.25),
    (true, 2.5),
    (false, 2.5),
];

/// Test the reference run value for value
#[test]
fn test_reference_scenario() {
    let mut sc = StaircaseProcedure::new(20.0, halving_doubling, 6).unwrap();

    let steps: Vec<(bool, f64)> = reference_answers()
        .into_iter()
        .map(|answer| sc.step(answer).unwrap())
        .collect();

    assert_eq!(steps, REFERENCE_STEPS.to_vec());
    assert_eq!(sc.turnarounds(), &[0.625, 2.5, 1.25, 2.5, 1.25, 2.5]);
    assert!((sc.result().unwrap() - 1.7708333333333333).abs() < 1e-10);
}

/// Terminal step leaves params one shorter than the answers + seed
#[test]
fn test_reference_trajectory() {
    let mut sc = StaircaseProcedure::new(20.0, halving_doubling, 6).unwrap();
    for answer in reference_answers() {
        sc.step(answer).unwrap();
    }

    let mut expected = vec![20.0];
    expected.extend(REFERENCE_STEPS[..19].iter().map(|(_, p)| *p));
    assert_eq!(sc.params(), expected.as_slice());
    assert_eq!(sc.answers().len(), 20);
}

/// The built-in rule and the CLI's reference string give the same run
#[test]
fn test_reference_with_builtin_rule() {
    let mut sc = StaircaseProcedure::from_config(&StaircaseConfig::default()).unwrap();
    let answers = parse_answers(REFERENCE_SEQUENCE).unwrap();
    assert_eq!(answers, reference_answers());

    let steps: Vec<(bool, f64)> = answers.into_iter().map(|a| sc.step(a).unwrap()).collect();
    assert_eq!(steps, REFERENCE_STEPS.to_vec());
}

/// Test determinism - reset and replay give identical results
#[test]
fn test_determinism_with_reset() {
    let mut sc = StaircaseProcedure::new(20.0, halving_doubling, 6).unwrap();

    let mut runs = Vec::new();
    for _ in 0..3 {
        sc.reset();
        let steps: Vec<(bool, f64)> = reference_answers()
            .into_iter()
            .map(|a| sc.step(a).unwrap())
            .collect();
        runs.push((steps, sc.result().unwrap()));
    }

    assert_eq!(runs[0], runs[1]);
    assert_eq!(runs[1], runs[2]);
}

/// Invariants hold after every step of a long pseudo-random sequence
#[test]
fn test_invariants_on_long_sequence() {
    let target = 12;
    let mut sc = StaircaseProcedure::new(100.0, StepRule::Linear { delta: 3.0 }, target).unwrap();

    // Deterministic mix, roughly 70% correct
    let answers = (0..500u32).map(|i| (i * 7919) % 10 < 7);

    for (i, answer) in answers.enumerate() {
        let (continuing, param) = sc.step(answer).unwrap();

        assert!(sc.turnarounds().len() <= target);
        assert!(sc.consecutive_correct() < 2);
        assert_eq!(param, sc.current_param());

        if continuing {
            assert_eq!(sc.params().len(), i + 2);
            assert_eq!(*sc.params().last().unwrap(), param);
        } else {
            assert_eq!(sc.turnarounds().len(), target);
            assert_eq!(sc.params().len(), i + 1);
            break;
        }
    }

    assert!(sc.is_terminal());
}

/// continuing=false exactly once, on the call that reaches the target
#[test]
fn test_single_terminal_signal() {
    let mut sc = StaircaseProcedure::new(20.0, halving_doubling, 3).unwrap();
    let answers = [true, false, true, true, false, true, false];

    let mut finished = 0;
    for answer in answers {
        match sc.step(answer) {
            Ok((true, _)) => {}
            Ok((false, _)) => finished += 1,
            Err(StaircaseError::RunTerminal { turnarounds }) => assert_eq!(turnarounds, 3),
            Err(e) => panic!("unexpected error: {}", e),
        }
    }
    assert_eq!(finished, 1);
}

/// Reset works mid-run and after the run is finished
#[test]
fn test_reset_anywhere() {
    let fresh = StaircaseProcedure::new(20.0, halving_doubling, 2).unwrap();
    let mut sc = StaircaseProcedure::new(20.0, halving_doubling, 2).unwrap();

    sc.step(true).unwrap();
    sc.reset();
    assert_eq!(sc.state(), fresh.state());

    sc.step(false).unwrap();
    sc.step(true).unwrap();
    assert!(sc.is_terminal());
    assert!(sc.step(true).is_err());

    sc.reset();
    assert_eq!(sc.state(), fresh.state());
    assert_eq!(sc.step(true).unwrap(), (true, 20.0));
}

/// result() fails on an empty run instead of returning NaN
#[test]
fn test_result_on_empty_run() {
    let mut sc = StaircaseProcedure::new(20.0, halving_doubling, 6).unwrap();
    assert!(matches!(sc.result(), Err(StaircaseError::InsufficientData)));

    sc.step(true).unwrap();
    sc.step(true).unwrap();
    assert!(matches!(sc.result(), Err(StaircaseError::InsufficientData)));

    sc.reset();
    assert!(matches!(sc.result(), Err(StaircaseError::InsufficientData)));
}

/// The procedure never asks the step function to keep
#[test]
fn test_core_never_passes_keep() {
    let seen = std::cell::RefCell::new(Vec::new());
    let recording = |param: f64, direction: Direction| {
        seen.borrow_mut().push(direction);
        halving_doubling(param, direction)
    };

    let mut sc = StaircaseProcedure::new(20.0, recording, 6).unwrap();
    for answer in reference_answers() {
        sc.step(answer).unwrap();
    }

    let seen = seen.borrow();
    assert!(!seen.is_empty());
    assert!(!seen.contains(&Direction::Keep));
}

/// Step function output is used as is, without clamping
#[test]
fn test_step_fn_output_unclamped() {
    let mut sc = StaircaseProcedure::new(1.0, StepRule::Linear { delta: 5.0 }, 10).unwrap();
    sc.step(true).unwrap();
    let (_, param) = sc.step(true).unwrap();
    assert_eq!(param, -4.0);
}

/// JSON output of a step is valid
#[test]
fn test_json_output_valid() {
    let mut sc = StaircaseProcedure::new(20.0, halving_doubling, 6).unwrap();
    let output = sc.observe(false).unwrap();

    let json = serde_json::to_string(&output).unwrap();
    assert!(json.contains("\"param\""));
    assert!(json.contains("\"reason\""));
    assert!(json.contains("\"phase\":\"ASCENDING\""));
    assert!(json.contains("\"direction\":\"up\""));

    let _: staircase::types::StepOutput = serde_json::from_str(&json).unwrap();
}

/// Parseable output carries the expected keys
#[test]
fn test_parseable_output_format() {
    let mut sc = StaircaseProcedure::new(20.0, halving_doubling, 6).unwrap();
    let formatted = sc.observe(true).unwrap().to_parseable_string();

    assert!(formatted.contains("trial=1"));
    assert!(formatted.contains("answer=T"));
    assert!(formatted.contains("param=20"));
    assert!(formatted.contains("turnarounds=0/6"));
    assert!(formatted.contains("reason=S001_HOLD"));
}
