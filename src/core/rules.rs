//! Step functions: how a parameter moves for a given direction

use crate::types::{Direction, StepRule};

/// Computes the next parameter value from the current one.
///
/// Implementations are expected to be pure. The procedure does not clamp or
/// validate the returned value, and a panic inside `next` unwinds through
/// `StaircaseProcedure::step`.
pub trait StepFn {
    fn next(&self, param: f64, direction: Direction) -> f64;
}

impl<F> StepFn for F
where
    F: Fn(f64, Direction) -> f64,
{
    fn next(&self, param: f64, direction: Direction) -> f64 {
        self(param, direction)
    }
}

impl StepFn for StepRule {
    fn next(&self, param: f64, direction: Direction) -> f64 {
        match (*self, direction) {
            (_, Direction::Keep) => param,
            (StepRule::Geometric { factor }, Direction::Up) => param * factor,
            (StepRule::Geometric { factor }, Direction::Down) => param / factor,
            (StepRule::Linear { delta }, Direction::Up) => param + delta,
            (StepRule::Linear { delta }, Direction::Down) => param - delta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_halving_doubling() {
        let rule = StepRule::halving_doubling();
        assert_eq!(rule.next(20.0, Direction::Up), 40.0);
        assert_eq!(rule.next(20.0, Direction::Down), 10.0);
        assert_eq!(rule.next(20.0, Direction::Keep), 20.0);
    }

    #[test]
    fn test_linear() {
        let rule = StepRule::Linear { delta: 0.5 };
        assert_eq!(rule.next(3.0, Direction::Up), 3.5);
        assert_eq!(rule.next(3.0, Direction::Down), 2.5);
        assert_eq!(rule.next(3.0, Direction::Keep), 3.0);
    }

    #[test]
    fn test_closure_is_step_fn() {
        let add_one = |p: f64, d: Direction| match d {
            Direction::Up => p + 1.0,
            _ => p,
        };
        assert_eq!(add_one.next(1.0, Direction::Up), 2.0);
        assert_eq!(add_one.next(1.0, Direction::Down), 1.0);
    }
}
