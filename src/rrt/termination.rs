use std::time::{Duration, Instant};

/// Decides when a planning loop should stop. Evaluated once before every iteration.
pub trait TerminationCondition {
    /// Returns true if planning should stop.
    fn evaluate(&mut self) -> bool;
}

/// Terminates after a fixed number of evaluations.
pub struct MaxIterationsTermination {
    max_iterations: usize,
    iterations: usize,
}

impl MaxIterationsTermination {
    pub fn new(max_iterations: usize) -> Self {
        Self {
            max_iterations,
            iterations: 0,
        }
    }
}

impl TerminationCondition for MaxIterationsTermination {
    fn evaluate(&mut self) -> bool {
        if self.iterations >= self.max_iterations {
            return true;
        }
        self.iterations += 1;
        false
    }
}

/// Terminates once a wall-clock budget, measured from construction, is spent.
pub struct TimeoutTermination {
    deadline: Instant,
}

impl TimeoutTermination {
    pub fn new(timeout: Duration) -> Self {
        Self {
            deadline: Instant::now() + timeout,
        }
    }
}

impl TerminationCondition for TimeoutTermination {
    fn evaluate(&mut self) -> bool {
        Instant::now() >= self.deadline
    }
}

impl<T: FnMut() -> bool> TerminationCondition for T {
    fn evaluate(&mut self) -> bool {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_iterations() {
        let mut termination = MaxIterationsTermination::new(3);
        let continued = std::iter::from_fn(|| Some(termination.evaluate()))
            .take_while(|done| !done)
            .count();
        assert_eq!(continued, 3);
        assert!(termination.evaluate());
    }

    #[test]
    fn test_timeout() {
        assert!(TimeoutTermination::new(Duration::ZERO).evaluate());
        assert!(!TimeoutTermination::new(Duration::from_secs(3600)).evaluate());
    }

    #[test]
    fn test_closure() {
        let mut calls = 0;
        let mut termination = || {
            calls += 1;
            calls > 2
        };
        assert!(!termination.evaluate());
        assert!(!termination.evaluate());
        assert!(termination.evaluate());
    }
}
