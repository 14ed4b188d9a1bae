//! Configuration for isolation and refinement.

use std::time::Duration;

/// Budget and dispatch settings for root isolation.
#[derive(Clone, Debug, PartialEq)]
pub struct IsolationConfig {
    /// Maximum number of bisections along any branch.
    pub max_depth: usize,
    /// Intervals narrower than this times `max(1, |lower|, |upper|)` are not split.
    pub min_relative_width: f64,
    /// Wall-clock budget; isolation stops cooperatively when it elapses.
    pub time_budget: Option<Duration>,
    /// Minimum frontier size before a wave is expanded in parallel.
    pub parallel_threshold: usize,
}

impl Default for IsolationConfig {
    fn default() -> Self {
        Self {
            max_depth: 256,
            min_relative_width: 10.0 * f64::EPSILON,
            time_budget: None,
            parallel_threshold: 8,
        }
    }
}

impl IsolationConfig {
    /// Sets the bisection depth limit.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets the relative width limit.
    #[must_use]
    pub fn with_min_relative_width(mut self, width: f64) -> Self {
        self.min_relative_width = width;
        self
    }

    /// Sets the wall-clock budget.
    #[must_use]
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = Some(budget);
        self
    }

    /// Sets the parallel dispatch threshold.
    #[must_use]
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }
}

/// Iteration strategy used inside the bracket.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Acceleration {
    /// Plain bisection.
    Bisection,
    /// Secant step through the last two iterates.
    Secant,
    /// Newton step from the last iterate.
    #[default]
    Newton,
}

/// Settings for [`Solver`](crate::solver::Solver).
#[derive(Clone, Debug, PartialEq)]
pub struct SolverConfig {
    /// Target bracket width.
    pub tolerance: f64,
    /// Stop as soon as `|p(x)|` is at most this value.
    pub residual: f64,
    /// Iteration budget per root.
    pub max_iterations: usize,
    /// Step used before falling back to bisection.
    pub acceleration: Acceleration,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-12,
            residual: 0.0,
            max_iterations: 200,
            acceleration: Acceleration::Newton,
        }
    }
}

impl SolverConfig {
    /// Sets the target bracket width.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the residual stopping threshold.
    #[must_use]
    pub fn with_residual(mut self, residual: f64) -> Self {
        self.residual = residual;
        self
    }

    /// Sets the iteration budget.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the acceleration strategy.
    #[must_use]
    pub fn with_acceleration(mut self, acceleration: Acceleration) -> Self {
        self.acceleration = acceleration;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let iso = IsolationConfig::default();
        assert_eq!(iso.max_depth, 256);
        assert_eq!(iso.parallel_threshold, 8);
        assert!(iso.time_budget.is_none());

        let solver = SolverConfig::default();
        assert_eq!(solver.acceleration, Acceleration::Newton);
        assert_eq!(solver.max_iterations, 200);
    }

    #[test]
    fn test_builders() {
        let iso = IsolationConfig::default()
            .with_max_depth(4)
            .with_time_budget(Duration::from_millis(5));
        assert_eq!(iso.max_depth, 4);
        assert_eq!(iso.time_budget, Some(Duration::from_millis(5)));

        let solver = SolverConfig::default()
            .with_tolerance(1e-6)
            .with_acceleration(Acceleration::Secant);
        assert_eq!(solver.tolerance, 1e-6);
        assert_eq!(solver.acceleration, Acceleration::Secant);
    }
}
