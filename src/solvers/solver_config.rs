use crate::sat::{self, SatSolver, SatSolverFactoryFn};
use std::time::{Duration, Instant};

/// The settings shared by the solvers.
///
/// # Example
///
/// ```
/// # use dynaf::solvers::SolverConfig;
/// # use std::time::Duration;
/// let config = SolverConfig::default().with_timeout(Duration::from_secs(10));
/// assert_eq!(Some(Duration::from_secs(10)), config.timeout());
/// ```
pub struct SolverConfig {
    timeout: Option<Duration>,
    solver_factory: Box<SatSolverFactoryFn>,
}

impl SolverConfig {
    /// Sets the maximal duration of an enumeration of extensions.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the function used to build the SAT solvers.
    pub fn with_sat_solver_factory(mut self, solver_factory: Box<SatSolverFactoryFn>) -> Self {
        self.solver_factory = solver_factory;
        self
    }

    /// Returns the maximal duration of an enumeration of extensions, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns the deadline of an enumeration starting now.
    pub fn deadline(&self) -> Option<Instant> {
        self.timeout.map(|t| Instant::now() + t)
    }

    /// Builds a new SAT solver.
    pub fn new_sat_solver(&self) -> Box<dyn SatSolver> {
        (self.solver_factory)()
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            solver_factory: Box::new(sat::default_solver),
        }
    }
}
