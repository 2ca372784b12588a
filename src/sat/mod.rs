//! SAT solver interfaces used to solve the argumentation frameworks.

mod cadical_solver;
pub use cadical_solver::CadicalSolver;

mod sat_solver;
pub use sat_solver::default_solver;
pub use sat_solver::Assignment;
pub use sat_solver::Literal;
pub use sat_solver::LoggingSolvingListener;
pub use sat_solver::SatSolver;
pub use sat_solver::SatSolverFactoryFn;
pub use sat_solver::SolvingListener;
pub use sat_solver::SolvingResult;
pub use sat_solver::Variable;
