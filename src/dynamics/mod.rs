//! Specs and solvers dedicated to dynamic argumentation frameworks.

mod dynamic_admissible_semantics_solver;
pub use dynamic_admissible_semantics_solver::DynamicAdmissibleSemanticsSolver;

mod dynamic_solver;
pub use dynamic_solver::DynamicSolver;

mod extension;
pub use extension::Extension;

mod patch;
pub use patch::Patch;

mod solver_session;
pub use solver_session::BatchId;
pub use solver_session::SolverSession;
