//! Solvers and solver settings for the admissible semantics.

mod admissible_semantics_solver;
pub use admissible_semantics_solver::AdmissibleSemanticsSolver;

mod solver_config;
pub use solver_config::SolverConfig;

mod specs;
pub use specs::CredulousAcceptanceComputer;
pub use specs::ExtensionEnumerator;
pub use specs::SingleExtensionComputer;
