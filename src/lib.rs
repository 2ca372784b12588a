//! Dynaf is an incremental solver for the admissible semantics of dynamic abstract argumentation frameworks.
//!
//! Arguments and attacks are added, disabled and re-enabled over time;
//! each element is compiled once into a batch of rules merged into a single SAT solver session,
//! so that the admissible extensions of the current framework can be enumerated after each change
//! without rebuilding the encoding from scratch.
//!
//! ```
//! # use dynaf::dynamics::{DynamicAdmissibleSemanticsSolver, DynamicSolver};
//! # use dynaf::solvers::ExtensionEnumerator;
//! let mut solver = DynamicAdmissibleSemanticsSolver::new();
//! solver.new_argument("a").unwrap();
//! solver.new_argument("b").unwrap();
//! solver.new_attack(&"a", &"b").unwrap();
//! let extensions = solver.enumerate_extensions().unwrap();
//! assert_eq!(2, extensions.len());
//! solver.disable_attack(&"a", &"b").unwrap();
//! assert_eq!(4, solver.count_extensions().unwrap());
//! ```

#![warn(missing_docs)]

pub mod aa;

pub mod dynamics;

pub mod encodings;

mod error;
pub use error::Error;
pub use error::Result;

pub mod io;

pub mod sat;

pub mod solvers;
