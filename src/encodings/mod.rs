//! Objects used to compile frameworks into rule batches.

mod admissible_batch_compiler;
pub use admissible_batch_compiler::validate_label;
pub use admissible_batch_compiler::AdmissibleBatchCompiler;

mod rule;
pub use rule::Atom;
pub use rule::Batch;
pub use rule::BodyLiteral;
pub use rule::Element;
pub use rule::Rule;

mod specs;
pub use specs::BatchCompiler;
