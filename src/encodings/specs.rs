use super::Batch;
use crate::{aa::LabelType, Result};

/// The trait for compilers translating the structural elements of a framework into rule batches.
///
/// Compilation is pure: it depends only on the element, not on the elements compiled before.
pub trait BatchCompiler<T>
where
    T: LabelType,
{
    /// Compiles the batch of a new argument.
    fn compile_argument(&self, label: &T) -> Result<Batch<T>>;

    /// Compiles the batch of a new attack.
    fn compile_attack(&self, from: &T, to: &T) -> Result<Batch<T>>;
}
