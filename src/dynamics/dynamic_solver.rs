use super::Patch;
use crate::{aa::LabelType, Result};

/// A trait for argumentation solvers that are able to deal with dynamic argumentation frameworks.
///
/// Dynamic AF are frameworks that evolve during the time.
/// A solver may use some information gathered during previous computations in order to speedup further searches.
///
/// Elements are never forgotten by the solver: disabling an element only removes it from the active framework.
pub trait DynamicSolver<T>
where
    T: LabelType,
{
    /// Adds a new argument to the underlying AF, and makes it active.
    fn new_argument(&mut self, label: T) -> Result<()>;

    /// Makes a known argument active again.
    fn enable_argument(&mut self, label: &T) -> Result<()>;

    /// Makes an argument inactive, along with the attacks it is involved in.
    fn disable_argument(&mut self, label: &T) -> Result<()>;

    /// Adds an attack to the underlying AF, and makes it active.
    fn new_attack(&mut self, from: &T, to: &T) -> Result<()>;

    /// Makes a known attack active again.
    fn enable_attack(&mut self, from: &T, to: &T) -> Result<()>;

    /// Makes an attack inactive.
    fn disable_attack(&mut self, from: &T, to: &T) -> Result<()>;

    /// Returns `true` iff the argument is known by the solver, active or not.
    fn has_argument(&self, label: &T) -> bool;

    /// Returns `true` iff the attack is known by the solver, active or not.
    fn has_attack(&self, from: &T, to: &T) -> bool;

    /// Applies a modification to the underlying AF.
    fn apply_patch(&mut self, patch: &Patch<T>) -> Result<()> {
        match patch {
            Patch::EnableArgument(a) if self.has_argument(a) => self.enable_argument(a),
            Patch::EnableArgument(a) => self.new_argument(a.clone()),
            Patch::DisableArgument(a) => self.disable_argument(a),
            Patch::EnableAttack(from, to) if self.has_attack(from, to) => {
                self.enable_attack(from, to)
            }
            Patch::EnableAttack(from, to) => self.new_attack(from, to),
            Patch::DisableAttack(from, to) => self.disable_attack(from, to),
        }
    }
}
