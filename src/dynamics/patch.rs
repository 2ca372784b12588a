use crate::aa::LabelType;
use std::fmt::Display;

/// A modification of a dynamic framework.
///
/// Enabling an element adds it to the framework if it is unknown,
/// and makes it active again otherwise.
/// Disabling an element makes it inactive; it stays known and may be enabled again later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T>
where
    T: LabelType,
{
    /// Adds or re-activates an argument.
    EnableArgument(T),
    /// Deactivates an argument, and the attacks it is involved in.
    DisableArgument(T),
    /// Adds or re-activates an attack.
    EnableAttack(T, T),
    /// Deactivates an attack.
    DisableAttack(T, T),
}

impl<T> Display for Patch<T>
where
    T: LabelType,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Patch::EnableArgument(a) => write!(f, "+arg({})", a),
            Patch::DisableArgument(a) => write!(f, "-arg({})", a),
            Patch::EnableAttack(from, to) => write!(f, "+att({},{})", from, to),
            Patch::DisableAttack(from, to) => write!(f, "-att({},{})", from, to),
        }
    }
}
