use crate::aa::LabelType;
use std::fmt::Display;

/// A set of arguments returned by a solver.
///
/// The members are kept in the order the arguments were introduced into the solver,
/// so two extensions made of the same arguments are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Extension<T>
where
    T: LabelType,
{
    members: Vec<T>,
}

impl<T> Extension<T>
where
    T: LabelType,
{
    pub(crate) fn new(members: Vec<T>) -> Self {
        Self { members }
    }

    /// Returns the labels of the arguments of this extension.
    pub fn labels(&self) -> &[T] {
        &self.members
    }

    /// Returns `true` iff the argument belongs to this extension.
    pub fn contains(&self, label: &T) -> bool {
        self.members.contains(label)
    }

    /// Returns the number of arguments in this extension.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` iff this extension is the empty set.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Iterates over the labels of the arguments of this extension.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.members.iter()
    }
}

impl<T> Display for Extension<T>
where
    T: LabelType,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let strs = self.members.iter().map(|m| m.to_string()).collect::<Vec<_>>();
        write!(f, "{{{}}}", strs.join(","))
    }
}
