use crate::aa::LabelType;
use std::fmt::Display;

/// The ground atoms handled by the admissibility encoding.
///
/// `Arg` and `Att` atoms are the structural facts of the framework; their truth values are set from the outside.
/// The other ones are derived by the rules.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Atom<T>
where
    T: LabelType,
{
    /// `arg(a)`: the argument is part of the active framework.
    Arg(T),
    /// `att(f,t)`: the attack is part of the active framework.
    Att(T, T),
    /// `in(a)`: the argument belongs to the extension.
    In(T),
    /// `out(a)`: the argument does not belong to the extension.
    Out(T),
    /// `defeated(a)`: the argument is attacked by the extension.
    Defeated(T),
    /// `not_defended(a)`: an attacker of the argument is not defeated by the extension.
    NotDefended(T),
}

impl<T> Atom<T>
where
    T: LabelType,
{
    /// Returns `true` iff this atom is a structural fact (`arg` or `att`).
    pub fn is_structural(&self) -> bool {
        matches!(self, Atom::Arg(_) | Atom::Att(_, _))
    }
}

impl<T> Display for Atom<T>
where
    T: LabelType,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Atom::Arg(a) => write!(f, "arg({})", a),
            Atom::Att(from, to) => write!(f, "att({},{})", from, to),
            Atom::In(a) => write!(f, "in({})", a),
            Atom::Out(a) => write!(f, "out({})", a),
            Atom::Defeated(a) => write!(f, "defeated({})", a),
            Atom::NotDefended(a) => write!(f, "not_defended({})", a),
        }
    }
}

/// A literal appearing in the body of a rule.
///
/// Negative literals use negation as failure.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BodyLiteral<T>
where
    T: LabelType,
{
    /// The atom must hold.
    Pos(Atom<T>),
    /// The atom must not be derivable.
    Neg(Atom<T>),
}

impl<T> BodyLiteral<T>
where
    T: LabelType,
{
    /// Returns the atom of this literal.
    pub fn atom(&self) -> &Atom<T> {
        match self {
            BodyLiteral::Pos(a) | BodyLiteral::Neg(a) => a,
        }
    }
}

impl<T> Display for BodyLiteral<T>
where
    T: LabelType,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BodyLiteral::Pos(a) => write!(f, "{}", a),
            BodyLiteral::Neg(a) => write!(f, "not {}", a),
        }
    }
}

/// A rule of a compiled batch.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Rule<T>
where
    T: LabelType,
{
    /// Declares an atom whose truth value is set from the outside.
    External(Atom<T>),
    /// `head :- body.`
    Derive {
        /// the derived atom
        head: Atom<T>,
        /// the conditions of the derivation
        body: Vec<BodyLiteral<T>>,
    },
    /// `:- body.`, forbidding the body to hold.
    Constraint {
        /// the forbidden conjunction
        body: Vec<BodyLiteral<T>>,
    },
    /// Declares an atom that may be derived by rules of later batches.
    Open(Atom<T>),
    /// Marks an atom as part of the visible output.
    Show(Atom<T>),
}

fn fmt_body<T>(f: &mut std::fmt::Formatter<'_>, body: &[BodyLiteral<T>]) -> std::fmt::Result
where
    T: LabelType,
{
    let strs = body.iter().map(|l| l.to_string()).collect::<Vec<_>>();
    write!(f, "{}", strs.join(", "))
}

impl<T> Display for Rule<T>
where
    T: LabelType,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::External(a) => write!(f, "#external {}.", a),
            Rule::Derive { head, body } if body.is_empty() => write!(f, "{}.", head),
            Rule::Derive { head, body } => {
                write!(f, "{} :- ", head)?;
                fmt_body(f, body)?;
                write!(f, ".")
            }
            Rule::Constraint { body } => {
                write!(f, ":- ")?;
                fmt_body(f, body)?;
                write!(f, ".")
            }
            Rule::Open(a) => write!(f, "#open {}.", a),
            Rule::Show(a) => write!(f, "#show {}.", a),
        }
    }
}

/// A structural element of a framework, that is an argument or an attack.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Element<T>
where
    T: LabelType,
{
    /// An argument, given by its label.
    Argument(T),
    /// An attack, given by the labels of the attacker and the attacked arguments.
    Attack(T, T),
}

impl<T> Element<T>
where
    T: LabelType,
{
    /// Returns the structural atom reflecting the presence of this element in the active framework.
    pub fn flag_atom(&self) -> Atom<T> {
        match self {
            Element::Argument(a) => Atom::Arg(a.clone()),
            Element::Attack(from, to) => Atom::Att(from.clone(), to.clone()),
        }
    }
}

impl<T> Display for Element<T>
where
    T: LabelType,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.flag_atom())
    }
}

/// The rules produced for a single structural element.
///
/// A batch is applied as a whole to a solver session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch<T>
where
    T: LabelType,
{
    element: Element<T>,
    rules: Vec<Rule<T>>,
}

impl<T> Batch<T>
where
    T: LabelType,
{
    /// Builds a batch from the element it describes and its rules.
    pub fn new(element: Element<T>, rules: Vec<Rule<T>>) -> Self {
        Self { element, rules }
    }

    /// Returns the element described by this batch.
    pub fn element(&self) -> &Element<T> {
        &self.element
    }

    /// Returns the rules of this batch.
    pub fn rules(&self) -> &[Rule<T>] {
        &self.rules
    }
}

impl<T> Display for Batch<T>
where
    T: LabelType,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let strs = self.rules.iter().map(|r| r.to_string()).collect::<Vec<_>>();
        write!(f, "{}", strs.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_rules() {
        let rule = Rule::Derive {
            head: Atom::In("a"),
            body: vec![
                BodyLiteral::Neg(Atom::Out("a")),
                BodyLiteral::Pos(Atom::Arg("a")),
            ],
        };
        assert_eq!("in(a) :- not out(a), arg(a).", rule.to_string());
        let constraint = Rule::Constraint {
            body: vec![
                BodyLiteral::Pos(Atom::In("b")),
                BodyLiteral::Pos(Atom::NotDefended("b")),
            ],
        };
        assert_eq!(":- in(b), not_defended(b).", constraint.to_string());
        assert_eq!(
            "#external att(a,b).",
            Rule::External(Atom::Att("a", "b")).to_string()
        );
        assert_eq!(
            "defeated(a).",
            Rule::Derive {
                head: Atom::Defeated("a"),
                body: vec![]
            }
            .to_string()
        );
    }

    #[test]
    fn test_flag_atoms() {
        assert_eq!(Atom::Arg("a"), Element::Argument("a").flag_atom());
        assert_eq!(Atom::Att("a", "b"), Element::Attack("a", "b").flag_atom());
        assert!(Element::Attack("a", "b").flag_atom().is_structural());
        assert!(!Atom::In("a").is_structural());
        assert_eq!("att(a,b)", Element::Attack("a", "b").to_string());
    }
}
