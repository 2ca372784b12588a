use super::{Atom, Batch, BatchCompiler, BodyLiteral, Element, Rule};
use crate::{aa::LabelType, Error, Result};

const RESERVED_LABEL_CHARS: [char; 5] = ['(', ')', ',', '.', ':'];

/// Checks that a label can be used to name an argument in the rules.
///
/// Labels must be non-empty, and may not contain whitespaces nor one of the characters `(),.:`.
///
/// # Example
///
/// ```
/// # use dynaf::encodings::validate_label;
/// assert!(validate_label(&"a1").is_ok());
/// assert!(validate_label(&"a b").is_err());
/// assert!(validate_label(&"f(x)").is_err());
/// ```
pub fn validate_label<T>(label: &T) -> Result<()>
where
    T: LabelType,
{
    let s = label.to_string();
    if s.is_empty()
        || s.chars()
            .any(|c| c.is_whitespace() || RESERVED_LABEL_CHARS.contains(&c))
    {
        return Err(Error::InvalidLabel(s));
    }
    Ok(())
}

/// Compiles the structural elements of a framework into the rules of the admissible semantics.
///
/// For an argument `a`, the batch is made of:
///
/// ```text
/// #external arg(a).
/// in(a) :- not out(a), arg(a).
/// out(a) :- not in(a), arg(a).
/// #open defeated(a).
/// #open not_defended(a).
/// #show in(a).
/// ```
///
/// For an attack from `f` to `t`, the batch is made of:
///
/// ```text
/// #external att(f,t).
/// :- in(f), in(t), att(f,t).
/// defeated(t) :- in(f), att(f,t).
/// not_defended(t) :- att(f,t), not defeated(f).
/// :- in(t), not_defended(t).
/// ```
#[derive(Default)]
pub struct AdmissibleBatchCompiler;

impl<T> BatchCompiler<T> for AdmissibleBatchCompiler
where
    T: LabelType,
{
    fn compile_argument(&self, label: &T) -> Result<Batch<T>> {
        validate_label(label)?;
        let a = || label.clone();
        let rules = vec![
            Rule::External(Atom::Arg(a())),
            Rule::Derive {
                head: Atom::In(a()),
                body: vec![
                    BodyLiteral::Neg(Atom::Out(a())),
                    BodyLiteral::Pos(Atom::Arg(a())),
                ],
            },
            Rule::Derive {
                head: Atom::Out(a()),
                body: vec![
                    BodyLiteral::Neg(Atom::In(a())),
                    BodyLiteral::Pos(Atom::Arg(a())),
                ],
            },
            Rule::Open(Atom::Defeated(a())),
            Rule::Open(Atom::NotDefended(a())),
            Rule::Show(Atom::In(a())),
        ];
        Ok(Batch::new(Element::Argument(a()), rules))
    }

    fn compile_attack(&self, from: &T, to: &T) -> Result<Batch<T>> {
        validate_label(from)?;
        validate_label(to)?;
        let f = || from.clone();
        let t = || to.clone();
        let att = || BodyLiteral::Pos(Atom::Att(f(), t()));
        let rules = vec![
            Rule::External(Atom::Att(f(), t())),
            Rule::Constraint {
                body: vec![
                    BodyLiteral::Pos(Atom::In(f())),
                    BodyLiteral::Pos(Atom::In(t())),
                    att(),
                ],
            },
            Rule::Derive {
                head: Atom::Defeated(t()),
                body: vec![BodyLiteral::Pos(Atom::In(f())), att()],
            },
            Rule::Derive {
                head: Atom::NotDefended(t()),
                body: vec![att(), BodyLiteral::Neg(Atom::Defeated(f()))],
            },
            Rule::Constraint {
                body: vec![
                    BodyLiteral::Pos(Atom::In(t())),
                    BodyLiteral::Pos(Atom::NotDefended(t())),
                ],
            },
        ];
        Ok(Batch::new(Element::Attack(f(), t()), rules))
    }
}
