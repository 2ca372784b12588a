use super::{
    CredulousAcceptanceComputer, ExtensionEnumerator, SingleExtensionComputer, SolverConfig,
};
use crate::{
    aa::{AAFramework, LabelType},
    dynamics::{Extension, SolverSession},
    encodings::{AdmissibleBatchCompiler, Atom, BatchCompiler, Element},
    Result,
};
use log::info;

/// A SAT-based solver for the admissible semantics on a fixed framework.
///
/// Each query compiles the whole framework into a fresh session, then solves it once.
pub struct AdmissibleSemanticsSolver<'a, T>
where
    T: LabelType,
{
    af: &'a AAFramework<T>,
    config: SolverConfig,
}

impl<'a, T> AdmissibleSemanticsSolver<'a, T>
where
    T: LabelType,
{
    /// Builds a new SAT based solver for the admissible semantics.
    ///
    /// The underlying SAT solver is one returned by [default_solver](crate::sat::default_solver).
    pub fn new(af: &'a AAFramework<T>) -> Self {
        Self::new_with_config(af, SolverConfig::default())
    }

    /// Builds a new SAT based solver for the admissible semantics, using the given settings.
    pub fn new_with_config(af: &'a AAFramework<T>, config: SolverConfig) -> Self {
        Self { af, config }
    }

    fn build_session(&self) -> Result<SolverSession<T>> {
        info!(
            "compiling a framework with {} arguments and {} attacks",
            self.af.n_arguments(),
            self.af.n_attacks()
        );
        let compiler = AdmissibleBatchCompiler;
        let mut session = SolverSession::new_with_sat_solver(self.config.new_sat_solver());
        let mut elements = Vec::with_capacity(self.af.n_arguments() + self.af.n_attacks());
        for arg in self.af.argument_set().iter() {
            session.apply(compiler.compile_argument(arg.label())?)?;
            elements.push(Element::Argument(arg.label().clone()));
        }
        for att in self.af.iter_attacks() {
            let (from, to) = (att.attacker().label(), att.attacked().label());
            session.apply(compiler.compile_attack(from, to)?)?;
            elements.push(Element::Attack(from.clone(), to.clone()));
        }
        elements
            .iter()
            .try_for_each(|e| session.set_flag(e, true))?;
        Ok(session)
    }
}

impl<T> ExtensionEnumerator<T> for AdmissibleSemanticsSolver<'_, T>
where
    T: LabelType,
{
    fn enumerate_extensions(&mut self) -> Result<Vec<Extension<T>>> {
        let mut session = self.build_session()?;
        session.solve_with_deadline(self.config.deadline())
    }
}

impl<T> SingleExtensionComputer<T> for AdmissibleSemanticsSolver<'_, T>
where
    T: LabelType,
{
    fn compute_one_extension(&mut self) -> Result<Option<Extension<T>>> {
        self.build_session()?.find_model(&[])
    }
}

impl<T> CredulousAcceptanceComputer<T> for AdmissibleSemanticsSolver<'_, T>
where
    T: LabelType,
{
    fn is_credulously_accepted(&mut self, arg: &T) -> Result<bool> {
        self.af.argument_set().get_argument(arg)?;
        Ok(self
            .build_session()?
            .find_model(&[Atom::In(arg.clone())])?
            .is_some())
    }
}
